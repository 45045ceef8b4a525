//! Forecast command: runoff derivation, model fit and console summary.

use crate::records::load_sub_basin_records;
use log::info;
use pbs_core::error::BasinError;
use pbs_data::runoff::estimate_runoff;
use pbs_data::summary::summarize;
use pbs_forecast::estimate_and_forecast;
use pbs_report::group_thousands;

/// Longest forecast the CLI accepts, one full seasonal cycle.
pub const MAX_HORIZON_MONTHS: u32 = 12;

/// Validate the horizon at the boundary before the core runs.
pub fn validate_horizon(horizon: u32) -> Result<(), BasinError> {
    if horizon == 0 || horizon > MAX_HORIZON_MONTHS {
        return Err(BasinError::InvalidParameter {
            name: "horizon",
            reason: format!("horizon must be between 1 and {MAX_HORIZON_MONTHS} months, got {horizon}"),
        });
    }
    Ok(())
}

/// Run the full estimate-and-forecast pipeline for one sub-basin and
/// print the forecast table and executive summary.
pub fn run_forecast(
    records_csv: &str,
    sub_basin: &str,
    coefficient: f64,
    horizon: u32,
    offset: Option<usize>,
    chart_json: Option<&str>,
) -> anyhow::Result<()> {
    validate_horizon(horizon)?;
    let records = load_sub_basin_records(records_csv, sub_basin)?;

    let (forecast, chart) = estimate_and_forecast(&records, coefficient, horizon)?;
    // the summary compares against the same series the pipeline fitted
    let series = estimate_runoff(&records, coefficient)?;
    info!(
        "forecast ready for '{}': {} historical months, {} forecast months",
        sub_basin,
        series.len(),
        forecast.len()
    );

    println!("Caudal estimado en: {sub_basin} (C = {coefficient:.2})");
    println!();
    println!("Pronóstico próximo:");
    for point in &forecast.points {
        println!(
            "  {}: {} m³/mes (±{})",
            point.date,
            group_thousands(point.point_estimate),
            group_thousands(point.margin())
        );
    }

    let offset = offset.unwrap_or(horizon as usize);
    let metrics = summarize(&forecast, &series, offset)?;
    println!();
    println!("Próximo mes: {}", metrics.target_month.format("%B %Y"));
    println!(
        "Caudal estimado: {} m³/mes",
        group_thousands(metrics.estimated_volume)
    );
    println!(
        "Comparado al promedio histórico: {:+.1}% (promedio {} m³/mes)",
        metrics.percent_delta,
        group_thousands(metrics.historical_mean)
    );

    if let Some(path) = chart_json {
        let json = serde_json::to_string_pretty(&chart)?;
        std::fs::write(path, json)?;
        println!();
        println!("Chart spec written to {path}");
    }

    Ok(())
}
