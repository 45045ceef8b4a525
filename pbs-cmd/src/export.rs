//! Export command: run the pipeline and write the PDF report.

use crate::forecast::validate_horizon;
use crate::records::load_sub_basin_records;
use log::info;
use pbs_forecast::estimate_and_forecast;
use pbs_report::export_report;
use std::path::Path;

/// Forecast one sub-basin and export the PDF report into `out_dir`.
pub fn run_export(
    records_csv: &str,
    sub_basin: &str,
    coefficient: f64,
    horizon: u32,
    out_dir: &str,
) -> anyhow::Result<()> {
    validate_horizon(horizon)?;
    let records = load_sub_basin_records(records_csv, sub_basin)?;

    let (forecast, _chart) = estimate_and_forecast(&records, coefficient, horizon)?;
    info!(
        "exporting {}-month forecast report for '{}'",
        forecast.len(),
        sub_basin
    );

    let path = export_report(sub_basin, coefficient, &forecast, Path::new(out_dir))?;
    println!("Reporte generado: {}", path.display());
    Ok(())
}
