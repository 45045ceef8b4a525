//! Seasonal runoff forecasting for basin sub-catchments.
//!
//! Fits an additive trend + yearly-seasonality model to a monthly runoff
//! series and extrapolates it with confidence intervals. The
//! [`estimate_and_forecast`] entry point is the pipeline the presentation
//! layer invokes per user interaction.

pub mod chart;
pub mod confidence;
pub mod decomposition;
pub mod engine;

pub use chart::ChartSpec;
pub use engine::SeasonalForecaster;

use pbs_core::error::BasinError;
use pbs_core::precipitation::PrecipitationRecord;
use pbs_core::series::ForecastResult;
use pbs_data::runoff::estimate_runoff;

/// Derive the runoff series for one sub-basin and forecast it.
///
/// Validates the runoff coefficient, converts the precipitation records
/// with the rational method, fits the seasonal model and returns the
/// forward extension together with a renderable chart description. Each
/// call recomputes everything from the supplied inputs; no state is kept
/// between invocations.
pub fn estimate_and_forecast(
    records: &[PrecipitationRecord],
    coefficient: f64,
    horizon: u32,
) -> Result<(ForecastResult, ChartSpec), BasinError> {
    if !coefficient.is_finite() || coefficient <= 0.0 || coefficient > 1.0 {
        return Err(BasinError::InvalidParameter {
            name: "coefficient",
            reason: format!("runoff coefficient must be in (0, 1], got {coefficient}"),
        });
    }
    let series = estimate_runoff(records, coefficient)?;
    let forecast = SeasonalForecaster::default().forecast(&series, horizon)?;
    let chart = ChartSpec::new(&series, &forecast);
    Ok((forecast, chart))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pbs_core::error::BasinError;
    use pbs_core::precipitation::PrecipitationRecord;

    fn records(months: usize) -> Vec<PrecipitationRecord> {
        (0..months)
            .map(|i| PrecipitationRecord {
                sub_basin: "Rio Polochic Alto".to_string(),
                year: 2021 + (i / 12) as i32,
                month: (i % 12) as u32 + 1,
                precipitation_mm: 120.0 + ((i % 12) as f64) * 15.0,
                area_hectares: 52_000.0,
            })
            .collect()
    }

    #[test]
    fn test_pipeline_produces_forecast_and_chart() {
        let (forecast, chart) = estimate_and_forecast(&records(36), 0.3, 3).unwrap();
        assert_eq!(forecast.len(), 3);
        assert_eq!(chart.forecast.len(), 3);
        assert_eq!(chart.band.len(), 3);
        assert!(!chart.historical.is_empty());
        for point in &forecast.points {
            assert!(point.lower_bound <= point.point_estimate);
            assert!(point.point_estimate <= point.upper_bound);
        }
    }

    #[test]
    fn test_coefficient_out_of_range_rejected() {
        for bad in [0.0, -0.1, 1.5, f64::NAN] {
            let result = estimate_and_forecast(&records(36), bad, 3);
            assert!(matches!(
                result,
                Err(BasinError::InvalidParameter { name: "coefficient", .. })
            ));
        }
    }

    #[test]
    fn test_boundary_coefficient_accepted() {
        assert!(estimate_and_forecast(&records(36), 1.0, 1).is_ok());
    }

    #[test]
    fn test_short_history_propagates_insufficient_data() {
        let result = estimate_and_forecast(&records(12), 0.3, 3);
        assert!(matches!(result, Err(BasinError::InsufficientData { .. })));
    }

    #[test]
    fn test_zero_horizon_gives_empty_forecast_with_chart() {
        let (forecast, chart) = estimate_and_forecast(&records(36), 0.3, 0).unwrap();
        assert!(forecast.is_empty());
        assert!(chart.forecast.is_empty());
        assert!(!chart.historical.is_empty());
    }
}
