//! Runoff derivation and summary statistics for basin precipitation records.
//!
//! This crate handles transforming raw precipitation records into the
//! monthly runoff series consumed by forecasting and reporting.

/// Rational-method runoff estimation for one sub-basin.
pub mod runoff {
    use log::debug;
    use pbs_core::error::BasinError;
    use pbs_core::precipitation::PrecipitationRecord;
    use pbs_core::series::RunoffSample;

    /// Square meters per hectare.
    pub const SQUARE_METERS_PER_HECTARE: f64 = 10_000.0;

    /// Millimeters per meter.
    pub const MILLIMETERS_PER_METER: f64 = 1_000.0;

    /// Derive the chronologically ordered monthly runoff series for one
    /// sub-basin.
    ///
    /// Applies the simplified rational method with no time-rate term:
    /// `volume = C x (precipitation in meters) x (area in square meters)`.
    /// The whole month's precipitation is assumed to convert with
    /// coefficient `C`, so the result is a volume per calendar month, not
    /// a discharge rate.
    ///
    /// All records must belong to the same sub-basin. The coefficient
    /// range is validated by the caller at the pipeline boundary.
    pub fn estimate_runoff(
        records: &[PrecipitationRecord],
        coefficient: f64,
    ) -> Result<Vec<RunoffSample>, BasinError> {
        if let Some(first) = records.first() {
            if let Some(stray) = records.iter().find(|r| r.sub_basin != first.sub_basin) {
                return Err(BasinError::InvalidRecord(format!(
                    "mixed sub-basins in input: '{}' and '{}'",
                    first.sub_basin, stray.sub_basin
                )));
            }
        }

        let mut samples = Vec::with_capacity(records.len());
        for record in records {
            let date = record.date().ok_or_else(|| {
                BasinError::InvalidRecord(format!(
                    "month {} out of range for {} {}",
                    record.month, record.sub_basin, record.year
                ))
            })?;
            let volume_m3 = coefficient
                * (record.precipitation_mm / MILLIMETERS_PER_METER)
                * (record.area_hectares * SQUARE_METERS_PER_HECTARE);
            samples.push(RunoffSample { date, volume_m3 });
        }

        samples.sort_by_key(|sample| sample.date);
        if let Some(pair) = samples.windows(2).find(|pair| pair[0].date == pair[1].date) {
            return Err(BasinError::InvalidRecord(format!(
                "duplicate sample for {}",
                pair[0].date
            )));
        }

        debug!("derived {} runoff samples", samples.len());
        Ok(samples)
    }

    #[cfg(test)]
    mod tests {
        use super::estimate_runoff;
        use pbs_core::error::BasinError;
        use pbs_core::precipitation::PrecipitationRecord;

        fn record(year: i32, month: u32, precip_mm: f64, area_ha: f64) -> PrecipitationRecord {
            PrecipitationRecord {
                sub_basin: "Rio Polochic Alto".to_string(),
                year,
                month,
                precipitation_mm: precip_mm,
                area_hectares: area_ha,
            }
        }

        #[test]
        fn test_rational_method_worked_example() {
            // 100 mm over 500 ha at C = 0.3 -> 0.3 x 0.1 m x 5,000,000 m2
            let records = vec![record(2023, 1, 100.0, 500.0), record(2023, 2, 80.0, 500.0)];
            let samples = estimate_runoff(&records, 0.3).unwrap();
            assert_eq!(samples.len(), 2);
            assert!((samples[0].volume_m3 - 150_000.0).abs() < 1e-6);
            assert!((samples[1].volume_m3 - 120_000.0).abs() < 1e-6);
        }

        #[test]
        fn test_volume_scales_linearly_with_coefficient() {
            let records = vec![record(2023, 1, 100.0, 500.0), record(2023, 2, 80.0, 500.0)];
            let single = estimate_runoff(&records, 0.25).unwrap();
            let double = estimate_runoff(&records, 0.5).unwrap();
            for (a, b) in single.iter().zip(double.iter()) {
                assert!((b.volume_m3 - 2.0 * a.volume_m3).abs() < 1e-6);
                assert!(a.volume_m3 >= 0.0);
            }
        }

        #[test]
        fn test_output_sorted_by_date() {
            let records = vec![
                record(2023, 3, 50.0, 500.0),
                record(2023, 1, 100.0, 500.0),
                record(2023, 2, 80.0, 500.0),
            ];
            let samples = estimate_runoff(&records, 0.3).unwrap();
            assert!(samples.windows(2).all(|pair| pair[0].date < pair[1].date));
        }

        #[test]
        fn test_mixed_sub_basins_rejected() {
            let mut other = record(2023, 2, 80.0, 500.0);
            other.sub_basin = "Rio Cahabon".to_string();
            let records = vec![record(2023, 1, 100.0, 500.0), other];
            let result = estimate_runoff(&records, 0.3);
            assert!(matches!(result, Err(BasinError::InvalidRecord(_))));
        }

        #[test]
        fn test_duplicate_month_rejected() {
            let records = vec![record(2023, 1, 100.0, 500.0), record(2023, 1, 80.0, 500.0)];
            let result = estimate_runoff(&records, 0.3);
            assert!(matches!(result, Err(BasinError::InvalidRecord(_))));
        }

        #[test]
        fn test_empty_input() {
            let samples = estimate_runoff(&[], 0.3).unwrap();
            assert!(samples.is_empty());
        }
    }
}

/// Executive summary metrics comparing a forecast against history.
pub mod summary {
    use chrono::NaiveDate;
    use pbs_core::error::BasinError;
    use pbs_core::series::{ForecastResult, RunoffSample};
    use serde::Serialize;

    /// Comparison of one forecast point against the historical mean.
    ///
    /// Computed fresh on every forecast run; never persisted.
    #[derive(Debug, Clone, Copy, PartialEq, Serialize)]
    pub struct SummaryMetrics {
        /// Month the reported estimate refers to
        pub target_month: NaiveDate,
        /// Point estimate at the target month in cubic meters
        pub estimated_volume: f64,
        /// Arithmetic mean of all historical runoff volumes
        pub historical_mean: f64,
        /// Signed percentage delta of the estimate against the mean
        pub percent_delta: f64,
    }

    /// Compute summary metrics for the forecast point at `offset_from_end`.
    ///
    /// The look-back offset is an explicit parameter rather than being
    /// derived from the horizon: `offset_from_end = forecast.len()` selects
    /// the first forecast point (the month immediately after the history),
    /// `1` selects the last.
    pub fn summarize(
        forecast: &ForecastResult,
        historical: &[RunoffSample],
        offset_from_end: usize,
    ) -> Result<SummaryMetrics, BasinError> {
        if historical.is_empty() {
            return Err(BasinError::NoHistoricalData);
        }
        if offset_from_end == 0 || offset_from_end > forecast.len() {
            return Err(BasinError::InvalidParameter {
                name: "offset",
                reason: format!(
                    "offset {} outside forecast of {} points",
                    offset_from_end,
                    forecast.len()
                ),
            });
        }

        let target = &forecast.points[forecast.len() - offset_from_end];
        let historical_mean =
            historical.iter().map(|s| s.volume_m3).sum::<f64>() / historical.len() as f64;
        if historical_mean == 0.0 {
            return Err(BasinError::InsufficientData {
                reason: "historical mean is zero; percent delta is undefined".to_string(),
            });
        }
        let percent_delta =
            (target.point_estimate - historical_mean) / historical_mean * 100.0;

        Ok(SummaryMetrics {
            target_month: target.date,
            estimated_volume: target.point_estimate,
            historical_mean,
            percent_delta,
        })
    }

}
