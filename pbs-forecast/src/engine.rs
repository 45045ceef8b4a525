//! Seasonal trend forecaster for monthly runoff series.

use crate::confidence::{interval_bounds, residual_std_dev, DEFAULT_CONFIDENCE_LEVEL};
use crate::decomposition::decompose_additive;
use log::info;
use pbs_core::error::BasinError;
use pbs_core::month::add_months;
use pbs_core::series::{ForecastPoint, ForecastResult, RunoffSample};

/// Twelve monthly samples per seasonal cycle.
pub const SEASONAL_PERIOD_MONTHS: usize = 12;

/// Fits an additive trend + yearly-seasonality model to a runoff series
/// and extrapolates it at monthly frequency.
///
/// Every call refits from scratch; nothing is cached between invocations,
/// so the output is always consistent with the series the caller supplies.
#[derive(Debug, Clone, Copy)]
pub struct SeasonalForecaster {
    period: usize,
    confidence_level: f64,
}

impl Default for SeasonalForecaster {
    fn default() -> Self {
        SeasonalForecaster {
            period: SEASONAL_PERIOD_MONTHS,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
        }
    }
}

impl SeasonalForecaster {
    /// Build a forecaster with an explicit seasonal period and confidence
    /// level.
    pub fn new(period: usize, confidence_level: f64) -> Result<Self, BasinError> {
        if period < 2 {
            return Err(BasinError::InvalidParameter {
                name: "period",
                reason: format!("seasonal period must be at least 2, got {period}"),
            });
        }
        if !(0.0..1.0).contains(&confidence_level) || confidence_level == 0.0 {
            return Err(BasinError::InvalidParameter {
                name: "confidence_level",
                reason: format!("confidence level must be in (0, 1), got {confidence_level}"),
            });
        }
        Ok(SeasonalForecaster {
            period,
            confidence_level,
        })
    }

    /// Minimum series length the fit supports: two full seasonal cycles.
    pub fn min_samples(&self) -> usize {
        self.period * 2
    }

    /// Produce exactly `horizon` forecast points for the consecutive
    /// calendar months strictly after the last historical sample.
    ///
    /// The model also projects over the historical span during fitting;
    /// those in-sample values are discarded and only the forward extension
    /// is returned. A zero horizon yields an empty result.
    pub fn forecast(
        &self,
        series: &[RunoffSample],
        horizon: u32,
    ) -> Result<ForecastResult, BasinError> {
        self.validate_series(series)?;
        if horizon == 0 {
            return Ok(ForecastResult::empty(self.confidence_level));
        }

        let values: Vec<f64> = series.iter().map(|sample| sample.volume_m3).collect();
        let decomposition = decompose_additive(&values, self.period)?;
        let (intercept, slope) = least_squares_line(&decomposition.trend);
        let residual_sd = residual_std_dev(&decomposition.residual);

        let n = values.len();
        let last_date = series[n - 1].date;
        let mut points = Vec::with_capacity(horizon as usize);
        for step in 0..horizon as usize {
            let index = n + step;
            let point_estimate = intercept
                + slope * index as f64
                + decomposition.seasonal_at(index % self.period);
            let (lower_bound, upper_bound) =
                interval_bounds(point_estimate, step, residual_sd, self.confidence_level);
            points.push(ForecastPoint {
                date: add_months(last_date, step as i32 + 1),
                point_estimate,
                lower_bound,
                upper_bound,
            });
        }

        info!(
            "fitted {} samples, extrapolated {} months at {:.0}% confidence",
            n,
            horizon,
            self.confidence_level * 100.0
        );
        Ok(ForecastResult {
            points,
            confidence_level: self.confidence_level,
        })
    }

    fn validate_series(&self, series: &[RunoffSample]) -> Result<(), BasinError> {
        if series.len() < self.min_samples() {
            return Err(BasinError::InsufficientData {
                reason: format!(
                    "need at least {} monthly samples for seasonal fitting, got {}",
                    self.min_samples(),
                    series.len()
                ),
            });
        }
        if series
            .windows(2)
            .any(|pair| pair[0].date >= pair[1].date)
        {
            return Err(BasinError::InsufficientData {
                reason: "timestamps are not strictly increasing".to_string(),
            });
        }
        Ok(())
    }
}

/// Ordinary least squares line over values indexed 0..n.
/// Returns (intercept, slope).
fn least_squares_line(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let x_mean = (n - 1.0) / 2.0;
    let y_mean = values.iter().sum::<f64>() / n;
    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        numerator += dx * (y - y_mean);
        denominator += dx * dx;
    }
    if denominator == 0.0 {
        return (y_mean, 0.0);
    }
    let slope = numerator / denominator;
    (y_mean - slope * x_mean, slope)
}
