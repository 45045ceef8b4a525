use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One month of estimated runoff volume for a sub-basin.
///
/// Derived deterministically from a precipitation record and a runoff
/// coefficient; the timestamp is always the first of the month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunoffSample {
    pub date: NaiveDate,
    pub volume_m3: f64,
}

/// One forecast step: central estimate plus a two-sided uncertainty interval.
///
/// Invariant: `lower_bound <= point_estimate <= upper_bound`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub point_estimate: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

impl ForecastPoint {
    /// Upper-minus-point uncertainty margin shown in report listings.
    pub fn margin(&self) -> f64 {
        self.upper_bound - self.point_estimate
    }
}

/// Ordered forecast covering consecutive calendar months strictly after
/// the last historical sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub points: Vec<ForecastPoint>,
    /// Confidence level of the uncertainty bands, e.g. 0.80.
    pub confidence_level: f64,
}

impl ForecastResult {
    pub fn empty(confidence_level: f64) -> Self {
        ForecastResult {
            points: Vec::new(),
            confidence_level,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_forecast_point_margin() {
        let point = ForecastPoint {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            point_estimate: 150_000.0,
            lower_bound: 130_000.0,
            upper_bound: 175_000.0,
        };
        assert!((point.margin() - 25_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_result() {
        let result = ForecastResult::empty(0.8);
        assert!(result.is_empty());
        assert_eq!(result.len(), 0);
        assert!((result.confidence_level - 0.8).abs() < f64::EPSILON);
    }
}
