//! Renderable description of the forecast chart.
//!
//! The presentation layer (and the report exporter) draw from this spec
//! instead of reaching into the model: a trailing window of the
//! historical trace, the forecast trace and its confidence band.

use chrono::NaiveDate;
use pbs_core::month::add_months;
use pbs_core::series::{ForecastResult, RunoffSample};
use serde::{Deserialize, Serialize};

/// Months of trailing history shown alongside the forecast.
pub const HISTORY_WINDOW_MONTHS: i32 = 6;

/// One point of a chart trace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// One slice of the confidence band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandPoint {
    pub date: NaiveDate,
    pub lower: f64,
    pub upper: f64,
}

/// Chart description for one forecast run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub y_label: String,
    pub historical: Vec<SeriesPoint>,
    pub forecast: Vec<SeriesPoint>,
    pub band: Vec<BandPoint>,
}

impl ChartSpec {
    /// Build the chart spec from a historical series and its forecast.
    ///
    /// Only the trailing [`HISTORY_WINDOW_MONTHS`] of history are kept,
    /// matching the dashboard view the chart is rendered in.
    pub fn new(series: &[RunoffSample], forecast: &ForecastResult) -> ChartSpec {
        let historical = match series.last() {
            Some(last) => {
                let cutoff = add_months(last.date, -HISTORY_WINDOW_MONTHS);
                series
                    .iter()
                    .filter(|sample| sample.date >= cutoff)
                    .map(|sample| SeriesPoint {
                        date: sample.date,
                        value: sample.volume_m3,
                    })
                    .collect()
            }
            None => Vec::new(),
        };
        let forecast_trace: Vec<SeriesPoint> = forecast
            .points
            .iter()
            .map(|point| SeriesPoint {
                date: point.date,
                value: point.point_estimate,
            })
            .collect();
        let band: Vec<BandPoint> = forecast
            .points
            .iter()
            .map(|point| BandPoint {
                date: point.date,
                lower: point.lower_bound,
                upper: point.upper_bound,
            })
            .collect();
        ChartSpec {
            title: "Pronóstico de caudal (m³/mes)".to_string(),
            y_label: "Caudal estimado (m³/mes)".to_string(),
            historical,
            forecast: forecast_trace,
            band,
        }
    }

    /// Date range covered by all traces, `None` when the spec is empty.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let dates = self
            .historical
            .iter()
            .map(|p| p.date)
            .chain(self.forecast.iter().map(|p| p.date));
        let mut span: Option<(NaiveDate, NaiveDate)> = None;
        for date in dates {
            span = Some(match span {
                None => (date, date),
                Some((lo, hi)) => (lo.min(date), hi.max(date)),
            });
        }
        span
    }

    /// Value range covered by the traces and the band, `None` when empty.
    pub fn value_span(&self) -> Option<(f64, f64)> {
        let values = self
            .historical
            .iter()
            .map(|p| (p.value, p.value))
            .chain(self.forecast.iter().map(|p| (p.value, p.value)))
            .chain(self.band.iter().map(|b| (b.lower, b.upper)));
        let mut span: Option<(f64, f64)> = None;
        for (lo, hi) in values {
            span = Some(match span {
                None => (lo, hi),
                Some((min, max)) => (min.min(lo), max.max(hi)),
            });
        }
        span
    }
}
