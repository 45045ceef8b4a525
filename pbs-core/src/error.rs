//! Failure kinds shared across the streamflow pipeline.

use thiserror::Error;

/// Errors surfaced by the estimation, forecasting and export operations.
///
/// Each failure condition propagates as a distinct variant so the caller
/// can render a specific message; no variant is ever substituted with a
/// default value.
#[derive(Error, Debug)]
pub enum BasinError {
    /// A caller-supplied parameter is out of range.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The historical series is too short or malformed for model fitting.
    #[error("insufficient data for fitting: {reason}")]
    InsufficientData { reason: String },

    /// A historical mean was requested over an empty series.
    #[error("historical series is empty")]
    NoHistoricalData,

    /// Writing the report artifact failed.
    #[error("report export failed: {reason}")]
    ExportFailed { reason: String },

    /// A row of the precipitation dataset could not be parsed.
    #[error("invalid precipitation record: {0}")]
    InvalidRecord(String),
}

impl From<std::io::Error> for BasinError {
    fn from(err: std::io::Error) -> Self {
        BasinError::ExportFailed {
            reason: err.to_string(),
        }
    }
}
