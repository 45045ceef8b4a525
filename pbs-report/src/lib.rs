//! Report generation for basin streamflow forecasts.
//!
//! Produces the per-sub-basin PDF artifact: header fields, the tabulated
//! forecast with uncertainty margins, and an embedded chart of the
//! forecast and its confidence band.

pub mod chart;
pub mod pdf;

pub use pdf::{export_report, group_thousands, report_file_name};
