//! Chart rendering for the report exporter.
//!
//! Draws a [`ChartSpec`] to a PNG file: historical trace, forecast trace
//! with markers, and the shaded confidence band. Axis labels are left to
//! the surrounding document, which names the units in its own text.

use chrono::NaiveDate;
use pbs_core::error::BasinError;
use pbs_core::month::add_months;
use pbs_forecast::chart::ChartSpec;
use plotters::prelude::*;
use std::path::Path;

/// Pixel dimensions of the scratch chart image.
pub const CHART_WIDTH: u32 = 900;
pub const CHART_HEIGHT: u32 = 540;

fn draw_err<E: std::fmt::Display>(err: E) -> BasinError {
    BasinError::ExportFailed {
        reason: format!("chart rendering failed: {err}"),
    }
}

/// Render the chart spec to a PNG file at `path`.
pub fn render_chart_png(spec: &ChartSpec, path: &Path) -> Result<(), BasinError> {
    let (x_min, mut x_max) = spec.date_span().ok_or_else(|| BasinError::ExportFailed {
        reason: "chart has no data to draw".to_string(),
    })?;
    if x_min == x_max {
        x_max = add_months(x_max, 1);
    }
    let (value_min, value_max) = spec.value_span().unwrap_or((0.0, 1.0));
    let y_min = value_min.min(0.0);
    let mut y_max = value_max + (value_max - y_min).abs() / 5.0;
    if y_max <= y_min {
        y_max = y_min + 1.0;
    }

    let root = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let ranged_date: RangedDate<NaiveDate> = (x_min..x_max).into();
    let mut chart = ChartBuilder::on(&root)
        .margin(20i32)
        .x_label_area_size(20u32)
        .y_label_area_size(40u32)
        .build_cartesian_2d(ranged_date, y_min..y_max)
        .map_err(draw_err)?;
    chart
        .configure_mesh()
        .x_labels(0)
        .y_labels(0)
        .draw()
        .map_err(draw_err)?;

    if !spec.band.is_empty() {
        let mut band_points: Vec<(NaiveDate, f64)> = spec
            .band
            .iter()
            .map(|slice| (slice.date, slice.upper))
            .collect();
        band_points.extend(spec.band.iter().rev().map(|slice| (slice.date, slice.lower)));
        chart
            .draw_series(std::iter::once(Polygon::new(band_points, GREEN.mix(0.2))))
            .map_err(draw_err)?;
    }

    if !spec.historical.is_empty() {
        chart
            .draw_series(LineSeries::new(
                spec.historical.iter().map(|p| (p.date, p.value)),
                &BLUE,
            ))
            .map_err(draw_err)?;
        chart
            .draw_series(
                spec.historical
                    .iter()
                    .map(|p| Circle::new((p.date, p.value), 3i32, BLUE.filled())),
            )
            .map_err(draw_err)?;
    }

    if !spec.forecast.is_empty() {
        chart
            .draw_series(LineSeries::new(
                spec.forecast.iter().map(|p| (p.date, p.value)),
                &RED,
            ))
            .map_err(draw_err)?;
        chart
            .draw_series(
                spec.forecast
                    .iter()
                    .map(|p| Circle::new((p.date, p.value), 3i32, RED.filled())),
            )
            .map_err(draw_err)?;
    }

    root.present().map_err(draw_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pbs_forecast::chart::{BandPoint, SeriesPoint};

    fn spec_with_forecast() -> ChartSpec {
        ChartSpec {
            title: "Pronóstico de caudal (m³/mes)".to_string(),
            y_label: "Caudal estimado (m³/mes)".to_string(),
            historical: vec![
                SeriesPoint {
                    date: NaiveDate::from_ymd_opt(2023, 11, 1).unwrap(),
                    value: 120_000.0,
                },
                SeriesPoint {
                    date: NaiveDate::from_ymd_opt(2023, 12, 1).unwrap(),
                    value: 140_000.0,
                },
            ],
            forecast: vec![SeriesPoint {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                value: 130_000.0,
            }],
            band: vec![BandPoint {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                lower: 110_000.0,
                upper: 150_000.0,
            }],
        }
    }

    #[test]
    fn test_render_chart_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        render_chart_png(&spec_with_forecast(), &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        // PNG magic number
        assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]));
    }

    #[test]
    fn test_render_without_forecast_traces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        let mut spec = spec_with_forecast();
        spec.forecast.clear();
        spec.band.clear();
        render_chart_png(&spec, &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_render_empty_spec_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        let spec = ChartSpec {
            title: String::new(),
            y_label: String::new(),
            historical: vec![],
            forecast: vec![],
            band: vec![],
        };
        let result = render_chart_png(&spec, &path);
        assert!(matches!(result, Err(BasinError::ExportFailed { .. })));
        assert!(!path.exists());
    }
}
