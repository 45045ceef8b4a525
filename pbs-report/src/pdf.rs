//! PDF assembly for the forecast report.
//!
//! Renders the forecast chart to a scratch PNG inside a temporary
//! directory, builds the document fully in memory, and writes the output
//! file in a single step so a failed export never leaves a partial
//! artifact.

use crate::chart::render_chart_png;
use chrono::Local;
use log::info;
use pbs_core::error::BasinError;
use pbs_core::series::ForecastResult;
use pbs_forecast::chart::ChartSpec;
use printpdf::image_crate::codecs::png::PngDecoder;
use printpdf::{BuiltinFont, Image, ImageTransform, Mm, PdfDocument};
use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Fixed prefix of every report artifact.
pub const REPORT_PREFIX: &str = "Pronostico_";

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 10.0;
const CHART_TARGET_WIDTH_MM: f32 = 180.0;
const CHART_DPI: f32 = 300.0;

fn export_err<E: std::fmt::Display>(err: E) -> BasinError {
    BasinError::ExportFailed {
        reason: err.to_string(),
    }
}

/// Deterministic artifact name for a sub-basin: the fixed prefix plus the
/// sub-basin name with every non-alphanumeric character replaced by an
/// underscore.
pub fn report_file_name(sub_basin: &str) -> String {
    let safe: String = sub_basin
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    format!("{REPORT_PREFIX}{safe}.pdf")
}

/// Integer-round a volume and group its digits with spaces, the format
/// used throughout the report listings.
pub fn group_thousands(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    if rounded < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Write the PDF forecast report for one sub-basin and return its path.
///
/// The artifact carries the report header (sub-basin, coefficient,
/// generation timestamp), one listing line per forecast point with its
/// uncertainty margin, and a chart of the forecast with its confidence
/// band. An empty forecast still yields a valid document with the header
/// and an empty listing; the chart is simply omitted. An existing report
/// for the same sub-basin is overwritten. The scratch chart image lives
/// in a temporary directory that is released on every exit path.
pub fn export_report(
    sub_basin: &str,
    coefficient: f64,
    forecast: &ForecastResult,
    out_dir: &Path,
) -> Result<PathBuf, BasinError> {
    let (doc, page, layer) = PdfDocument::new(
        "Reporte de Pronóstico",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Capa 1",
    );
    let layer = doc.get_page(page).get_layer(layer);
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(export_err)?;
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(export_err)?;

    let mut cursor = PAGE_HEIGHT_MM - 20.0;
    layer.use_text(
        "Reporte de Pronóstico - Cuenca del Polochic",
        16.0,
        Mm(MARGIN_MM),
        Mm(cursor),
        &bold,
    );
    cursor -= 10.0;
    layer.use_text(
        format!("Subcuenca: {sub_basin}"),
        12.0,
        Mm(MARGIN_MM),
        Mm(cursor),
        &regular,
    );
    cursor -= 7.0;
    layer.use_text(
        format!("Coeficiente de escorrentía: {coefficient:.2}"),
        12.0,
        Mm(MARGIN_MM),
        Mm(cursor),
        &regular,
    );
    cursor -= 7.0;
    layer.use_text(
        format!(
            "Fecha de generación: {}",
            Local::now().format("%Y-%m-%d %H:%M")
        ),
        12.0,
        Mm(MARGIN_MM),
        Mm(cursor),
        &regular,
    );
    cursor -= 12.0;
    layer.use_text("Pronóstico:", 12.0, Mm(MARGIN_MM), Mm(cursor), &bold);
    cursor -= 8.0;

    for point in &forecast.points {
        layer.use_text(
            format!(
                "{}: {} m³/mes (±{})",
                point.date,
                group_thousands(point.point_estimate),
                group_thousands(point.margin())
            ),
            11.0,
            Mm(MARGIN_MM),
            Mm(cursor),
            &regular,
        );
        cursor -= 6.0;
    }

    if !forecast.is_empty() {
        // the report chart shows the forecast and its band only; the
        // dashboard chart with trailing history stays on screen
        let spec = ChartSpec::new(&[], forecast);
        let scratch = TempDir::new()?;
        let chart_png = scratch.path().join("grafica_pronostico.png");
        render_chart_png(&spec, &chart_png)?;

        let image = load_chart_image(&chart_png)?;
        let natural_width_mm: Mm = image.image.width.into_pt(CHART_DPI).into();
        let natural_height_mm: Mm = image.image.height.into_pt(CHART_DPI).into();
        let scale = CHART_TARGET_WIDTH_MM / natural_width_mm.0;
        let image_height_mm = natural_height_mm.0 * scale;
        let image_y = (cursor - image_height_mm - 5.0).max(MARGIN_MM);
        image.add_to_layer(
            layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(MARGIN_MM)),
                translate_y: Some(Mm(image_y)),
                scale_x: Some(scale),
                scale_y: Some(scale),
                dpi: Some(CHART_DPI),
                ..Default::default()
            },
        );
    }

    let bytes = doc.save_to_bytes().map_err(export_err)?;
    let out_path = out_dir.join(report_file_name(sub_basin));
    fs::write(&out_path, bytes)?;

    info!(
        "wrote forecast report for '{}' to {}",
        sub_basin,
        out_path.display()
    );
    Ok(out_path)
}

fn load_chart_image(path: &Path) -> Result<Image, BasinError> {
    let file = fs::File::open(path)?;
    let decoder = PngDecoder::new(BufReader::new(file)).map_err(export_err)?;
    Image::try_from(decoder).map_err(export_err)
}
