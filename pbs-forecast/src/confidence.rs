//! Prediction interval construction from model residuals.

/// Confidence level applied when the caller does not pick one.
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.80;

/// Two-sided z-score for a confidence level.
///
/// Levels between the table entries fall back to the 80% band.
pub fn z_score(confidence_level: f64) -> f64 {
    match confidence_level {
        x if x >= 0.99 => 2.576,
        x if x >= 0.95 => 1.96,
        x if x >= 0.90 => 1.645,
        _ => 1.282,
    }
}

/// Standard deviation of the fit residuals.
pub fn residual_std_dev(residuals: &[f64]) -> f64 {
    if residuals.is_empty() {
        return 0.0;
    }
    let n = residuals.len() as f64;
    let mean = residuals.iter().sum::<f64>() / n;
    let variance = residuals.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

/// Interval bounds around a point estimate at forecast step `step`
/// (zero-based). The standard error grows with the square root of the
/// step so longer horizons carry wider bands.
pub fn interval_bounds(
    point: f64,
    step: usize,
    residual_sd: f64,
    confidence_level: f64,
) -> (f64, f64) {
    let std_error = residual_sd * ((step + 1) as f64).sqrt();
    let spread = z_score(confidence_level) * std_error;
    (point - spread, point + spread)
}
