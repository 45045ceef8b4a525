//! Additive decomposition of a monthly runoff series.
//!
//! Splits a series into trend, yearly-seasonal and residual components:
//! `Y = T + S + R`.

use pbs_core::error::BasinError;

/// Decomposed series components, all the same length as the input.
#[derive(Debug, Clone)]
pub struct Decomposition {
    pub trend: Vec<f64>,
    pub seasonal: Vec<f64>,
    pub residual: Vec<f64>,
}

impl Decomposition {
    /// Mean seasonal deviation for a cycle position in `0..period`.
    ///
    /// The seasonal component repeats per position, so the first cycle
    /// holds the per-position means.
    pub fn seasonal_at(&self, position: usize) -> f64 {
        self.seasonal[position]
    }
}

/// Perform additive decomposition with the given seasonal period.
///
/// The trend is a centered moving average (half-weighted endpoints for
/// even periods, the standard 2xm average), extended flat at the edges.
/// The seasonal component is the per-position mean of the detrended
/// series. A series shorter than two full periods cannot support a
/// seasonal estimate and is rejected.
pub fn decompose_additive(data: &[f64], period: usize) -> Result<Decomposition, BasinError> {
    if period < 2 {
        return Err(BasinError::InvalidParameter {
            name: "period",
            reason: format!("seasonal period must be at least 2, got {period}"),
        });
    }
    let n = data.len();
    if n < period * 2 {
        return Err(BasinError::InsufficientData {
            reason: format!(
                "need at least {} monthly samples for seasonal fitting, got {}",
                period * 2,
                n
            ),
        });
    }

    let mut trend = vec![0.0; n];
    let half = period / 2;
    if period % 2 == 0 {
        for i in half..(n - half) {
            let mut sum = 0.5 * (data[i - half] + data[i + half]);
            sum += data[i - half + 1..i + half].iter().sum::<f64>();
            trend[i] = sum / period as f64;
        }
    } else {
        for i in half..(n - half) {
            let sum: f64 = data[i - half..=i + half].iter().sum();
            trend[i] = sum / period as f64;
        }
    }
    for i in 0..half {
        trend[i] = trend[half];
    }
    for i in (n - half)..n {
        trend[i] = trend[n - half - 1];
    }

    let detrended: Vec<f64> = data.iter().zip(trend.iter()).map(|(d, t)| d - t).collect();

    let mut seasonal = vec![0.0; n];
    for position in 0..period {
        let values: Vec<f64> = detrended
            .iter()
            .skip(position)
            .step_by(period)
            .copied()
            .collect();
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        for slot in seasonal.iter_mut().skip(position).step_by(period) {
            *slot = mean;
        }
    }

    let residual: Vec<f64> = data
        .iter()
        .zip(trend.iter())
        .zip(seasonal.iter())
        .map(|((d, t), s)| d - t - s)
        .collect();

    Ok(Decomposition {
        trend,
        seasonal,
        residual,
    })
}
