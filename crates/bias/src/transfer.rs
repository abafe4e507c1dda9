//! Calibration factors computed over the past window.
//!
//! Means are computed over finite values only.

use kairos_stats::nan_mean;

use crate::error::BiasError;

/// Mean of `data`, or [`BiasError::InsufficientData`] naming `series`.
pub(crate) fn require_mean(data: &[f64], series: &'static str) -> Result<f64, BiasError> {
    nan_mean(data).ok_or(BiasError::InsufficientData { series })
}

/// Additive offset `mean(reference_past) - mean(model_past)`.
pub fn mean_shift(reference_past: &[f64], model_past: &[f64]) -> Result<f64, BiasError> {
    let reference = require_mean(reference_past, "reference_past")?;
    let model = require_mean(model_past, "model_past")?;
    Ok(reference - model)
}

/// Multiplicative factor `mean(reference_past) / mean(model_past)`.
///
/// # Errors
///
/// Returns [`BiasError::DegenerateVariance`] when the model mean is exactly
/// zero.
pub fn mean_ratio(reference_past: &[f64], model_past: &[f64]) -> Result<f64, BiasError> {
    let reference = require_mean(reference_past, "reference_past")?;
    let model = require_mean(model_past, "model_past")?;
    if model == 0.0 {
        return Err(BiasError::DegenerateVariance);
    }
    Ok(reference / model)
}
