//! Bias-correction transfer functions for daily climate model series.
//!
//! A transfer function is calibrated on a historical (*past*) window where
//! both the reference (observations) and the model are available, and then
//! applied to the model over a *future* window.
//!
//! | Method | Corrected future |
//! |--------|------------------|
//! | `none` | `model_future` |
//! | `delta` | `model_future + (mean(reference_past) - mean(model_past))` |
//! | `relative_delta` | `model_future * (mean(reference_past) / mean(model_past))` |
//!
//! Means skip missing (`NaN`) values. A slice with no valid value is an
//! [`BiasError::InsufficientData`] error.
//!
//! # Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use kairos_bias::{CorrectionMethod, apply_correction};
//! use kairos_series::{DailySeries, DateRange};
//!
//! let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
//! let reference = DailySeries::from_start(start, vec![10.0, 10.0, 20.0, 20.0]);
//! let model = DailySeries::from_start(start, vec![8.0, 8.0, 15.0, 17.0]);
//!
//! let past = DateRange::new(start, NaiveDate::from_ymd_opt(2000, 1, 2).unwrap()).unwrap();
//! let future = DateRange::new(
//!     NaiveDate::from_ymd_opt(2000, 1, 3).unwrap(),
//!     NaiveDate::from_ymd_opt(2000, 1, 4).unwrap(),
//! )
//! .unwrap();
//!
//! let result = apply_correction(CorrectionMethod::Delta, &reference, &model, past, future).unwrap();
//! assert_eq!(result.corrected().values(), &[17.0, 19.0]);
//! assert_eq!(result.reference().values(), &[20.0, 20.0]);
//! ```

mod error;
mod method;
mod result;
mod transfer;

pub use error::BiasError;
pub use method::CorrectionMethod;
pub use result::{Adjustment, CorrectionResult};
pub use transfer::{mean_ratio, mean_shift};

use kairos_series::{DailySeries, DateRange};
use tracing::{debug, warn};

/// Applies `method` to the model over `future`, calibrated on `past`.
///
/// Returns the corrected model future and the reference future. Neither
/// input series is modified.
///
/// # Errors
///
/// Returns [`BiasError::InsufficientData`] when the reference or model future
/// (or, for calibrated methods, either past slice) contains no valid value,
/// and [`BiasError::DegenerateVariance`] for `relative_delta` with a zero
/// historical model mean.
#[tracing::instrument(skip(reference, model), fields(n_reference = reference.len(), n_model = model.len()))]
pub fn apply_correction(
    method: CorrectionMethod,
    reference: &DailySeries,
    model: &DailySeries,
    past: DateRange,
    future: DateRange,
) -> Result<CorrectionResult, BiasError> {
    if method != CorrectionMethod::None && past.overlaps(future) {
        warn!(
            past_end = %past.end(),
            future_start = %future.start(),
            "calibration and evaluation windows overlap"
        );
    }

    let reference_future = reference.slice(future);
    let model_future = model.slice(future);
    transfer::require_mean(reference_future.values(), "reference_future")?;
    transfer::require_mean(model_future.values(), "model_future")?;

    let (values, adjustment) = match method {
        CorrectionMethod::None => (model_future.values().to_vec(), Adjustment::Identity),
        CorrectionMethod::Delta => {
            let shift = mean_shift(
                reference.slice(past).values(),
                model.slice(past).values(),
            )?;
            let values = model_future.values().iter().map(|v| v + shift).collect();
            (values, Adjustment::Shift(shift))
        }
        CorrectionMethod::RelativeDelta => {
            let ratio = mean_ratio(
                reference.slice(past).values(),
                model.slice(past).values(),
            )?;
            let values = model_future.values().iter().map(|v| v * ratio).collect();
            (values, Adjustment::Scale(ratio))
        }
    };
    debug!(?adjustment, n_future = model_future.len(), "correction calibrated");

    let corrected = model_future.with_values(values)?;
    Ok(CorrectionResult::new(
        method,
        corrected,
        reference_future,
        adjustment,
    ))
}
