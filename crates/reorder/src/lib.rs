//! Band-constrained optimal reordering of a model sequence against a
//! reference, and the threshold-conditioned cost of the result.
//!
//! Reordering pairs every reference position `i` with exactly one model
//! position `j`, with `|i - j| <= (w - 1) / 2` for an odd window width `w`,
//! minimising the total squared difference. The pairing is solved exactly
//! with the Hungarian method on a matrix whose out-of-band entries carry a
//! sentinel cost that no optimal solution can afford.
//!
//! The cost of a reordering is the absolute difference between the mean of
//! the whole reference and the mean of the reordered values that pass a
//! threshold.
//!
//! # Quick Start
//!
//! ```
//! use kairos_reorder::{ThresholdType, reorder, reordering_cost};
//!
//! let a = [10.0, 20.0, 30.0];
//! let b = [30.0, 10.0, 20.0];
//!
//! // A width-5 band spans every position of a length-3 series.
//! let r = reorder(&a, &b, 5).unwrap();
//! assert_eq!(r.values(), &[10.0, 20.0, 30.0]);
//!
//! let c = reordering_cost(&a, &b, 5, 15.0, ThresholdType::Lower).unwrap();
//! assert_eq!(c.cost(), 5.0);
//! ```

mod assignment;
mod cost;
mod error;
mod result;
mod threshold;
mod window;

pub use assignment::{Assignment, solve_assignment};
pub use cost::CostMatrix;
pub use error::ReorderError;
pub use result::{Reordering, ReorderingCost};
pub use threshold::{ThresholdSpec, ThresholdType, evaluate_cost, select_indices};
pub use window::Window;

use tracing::debug;

/// Reorders `model` to best match `reference` within a band of width
/// `window`.
///
/// The output is a permutation of `model`: every value appears exactly once.
/// With `window == 1` the model is returned unchanged. Deterministic for
/// identical inputs.
///
/// # Errors
///
/// Returns [`ReorderError::InvalidWindow`] for a zero or even width,
/// [`ReorderError::LengthMismatch`] if the sequences differ in length, and
/// [`ReorderError::NonFiniteValue`] if either holds `NaN` or infinity.
#[tracing::instrument(skip(reference, model), fields(n = reference.len()))]
pub fn reorder(reference: &[f64], model: &[f64], window: usize) -> Result<Reordering, ReorderError> {
    let window = Window::new(window)?;
    if reference.len() != model.len() {
        return Err(ReorderError::LengthMismatch {
            reference_len: reference.len(),
            model_len: model.len(),
        });
    }
    require_finite(reference, "reference")?;
    require_finite(model, "model")?;

    let mut cost = CostMatrix::squared_differences(reference, model)?;
    let sentinel = cost.apply_band(window)?;
    let assignment = solve_assignment(&cost);
    let permutation = assignment.into_permutation();

    let values: Vec<f64> = permutation.iter().map(|&j| model[j]).collect();
    let matched_cost = reference
        .iter()
        .zip(&values)
        .map(|(a, b)| (a - b) * (a - b))
        .sum();
    debug!(sentinel, matched_cost, "reordering solved");

    Ok(Reordering::new(values, permutation, matched_cost))
}

/// Reorders `model` against `reference` and evaluates the threshold cost of
/// the result.
///
/// # Errors
///
/// Any error from [`reorder`] or [`evaluate_cost`].
#[tracing::instrument(skip(reference, model), fields(n = reference.len()))]
pub fn reordering_cost(
    reference: &[f64],
    model: &[f64],
    window: usize,
    threshold: f64,
    threshold_type: ThresholdType,
) -> Result<ReorderingCost, ReorderError> {
    let reordering = reorder(reference, model, window)?;
    let (cost, n_selected) =
        threshold::selected_cost(reference, reordering.values(), threshold, threshold_type)?;
    debug!(cost, n_selected, "reordering cost evaluated");
    Ok(ReorderingCost::new(cost, n_selected, reordering))
}

fn require_finite(data: &[f64], series: &'static str) -> Result<(), ReorderError> {
    match data.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(ReorderError::NonFiniteValue { series, index }),
        None => Ok(()),
    }
}
