//! Error types for the kairos-reorder crate.

use crate::threshold::ThresholdType;

/// Error type for all fallible operations in the kairos-reorder crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReorderError {
    /// Returned when the window width is not a positive odd integer.
    #[error("invalid window: {window} (must be a positive odd integer)")]
    InvalidWindow {
        /// The rejected width.
        window: usize,
    },

    /// Returned when the compared sequences differ in length.
    #[error("length mismatch: reference has {reference_len} values, model has {model_len}")]
    LengthMismatch {
        /// Length of the reference sequence.
        reference_len: usize,
        /// Length of the model sequence.
        model_len: usize,
    },

    /// Returned when an input to the assignment contains NaN or infinity.
    #[error("non-finite value in {series} at index {index}")]
    NonFiniteValue {
        /// Which input held the value.
        series: &'static str,
        /// Position of the value.
        index: usize,
    },

    /// Returned when squared differences overflow to infinity.
    #[error("cost matrix overflow: squared differences are not finite")]
    CostOverflow,

    /// Returned when a threshold type name is not recognised.
    #[error("unknown threshold type: {value:?} (expected none, lower or upper)")]
    UnknownThresholdType {
        /// The rejected input.
        value: String,
    },

    /// Returned when a threshold specification cannot be resolved.
    #[error("invalid threshold: {reason}")]
    InvalidThreshold {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a required sequence holds no finite value.
    #[error("insufficient data: {series} contains no valid values")]
    InsufficientData {
        /// Which input was empty or entirely missing.
        series: &'static str,
    },

    /// Returned when the threshold selection keeps no valid value.
    #[error("empty selection: no values kept by threshold {threshold} ({threshold_type})")]
    EmptySelection {
        /// The threshold that was applied.
        threshold: f64,
        /// The selection mode that was applied.
        threshold_type: ThresholdType,
    },
}
