//! Result type for bias correction.

use kairos_series::DailySeries;

use crate::method::CorrectionMethod;

/// The calibrated adjustment that was applied to the model future.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Adjustment {
    /// No adjustment.
    Identity,
    /// Additive offset added to every model value.
    Shift(f64),
    /// Multiplicative factor applied to every model value.
    Scale(f64),
}

/// The output of [`apply_correction`](crate::apply_correction).
///
/// Holds the corrected model future together with the reference future it
/// is to be compared against. Both are new series; the inputs are untouched.
#[derive(Debug, Clone)]
pub struct CorrectionResult {
    method: CorrectionMethod,
    corrected: DailySeries,
    reference: DailySeries,
    adjustment: Adjustment,
}

impl CorrectionResult {
    pub(crate) fn new(
        method: CorrectionMethod,
        corrected: DailySeries,
        reference: DailySeries,
        adjustment: Adjustment,
    ) -> Self {
        Self {
            method,
            corrected,
            reference,
            adjustment,
        }
    }

    /// The method that produced this result.
    pub fn method(&self) -> CorrectionMethod {
        self.method
    }

    /// Corrected model future, on the model's future dates.
    pub fn corrected(&self) -> &DailySeries {
        &self.corrected
    }

    /// Reference future, sliced unchanged.
    pub fn reference(&self) -> &DailySeries {
        &self.reference
    }

    /// The adjustment calibrated on the past window.
    pub fn adjustment(&self) -> Adjustment {
        self.adjustment
    }
}
