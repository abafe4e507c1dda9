//! Threshold selection and the threshold-conditioned cost.

use std::fmt;
use std::str::FromStr;

use kairos_stats::{nan_mean, nan_quantile};

use crate::error::ReorderError;

/// Which values a threshold keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThresholdType {
    /// Keep every position; the threshold value is ignored.
    #[default]
    None,
    /// Keep values `>= threshold`.
    Lower,
    /// Keep values `< threshold`.
    Upper,
}

impl ThresholdType {
    /// Canonical lower-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Lower => "lower",
            Self::Upper => "upper",
        }
    }

    /// Returns `true` if `value` passes the threshold. `NaN` passes only
    /// [`ThresholdType::None`].
    #[inline]
    pub fn keeps(self, value: f64, threshold: f64) -> bool {
        match self {
            Self::None => true,
            Self::Lower => value >= threshold,
            Self::Upper => value < threshold,
        }
    }
}

impl fmt::Display for ThresholdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThresholdType {
    type Err = ReorderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "lower" => Ok(Self::Lower),
            "upper" => Ok(Self::Upper),
            _ => Err(ReorderError::UnknownThresholdType {
                value: s.to_string(),
            }),
        }
    }
}

/// How a threshold value is obtained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThresholdSpec {
    /// An absolute value in the series' units.
    Fixed(f64),
    /// A quantile `p` in `[0, 1]` of the reference values.
    Quantile(f64),
}

impl ThresholdSpec {
    /// Resolves the threshold against `reference`, skipping missing values.
    ///
    /// # Errors
    ///
    /// Returns [`ReorderError::InvalidThreshold`] for a non-finite fixed value
    /// or a quantile outside `[0, 1]`, and [`ReorderError::InsufficientData`]
    /// when a quantile is requested of a reference with no valid value.
    pub fn resolve(&self, reference: &[f64]) -> Result<f64, ReorderError> {
        match *self {
            Self::Fixed(value) => {
                if !value.is_finite() {
                    return Err(ReorderError::InvalidThreshold {
                        reason: format!("fixed threshold must be finite, got {value}"),
                    });
                }
                Ok(value)
            }
            Self::Quantile(p) => {
                if !(0.0..=1.0).contains(&p) {
                    return Err(ReorderError::InvalidThreshold {
                        reason: format!("quantile must be in [0, 1], got {p}"),
                    });
                }
                nan_quantile(reference, p)
                    .ok_or(ReorderError::InsufficientData { series: "reference" })
            }
        }
    }

    /// Short label used to key reports, e.g. `fixed-30` or `quantile-0.9`.
    pub fn label(&self) -> String {
        match self {
            Self::Fixed(v) => format!("fixed-{v}"),
            Self::Quantile(p) => format!("quantile-{p}"),
        }
    }
}

/// Returns the ascending indices of `values` kept by the threshold.
pub fn select_indices(values: &[f64], threshold: f64, threshold_type: ThresholdType) -> Vec<usize> {
    values
        .iter()
        .enumerate()
        .filter(|&(_, &v)| threshold_type.keeps(v, threshold))
        .map(|(i, _)| i)
        .collect()
}

/// Absolute difference between the mean of all of `reference` and the mean
/// of the `reordered` values kept by the threshold.
///
/// Selection is applied to `reordered` only; the reference mean is always
/// taken over the whole sequence. Missing values are skipped in both means.
///
/// # Errors
///
/// Returns [`ReorderError::LengthMismatch`] if the sequences differ in length,
/// [`ReorderError::InsufficientData`] if `reference` has no valid value, and
/// [`ReorderError::EmptySelection`] if the threshold keeps no valid value.
pub fn evaluate_cost(
    reference: &[f64],
    reordered: &[f64],
    threshold: f64,
    threshold_type: ThresholdType,
) -> Result<f64, ReorderError> {
    selected_cost(reference, reordered, threshold, threshold_type).map(|(cost, _)| cost)
}

/// [`evaluate_cost`] that also reports how many positions were selected.
pub(crate) fn selected_cost(
    reference: &[f64],
    reordered: &[f64],
    threshold: f64,
    threshold_type: ThresholdType,
) -> Result<(f64, usize), ReorderError> {
    if reference.len() != reordered.len() {
        return Err(ReorderError::LengthMismatch {
            reference_len: reference.len(),
            model_len: reordered.len(),
        });
    }
    let reference_mean =
        nan_mean(reference).ok_or(ReorderError::InsufficientData { series: "reference" })?;

    let selected: Vec<f64> = select_indices(reordered, threshold, threshold_type)
        .into_iter()
        .map(|i| reordered[i])
        .collect();
    let selected_mean = nan_mean(&selected).ok_or(ReorderError::EmptySelection {
        threshold,
        threshold_type,
    })?;

    Ok(((reference_mean - selected_mean).abs(), selected.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn parse_threshold_type() {
        assert_eq!("none".parse::<ThresholdType>().unwrap(), ThresholdType::None);
        assert_eq!(" Lower ".parse::<ThresholdType>().unwrap(), ThresholdType::Lower);
        assert_eq!("UPPER".parse::<ThresholdType>().unwrap(), ThresholdType::Upper);
    }

    #[test]
    fn parse_unknown_threshold_type() {
        assert_eq!(
            "between".parse::<ThresholdType>(),
            Err(ReorderError::UnknownThresholdType {
                value: "between".to_string()
            })
        );
    }

    #[test]
    fn keeps_boundaries() {
        assert!(ThresholdType::Lower.keeps(15.0, 15.0));
        assert!(!ThresholdType::Upper.keeps(15.0, 15.0));
        assert!(ThresholdType::Upper.keeps(14.9, 15.0));
        assert!(!ThresholdType::Lower.keeps(14.9, 15.0));
    }

    #[test]
    fn keeps_nan_only_for_none() {
        assert!(ThresholdType::None.keeps(f64::NAN, 0.0));
        assert!(!ThresholdType::Lower.keeps(f64::NAN, 0.0));
        assert!(!ThresholdType::Upper.keeps(f64::NAN, 0.0));
        assert!(!ThresholdType::Lower.keeps(f64::NAN, f64::NEG_INFINITY));
        assert!(!ThresholdType::Upper.keeps(f64::NAN, f64::INFINITY));
    }

    #[test]
    fn display_roundtrips() {
        for t in [ThresholdType::None, ThresholdType::Lower, ThresholdType::Upper] {
            assert_eq!(t.to_string().parse::<ThresholdType>().unwrap(), t);
        }
    }

    #[test]
    fn select_none_keeps_everything() {
        let v = [1.0, f64::NAN, 3.0];
        assert_eq!(select_indices(&v, 100.0, ThresholdType::None), vec![0, 1, 2]);
    }

    #[test]
    fn select_lower_is_inclusive() {
        let v = [10.0, 15.0, 20.0, 30.0];
        assert_eq!(select_indices(&v, 15.0, ThresholdType::Lower), vec![1, 2, 3]);
    }

    #[test]
    fn select_upper_is_exclusive() {
        let v = [10.0, 15.0, 20.0, 30.0];
        assert_eq!(select_indices(&v, 15.0, ThresholdType::Upper), vec![0]);
    }

    #[test]
    fn select_skips_nan_for_lower_and_upper() {
        let v = [f64::NAN, 20.0];
        assert_eq!(select_indices(&v, 0.0, ThresholdType::Lower), vec![1]);
        assert_eq!(select_indices(&v, 100.0, ThresholdType::Upper), vec![1]);
    }

    #[test]
    fn cost_lower_threshold() {
        // mean(A) = 20, selected [20, 30] has mean 25.
        let cost =
            evaluate_cost(&[10.0, 20.0, 30.0], &[10.0, 20.0, 30.0], 15.0, ThresholdType::Lower)
                .unwrap();
        assert_relative_eq!(cost, 5.0);
    }

    #[test]
    fn cost_none_is_mean_difference() {
        let cost =
            evaluate_cost(&[10.0, 20.0, 30.0], &[12.0, 22.0, 32.0], 0.0, ThresholdType::None)
                .unwrap();
        assert_relative_eq!(cost, 2.0);
    }

    #[test]
    fn cost_ignores_missing_values() {
        let cost = evaluate_cost(
            &[10.0, f64::NAN, 30.0],
            &[20.0, f64::NAN, 20.0],
            0.0,
            ThresholdType::None,
        )
        .unwrap();
        assert_relative_eq!(cost, 0.0);
    }

    #[test]
    fn cost_empty_selection() {
        assert_eq!(
            evaluate_cost(&[1.0, 2.0], &[1.0, 2.0], 40.0, ThresholdType::Lower),
            Err(ReorderError::EmptySelection {
                threshold: 40.0,
                threshold_type: ThresholdType::Lower,
            })
        );
    }

    #[test]
    fn cost_reference_all_missing() {
        assert_eq!(
            evaluate_cost(&[f64::NAN], &[1.0], 0.0, ThresholdType::None),
            Err(ReorderError::InsufficientData { series: "reference" })
        );
    }

    #[test]
    fn cost_length_mismatch() {
        assert!(matches!(
            evaluate_cost(&[1.0, 2.0], &[1.0], 0.0, ThresholdType::None),
            Err(ReorderError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn resolve_fixed() {
        assert_eq!(ThresholdSpec::Fixed(30.0).resolve(&[]).unwrap(), 30.0);
        assert!(matches!(
            ThresholdSpec::Fixed(f64::NAN).resolve(&[1.0]),
            Err(ReorderError::InvalidThreshold { .. })
        ));
    }

    #[test]
    fn resolve_quantile() {
        let reference = [1.0, 2.0, f64::NAN, 3.0, 4.0, 5.0];
        assert_relative_eq!(ThresholdSpec::Quantile(0.5).resolve(&reference).unwrap(), 3.0);
        assert_relative_eq!(ThresholdSpec::Quantile(1.0).resolve(&reference).unwrap(), 5.0);
    }

    #[test]
    fn resolve_quantile_out_of_range() {
        assert!(matches!(
            ThresholdSpec::Quantile(1.5).resolve(&[1.0]),
            Err(ReorderError::InvalidThreshold { .. })
        ));
    }

    #[test]
    fn resolve_quantile_without_data() {
        assert_eq!(
            ThresholdSpec::Quantile(0.9).resolve(&[f64::NAN]),
            Err(ReorderError::InsufficientData { series: "reference" })
        );
    }

    #[test]
    fn labels() {
        assert_eq!(ThresholdSpec::Fixed(30.0).label(), "fixed-30");
        assert_eq!(ThresholdSpec::Quantile(0.9).label(), "quantile-0.9");
    }
}
