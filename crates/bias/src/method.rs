//! Correction method selection.

use std::fmt;
use std::str::FromStr;

use crate::error::BiasError;

/// The cataloged bias-correction transfer functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CorrectionMethod {
    /// Identity: the model future is passed through unchanged.
    #[default]
    None,
    /// Additive mean shift calibrated on the past window.
    Delta,
    /// Multiplicative mean ratio calibrated on the past window.
    RelativeDelta,
}

impl CorrectionMethod {
    /// Canonical lowercase name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            CorrectionMethod::None => "none",
            CorrectionMethod::Delta => "delta",
            CorrectionMethod::RelativeDelta => "relative_delta",
        }
    }
}

impl fmt::Display for CorrectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CorrectionMethod {
    type Err = BiasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(CorrectionMethod::None),
            "delta" => Ok(CorrectionMethod::Delta),
            "relative_delta" => Ok(CorrectionMethod::RelativeDelta),
            _ => Err(BiasError::UnknownCorrectionMethod {
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known() {
        assert_eq!("none".parse(), Ok(CorrectionMethod::None));
        assert_eq!("Delta".parse(), Ok(CorrectionMethod::Delta));
        assert_eq!(
            " relative_delta ".parse(),
            Ok(CorrectionMethod::RelativeDelta)
        );
    }

    #[test]
    fn parse_unknown() {
        assert_eq!(
            "quantile_mapping".parse::<CorrectionMethod>(),
            Err(BiasError::UnknownCorrectionMethod {
                value: "quantile_mapping".to_string(),
            })
        );
    }

    #[test]
    fn display_round_trips() {
        for m in [
            CorrectionMethod::None,
            CorrectionMethod::Delta,
            CorrectionMethod::RelativeDelta,
        ] {
            assert_eq!(m.to_string().parse::<CorrectionMethod>(), Ok(m));
        }
    }

    #[test]
    fn default_is_identity() {
        assert_eq!(CorrectionMethod::default(), CorrectionMethod::None);
    }
}
