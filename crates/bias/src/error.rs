//! Error types for the kairos-bias crate.

use kairos_series::SeriesError;

/// Error type for all fallible operations in the kairos-bias crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BiasError {
    /// Returned when a correction method name is not recognised.
    #[error("unknown correction method: {value:?} (expected none, delta or relative_delta)")]
    UnknownCorrectionMethod {
        /// The rejected input.
        value: String,
    },

    /// Returned when a required slice holds no finite value.
    #[error("insufficient data: {series} contains no valid values")]
    InsufficientData {
        /// Which slice was empty or entirely missing.
        series: &'static str,
    },

    /// Returned when the relative correction would divide by a zero
    /// historical model mean.
    #[error("relative correction undefined: historical model mean is zero")]
    DegenerateVariance,

    /// Wraps a series construction failure.
    #[error(transparent)]
    Series(#[from] SeriesError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_unknown_method() {
        let e = BiasError::UnknownCorrectionMethod {
            value: "quantile".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "unknown correction method: \"quantile\" (expected none, delta or relative_delta)"
        );
    }

    #[test]
    fn error_insufficient_data() {
        let e = BiasError::InsufficientData {
            series: "model_past",
        };
        assert_eq!(
            e.to_string(),
            "insufficient data: model_past contains no valid values"
        );
    }

    #[test]
    fn error_degenerate_variance() {
        assert_eq!(
            BiasError::DegenerateVariance.to_string(),
            "relative correction undefined: historical model mean is zero"
        );
    }

    #[test]
    fn error_series_is_transparent() {
        let inner = SeriesError::LengthMismatch {
            dates_len: 2,
            values_len: 1,
        };
        let e = BiasError::from(inner.clone());
        assert_eq!(e.to_string(), inner.to_string());
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<BiasError>();
    }
}
