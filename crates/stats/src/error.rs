//! Error types for the cdi-stats crate.

/// Error type for all fallible operations in the cdi-stats crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StatsError {
    /// Returned when a baseline has no finite samples.
    #[error("baseline sample is empty")]
    EmptySample,

    /// Returned when a baseline has zero spread, so standardisation is undefined.
    #[error("baseline has zero variance (mean {mean}, n = {n})")]
    ZeroVariance {
        /// Mean of the degenerate sample.
        mean: f64,
        /// Number of samples.
        n: usize,
    },

    /// Returned when calibration years are reversed or the scale is zero.
    #[error("invalid SPI parameters: {reason}")]
    InvalidParameters {
        /// Human-readable description of the problem.
        reason: String,
    },

    /// Returned when statrs rejects distribution parameters.
    #[error("failed to construct {distribution} distribution: {message}")]
    Distribution {
        /// Name of the distribution.
        distribution: &'static str,
        /// Error message from statrs.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_empty_sample() {
        assert_eq!(StatsError::EmptySample.to_string(), "baseline sample is empty");
    }

    #[test]
    fn error_zero_variance() {
        let err = StatsError::ZeroVariance { mean: 0.5, n: 12 };
        assert_eq!(
            err.to_string(),
            "baseline has zero variance (mean 0.5, n = 12)"
        );
    }

    #[test]
    fn error_invalid_parameters() {
        let err = StatsError::InvalidParameters {
            reason: "scale must be at least 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid SPI parameters: scale must be at least 1"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<StatsError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<StatsError>();
    }
}
