//! Error types for the cdi-compose crate.

use std::fmt;

use cdi_components::{ComponentError, ComponentKind};

/// Lifecycle step of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Download,
    Process,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Download => "download",
            Self::Process => "process",
        })
    }
}

/// Error type for all fallible operations in the cdi-compose crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CdiError {
    /// Returned when the request is configured inconsistently.
    #[error("configuration error: {reason}")]
    Configuration {
        /// Human-readable description of the problem.
        reason: String,
    },

    /// Returned when a component fails; aborts the whole request.
    #[error("{component} component failed during {stage}")]
    Component {
        /// Failing component.
        component: ComponentKind,
        /// Step that failed.
        stage: Stage,
        /// Underlying failure.
        #[source]
        source: ComponentError,
    },

    /// Returned when component series cannot be placed on the shared grid.
    #[error("alignment failed: {reason}")]
    Alignment {
        /// Human-readable description of the problem.
        reason: String,
    },
}

impl CdiError {
    pub(crate) fn alignment(reason: impl ToString) -> Self {
        Self::Alignment {
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn error_component_names_stage() {
        let err = CdiError::Component {
            component: ComponentKind::Sma,
            stage: Stage::Download,
            source: ComponentError::Configuration {
                reason: "x".to_string(),
            },
        };
        assert_eq!(err.to_string(), "sma component failed during download");
        assert!(err.source().is_some());
    }

    #[test]
    fn error_alignment() {
        assert_eq!(
            CdiError::alignment("grid is empty").to_string(),
            "alignment failed: grid is empty"
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<CdiError>();
    }
}
