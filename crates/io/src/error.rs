//! Error types for cdi-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the cdi-io crate.
///
/// Covers filesystem failures, malformed JSON, calendar conversion issues
/// and data-model mismatches met when reading inputs or writing results.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps a filesystem failure.
    #[error("i/o error on {}: {reason}", path.display())]
    Fs {
        /// Path being read or written.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Wraps an error from `serde_json`.
    #[error("json error in {}: {reason}", path.display())]
    Json {
        /// File being decoded or encoded.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Wraps an error originating from the cdi-calendar crate.
    #[error("calendar error: {reason}")]
    Calendar {
        /// Description of the underlying calendar failure.
        reason: String,
    },

    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Returned when a dimension has an unexpected size.
    #[error("dimension '{name}' mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Name of the dimension.
        name: String,
        /// Expected size.
        expected: usize,
        /// Actual size.
        got: usize,
    },
}

impl From<cdi_calendar::CalendarError> for IoError {
    fn from(e: cdi_calendar::CalendarError) -> Self {
        IoError::Calendar {
            reason: e.to_string(),
        }
    }
}
