//! Error types for the cdi-timeseries crate.

use cdi_calendar::Date;

use crate::frequency::Frequency;

/// Error type for all fallible operations in the cdi-timeseries crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimeSeriesError {
    /// Returned when the time axis and the values differ in length.
    #[error("length mismatch: {times} timestamps but {values} values")]
    LengthMismatch {
        /// Number of timestamps.
        times: usize,
        /// Number of values.
        values: usize,
    },

    /// Returned when timestamps are not strictly increasing.
    #[error("time axis is not strictly increasing: {previous} followed by {next}")]
    Unordered {
        /// Timestamp preceding the violation.
        previous: Date,
        /// Timestamp that is not after `previous`.
        next: Date,
    },

    /// Returned when records at a coarse frequency are asked to become finer.
    #[error("cannot aggregate {from} records to {to}")]
    Upsample {
        /// Frequency of the input records.
        from: Frequency,
        /// Requested target frequency.
        to: Frequency,
    },

    /// Returned when a frequency name is not recognised.
    #[error("unknown frequency: {name:?} (expected hourly, daily, dekadal or monthly)")]
    UnknownFrequency {
        /// The rejected name.
        name: String,
    },
}
