//! Error types for the cdi-calendar crate.

use crate::date::Date;

/// Error type for all fallible operations in the cdi-calendar crate.
///
/// Covers validation of Gregorian dates, textual date parsing, date
/// ranges, and the ordering invariants of a [`DekadGrid`](crate::DekadGrid).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a month number is outside the valid range 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month number that was provided.
        month: u8,
    },

    /// Returned when a day number exceeds the number of days in the given month.
    #[error("invalid day: {day} for month {month} (max {max_day})")]
    InvalidDay {
        /// The invalid day number that was provided.
        day: u8,
        /// The month for which the day is invalid.
        month: u8,
        /// The maximum valid day for the given month and year.
        max_day: u8,
    },

    /// Returned when a year lies outside the supported calendar range.
    #[error("year {year} is outside the supported calendar range")]
    OutOfRange {
        /// The unsupported year.
        year: i32,
    },

    /// Returned when a range is requested with its start after its end.
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange {
        /// Requested first date.
        start: Date,
        /// Requested last date.
        end: Date,
    },

    /// Returned when a string is not a `YYYYMMDD` or `YYYY-MM-DD` date.
    #[error("cannot parse date: {input:?} (expected YYYYMMDD or YYYY-MM-DD)")]
    Parse {
        /// The rejected input.
        input: String,
    },

    /// Returned when a dekad grid entry does not fall on day 1, 11 or 21.
    #[error("{date} is not a dekad start (day must be 1, 11 or 21)")]
    NotDekadStart {
        /// The offending entry.
        date: Date,
    },

    /// Returned when dekad grid entries are not strictly increasing.
    #[error("dekad grid is not strictly increasing: {previous} followed by {next}")]
    Unordered {
        /// Entry preceding the violation.
        previous: Date,
        /// Entry that is not after `previous`.
        next: Date,
    },
}
