//! Gregorian calendar date.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::error::CalendarError;

/// Returns `true` if `year` is a Gregorian leap year.
pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

/// Number of days in `month` of `year`.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `month` is not in 1..=12 and
/// [`CalendarError::OutOfRange`] for a year chrono cannot represent.
pub fn days_in_month(year: i32, month: u8) -> Result<u8, CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidMonth { month });
    }
    let first = NaiveDate::from_ymd_opt(year, u32::from(month), 1)
        .ok_or(CalendarError::OutOfRange { year })?;
    Ok(Date(first).month_len())
}

/// A validated date in the proleptic Gregorian calendar.
///
/// Thin wrapper over [`chrono::NaiveDate`] exposing the `(year, month, day)`
/// view and the month-level arithmetic the dekad calendar needs. Ordering
/// is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new `Date` from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError`] if the month is not in 1..=12 or the day
    /// does not exist in that month of that year.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, CalendarError> {
        let max_day = days_in_month(year, month)?;
        NaiveDate::from_ymd_opt(year, u32::from(month), u32::from(day))
            .map(Self)
            .ok_or(CalendarError::InvalidDay {
                day,
                month,
                max_day,
            })
    }

    /// The underlying chrono date.
    pub fn naive(self) -> NaiveDate {
        self.0
    }

    /// Returns the year.
    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// Returns the month (1..=12).
    pub fn month(self) -> u8 {
        // chrono months are 1..=12
        self.0.month() as u8
    }

    /// Returns the day within the month (1..=31).
    pub fn day(self) -> u8 {
        self.0.day() as u8
    }

    /// Number of days in this date's month.
    pub fn month_len(self) -> u8 {
        let first = self.first_of_month();
        first.add_months(1).prev().day()
    }

    /// Returns the following day.
    pub fn next(self) -> Self {
        self.add_days(1)
    }

    /// Returns the preceding day.
    pub fn prev(self) -> Self {
        self.add_days(-1)
    }

    /// Adds `n` days (negative values move backwards).
    ///
    /// # Panics
    ///
    /// Panics if the result leaves chrono's supported range.
    pub fn add_days(self, n: i64) -> Self {
        let days = Days::new(n.unsigned_abs());
        if n >= 0 {
            Self(self.0 + days)
        } else {
            Self(self.0 - days)
        }
    }

    /// Adds `n` calendar months, clamping the day to the target month's length.
    ///
    /// `2020-03-31` plus `-1` months is `2020-02-29`.
    ///
    /// # Panics
    ///
    /// Panics if the result leaves chrono's supported range.
    pub fn add_months(self, n: i32) -> Self {
        let months = Months::new(n.unsigned_abs());
        if n >= 0 {
            Self(self.0 + months)
        } else {
            Self(self.0 - months)
        }
    }

    /// First day of this date's month.
    pub fn first_of_month(self) -> Self {
        self.add_days(1 - i64::from(self.day()))
    }

    /// Last day of this date's month.
    pub fn last_of_month(self) -> Self {
        self.first_of_month().add_months(1).prev()
    }

    /// Returns this date with the day replaced.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDay`] if `day` does not exist in the month.
    pub fn with_day(self, day: u8) -> Result<Self, CalendarError> {
        Self::new(self.year(), self.month(), day)
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Default for Date {
    /// 1970-01-01.
    fn default() -> Self {
        Self(NaiveDate::default())
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for Date {
    type Err = CalendarError;

    /// Parses `YYYYMMDD` or `YYYY-MM-DD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let format = match trimmed.len() {
            8 => "%Y%m%d",
            10 => "%Y-%m-%d",
            _ => "",
        };
        if format.is_empty() || !trimmed.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(CalendarError::Parse {
                input: s.to_string(),
            });
        }
        NaiveDate::parse_from_str(trimmed, format)
            .map(Self)
            .map_err(|_| CalendarError::Parse {
                input: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u8, d: u8) -> Date {
        Date::new(y, m, d).unwrap()
    }

    #[test]
    fn new_valid() {
        let d = date(2020, 2, 29);
        assert_eq!(d.year(), 2020);
        assert_eq!(d.month(), 2);
        assert_eq!(d.day(), 29);
    }

    #[test]
    fn new_invalid_month() {
        assert_eq!(
            Date::new(2020, 0, 1).unwrap_err(),
            CalendarError::InvalidMonth { month: 0 }
        );
    }

    #[test]
    fn new_invalid_day_non_leap() {
        assert_eq!(
            Date::new(2021, 2, 29).unwrap_err(),
            CalendarError::InvalidDay {
                day: 29,
                month: 2,
                max_day: 28,
            }
        );
    }

    #[test]
    fn new_rejects_day_zero() {
        assert!(Date::new(2021, 5, 0).is_err());
    }

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2020, 2).unwrap(), 29);
        assert_eq!(days_in_month(2021, 2).unwrap(), 28);
        assert_eq!(days_in_month(2021, 4).unwrap(), 30);
        assert_eq!(days_in_month(2021, 12).unwrap(), 31);
        assert!(days_in_month(2021, 13).is_err());
    }

    #[test]
    fn wraps_naive_date() {
        let naive = NaiveDate::from_ymd_opt(2020, 4, 11).unwrap();
        assert_eq!(Date::from(naive), date(2020, 4, 11));
        assert_eq!(date(2020, 4, 11).naive(), naive);
        assert_eq!(Date::default(), date(1970, 1, 1));
    }

    #[test]
    fn next_and_prev_cross_boundaries() {
        assert_eq!(date(2020, 2, 28).next(), date(2020, 2, 29));
        assert_eq!(date(2020, 2, 29).next(), date(2020, 3, 1));
        assert_eq!(date(2020, 12, 31).next(), date(2021, 1, 1));
        assert_eq!(date(2021, 3, 1).prev(), date(2021, 2, 28));
        assert_eq!(date(2021, 1, 1).prev(), date(2020, 12, 31));
    }

    #[test]
    fn add_days_both_directions() {
        assert_eq!(date(2020, 1, 1).add_days(59), date(2020, 2, 29));
        assert_eq!(date(2020, 1, 1).add_days(-1), date(2019, 12, 31));
        assert_eq!(date(2020, 5, 17).add_days(0), date(2020, 5, 17));
    }

    #[test]
    fn add_months_clamps_day() {
        assert_eq!(date(2020, 3, 31).add_months(-1), date(2020, 2, 29));
        assert_eq!(date(2020, 1, 15).add_months(-1), date(2019, 12, 15));
        assert_eq!(date(2020, 11, 30).add_months(3), date(2021, 2, 28));
        assert_eq!(date(2020, 5, 1).add_months(0), date(2020, 5, 1));
    }

    #[test]
    fn month_helpers() {
        let d = date(2023, 2, 14);
        assert_eq!(d.first_of_month(), date(2023, 2, 1));
        assert_eq!(d.last_of_month(), date(2023, 2, 28));
        assert_eq!(d.month_len(), 28);
        assert_eq!(d.with_day(21).unwrap(), date(2023, 2, 21));
        assert!(d.with_day(30).is_err());
    }

    #[test]
    fn ordering_is_chronological() {
        assert!(date(2019, 12, 31) < date(2020, 1, 1));
        assert!(date(2020, 1, 31) < date(2020, 2, 1));
        assert!(date(2020, 2, 1) < date(2020, 2, 2));
    }

    #[test]
    fn parse_compact_and_iso() {
        assert_eq!("20200105".parse::<Date>().unwrap(), date(2020, 1, 5));
        assert_eq!("2020-02-25".parse::<Date>().unwrap(), date(2020, 2, 25));
        assert_eq!(" 2020-02-25 ".parse::<Date>().unwrap(), date(2020, 2, 25));
    }

    #[test]
    fn parse_rejects_garbage() {
        for input in ["2020/01/05", "202001", "2020-1x-05", "20200231", "+2020-1-5"] {
            assert!(
                matches!(input.parse::<Date>(), Err(CalendarError::Parse { .. })),
                "{input} should not parse"
            );
        }
    }

    #[test]
    fn display_is_iso() {
        assert_eq!(date(985, 7, 4).to_string(), "0985-07-04");
        assert_eq!(date(2020, 12, 21).to_string(), "2020-12-21");
    }
}
