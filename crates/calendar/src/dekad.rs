//! Dekad (10-day period) assignment and ordinal arithmetic.
//!
//! Every month holds three dekads starting on days 1, 11 and 21. The last
//! dekad absorbs the remainder of the month and is 8 to 11 days long.

use crate::date::Date;

/// Number of dekads in a calendar year.
pub const DEKADS_PER_YEAR: i64 = 36;

/// Start day of the dekad containing `day`.
///
/// Total over `u8`: 1 for days below 11, 11 for days below 21, else 21.
pub fn dekad_of(day: u8) -> u8 {
    if day < 11 {
        1
    } else if day < 21 {
        11
    } else {
        21
    }
}

/// Maps a date onto the start of its dekad.
pub fn assign(date: Date) -> Date {
    let day = date.day();
    date.add_days(i64::from(dekad_of(day)) - i64::from(day))
}

/// Returns `true` if `date` falls on day 1, 11 or 21.
pub fn is_dekad_start(date: Date) -> bool {
    matches!(date.day(), 1 | 11 | 21)
}

/// Position of the dekad containing `date` on a continuous dekad axis.
///
/// Consecutive dekads differ by exactly one, across month and year ends.
pub fn dekad_index(date: Date) -> i64 {
    let slot = match dekad_of(date.day()) {
        1 => 0,
        11 => 1,
        _ => 2,
    };
    i64::from(date.year()) * DEKADS_PER_YEAR + (i64::from(date.month()) - 1) * 3 + slot
}

/// Start date of the dekad at position `index` (inverse of [`dekad_index`]).
///
/// # Panics
///
/// Panics if the date leaves chrono's supported range.
pub fn from_dekad_index(index: i64) -> Date {
    let epoch = Date::default();
    let offset = index - dekad_index(epoch);
    let month_start = epoch.add_months(offset.div_euclid(3) as i32);
    month_start.add_days(offset.rem_euclid(3) * 10)
}

/// Dekad start `n` dekads after the dekad containing `date` (before, if negative).
pub fn shift_dekads(date: Date, n: i64) -> Date {
    from_dekad_index(dekad_index(date) + n)
}
