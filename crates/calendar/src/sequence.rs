//! Date sequence generation.

use crate::date::Date;
use crate::dekad::{assign, dekad_index, from_dekad_index};
use crate::error::CalendarError;
use crate::grid::DekadGrid;

/// Every day in `[start, end]` inclusive. Empty if `start > end`.
pub fn daily_sequence(start: Date, end: Date) -> Vec<Date> {
    let mut dates = Vec::new();
    let mut current = start;
    while current <= end {
        dates.push(current);
        current = current.next();
    }
    dates
}

/// First day of every month that starts within `[start, end]`.
///
/// A `start` that is not the first of its month contributes nothing for that
/// month, matching a month-start frequency date range.
pub fn monthly_sequence(start: Date, end: Date) -> Vec<Date> {
    let mut current = if start.day() == 1 {
        start
    } else {
        start.first_of_month().add_months(1)
    };
    let mut dates = Vec::new();
    while current <= end {
        dates.push(current);
        current = current.add_months(1);
    }
    dates
}

/// Canonical dekad grid covering `[start, end]`.
///
/// Contains the start of every dekad with at least one day in the range, so
/// the first entry precedes `start` when `start` is not itself a dekad start.
/// The result equals the daily range mapped through [`assign`] and
/// deduplicated.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidRange`] if `start > end`.
pub fn generate(start: Date, end: Date) -> Result<DekadGrid, CalendarError> {
    if start > end {
        return Err(CalendarError::InvalidRange { start, end });
    }
    let first = dekad_index(assign(start));
    let last = dekad_index(assign(end));
    let dates = (first..=last).map(from_dekad_index).collect();
    Ok(DekadGrid::from_sorted(dates))
}
