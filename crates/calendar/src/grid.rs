//! Canonical dekad time axis.

use crate::date::Date;
use crate::dekad::is_dekad_start;
use crate::error::CalendarError;

/// An ordered, duplicate-free sequence of dekad start dates.
///
/// Every entry falls on day 1, 11 or 21 and entries are strictly
/// increasing. Gaps are allowed (a cropped or filtered grid is still a
/// grid), but [`generate`](crate::generate) always produces a contiguous one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DekadGrid {
    dates: Vec<Date>,
}

impl DekadGrid {
    /// Validates and wraps a sequence of dekad starts.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::NotDekadStart`] for an entry not on day 1, 11
    /// or 21, and [`CalendarError::Unordered`] if entries are not strictly
    /// increasing.
    pub fn new(dates: Vec<Date>) -> Result<Self, CalendarError> {
        for (i, &date) in dates.iter().enumerate() {
            if !is_dekad_start(date) {
                return Err(CalendarError::NotDekadStart { date });
            }
            if i > 0 && dates[i - 1] >= date {
                return Err(CalendarError::Unordered {
                    previous: dates[i - 1],
                    next: date,
                });
            }
        }
        Ok(Self { dates })
    }

    pub(crate) fn from_sorted(dates: Vec<Date>) -> Self {
        Self { dates }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns `true` if the grid has no entries.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn first(&self) -> Option<Date> {
        self.dates.first().copied()
    }

    pub fn last(&self) -> Option<Date> {
        self.dates.last().copied()
    }

    pub fn as_slice(&self) -> &[Date] {
        &self.dates
    }

    pub fn iter(&self) -> impl Iterator<Item = Date> + '_ {
        self.dates.iter().copied()
    }

    /// Index of `date` in the grid, if present.
    pub fn position(&self, date: Date) -> Option<usize> {
        self.dates.binary_search(&date).ok()
    }

    pub fn contains(&self, date: Date) -> bool {
        self.position(date).is_some()
    }

    /// Entries within `[start, end]` inclusive.
    pub fn crop(&self, start: Date, end: Date) -> Self {
        let lo = self.dates.partition_point(|&d| d < start);
        let hi = self.dates.partition_point(|&d| d <= end);
        Self {
            dates: self.dates[lo..hi.max(lo)].to_vec(),
        }
    }

    pub fn into_vec(self) -> Vec<Date> {
        self.dates
    }
}

impl<'a> IntoIterator for &'a DekadGrid {
    type Item = &'a Date;
    type IntoIter = std::slice::Iter<'a, Date>;

    fn into_iter(self) -> Self::IntoIter {
        self.dates.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u8, d: u8) -> Date {
        Date::new(y, m, d).unwrap()
    }

    #[test]
    fn new_accepts_gapped_grid() {
        let grid = DekadGrid::new(vec![date(2020, 1, 1), date(2020, 2, 21)]).unwrap();
        assert_eq!(grid.len(), 2);
    }

    #[test]
    fn new_rejects_non_dekad_day() {
        let err = DekadGrid::new(vec![date(2020, 1, 1), date(2020, 1, 12)]).unwrap_err();
        assert_eq!(
            err,
            CalendarError::NotDekadStart {
                date: date(2020, 1, 12)
            }
        );
    }

    #[test]
    fn new_rejects_duplicates() {
        let err = DekadGrid::new(vec![date(2020, 1, 11), date(2020, 1, 11)]).unwrap_err();
        assert!(matches!(err, CalendarError::Unordered { .. }));
    }

    #[test]
    fn crop_is_inclusive() {
        let grid = DekadGrid::new(vec![
            date(2020, 1, 1),
            date(2020, 1, 11),
            date(2020, 1, 21),
            date(2020, 2, 1),
        ])
        .unwrap();
        let cropped = grid.crop(date(2020, 1, 11), date(2020, 1, 21));
        assert_eq!(cropped.as_slice(), &[date(2020, 1, 11), date(2020, 1, 21)]);
        assert!(grid.crop(date(2021, 1, 1), date(2020, 1, 1)).is_empty());
    }

    #[test]
    fn position_lookup() {
        let grid = DekadGrid::new(vec![date(2020, 1, 1), date(2020, 1, 11)]).unwrap();
        assert_eq!(grid.position(date(2020, 1, 11)), Some(1));
        assert_eq!(grid.position(date(2020, 1, 5)), None);
    }
}
