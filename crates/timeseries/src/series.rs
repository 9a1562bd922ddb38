//! Time-indexed series and the alignment operations on it.

use cdi_calendar::Date;

use crate::aggregate::{self, Aggregation};
use crate::error::TimeSeriesError;
use crate::frequency::Frequency;
use crate::reading::Reading;

/// Opt-in gap filling strategy for [`TimeSeries::forward_fill`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardFill {
    /// Carry the last value forward indefinitely.
    Unbounded,
    /// Carry the last value forward only within its calendar month.
    WithinMonth,
}

/// A series of readings on a strictly increasing date axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeSeries {
    times: Vec<Date>,
    values: Vec<Reading>,
}

impl TimeSeries {
    /// Creates a series, validating the axis.
    ///
    /// # Errors
    ///
    /// Returns [`TimeSeriesError::LengthMismatch`] if the lengths differ and
    /// [`TimeSeriesError::Unordered`] if `times` is not strictly increasing.
    pub fn new(times: Vec<Date>, values: Vec<Reading>) -> Result<Self, TimeSeriesError> {
        if times.len() != values.len() {
            return Err(TimeSeriesError::LengthMismatch {
                times: times.len(),
                values: values.len(),
            });
        }
        check_increasing(&times)?;
        Ok(Self { times, values })
    }

    /// Creates a series from raw numbers; non-finite entries become `Missing`.
    ///
    /// # Errors
    ///
    /// Same as [`TimeSeries::new`].
    pub fn from_f64(times: Vec<Date>, values: &[f64]) -> Result<Self, TimeSeriesError> {
        Self::new(times, values.iter().map(|&v| Reading::from_f64(v)).collect())
    }

    pub fn times(&self) -> &[Date] {
        &self.times
    }

    pub fn values(&self) -> &[Reading] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Reading at `date`, if the date is on the axis.
    pub fn get(&self, date: Date) -> Option<Reading> {
        self.times
            .binary_search(&date)
            .ok()
            .map(|i| self.values[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Date, Reading)> + '_ {
        self.times.iter().copied().zip(self.values.iter().copied())
    }

    /// Number of entries holding a value.
    pub fn count_values(&self) -> usize {
        self.values.iter().filter(|r| r.is_value()).count()
    }

    /// Exact-match left join onto `index`.
    ///
    /// Dates absent from this series become `Missing`; dates of this series
    /// absent from `index` are dropped. No interpolation or filling.
    ///
    /// # Errors
    ///
    /// Returns [`TimeSeriesError::Unordered`] if `index` is not strictly
    /// increasing.
    pub fn reindex(&self, index: &[Date]) -> Result<Self, TimeSeriesError> {
        check_increasing(index)?;
        let mut values = Vec::with_capacity(index.len());
        let mut j = 0;
        for &t in index {
            while j < self.times.len() && self.times[j] < t {
                j += 1;
            }
            if j < self.times.len() && self.times[j] == t {
                values.push(self.values[j]);
            } else {
                values.push(Reading::Missing);
            }
        }
        Ok(Self {
            times: index.to_vec(),
            values,
        })
    }

    /// Replaces `Missing` entries with the most recent preceding value.
    ///
    /// `Outside` is never overwritten and interrupts the carry.
    pub fn forward_fill(&self, mode: ForwardFill) -> Self {
        let mut values = self.values.clone();
        let mut carry: Option<(Date, f64)> = None;
        for (t, v) in self.times.iter().zip(values.iter_mut()) {
            match *v {
                Reading::Value(x) => carry = Some((*t, x)),
                Reading::Outside => carry = None,
                Reading::Missing => {
                    if let Some((from, x)) = carry {
                        let same_month = from.year() == t.year() && from.month() == t.month();
                        if mode == ForwardFill::Unbounded || same_month {
                            *v = Reading::Value(x);
                        }
                    }
                }
            }
        }
        Self {
            times: self.times.clone(),
            values,
        }
    }

    /// Entries with `start <= time <= end`.
    pub fn crop(&self, start: Date, end: Date) -> Self {
        let lo = self.times.partition_point(|&d| d < start);
        let hi = self.times.partition_point(|&d| d <= end).max(lo);
        Self {
            times: self.times[lo..hi].to_vec(),
            values: self.values[lo..hi].to_vec(),
        }
    }

    /// Positional lag: the reading at position `i` moves to `i + k`.
    ///
    /// The first `k` positions become `Missing`; nothing wraps around.
    pub fn shift(&self, k: usize) -> Self {
        let n = self.values.len();
        let mut values = vec![Reading::Missing; n];
        if k < n {
            values[k..].copy_from_slice(&self.values[..n - k]);
        }
        Self {
            times: self.times.clone(),
            values,
        }
    }

    /// Applies `f` to every value.
    pub fn map_values(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            times: self.times.clone(),
            values: self.values.iter().map(|r| r.map(&f)).collect(),
        }
    }

    /// Averages this series into dekads.
    ///
    /// # Errors
    ///
    /// See [`aggregate::resample_to_dekad`].
    pub fn resample_to_dekad(&self, frequency: Frequency) -> Result<Self, TimeSeriesError> {
        aggregate::resample_to_dekad(&self.times, &self.values, frequency)
    }

    /// Aggregates this series into calendar months.
    ///
    /// # Errors
    ///
    /// See [`aggregate::resample_to_month`].
    pub fn resample_to_month(&self, how: Aggregation) -> Result<Self, TimeSeriesError> {
        aggregate::resample_to_month(&self.times, &self.values, how)
    }
}

fn check_increasing(times: &[Date]) -> Result<(), TimeSeriesError> {
    if let Some(pair) = times.windows(2).find(|w| w[0] >= w[1]) {
        return Err(TimeSeriesError::Unordered {
            previous: pair[0],
            next: pair[1],
        });
    }
    Ok(())
}
