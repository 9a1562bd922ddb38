//! Aggregation of raw records to dekads and months.
//!
//! Records are `(date, reading)` pairs in non-decreasing date order. Hourly
//! data repeats each date once per record; every other frequency has one
//! record per date.

use cdi_calendar::{Date, assign};

use crate::error::TimeSeriesError;
use crate::frequency::Frequency;
use crate::reading::{Reading, mean_of, sum_of};
use crate::series::TimeSeries;

/// How a group of records collapses to one reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    /// Mean of available values.
    Mean,
    /// Total; any gap makes the group missing.
    Sum,
}

impl Aggregation {
    fn apply(self, group: &[Reading]) -> Reading {
        match self {
            Self::Mean => mean_of(group.iter().copied()),
            Self::Sum => sum_of(group.iter().copied()),
        }
    }
}

/// Groups consecutive records by `key` and collapses each group.
///
/// `key` must be monotone so that equal keys are contiguous.
///
/// # Errors
///
/// Returns [`TimeSeriesError::LengthMismatch`] if the slices differ in length
/// and [`TimeSeriesError::Unordered`] if keys decrease.
pub fn group_by(
    times: &[Date],
    values: &[Reading],
    key: impl Fn(Date) -> Date,
    how: Aggregation,
) -> Result<TimeSeries, TimeSeriesError> {
    if times.len() != values.len() {
        return Err(TimeSeriesError::LengthMismatch {
            times: times.len(),
            values: values.len(),
        });
    }
    let mut out_times = Vec::new();
    let mut out_values = Vec::new();
    let mut group: Vec<Reading> = Vec::new();
    let mut current: Option<Date> = None;

    for (&t, &v) in times.iter().zip(values) {
        let k = key(t);
        match current {
            Some(c) if c == k => {}
            Some(c) => {
                if k < c {
                    return Err(TimeSeriesError::Unordered {
                        previous: c,
                        next: k,
                    });
                }
                out_times.push(c);
                out_values.push(how.apply(&group));
                group.clear();
                current = Some(k);
            }
            None => current = Some(k),
        }
        group.push(v);
    }
    if let Some(c) = current {
        out_times.push(c);
        out_values.push(how.apply(&group));
    }
    TimeSeries::new(out_times, out_values)
}

/// Reduces sub-daily records to one mean per date.
///
/// # Errors
///
/// See [`group_by`].
pub fn daily_mean(times: &[Date], values: &[Reading]) -> Result<TimeSeries, TimeSeriesError> {
    group_by(times, values, |d| d, Aggregation::Mean)
}

/// Averages records into dekads, each labelled with its dekad start.
///
/// Hourly records are first reduced to daily means so that every day
/// carries equal weight in its dekad.
///
/// # Errors
///
/// Returns [`TimeSeriesError::Upsample`] for monthly input, plus the
/// errors of [`group_by`].
pub fn resample_to_dekad(
    times: &[Date],
    values: &[Reading],
    frequency: Frequency,
) -> Result<TimeSeries, TimeSeriesError> {
    match frequency {
        Frequency::Monthly => Err(TimeSeriesError::Upsample {
            from: frequency,
            to: Frequency::Dekadal,
        }),
        Frequency::Hourly => {
            let daily = daily_mean(times, values)?;
            group_by(daily.times(), daily.values(), assign, Aggregation::Mean)
        }
        Frequency::Daily | Frequency::Dekadal => {
            group_by(times, values, assign, Aggregation::Mean)
        }
    }
}

/// Aggregates records into calendar months labelled with the first day.
///
/// # Errors
///
/// See [`group_by`].
pub fn resample_to_month(
    times: &[Date],
    values: &[Reading],
    how: Aggregation,
) -> Result<TimeSeries, TimeSeriesError> {
    group_by(times, values, Date::first_of_month, how)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u8, d: u8) -> Date {
        Date::new(y, m, d).unwrap()
    }

    #[test]
    fn daily_to_dekad_means() {
        let times: Vec<Date> = (1..=21).map(|d| date(2020, 1, d)).collect();
        let values: Vec<Reading> = (1..=21).map(|d| Reading::Value(d as f64)).collect();
        let s = resample_to_dekad(&times, &values, Frequency::Daily).unwrap();
        assert_eq!(s.times(), &[date(2020, 1, 1), date(2020, 1, 11), date(2020, 1, 21)]);
        assert_relative_eq!(s.values()[0].value().unwrap(), 5.5);
        assert_relative_eq!(s.values()[1].value().unwrap(), 15.5);
        assert_relative_eq!(s.values()[2].value().unwrap(), 21.0);
    }

    #[test]
    fn hourly_days_weigh_equally() {
        // Day 1 has three records, day 2 one.
        let times = vec![date(2020, 1, 1), date(2020, 1, 1), date(2020, 1, 1), date(2020, 1, 2)];
        let values = vec![
            Reading::Value(0.0),
            Reading::Value(0.0),
            Reading::Value(0.0),
            Reading::Value(4.0),
        ];
        let s = resample_to_dekad(&times, &values, Frequency::Hourly).unwrap();
        assert_eq!(s.len(), 1);
        assert_relative_eq!(s.values()[0].value().unwrap(), 2.0);
    }

    #[test]
    fn all_missing_dekad_stays_missing() {
        let times = vec![date(2020, 1, 2), date(2020, 1, 12)];
        let values = vec![Reading::Missing, Reading::Value(1.0)];
        let s = resample_to_dekad(&times, &values, Frequency::Daily).unwrap();
        assert_eq!(s.values(), &[Reading::Missing, Reading::Value(1.0)]);
    }

    #[test]
    fn outside_survives_aggregation() {
        let times = vec![date(2020, 1, 2), date(2020, 1, 3)];
        let values = vec![Reading::Outside, Reading::Outside];
        let s = resample_to_dekad(&times, &values, Frequency::Daily).unwrap();
        assert_eq!(s.values(), &[Reading::Outside]);
    }

    #[test]
    fn monthly_input_rejected() {
        let err = resample_to_dekad(&[date(2020, 1, 1)], &[Reading::Missing], Frequency::Monthly)
            .unwrap_err();
        assert!(matches!(err, TimeSeriesError::Upsample { .. }));
    }

    #[test]
    fn monthly_sums() {
        let times = vec![date(2020, 1, 1), date(2020, 1, 11), date(2020, 2, 1)];
        let values = vec![Reading::Value(2.0), Reading::Value(3.0), Reading::Value(1.0)];
        let s = resample_to_month(&times, &values, Aggregation::Sum).unwrap();
        assert_eq!(s.times(), &[date(2020, 1, 1), date(2020, 2, 1)]);
        assert_eq!(s.values(), &[Reading::Value(5.0), Reading::Value(1.0)]);
    }

    #[test]
    fn decreasing_records_rejected() {
        let times = vec![date(2020, 2, 1), date(2020, 1, 1)];
        let values = vec![Reading::Value(1.0), Reading::Value(1.0)];
        assert!(matches!(
            daily_mean(&times, &values),
            Err(TimeSeriesError::Unordered { .. })
        ));
    }
}
