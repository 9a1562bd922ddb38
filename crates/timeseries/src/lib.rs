//! # cdi-timeseries
//!
//! Alignment of heterogeneous time series onto the canonical dekad axis.
//!
//! Every cell is a [`Reading`]: a value, an explicit gap, or a cell excluded
//! by region. Operations never reorder data and never fill gaps unless asked.
//!
//! | Operation | Description |
//! |-----------|-------------|
//! | [`TimeSeries::reindex`] | Exact-match left join onto a grid |
//! | [`TimeSeries::forward_fill`] | Opt-in gap filling |
//! | [`TimeSeries::crop`] | Inclusive time filter |
//! | [`TimeSeries::shift`] | Positional lag |
//! | [`resample_to_dekad`] | Sub-daily/daily records to dekad means |
//! | [`resample_to_month`] | Records to monthly means or totals |

mod aggregate;
mod error;
mod frequency;
mod reading;
mod series;

pub use aggregate::{Aggregation, daily_mean, group_by, resample_to_dekad, resample_to_month};
pub use error::TimeSeriesError;
pub use frequency::Frequency;
pub use reading::{Reading, mean_of, sum_of};
pub use series::{ForwardFill, TimeSeries};
