//! Shared steps that bring a fetched field onto a component's output axis.

use cdi_calendar::{Date, DekadGrid};
use cdi_spatial::{GriddedDataset, GriddedSeries, InclusionMask, SpatialError, select_region};
use cdi_timeseries::{Aggregation, Frequency, Reading, TimeSeries, resample_to_dekad};

use crate::context::RequestContext;
use crate::error::{ComponentError, RetrieveError};
use crate::kind::ComponentKind;

/// Looks up `name` in `dataset`, treating an empty time axis as absent.
pub(crate) fn variable<'a>(
    kind: ComponentKind,
    dataset: &'a GriddedDataset,
    name: &str,
) -> Result<&'a GriddedSeries, ComponentError> {
    match dataset.get(name) {
        Some(series) if series.n_times() > 0 => Ok(series),
        _ => Err(ComponentError::DataUnavailable {
            component: kind,
            source: RetrieveError::NotFound {
                variable: name.to_string(),
            },
        }),
    }
}

/// Masks and crops `series` to the request's region.
pub(crate) fn select(
    ctx: &RequestContext,
    kind: ComponentKind,
    series: &GriddedSeries,
) -> Result<(InclusionMask, GriddedSeries), ComponentError> {
    select_region(series, ctx.selection(), ctx.cell_size())
        .map_err(|e| ComponentError::spatial(kind, e))
}

/// Averages every cell into dekads and reindexes onto `grid`.
pub(crate) fn onto_dekads(
    kind: ComponentKind,
    field: &GriddedSeries,
    grid: &DekadGrid,
) -> Result<GriddedSeries, ComponentError> {
    let frequency = field.frequency();
    field
        .map_cells(
            Frequency::Dekadal,
            |_, times: &[Date], values: &[Reading]| -> Result<TimeSeries, SpatialError> {
                let dekads = resample_to_dekad(times, values, frequency)?;
                Ok(dekads.reindex(grid.as_slice())?)
            },
        )
        .map_err(|e| ComponentError::spatial(kind, e))
}

/// Aggregates every cell into calendar months and reindexes onto `months`.
pub(crate) fn onto_months(
    kind: ComponentKind,
    field: &GriddedSeries,
    months: &[Date],
    how: Aggregation,
) -> Result<GriddedSeries, ComponentError> {
    field
        .map_cells(
            Frequency::Monthly,
            |_, times: &[Date], values: &[Reading]| -> Result<TimeSeries, SpatialError> {
                let monthly = if field.frequency() == Frequency::Hourly {
                    let daily = cdi_timeseries::daily_mean(times, values)?;
                    daily.resample_to_month(how)?
                } else {
                    cdi_timeseries::resample_to_month(times, values, how)?
                };
                Ok(monthly.reindex(months)?)
            },
        )
        .map_err(|e| ComponentError::spatial(kind, e))
}

/// Re-applies `mask` so excluded cells read `Outside`.
pub(crate) fn remask(
    kind: ComponentKind,
    field: &GriddedSeries,
    mask: &InclusionMask,
) -> Result<GriddedSeries, ComponentError> {
    field
        .apply_mask(mask)
        .map_err(|e| ComponentError::spatial(kind, e))
}

/// Fills gaps of `primary` from `fallback`, cell by cell.
///
/// Both fields must cover the same cells and time steps.
pub(crate) fn fill_from(
    kind: ComponentKind,
    primary: &GriddedSeries,
    fallback: &GriddedSeries,
) -> Result<GriddedSeries, ComponentError> {
    if primary.grid().lats() != fallback.grid().lats()
        || primary.grid().lons() != fallback.grid().lons()
    {
        return Err(ComponentError::alignment(
            kind,
            "fallback field is on a different grid",
        ));
    }
    if primary.times() != fallback.times() {
        return Err(ComponentError::alignment(
            kind,
            "fallback field is on a different time axis",
        ));
    }
    let values = primary
        .values()
        .iter()
        .zip(fallback.values())
        .map(|(&p, &f)| p.or(f))
        .collect();
    GriddedSeries::new(
        primary.grid().clone(),
        primary.times().to_vec(),
        primary.frequency(),
        values,
    )
    .map_err(|e| ComponentError::spatial(kind, e))
}

/// First day of the year holding `date`.
pub(crate) fn start_of_year(date: Date) -> Date {
    date.first_of_month().add_months(1 - i32::from(date.month()))
}
