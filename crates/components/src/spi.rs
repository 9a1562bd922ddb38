//! Precipitation index: local gamma fit or pre-computed product.

use cdi_calendar::{Date, monthly_sequence};
use cdi_spatial::{GriddedDataset, SpatialError};
use cdi_stats::{Periodicity, StatsError};
use cdi_timeseries::{Aggregation, Frequency, Reading, TimeSeries};
use tracing::debug;

use crate::align;
use crate::component::ComponentSeries;
use crate::context::{RequestContext, Window};
use crate::error::ComponentError;
use crate::kind::{ComponentKind, PRECIPITATION, SPI_PRODUCT, Variant};

const KIND: ComponentKind = ComponentKind::Spi;

/// Per-cell failure while fitting.
enum CellError {
    Spatial(SpatialError),
    Fit(StatsError),
}

impl From<SpatialError> for CellError {
    fn from(e: SpatialError) -> Self {
        Self::Spatial(e)
    }
}

impl From<cdi_timeseries::TimeSeriesError> for CellError {
    fn from(e: cdi_timeseries::TimeSeriesError) -> Self {
        Self::Spatial(e.into())
    }
}

/// Fits SPI per cell over all fetched months and keeps `window`.
///
/// The calibration period is the baseline's years; inputs finer than
/// monthly are summed into monthly totals first.
pub(crate) fn fitted(
    ctx: &RequestContext,
    window: Window,
    dataset: &GriddedDataset,
) -> Result<ComponentSeries, ComponentError> {
    let precip = align::variable(KIND, dataset, PRECIPITATION)?;
    let (mask, field) = align::select(ctx, KIND, precip)?;

    let (Some(&first), Some(&last)) = (field.times().first(), field.times().last()) else {
        return Err(ComponentError::alignment(KIND, "no precipitation records"));
    };
    let data_start = align::start_of_year(first);
    let history = monthly_sequence(data_start, last);
    let totals = align::onto_months(KIND, &field, &history, Aggregation::Sum)?;

    let months = monthly_sequence(window.start(), window.end());
    let baseline = ctx.baseline();
    let fit = ctx.fit();
    debug!(
        n_months = history.len(),
        data_start_year = data_start.year(),
        calibration = %baseline,
        "fitting precipitation index"
    );

    let spi = totals
        .map_cells(
            Frequency::Monthly,
            |(i, j), times: &[Date], values: &[Reading]| -> Result<TimeSeries, CellError> {
                if !mask.get(i, j) {
                    return Ok(TimeSeries::new(
                        months.clone(),
                        vec![Reading::Outside; months.len()],
                    )?);
                }
                let raw: Vec<f64> = values.iter().map(|r| r.to_f64()).collect();
                let z = fit
                    .fit(
                        &raw,
                        data_start.year(),
                        baseline.start().year(),
                        baseline.end().year(),
                        Periodicity::Monthly,
                    )
                    .map_err(CellError::Fit)?;
                let series = TimeSeries::from_f64(times.to_vec(), &z)?;
                Ok(series.reindex(&months)?)
            },
        )
        .map_err(|e| match e {
            CellError::Spatial(e) => ComponentError::spatial(KIND, e),
            CellError::Fit(source) => ComponentError::Fit {
                component: KIND,
                source,
            },
        })?;

    Ok(ComponentSeries::new(Variant::SpiFitted, spi, mask))
}

/// Reads the pre-computed product onto the month-start grid of `window`.
pub(crate) fn product(
    ctx: &RequestContext,
    window: Window,
    dataset: &GriddedDataset,
) -> Result<ComponentSeries, ComponentError> {
    let spg = align::variable(KIND, dataset, SPI_PRODUCT)?;
    let (mask, field) = align::select(ctx, KIND, spg)?;
    let months = monthly_sequence(window.start(), window.end());
    let field = align::onto_months(KIND, &field, &months, Aggregation::Mean)?;
    Ok(ComponentSeries::new(Variant::SpiProduct, field, mask))
}
