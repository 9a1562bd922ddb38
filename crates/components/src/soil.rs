//! Soil moisture anomaly: baseline-normalised or pre-computed product.

use cdi_calendar::{Date, generate};
use cdi_spatial::{GriddedDataset, SpatialError};
use cdi_stats::Baseline;
use cdi_timeseries::{Frequency, Reading, TimeSeries, resample_to_dekad};
use tracing::{debug, warn};

use crate::align;
use crate::component::ComponentSeries;
use crate::context::{RequestContext, Window};
use crate::error::ComponentError;
use crate::kind::{ComponentKind, SMA_MODELLED, SMA_PRODUCT, Variant};

const KIND: ComponentKind = ComponentKind::Sma;

/// Standardises analysis-window soil water against each cell's baseline.
///
/// `baseline` holds the reference period, `analysis` the window at native
/// resolution. Both must resolve to the same cells.
pub(crate) fn fitted(
    ctx: &RequestContext,
    window: Window,
    analysis: &GriddedDataset,
    baseline: &GriddedDataset,
) -> Result<ComponentSeries, ComponentError> {
    let name = ctx.sma_variable();
    let (mask, field) = align::select(ctx, KIND, align::variable(KIND, analysis, name)?)?;
    let (_, reference) = align::select(ctx, KIND, align::variable(KIND, baseline, name)?)?;

    if field.grid().lats() != reference.grid().lats()
        || field.grid().lons() != reference.grid().lons()
    {
        return Err(ComponentError::alignment(
            KIND,
            "baseline and analysis fields are on different grids",
        ));
    }

    let n_lon = field.grid().n_lon();
    let mut stats: Vec<Option<Baseline>> = vec![None; field.grid().n_cells()];
    for (i, j) in mask.included() {
        let samples: Vec<f64> = reference
            .cell_values(i, j)
            .into_iter()
            .map(Reading::to_f64)
            .collect();
        let cell = Baseline::from_samples(&samples).map_err(|source| {
            ComponentError::BaselineDegeneracy {
                component: KIND,
                lat: field.grid().lats()[i],
                lon: field.grid().lons()[j],
                source,
            }
        })?;
        stats[i * n_lon + j] = Some(cell);
    }
    debug!(n_cells = mask.count(), "baseline statistics computed");

    let grid = generate(window.start(), window.end())
        .map_err(|e| ComponentError::alignment(KIND, e))?;
    let frequency = field.frequency();
    let anomaly = field
        .map_cells(
            Frequency::Dekadal,
            |(i, j), times: &[Date], values: &[Reading]| -> Result<TimeSeries, SpatialError> {
                let dekads = resample_to_dekad(times, values, frequency)?.reindex(grid.as_slice())?;
                Ok(match &stats[i * n_lon + j] {
                    Some(b) => dekads.map_values(|x| b.standardize(x)),
                    None => dekads,
                })
            },
        )
        .map_err(|e| ComponentError::spatial(KIND, e))?;
    let anomaly = align::remask(KIND, &anomaly, &mask)?;

    Ok(ComponentSeries::new(Variant::SmaFitted, anomaly, mask))
}

/// Reads the long-term anomaly product, filling its gaps from the
/// modelled product when one was fetched.
pub(crate) fn product(
    ctx: &RequestContext,
    window: Window,
    dataset: &GriddedDataset,
    modelled: Option<&GriddedDataset>,
) -> Result<ComponentSeries, ComponentError> {
    let grid = generate(window.start(), window.end())
        .map_err(|e| ComponentError::alignment(KIND, e))?;
    let (mask, field) = align::select(ctx, KIND, align::variable(KIND, dataset, SMA_PRODUCT)?)?;
    let mut field = align::onto_dekads(KIND, &field, &grid)?;

    match modelled.map(|ds| align::variable(KIND, ds, SMA_MODELLED)) {
        Some(Ok(series)) => {
            let (_, fallback) = align::select(ctx, KIND, series)?;
            let fallback = align::onto_dekads(KIND, &fallback, &grid)?;
            field = align::fill_from(KIND, &field, &fallback)?;
        }
        Some(Err(e)) => warn!(error = %e, "modelled soil moisture unusable, keeping gaps"),
        None => {}
    }

    Ok(ComponentSeries::new(Variant::SmaProduct, field, mask))
}
