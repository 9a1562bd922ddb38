//! End-to-end composition of the three components.

use std::sync::Arc;

use cdi_calendar::{Date, DekadGrid, assign};
use cdi_components::{
    ComponentKind, ComponentSeries, ComponentSource, IndexComponent, RequestContext, Window,
};
use cdi_spatial::SelectionKind;
use cdi_timeseries::TimeSeries;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::{CdiError, Stage};
use crate::lag::{align_component, component_start, shared_grid};
use crate::record::{CdiRecord, CdiResult, IndexRecord};
use crate::severity::{Severity, classify};

/// Slack when checking that a centre falls within half a cell.
const CENTRE_TOLERANCE: f64 = 1e-9;

/// Which source the configurable components draw from.
///
/// fAPAR is only available as a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sources {
    pub spi: ComponentSource,
    pub sma: ComponentSource,
}

impl Sources {
    /// Source used for `kind`.
    pub fn of(&self, kind: ComponentKind) -> ComponentSource {
        match kind {
            ComponentKind::Spi => self.spi,
            ComponentKind::Sma => self.sma,
            ComponentKind::Fapar => ComponentSource::Product,
        }
    }
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            spi: ComponentSource::Fitted,
            sma: ComponentSource::Product,
        }
    }
}

/// Computes the composite drought indicator for one request.
#[derive(Debug, Clone)]
pub struct CdiPipeline {
    ctx: Arc<RequestContext>,
    sources: Sources,
}

impl CdiPipeline {
    pub fn new(ctx: Arc<RequestContext>) -> Self {
        Self {
            ctx,
            sources: Sources::default(),
        }
    }

    pub fn with_sources(mut self, sources: Sources) -> Self {
        self.sources = sources;
        self
    }

    pub fn context(&self) -> &RequestContext {
        &self.ctx
    }

    /// Builds `kind` over the window it needs to feed the request.
    ///
    /// # Errors
    ///
    /// Returns [`CdiError::Configuration`] for an unsupported source.
    pub fn component(&self, kind: ComponentKind) -> Result<IndexComponent, CdiError> {
        let start = assign(self.ctx.window().start());
        let window = Window::new(component_start(kind, start), self.ctx.window().end())
            .map_err(|e| CdiError::Configuration {
                reason: e.to_string(),
            })?;
        IndexComponent::for_kind(kind, self.sources.of(kind), window, Arc::clone(&self.ctx)).map_err(
            |e| CdiError::Configuration {
                reason: e.to_string(),
            },
        )
    }

    /// Runs all three components concurrently and classifies every time
    /// step in `[dekad of start, end]`.
    ///
    /// # Errors
    ///
    /// Returns the first failure; no partial result is produced.
    #[tracing::instrument(skip(self), fields(window = %self.ctx.window(), region = %self.ctx.selection().kind()))]
    pub fn run(&self) -> Result<CdiResult, CdiError> {
        self.ctx
            .validate()
            .map_err(|e| CdiError::Configuration {
                reason: e.to_string(),
            })?;
        let start = assign(self.ctx.window().start());
        let end = self.ctx.window().end();

        let spi = self.component(ComponentKind::Spi)?;
        let sma = self.component(ComponentKind::Sma)?;
        let fapar = self.component(ComponentKind::Fapar)?;
        let (spi, (sma, fapar)) = rayon::join(
            || run_component(spi),
            || rayon::join(|| run_component(sma), || run_component(fapar)),
        );
        let (spi, sma, fapar) = (spi?, sma?, fapar?);

        let grid = shared_grid(start, end)?;
        let n_steps = grid.crop(start, end).len();
        let cells = reference_cells(&self.ctx, &spi, &sma, &fapar);
        debug!(n_cells = cells.len(), n_dekads = grid.len(), "composing");

        let per_cell: Vec<Vec<CdiRecord>> = cells
            .par_iter()
            .map(|cell| compose_cell(cell, [&spi, &sma, &fapar], &grid, start, end))
            .collect::<Result<_, CdiError>>()?;

        let mut columns: Vec<_> = per_cell.into_iter().map(Vec::into_iter).collect();
        let mut records = Vec::with_capacity(n_steps * columns.len());
        for _ in 0..n_steps {
            records.extend(columns.iter_mut().filter_map(Iterator::next));
        }

        let n_alerts = records
            .iter()
            .filter(|r| r.severity.is_some_and(|s| s >= Severity::Alert1))
            .count();
        info!(n_records = records.len(), n_alerts, "composite indicator computed");
        Ok(CdiResult {
            selection: self.ctx.selection().kind(),
            start,
            end,
            records,
        })
    }
}

fn run_component(mut component: IndexComponent) -> Result<ComponentSeries, CdiError> {
    let kind = component.kind();
    component
        .download()
        .map_err(|source| CdiError::Component {
            component: kind,
            stage: Stage::Download,
            source,
        })?;
    let series = component.process().map_err(|source| CdiError::Component {
        component: kind,
        stage: Stage::Process,
        source,
    })?;
    Ok(series.clone())
}

/// An output cell and where each component is read for it.
#[derive(Debug, Clone, PartialEq)]
struct CellRef {
    coords: Option<(f64, f64)>,
    spi: Option<(usize, usize)>,
    sma: Option<(usize, usize)>,
    fapar: Option<(usize, usize)>,
}

/// Output cells: the single cell of a point, else every included cell of
/// the SPI grid with the other components sampled at its centre.
fn reference_cells(
    ctx: &RequestContext,
    spi: &ComponentSeries,
    sma: &ComponentSeries,
    fapar: &ComponentSeries,
) -> Vec<CellRef> {
    if ctx.selection().kind() == SelectionKind::Point {
        return vec![CellRef {
            coords: None,
            spi: Some((0, 0)),
            sma: Some((0, 0)),
            fapar: Some((0, 0)),
        }];
    }
    let grid = spi.field().grid();
    spi.mask()
        .included()
        .map(|(i, j)| {
            let (lat, lon) = (grid.lats()[i], grid.lons()[j]);
            CellRef {
                coords: Some((lat, lon)),
                spi: Some((i, j)),
                sma: locate(sma, lat, lon, ctx.cell_size()),
                fapar: locate(fapar, lat, lon, ctx.cell_size()),
            }
        })
        .collect()
}

/// Included cell of `series` whose footprint holds `(lat, lon)`.
fn locate(
    series: &ComponentSeries,
    lat: f64,
    lon: f64,
    cell_size: Option<(f64, f64)>,
) -> Option<(usize, usize)> {
    let grid = series.field().grid();
    let (i, j) = (grid.nearest_lat(lat), grid.nearest_lon(lon));
    if !series.mask().get(i, j) {
        return None;
    }
    if let Some((dlat, dlon)) = grid.cell_size().ok().or(cell_size)
        && ((grid.lats()[i] - lat).abs() > dlat / 2.0 + CENTRE_TOLERANCE
            || (grid.lons()[j] - lon).abs() > dlon / 2.0 + CENTRE_TOLERANCE)
    {
        return None;
    }
    Some((i, j))
}

fn compose_cell(
    cell: &CellRef,
    [spi, sma, fapar]: [&ComponentSeries; 3],
    grid: &DekadGrid,
    start: Date,
    end: Date,
) -> Result<Vec<CdiRecord>, CdiError> {
    let spi = lagged(spi, cell.spi, grid, start, end)?;
    let sma = lagged(sma, cell.sma, grid, start, end)?;
    let fapar = lagged(fapar, cell.fapar, grid, start, end)?;
    let (lat, lon) = cell.coords.unzip();

    Ok(spi
        .iter()
        .zip(sma.values())
        .zip(fapar.values())
        .map(|(((time, spi), sma), fapar)| {
            let (spi, sma, fapar) = (spi.value(), sma.value(), fapar.value());
            CdiRecord {
                time,
                lat,
                lon,
                spi,
                sma,
                fapar,
                severity: classify(spi, sma, fapar),
            }
        })
        .collect())
}

/// One component cell on the shared grid, lagged and cropped to the output.
fn lagged(
    series: &ComponentSeries,
    at: Option<(usize, usize)>,
    grid: &DekadGrid,
    start: Date,
    end: Date,
) -> Result<TimeSeries, CdiError> {
    let raw = match at {
        Some((i, j)) => series.cell(i, j).map_err(|source| CdiError::Component {
            component: series.kind(),
            stage: Stage::Process,
            source,
        })?,
        None => TimeSeries::new(Vec::new(), Vec::new()).map_err(CdiError::alignment)?,
    };
    Ok(align_component(series.kind(), &raw, grid)?.crop(start, end))
}

/// Rows of a single processed component.
///
/// Point series yield one row per time step; regions one row per time step
/// and included cell.
pub fn component_records(series: &ComponentSeries, point: bool) -> Vec<IndexRecord> {
    let field = series.field();
    let grid = field.grid();
    let cells: Vec<(usize, usize)> = series.mask().included().collect();
    let mut records = Vec::with_capacity(field.n_times() * cells.len());
    for (t, &time) in field.times().iter().enumerate() {
        for &(i, j) in &cells {
            let (lat, lon) = if point {
                (None, None)
            } else {
                (Some(grid.lats()[i]), Some(grid.lons()[j]))
            };
            records.push(IndexRecord {
                time,
                lat,
                lon,
                value: field.at(t, i, j).value(),
            });
        }
    }
    records
}
