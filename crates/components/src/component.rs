//! The download/process lifecycle shared by every component.

use std::sync::Arc;

use cdi_spatial::{GriddedDataset, GriddedSeries, InclusionMask};
use cdi_timeseries::{Frequency, TimeSeries};
use tracing::{debug, info};

use crate::context::{RequestContext, Window};
use crate::error::{ComponentError, RetrieveError};
use crate::kind::{
    ComponentKind, ComponentSource, FAPAR_PRODUCT, Metadata, PRECIPITATION, SMA_MODELLED,
    SMA_PRODUCT, SPI_PRODUCT, Variant,
};
use crate::retriever::FetchRequest;
use crate::{fapar, soil, spi};

/// A processed component: one series per cell on the component's native
/// axis (month starts for SPI, dekads otherwise).
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentSeries {
    variant: Variant,
    field: GriddedSeries,
    mask: InclusionMask,
}

impl ComponentSeries {
    pub(crate) fn new(variant: Variant, field: GriddedSeries, mask: InclusionMask) -> Self {
        Self {
            variant,
            field,
            mask,
        }
    }

    pub fn kind(&self) -> ComponentKind {
        self.variant.kind()
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Lag in dekads applied when composing.
    pub fn lag(&self) -> usize {
        self.kind().lag()
    }

    /// Values over the cropped region; excluded cells read `Outside`.
    pub fn field(&self) -> &GriddedSeries {
        &self.field
    }

    /// Region mask on the field's grid.
    pub fn mask(&self) -> &InclusionMask {
        &self.mask
    }

    /// One cell as a time series.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::Alignment`] if the field's time axis is
    /// not strictly increasing.
    pub fn cell(&self, i_lat: usize, i_lon: usize) -> Result<TimeSeries, ComponentError> {
        self.field
            .cell_series(i_lat, i_lon)
            .map_err(|e| ComponentError::spatial(self.kind(), e))
    }
}

/// Data as fetched, before processing.
#[derive(Debug, Clone)]
struct RawData {
    analysis: GriddedDataset,
    /// Reference period for baseline-normalised variants.
    baseline: Option<GriddedDataset>,
    /// Secondary product used to fill gaps in `analysis`.
    fallback: Option<GriddedDataset>,
}

/// One drought signal over its own window.
///
/// [`download`](Self::download) fetches raw inputs once;
/// [`process`](Self::process) turns them into a [`ComponentSeries`] and
/// caches it. Both are idempotent.
#[derive(Debug)]
pub struct IndexComponent {
    variant: Variant,
    window: Window,
    ctx: Arc<RequestContext>,
    raw: Option<RawData>,
    result: Option<ComponentSeries>,
}

impl IndexComponent {
    pub fn new(variant: Variant, window: Window, ctx: Arc<RequestContext>) -> Self {
        Self {
            variant,
            window,
            ctx,
            raw: None,
            result: None,
        }
    }

    /// Picks the variant for `kind` computed from `source`.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::Configuration`] for a fitted fAPAR, which
    /// has no local computation.
    pub fn for_kind(
        kind: ComponentKind,
        source: ComponentSource,
        window: Window,
        ctx: Arc<RequestContext>,
    ) -> Result<Self, ComponentError> {
        let variant = match (kind, source) {
            (ComponentKind::Spi, ComponentSource::Fitted) => Variant::SpiFitted,
            (ComponentKind::Spi, ComponentSource::Product) => Variant::SpiProduct,
            (ComponentKind::Sma, ComponentSource::Fitted) => Variant::SmaFitted,
            (ComponentKind::Sma, ComponentSource::Product) => Variant::SmaProduct,
            (ComponentKind::Fapar, ComponentSource::Product) => Variant::FaparProduct,
            (ComponentKind::Fapar, ComponentSource::Fitted) => {
                return Err(ComponentError::Configuration {
                    reason: "fapar is only available as a product".to_string(),
                });
            }
        };
        Ok(Self::new(variant, window, ctx))
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn kind(&self) -> ComponentKind {
        self.variant.kind()
    }

    pub fn window(&self) -> Window {
        self.window
    }

    pub fn is_downloaded(&self) -> bool {
        self.raw.is_some()
    }

    pub fn metadata(&self) -> Metadata {
        let variables = match self.variant {
            Variant::SpiFitted => vec![PRECIPITATION.to_string()],
            Variant::SpiProduct => vec![SPI_PRODUCT.to_string()],
            Variant::SmaFitted => vec![self.ctx.sma_variable().to_string()],
            Variant::SmaProduct => vec![SMA_PRODUCT.to_string(), SMA_MODELLED.to_string()],
            Variant::FaparProduct => vec![FAPAR_PRODUCT.to_string()],
        };
        Metadata {
            kind: self.kind(),
            variant: self.variant,
            lag: self.kind().lag(),
            needs_baseline: matches!(self.variant, Variant::SpiFitted | Variant::SmaFitted),
            frequency: self.variant.output_frequency(),
            variables,
        }
    }

    /// Fetches raw inputs unless already present.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::DataUnavailable`] if a required variable
    /// cannot be retrieved.
    #[tracing::instrument(skip(self), fields(variant = self.variant.name(), window = %self.window))]
    pub fn download(&mut self) -> Result<(), ComponentError> {
        if self.raw.is_some() {
            debug!("inputs already downloaded");
            return Ok(());
        }
        let baseline = self.ctx.baseline();
        let raw = match self.variant {
            Variant::SpiFitted => RawData {
                analysis: self.fetch(PRECIPITATION, self.window.union(&baseline), Frequency::Monthly)?,
                baseline: None,
                fallback: None,
            },
            Variant::SpiProduct => RawData {
                analysis: self.fetch(SPI_PRODUCT, self.window, Frequency::Monthly)?,
                baseline: None,
                fallback: None,
            },
            Variant::SmaFitted => {
                let name = self.ctx.sma_variable().to_string();
                RawData {
                    analysis: self.fetch(&name, self.window, Frequency::Hourly)?,
                    baseline: Some(self.fetch(&name, baseline, Frequency::Monthly)?),
                    fallback: None,
                }
            }
            Variant::SmaProduct => {
                let analysis = self.fetch(SMA_PRODUCT, self.window, Frequency::Dekadal)?;
                let fallback = match self.fetch(SMA_MODELLED, self.window, Frequency::Dekadal) {
                    Ok(ds) => Some(ds),
                    Err(ComponentError::DataUnavailable {
                        source: RetrieveError::NotFound { .. },
                        ..
                    }) => {
                        debug!(variable = SMA_MODELLED, "no modelled product, gaps stay");
                        None
                    }
                    Err(e) => return Err(e),
                };
                RawData {
                    analysis,
                    baseline: None,
                    fallback,
                }
            }
            Variant::FaparProduct => RawData {
                analysis: self.fetch(FAPAR_PRODUCT, self.window, Frequency::Dekadal)?,
                baseline: None,
                fallback: None,
            },
        };
        info!("inputs downloaded");
        self.raw = Some(raw);
        Ok(())
    }

    /// Computes the component series, downloading first if needed.
    ///
    /// A processed result is cached; later calls return it unchanged.
    ///
    /// # Errors
    ///
    /// Propagates download failures, plus [`ComponentError::SelectionEmpty`],
    /// [`ComponentError::BaselineDegeneracy`], [`ComponentError::Fit`] and
    /// [`ComponentError::Alignment`] from processing.
    #[tracing::instrument(skip(self), fields(variant = self.variant.name()))]
    pub fn process(&mut self) -> Result<&ComponentSeries, ComponentError> {
        let series = match self.result.take() {
            Some(cached) => cached,
            None => {
                self.download()?;
                let series = self.compute()?;
                info!(
                    n_times = series.field().n_times(),
                    n_cells = series.mask().count(),
                    "component processed"
                );
                series
            }
        };
        Ok(self.result.insert(series))
    }

    /// Consumes the component, returning its processed series if any.
    pub fn into_series(self) -> Option<ComponentSeries> {
        self.result
    }

    fn compute(&self) -> Result<ComponentSeries, ComponentError> {
        let Some(raw) = &self.raw else {
            return Err(ComponentError::Configuration {
                reason: "process called before download".to_string(),
            });
        };
        let ctx = self.ctx.as_ref();
        match self.variant {
            Variant::SpiFitted => spi::fitted(ctx, self.window, &raw.analysis),
            Variant::SpiProduct => spi::product(ctx, self.window, &raw.analysis),
            Variant::SmaFitted => {
                let baseline = raw.baseline.as_ref().ok_or_else(|| ComponentError::Configuration {
                    reason: "baseline data missing".to_string(),
                })?;
                soil::fitted(ctx, self.window, &raw.analysis, baseline)
            }
            Variant::SmaProduct => {
                soil::product(ctx, self.window, &raw.analysis, raw.fallback.as_ref())
            }
            Variant::FaparProduct => fapar::product(ctx, self.window, &raw.analysis),
        }
    }

    fn fetch(
        &self,
        variable: &str,
        window: Window,
        frequency: Frequency,
    ) -> Result<GriddedDataset, ComponentError> {
        let request = FetchRequest {
            variables: vec![variable.to_string()],
            selection: self.ctx.selection().clone(),
            start: window.start(),
            end: window.end(),
            frequency,
        };
        debug!(variable, %window, %frequency, "fetching");
        self.ctx
            .retriever()
            .fetch(&request)
            .map_err(|source| ComponentError::DataUnavailable {
                component: self.kind(),
                source,
            })
    }
}
