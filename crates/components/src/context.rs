//! Per-request context shared by every component.

use std::fmt;
use std::sync::Arc;

use cdi_calendar::Date;
use cdi_spatial::SpatialSelection;

use crate::error::ComponentError;
use crate::fit::{DistributionFit, GammaFit};
use crate::kind::DEFAULT_SOIL_WATER;
use crate::retriever::Retriever;

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    start: Date,
    end: Date,
}

impl Window {
    /// # Errors
    ///
    /// Returns [`ComponentError::Configuration`] if `start > end`.
    pub fn new(start: Date, end: Date) -> Result<Self, ComponentError> {
        if start > end {
            return Err(ComponentError::Configuration {
                reason: format!("start {start} is after end {end}"),
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> Date {
        self.start
    }

    pub fn end(&self) -> Date {
        self.end
    }

    /// Smallest window covering both.
    pub fn union(&self, other: &Window) -> Window {
        Window {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// Everything a request shares across its components: region, analysis and
/// baseline windows, and the retrieval and fitting capabilities.
///
/// Built once per request and passed to components behind an [`Arc`].
#[derive(Clone)]
pub struct RequestContext {
    selection: SpatialSelection,
    window: Window,
    baseline: Window,
    cell_size: Option<(f64, f64)>,
    sma_variable: String,
    retriever: Arc<dyn Retriever>,
    fit: Arc<dyn DistributionFit>,
}

impl RequestContext {
    /// Creates a context with a gamma SPI fit and the `swvl1` soil layer.
    pub fn new(
        selection: SpatialSelection,
        window: Window,
        baseline: Window,
        retriever: Arc<dyn Retriever>,
    ) -> Self {
        Self {
            selection,
            window,
            baseline,
            cell_size: None,
            sma_variable: DEFAULT_SOIL_WATER.to_string(),
            retriever,
            fit: Arc::new(GammaFit::default()),
        }
    }

    /// Overrides the grid cell size `(dlat, dlon)` used for polygon footprints.
    pub fn with_cell_size(mut self, cell_size: Option<(f64, f64)>) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Soil water variable used by the baseline-normalised anomaly.
    pub fn with_sma_variable(mut self, variable: impl Into<String>) -> Self {
        self.sma_variable = variable.into();
        self
    }

    pub fn with_fit(mut self, fit: Arc<dyn DistributionFit>) -> Self {
        self.fit = fit;
        self
    }

    /// # Errors
    ///
    /// Returns [`ComponentError::Configuration`] for a non-positive cell
    /// size or an empty soil variable name.
    pub fn validate(&self) -> Result<(), ComponentError> {
        if let Some((dlat, dlon)) = self.cell_size
            && !(dlat > 0.0 && dlon > 0.0 && dlat.is_finite() && dlon.is_finite())
        {
            return Err(ComponentError::Configuration {
                reason: format!("cell size must be positive, got ({dlat}, {dlon})"),
            });
        }
        if self.sma_variable.trim().is_empty() {
            return Err(ComponentError::Configuration {
                reason: "soil moisture variable must not be empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn selection(&self) -> &SpatialSelection {
        &self.selection
    }

    /// Requested analysis window.
    pub fn window(&self) -> Window {
        self.window
    }

    pub fn baseline(&self) -> Window {
        self.baseline
    }

    pub fn cell_size(&self) -> Option<(f64, f64)> {
        self.cell_size
    }

    pub fn sma_variable(&self) -> &str {
        &self.sma_variable
    }

    pub fn retriever(&self) -> &dyn Retriever {
        self.retriever.as_ref()
    }

    pub fn fit(&self) -> &dyn DistributionFit {
        self.fit.as_ref()
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("selection", &self.selection)
            .field("window", &self.window)
            .field("baseline", &self.baseline)
            .field("cell_size", &self.cell_size)
            .field("sma_variable", &self.sma_variable)
            .finish_non_exhaustive()
    }
}
