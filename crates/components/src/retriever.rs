//! Data retrieval seam.

use std::collections::BTreeMap;

use cdi_calendar::Date;
use cdi_spatial::{GriddedDataset, GriddedSeries, SpatialSelection};
use cdi_timeseries::Frequency;

use crate::error::RetrieveError;

/// What a component asks a data source for.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub variables: Vec<String>,
    pub selection: SpatialSelection,
    pub start: Date,
    pub end: Date,
    /// Preferred sampling; sources may return another frequency.
    pub frequency: Frequency,
}

/// Source of gridded input data.
///
/// Implementations return at least the requested variables on a grid that
/// covers the selection; callers mask and crop the result themselves.
pub trait Retriever: Send + Sync {
    /// # Errors
    ///
    /// Returns [`RetrieveError::NotFound`] if a variable has no data and
    /// [`RetrieveError::Unavailable`] if the source cannot be read.
    fn fetch(&self, request: &FetchRequest) -> Result<GriddedDataset, RetrieveError>;
}

/// A retriever serving series held in memory.
///
/// Each fetch returns the requested variables cropped to the requested
/// dates. A variable may be registered at several frequencies; the one
/// matching the request is served, else the first registered.
#[derive(Debug, Clone, Default)]
pub struct MemoryRetriever {
    series: BTreeMap<String, Vec<GriddedSeries>>,
}

impl MemoryRetriever {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `series` under `variable`, replacing any previous entry
    /// of the same frequency.
    pub fn with_variable(mut self, variable: impl Into<String>, series: GriddedSeries) -> Self {
        let entries = self.series.entry(variable.into()).or_default();
        entries.retain(|s| s.frequency() != series.frequency());
        entries.push(series);
        self
    }
}

impl Retriever for MemoryRetriever {
    fn fetch(&self, request: &FetchRequest) -> Result<GriddedDataset, RetrieveError> {
        let mut dataset = GriddedDataset::new();
        for variable in &request.variables {
            let entries = self.series.get(variable).map(Vec::as_slice).unwrap_or_default();
            let series = entries
                .iter()
                .find(|s| s.frequency() == request.frequency)
                .or_else(|| entries.first())
                .ok_or_else(|| RetrieveError::NotFound {
                    variable: variable.clone(),
                })?;
            dataset
                .insert(variable.clone(), series.crop_time(request.start, request.end))
                .map_err(|e| RetrieveError::Unavailable {
                    reason: e.to_string(),
                })?;
        }
        Ok(dataset)
    }
}
