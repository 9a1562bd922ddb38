//! Error types for the cdi-spatial crate.

use cdi_timeseries::TimeSeriesError;

use crate::selection::SelectionKind;

/// Error type for all fallible operations in the cdi-spatial crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpatialError {
    /// Returned when a region request is malformed.
    #[error("invalid region: {reason}")]
    Configuration {
        /// Human-readable description of the problem.
        reason: String,
    },

    /// Returned when a region selects no grid cell.
    #[error("{kind} selection contains no grid cells")]
    SelectionEmpty {
        /// Kind of the selection that came up empty.
        kind: SelectionKind,
    },

    /// Returned when grid coordinates are empty, non-finite or irregular.
    #[error("invalid grid: {reason}")]
    InvalidGrid {
        /// Human-readable description of the problem.
        reason: String,
    },

    /// Returned when a single-coordinate axis has no explicit cell size.
    #[error("cannot infer {axis} spacing from a single coordinate; supply a cell size")]
    UnknownSpacing {
        /// Axis name, `"latitude"` or `"longitude"`.
        axis: &'static str,
    },

    /// Returned when data or a mask does not match the grid's shape.
    #[error("shape mismatch: expected {expected} cells, found {actual}")]
    ShapeMismatch {
        /// Number of cells the grid requires.
        expected: usize,
        /// Number of cells provided.
        actual: usize,
    },

    /// Returned when a per-cell time series operation fails.
    #[error(transparent)]
    TimeSeries(#[from] TimeSeriesError),
}
