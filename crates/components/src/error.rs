//! Error types for the cdi-components crate.

use cdi_spatial::SpatialError;
use cdi_stats::StatsError;

use crate::kind::ComponentKind;

/// Failure reported by a [`Retriever`](crate::Retriever).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RetrieveError {
    /// The source holds no data for the variable.
    #[error("no data for variable {variable:?}")]
    NotFound {
        /// Requested variable.
        variable: String,
    },

    /// The source could not be read.
    #[error("data source unavailable: {reason}")]
    Unavailable {
        /// Human-readable description of the failure.
        reason: String,
    },
}

/// Error type for all fallible operations in the cdi-components crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ComponentError {
    /// Returned when a request or component is configured inconsistently.
    #[error("configuration error: {reason}")]
    Configuration {
        /// Human-readable description of the problem.
        reason: String,
    },

    /// Returned when the retriever has no usable data.
    #[error("{component}: data unavailable")]
    DataUnavailable {
        /// Component that requested the data.
        component: ComponentKind,
        /// Underlying retrieval failure.
        #[source]
        source: RetrieveError,
    },

    /// Returned when the requested region selects no grid cell.
    #[error("{component}: region selects no grid cells")]
    SelectionEmpty {
        /// Component whose grid was masked.
        component: ComponentKind,
    },

    /// Returned when a cell's baseline cannot standardise values.
    #[error("{component}: degenerate baseline at ({lat}, {lon})")]
    BaselineDegeneracy {
        /// Component computing the anomaly.
        component: ComponentKind,
        /// Latitude of the offending cell.
        lat: f64,
        /// Longitude of the offending cell.
        lon: f64,
        /// Statistical cause.
        #[source]
        source: StatsError,
    },

    /// Returned when series cannot be placed on a common time or space axis.
    #[error("{component}: alignment failed: {reason}")]
    Alignment {
        /// Component being aligned.
        component: ComponentKind,
        /// Human-readable description of the problem.
        reason: String,
    },

    /// Returned when a grid or region operation fails.
    #[error("{component}: spatial error")]
    Spatial {
        /// Component whose data was being selected.
        component: ComponentKind,
        /// Underlying spatial failure.
        #[source]
        source: SpatialError,
    },

    /// Returned when the distribution fit fails.
    #[error("{component}: distribution fit failed")]
    Fit {
        /// Component being fitted.
        component: ComponentKind,
        /// Statistical cause.
        #[source]
        source: StatsError,
    },
}

impl ComponentError {
    /// Wraps a spatial failure, surfacing an empty selection as its own variant.
    pub(crate) fn spatial(component: ComponentKind, source: SpatialError) -> Self {
        match source {
            SpatialError::SelectionEmpty { .. } => Self::SelectionEmpty { component },
            SpatialError::TimeSeries(e) => Self::Alignment {
                component,
                reason: e.to_string(),
            },
            source => Self::Spatial { component, source },
        }
    }

    pub(crate) fn alignment(component: ComponentKind, reason: impl ToString) -> Self {
        Self::Alignment {
            component,
            reason: reason.to_string(),
        }
    }
}
