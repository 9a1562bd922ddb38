//! # cdi-spatial
//!
//! Resolves a requested region against a regular latitude/longitude grid.
//!
//! A [`SpatialSelection`] is classified by its number of coordinate pairs:
//! one pair is a point (nearest cell), two are box corners (inclusive), and
//! three or more are polygon vertices (every cell whose footprint overlaps).
//! Cells excluded by the region read [`Reading::Outside`] so the exclusion
//! is never confused with missing data.
//!
//! ```ignore
//! use cdi_spatial::{GridDescriptor, SpatialSelection, mask_region};
//!
//! let grid = GridDescriptor::new(lats, lons)?;
//! let region = SpatialSelection::from_lat_lon(&[50.0, 52.0], &[-1.0, 2.0])?;
//! let mask = mask_region(&grid, &region, None)?;
//! ```
//!
//! [`Reading::Outside`]: cdi_timeseries::Reading::Outside

mod error;
mod grid;
mod mask;
mod selection;
mod series;

pub use error::SpatialError;
pub use grid::GridDescriptor;
pub use mask::{InclusionMask, mask_bbox, mask_point, mask_polygon, mask_region};
pub use selection::{Bounds, SelectionKind, SpatialSelection, classify};
pub use series::{GriddedDataset, GriddedSeries, select_region};
