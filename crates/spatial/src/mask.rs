//! Inclusion masks for point, box and polygon regions.

use std::ops::Range;

use geo::{Area, Coord, Intersects, LineString, Polygon, Rect};
use tracing::debug;

use crate::error::SpatialError;
use crate::grid::GridDescriptor;
use crate::selection::{Bounds, SelectionKind, SpatialSelection};

/// Minimum overlap, as a fraction of the cell footprint, for a polygon to
/// claim a cell. Footprints that merely touch the polygon are excluded.
const MIN_OVERLAP_FRACTION: f64 = 1e-9;

/// Row-major `[lat][lon]` flags marking the cells inside a region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InclusionMask {
    n_lat: usize,
    n_lon: usize,
    cells: Vec<bool>,
}

impl InclusionMask {
    fn empty(grid: &GridDescriptor) -> Self {
        Self {
            n_lat: grid.n_lat(),
            n_lon: grid.n_lon(),
            cells: vec![false; grid.n_cells()],
        }
    }

    /// A mask including every cell of `grid`.
    pub fn full(grid: &GridDescriptor) -> Self {
        Self {
            n_lat: grid.n_lat(),
            n_lon: grid.n_lon(),
            cells: vec![true; grid.n_cells()],
        }
    }

    pub fn n_lat(&self) -> usize {
        self.n_lat
    }

    pub fn n_lon(&self) -> usize {
        self.n_lon
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    pub fn get(&self, i_lat: usize, i_lon: usize) -> bool {
        self.cells[i_lat * self.n_lon + i_lon]
    }

    fn set(&mut self, i_lat: usize, i_lon: usize) {
        self.cells[i_lat * self.n_lon + i_lon] = true;
    }

    /// Number of included cells.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(|&c| c)
    }

    /// `(i_lat, i_lon)` of every included cell in row-major order.
    pub fn included(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c)
            .map(|(k, _)| (k / self.n_lon, k % self.n_lon))
    }

    /// Index ranges of the smallest block holding every included cell.
    pub fn index_bounds(&self) -> Option<(Range<usize>, Range<usize>)> {
        let mut lat = (usize::MAX, 0);
        let mut lon = (usize::MAX, 0);
        for (i, j) in self.included() {
            lat = (lat.0.min(i), lat.1.max(i + 1));
            lon = (lon.0.min(j), lon.1.max(j + 1));
        }
        (lat.0 < lat.1).then_some((lat.0..lat.1, lon.0..lon.1))
    }

    /// The mask restricted to the given block.
    pub(crate) fn slice(&self, lat_range: Range<usize>, lon_range: Range<usize>) -> Self {
        let n_lon = lon_range.len();
        let mut cells = Vec::with_capacity(lat_range.len() * n_lon);
        for i in lat_range.clone() {
            for j in lon_range.clone() {
                cells.push(self.get(i, j));
            }
        }
        Self {
            n_lat: lat_range.len(),
            n_lon,
            cells,
        }
    }

    fn non_empty(self, kind: SelectionKind) -> Result<Self, SpatialError> {
        if self.is_empty() {
            return Err(SpatialError::SelectionEmpty { kind });
        }
        Ok(self)
    }
}

/// The single cell nearest to `(lat, lon)`.
pub fn mask_point(grid: &GridDescriptor, lat: f64, lon: f64) -> InclusionMask {
    let mut mask = InclusionMask::empty(grid);
    mask.set(grid.nearest_lat(lat), grid.nearest_lon(lon));
    mask
}

fn bbox_cells(grid: &GridDescriptor, b: Bounds) -> InclusionMask {
    let mut mask = InclusionMask::empty(grid);
    for (i, &lat) in grid.lats().iter().enumerate() {
        if lat < b.min_lat || lat > b.max_lat {
            continue;
        }
        for (j, &lon) in grid.lons().iter().enumerate() {
            if lon >= b.min_lon && lon <= b.max_lon {
                mask.set(i, j);
            }
        }
    }
    mask
}

/// Every cell whose centre lies within the inclusive bounds.
///
/// # Errors
///
/// Returns [`SpatialError::SelectionEmpty`] if no cell qualifies.
pub fn mask_bbox(
    grid: &GridDescriptor,
    min_lat: f64,
    max_lat: f64,
    min_lon: f64,
    max_lon: f64,
) -> Result<InclusionMask, SpatialError> {
    let b = Bounds {
        min_lat,
        max_lat,
        min_lon,
        max_lon,
    };
    bbox_cells(grid, b).non_empty(SelectionKind::BBox)
}

/// Every cell whose rectangular footprint overlaps the polygon.
///
/// Footprints are centred on the cell coordinate and span one cell size per
/// axis; `cellsize` (`(dlat, dlon)`) overrides the grid spacing. Cells are
/// pre-filtered by the polygon's bounding box grown by half a cell.
///
/// # Errors
///
/// Returns [`SpatialError::Configuration`] for fewer than three vertices,
/// [`SpatialError::UnknownSpacing`] if no cell size is known, and
/// [`SpatialError::SelectionEmpty`] if no footprint overlaps.
pub fn mask_polygon(
    grid: &GridDescriptor,
    vertices: &[(f64, f64)],
    cellsize: Option<(f64, f64)>,
) -> Result<InclusionMask, SpatialError> {
    if vertices.len() < 3 {
        return Err(SpatialError::Configuration {
            reason: format!("polygon needs at least 3 vertices, got {}", vertices.len()),
        });
    }
    let (dlat, dlon) = match cellsize {
        Some(size) => size,
        None => grid.cell_size()?,
    };
    let (half_lat, half_lon) = (dlat / 2.0, dlon / 2.0);

    let ring: Vec<Coord<f64>> = vertices
        .iter()
        .map(|&(lat, lon)| Coord { x: lon, y: lat })
        .collect();
    let polygon = Polygon::new(LineString::from(ring.clone()), vec![]);

    let selection = SpatialSelection::new(vertices.to_vec())?;
    let candidates = bbox_cells(grid, selection.bounds().expand(half_lat, half_lon));
    let min_overlap = MIN_OVERLAP_FRACTION * dlat * dlon;

    let mut mask = InclusionMask::empty(grid);
    for (i, j) in candidates.included() {
        let (lat, lon) = (grid.lats()[i], grid.lons()[j]);
        let footprint = Rect::new(
            Coord {
                x: lon - half_lon,
                y: lat - half_lat,
            },
            Coord {
                x: lon + half_lon,
                y: lat + half_lat,
            },
        );
        if !polygon.intersects(&footprint) {
            continue;
        }
        if overlap_area(&ring, &footprint) > min_overlap {
            mask.set(i, j);
        }
    }
    debug!(
        n_candidates = candidates.count(),
        n_selected = mask.count(),
        "polygon mask built"
    );
    mask.non_empty(SelectionKind::Polygon)
}

/// Mask for any selection kind.
///
/// # Errors
///
/// See [`mask_bbox`] and [`mask_polygon`].
pub fn mask_region(
    grid: &GridDescriptor,
    selection: &SpatialSelection,
    cellsize: Option<(f64, f64)>,
) -> Result<InclusionMask, SpatialError> {
    match selection.kind() {
        SelectionKind::Point => {
            let (lat, lon) = selection.coords()[0];
            Ok(mask_point(grid, lat, lon))
        }
        SelectionKind::BBox => {
            let b = selection.bounds();
            mask_bbox(grid, b.min_lat, b.max_lat, b.min_lon, b.max_lon)
        }
        SelectionKind::Polygon => mask_polygon(grid, selection.coords(), cellsize),
    }
}

/// Area of the polygon `ring` inside `rect`.
///
/// Sutherland-Hodgman clipping against each rectangle edge. The clipped
/// ring of a concave polygon may contain zero-width bridges, which do not
/// change its area.
fn overlap_area(ring: &[Coord<f64>], rect: &Rect<f64>) -> f64 {
    let (min, max) = (rect.min(), rect.max());
    let edges: [(fn(Coord<f64>, f64) -> bool, Axis, f64); 4] = [
        (|p, v| p.x >= v, Axis::X, min.x),
        (|p, v| p.x <= v, Axis::X, max.x),
        (|p, v| p.y >= v, Axis::Y, min.y),
        (|p, v| p.y <= v, Axis::Y, max.y),
    ];
    let mut clipped = ring.to_vec();
    for (inside, axis, value) in edges {
        clipped = clip_edge(&clipped, inside, axis, value);
        if clipped.is_empty() {
            return 0.0;
        }
    }
    if clipped.len() < 3 {
        return 0.0;
    }
    Polygon::new(LineString::from(clipped), vec![]).unsigned_area()
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

fn crossing(p: Coord<f64>, q: Coord<f64>, axis: Axis, value: f64) -> Coord<f64> {
    match axis {
        Axis::X => {
            let t = (value - p.x) / (q.x - p.x);
            Coord {
                x: value,
                y: p.y + t * (q.y - p.y),
            }
        }
        Axis::Y => {
            let t = (value - p.y) / (q.y - p.y);
            Coord {
                x: p.x + t * (q.x - p.x),
                y: value,
            }
        }
    }
}

fn clip_edge(
    vertices: &[Coord<f64>],
    inside: fn(Coord<f64>, f64) -> bool,
    axis: Axis,
    value: f64,
) -> Vec<Coord<f64>> {
    let mut out = Vec::with_capacity(vertices.len() + 2);
    let n = vertices.len();
    for k in 0..n {
        let current = vertices[k];
        let previous = vertices[(k + n - 1) % n];
        let (cur_in, prev_in) = (inside(current, value), inside(previous, value));
        if cur_in {
            if !prev_in {
                out.push(crossing(previous, current, axis, value));
            }
            out.push(current);
        } else if prev_in {
            out.push(crossing(previous, current, axis, value));
        }
    }
    out
}
