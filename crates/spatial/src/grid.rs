//! Regular latitude/longitude grid.

use crate::error::SpatialError;

/// Relative tolerance for treating coordinate steps as equal.
const SPACING_TOLERANCE: f64 = 1e-6;

/// Coordinates of a regular grid, row-major as `[lat][lon]`.
///
/// Axes are strictly monotone and evenly spaced; either direction is
/// accepted since providers often store latitude north to south.
#[derive(Debug, Clone, PartialEq)]
pub struct GridDescriptor {
    lats: Vec<f64>,
    lons: Vec<f64>,
    dlat: Option<f64>,
    dlon: Option<f64>,
}

impl GridDescriptor {
    /// # Errors
    ///
    /// Returns [`SpatialError::InvalidGrid`] if an axis is empty, holds a
    /// non-finite value, is not strictly monotone, or is unevenly spaced.
    pub fn new(lats: Vec<f64>, lons: Vec<f64>) -> Result<Self, SpatialError> {
        let dlat = axis_spacing(&lats, "latitude")?;
        let dlon = axis_spacing(&lons, "longitude")?;
        Ok(Self {
            lats,
            lons,
            dlat,
            dlon,
        })
    }

    /// Overrides the cell size, `(dlat, dlon)` in degrees.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::InvalidGrid`] for a non-positive size.
    pub fn with_cell_size(mut self, dlat: f64, dlon: f64) -> Result<Self, SpatialError> {
        if !(dlat.is_finite() && dlat > 0.0 && dlon.is_finite() && dlon > 0.0) {
            return Err(SpatialError::InvalidGrid {
                reason: format!("cell size must be positive, got ({dlat}, {dlon})"),
            });
        }
        self.dlat = Some(dlat);
        self.dlon = Some(dlon);
        Ok(self)
    }

    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    pub fn n_lat(&self) -> usize {
        self.lats.len()
    }

    pub fn n_lon(&self) -> usize {
        self.lons.len()
    }

    pub fn n_cells(&self) -> usize {
        self.lats.len() * self.lons.len()
    }

    /// Flat row-major index of cell `(i_lat, i_lon)`.
    pub fn index(&self, i_lat: usize, i_lon: usize) -> usize {
        i_lat * self.lons.len() + i_lon
    }

    /// Cell size `(dlat, dlon)`.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::UnknownSpacing`] for a single-coordinate axis
    /// without an explicit cell size.
    pub fn cell_size(&self) -> Result<(f64, f64), SpatialError> {
        let dlat = self
            .dlat
            .ok_or(SpatialError::UnknownSpacing { axis: "latitude" })?;
        let dlon = self
            .dlon
            .ok_or(SpatialError::UnknownSpacing { axis: "longitude" })?;
        Ok((dlat, dlon))
    }

    /// Index of the latitude nearest to `lat` (first on ties).
    pub fn nearest_lat(&self, lat: f64) -> usize {
        nearest(&self.lats, lat)
    }

    /// Index of the longitude nearest to `lon` (first on ties).
    pub fn nearest_lon(&self, lon: f64) -> usize {
        nearest(&self.lons, lon)
    }

    /// Sub-grid over the given index ranges.
    pub(crate) fn slice(
        &self,
        lat_range: std::ops::Range<usize>,
        lon_range: std::ops::Range<usize>,
    ) -> Self {
        Self {
            lats: self.lats[lat_range].to_vec(),
            lons: self.lons[lon_range].to_vec(),
            dlat: self.dlat,
            dlon: self.dlon,
        }
    }
}

fn nearest(axis: &[f64], x: f64) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, &c) in axis.iter().enumerate() {
        let d = (c - x).abs();
        if d < best_dist {
            best = i;
            best_dist = d;
        }
    }
    best
}

fn axis_spacing(axis: &[f64], name: &str) -> Result<Option<f64>, SpatialError> {
    let invalid = |reason: String| SpatialError::InvalidGrid { reason };
    if axis.is_empty() {
        return Err(invalid(format!("{name} axis is empty")));
    }
    if axis.iter().any(|c| !c.is_finite()) {
        return Err(invalid(format!("{name} axis holds a non-finite value")));
    }
    if axis.len() == 1 {
        return Ok(None);
    }
    let step = axis[1] - axis[0];
    if step == 0.0 {
        return Err(invalid(format!("{name} axis repeats a coordinate")));
    }
    for w in axis.windows(2) {
        let d = w[1] - w[0];
        if d.signum() != step.signum() {
            return Err(invalid(format!("{name} axis is not monotone")));
        }
        if (d - step).abs() > SPACING_TOLERANCE * step.abs().max(1.0) {
            return Err(invalid(format!("{name} axis is not evenly spaced")));
        }
    }
    Ok(Some(step.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn descending_latitude_accepted() {
        let g = GridDescriptor::new(vec![52.0, 51.75, 51.5], vec![0.0, 0.25]).unwrap();
        let (dlat, dlon) = g.cell_size().unwrap();
        assert_relative_eq!(dlat, 0.25);
        assert_relative_eq!(dlon, 0.25);
        assert_eq!(g.n_cells(), 6);
        assert_eq!(g.index(2, 1), 5);
    }

    #[test]
    fn irregular_axis_rejected() {
        let err = GridDescriptor::new(vec![0.0, 1.0, 3.0], vec![0.0]).unwrap_err();
        assert!(matches!(err, SpatialError::InvalidGrid { .. }));
    }

    #[test]
    fn non_monotone_axis_rejected() {
        assert!(GridDescriptor::new(vec![0.0, 1.0, 0.0], vec![0.0]).is_err());
        assert!(GridDescriptor::new(vec![0.0, 0.0], vec![0.0]).is_err());
    }

    #[test]
    fn single_cell_needs_explicit_size() {
        let g = GridDescriptor::new(vec![10.0], vec![20.0]).unwrap();
        assert_eq!(
            g.cell_size().unwrap_err(),
            SpatialError::UnknownSpacing { axis: "latitude" }
        );
        let g = g.with_cell_size(0.1, 0.1).unwrap();
        assert_eq!(g.cell_size().unwrap(), (0.1, 0.1));
    }

    #[test]
    fn nearest_prefers_first_on_tie() {
        let g = GridDescriptor::new(vec![0.0, 1.0], vec![0.0, 1.0]).unwrap();
        assert_eq!(g.nearest_lat(0.5), 0);
        assert_eq!(g.nearest_lon(0.9), 1);
        assert_eq!(g.nearest_lon(-10.0), 0);
    }
}
