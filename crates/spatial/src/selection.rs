//! Requested region: a point, a bounding box, or a polygon.

use std::fmt;

use crate::error::SpatialError;

/// Region semantics implied by the number of coordinate pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionKind {
    /// One pair: the nearest grid cell.
    Point,
    /// Two pairs: opposite corners of an inclusive box.
    BBox,
    /// Three or more pairs: polygon vertices.
    Polygon,
}

impl fmt::Display for SelectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Point => "point",
            Self::BBox => "bbox",
            Self::Polygon => "polygon",
        })
    }
}

/// Classifies a coordinate list by cardinality.
///
/// # Errors
///
/// Returns [`SpatialError::Configuration`] for an empty list.
pub fn classify(coords: &[(f64, f64)]) -> Result<SelectionKind, SpatialError> {
    match coords.len() {
        0 => Err(SpatialError::Configuration {
            reason: "no coordinates given".to_string(),
        }),
        1 => Ok(SelectionKind::Point),
        2 => Ok(SelectionKind::BBox),
        _ => Ok(SelectionKind::Polygon),
    }
}

/// Inclusive latitude/longitude bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl Bounds {
    /// Bounds grown by `dlat` and `dlon` on every side.
    pub fn expand(self, dlat: f64, dlon: f64) -> Self {
        Self {
            min_lat: self.min_lat - dlat,
            max_lat: self.max_lat + dlat,
            min_lon: self.min_lon - dlon,
            max_lon: self.max_lon + dlon,
        }
    }
}

/// An immutable region request as ordered `(lat, lon)` pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialSelection {
    kind: SelectionKind,
    coords: Vec<(f64, f64)>,
}

impl SpatialSelection {
    /// # Errors
    ///
    /// Returns [`SpatialError::Configuration`] for an empty list or a
    /// non-finite coordinate.
    pub fn new(coords: Vec<(f64, f64)>) -> Result<Self, SpatialError> {
        let kind = classify(&coords)?;
        if let Some(&(lat, lon)) = coords
            .iter()
            .find(|(lat, lon)| !lat.is_finite() || !lon.is_finite())
        {
            return Err(SpatialError::Configuration {
                reason: format!("non-finite coordinate ({lat}, {lon})"),
            });
        }
        Ok(Self { kind, coords })
    }

    /// Single-point selection.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::Configuration`] for a non-finite coordinate.
    pub fn point(lat: f64, lon: f64) -> Result<Self, SpatialError> {
        Self::new(vec![(lat, lon)])
    }

    /// Pairs parallel latitude and longitude lists.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::Configuration`] if the lists differ in length
    /// or are empty.
    pub fn from_lat_lon(lats: &[f64], lons: &[f64]) -> Result<Self, SpatialError> {
        if lats.len() != lons.len() {
            return Err(SpatialError::Configuration {
                reason: format!(
                    "{} latitudes but {} longitudes",
                    lats.len(),
                    lons.len()
                ),
            });
        }
        Self::new(lats.iter().copied().zip(lons.iter().copied()).collect())
    }

    pub fn kind(&self) -> SelectionKind {
        self.kind
    }

    pub fn coords(&self) -> &[(f64, f64)] {
        &self.coords
    }

    /// Smallest box containing every coordinate.
    pub fn bounds(&self) -> Bounds {
        let mut b = Bounds {
            min_lat: f64::INFINITY,
            max_lat: f64::NEG_INFINITY,
            min_lon: f64::INFINITY,
            max_lon: f64::NEG_INFINITY,
        };
        for &(lat, lon) in &self.coords {
            b.min_lat = b.min_lat.min(lat);
            b.max_lat = b.max_lat.max(lat);
            b.min_lon = b.min_lon.min(lon);
            b.max_lon = b.max_lon.max(lon);
        }
        b
    }

    /// Short label used in output file names, e.g. `52.5_1.25`.
    pub fn label(&self) -> String {
        let join = |f: fn(&(f64, f64)) -> f64| {
            self.coords
                .iter()
                .map(|c| f(c).to_string())
                .collect::<Vec<_>>()
                .join("-")
        };
        format!("{}_{}", join(|c| c.0), join(|c| c.1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_by_cardinality() {
        assert_eq!(classify(&[(0.0, 0.0)]).unwrap(), SelectionKind::Point);
        assert_eq!(classify(&[(0.0, 0.0), (1.0, 1.0)]).unwrap(), SelectionKind::BBox);
        assert_eq!(
            classify(&[(0.0, 0.0), (1.0, 1.0), (0.0, 1.0)]).unwrap(),
            SelectionKind::Polygon
        );
        assert!(classify(&[]).is_err());
    }

    #[test]
    fn from_lat_lon_rejects_mismatch() {
        let err = SpatialSelection::from_lat_lon(&[1.0, 2.0], &[3.0]).unwrap_err();
        assert_eq!(
            err,
            SpatialError::Configuration {
                reason: "2 latitudes but 1 longitudes".to_string()
            }
        );
    }

    #[test]
    fn rejects_nan() {
        assert!(SpatialSelection::point(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn bounds_of_bbox_corners_any_order() {
        let s = SpatialSelection::from_lat_lon(&[52.0, 50.0], &[-1.0, 2.0]).unwrap();
        let b = s.bounds();
        assert_eq!((b.min_lat, b.max_lat, b.min_lon, b.max_lon), (50.0, 52.0, -1.0, 2.0));
    }

    #[test]
    fn label_joins_coordinates() {
        let s = SpatialSelection::from_lat_lon(&[52.5, 50.0], &[1.25, 2.0]).unwrap();
        assert_eq!(s.label(), "52.5-50_1.25-2");
    }
}
