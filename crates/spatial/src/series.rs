//! Gridded time series and region extraction.

use std::collections::BTreeMap;

use cdi_calendar::Date;
use cdi_timeseries::{Frequency, Reading, TimeSeries};
use rayon::prelude::*;
use tracing::debug;

use crate::error::SpatialError;
use crate::grid::GridDescriptor;
use crate::mask::{InclusionMask, mask_region};
use crate::selection::SpatialSelection;

/// A `[time][lat][lon]` cube of readings.
///
/// The time axis is strictly increasing, except for hourly data where each
/// date repeats once per record.
#[derive(Debug, Clone, PartialEq)]
pub struct GriddedSeries {
    grid: GridDescriptor,
    times: Vec<Date>,
    frequency: Frequency,
    values: Vec<Reading>,
}

impl GriddedSeries {
    /// # Errors
    ///
    /// Returns [`SpatialError::ShapeMismatch`] if `values` does not hold one
    /// reading per time and cell, and a time series error if the time axis
    /// is out of order.
    pub fn new(
        grid: GridDescriptor,
        times: Vec<Date>,
        frequency: Frequency,
        values: Vec<Reading>,
    ) -> Result<Self, SpatialError> {
        let expected = times.len() * grid.n_cells();
        if values.len() != expected {
            return Err(SpatialError::ShapeMismatch {
                expected,
                actual: values.len(),
            });
        }
        check_time_axis(&times, frequency)?;
        Ok(Self {
            grid,
            times,
            frequency,
            values,
        })
    }

    /// Assembles a cube from one series per cell, row-major.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::ShapeMismatch`] if the number of series does
    /// not match the grid, and [`SpatialError::InvalidGrid`] if the series
    /// do not share one time axis.
    pub fn from_cells(
        grid: GridDescriptor,
        frequency: Frequency,
        cells: Vec<TimeSeries>,
    ) -> Result<Self, SpatialError> {
        if cells.len() != grid.n_cells() {
            return Err(SpatialError::ShapeMismatch {
                expected: grid.n_cells(),
                actual: cells.len(),
            });
        }
        let times = cells.first().map(|c| c.times().to_vec()).unwrap_or_default();
        if cells.iter().any(|c| c.times() != times.as_slice()) {
            return Err(SpatialError::InvalidGrid {
                reason: "cell series do not share a time axis".to_string(),
            });
        }
        let n_cells = cells.len();
        let mut values = vec![Reading::Missing; times.len() * n_cells];
        for (k, cell) in cells.iter().enumerate() {
            for (t, &v) in cell.values().iter().enumerate() {
                values[t * n_cells + k] = v;
            }
        }
        Ok(Self {
            grid,
            times,
            frequency,
            values,
        })
    }

    pub fn grid(&self) -> &GridDescriptor {
        &self.grid
    }

    pub fn times(&self) -> &[Date] {
        &self.times
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn values(&self) -> &[Reading] {
        &self.values
    }

    pub fn n_times(&self) -> usize {
        self.times.len()
    }

    /// Reading at time step `t` of cell `(i_lat, i_lon)`.
    pub fn at(&self, t: usize, i_lat: usize, i_lon: usize) -> Reading {
        self.values[t * self.grid.n_cells() + self.grid.index(i_lat, i_lon)]
    }

    /// All readings of one cell in time order.
    pub fn cell_values(&self, i_lat: usize, i_lon: usize) -> Vec<Reading> {
        let n_cells = self.grid.n_cells();
        let k = self.grid.index(i_lat, i_lon);
        (0..self.times.len())
            .map(|t| self.values[t * n_cells + k])
            .collect()
    }

    /// One cell as a [`TimeSeries`].
    ///
    /// # Errors
    ///
    /// Fails for hourly data, whose dates repeat; aggregate it first.
    pub fn cell_series(&self, i_lat: usize, i_lon: usize) -> Result<TimeSeries, SpatialError> {
        Ok(TimeSeries::new(
            self.times.clone(),
            self.cell_values(i_lat, i_lon),
        )?)
    }

    /// Replaces every reading of cells outside `mask` with `Outside`.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::ShapeMismatch`] if the mask is for another grid.
    pub fn apply_mask(&self, mask: &InclusionMask) -> Result<Self, SpatialError> {
        self.check_mask(mask)?;
        let n_cells = self.grid.n_cells();
        let values = self
            .values
            .iter()
            .enumerate()
            .map(|(k, &v)| if mask.cells()[k % n_cells] { v } else { Reading::Outside })
            .collect();
        Ok(Self {
            values,
            ..self.clone()
        })
    }

    /// Shrinks the cube to the smallest block holding the mask's cells.
    ///
    /// Returns the cropped cube and the mask restricted to the same block.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::ShapeMismatch`] for a mask of another grid.
    /// An empty mask yields [`SpatialError::InvalidGrid`].
    pub fn crop_to_mask(
        &self,
        mask: &InclusionMask,
    ) -> Result<(Self, InclusionMask), SpatialError> {
        self.check_mask(mask)?;
        let (lat_range, lon_range) = mask.index_bounds().ok_or(SpatialError::InvalidGrid {
            reason: "cannot crop to an empty mask".to_string(),
        })?;
        let grid = self.grid.slice(lat_range.clone(), lon_range.clone());
        let mut values = Vec::with_capacity(self.times.len() * grid.n_cells());
        for t in 0..self.times.len() {
            for i in lat_range.clone() {
                for j in lon_range.clone() {
                    values.push(self.at(t, i, j));
                }
            }
        }
        let cropped_mask = mask.slice(lat_range, lon_range);
        Ok((
            Self {
                grid,
                times: self.times.clone(),
                frequency: self.frequency,
                values,
            },
            cropped_mask,
        ))
    }

    /// Applies `f` to every cell's records in parallel and reassembles.
    ///
    /// `f` receives the cell's `(i_lat, i_lon)`, the time axis and the
    /// cell's readings, and must return series sharing one time axis.
    ///
    /// # Errors
    ///
    /// Propagates the first error from `f`, or the errors of
    /// [`GriddedSeries::from_cells`].
    pub fn map_cells<F, E>(&self, frequency: Frequency, f: F) -> Result<Self, E>
    where
        F: Fn((usize, usize), &[Date], &[Reading]) -> Result<TimeSeries, E> + Sync,
        E: From<SpatialError> + Send,
    {
        let n_lon = self.grid.n_lon();
        let cells: Vec<TimeSeries> = (0..self.grid.n_cells())
            .into_par_iter()
            .map(|k| {
                let cell = (k / n_lon, k % n_lon);
                f(cell, &self.times, &self.cell_values(cell.0, cell.1))
            })
            .collect::<Result<_, E>>()?;
        debug!(n_cells = cells.len(), "mapped cells");
        Ok(Self::from_cells(self.grid.clone(), frequency, cells)?)
    }

    /// Time steps within `[start, end]` inclusive.
    pub fn crop_time(&self, start: Date, end: Date) -> Self {
        let lo = self.times.partition_point(|&d| d < start);
        let hi = self.times.partition_point(|&d| d <= end).max(lo);
        let n_cells = self.grid.n_cells();
        Self {
            grid: self.grid.clone(),
            times: self.times[lo..hi].to_vec(),
            frequency: self.frequency,
            values: self.values[lo * n_cells..hi * n_cells].to_vec(),
        }
    }

    fn check_mask(&self, mask: &InclusionMask) -> Result<(), SpatialError> {
        if mask.n_lat() != self.grid.n_lat() || mask.n_lon() != self.grid.n_lon() {
            return Err(SpatialError::ShapeMismatch {
                expected: self.grid.n_cells(),
                actual: mask.cells().len(),
            });
        }
        Ok(())
    }
}

fn check_time_axis(times: &[Date], frequency: Frequency) -> Result<(), SpatialError> {
    let bad = times.windows(2).find(|w| match frequency {
        Frequency::Hourly => w[0] > w[1],
        _ => w[0] >= w[1],
    });
    if let Some(w) = bad {
        return Err(cdi_timeseries::TimeSeriesError::Unordered {
            previous: w[0],
            next: w[1],
        }
        .into());
    }
    Ok(())
}

/// Masks `series` to `selection` and crops it to the selected block.
///
/// Cells inside the block but outside the region read `Outside`.
///
/// # Errors
///
/// Returns [`SpatialError::SelectionEmpty`] when nothing is selected, plus
/// the errors of [`mask_region`].
pub fn select_region(
    series: &GriddedSeries,
    selection: &SpatialSelection,
    cellsize: Option<(f64, f64)>,
) -> Result<(InclusionMask, GriddedSeries), SpatialError> {
    let mask = mask_region(series.grid(), selection, cellsize)?;
    let masked = series.apply_mask(&mask)?;
    let (cropped, cropped_mask) = masked.crop_to_mask(&mask)?;
    debug!(
        kind = %selection.kind(),
        n_cells = cropped_mask.count(),
        "region selected"
    );
    Ok((cropped_mask, cropped))
}

/// Named variables sharing one grid and time axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GriddedDataset {
    variables: BTreeMap<String, GriddedSeries>,
}

impl GriddedDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a variable.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::InvalidGrid`] if `series` does not share the
    /// grid and time axis of variables already present.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        series: GriddedSeries,
    ) -> Result<(), SpatialError> {
        if let Some(existing) = self.variables.values().next()
            && (existing.grid() != series.grid() || existing.times() != series.times())
        {
            return Err(SpatialError::InvalidGrid {
                reason: "dataset variables must share grid and time axis".to_string(),
            });
        }
        self.variables.insert(name.into(), series);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&GriddedSeries> {
        self.variables.get(name)
    }

    /// Removes and returns a variable.
    pub fn take(&mut self, name: &str) -> Option<GriddedSeries> {
        self.variables.remove(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
