//! Directory-backed JSON inputs.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use cdi_calendar::Date;
use cdi_components::{FetchRequest, RetrieveError, Retriever};
use cdi_spatial::{GridDescriptor, GriddedDataset, GriddedSeries};
use cdi_timeseries::{Frequency, Reading};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::IoError;
use crate::validate::validate_variable_file;

/// On-disk layout of one variable.
///
/// `values` is the flattened `[time][lat][lon]` cube with `null` for gaps.
/// Hourly files repeat each date once per record and may list the hour of
/// each record in `hour`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct VariableFile {
    pub(crate) frequency: String,
    pub(crate) lat: Vec<f64>,
    pub(crate) lon: Vec<f64>,
    pub(crate) time: Vec<String>,
    pub(crate) values: Vec<Option<f64>>,
    #[serde(default)]
    pub(crate) hour: Option<Vec<u8>>,
}

/// Read one variable file into a gridded series.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if `path` does not exist,
/// [`IoError::Fs`] or [`IoError::Json`] if it cannot be read or decoded,
/// [`IoError::Validation`] for inconsistent content and
/// [`IoError::Calendar`] for an unparseable date.
pub fn read_variable(path: &Path) -> Result<GriddedSeries, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|e| IoError::Fs {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let file: VariableFile = serde_json::from_str(&text).map_err(|e| IoError::Json {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_variable_file(&file).finish()?;

    let frequency = Frequency::from_str(&file.frequency).map_err(|e| IoError::Validation {
        count: 1,
        details: e.to_string(),
    })?;
    let times = file
        .time
        .iter()
        .map(|s| Date::from_str(s))
        .collect::<Result<Vec<_>, _>>()?;
    if let Some(hours) = &file.hour {
        check_hourly_order(&times, hours)?;
    }
    let grid = GridDescriptor::new(file.lat, file.lon).map_err(invalid)?;
    let values = file.values.into_iter().map(Reading::from).collect();
    let series = GriddedSeries::new(grid, times, frequency, values).map_err(invalid)?;

    debug!(
        path = %path.display(),
        %frequency,
        n_times = series.n_times(),
        n_cells = series.grid().n_cells(),
        "variable read"
    );
    Ok(series)
}

/// Hourly records must be strictly ordered by `(date, hour)`, so no hour
/// is counted twice in a daily mean.
fn check_hourly_order(times: &[Date], hours: &[u8]) -> Result<(), IoError> {
    let records: Vec<(Date, u8)> = times.iter().copied().zip(hours.iter().copied()).collect();
    match records.windows(2).find(|w| w[0] >= w[1]) {
        Some(w) => Err(IoError::Validation {
            count: 1,
            details: format!(
                "hourly record {} {:02}h is not after {} {:02}h",
                w[1].0, w[1].1, w[0].0, w[0].1
            ),
        }),
        None => Ok(()),
    }
}

fn invalid(e: impl ToString) -> IoError {
    IoError::Validation {
        count: 1,
        details: e.to_string(),
    }
}

/// A [`Retriever`] reading `<dir>/<variable>.json`.
///
/// A file named `<variable>_<frequency>.json` (e.g. `swvl1_monthly.json`)
/// takes precedence when the request asks for that frequency, so one
/// variable can be served at several resolutions.
#[derive(Debug, Clone)]
pub struct JsonRetriever {
    dir: PathBuf,
}

impl JsonRetriever {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File serving `variable` at `frequency`.
    pub fn variable_path(&self, variable: &str, frequency: Frequency) -> PathBuf {
        let specific = self.dir.join(format!("{variable}_{frequency}.json"));
        if specific.exists() {
            specific
        } else {
            self.dir.join(format!("{variable}.json"))
        }
    }
}

impl Retriever for JsonRetriever {
    fn fetch(&self, request: &FetchRequest) -> Result<GriddedDataset, RetrieveError> {
        let mut dataset = GriddedDataset::new();
        for variable in &request.variables {
            let path = self.variable_path(variable, request.frequency);
            let series = read_variable(&path).map_err(|e| match e {
                IoError::FileNotFound { .. } => RetrieveError::NotFound {
                    variable: variable.clone(),
                },
                other => RetrieveError::Unavailable {
                    reason: other.to_string(),
                },
            })?;
            let cropped = series.crop_time(request.start, request.end);
            info!(
                variable = variable.as_str(),
                path = %path.display(),
                n_times = cropped.n_times(),
                "fetched"
            );
            dataset
                .insert(variable.clone(), cropped)
                .map_err(|e| RetrieveError::Unavailable {
                    reason: e.to_string(),
                })?;
        }
        Ok(dataset)
    }
}
