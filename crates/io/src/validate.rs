//! Accumulated validation of input files.
//!
//! Provides [`ValidationCollector`] for gathering multiple validation errors
//! into a single [`IoError::Validation`], plus the structural checks run on
//! every decoded variable file.

use std::str::FromStr;

use cdi_timeseries::Frequency;

use crate::error::IoError;
use crate::reader::VariableFile;

/// Accumulates validation errors and converts them into a single
/// [`IoError::Validation`].
///
/// Push zero or more messages, then call [`finish`](Self::finish) to get
/// `Ok(())` when everything is valid or one `Err` listing every violation.
pub(crate) struct ValidationCollector {
    errors: Vec<String>,
}

impl ValidationCollector {
    pub(crate) fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub(crate) fn push(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.errors.len()
    }

    /// The `details` string joins all messages with `"; "`.
    pub(crate) fn finish(self) -> Result<(), IoError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(IoError::Validation {
                count: self.errors.len(),
                details: self.errors.join("; "),
            })
        }
    }
}

/// Checks axis sizes, the value count and the optional hour axis.
///
/// Coordinate regularity and time ordering are checked when the grid and
/// series are built.
pub(crate) fn validate_variable_file(file: &VariableFile) -> ValidationCollector {
    let mut c = ValidationCollector::new();

    let frequency = Frequency::from_str(&file.frequency);
    if frequency.is_err() {
        c.push(format!("unknown frequency {:?}", file.frequency));
    }
    if file.lat.is_empty() {
        c.push("lat axis is empty");
    }
    if file.lon.is_empty() {
        c.push("lon axis is empty");
    }

    let expected = file.time.len() * file.lat.len() * file.lon.len();
    if file.values.len() != expected {
        c.push(format!(
            "values length {} != time x lat x lon = {expected}",
            file.values.len()
        ));
    }

    if let Some(hours) = &file.hour {
        if frequency.as_ref().is_ok_and(|f| *f != Frequency::Hourly) {
            c.push(format!("hour axis given for {} data", file.frequency));
        }
        if hours.len() != file.time.len() {
            c.push(format!(
                "hour length {} != time length {}",
                hours.len(),
                file.time.len()
            ));
        }
        if let Some(h) = hours.iter().find(|&&h| h > 23) {
            c.push(format!("hour {h} out of range 0..=23"));
        }
    }

    c
}
