//! JSON result writer.

use std::fs;
use std::path::Path;

use cdi_calendar::Date;
use serde::Serialize;
use tracing::info;

use crate::error::IoError;

/// Text layout of written results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Compact single-line JSON.
    #[default]
    Json,
    /// Indented JSON.
    JsonPretty,
}

/// Configuration for writing results.
#[derive(Debug, Clone, Default)]
pub struct WriterConfig {
    format: OutputFormat,
    /// Replace an existing file instead of keeping it.
    overwrite: bool,
}

impl WriterConfig {
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

/// What [`write_json`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// The file existed and was left untouched.
    AlreadyExists,
}

/// Write `value` as JSON to `path`, creating parent directories.
///
/// An existing file is kept unless the config allows overwriting. The file
/// appears only once fully written: content goes to a sibling temporary file
/// that is then renamed into place.
///
/// # Errors
///
/// Returns [`IoError::Json`] if serialisation fails and [`IoError::Fs`] if
/// the file cannot be written.
pub fn write_json<T: Serialize>(
    path: &Path,
    value: &T,
    config: &WriterConfig,
) -> Result<WriteOutcome, IoError> {
    if path.exists() && !config.overwrite {
        info!(path = %path.display(), "output already exists, skipping");
        return Ok(WriteOutcome::AlreadyExists);
    }
    let fs_err = |e: std::io::Error| IoError::Fs {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let text = match config.format {
        OutputFormat::Json => serde_json::to_string(value),
        OutputFormat::JsonPretty => serde_json::to_string_pretty(value),
    }
    .map_err(|e| IoError::Json {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(fs_err)?;
    }
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp = Path::new(&tmp_name);
    fs::write(tmp, text.as_bytes()).map_err(fs_err)?;
    fs::rename(tmp, path).map_err(fs_err)?;

    info!(path = %path.display(), bytes = text.len(), "output written");
    Ok(WriteOutcome::Written)
}

/// `<prefix>_<YYYYMMDD>-<YYYYMMDD>_<label>.json`.
pub fn output_file_name(prefix: &str, start: Date, end: Date, label: &str) -> String {
    format!("{prefix}_{}-{}_{label}.json", compact(start), compact(end))
}

fn compact(d: Date) -> String {
    format!("{:04}{:02}{:02}", d.year(), d.month(), d.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = WriterConfig::default();
        assert_eq!(config.format(), OutputFormat::Json);
        assert!(!config.overwrite);
    }

    #[test]
    fn builder_methods() {
        let config = WriterConfig::default()
            .with_format(OutputFormat::JsonPretty)
            .with_overwrite(true);
        assert_eq!(config.format, OutputFormat::JsonPretty);
        assert!(config.overwrite);
    }

    #[test]
    fn file_name_is_compact() {
        let name = output_file_name(
            "cdi",
            Date::new(2020, 4, 1).unwrap(),
            Date::new(2020, 5, 31).unwrap(),
            "52.5_1.25",
        );
        assert_eq!(name, "cdi_20200401-20200531_52.5_1.25.json");
    }
}
