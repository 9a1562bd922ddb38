use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level CDI configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CdiConfig {
    /// Region and analysis period.
    pub request: RequestToml,

    /// Calibration period of the fitted components.
    #[serde(default)]
    pub baseline: BaselineToml,

    /// Component sources.
    #[serde(default)]
    pub sources: SourcesToml,

    /// I/O settings.
    #[serde(default)]
    pub io: IoToml,
}

impl CdiConfig {
    /// Reads and parses a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("failed to parse config: {}", path.display()))
    }
}

/// A coordinate given either once or as a list.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Coordinates {
    Scalar(f64),
    List(Vec<f64>),
}

impl Coordinates {
    pub fn to_vec(&self) -> Vec<f64> {
        match self {
            Self::Scalar(v) => vec![*v],
            Self::List(v) => v.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequestToml {
    pub latitude: Coordinates,
    pub longitude: Coordinates,
    /// `YYYYMMDD` or `YYYY-MM-DD`.
    pub start: String,
    pub end: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BaselineToml {
    #[serde(default = "default_baseline_start")]
    pub start: String,
    /// Defaults to the last day of the previous month.
    #[serde(default)]
    pub end: Option<String>,
}

impl Default for BaselineToml {
    fn default() -> Self {
        Self {
            start: default_baseline_start(),
            end: None,
        }
    }
}

fn default_baseline_start() -> String {
    "19850101".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourcesToml {
    #[serde(default = "default_spi_source")]
    pub spi: String,
    #[serde(default = "default_sma_source")]
    pub sma: String,
    #[serde(default = "default_sma_variable")]
    pub sma_variable: String,
    /// Accumulation scale of the fitted SPI, in months.
    #[serde(default = "default_spi_scale")]
    pub spi_scale: usize,
}

impl Default for SourcesToml {
    fn default() -> Self {
        Self {
            spi: default_spi_source(),
            sma: default_sma_source(),
            sma_variable: default_sma_variable(),
            spi_scale: default_spi_scale(),
        }
    }
}

fn default_spi_source() -> String {
    "fitted".to_string()
}
fn default_sma_source() -> String {
    "product".to_string()
}
fn default_sma_variable() -> String {
    "swvl1".to_string()
}
fn default_spi_scale() -> usize {
    1
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    /// Directory read by the JSON retriever.
    #[serde(default = "default_input")]
    pub input: PathBuf,
    /// Directory receiving results.
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default = "default_format")]
    pub format: String,
    /// Grid cell size override `[dlat, dlon]`.
    #[serde(default)]
    pub cell_size: Option<[f64; 2]>,
}

impl Default for IoToml {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
            format: default_format(),
            cell_size: None,
        }
    }
}

fn default_input() -> PathBuf {
    PathBuf::from("data")
}
fn default_output() -> PathBuf {
    PathBuf::from("output")
}
fn default_format() -> String {
    "json".to_string()
}
