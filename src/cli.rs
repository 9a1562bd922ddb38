use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Combined Drought Indicator.
#[derive(Parser)]
#[command(
    name = "cdi",
    version,
    about = "Combined Drought Indicator from SPI, soil moisture and fAPAR anomalies"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Compute the composite indicator for the configured request.
    Run(RunArgs),
    /// Compute a single component without composing.
    Index(IndexArgs),
    /// Print the dekad starts covering a date range.
    Dekads(DekadsArgs),
}

/// Arguments for the `run` subcommand.
#[derive(clap::Args)]
pub struct RunArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "cdi.toml")]
    pub config: PathBuf,

    /// Override the output file path.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Replace an existing output file.
    #[arg(long)]
    pub overwrite: bool,
}

/// Arguments for the `index` subcommand.
#[derive(clap::Args)]
pub struct IndexArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "cdi.toml")]
    pub config: PathBuf,

    /// Component to compute: spi, sma or fapar.
    #[arg(long)]
    pub component: String,

    /// Override the output file path.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Replace an existing output file.
    #[arg(long)]
    pub overwrite: bool,
}

/// Arguments for the `dekads` subcommand.
#[derive(clap::Args)]
pub struct DekadsArgs {
    /// First date, `YYYYMMDD` or `YYYY-MM-DD`.
    #[arg(long)]
    pub start: String,

    /// Last date, `YYYYMMDD` or `YYYY-MM-DD`.
    #[arg(long)]
    pub end: String,
}
