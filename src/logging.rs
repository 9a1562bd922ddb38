use tracing_subscriber::EnvFilter;

/// All workspace crate targets that should receive log output.
const CRATE_TARGETS: &[&str] = &[
    "cdi",
    "cdi_calendar",
    "cdi_components",
    "cdi_compose",
    "cdi_io",
    "cdi_spatial",
    "cdi_stats",
    "cdi_timeseries",
];

/// Level applied to [`CRATE_TARGETS`] for a `-v` count.
fn level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn default_filter(verbosity: u8) -> String {
    let level = level(verbosity);
    CRATE_TARGETS
        .iter()
        .map(|t| format!("{t}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize tracing based on CLI verbosity level.
///
/// `RUST_LOG` overrides the CLI flag if set.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
