//! Pure conversion functions: TOML config structs -> crate API config types.

use std::sync::Arc;

use anyhow::{Context, Result, bail};

use crate::config::*;

use cdi_calendar::Date;
use cdi_components::{ComponentKind, ComponentSource, GammaFit, RequestContext, Window};
use cdi_compose::Sources;
use cdi_io::{JsonRetriever, OutputFormat, WriterConfig};
use cdi_spatial::SpatialSelection;

/// Parses a `YYYYMMDD` or `YYYY-MM-DD` date, naming the offending field.
pub fn parse_date(field: &str, s: &str) -> Result<Date> {
    s.parse::<Date>()
        .with_context(|| format!("invalid {field} date {s:?}"))
}

/// Parses a component source name string into the corresponding enum variant.
pub fn parse_source(s: &str) -> Result<ComponentSource> {
    match s.to_lowercase().as_str() {
        "fitted" => Ok(ComponentSource::Fitted),
        "product" => Ok(ComponentSource::Product),
        other => bail!("unknown component source: {other:?}"),
    }
}

/// Parses a component name string into the corresponding enum variant.
pub fn parse_component(s: &str) -> Result<ComponentKind> {
    match s.to_lowercase().as_str() {
        "spi" => Ok(ComponentKind::Spi),
        "sma" => Ok(ComponentKind::Sma),
        "fapar" => Ok(ComponentKind::Fapar),
        other => bail!("unknown component: {other:?}"),
    }
}

/// Parses an output format name string into the corresponding enum variant.
pub fn parse_format(s: &str) -> Result<OutputFormat> {
    match s.to_lowercase().as_str() {
        "json" => Ok(OutputFormat::Json),
        "json-pretty" => Ok(OutputFormat::JsonPretty),
        other => bail!("unknown output format: {other:?}"),
    }
}

/// Last day of the month before `today`.
pub fn default_baseline_end(today: Date) -> Date {
    today.first_of_month().prev()
}

fn today() -> Date {
    Date::from(chrono::Local::now().date_naive())
}

/// Builds a [`Window`] from two date strings.
pub fn build_window(name: &str, start: &str, end: &str) -> Result<Window> {
    let start = parse_date(&format!("{name} start"), start)?;
    let end = parse_date(&format!("{name} end"), end)?;
    Window::new(start, end).with_context(|| format!("invalid {name} window"))
}

/// Builds the [`RequestContext`] shared by every component of a request.
///
/// Inputs are read from `[io].input` through a [`JsonRetriever`].
pub fn build_context(config: &CdiConfig) -> Result<RequestContext> {
    let lats = config.request.latitude.to_vec();
    let lons = config.request.longitude.to_vec();
    let selection =
        SpatialSelection::from_lat_lon(&lats, &lons).context("invalid request region")?;

    let window = build_window("request", &config.request.start, &config.request.end)?;
    let baseline_end = match &config.baseline.end {
        Some(end) => parse_date("baseline end", end)?,
        None => default_baseline_end(today()),
    };
    let baseline_start = parse_date("baseline start", &config.baseline.start)?;
    let baseline =
        Window::new(baseline_start, baseline_end).context("invalid baseline window")?;

    if config.sources.spi_scale == 0 {
        bail!("spi_scale must be at least 1 month");
    }
    let cell_size = config.io.cell_size.map(|[dlat, dlon]| (dlat, dlon));

    let ctx = RequestContext::new(
        selection,
        window,
        baseline,
        Arc::new(JsonRetriever::new(&config.io.input)),
    )
    .with_cell_size(cell_size)
    .with_sma_variable(&config.sources.sma_variable)
    .with_fit(Arc::new(GammaFit::new(config.sources.spi_scale)));
    ctx.validate().context("invalid request")?;
    Ok(ctx)
}

/// Builds the component [`Sources`] from the TOML sources configuration.
pub fn build_sources(sources: &SourcesToml) -> Result<Sources> {
    Ok(Sources {
        spi: parse_source(&sources.spi)?,
        sma: parse_source(&sources.sma)?,
    })
}

/// Builds a [`WriterConfig`] from the TOML I/O configuration.
pub fn build_writer_config(io: &IoToml, overwrite: bool) -> Result<WriterConfig> {
    let format = parse_format(&io.format)?;
    Ok(WriterConfig::default()
        .with_format(format)
        .with_overwrite(overwrite))
}
