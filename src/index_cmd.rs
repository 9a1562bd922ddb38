//! Index command: compute one component on its own.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, info_span};

use cdi_components::IndexComponent;
use cdi_compose::{IndexRecord, component_records};
use cdi_io::{output_file_name, write_json};
use cdi_spatial::SelectionKind;

use crate::cli::IndexArgs;
use crate::config::CdiConfig;
use crate::convert;

/// Serialized single-component result.
#[derive(Debug, Serialize)]
struct IndexOutput {
    component: &'static str,
    variant: &'static str,
    lag: usize,
    records: Vec<IndexRecord>,
}

/// Compute the requested component over the request window and write it.
pub fn run(args: IndexArgs) -> Result<()> {
    let _cmd = info_span!("index", component = args.component.as_str()).entered();
    // 1. Load project TOML
    let config = CdiConfig::load(&args.config)?;
    let kind = convert::parse_component(&args.component)?;

    // 2. Build request context and component
    let ctx = Arc::new(convert::build_context(&config)?);
    let sources = convert::build_sources(&config.sources)?;
    let source = sources.of(kind);
    let writer_cfg = convert::build_writer_config(&config.io, args.overwrite)?;
    let point = ctx.selection().kind() == SelectionKind::Point;
    let (start, end) = (ctx.window().start(), ctx.window().end());
    let label = ctx.selection().label();
    let mut component = IndexComponent::for_kind(kind, source, ctx.window(), Arc::clone(&ctx))
        .with_context(|| format!("cannot build {kind} component"))?;

    // 3. Resolve output path
    let path = args.output.unwrap_or_else(|| {
        config
            .io
            .output
            .join(output_file_name(kind.as_str(), start, end, &label))
    });
    if path.exists() && !args.overwrite {
        info!(path = %path.display(), "result already computed");
        return Ok(());
    }

    // 4. Download and process
    component
        .download()
        .with_context(|| format!("{kind} download failed"))?;
    let series = component
        .process()
        .with_context(|| format!("{kind} processing failed"))?;
    let output = IndexOutput {
        component: kind.as_str(),
        variant: series.variant().name(),
        lag: series.lag(),
        records: component_records(series, point),
    };
    info!(n_records = output.records.len(), "component computed");

    // 5. Write
    write_json(&path, &output, &writer_cfg)
        .with_context(|| format!("failed to write result: {}", path.display()))?;
    Ok(())
}
