//! Run command: compose the indicator for the configured request.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use cdi_compose::CdiPipeline;
use cdi_io::{WriteOutcome, output_file_name, write_json};

use crate::cli::RunArgs;
use crate::config::CdiConfig;
use crate::convert;

/// Run the full composition pipeline and write its records.
pub fn run(args: RunArgs) -> Result<()> {
    let _cmd = info_span!("run").entered();
    // 1. Load project TOML
    let config = CdiConfig::load(&args.config)?;

    // 2. Build request context and sources
    let ctx = Arc::new(convert::build_context(&config)?);
    let sources = convert::build_sources(&config.sources)?;
    let writer_cfg = convert::build_writer_config(&config.io, args.overwrite)?;
    let label = ctx.selection().label();

    // 3. Resolve output path; an existing result is reused
    let path = match args.output {
        Some(p) => p,
        None => config.io.output.join(output_file_name(
            "cdi",
            ctx.window().start(),
            ctx.window().end(),
            &label,
        )),
    };
    if path.exists() && !args.overwrite {
        info!(path = %path.display(), "result already computed");
        return Ok(());
    }

    // 4. Compose
    info!(
        region = %ctx.selection().kind(),
        window = %ctx.window(),
        input = %config.io.input.display(),
        "computing composite indicator"
    );
    let result = CdiPipeline::new(ctx)
        .with_sources(sources)
        .run()
        .context("composite indicator failed")?;

    // 5. Write
    let outcome = write_json(&path, &result, &writer_cfg)
        .with_context(|| format!("failed to write result: {}", path.display()))?;
    if outcome == WriteOutcome::Written {
        info!(
            path = %path.display(),
            n_records = result.records.len(),
            "result written"
        );
    }
    Ok(())
}
