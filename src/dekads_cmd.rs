//! Dekads command: print the dekad starts covering a date range.

use std::io::{self, Write};

use anyhow::{Context, Result};

use cdi_calendar::generate;

use crate::cli::DekadsArgs;
use crate::convert;

/// Print one dekad start per line, `YYYY-MM-DD`.
pub fn run(args: DekadsArgs) -> Result<()> {
    let start = convert::parse_date("start", &args.start)?;
    let end = convert::parse_date("end", &args.end)?;
    let grid = generate(start, end).context("cannot build dekad grid")?;

    let mut out = io::stdout().lock();
    for date in grid.iter() {
        writeln!(out, "{date}")?;
    }
    Ok(())
}
