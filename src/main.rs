mod cli;
mod config;
mod convert;
mod dekads_cmd;
mod index_cmd;
mod logging;
mod run_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Run(args) => run_cmd::run(args),
        Command::Index(args) => index_cmd::run(args),
        Command::Dekads(args) => dekads_cmd::run(args),
    }
}
