mod bootstrap_helpers;
mod cli_args;
mod commands;
mod service_config;

use anyhow::Result;
use clap::Parser;

use crate::bootstrap_helpers::init_tracing;
use crate::cli_args::Cli;
use crate::commands::{render_outcome, run_cli};

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let outcome = run_cli(&cli)?;
    println!("{}", render_outcome(&outcome, cli.pretty)?);
    Ok(())
}
