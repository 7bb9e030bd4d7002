use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use cura_sync::cli::Cli;
use cura_sync::logging::init::init_tracing;
use cura_sync::{report_parse_error, run};

fn main() -> Result<ExitCode> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return Ok(ExitCode::from(report_parse_error(&err))),
    };
    init_tracing(cli.verbose)?;
    Ok(ExitCode::from(run(&cli)))
}
