pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;

#[cfg(test)]
mod testing;

use anyhow::Result;
use console::style;

use crate::{app::context::AppContext, cli::Cli, error::SyncError};

/// Entry point: resolve the context once, run the subcommand, return the exit code.
#[must_use]
pub fn run(cli: &Cli) -> u8 {
    let result =
        AppContext::bootstrap(cli.verbose).and_then(|ctx| commands::dispatch(cli, &ctx));
    report(result)
}

/// Run the subcommand against an already-resolved context.
#[must_use]
pub fn execute(cli: &Cli, ctx: &AppContext) -> u8 {
    report(commands::dispatch(cli, ctx))
}

/// Report a command-line parse failure. `--help` and `--version` exit 0;
/// any other parse error is a usage error and exits 1.
#[must_use]
pub fn report_parse_error(err: &clap::Error) -> u8 {
    let _ = err.print();
    u8::from(err.use_stderr())
}

/// Print the outcome and map it to an exit code. Usage errors get a short
/// message; anything else is reported with its full context chain.
fn report(result: Result<()>) -> u8 {
    let Err(err) = result else {
        return 0;
    };

    match err.downcast_ref::<SyncError>() {
        Some(sync) => {
            eprintln!("{}", style(sync).red());
            if matches!(sync, SyncError::UnrecognizedCommand(_)) {
                print!("{}", cli::help_text());
            }
            sync.exit_code()
        }
        None => {
            eprintln!("{} {err:#}", style("error:").red().bold());
            1
        }
    }
}
