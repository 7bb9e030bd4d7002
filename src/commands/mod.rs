use anyhow::{Result, bail};

use crate::{
    app::context::AppContext,
    cli::{Cli, Commands},
    core::runner::{CommandSpec, OutputMode},
    error::SyncError,
};

pub mod clone;
pub mod cwd;
pub mod help;
pub mod init;
pub mod pull;
pub mod push;

/// Unified interface implemented by each subcommand handler.
pub trait Command {
    /// Execute the subcommand.
    ///
    /// # Errors
    /// Returns an error if the command fails or the user aborts it.
    fn run(&self, ctx: &AppContext) -> Result<()>;
}

/// Central dispatcher: routes parsed CLI to subcommand handlers.
///
/// # Errors
/// Returns an error if the invoked subcommand fails.
pub fn dispatch(cli: &Cli, ctx: &AppContext) -> Result<()> {
    match &cli.command {
        None => help::HelpCommand { banner: true }.run(ctx),
        Some(Commands::Help) => help::HelpCommand { banner: false }.run(ctx),
        Some(Commands::Init { url }) => init::InitCommand {
            url: url.as_deref(),
        }
        .run(ctx),
        Some(Commands::Clone { url }) => clone::CloneCommand {
            url: url.as_deref(),
        }
        .run(ctx),
        Some(Commands::Pull) => pull::PullCommand.run(ctx),
        Some(Commands::Push) => push::PushCommand.run(ctx),
        Some(Commands::Cwd) => cwd::CwdCommand.run(ctx),
        Some(Commands::Unrecognized(words)) => {
            let word = words.first().cloned().unwrap_or_default();
            Err(SyncError::UnrecognizedCommand(word).into())
        }
    }
}

/// Fail with [`SyncError::NotInitialized`] unless the directory is a working copy.
pub(crate) fn require_repository(ctx: &AppContext) -> Result<()> {
    if ctx.git_initialized {
        Ok(())
    } else {
        Err(SyncError::NotInitialized(ctx.config_dir.display().to_string()).into())
    }
}

/// Run one step of a multi-step mutation with inherited output. A failing
/// step is fatal (exit 1) rather than propagating git's own exit code.
pub(crate) fn run_step(ctx: &AppContext, cmd: &CommandSpec) -> Result<()> {
    let outcome = ctx.runner.run(cmd, OutputMode::Inherit)?;
    if !outcome.success() {
        match outcome.code {
            Some(code) => bail!("`{cmd}` exited with status {code}"),
            None => bail!("`{cmd}` was terminated by a signal"),
        }
    }
    Ok(())
}
