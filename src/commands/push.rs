use anyhow::Result;
use console::style;
use tracing::{debug, warn};

use super::{Command, require_repository};
use crate::{
    app::context::AppContext,
    core::{companion, git, runner::OutputMode},
    error::SyncError,
};

pub struct PushCommand;

impl Command for PushCommand {
    fn run(&self, ctx: &AppContext) -> Result<()> {
        require_repository(ctx)?;

        // Cura may only flush its settings when it exits, so closing it first is
        // recommended but not required.
        if let Some(pid) = companion::find(ctx)? {
            let question = format!(
                "Cura is running (pid {pid}) and may not have saved its settings yet. Close it before pushing?"
            );
            if ctx.prompter.confirm(&question, Some(true))? {
                companion::terminate(ctx, pid)?;
            } else {
                warn!(pid, "pushing while Cura is running");
            }
        }

        let status = ctx
            .runner
            .run_checked(&ctx.git(["status", "--porcelain"]), OutputMode::Capture)?;
        if status.stdout.trim().is_empty() {
            return Err(SyncError::NothingToPush.into());
        }
        debug!(changes = status.stdout.lines().count(), "working copy is dirty");

        ctx.runner
            .run_checked(&ctx.git(["add", "-A"]), OutputMode::Inherit)?;

        println!("{}", style("Changes to be pushed:").bold());
        ctx.runner
            .run_checked(&ctx.git(["diff", "--cached", "--stat"]), OutputMode::Inherit)?;

        let message = ctx.prompter.ask("Commit message", None)?;
        let message = git::tagged_message(&message);

        ctx.runner
            .run_checked(&ctx.git(["commit", "-m", message.as_str()]), OutputMode::Inherit)?;
        ctx.runner
            .run_checked(&ctx.git(["push"]), OutputMode::Inherit)?;
        Ok(())
    }
}
