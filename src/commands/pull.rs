use anyhow::Result;

use super::{Command, require_repository};
use crate::{app::context::AppContext, core::runner::OutputMode};

pub struct PullCommand;

impl Command for PullCommand {
    fn run(&self, ctx: &AppContext) -> Result<()> {
        require_repository(ctx)?;
        ctx.runner.run_checked(&ctx.git(["pull"]), OutputMode::Inherit)?;
        Ok(())
    }
}
