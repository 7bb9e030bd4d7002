use anyhow::Result;

use super::Command;
use crate::app::context::AppContext;

pub struct CwdCommand;

impl Command for CwdCommand {
    fn run(&self, ctx: &AppContext) -> Result<()> {
        println!("{}", ctx.config_dir.display());
        Ok(())
    }
}
