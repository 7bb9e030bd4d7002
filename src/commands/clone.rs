use anyhow::Result;
use tracing::info;

use super::{Command, run_step};
use crate::{
    app::context::AppContext,
    core::{
        companion,
        git::{self, RemoteUrl},
    },
    error::SyncError,
};

pub struct CloneCommand<'a> {
    pub url: Option<&'a str>,
}

impl Command for CloneCommand<'_> {
    fn run(&self, ctx: &AppContext) -> Result<()> {
        let url = RemoteUrl::from_arg(self.url)?;
        let dir = &ctx.config_dir;

        let question = format!(
            "This replaces {} with a clone of {url}. The current contents are moved to a backup. Continue?",
            dir.display()
        );
        if !ctx.prompter.confirm(&question, Some(false))? {
            return Err(SyncError::declined("clone").into());
        }

        companion::ensure_stopped(ctx)?;

        let backup = git::backup_and_clear(dir, git::timestamp_millis())?;
        info!(backup = %backup.display(), "moved configuration aside");
        println!("Backed up {} to {}", dir.display(), backup.display());

        // No automatic restore: on failure the backup stays where it is.
        if let Err(err) = run_step(ctx, &ctx.git(["clone", url.as_str(), "."])) {
            eprintln!(
                "Clone failed. Your previous configuration is in {}",
                backup.display()
            );
            return Err(err);
        }

        println!("Cloned {url} into {}", dir.display());
        Ok(())
    }
}
