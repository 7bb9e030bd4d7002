use anyhow::Result;
use tracing::{debug, info};

use super::{Command, run_step};
use crate::{
    app::context::AppContext,
    core::{
        companion,
        git::{self, MAIN_BRANCH, RemoteUrl},
    },
    error::SyncError,
};

pub struct InitCommand<'a> {
    pub url: Option<&'a str>,
}

impl Command for InitCommand<'_> {
    fn run(&self, ctx: &AppContext) -> Result<()> {
        let dir = ctx.config_dir.display();

        let question = format!(
            "This commits everything in {dir} and pushes it to a remote repository. Continue?"
        );
        if !ctx.prompter.confirm(&question, Some(false))? {
            return Err(SyncError::declined("init").into());
        }

        companion::ensure_stopped(ctx)?;

        if ctx.git_initialized {
            let question =
                format!("{dir} is already a git repository. Discard its history and start over?");
            if !ctx.prompter.confirm(&question, Some(false))? {
                return Err(SyncError::declined("existing repository kept").into());
            }
        }

        let url = RemoteUrl::from_arg(self.url)?;
        publish(ctx, &url)?;

        println!("Published {dir} to {url}");
        Ok(())
    }
}

/// Create a fresh repository in the configuration directory and push it.
/// Steps run in order; a failure stops the sequence without undoing earlier steps.
fn publish(ctx: &AppContext, url: &RemoteUrl) -> Result<()> {
    git::remove_metadata(&ctx.config_dir)?;

    let initial = git::tagged_message("initial configuration");
    let steps: [Vec<&str>; 6] = [
        vec!["init"],
        vec!["remote", "add", "origin", url.as_str()],
        vec!["add", "-A"],
        vec!["commit", "-m", initial.as_str()],
        vec!["branch", "-M", MAIN_BRANCH],
        vec!["push", "-u", "origin", MAIN_BRANCH],
    ];
    for args in steps {
        let cmd = ctx.git(args);
        debug!(command = %cmd, "init step");
        run_step(ctx, &cmd)?;
    }

    // Written after the push so the ignore list is not part of the initial commit.
    let ignore = git::write_ignore_file(&ctx.config_dir)?;
    info!(path = %ignore.display(), "wrote ignore list");
    Ok(())
}
