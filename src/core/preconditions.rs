use std::path::Path;

use anyhow::{Result, bail};
use tracing::debug;

use super::{
    git,
    runner::{CommandRunner, CommandSpec, OutputMode},
};
use crate::config::SyncConfig;

/// Run the startup gates in order and report whether `dir` is already a git
/// working copy. Any failed gate is fatal.
///
/// # Errors
/// Returns an error if the directory, git, or the version sub-directory is missing.
pub fn verify(dir: &Path, cfg: &SyncConfig, runner: &dyn CommandRunner) -> Result<bool> {
    if !dir.is_dir() {
        bail!(
            "Cura configuration directory not found at {}; start Cura once to create it",
            dir.display()
        );
    }

    let version_check = CommandSpec::new(&cfg.git_program, ["--version"]);
    let installed = runner
        .run(&version_check, OutputMode::Capture)
        .map(|o| o.success())
        .unwrap_or(false);
    if !installed {
        bail!("{} is not installed or not on PATH", cfg.git_program);
    }

    let versioned = dir.join(&cfg.version_dir);
    if !versioned.is_dir() {
        bail!(
            "unsupported Cura version: expected {} to exist",
            versioned.display()
        );
    }

    let initialized = git::is_repository(dir);
    debug!(dir = %dir.display(), initialized, "preconditions satisfied");
    Ok(initialized)
}
