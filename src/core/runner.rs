use std::{
    fmt,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use anyhow::{Context, Result};
use tracing::debug;

use crate::error::SyncError;

/// How a child process's output is handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputMode {
    /// Collect stdout for inspection; stderr is discarded.
    Capture,
    /// Stream stdout/stderr straight to the terminal.
    Inherit,
}

/// An external command to run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: None,
        }
    }

    #[must_use]
    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Result of a finished child process.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Exit code, `None` if the process was killed by a signal.
    pub code: Option<i32>,
    /// Captured stdout; empty in [`OutputMode::Inherit`].
    pub stdout: String,
}

impl CommandOutcome {
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }
}

/// Runs external commands. Swapped for a recording fake in tests.
pub trait CommandRunner {
    /// Run `cmd` to completion.
    ///
    /// # Errors
    /// Returns an error only if the process could not be spawned or waited on;
    /// a non-zero exit is reported through [`CommandOutcome::code`].
    fn run(&self, cmd: &CommandSpec, mode: OutputMode) -> Result<CommandOutcome>;

    /// Run `cmd` and turn a non-zero exit into [`SyncError::ExternalCommand`].
    ///
    /// # Errors
    /// Returns an error if spawning fails or the command exits unsuccessfully.
    fn run_checked(&self, cmd: &CommandSpec, mode: OutputMode) -> Result<CommandOutcome> {
        let outcome = self.run(cmd, mode)?;
        if outcome.success() {
            Ok(outcome)
        } else {
            Err(SyncError::ExternalCommand {
                command: cmd.to_string(),
                code: outcome.code,
            }
            .into())
        }
    }
}

/// Runs commands with `std::process::Command`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, cmd: &CommandSpec, mode: OutputMode) -> Result<CommandOutcome> {
        debug!(command = %cmd, ?mode, "running");

        let mut command = Command::new(&cmd.program);
        command.args(&cmd.args);
        if let Some(dir) = &cmd.cwd {
            command.current_dir(dir);
        }

        match mode {
            OutputMode::Capture => {
                let output = command
                    .stdin(Stdio::null())
                    .stderr(Stdio::null())
                    .output()
                    .with_context(|| format!("failed to run {cmd}"))?;
                Ok(CommandOutcome {
                    code: output.status.code(),
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                })
            }
            OutputMode::Inherit => {
                let status = command
                    .stdin(Stdio::inherit())
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit())
                    .status()
                    .with_context(|| format!("failed to run {cmd}"))?;
                Ok(CommandOutcome {
                    code: status.code(),
                    stdout: String::new(),
                })
            }
        }
    }
}
