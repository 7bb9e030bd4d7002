//! Guard against the Cura desktop application writing its configuration while
//! we rearrange it underneath.

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use super::{
    platform::Platform,
    runner::{CommandOutcome, CommandSpec, OutputMode},
};
use crate::{app::context::AppContext, error::SyncError};

/// Sends a termination request to a process.
pub trait Terminator {
    /// Ask process `pid` to exit.
    ///
    /// # Errors
    /// Returns an error if the request could not be delivered.
    fn terminate(&self, pid: u32) -> Result<()>;
}

/// SIGTERM on unix, `taskkill` on windows.
#[derive(Clone, Copy, Debug, Default)]
pub struct SignalTerminator;

impl Terminator for SignalTerminator {
    #[cfg(unix)]
    fn terminate(&self, pid: u32) -> Result<()> {
        use nix::{
            sys::signal::{self, Signal},
            unistd::Pid,
        };

        let raw = i32::try_from(pid).with_context(|| format!("pid {pid} out of range"))?;
        signal::kill(Pid::from_raw(raw), Signal::SIGTERM)
            .with_context(|| format!("failed to send SIGTERM to {pid}"))
    }

    #[cfg(not(unix))]
    fn terminate(&self, pid: u32) -> Result<()> {
        let status = std::process::Command::new("taskkill")
            .args(["/PID", &pid.to_string()])
            .status()
            .context("failed to run taskkill")?;
        if !status.success() {
            bail!("taskkill /PID {pid} exited with status {status}");
        }
        Ok(())
    }
}

/// Command used to look up `name` on `platform`.
#[must_use]
pub fn lookup_command(platform: Platform, name: &str) -> CommandSpec {
    match platform {
        Platform::Windows => CommandSpec::new(
            "tasklist",
            [
                "/FI".to_string(),
                format!("IMAGENAME eq {name}"),
                "/FO".to_string(),
                "CSV".to_string(),
                "/NH".to_string(),
            ],
        ),
        Platform::Linux | Platform::MacOs => CommandSpec::new("pgrep", ["-x", name]),
    }
}

/// Interpret the lookup result: `Ok(None)` when not running, the pid when
/// found, and an error for anything the lookup tool should never produce.
///
/// # Errors
/// Returns an error on unexpected exit codes or unparsable output.
pub fn parse_lookup(platform: Platform, outcome: &CommandOutcome) -> Result<Option<u32>> {
    match platform {
        Platform::Windows => {
            if !outcome.success() {
                bail!("unexpected process lookup result: tasklist exited with {:?}", outcome.code);
            }
            let Some(line) = outcome.stdout.lines().map(str::trim).find(|l| !l.is_empty()) else {
                return Ok(None);
            };
            if line.starts_with("INFO:") {
                return Ok(None);
            }
            // "Image Name","PID","Session Name","Session#","Mem Usage"
            let pid = line
                .split(',')
                .nth(1)
                .map(|field| field.trim_matches('"'))
                .with_context(|| format!("unexpected process lookup output: {line}"))?;
            pid.parse()
                .map(Some)
                .with_context(|| format!("unexpected process lookup output: {line}"))
        }
        Platform::Linux | Platform::MacOs => match outcome.code {
            Some(1) if outcome.stdout.trim().is_empty() => Ok(None),
            Some(0) => {
                let first = outcome.stdout.lines().next().unwrap_or("").trim();
                first
                    .parse()
                    .map(Some)
                    .with_context(|| format!("unexpected process lookup output: {first:?}"))
            }
            code => bail!("unexpected process lookup result: pgrep exited with {code:?}"),
        },
    }
}

/// Pid of the running Cura instance, if any.
///
/// # Errors
/// Returns an error if the lookup tool cannot run or behaves unexpectedly.
pub fn find(ctx: &AppContext) -> Result<Option<u32>> {
    let cmd = lookup_command(ctx.platform, &ctx.cfg.process_name);
    let outcome = ctx.runner.run(&cmd, OutputMode::Capture)?;
    let pid = parse_lookup(ctx.platform, &outcome)?;
    debug!(process = %ctx.cfg.process_name, ?pid, "companion lookup");
    Ok(pid)
}

/// Terminate `pid` and wait out the grace period.
///
/// # Errors
/// Returns an error if the termination request fails.
pub fn terminate(ctx: &AppContext, pid: u32) -> Result<()> {
    ctx.terminator.terminate(pid)?;
    info!(pid, "requested Cura shutdown");
    if !ctx.cfg.grace_period.is_zero() {
        std::thread::sleep(ctx.cfg.grace_period);
    }
    Ok(())
}

/// Make sure Cura is not running, offering to close it.
///
/// # Errors
/// Returns [`SyncError::Declined`] if the user keeps Cura running.
pub fn ensure_stopped(ctx: &AppContext) -> Result<()> {
    let Some(pid) = find(ctx)? else {
        return Ok(());
    };

    let question = format!("Cura is running (pid {pid}). Close it now?");
    if !ctx.prompter.confirm(&question, Some(true))? {
        return Err(SyncError::declined("Cura must be closed first").into());
    }
    terminate(ctx, pid)
}
