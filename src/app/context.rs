use std::path::PathBuf;

use anyhow::Result;
use tracing::debug;

use crate::{
    config::SyncConfig,
    core::{
        companion::{SignalTerminator, Terminator},
        platform::Platform,
        preconditions,
        prompt::{Prompter, TerminalPrompter},
        runner::{CommandRunner, CommandSpec, SystemRunner},
    },
};

/// Everything a command needs, resolved once at startup.
pub struct AppContext {
    pub platform: Platform,
    pub config_dir: PathBuf,
    pub git_initialized: bool,
    pub cfg: SyncConfig,
    pub verbosity: u8,
    pub runner: Box<dyn CommandRunner>,
    pub prompter: Box<dyn Prompter>,
    pub terminator: Box<dyn Terminator>,
}

impl AppContext {
    pub fn new(
        platform: Platform,
        config_dir: PathBuf,
        git_initialized: bool,
        cfg: SyncConfig,
        verbosity: u8,
    ) -> Self {
        Self {
            platform,
            config_dir,
            git_initialized,
            cfg,
            verbosity,
            runner: Box::new(SystemRunner),
            prompter: Box::new(TerminalPrompter),
            terminator: Box::new(SignalTerminator),
        }
    }

    #[must_use]
    pub fn with_runner(mut self, runner: Box<dyn CommandRunner>) -> Self {
        self.runner = runner;
        self
    }

    #[must_use]
    pub fn with_prompter(mut self, prompter: Box<dyn Prompter>) -> Self {
        self.prompter = prompter;
        self
    }

    #[must_use]
    pub fn with_terminator(mut self, terminator: Box<dyn Terminator>) -> Self {
        self.terminator = terminator;
        self
    }

    /// Resolve the platform and configuration directory, then run the startup gates.
    ///
    /// # Errors
    /// Returns an error if the platform is unsupported or any precondition fails.
    pub fn bootstrap(verbosity: u8) -> Result<Self> {
        let cfg = SyncConfig::load();
        let platform = Platform::current()?;
        let config_dir = match &cfg.dir_override {
            Some(dir) => dir.clone(),
            None => platform.config_dir(&whoami::username()),
        };
        debug!(%platform, dir = %config_dir.display(), "resolved configuration directory");

        let git_initialized = preconditions::verify(&config_dir, &cfg, &SystemRunner)?;
        Ok(Self::new(platform, config_dir, git_initialized, cfg, verbosity))
    }

    /// A git invocation rooted in the configuration directory.
    pub fn git<I, S>(&self, args: I) -> CommandSpec
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandSpec::new(&self.cfg.git_program, args).current_dir(&self.config_dir)
    }
}
