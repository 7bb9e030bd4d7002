//! In-crate fakes for exercising commands without git, a terminal, or Cura.

use std::{
    cell::RefCell,
    collections::VecDeque,
    fs,
    path::{Path, PathBuf},
    rc::Rc,
};

use anyhow::{Result, anyhow};
use tempfile::TempDir;

use crate::{
    app::context::AppContext,
    config::SyncConfig,
    core::{
        companion::Terminator,
        platform::Platform,
        prompt::Prompter,
        runner::{CommandOutcome, CommandRunner, CommandSpec, OutputMode},
    },
};

#[derive(Clone, Debug)]
pub struct Call {
    pub spec: CommandSpec,
    pub mode: OutputMode,
    /// Whether the watched directory existed and was empty when the call ran.
    pub watched_empty: Option<bool>,
}

#[derive(Default)]
struct RunnerState {
    responses: Vec<(Option<String>, Vec<String>, CommandOutcome)>,
    calls: Vec<Call>,
    watch: Option<PathBuf>,
}

/// Records every command and replies from a script. Unscripted commands
/// succeed with empty output, except `pgrep`, which reports "not running".
#[derive(Clone, Default)]
pub struct FakeRunner(Rc<RefCell<RunnerState>>);

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply with `code`/`stdout` to any command whose args start with `args`.
    pub fn respond<I, S>(self, args: I, code: i32, stdout: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.borrow_mut().responses.push((
            None,
            args.into_iter().map(Into::into).collect(),
            CommandOutcome {
                code: Some(code),
                stdout: stdout.to_string(),
            },
        ));
        self
    }

    /// Pretend Cura is running as `pid`.
    pub fn with_companion(self, pid: u32) -> Self {
        self.0.borrow_mut().responses.push((
            Some("pgrep".to_string()),
            Vec::new(),
            CommandOutcome {
                code: Some(0),
                stdout: format!("{pid}\n"),
            },
        ));
        self
    }

    /// Record the state of `dir` at every later call.
    pub fn watch(&self, dir: &Path) {
        self.0.borrow_mut().watch = Some(dir.to_path_buf());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().calls.clone()
    }

    /// Argument lists of every `git` invocation, in order.
    pub fn git_calls(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter(|c| c.spec.program == "git")
            .map(|c| c.spec.args)
            .collect()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, cmd: &CommandSpec, mode: OutputMode) -> Result<CommandOutcome> {
        let mut state = self.0.borrow_mut();
        let watched_empty = state
            .watch
            .as_ref()
            .map(|dir| fs::read_dir(dir).is_ok_and(|mut entries| entries.next().is_none()));
        state.calls.push(Call {
            spec: cmd.clone(),
            mode,
            watched_empty,
        });

        let scripted = state.responses.iter().find(|(program, prefix, _)| {
            program.as_ref().is_none_or(|p| *p == cmd.program) && cmd.args.starts_with(prefix)
        });
        Ok(match scripted {
            Some((_, _, outcome)) => outcome.clone(),
            None if cmd.program == "pgrep" => CommandOutcome {
                code: Some(1),
                stdout: String::new(),
            },
            None => CommandOutcome {
                code: Some(0),
                stdout: String::new(),
            },
        })
    }
}

/// Answers prompts from a fixed list; running out is an error.
#[derive(Clone, Default)]
pub struct ScriptedPrompter {
    answers: Rc<RefCell<VecDeque<String>>>,
    prompts: Rc<RefCell<Vec<String>>>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Rc::new(RefCell::new(answers.into_iter().map(Into::into).collect())),
            prompts: Rc::default(),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn read_line(&self, prompt: &str) -> Result<String> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow!("no scripted answer for {prompt:?}"))
    }
}

#[derive(Clone, Default)]
pub struct RecordingTerminator(Rc<RefCell<Vec<u32>>>);

impl Terminator for RecordingTerminator {
    fn terminate(&self, pid: u32) -> Result<()> {
        self.0.borrow_mut().push(pid);
        Ok(())
    }
}

/// A throwaway Cura directory wired to fakes.
pub struct TestContext {
    pub ctx: AppContext,
    pub runner: FakeRunner,
    pub prompter: ScriptedPrompter,
    pub terminator: RecordingTerminator,
    pub root: TempDir,
}

impl TestContext {
    pub fn new<I, S>(runner: FakeRunner, answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let root = tempfile::tempdir().expect("tempdir");
        let dir = root.path().join("cura");
        fs::create_dir_all(dir.join("5.7")).expect("create version dir");
        fs::write(dir.join("5.7").join("cura.cfg"), "[general]\nversion = 7\n")
            .expect("write cura.cfg");

        let cfg = SyncConfig {
            grace_period: std::time::Duration::ZERO,
            ..SyncConfig::default()
        };
        let prompter = ScriptedPrompter::new(answers);
        let terminator = RecordingTerminator::default();
        let ctx = AppContext::new(Platform::Linux, dir, false, cfg, 0)
            .with_runner(Box::new(runner.clone()))
            .with_prompter(Box::new(prompter.clone()))
            .with_terminator(Box::new(terminator.clone()));

        Self {
            ctx,
            runner,
            prompter,
            terminator,
            root,
        }
    }

    /// Mark the directory as an existing working copy.
    pub fn initialized(mut self) -> Self {
        fs::create_dir_all(self.ctx.config_dir.join(".git")).expect("create .git");
        self.ctx.git_initialized = true;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.ctx.config_dir
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompter.prompts()
    }

    pub fn terminated(&self) -> Vec<u32> {
        self.terminator.0.borrow().clone()
    }

    /// Entries next to the configuration directory other than itself.
    pub fn siblings(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.root.path())
            .expect("read root")
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|n| n != "cura")
            .collect();
        names.sort();
        names
    }
}
