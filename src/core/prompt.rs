use std::io::{self, BufRead};

use anyhow::{Context, Result, bail};
use console::{Term, style};

/// Source of interactive answers.
///
/// Implementors provide [`Prompter::read_line`]; `confirm` and `ask` build the
/// re-prompting rules on top of it.
pub trait Prompter {
    /// Show `prompt` and read one line, without the trailing newline.
    ///
    /// # Errors
    /// Returns an error if input is closed or unreadable.
    fn read_line(&self, prompt: &str) -> Result<String>;

    /// Tell the user why their answer was rejected.
    fn reject(&self, _message: &str) {}

    /// Ask a yes/no question. Only `y` and `n` are accepted (case-insensitive);
    /// empty input yields `default`, or repeats the question when there is none.
    ///
    /// # Errors
    /// Returns an error if reading input fails.
    fn confirm(&self, question: &str, default: Option<bool>) -> Result<bool> {
        let hint = match default {
            Some(true) => "[Y/n]",
            Some(false) => "[y/N]",
            None => "[y/n]",
        };
        let prompt = format!("{question} {hint} ");

        loop {
            let answer = self.read_line(&prompt)?;
            match (answer.trim().to_lowercase().as_str(), default) {
                ("y", _) => return Ok(true),
                ("n", _) => return Ok(false),
                ("", Some(d)) => return Ok(d),
                _ => self.reject("Please answer y or n."),
            }
        }
    }

    /// Ask for free text. Blank input (empty or whitespace only) yields
    /// `default`, or repeats the question when there is none. Other input is
    /// returned verbatim.
    ///
    /// # Errors
    /// Returns an error if reading input fails.
    fn ask(&self, question: &str, default: Option<&str>) -> Result<String> {
        let prompt = match default {
            Some(d) => format!("{question} ({d}): "),
            None => format!("{question}: "),
        };

        loop {
            let answer = self.read_line(&prompt)?;
            if !answer.trim().is_empty() {
                return Ok(answer);
            }
            if let Some(d) = default {
                return Ok(d.to_string());
            }
            self.reject("An answer is required.");
        }
    }
}

/// Prompts on the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn read_line(&self, prompt: &str) -> Result<String> {
        let term = Term::stdout();
        term.write_str(&format!("{} {prompt}", style("?").cyan().bold()))
            .context("failed to write prompt")?;
        term.flush().context("failed to flush prompt")?;

        let mut buffer = String::new();
        let bytes = io::stdin()
            .lock()
            .read_line(&mut buffer)
            .context("failed to read from stdin")?;
        if bytes == 0 {
            bail!("stdin closed while waiting for an answer");
        }

        let trimmed = buffer.trim_end_matches(['\r', '\n']).len();
        buffer.truncate(trimmed);
        Ok(buffer)
    }

    fn reject(&self, message: &str) {
        eprintln!("{}", style(message).yellow());
    }
}
