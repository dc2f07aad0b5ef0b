//! Confirmation policies consulted by the pruner before each deletion.

use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::path::Path;

use crate::error::{LinkreapError, Result};

/// Decides whether an unused directory may be deleted
pub trait Confirm {
    /// Answer for the directory at `relative` (path relative to the source root)
    fn confirm(&mut self, relative: &Path) -> Result<bool>;
}

/// Always answers yes without asking (`--no-confirm`)
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoConfirm;

impl Confirm for AutoConfirm {
    fn confirm(&mut self, _relative: &Path) -> Result<bool> {
        Ok(true)
    }
}

/// Always answers no
#[derive(Debug, Default, Clone, Copy)]
pub struct Deny;

impl Confirm for Deny {
    fn confirm(&mut self, _relative: &Path) -> Result<bool> {
        Ok(false)
    }
}

/// Asks on `output` and blocks on a line from `input`. Only `y` (any case) is yes.
pub struct Interactive<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Interactive<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl Interactive<std::io::StdinLock<'static>, std::io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> Confirm for Interactive<R, W> {
    fn confirm(&mut self, _relative: &Path) -> Result<bool> {
        write!(self.output, "Do you want to delete this directory? (y/n): ")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            return Err(LinkreapError::Prompt("input closed".to_string()));
        }
        Ok(line.trim().eq_ignore_ascii_case("y"))
    }
}

/// Replays a fixed sequence of answers, then answers no
#[derive(Debug, Default, Clone)]
pub struct Scripted {
    answers: VecDeque<bool>,
    asked: Vec<std::path::PathBuf>,
}

impl Scripted {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    /// Directories asked about so far, in order
    pub fn asked(&self) -> &[std::path::PathBuf] {
        &self.asked
    }
}

impl Confirm for Scripted {
    fn confirm(&mut self, relative: &Path) -> Result<bool> {
        self.asked.push(relative.to_path_buf());
        Ok(self.answers.pop_front().unwrap_or(false))
    }
}
