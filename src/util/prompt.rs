//! Line-based question/answer prompting.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

/// Capability to ask a human a question.
pub trait Prompter {
    /// Ask a question and return the trimmed answer. An empty string means the
    /// user accepted the default (or input has ended).
    fn ask(&mut self, question: &str) -> Result<String>;

    /// Ask a yes/no question.
    ///
    /// With a `true` default anything but an explicit no counts as yes; with a
    /// `false` default only an explicit yes does.
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        let hint = if default { "y" } else { "n" };
        let answer = self
            .ask(&format!("{} [y/n] (default: {}): ", question, hint))?
            .to_lowercase();
        Ok(if default {
            answer != "n" && answer != "no"
        } else {
            answer == "y" || answer == "yes"
        })
    }
}

/// Prompter over any line reader and writer; the CLI uses stdin and stdout.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        LinePrompter { input, output }
    }
}

impl LinePrompter<io::StdinLock<'static>, io::Stdout> {
    /// Prompter bound to the process's stdin and stdout.
    pub fn stdio() -> Self {
        LinePrompter::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}", question).context("failed to write prompt")?;
        self.output.flush().context("failed to write prompt")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read answer")?;
        if read == 0 {
            // EOF: keep the transcript readable and fall back to the default.
            writeln!(self.output).context("failed to write prompt")?;
        }
        Ok(line.trim().to_string())
    }
}

/// Prompter that replays canned answers, for non-interactive use and tests.
///
/// Once the script runs out every question gets the empty (default) answer.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    questions: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedPrompter {
            answers: answers.into_iter().map(Into::into).collect(),
            questions: Vec::new(),
        }
    }

    /// Questions asked so far, in order.
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    /// Answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, question: &str) -> Result<String> {
        self.questions.push(question.to_string());
        Ok(self
            .answers
            .pop_front()
            .map(|a| a.trim().to_string())
            .unwrap_or_default())
    }
}
