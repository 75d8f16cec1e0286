//! Test utilities and mocks for unit tests.
//!
//! [`MockExecutor`] stands in for the real process executor: it records every
//! invocation with its working directory and replays canned results matched by
//! command pattern.
//!
//! # Example
//!
//! ```rust,ignore
//! use utoolkit_build::test_support::{MockExecutor, MockProcessOutput};
//!
//! let mut exec = MockExecutor::new();
//! exec.expect_prefix("ctest", MockProcessOutput::failure(8, "2 tests failed"));
//! exec.set_default(MockProcessOutput::success(""));
//! ```

pub mod fixtures;

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::util::process::Invocation;
use crate::util::process::{ProcessExecutor, ProcessOutput, ProcessStatus};

pub use fixtures::*;

/// Mock process output for testing command execution.
#[derive(Debug, Clone)]
pub struct MockProcessOutput {
    /// Exit status code (0 = success).
    pub status: i32,
    /// Standard output.
    pub stdout: String,
    /// Standard error.
    pub stderr: String,
}

impl MockProcessOutput {
    /// Create a successful output with the given stdout.
    pub fn success(stdout: impl Into<String>) -> Self {
        MockProcessOutput {
            status: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Create a failure output with the given stderr and status code.
    pub fn failure(status: i32, stderr: impl Into<String>) -> Self {
        MockProcessOutput {
            status,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    fn to_output(&self) -> ProcessOutput {
        ProcessOutput {
            status: ProcessStatus::from_code(self.status),
            stdout: self.stdout.clone(),
            stderr: self.stderr.clone(),
        }
    }
}

impl Default for MockProcessOutput {
    fn default() -> Self {
        MockProcessOutput::success("")
    }
}

/// Pattern for matching commands in MockExecutor.
#[derive(Debug, Clone)]
pub enum CommandPattern {
    /// Exact match on full command string.
    Exact(String),
    /// Match if command starts with prefix.
    StartsWith(String),
    /// Match any command.
    Any,
}

impl CommandPattern {
    /// Check if this pattern matches the given command.
    pub fn matches(&self, cmd: &str) -> bool {
        match self {
            CommandPattern::Exact(s) => cmd == s,
            CommandPattern::StartsWith(s) => cmd.starts_with(s),
            CommandPattern::Any => true,
        }
    }
}

/// Expectation for a command execution.
#[derive(Debug, Clone)]
pub struct CommandExpectation {
    pub pattern: CommandPattern,
    pub output: MockProcessOutput,
    /// Number of times this expectation can be used (None = unlimited).
    pub times: Option<usize>,
    pub used: usize,
}

impl CommandExpectation {
    pub fn new(pattern: CommandPattern, output: MockProcessOutput) -> Self {
        CommandExpectation {
            pattern,
            output,
            times: None,
            used: 0,
        }
    }

    pub fn times(mut self, n: usize) -> Self {
        self.times = Some(n);
        self
    }

    fn available(&self) -> bool {
        self.times.map_or(true, |n| self.used < n)
    }
}

/// One recorded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub command: String,
    pub cwd: PathBuf,
    /// Whether output was captured rather than inherited.
    pub captured: bool,
}

/// Mock process executor for testing command execution.
///
/// Commands are matched against their display form, e.g.
/// `cmake --build /tmp/build --config Release --parallel 4`.
#[derive(Debug, Default)]
pub struct MockExecutor {
    expectations: Vec<CommandExpectation>,
    calls: Vec<RecordedCall>,
    default_output: Option<MockProcessOutput>,
    missing_tools: Vec<String>,
}

impl MockExecutor {
    pub fn new() -> Self {
        MockExecutor::default()
    }

    /// Executor where every command succeeds with empty output.
    pub fn succeeding() -> Self {
        let mut exec = MockExecutor::new();
        exec.set_default(MockProcessOutput::success(""));
        exec
    }

    /// Add an expectation for an exact command match.
    pub fn expect(&mut self, cmd: &str, output: MockProcessOutput) -> &mut Self {
        self.expect_pattern(CommandExpectation::new(
            CommandPattern::Exact(cmd.to_string()),
            output,
        ))
    }

    /// Add an expectation for a command starting with a prefix.
    pub fn expect_prefix(&mut self, prefix: &str, output: MockProcessOutput) -> &mut Self {
        self.expect_pattern(CommandExpectation::new(
            CommandPattern::StartsWith(prefix.to_string()),
            output,
        ))
    }

    pub fn expect_pattern(&mut self, expectation: CommandExpectation) -> &mut Self {
        self.expectations.push(expectation);
        self
    }

    /// Set a default output for commands that don't match any expectation.
    pub fn set_default(&mut self, output: MockProcessOutput) -> &mut Self {
        self.default_output = Some(output);
        self
    }

    /// Pretend `program` is not installed: running it fails to spawn.
    pub fn missing_tool(&mut self, program: &str) -> &mut Self {
        self.missing_tools.push(program.to_string());
        self
    }

    fn run(&mut self, invocation: &Invocation, cwd: &Path, captured: bool) -> Result<ProcessOutput> {
        let command = invocation.to_string();
        self.calls.push(RecordedCall {
            command: command.clone(),
            cwd: cwd.to_path_buf(),
            captured,
        });

        if self.missing_tools.contains(&invocation.program) {
            bail!("`{}` not found in PATH", invocation.program);
        }

        for exp in &mut self.expectations {
            if exp.pattern.matches(&command) && exp.available() {
                exp.used += 1;
                return Ok(exp.output.to_output());
            }
        }

        if let Some(ref default) = self.default_output {
            return Ok(default.to_output());
        }

        bail!("unexpected command: {}", command)
    }

    /// Commands that were called, in order.
    pub fn commands(&self) -> Vec<&str> {
        self.calls.iter().map(|c| c.command.as_str()).collect()
    }

    pub fn calls(&self) -> &[RecordedCall] {
        &self.calls
    }

    /// Whether any recorded command starts with `prefix`.
    pub fn ran(&self, prefix: &str) -> bool {
        self.calls.iter().any(|c| c.command.starts_with(prefix))
    }

    /// Verify that all expectations with a specific count were satisfied.
    pub fn verify(&self) -> Result<()> {
        for (i, exp) in self.expectations.iter().enumerate() {
            if let Some(expected) = exp.times {
                if exp.used != expected {
                    bail!(
                        "expectation {} was used {} times, expected {}",
                        i,
                        exp.used,
                        expected
                    );
                }
            }
        }
        Ok(())
    }
}

impl ProcessExecutor for MockExecutor {
    fn status(&mut self, invocation: &Invocation, cwd: &Path) -> Result<ProcessStatus> {
        Ok(self.run(invocation, cwd, false)?.status)
    }

    fn output(&mut self, invocation: &Invocation, cwd: &Path) -> Result<ProcessOutput> {
        self.run(invocation, cwd, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_executor_matching() {
        let mut exec = MockExecutor::new();
        exec.expect("cmake --version", MockProcessOutput::success("cmake version 3.28.1"));
        exec.expect_prefix("ctest", MockProcessOutput::failure(8, ""));

        let out = exec
            .output(&Invocation::new("cmake").arg("--version"), Path::new("/b"))
            .unwrap();
        assert!(out.stdout.contains("3.28.1"));

        let status = exec
            .status(&Invocation::new("ctest").arg("-j").arg("2"), Path::new("/b"))
            .unwrap();
        assert_eq!(status.code(), Some(8));

        assert_eq!(exec.commands(), vec!["cmake --version", "ctest -j 2"]);
        assert_eq!(exec.calls()[1].cwd, Path::new("/b"));
        assert!(exec.calls()[0].captured);
    }

    #[test]
    fn test_mock_executor_unexpected_command() {
        let mut exec = MockExecutor::new();
        let result = exec.status(&Invocation::new("git"), Path::new("."));
        assert!(result.is_err());
    }

    #[test]
    fn test_mock_executor_times() {
        let mut exec = MockExecutor::new();
        exec.expect_pattern(
            CommandExpectation::new(CommandPattern::Any, MockProcessOutput::success("")).times(1),
        );
        exec.set_default(MockProcessOutput::failure(1, ""));

        let inv = Invocation::new("cmake");
        assert!(exec.status(&inv, Path::new(".")).unwrap().success());
        assert!(!exec.status(&inv, Path::new(".")).unwrap().success());
        exec.verify().unwrap();
    }

    #[test]
    fn test_missing_tool() {
        let mut exec = MockExecutor::succeeding();
        exec.missing_tool("ctest");
        let err = exec
            .status(&Invocation::new("ctest"), Path::new("."))
            .unwrap_err();
        assert!(err.to_string().contains("not found in PATH"));
        assert_eq!(exec.commands(), vec!["ctest"]);
    }
}
