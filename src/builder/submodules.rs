//! Git submodule status and initialization.
//!
//! Third-party sources live in git submodules. Before configuring, the build
//! checks for submodules that were never checked out; CMake would otherwise
//! fail much later with a less obvious error.

use std::fmt;
use std::path::Path;

use crate::builder::errors::BuildError;
use crate::builder::plan::Invocation;
use crate::util::process::ProcessExecutor;

const GIT: &str = "git";

/// State of one submodule as reported by `git submodule status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmoduleState {
    /// Checked out at the recorded commit.
    Current,
    /// Not initialized (`-`).
    Uninitialized,
    /// Checked out at a different commit (`+`).
    Modified,
    /// Merge conflicts (`U`).
    Conflict,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submodule {
    pub path: String,
    pub state: SubmoduleState,
}

impl fmt::Display for Submodule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// `git submodule status`
pub fn status_invocation() -> Invocation {
    Invocation::new(GIT).arg("submodule").arg("status")
}

/// `git submodule update --init --recursive`
pub fn init_invocation() -> Invocation {
    Invocation::new(GIT).args(["submodule", "update", "--init", "--recursive"])
}

/// Parse `git submodule status` output. Lines that do not look like status
/// entries are skipped.
pub fn parse_status(output: &str) -> Vec<Submodule> {
    output
        .lines()
        .filter_map(|line| {
            let mut chars = line.chars();
            let state = match chars.next()? {
                ' ' => SubmoduleState::Current,
                '-' => SubmoduleState::Uninitialized,
                '+' => SubmoduleState::Modified,
                'U' => SubmoduleState::Conflict,
                _ => return None,
            };
            let mut fields = chars.as_str().split_whitespace();
            let _sha = fields.next()?;
            let path = fields.next()?;
            Some(Submodule {
                path: path.to_string(),
                state,
            })
        })
        .collect()
}

/// Query submodule state in `source_dir`.
pub fn query<E: ProcessExecutor>(exec: &mut E, source_dir: &Path) -> Result<Vec<Submodule>, BuildError> {
    let invocation = status_invocation();
    let output = exec
        .output(&invocation, source_dir)
        .map_err(|e| BuildError::SubmoduleQueryFailed {
            message: format!("{:#}", e),
        })?;

    if !output.status.success() {
        let stderr = output.stderr.trim();
        return Err(BuildError::SubmoduleQueryFailed {
            message: if stderr.is_empty() {
                format!("`{}` exited with {}", invocation, output.status)
            } else {
                stderr.to_string()
            },
        });
    }

    let submodules = parse_status(&output.stdout);
    tracing::debug!("found {} submodule(s)", submodules.len());
    Ok(submodules)
}

/// Paths of submodules that have never been checked out.
pub fn uninitialized(submodules: &[Submodule]) -> Vec<&Submodule> {
    submodules
        .iter()
        .filter(|s| s.state == SubmoduleState::Uninitialized)
        .collect()
}

/// Initialize and update all submodules recursively, streaming git's output.
pub fn init<E: ProcessExecutor>(exec: &mut E, source_dir: &Path) -> Result<(), BuildError> {
    let invocation = init_invocation();
    let command = invocation.to_string();
    let status = exec
        .status(&invocation, source_dir)
        .map_err(|e| BuildError::Spawn {
            command: command.clone(),
            message: format!("{:#}", e),
        })?;

    if !status.success() {
        return Err(BuildError::SubmoduleInitFailed { command, status });
    }
    Ok(())
}
