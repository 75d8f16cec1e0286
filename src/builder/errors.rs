//! Pipeline error types and diagnostics.

use std::path::PathBuf;

use thiserror::Error;

use crate::builder::plan::StepKind;
use crate::util::diagnostic::{suggestions, Diagnostic};
use crate::util::process::ProcessStatus;

/// Error while running the external build tools.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("configure step failed ({status})")]
    ConfigureFailed {
        command: String,
        status: ProcessStatus,
    },

    #[error("build step failed ({status})")]
    BuildFailed {
        command: String,
        status: ProcessStatus,
    },

    /// Only surfaced when a caller runs the test step on its own; inside the
    /// pipeline test failures are advisory.
    #[error("test step failed ({status})")]
    TestFailed {
        command: String,
        status: ProcessStatus,
    },

    #[error("install step failed ({status})")]
    InstallFailed {
        command: String,
        status: ProcessStatus,
    },

    #[error("failed to query submodule status: {message}")]
    SubmoduleQueryFailed { message: String },

    #[error("submodule initialization failed ({status})")]
    SubmoduleInitFailed {
        command: String,
        status: ProcessStatus,
    },

    #[error("failed to run `{command}`: {message}")]
    Spawn { command: String, message: String },

    #[error("{message}")]
    Filesystem { path: PathBuf, message: String },

    #[error("build directory `{}` has not been configured", path.display())]
    NotConfigured { path: PathBuf },
}

impl BuildError {
    /// The failure variant for a step of the given kind.
    pub fn step_failed(kind: StepKind, command: String, status: ProcessStatus) -> Self {
        match kind {
            StepKind::Configure => BuildError::ConfigureFailed { command, status },
            StepKind::Build => BuildError::BuildFailed { command, status },
            StepKind::Test => BuildError::TestFailed { command, status },
            StepKind::Install => BuildError::InstallFailed { command, status },
        }
    }

    pub(crate) fn filesystem(path: impl Into<PathBuf>, err: anyhow::Error) -> Self {
        BuildError::Filesystem {
            path: path.into(),
            message: format!("{:#}", err),
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string());
        match self {
            BuildError::ConfigureFailed { command, .. } => diag
                .with_context(format!("command: {}", command))
                .with_suggestion(suggestions::CONFIGURE_FAILED)
                .with_suggestion(suggestions::MISSING_SUBMODULES),

            BuildError::BuildFailed { command, .. } => diag
                .with_context(format!("command: {}", command))
                .with_suggestion(suggestions::BUILD_FAILED),

            BuildError::TestFailed { command, .. } => {
                diag.with_context(format!("command: {}", command))
            }

            BuildError::InstallFailed { command, .. } => diag
                .with_context(format!("command: {}", command))
                .with_suggestion(suggestions::INSTALL_PREFIX),

            BuildError::SubmoduleQueryFailed { .. } => diag,

            BuildError::SubmoduleInitFailed { command, .. } => diag
                .with_context(format!("command: {}", command))
                .with_suggestion("Check network access and the URLs in `.gitmodules`"),

            BuildError::Spawn { .. } => diag.with_suggestion(suggestions::TOOL_MISSING),

            BuildError::Filesystem { path, .. } => diag.with_location(path),

            BuildError::NotConfigured { path } => diag
                .with_location(path)
                .with_suggestion(suggestions::NOT_CONFIGURED),
        }
    }
}
