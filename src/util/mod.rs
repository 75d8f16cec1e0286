//! Shared utilities

pub mod config;
pub mod diagnostic;
pub mod fs;
pub mod process;
pub mod prompt;
pub mod shell;

pub use config::{ConfigError, ConfigSource};
pub use diagnostic::Diagnostic;
pub use process::{Invocation, ProcessExecutor, SystemExecutor};
pub use prompt::{LinePrompter, Prompter, ScriptedPrompter};
pub use shell::Shell;
