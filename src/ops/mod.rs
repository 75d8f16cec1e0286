//! High-level operations.
//!
//! This module contains the implementation of the `utk-build` and
//! `utk-config` commands.

pub mod create_configs;
pub mod interactive;
pub mod show_config;
pub mod utk_build;

pub use create_configs::{create_configs, CreateConfigsResult};
pub use interactive::interactive_config;
pub use utk_build::{build, init_submodules, install, BuildOptions};
