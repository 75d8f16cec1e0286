//! Command implementations

pub mod build;
pub mod install;
pub mod show_config;
pub mod submodules;

use anyhow::Result;

use crate::cli::Cli;
use utoolkit_build::core::Document;
use utoolkit_build::ops::BuildOptions;
use utoolkit_build::util::config::{self, ConfigSource};
use utoolkit_build::util::Shell;

/// Translate CLI flags into build options.
pub fn build_options(cli: &Cli) -> BuildOptions {
    BuildOptions {
        source_dir: cli.source_dir.clone(),
        build_dir: cli.build_dir.clone(),
        jobs: cli.jobs,
        generator: cli.generator.clone(),
        clean: cli.clean,
        submodule_check: !cli.no_submodule_check,
    }
}

/// Load the configuration named on the command line.
pub fn load_document(cli: &Cli, shell: &Shell) -> Result<Document> {
    let (doc, source) = config::load(&cli.config)?;
    if source == ConfigSource::BuiltinDefault {
        shell.note(format!(
            "{} not found, using the built-in default configuration",
            cli.config.display()
        ));
    }
    Ok(doc)
}
