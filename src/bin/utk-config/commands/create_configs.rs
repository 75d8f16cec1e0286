//! `utk-config --create-configs`

use anyhow::Result;

use crate::cli::Cli;
use utoolkit_build::ops::create_configs;
use utoolkit_build::util::shell::{Shell, Status};

pub fn execute(cli: &Cli, shell: &Shell) -> Result<()> {
    let result = create_configs(&cli.dir)?;

    for path in &result.created {
        shell.status(Status::Created, path.display());
    }
    for path in &result.skipped {
        shell.status(Status::Skipped, format!("{} (already exists)", path.display()));
    }

    Ok(())
}
