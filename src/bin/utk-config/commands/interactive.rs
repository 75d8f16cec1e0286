//! `utk-config --interactive`

use anyhow::Result;

use crate::cli::Cli;
use utoolkit_build::ops::interactive_config;
use utoolkit_build::util::shell::{Shell, Status};
use utoolkit_build::util::LinePrompter;

pub fn execute(cli: &Cli, shell: &Shell) -> Result<()> {
    println!("uToolkit interactive configuration");
    println!("==================================");

    let mut prompter = LinePrompter::stdio();
    let path = interactive_config(&mut prompter, &cli.dir)?;

    shell.status(Status::Saved, path.display());
    Ok(())
}
