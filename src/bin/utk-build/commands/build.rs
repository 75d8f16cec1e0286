//! Default action: configure, build and test

use anyhow::Result;

use super::{build_options, load_document};
use crate::cli::Cli;
use crate::GlobalOptions;
use utoolkit_build::ops::build;
use utoolkit_build::util::{LinePrompter, SystemExecutor};

pub fn execute(cli: &Cli, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let doc = load_document(cli, shell)?;
    let opts = build_options(cli);

    let mut exec = SystemExecutor;
    let mut prompter = LinePrompter::stdio();
    // Failing tests were already reported and do not change the exit status.
    build(&doc, &opts, &mut exec, &mut prompter, shell)?;
    Ok(())
}
