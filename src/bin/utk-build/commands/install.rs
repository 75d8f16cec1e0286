//! `utk-build --install`

use anyhow::Result;

use super::{build_options, load_document};
use crate::cli::Cli;
use crate::GlobalOptions;
use utoolkit_build::ops::install;
use utoolkit_build::util::SystemExecutor;

pub fn execute(cli: &Cli, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let doc = load_document(cli, shell)?;
    install(&doc, &build_options(cli), &mut SystemExecutor, shell)
}
