//! `utk-build --show-config`

use anyhow::Result;

use super::load_document;
use crate::cli::Cli;
use crate::GlobalOptions;
use utoolkit_build::core::platform;
use utoolkit_build::ops::show_config::render;

pub fn execute(cli: &Cli, global_opts: &GlobalOptions) -> Result<()> {
    let doc = load_document(cli, &global_opts.shell)?;
    print!(
        "{}",
        render(&doc, &platform::detect(), platform::default_generator())
    );
    Ok(())
}
