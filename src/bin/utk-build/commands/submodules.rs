//! `utk-build --init-submodules`

use anyhow::Result;

use super::build_options;
use crate::cli::Cli;
use crate::GlobalOptions;
use utoolkit_build::ops::init_submodules;
use utoolkit_build::util::SystemExecutor;

pub fn execute(cli: &Cli, global_opts: &GlobalOptions) -> Result<()> {
    init_submodules(&build_options(cli), &mut SystemExecutor, &global_opts.shell)
}
