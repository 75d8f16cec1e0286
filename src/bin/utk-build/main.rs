//! utk-build - configure, build and test uToolkit

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use utoolkit_build::builder::BuildError;
use utoolkit_build::util::config::ConfigError;
use utoolkit_build::util::diagnostic::emit;
use utoolkit_build::util::Shell;

mod cli;
mod commands;

use cli::Cli;

/// Options shared by every command.
pub struct GlobalOptions {
    pub shell: Shell,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("utoolkit_build=debug")
    } else {
        EnvFilter::new("utoolkit_build=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let global_opts = GlobalOptions {
        shell: Shell::from_flags(cli.quiet, cli.verbose, cli.color),
    };

    if let Err(e) = run(&cli, &global_opts) {
        report(e, &global_opts.shell);
        std::process::exit(1);
    }
}

fn run(cli: &Cli, global_opts: &GlobalOptions) -> Result<()> {
    if cli.show_config {
        commands::show_config::execute(cli, global_opts)
    } else if cli.init_submodules {
        commands::submodules::execute(cli, global_opts)
    } else if cli.install {
        commands::install::execute(cli, global_opts)
    } else {
        commands::build::execute(cli, global_opts)
    }
}

fn report(err: anyhow::Error, shell: &Shell) {
    let err = match err.downcast::<ConfigError>() {
        Ok(config_err) => {
            eprintln!("{:?}", miette::Report::new(config_err));
            return;
        }
        Err(err) => err,
    };

    match err.downcast_ref::<BuildError>() {
        Some(build_err) => emit(&build_err.to_diagnostic(), shell.use_color()),
        None => shell.error(format!("{:#}", err)),
    }
}
