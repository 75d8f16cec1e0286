//! utk-config - author uToolkit build configurations

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use utoolkit_build::util::shell::{ColorChoice, Shell};

mod cli;
mod commands;

use cli::Cli;

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

    let shell = Shell::from_flags(false, cli.verbose, ColorChoice::Auto);

    if let Err(e) = run(&cli, &shell) {
        shell.error(format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(cli: &Cli, shell: &Shell) -> Result<()> {
    if cli.create_configs {
        commands::create_configs::execute(cli, shell)
    } else if cli.interactive {
        commands::interactive::execute(cli, shell)
    } else {
        commands::usage::execute();
        Ok(())
    }
}
