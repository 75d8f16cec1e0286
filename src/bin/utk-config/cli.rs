//! CLI definitions using clap.

use std::path::PathBuf;

use clap::Parser;

/// Author uToolkit build configuration files
#[derive(Parser)]
#[command(name = "utk-config")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Write the default, minimal and full presets (existing files are kept)
    #[arg(long)]
    pub create_configs: bool,

    /// Build a configuration by answering questions
    #[arg(long)]
    pub interactive: bool,

    /// Show usage examples
    #[arg(long)]
    pub usage: bool,

    /// Directory to write configuration files into
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
