//! CLI definitions using clap.

use std::path::PathBuf;

use clap::Parser;

use utoolkit_build::util::config::DEFAULT_CONFIG_FILE;
use utoolkit_build::util::shell::ColorChoice;

/// Configure, build and test uToolkit from a JSON build configuration
#[derive(Parser)]
#[command(name = "utk-build")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file
    #[arg(long, env = "UTK_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Remove the build directory before configuring
    #[arg(long)]
    pub clean: bool,

    /// Install the already-built tree and exit
    #[arg(long)]
    pub install: bool,

    /// Print the configuration and exit without building
    #[arg(long)]
    pub show_config: bool,

    /// Initialize git submodules and exit
    #[arg(long)]
    pub init_submodules: bool,

    /// Project root containing the top-level CMakeLists.txt
    #[arg(long, default_value = ".")]
    pub source_dir: PathBuf,

    /// Build directory (defaults to <source-dir>/build)
    #[arg(long, env = "UTK_BUILD_DIR")]
    pub build_dir: Option<PathBuf>,

    /// Number of parallel jobs (defaults to the CPU count)
    #[arg(short, long, env = "UTK_JOBS")]
    pub jobs: Option<usize>,

    /// CMake generator to pass with -G
    #[arg(long, env = "UTK_GENERATOR")]
    pub generator: Option<String>,

    /// Don't look for uninitialized submodules before configuring
    #[arg(long)]
    pub no_submodule_check: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print warnings and errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,
}
