//! `utk-config --usage`

const USAGE: &str = "\
uToolkit build system

Quick start:
  utk-build                           build with build_config.json
  utk-build --config dev.json         build with a custom configuration
  utk-build --clean                   remove the build directory and rebuild
  utk-build --install                 install the built tree
  utk-build --show-config             print the active configuration
  utk-build --init-submodules         fetch third-party sources

Configuration files:
  build_config.json                   default configuration
  build_config.minimal.json           logging and utils only
  build_config.full.json              everything enabled

Interactive configuration:
  utk-config --interactive

Create the preset configurations:
  utk-config --create-configs
";

pub fn execute() {
    print!("{}", USAGE);
}
