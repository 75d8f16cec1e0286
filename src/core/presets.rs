//! Canned configuration documents.

use std::collections::BTreeMap;
use std::fmt;

use crate::core::document::{
    Document, ModuleConfig, OptionValue, ThirdPartyConfig, BUILD_EXAMPLES_OPTION,
    BUILD_TESTS_OPTION,
};

/// First-party modules, in prompt order.
pub const MODULES: [&str; 3] = ["logging", "threadpool", "utils"];

/// Third-party dependencies, in prompt order.
pub const THIRD_PARTY: [&str; 4] = ["fmt", "spdlog", "googletest", "benchmark"];

/// Default installation prefix written into every preset.
pub const DEFAULT_INSTALL_PREFIX: &str = "/usr/local";

/// The shipped presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Everything on, tests included. Also the fallback when no file exists.
    Default,
    /// Only the logging and utils core, no dependencies, tests or examples.
    Minimal,
    /// Everything on, tests included.
    Full,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Default, Preset::Minimal, Preset::Full];

    /// File the preset is materialised as.
    pub fn file_name(&self) -> &'static str {
        match self {
            Preset::Default => "build_config.json",
            Preset::Minimal => "build_config.minimal.json",
            Preset::Full => "build_config.full.json",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Default => "default",
            Preset::Minimal => "minimal",
            Preset::Full => "full",
        }
    }

    pub fn document(&self) -> Document {
        match self {
            Preset::Default | Preset::Full => everything_on(),
            Preset::Minimal => minimal(),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Baseline `cmake_options` with the tests/examples switches set.
pub fn baseline_options(tests: bool, examples: bool) -> BTreeMap<String, OptionValue> {
    let mut options = BTreeMap::new();
    options.insert(
        "CMAKE_INSTALL_PREFIX".to_string(),
        OptionValue::from(DEFAULT_INSTALL_PREFIX),
    );
    options.insert(BUILD_TESTS_OPTION.to_string(), OptionValue::Bool(tests));
    options.insert(BUILD_EXAMPLES_OPTION.to_string(), OptionValue::Bool(examples));
    options.insert("BUILD_SHARED_LIBS".to_string(), OptionValue::Bool(false));
    options
}

fn everything_on() -> Document {
    let mut doc = Document::empty();
    for name in MODULES {
        doc.modules.insert(name.to_string(), ModuleConfig::new(true, true, true));
    }
    for name in THIRD_PARTY {
        doc.third_party
            .insert(name.to_string(), ThirdPartyConfig::new(true, true, true));
    }
    doc.cmake_options = baseline_options(true, true);
    doc
}

fn minimal() -> Document {
    let mut doc = Document::empty();
    for name in MODULES {
        let module = if matches!(name, "logging" | "utils") {
            ModuleConfig::new(true, false, false)
        } else {
            ModuleConfig::disabled()
        };
        doc.modules.insert(name.to_string(), module);
    }
    for name in THIRD_PARTY {
        doc.third_party
            .insert(name.to_string(), ThirdPartyConfig::new(false, false, false));
    }
    doc.cmake_options = baseline_options(false, false);
    doc
}
