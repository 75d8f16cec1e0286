//! Implementation of `utk-config --interactive`.
//!
//! Walks the user through the build type, the first-party modules and the
//! third-party libraries, then saves the result as a configuration document.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::presets::{baseline_options, MODULES, THIRD_PARTY};
use crate::core::{BuildType, Document, ModuleConfig, ThirdPartyConfig};
use crate::util::config;
use crate::util::prompt::Prompter;

/// File name used when the user just presses enter.
pub const DEFAULT_OUTPUT_FILE: &str = "build_config_custom.json";

/// Ask for every setting and build the document. Nothing is written.
pub fn prompt_document<P: Prompter>(prompter: &mut P) -> Result<Document> {
    let mut doc = Document::empty();

    let answer = prompter.ask(&format!(
        "Build type [{}] (default: {}): ",
        BuildType::ALL.map(|bt| bt.as_str()).join("/"),
        BuildType::default()
    ))?;
    let build_type = answer.parse::<BuildType>().unwrap_or_default();
    doc.build_type = build_type.to_string();

    for name in MODULES {
        let module = if prompter.confirm(&format!("Enable the {} module?", name), true)? {
            let tests = prompter.confirm(&format!("  Build {} tests?", name), false)?;
            let examples = prompter.confirm(&format!("  Build {} examples?", name), true)?;
            ModuleConfig::new(true, tests, examples)
        } else {
            ModuleConfig::disabled()
        };
        doc.modules.insert(name.to_string(), module);
    }

    for name in THIRD_PARTY {
        let dep = if prompter.confirm(&format!("Enable {}?", name), true)? {
            let examples = prompter.confirm(&format!("  Build {} examples?", name), true)?;
            let tests = prompter.confirm(&format!("  Build {} tests?", name), true)?;
            ThirdPartyConfig::new(true, examples, tests)
        } else {
            ThirdPartyConfig::new(false, false, false)
        };
        doc.third_party.insert(name.to_string(), dep);
    }

    let any_tests = doc.modules.values().any(ModuleConfig::wants_tests);
    let any_examples = doc.modules.values().any(ModuleConfig::wants_examples);
    doc.cmake_options = baseline_options(any_tests, any_examples);

    Ok(doc)
}

/// Ask for the output file name, appending `.json` when missing.
pub fn prompt_file_name<P: Prompter>(prompter: &mut P) -> Result<String> {
    let answer = prompter.ask(&format!(
        "Save configuration as (default: {}): ",
        DEFAULT_OUTPUT_FILE
    ))?;
    let mut name = if answer.is_empty() {
        DEFAULT_OUTPUT_FILE.to_string()
    } else {
        answer
    };
    if !name.ends_with(".json") {
        name.push_str(".json");
    }
    Ok(name)
}

/// Run the whole flow and save the document under `dir`.
///
/// Returns the path written.
pub fn interactive_config<P: Prompter>(prompter: &mut P, dir: &Path) -> Result<PathBuf> {
    let doc = prompt_document(prompter)?;
    let path = dir.join(prompt_file_name(prompter)?);
    config::save(&path, &doc)?;
    tracing::debug!("saved interactive configuration to {}", path.display());
    Ok(path)
}
