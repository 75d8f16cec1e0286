//! Implementation of `utk-config --create-configs`.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::Preset;
use crate::util::config;

/// What happened to each preset file.
#[derive(Debug, Default)]
pub struct CreateConfigsResult {
    pub created: Vec<PathBuf>,
    /// Files that already existed and were left untouched.
    pub skipped: Vec<PathBuf>,
}

/// Write every preset into `dir` unless a file of that name already exists.
pub fn create_configs(dir: &Path) -> Result<CreateConfigsResult> {
    let mut result = CreateConfigsResult::default();

    for preset in Preset::ALL {
        let path = dir.join(preset.file_name());
        if path.exists() {
            tracing::debug!("{} exists, not overwriting", path.display());
            result.skipped.push(path);
            continue;
        }
        config::save(&path, &preset.document())?;
        result.created.push(path);
    }

    Ok(result)
}
