//! Test fixtures for common test scenarios.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::core::Document;

/// Parse a document from inline JSON, panicking on malformed input.
pub fn doc_from_json(json: &str) -> Document {
    serde_json::from_str(json).unwrap_or_else(|e| panic!("bad fixture JSON: {}\n{}", e, json))
}

/// A throwaway project checkout with a top-level `CMakeLists.txt`.
pub struct ProjectFixture {
    pub dir: TempDir,
}

impl ProjectFixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("CMakeLists.txt"),
            "cmake_minimum_required(VERSION 3.20)\nproject(utoolkit CXX)\n",
        )
        .unwrap();
        ProjectFixture { dir }
    }

    /// Add a `.gitmodules` listing the given submodule paths.
    pub fn with_gitmodules(self, paths: &[&str]) -> Self {
        let mut contents = String::new();
        for path in paths {
            contents.push_str(&format!(
                "[submodule \"{path}\"]\n\tpath = {path}\n\turl = https://example.invalid/{path}.git\n"
            ));
        }
        std::fs::write(self.dir.path().join(".gitmodules"), contents).unwrap();
        self
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn build_dir(&self) -> PathBuf {
        self.dir.path().join("build")
    }
}

impl Default for ProjectFixture {
    fn default() -> Self {
        ProjectFixture::new()
    }
}

/// `git submodule status` output with one line per `(marker, path)`.
pub fn submodule_status(entries: &[(char, &str)]) -> String {
    entries
        .iter()
        .map(|(marker, path)| {
            format!(
                "{}1f2e3d4c5b6a79881726354453627180a9b8c7d6 {}\n",
                marker, path
            )
        })
        .collect()
}
