//! Loading and saving configuration documents.
//!
//! Documents are JSON. A missing file is not an error: the built-in default
//! document is used and nothing is written to disk. A file that exists but
//! does not parse is fatal.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use miette::{Diagnostic as MietteDiagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::core::Document;
use crate::util::fs::write_string;

/// File loaded when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "build_config.json";

/// The configuration file exists but is not a valid document.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("malformed configuration file `{}`: {message}", path.display())]
#[diagnostic(
    code(utoolkit::config::format),
    help("fix the JSON or regenerate the presets with `utk-config --create-configs`")
)]
pub struct ConfigFormatError {
    pub path: PathBuf,
    pub message: String,
    #[source_code]
    pub src: NamedSource<String>,
    #[label("here")]
    pub span: SourceSpan,
}

/// Error loading a configuration document.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ConfigError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Format(#[from] ConfigFormatError),

    #[error("failed to read configuration file `{}`", path.display())]
    #[diagnostic(code(utoolkit::config::read))]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Where a loaded document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    File,
    /// The file was missing and the built-in default was used.
    BuiltinDefault,
}

/// Load the document at `path`, falling back to the default when the file
/// does not exist.
pub fn load(path: &Path) -> Result<(Document, ConfigSource), ConfigError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(
                "configuration file {} does not exist, using built-in defaults",
                path.display()
            );
            return Ok((Document::default(), ConfigSource::BuiltinDefault));
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let doc = parse(&contents, path)?;
    tracing::debug!("loaded configuration from {}", path.display());
    Ok((doc, ConfigSource::File))
}

/// Parse a document from JSON text. `path` is only used for diagnostics.
pub fn parse(contents: &str, path: &Path) -> Result<Document, ConfigFormatError> {
    serde_json::from_str(contents).map_err(|e| ConfigFormatError {
        path: path.to_path_buf(),
        message: e.to_string(),
        span: error_span(contents, e.line(), e.column()),
        src: NamedSource::new(path.display().to_string(), contents.to_string()),
    })
}

/// Serialize a document the way it is written to disk: two-space indentation,
/// keys in a stable order, trailing newline.
pub fn to_string_pretty(doc: &Document) -> Result<String> {
    let mut out =
        serde_json::to_string_pretty(doc).context("failed to serialize configuration")?;
    out.push('\n');
    Ok(out)
}

/// Save a document, overwriting any existing file.
pub fn save(path: &Path, doc: &Document) -> Result<()> {
    let contents = to_string_pretty(doc)?;
    write_string(path, &contents)
}

/// Convert serde_json's 1-based line/column into a byte span.
fn error_span(src: &str, line: usize, column: usize) -> SourceSpan {
    let mut offset = 0;
    for (idx, l) in src.split_inclusive('\n').enumerate() {
        if idx + 1 == line {
            offset += column.saturating_sub(1).min(l.len());
            break;
        }
        offset += l.len();
    }
    let offset = offset.min(src.len());
    let len = usize::from(offset < src.len());
    (offset, len).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ModuleConfig, OptionValue, Preset, ThirdPartyConfig};
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_returns_default_without_creating() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("build_config.json");

        let (doc, source) = load(&path).unwrap();

        assert_eq!(doc, Document::default());
        assert_eq!(source, ConfigSource::BuiltinDefault);
        assert!(!path.exists());
    }

    #[test]
    fn test_load_malformed_is_format_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.json");
        std::fs::write(&path, "{\n  \"build_type\": \"Debug\",\n  \"modules\": [\n").unwrap();

        let err = load(&path).unwrap_err();

        match err {
            ConfigError::Format(e) => {
                assert_eq!(e.path, path);
                assert!(!e.message.is_empty());
            }
            other => panic!("expected format error, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_type_is_format_error() {
        let err = parse("{\"modules\": {\"logging\": {\"enabled\": \"yes\"}}}", Path::new("c.json"))
            .unwrap_err();
        assert!(err.to_string().contains("c.json"));
    }

    #[test]
    fn test_load_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("dev.json");
        std::fs::write(
            &path,
            r#"{"build_type": "Debug", "third_party": {"fmt": {"enabled": false}}}"#,
        )
        .unwrap();

        let (doc, source) = load(&path).unwrap();

        assert_eq!(source, ConfigSource::File);
        assert_eq!(doc.build_type, "Debug");
        assert!(!doc.third_party["fmt"].enabled);
        assert!(doc.modules.is_empty());
    }

    #[test]
    fn test_save_load_round_trip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("round.json");

        let mut doc = Preset::Minimal.document();
        doc.modules
            .insert("extra".to_string(), ModuleConfig::new(true, false, true));
        doc.third_party
            .insert("poco".to_string(), ThirdPartyConfig::default());
        doc.cmake_options
            .insert("CMAKE_CXX_STANDARD".to_string(), OptionValue::Other(17.into()));
        doc.extra
            .insert("comment".to_string(), serde_json::json!("kept"));

        save(&path, &doc).unwrap();
        let (loaded, _) = load(&path).unwrap();
        assert_eq!(loaded, doc);

        save(&path, &loaded).unwrap();
        let (again, _) = load(&path).unwrap();
        assert_eq!(again, doc);
    }

    #[test]
    fn test_save_is_indented_and_sorted() {
        let out = to_string_pretty(&Document::default()).unwrap();
        assert!(out.ends_with("}\n"));
        assert!(out.contains("\n  \"build_type\": \"Release\""));

        let bench = out.find("\"benchmark\"").unwrap();
        let spdlog = out.find("\"spdlog\"").unwrap();
        assert!(bench < spdlog);
    }

    #[test]
    fn test_save_overwrites() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("c.json");
        std::fs::write(&path, "garbage").unwrap();

        save(&path, &Document::empty()).unwrap();

        assert!(parse(&std::fs::read_to_string(&path).unwrap(), &path).is_ok());
    }

    #[test]
    fn test_error_span_points_at_line_and_column() {
        let src = "{\n  \"a\": x\n}";
        let span = error_span(src, 2, 8);
        assert_eq!(span.offset(), 2 + 7);
        assert_eq!(span.len(), 1);

        let end = error_span("{", 1, 2);
        assert_eq!(end.offset(), 1);
        assert_eq!(end.len(), 0);
    }
}
