//! Parsing and loading documents into sources.

use crate::document::{JsonDocument, YamlDocument};
use crate::error::{LoadError, Result};
use layerview::{SourceRef, combine_sources};
use std::path::Path;
use std::sync::Arc;
use yaml_rust2::{Yaml, YamlLoader};

/// Serialization format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// Detect the format from a file extension (`yaml`, `yml`, `json`).
    pub fn from_path(path: &Path) -> Option<Format> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "yaml" | "yml" => Some(Format::Yaml),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

/// Parse YAML text.
///
/// Only the first document of a multi-document stream is used. An empty
/// stream parses as a null document.
///
/// # Example
///
/// ```rust
/// use layerview::{Source, path};
/// use layerview_doc::parse_yaml;
///
/// let doc = parse_yaml("title: My Document").unwrap();
/// assert_eq!(doc.get_string(&path!["title"]).unwrap(), "My Document");
/// ```
///
/// # Errors
///
/// Returns an error if the YAML is invalid.
pub fn parse_yaml(content: &str) -> Result<YamlDocument> {
    let root = YamlLoader::load_from_str(content)?
        .into_iter()
        .next()
        .unwrap_or(Yaml::Null);
    Ok(YamlDocument::new(root))
}

/// Parse JSON text.
///
/// # Errors
///
/// Returns an error if the JSON is invalid.
pub fn parse_json(content: &str) -> Result<JsonDocument> {
    let root: serde_json::Value = serde_json::from_str(content)?;
    Ok(JsonDocument::new(root))
}

/// Parse text in the given format.
///
/// # Errors
///
/// Returns an error if the content is invalid for `format`.
pub fn parse(content: &str, format: Format) -> Result<SourceRef> {
    Ok(match format {
        Format::Yaml => Arc::new(parse_yaml(content)?),
        Format::Json => Arc::new(parse_json(content)?),
    })
}

/// Read and parse a file, picking the format from its extension.
///
/// # Errors
///
/// Returns an error if the extension is not recognized, the file cannot be
/// read, or its content does not parse.
pub fn load_file(path: impl AsRef<Path>) -> Result<SourceRef> {
    let path = path.as_ref();
    let format = Format::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    tracing::debug!(path = %path.display(), ?format, "loading document");
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&content, format).map_err(|source| LoadError::InFile {
        path: path.to_path_buf(),
        source: Box::new(source),
    })
}

/// Load several files and merge them, earliest file first.
///
/// Returns `None` for an empty list and the document itself for a single
/// file.
///
/// # Errors
///
/// Fails on the first file that cannot be loaded.
pub fn load_files<I, P>(paths: I) -> Result<Option<SourceRef>>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let sources = paths
        .into_iter()
        .map(|path| load_file(path).map(Some))
        .collect::<Result<Vec<_>>>()?;
    tracing::debug!(count = sources.len(), "merging documents");
    Ok(combine_sources(sources))
}
