//! Errors raised while loading documents.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for document loading.
pub type Result<T> = std::result::Result<T, LoadError>;

/// Errors that can occur while reading or parsing a document.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML syntax error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] yaml_rust2::ScanError),

    /// JSON syntax error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension does not name a known format.
    #[error("unsupported document format: {}", .path.display())]
    UnsupportedFormat { path: PathBuf },

    /// A parse error, with the file it came from.
    #[error("{}: {source}", .path.display())]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<LoadError>,
    },
}
