//! # layerview-doc
//!
//! Parsed YAML and JSON documents as [`layerview`] sources.
//!
//! A [`Document`] wraps a parsed tree and answers path queries against it.
//! Documents are the leaves that merged, offset, and prefixed views are built
//! on top of.
//!
//! ## Example
//!
//! ```rust
//! use layerview::{MultiSource, Source, SourceRef, path};
//! use layerview_doc::{parse_json, parse_yaml};
//! use std::sync::Arc;
//!
//! let defaults: SourceRef = Arc::new(parse_yaml("toc: false\nauthors: [Ann]").unwrap());
//! let project: SourceRef = Arc::new(parse_json(r#"{"authors": ["Bo"]}"#).unwrap());
//!
//! let merged = MultiSource::new([defaults, project]);
//! assert_eq!(merged.get_bool(&path!["toc"]).unwrap(), false);
//!
//! let authors = merged.recurse(&path!["authors"]).unwrap();
//! assert_eq!(authors.len(&[]).unwrap(), 2);
//! assert_eq!(authors.get_string(&path![1]).unwrap(), "Bo");
//! ```

mod document;
mod error;
mod load;
mod node;

pub use document::{Document, JsonDocument, YamlDocument};
pub use error::{LoadError, Result};
pub use load::{Format, load_file, load_files, parse, parse_json, parse_yaml};
pub use node::DocNode;
