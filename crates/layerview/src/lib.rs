//! Composable, path-addressed views over hierarchical data.
//!
//! This crate lets several independently produced data sources (parsed YAML
//! or JSON documents, in-memory trees, anything implementing [`Source`]) be
//! combined, re-rooted, and re-indexed into one logical view without ever
//! materializing a merged copy.
//!
//! # Key Features
//!
//! - **One read contract**: [`Source`] is implemented by leaves and
//!   composites alike, and every operation takes a [`Segment`] path
//! - **Lazy merging**: [`MultiSource`] resolves each query against its live
//!   children, concatenating sequences and unioning map keys
//! - **Re-indexing and re-rooting**: [`OffsetView`] shifts sequence indices,
//!   [`PrefixView`] mounts a source under a fixed path
//! - **Tree-wide settings**: a [`Mutation`] such as
//!   [`Mutation::set_first`] reaches multi-sources nested anywhere inside
//!   other composites
//!
//! # Architecture
//!
//! - [`Source`] / [`SourceRef`]: the shared read contract and the shared
//!   handle composites hold their children by
//! - [`Mutable`]: composites that let a [`Mutation`] through to their
//!   children
//! - [`SourceError`]: absence, type mismatch, or malformed key
//! - [`MergeSettings`]: serde-friendly precedence and merge policy
//! - [`TraceHook`] / [`Tracer`]: optional instrumentation of view
//!   construction and queries, on top of `tracing` events
//!
//! # Example
//!
//! ```rust,ignore
//! use layerview::{MultiSource, Mutation, Source, path};
//!
//! // Two parsed documents, each with `QQ: [...]` of three elements.
//! let merged = MultiSource::new(vec![first_doc, second_doc]);
//!
//! let qq = merged.recurse(&path!["QQ"]).expect("QQ exists");
//! assert_eq!(qq.len(&[])?, 6);
//! assert_eq!(qq.get_string(&path![4])?, "e");
//!
//! // Prefer the latest document for scalars, everywhere in the tree.
//! let latest = Mutation::set_first(false).apply(qq);
//! ```

mod error;
mod multi;
mod mutation;
mod offset;
mod path;
mod prefix;
mod settings;
mod source;
mod trace;

#[cfg(test)]
mod testing;

pub use error::{ErrorKind, SourceError, SourceResult};

pub use multi::{MultiSource, combine_sources};

pub use mutation::Mutation;

pub use offset::{OffsetView, with_offset};

pub use path::{PathDisplay, Segment, display_path};

pub use prefix::{PrefixView, with_prefix};

pub use settings::MergeSettings;

pub use source::{Mutable, NodeKind, Source, SourceRef};

pub use trace::{NodeId, QueryOp, TraceHook, Tracer, ViewKind};
