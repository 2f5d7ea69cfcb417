//! The read contract shared by every value view.

use crate::error::SourceResult;
use crate::multi::MultiSource;
use crate::mutation::Mutation;
use crate::path::Segment;
use std::fmt;
use std::sync::Arc;

/// Shared handle to a source. Composites reference their children through
/// this, so a child can appear in several composites at once.
pub type SourceRef = Arc<dyn Source>;

/// The kind of value found at a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The path does not resolve (distinct from an explicit null).
    Undefined,
    Null,
    Bool,
    Int,
    Float,
    String,
    Sequence,
    Map,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Undefined => "undefined",
            NodeKind::Null => "null",
            NodeKind::Bool => "boolean",
            NodeKind::Int => "integer",
            NodeKind::Float => "float",
            NodeKind::String => "string",
            NodeKind::Sequence => "sequence",
            NodeKind::Map => "map",
        }
    }

    /// Sequences and maps.
    pub fn is_container(&self) -> bool {
        matches!(self, NodeKind::Sequence | NodeKind::Map)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A read-only, path-addressed view over a hierarchical value.
///
/// Every operation takes a path relative to this view; the empty path means
/// the view itself. Leaf collaborators (document parsers) implement this over
/// their own value trees; the composites in this crate implement it by
/// transforming the path and forwarding to their children.
pub trait Source: fmt::Debug + Send + Sync {
    /// True iff the path resolves to a concrete value, including an explicit
    /// null. Never fails.
    fn exists(&self, path: &[Segment]) -> bool;

    fn get_bool(&self, path: &[Segment]) -> SourceResult<bool>;

    fn get_int(&self, path: &[Segment]) -> SourceResult<i64>;

    fn get_float(&self, path: &[Segment]) -> SourceResult<f64>;

    fn get_string(&self, path: &[Segment]) -> SourceResult<String>;

    /// The sub-view at `path`, or `None` if the path does not resolve.
    fn recurse(&self, path: &[Segment]) -> Option<SourceRef>;

    /// Field names of the map at `path`, in the order the data defines them.
    fn keys(&self, path: &[Segment]) -> SourceResult<Vec<String>>;

    /// Number of children of the sequence or map at `path`.
    fn len(&self, path: &[Segment]) -> SourceResult<usize>;

    /// Kind of the value at `path`; [`NodeKind::Undefined`] if it does not
    /// resolve.
    fn kind(&self, path: &[Segment]) -> NodeKind;

    /// The mutable-capable side of this source, if it has owned children that
    /// a [`Mutation`] should reach.
    fn as_mutable(&self) -> Option<&dyn Mutable> {
        None
    }

    /// Downcast hook used by the multi-source mutations and constructor.
    fn as_multi_source(&self) -> Option<&MultiSource> {
        None
    }
}

/// Composites that can rebuild themselves with a mutation applied to every
/// owned child.
pub trait Mutable {
    /// A copy of this composite whose children are `mutation.apply(child)`.
    /// The composite's own settings are carried over unchanged.
    fn mutate(&self, mutation: &Mutation) -> SourceRef;
}
