//! Parsed documents as leaf sources.

use crate::node::DocNode;
use layerview::{NodeKind, Segment, Source, SourceError, SourceRef, SourceResult};
use std::sync::Arc;
use yaml_rust2::Yaml;

/// A [`Source`] over a parsed YAML document.
pub type YamlDocument = Document<Yaml>;

/// A [`Source`] over a parsed JSON document.
pub type JsonDocument = Document<serde_json::Value>;

/// A leaf source over a shared document tree.
///
/// The tree itself is never copied: recursing produces another `Document`
/// pointing at the same root with a longer base path. Errors report paths
/// relative to the document root, so a sub-document still says where in
/// the file the problem is.
#[derive(Debug)]
pub struct Document<N> {
    root: Arc<N>,
    base: Vec<Segment>,
}

impl<N> Clone for Document<N> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            base: self.base.clone(),
        }
    }
}

impl<N: DocNode> Document<N> {
    /// Wrap a parsed tree.
    pub fn new(root: N) -> Self {
        Self {
            root: Arc::new(root),
            base: Vec::new(),
        }
    }

    /// Path from the document root to the node this source is positioned at.
    pub fn path(&self) -> &[Segment] {
        &self.base
    }

    /// The whole parsed tree, regardless of position.
    pub fn root(&self) -> &N {
        &self.root
    }

    /// The node at `path`, if it resolves to a value.
    pub fn node(&self, path: &[Segment]) -> Option<&N> {
        self.base
            .iter()
            .chain(path)
            .try_fold(&*self.root, |node, segment| node.child(segment))
            .filter(|node| node.kind() != NodeKind::Undefined)
    }

    fn full_path(&self, path: &[Segment]) -> Vec<Segment> {
        let mut full = self.base.clone();
        full.extend_from_slice(path);
        full
    }

    fn read<T>(
        &self,
        path: &[Segment],
        expected: NodeKind,
        read: impl FnOnce(&N) -> Option<T>,
    ) -> SourceResult<T> {
        let node = self
            .node(path)
            .ok_or_else(|| SourceError::does_not_exist(&self.full_path(path)))?;
        read(node).ok_or_else(|| SourceError::wrong_type(&self.full_path(path), expected, node.kind()))
    }
}

impl<N: DocNode> Source for Document<N> {
    fn exists(&self, path: &[Segment]) -> bool {
        self.node(path).is_some()
    }

    fn get_bool(&self, path: &[Segment]) -> SourceResult<bool> {
        self.read(path, NodeKind::Bool, N::as_bool)
    }

    fn get_int(&self, path: &[Segment]) -> SourceResult<i64> {
        self.read(path, NodeKind::Int, N::as_int)
    }

    fn get_float(&self, path: &[Segment]) -> SourceResult<f64> {
        self.read(path, NodeKind::Float, N::as_float)
    }

    fn get_string(&self, path: &[Segment]) -> SourceResult<String> {
        self.read(path, NodeKind::String, N::as_string)
    }

    fn recurse(&self, path: &[Segment]) -> Option<SourceRef> {
        self.node(path)?;
        Some(Arc::new(Document {
            root: self.root.clone(),
            base: self.full_path(path),
        }))
    }

    fn keys(&self, path: &[Segment]) -> SourceResult<Vec<String>> {
        self.read(path, NodeKind::Map, N::keys)
    }

    fn len(&self, path: &[Segment]) -> SourceResult<usize> {
        self.read(path, NodeKind::Sequence, N::len)
    }

    fn kind(&self, path: &[Segment]) -> NodeKind {
        self.node(path).map_or(NodeKind::Undefined, N::kind)
    }
}
