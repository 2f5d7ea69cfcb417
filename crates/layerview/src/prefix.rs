//! Path-prefixing view.
//!
//! A [`PrefixView`] re-roots a source under a constant path: wrapping `s`
//! with prefix `["a", "b"]` makes `s.get_int(["x"])` answer to
//! `view.get_int(["a", "b", "x"])`. Queries that diverge from the prefix
//! resolve to nothing; queries that stop part-way see a single-key map
//! holding the next prefix segment.

use crate::error::{SourceError, SourceResult};
use crate::mutation::Mutation;
use crate::path::Segment;
use crate::source::{Mutable, NodeKind, Source, SourceRef};
use crate::trace::{NodeId, QueryOp, Tracer, ViewKind};
use std::sync::Arc;

/// Wraps one source under a non-empty path prefix.
#[derive(Debug, Clone)]
pub struct PrefixView {
    prefix: Vec<Segment>,
    source: SourceRef,
    node: NodeId,
    tracer: Tracer,
}

/// How a query lines up against the prefix.
enum Alignment<'p, 'q> {
    /// Some segment differs from the prefix.
    Mismatch,
    /// The query ran out first; this much of the prefix is left.
    Partial(&'p [Segment]),
    /// The prefix is used up; the rest of the query goes to the child.
    Inside(&'q [Segment]),
}

/// Re-root `source` under `prefix`. An empty prefix returns `source` as is.
pub fn with_prefix(source: SourceRef, prefix: Vec<Segment>) -> SourceRef {
    match PrefixView::new(source.clone(), prefix) {
        Some(view) => Arc::new(view),
        None => source,
    }
}

impl PrefixView {
    /// `None` when `prefix` is empty: such a view would be the source itself.
    pub fn new(source: SourceRef, prefix: Vec<Segment>) -> Option<Self> {
        if prefix.is_empty() {
            return None;
        }
        Some(Self::build(source, prefix, Tracer::default(), "new"))
    }

    fn build(source: SourceRef, prefix: Vec<Segment>, tracer: Tracer, origin: &str) -> Self {
        let node = NodeId::next();
        tracer.construct(node, ViewKind::Prefix, origin);
        Self {
            prefix,
            source,
            node,
            tracer,
        }
    }

    /// Replace the tracer, re-announcing the view to it.
    pub fn with_tracer(self, tracer: Tracer) -> Self {
        Self::build(self.source, self.prefix, tracer, "new")
    }

    pub fn prefix(&self) -> &[Segment] {
        &self.prefix
    }

    pub fn inner(&self) -> &SourceRef {
        &self.source
    }

    pub fn node_id(&self) -> NodeId {
        self.node
    }

    fn trace(&self, op: QueryOp, path: &[Segment]) {
        self.tracer.query(self.node, ViewKind::Prefix, op, path);
    }

    fn align<'q>(&self, path: &'q [Segment]) -> Alignment<'_, 'q> {
        let shared = path.len().min(self.prefix.len());
        let (head, rest) = path.split_at(shared);
        if !head.iter().zip(&self.prefix).all(|(q, p)| q.matches(p)) {
            return Alignment::Mismatch;
        }
        if shared < self.prefix.len() {
            Alignment::Partial(&self.prefix[shared..])
        } else {
            Alignment::Inside(rest)
        }
    }

    fn scalar<T>(
        &self,
        path: &[Segment],
        expected: NodeKind,
        get: impl FnOnce(&SourceRef, &[Segment]) -> SourceResult<T>,
    ) -> SourceResult<T> {
        match self.align(path) {
            Alignment::Mismatch => Err(SourceError::does_not_exist(path)),
            Alignment::Partial(_) => Err(SourceError::wrong_type(path, expected, NodeKind::Map)),
            Alignment::Inside(rest) => get(&self.source, rest),
        }
    }
}

impl Source for PrefixView {
    fn exists(&self, path: &[Segment]) -> bool {
        self.trace(QueryOp::Exists, path);
        match self.align(path) {
            Alignment::Mismatch => false,
            Alignment::Partial(_) => true,
            Alignment::Inside(rest) => self.source.exists(rest),
        }
    }

    fn get_bool(&self, path: &[Segment]) -> SourceResult<bool> {
        self.trace(QueryOp::GetBool, path);
        self.scalar(path, NodeKind::Bool, |s, rest| s.get_bool(rest))
    }

    fn get_int(&self, path: &[Segment]) -> SourceResult<i64> {
        self.trace(QueryOp::GetInt, path);
        self.scalar(path, NodeKind::Int, |s, rest| s.get_int(rest))
    }

    fn get_float(&self, path: &[Segment]) -> SourceResult<f64> {
        self.trace(QueryOp::GetFloat, path);
        self.scalar(path, NodeKind::Float, |s, rest| s.get_float(rest))
    }

    fn get_string(&self, path: &[Segment]) -> SourceResult<String> {
        self.trace(QueryOp::GetString, path);
        self.scalar(path, NodeKind::String, |s, rest| s.get_string(rest))
    }

    fn recurse(&self, path: &[Segment]) -> Option<SourceRef> {
        self.trace(QueryOp::Recurse, path);
        if path.is_empty() {
            return Some(Arc::new(self.clone()));
        }
        match self.align(path) {
            Alignment::Mismatch => None,
            Alignment::Partial(remaining) => Some(Arc::new(PrefixView::build(
                self.source.clone(),
                remaining.to_vec(),
                self.tracer.clone(),
                "recurse",
            ))),
            Alignment::Inside([]) => Some(self.source.clone()),
            Alignment::Inside(rest) => self.source.recurse(rest),
        }
    }

    fn keys(&self, path: &[Segment]) -> SourceResult<Vec<String>> {
        self.trace(QueryOp::Keys, path);
        match self.align(path) {
            Alignment::Mismatch => Err(SourceError::does_not_exist(path)),
            Alignment::Partial(remaining) => Ok(vec![remaining[0].to_string()]),
            Alignment::Inside(rest) => self.source.keys(rest),
        }
    }

    fn len(&self, path: &[Segment]) -> SourceResult<usize> {
        self.trace(QueryOp::Len, path);
        self.scalar(path, NodeKind::Sequence, |s, rest| s.len(rest))
    }

    fn kind(&self, path: &[Segment]) -> NodeKind {
        self.trace(QueryOp::Kind, path);
        match self.align(path) {
            Alignment::Mismatch => NodeKind::Undefined,
            Alignment::Partial(_) => NodeKind::Map,
            Alignment::Inside(rest) => self.source.kind(rest),
        }
    }

    fn as_mutable(&self) -> Option<&dyn Mutable> {
        Some(self)
    }
}

impl Mutable for PrefixView {
    fn mutate(&self, mutation: &Mutation) -> SourceRef {
        Arc::new(PrefixView::build(
            mutation.apply(self.source.clone()),
            self.prefix.clone(),
            self.tracer.clone(),
            "mutate",
        ))
    }
}
