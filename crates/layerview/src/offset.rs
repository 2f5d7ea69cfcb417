//! Index-shifting view.
//!
//! An [`OffsetView`] lets a sequence be addressed with indices shifted up by
//! a fixed amount. The multi-source engine uses it to lay the sequences of
//! several children end to end in one virtual index space without copying
//! any elements: the second child's `[d, e, f]` behind a shift of 3 answers
//! to indices 3, 4 and 5.
//!
//! The view holds one shift per path depth. A query longer than the shift
//! list is only partially transformed; the trailing segments pass through
//! as they are.

use crate::error::{SourceError, SourceResult};
use crate::mutation::Mutation;
use crate::path::Segment;
use crate::source::{Mutable, NodeKind, Source, SourceRef};
use crate::trace::{NodeId, QueryOp, Tracer, ViewKind};
use std::sync::Arc;

/// Wraps one source, subtracting a per-depth shift from index segments.
#[derive(Debug, Clone)]
pub struct OffsetView {
    shifts: Vec<usize>,
    source: SourceRef,
    node: NodeId,
    tracer: Tracer,
}

/// Wrap `source` so that index `n + shifts[d]` at depth `d` reads index `n`.
pub fn with_offset(source: SourceRef, shifts: Vec<usize>) -> SourceRef {
    Arc::new(OffsetView::new(source, shifts))
}

impl OffsetView {
    pub fn new(source: SourceRef, shifts: Vec<usize>) -> Self {
        Self::build(source, shifts, Tracer::default(), "new")
    }

    pub(crate) fn build(
        source: SourceRef,
        shifts: Vec<usize>,
        tracer: Tracer,
        origin: &str,
    ) -> Self {
        let node = NodeId::next();
        tracer.construct(node, ViewKind::Offset, origin);
        Self {
            shifts,
            source,
            node,
            tracer,
        }
    }

    /// Replace the tracer, re-announcing the view to it.
    pub fn with_tracer(self, tracer: Tracer) -> Self {
        Self::build(self.source, self.shifts, tracer, "new")
    }

    pub fn shifts(&self) -> &[usize] {
        &self.shifts
    }

    pub fn inner(&self) -> &SourceRef {
        &self.source
    }

    pub fn node_id(&self) -> NodeId {
        self.node
    }

    fn trace(&self, op: QueryOp, path: &[Segment]) {
        self.tracer.query(self.node, ViewKind::Offset, op, path);
    }

    /// Map a query path onto the wrapped source's index space.
    ///
    /// Under a nonzero shift the segment must be a non-negative integer
    /// (`MalformedKey` otherwise); indices below the shift land before the
    /// start of the wrapped sequence and are reported as absent.
    fn transform(&self, path: &[Segment]) -> SourceResult<Vec<Segment>> {
        path.iter()
            .enumerate()
            .map(|(depth, segment)| {
                let shift = self.shifts.get(depth).copied().unwrap_or(0);
                if shift == 0 {
                    return Ok(segment.clone());
                }
                let index = segment.as_index().ok_or_else(|| SourceError::MalformedKey {
                    path: path.to_vec(),
                    segment: segment.to_string(),
                })?;
                index
                    .checked_sub(shift)
                    .map(Segment::Index)
                    .ok_or_else(|| SourceError::does_not_exist(path))
            })
            .collect()
    }
}

impl Source for OffsetView {
    fn exists(&self, path: &[Segment]) -> bool {
        self.trace(QueryOp::Exists, path);
        // A malformed key simply means "not here" for existence probes.
        match self.transform(path) {
            Ok(shifted) => self.source.exists(&shifted),
            Err(_) => false,
        }
    }

    fn get_bool(&self, path: &[Segment]) -> SourceResult<bool> {
        self.trace(QueryOp::GetBool, path);
        self.source.get_bool(&self.transform(path)?)
    }

    fn get_int(&self, path: &[Segment]) -> SourceResult<i64> {
        self.trace(QueryOp::GetInt, path);
        self.source.get_int(&self.transform(path)?)
    }

    fn get_float(&self, path: &[Segment]) -> SourceResult<f64> {
        self.trace(QueryOp::GetFloat, path);
        self.source.get_float(&self.transform(path)?)
    }

    fn get_string(&self, path: &[Segment]) -> SourceResult<String> {
        self.trace(QueryOp::GetString, path);
        self.source.get_string(&self.transform(path)?)
    }

    fn recurse(&self, path: &[Segment]) -> Option<SourceRef> {
        self.trace(QueryOp::Recurse, path);
        let shifted = self.transform(path).ok()?;
        let found = self.source.recurse(&shifted)?;
        if self.shifts.len() <= path.len() {
            return Some(found);
        }
        let rest = self.shifts[path.len()..].to_vec();
        Some(Arc::new(OffsetView::build(
            found,
            rest,
            self.tracer.clone(),
            "recurse",
        )))
    }

    fn keys(&self, path: &[Segment]) -> SourceResult<Vec<String>> {
        self.trace(QueryOp::Keys, path);
        self.source.keys(&self.transform(path)?)
    }

    fn len(&self, path: &[Segment]) -> SourceResult<usize> {
        self.trace(QueryOp::Len, path);
        self.source.len(&self.transform(path)?)
    }

    fn kind(&self, path: &[Segment]) -> NodeKind {
        self.trace(QueryOp::Kind, path);
        match self.transform(path) {
            Ok(shifted) => self.source.kind(&shifted),
            Err(_) => NodeKind::Undefined,
        }
    }

    fn as_mutable(&self) -> Option<&dyn Mutable> {
        Some(self)
    }
}

impl Mutable for OffsetView {
    fn mutate(&self, mutation: &Mutation) -> SourceRef {
        Arc::new(OffsetView::build(
            mutation.apply(self.source.clone()),
            self.shifts.clone(),
            self.tracer.clone(),
            "mutate",
        ))
    }
}
