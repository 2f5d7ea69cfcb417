//! Multi-source merging.
//!
//! A [`MultiSource`] combines an ordered list of child sources into one
//! logical view. Nothing is copied: every query is re-evaluated against the
//! live children.
//!
//! # Semantics
//!
//! - **Scalars** come from a single child. With `first = true` (the default)
//!   the earliest child that has a value wins; with `first = false` the
//!   latest one does.
//! - **Sequences** are concatenated in child order. While resolving a path,
//!   each child's sequence is wrapped in an [`OffsetView`] so that its
//!   elements occupy their own slot of one virtual index space.
//! - **Maps** expose the order-preserving union of the children's keys.
//! - With `combine = false`, containers come from the precedence-resolved
//!   child only. Paths can then exist beyond what `keys` reports: if one
//!   child has `map: {key1: ..}` and another `map: {key2: ..}`, `keys(map)`
//!   is `[key1]` while `map.key2` still resolves through the second child.
//!
//! `len` under `combine = true` sums the children's counts while `keys`
//! de-duplicates. For sequences that is the concatenated length; for maps
//! with overlapping keys the count can exceed the number of keys.
//!
//! # Example
//!
//! ```rust,ignore
//! let merged = MultiSource::new(vec![project, document]);
//! let theme = merged.get_string(&path!["format", "html", "theme"])?;
//! ```

use crate::error::{SourceError, SourceResult};
use crate::mutation::Mutation;
use crate::offset::OffsetView;
use crate::path::Segment;
use crate::settings::MergeSettings;
use crate::source::{Mutable, NodeKind, Source, SourceRef};
use crate::trace::{NodeId, QueryOp, Tracer, ViewKind};
use indexmap::IndexSet;
use std::sync::Arc;

/// An ordered set of sources read as one.
#[derive(Debug, Clone)]
pub struct MultiSource {
    /// Children in source order (earliest first)
    sources: Vec<SourceRef>,
    /// Earlier children win scalar lookups
    first: bool,
    /// Containers merge across children
    combine: bool,
    node: NodeId,
    tracer: Tracer,
}

/// Combine optional sources.
///
/// Absent inputs are dropped. No remaining source gives `None`, a single one
/// is returned unwrapped, and more than one are merged with
/// [`MultiSource::new`] (so a leading multi-source is extended rather than
/// nested).
pub fn combine_sources<I>(sources: I) -> Option<SourceRef>
where
    I: IntoIterator<Item = Option<SourceRef>>,
{
    let mut present: Vec<SourceRef> = sources.into_iter().flatten().collect();
    match present.len() {
        0 => None,
        1 => present.pop(),
        _ => Some(Arc::new(MultiSource::new(present))),
    }
}

impl MultiSource {
    /// Merge `sources`, earliest first.
    ///
    /// If the first source is itself a multi-source, its children (and its
    /// settings) are copied and the remaining sources appended to the copy.
    /// Only that one level is flattened; the original is left untouched.
    pub fn new<I>(sources: I) -> Self
    where
        I: IntoIterator<Item = SourceRef>,
    {
        let mut sources = sources.into_iter();
        let Some(head) = sources.next() else {
            return Self::empty();
        };
        if let Some(existing) = head.as_multi_source() {
            let mut merged = existing.copy("new");
            merged.sources.extend(sources);
            return merged;
        }
        let mut children = vec![head];
        children.extend(sources);
        Self::build(
            children,
            MergeSettings::default(),
            Tracer::default(),
            "new",
        )
    }

    /// A multi-source with no children. Every path is absent.
    pub fn empty() -> Self {
        Self::build(
            Vec::new(),
            MergeSettings::default(),
            Tracer::default(),
            "new",
        )
    }

    fn build(
        sources: Vec<SourceRef>,
        settings: MergeSettings,
        tracer: Tracer,
        origin: &str,
    ) -> Self {
        let node = NodeId::next();
        tracer.construct(node, ViewKind::Multi, origin);
        Self {
            sources,
            first: settings.first,
            combine: settings.combine,
            node,
            tracer,
        }
    }

    /// A new multi-source sharing this one's children and settings.
    fn copy(&self, origin: &str) -> Self {
        Self::build(
            self.sources.clone(),
            self.settings(),
            self.tracer.clone(),
            origin,
        )
    }

    /// Replace the tracer, re-announcing the view to it.
    pub fn with_tracer(self, tracer: Tracer) -> Self {
        let settings = self.settings();
        Self::build(self.sources, settings, tracer, "new")
    }

    pub fn sources(&self) -> &[SourceRef] {
        &self.sources
    }

    pub fn first(&self) -> bool {
        self.first
    }

    pub fn combine(&self) -> bool {
        self.combine
    }

    pub fn node_id(&self) -> NodeId {
        self.node
    }

    pub fn settings(&self) -> MergeSettings {
        MergeSettings {
            first: self.first,
            combine: self.combine,
        }
    }

    /// A copy with different precedence; `self` is unchanged.
    pub fn with_first(&self, first: bool) -> Self {
        let mut copy = self.copy("copy");
        copy.first = first;
        copy
    }

    /// A copy with a different container-merge policy; `self` is unchanged.
    pub fn with_combine(&self, combine: bool) -> Self {
        let mut copy = self.copy("copy");
        copy.combine = combine;
        copy
    }

    /// A copy carrying `settings`; `self` is unchanged.
    pub fn with_settings(&self, settings: MergeSettings) -> Self {
        let mut copy = self.copy("copy");
        copy.first = settings.first;
        copy.combine = settings.combine;
        copy
    }

    /// A copy with `source` appended as the latest child.
    pub fn with_source(&self, source: SourceRef) -> Self {
        let mut copy = self.copy("copy");
        copy.sources.push(source);
        copy
    }

    /// Append `source` in place.
    ///
    /// This needs exclusive access. A multi-source that has already been
    /// shared behind a [`SourceRef`] cannot be changed this way; use
    /// [`MultiSource::with_source`] for those.
    pub fn push_source(&mut self, source: SourceRef) {
        self.sources.push(source);
    }

    fn trace(&self, op: QueryOp, path: &[Segment]) {
        self.tracer.query(self.node, ViewKind::Multi, op, path);
    }

    /// The children that resolve `path`, each already positioned at it.
    ///
    /// Children are walked one segment at a time. Whenever a child's
    /// intermediate value is a sequence it is shifted by the running count
    /// for that depth, and the count grows by that sequence's length, so
    /// sequences from successive children sit end to end. Children that do
    /// not resolve are dropped; if none do, the result is `None`.
    fn resolve(&self, path: &[Segment]) -> Option<MultiSource> {
        if path.is_empty() {
            return Some(self.clone());
        }
        let mut offsets = vec![0usize; path.len()];
        let mut found = Vec::with_capacity(self.sources.len());
        'children: for source in &self.sources {
            let mut current = source.clone();
            for (depth, segment) in path.iter().enumerate() {
                let Some(next) = current.recurse(std::slice::from_ref(segment)) else {
                    continue 'children;
                };
                current = next;
                if current.kind(&[]) == NodeKind::Sequence {
                    let length = current.len(&[]).unwrap_or(0);
                    if offsets[depth] != 0 {
                        current = Arc::new(OffsetView::build(
                            current,
                            vec![offsets[depth]],
                            self.tracer.clone(),
                            "stitch",
                        ));
                    }
                    offsets[depth] += length;
                }
            }
            found.push(current);
        }
        if found.is_empty() {
            return None;
        }
        Some(Self::build(
            found,
            self.settings(),
            self.tracer.clone(),
            "recurse",
        ))
    }

    /// The single child that answers for `path`.
    fn find(&self, path: &[Segment]) -> Option<SourceRef> {
        let resolved = self.resolve(path)?;
        match resolved.sources.as_slice() {
            [] => None,
            [only] => Some(only.clone()),
            many if self.first => many.iter().find(|s| s.exists(&[])).cloned(),
            many => many.iter().rev().find(|s| s.exists(&[])).cloned(),
        }
    }

    fn scalar<T>(
        &self,
        path: &[Segment],
        get: impl FnOnce(&SourceRef) -> SourceResult<T>,
    ) -> SourceResult<T> {
        match self.find(path) {
            Some(source) => get(&source),
            None => Err(SourceError::does_not_exist(path)),
        }
    }
}

impl Source for MultiSource {
    fn exists(&self, path: &[Segment]) -> bool {
        self.trace(QueryOp::Exists, path);
        self.find(path).is_some()
    }

    fn get_bool(&self, path: &[Segment]) -> SourceResult<bool> {
        self.trace(QueryOp::GetBool, path);
        self.scalar(path, |s| s.get_bool(&[]))
    }

    fn get_int(&self, path: &[Segment]) -> SourceResult<i64> {
        self.trace(QueryOp::GetInt, path);
        self.scalar(path, |s| s.get_int(&[]))
    }

    fn get_float(&self, path: &[Segment]) -> SourceResult<f64> {
        self.trace(QueryOp::GetFloat, path);
        self.scalar(path, |s| s.get_float(&[]))
    }

    fn get_string(&self, path: &[Segment]) -> SourceResult<String> {
        self.trace(QueryOp::GetString, path);
        self.scalar(path, |s| s.get_string(&[]))
    }

    fn recurse(&self, path: &[Segment]) -> Option<SourceRef> {
        self.trace(QueryOp::Recurse, path);
        self.resolve(path).map(|m| Arc::new(m) as SourceRef)
    }

    fn keys(&self, path: &[Segment]) -> SourceResult<Vec<String>> {
        self.trace(QueryOp::Keys, path);
        if let [only] = self.sources.as_slice() {
            return only.keys(path);
        }
        if !self.combine {
            return self.scalar(path, |s| s.keys(&[]));
        }
        let mut able = 0;
        let mut combined = IndexSet::new();
        for source in &self.sources {
            if !source.exists(path) {
                continue;
            }
            combined.extend(source.keys(path)?);
            able += 1;
        }
        if able == 0 {
            return Err(SourceError::does_not_exist(path));
        }
        Ok(combined.into_iter().collect())
    }

    fn len(&self, path: &[Segment]) -> SourceResult<usize> {
        self.trace(QueryOp::Len, path);
        if let [only] = self.sources.as_slice() {
            return only.len(path);
        }
        if !self.combine {
            return self.scalar(path, |s| s.len(&[]));
        }
        let mut able = 0;
        let mut total = 0;
        for source in &self.sources {
            if !source.exists(path) {
                continue;
            }
            total += source.len(path)?;
            able += 1;
        }
        if able == 0 {
            return Err(SourceError::does_not_exist(path));
        }
        Ok(total)
    }

    fn kind(&self, path: &[Segment]) -> NodeKind {
        self.trace(QueryOp::Kind, path);
        self.find(path)
            .map_or(NodeKind::Undefined, |source| source.kind(&[]))
    }

    fn as_mutable(&self) -> Option<&dyn Mutable> {
        Some(self)
    }

    fn as_multi_source(&self) -> Option<&MultiSource> {
        Some(self)
    }
}

impl Mutable for MultiSource {
    fn mutate(&self, mutation: &Mutation) -> SourceRef {
        let sources = self
            .sources
            .iter()
            .map(|source| mutation.apply(source.clone()))
            .collect();
        Arc::new(Self::build(
            sources,
            self.settings(),
            self.tracer.clone(),
            "mutate",
        ))
    }
}

impl Mutation {
    /// Set scalar precedence on multi-sources: `true` means earlier sources
    /// win. Other sources, and multi-sources already set that way, are
    /// returned untouched.
    pub fn set_first(first: bool) -> Mutation {
        Mutation::new(format!("set_first({})", first), move |source: SourceRef| {
            if let Some(multi) = source.as_multi_source() {
                if multi.first != first {
                    return Arc::new(multi.with_first(first)) as SourceRef;
                }
            }
            source
        })
    }

    /// Set the container-merge policy on multi-sources: `true` means
    /// sequences concatenate and maps union. Other sources, and
    /// multi-sources already set that way, are returned untouched.
    pub fn set_combine(combine: bool) -> Mutation {
        Mutation::new(format!("set_combine({})", combine), move |source: SourceRef| {
            if let Some(multi) = source.as_multi_source() {
                if multi.combine != combine {
                    return Arc::new(multi.with_combine(combine)) as SourceRef;
                }
            }
            source
        })
    }
}
