//! In-memory leaf used by the unit tests.

use crate::error::{SourceError, SourceResult};
use crate::path::Segment;
use crate::source::{NodeKind, Source, SourceRef};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Fixture {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Seq(Vec<Fixture>),
    Map(Vec<(String, Fixture)>),
}

impl Fixture {
    fn kind(&self) -> NodeKind {
        match self {
            Fixture::Null => NodeKind::Null,
            Fixture::Bool(_) => NodeKind::Bool,
            Fixture::Int(_) => NodeKind::Int,
            Fixture::Float(_) => NodeKind::Float,
            Fixture::Str(_) => NodeKind::String,
            Fixture::Seq(_) => NodeKind::Sequence,
            Fixture::Map(_) => NodeKind::Map,
        }
    }

    fn child(&self, segment: &Segment) -> Option<&Fixture> {
        match self {
            Fixture::Seq(items) => items.get(segment.as_index()?),
            Fixture::Map(entries) => {
                let key = segment.as_key();
                entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
            }
            _ => None,
        }
    }
}

pub(crate) fn s(value: &str) -> Fixture {
    Fixture::Str(value.to_string())
}

pub(crate) fn seq(items: Vec<Fixture>) -> Fixture {
    Fixture::Seq(items)
}

pub(crate) fn map(entries: Vec<(&str, Fixture)>) -> Fixture {
    Fixture::Map(
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
    )
}

pub(crate) fn leaf(root: Fixture) -> SourceRef {
    Arc::new(FixtureSource {
        root: Arc::new(root),
        base: Vec::new(),
    })
}

#[derive(Debug, Clone)]
pub(crate) struct FixtureSource {
    root: Arc<Fixture>,
    base: Vec<Segment>,
}

impl FixtureSource {
    fn node(&self, path: &[Segment]) -> Option<&Fixture> {
        self.base
            .iter()
            .chain(path)
            .try_fold(&*self.root, |node, segment| node.child(segment))
    }

    fn scalar<T>(
        &self,
        path: &[Segment],
        expected: NodeKind,
        pick: impl Fn(&Fixture) -> Option<T>,
    ) -> SourceResult<T> {
        let node = self
            .node(path)
            .ok_or_else(|| SourceError::does_not_exist(path))?;
        pick(node).ok_or_else(|| SourceError::wrong_type(path, expected, node.kind()))
    }
}

impl Source for FixtureSource {
    fn exists(&self, path: &[Segment]) -> bool {
        self.node(path).is_some()
    }

    fn get_bool(&self, path: &[Segment]) -> SourceResult<bool> {
        self.scalar(path, NodeKind::Bool, |n| match n {
            Fixture::Bool(b) => Some(*b),
            _ => None,
        })
    }

    fn get_int(&self, path: &[Segment]) -> SourceResult<i64> {
        self.scalar(path, NodeKind::Int, |n| match n {
            Fixture::Int(i) => Some(*i),
            _ => None,
        })
    }

    fn get_float(&self, path: &[Segment]) -> SourceResult<f64> {
        self.scalar(path, NodeKind::Float, |n| match n {
            Fixture::Float(f) => Some(*f),
            _ => None,
        })
    }

    fn get_string(&self, path: &[Segment]) -> SourceResult<String> {
        self.scalar(path, NodeKind::String, |n| match n {
            Fixture::Str(s) => Some(s.clone()),
            _ => None,
        })
    }

    fn recurse(&self, path: &[Segment]) -> Option<SourceRef> {
        self.node(path)?;
        let mut base = self.base.clone();
        base.extend_from_slice(path);
        Some(Arc::new(FixtureSource {
            root: self.root.clone(),
            base,
        }))
    }

    fn keys(&self, path: &[Segment]) -> SourceResult<Vec<String>> {
        self.scalar(path, NodeKind::Map, |n| match n {
            Fixture::Map(entries) => Some(entries.iter().map(|(k, _)| k.clone()).collect()),
            _ => None,
        })
    }

    fn len(&self, path: &[Segment]) -> SourceResult<usize> {
        self.scalar(path, NodeKind::Sequence, |n| match n {
            Fixture::Seq(items) => Some(items.len()),
            Fixture::Map(entries) => Some(entries.len()),
            _ => None,
        })
    }

    fn kind(&self, path: &[Segment]) -> NodeKind {
        self.node(path).map_or(NodeKind::Undefined, Fixture::kind)
    }
}
