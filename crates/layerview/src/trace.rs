//! Runtime instrumentation for composite views.
//!
//! Every composite view carries a [`Tracer`]. The tracer always emits
//! `tracing` events at TRACE level under the `layerview` target, and can
//! additionally forward to an injected [`TraceHook`] for callers that want
//! to observe view construction and queries without a subscriber.
//!
//! Each composite gets a process-unique [`NodeId`] when it is built, which
//! is what ties construction events to later query events.

use crate::path::{Segment, display_path};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Identifier of a composite view instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    /// Allocate a fresh identifier.
    pub fn next() -> Self {
        NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw counter value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which composite produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Offset,
    Prefix,
    Multi,
}

impl ViewKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewKind::Offset => "offset",
            ViewKind::Prefix => "prefix",
            ViewKind::Multi => "multi",
        }
    }
}

/// Which read operation a query event is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOp {
    Exists,
    GetBool,
    GetInt,
    GetFloat,
    GetString,
    Recurse,
    Keys,
    Len,
    Kind,
}

impl QueryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryOp::Exists => "exists",
            QueryOp::GetBool => "get_bool",
            QueryOp::GetInt => "get_int",
            QueryOp::GetFloat => "get_float",
            QueryOp::GetString => "get_string",
            QueryOp::Recurse => "recurse",
            QueryOp::Keys => "keys",
            QueryOp::Len => "len",
            QueryOp::Kind => "kind",
        }
    }
}

/// Observer for view construction and query events.
///
/// All methods have empty default implementations, allowing hooks
/// to implement only the events they care about.
pub trait TraceHook: Send + Sync {
    /// Called when a composite view is built.
    ///
    /// # Arguments
    ///
    /// * `node` - Identifier of the new view
    /// * `kind` - Which composite it is
    /// * `origin` - What built it (`"new"`, `"recurse"`, `"copy"`, `"mutate"`, ...)
    fn on_construct(&self, _node: NodeId, _kind: ViewKind, _origin: &str) {}

    /// Called when a read operation enters a composite view.
    fn on_query(&self, _node: NodeId, _kind: ViewKind, _op: QueryOp, _path: &[Segment]) {}
}

/// Carrier for an optional [`TraceHook`], cloned into derived views.
#[derive(Clone, Default)]
pub struct Tracer {
    hook: Option<Arc<dyn TraceHook>>,
}

impl Tracer {
    /// A tracer that forwards to `hook` in addition to `tracing`.
    pub fn new(hook: Arc<dyn TraceHook>) -> Self {
        Self { hook: Some(hook) }
    }

    pub fn has_hook(&self) -> bool {
        self.hook.is_some()
    }

    pub(crate) fn construct(&self, node: NodeId, kind: ViewKind, origin: &str) {
        tracing::trace!(target: "layerview", %node, view = kind.as_str(), origin, "construct");
        if let Some(hook) = &self.hook {
            hook.on_construct(node, kind, origin);
        }
    }

    pub(crate) fn query(&self, node: NodeId, kind: ViewKind, op: QueryOp, path: &[Segment]) {
        tracing::trace!(
            target: "layerview",
            %node,
            view = kind.as_str(),
            op = op.as_str(),
            path = %display_path(path),
            "query"
        );
        if let Some(hook) = &self.hook {
            hook.on_query(node, kind, op, path);
        }
    }
}

impl fmt::Debug for Tracer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracer")
            .field("hook", &self.hook.is_some())
            .finish()
    }
}
