//! Composable source-to-source transforms.
//!
//! A [`Mutation`] carries a configuration change (such as which source wins
//! for scalars) through a tree of composed sources. [`Mutation::apply`] runs
//! the transform on the node it is given and then, if that node owns
//! children (see [`Mutable`](crate::Mutable)), pushes the same mutation down
//! into each of them. Leaves that do not expose
//! [`as_mutable`](crate::Source::as_mutable) stop the descent.
//!
//! # Example
//!
//! ```rust,ignore
//! let settle = Mutation::set_first(false).then(Mutation::set_combine(false));
//! let merged = settle.apply(merged);
//! ```

use crate::source::SourceRef;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

type Transform = dyn Fn(SourceRef) -> SourceRef + Send + Sync;

/// A named transform from one source to another.
#[derive(Clone)]
pub struct Mutation {
    name: Cow<'static, str>,
    transform: Arc<Transform>,
}

impl Mutation {
    /// Wrap a transform. The name only shows up in diagnostics.
    pub fn new<F>(name: impl Into<Cow<'static, str>>, transform: F) -> Self
    where
        F: Fn(SourceRef) -> SourceRef + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            transform: Arc::new(transform),
        }
    }

    /// A mutation that changes nothing.
    pub fn identity() -> Self {
        Self::new("identity", |source| source)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sequential composition: `self` runs first, then `next` runs on its
    /// result.
    pub fn then(&self, next: Mutation) -> Mutation {
        let first = self.transform.clone();
        let second = next.transform.clone();
        Mutation {
            name: Cow::Owned(format!("{} then {}", self.name, next.name)),
            transform: Arc::new(move |source| second(first(source))),
        }
    }

    /// Run the transform on `source` only, without descending.
    pub fn transform(&self, source: SourceRef) -> SourceRef {
        (self.transform)(source)
    }

    /// Run the transform on `source`, then propagate into its children when
    /// it is mutable-capable.
    ///
    /// Transforms that wrap their input in a new composite must go through
    /// [`Mutation::transform`] instead: the wrapper would be descended into
    /// and wrapped again without end.
    pub fn apply(&self, source: SourceRef) -> SourceRef {
        let transformed = self.transform(source);
        tracing::trace!(target: "layerview", mutation = %self.name, "apply");
        match transformed.as_mutable() {
            Some(mutable) => mutable.mutate(self),
            None => transformed,
        }
    }
}

impl fmt::Debug for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mutation").field("name", &self.name).finish()
    }
}
