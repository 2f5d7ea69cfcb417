//! Error conditions reported by [`Source`](crate::Source) operations.

use crate::path::{Segment, display_path};
use crate::source::NodeKind;
use thiserror::Error;

/// Result type alias for source reads.
pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// The class of a [`SourceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The path does not resolve to any value.
    Absence,
    /// The value at the path is not of the requested kind.
    TypeMismatch,
    /// A segment that must be an index under an active shift is not one.
    MalformedKey,
}

/// Errors that can occur while reading through a source.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SourceError {
    /// Nothing lives at the path.
    #[error("key {} does not exist", display_path(.path))]
    DoesNotExist {
        /// Path as seen by the view that gave up
        path: Vec<Segment>,
    },

    /// The path resolves, but to the wrong kind of value.
    #[error("key {} is {actual} (not {expected})", display_path(.path))]
    WrongType {
        /// Path as seen by the view that gave up
        path: Vec<Segment>,
        /// What the caller asked for
        expected: NodeKind,
        /// What is actually there
        actual: NodeKind,
    },

    /// A segment could not be read as a sequence index.
    #[error("expecting integer key at {}, got {segment:?}", display_path(.path))]
    MalformedKey {
        /// Path as seen by the offset view
        path: Vec<Segment>,
        /// The offending segment text
        segment: String,
    },
}

impl SourceError {
    /// Create a [`SourceError::DoesNotExist`] for `path`.
    pub fn does_not_exist(path: &[Segment]) -> Self {
        SourceError::DoesNotExist {
            path: path.to_vec(),
        }
    }

    /// Create a [`SourceError::WrongType`] for `path`.
    pub fn wrong_type(path: &[Segment], expected: NodeKind, actual: NodeKind) -> Self {
        SourceError::WrongType {
            path: path.to_vec(),
            expected,
            actual,
        }
    }

    /// The condition class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SourceError::DoesNotExist { .. } => ErrorKind::Absence,
            SourceError::WrongType { .. } => ErrorKind::TypeMismatch,
            SourceError::MalformedKey { .. } => ErrorKind::MalformedKey,
        }
    }

    /// The path the error was reported against.
    pub fn path(&self) -> &[Segment] {
        match self {
            SourceError::DoesNotExist { path }
            | SourceError::WrongType { path, .. }
            | SourceError::MalformedKey { path, .. } => path,
        }
    }

    /// True for [`ErrorKind::Absence`].
    pub fn is_absence(&self) -> bool {
        self.kind() == ErrorKind::Absence
    }
}
