//! Path segments for addressing values inside a [`Source`](crate::Source).
//!
//! A path is an ordered slice of [`Segment`]s. A segment that addresses a map
//! is a field name, one that addresses a sequence is a zero-based index.
//! Segments are tagged so that callers who build paths with real indices never
//! go through a string round-trip; keys that happen to look like numbers are
//! still accepted wherever an index is expected.
//!
//! # Example
//!
//! ```rust
//! use layerview::{path, Segment};
//!
//! let p = path!["format", "html", 0];
//! assert_eq!(p[2], Segment::Index(0));
//! assert_eq!(layerview::display_path(&p).to_string(), "format.html.0");
//! ```

use std::borrow::Cow;
use std::fmt;

/// One step of a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A map field name.
    Key(String),
    /// A sequence position.
    Index(usize),
}

impl Segment {
    /// The sequence position this segment addresses, if it can address one.
    ///
    /// `Key` segments qualify when their text is a base-10 non-negative
    /// integer.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Segment::Index(index) => Some(*index),
            Segment::Key(key) => parse_index(key),
        }
    }

    /// The textual rendering used for map lookups.
    pub fn as_key(&self) -> Cow<'_, str> {
        match self {
            Segment::Key(key) => Cow::Borrowed(key),
            Segment::Index(index) => Cow::Owned(index.to_string()),
        }
    }

    /// Literal comparison on the textual rendering, so `Key("0")` matches
    /// `Index(0)`.
    pub fn matches(&self, other: &Segment) -> bool {
        match (self, other) {
            (Segment::Key(a), Segment::Key(b)) => a == b,
            (Segment::Index(a), Segment::Index(b)) => a == b,
            _ => self.as_key() == other.as_key(),
        }
    }
}

fn parse_index(key: &str) -> Option<usize> {
    // `usize::from_str` accepts a leading '+', which is not a decimal index.
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse().ok()
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => f.write_str(key),
            Segment::Index(index) => write!(f, "{}", index),
        }
    }
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Segment::Key(key.to_string())
    }
}

impl From<String> for Segment {
    fn from(key: String) -> Self {
        Segment::Key(key)
    }
}

impl From<&String> for Segment {
    fn from(key: &String) -> Self {
        Segment::Key(key.clone())
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Segment::Index(index)
    }
}

/// Build a `Vec<Segment>` from field names and indices.
///
/// ```rust
/// use layerview::{path, Segment};
///
/// assert_eq!(path!["a", 1], vec![Segment::Key("a".into()), Segment::Index(1)]);
/// assert!(path![].is_empty());
/// ```
#[macro_export]
macro_rules! path {
    () => {
        ::std::vec::Vec::<$crate::Segment>::new()
    };
    ($($segment:expr),+ $(,)?) => {
        ::std::vec![$($crate::Segment::from($segment)),+]
    };
}

/// Dot-separated rendering of a path for diagnostics.
pub fn display_path(path: &[Segment]) -> PathDisplay<'_> {
    PathDisplay(path)
}

/// See [`display_path`].
#[derive(Debug, Clone, Copy)]
pub struct PathDisplay<'a>(&'a [Segment]);

impl fmt::Display for PathDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
