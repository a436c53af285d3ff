//! Path model
//!
//! A [`Path`] is an immutable list of [`PathSegment`]s. Paths are shared
//! between every frame of a streaming match, so the segments live behind one
//! reference-counted slice and [`Path::tail`] is a constant-time view.
//!
//! # Architecture
//!
//! - `segment`: [`PathSegment`] and [`MatchResult`]
//! - `parser`: the textual form, `$.store.book[0, 1]..author`

mod parser;
mod segment;

use std::fmt;
use std::sync::Arc;

pub use parser::parse_path;
pub use segment::{MatchResult, PathSegment};

use crate::error::PathError;
use crate::predicate::BasketPredicate;

/// Immutable sequence of path segments
#[derive(Clone)]
pub struct Path {
    segments: Arc<[PathSegment]>,
    offset: usize,
}

impl Path {
    /// The empty path, which matches the root value itself
    #[must_use]
    pub fn root() -> Self {
        Self::from_segments(Vec::new())
    }

    #[must_use]
    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self {
            segments: Arc::from(segments),
            offset: 0,
        }
    }

    /// Parse path text, binding each `[?]` to the next supplied predicate
    ///
    /// # Errors
    ///
    /// Returns a `PathError` if the text is malformed or the number of
    /// predicates does not match the number of `[?]` placeholders.
    pub fn parse(
        text: &str,
        predicates: impl IntoIterator<Item = BasketPredicate>,
    ) -> Result<Self, PathError> {
        parse_path(text, predicates)
    }

    /// Parse path text that has no `[?]` placeholders
    ///
    /// # Errors
    ///
    /// Returns a `PathError` if the text is malformed.
    pub fn parse_plain(text: &str) -> Result<Self, PathError> {
        parse_path(text, std::iter::empty())
    }

    #[inline]
    #[must_use]
    pub fn head(&self) -> Option<&PathSegment> {
        self.segments.get(self.offset)
    }

    /// Everything after the head; the tail of the empty path is empty
    #[must_use]
    pub fn tail(&self) -> Self {
        Self {
            segments: Arc::clone(&self.segments),
            offset: (self.offset + 1).min(self.segments.len()),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offset >= self.segments.len()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len() - self.offset
    }

    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments[self.offset..]
    }

    /// This path extended by one segment
    #[must_use]
    pub fn then(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments().to_vec();
        segments.push(segment);
        Self::from_segments(segments)
    }

    /// Whether any segment depends on array length or on a predicate, which
    /// means streaming will weave the containers those segments apply to
    #[must_use]
    pub fn buffers_while_streaming(&self) -> bool {
        self.segments()
            .iter()
            .any(|segment| segment.requires_length() || segment.is_conditional())
    }
}

impl Default for Path {
    fn default() -> Self {
        Self::root()
    }
}

impl FromIterator<PathSegment> for Path {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self::from_segments(iter.into_iter().collect())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in self.segments() {
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Path({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_and_tail_share_segments() {
        let path = Path::from_segments(vec![
            PathSegment::key("store"),
            PathSegment::Wildcard,
            PathSegment::index(0),
        ]);
        assert_eq!(path.len(), 3);
        let tail = path.tail();
        assert!(matches!(tail.head(), Some(PathSegment::Wildcard)));
        assert_eq!(tail.len(), 2);
        assert_eq!(tail.to_string(), "$.*[0]");

        let exhausted = tail.tail().tail();
        assert!(exhausted.is_empty());
        assert!(exhausted.tail().is_empty());
        assert!(exhausted.head().is_none());
    }

    #[test]
    fn test_then_appends() {
        let path = Path::root().then(PathSegment::key("a")).then(PathSegment::index(2));
        assert_eq!(path.to_string(), "$.a[2]");
        assert_eq!(path.tail().then(PathSegment::Wildcard).to_string(), "$[2].*");
    }

    #[test]
    fn test_buffering_detection() {
        assert!(!Path::parse_plain("$.a[0]..b[*]").expect("valid").buffers_while_streaming());
        assert!(Path::parse_plain("$.a[-1]").expect("valid").buffers_while_streaming());
        assert!(Path::parse("$.a[?]", [crate::predicate::is_null()])
            .expect("valid")
            .buffers_while_streaming());
    }
}
