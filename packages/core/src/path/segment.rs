//! Path segments and match results
//!
//! A segment answers, for one array index or one object key at the current
//! level, whether that child is matched and whether the segment is used up by
//! the match. Answers are pure functions of the segment and the index or key.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use hashbrown::HashSet;

use crate::predicate::BasketPredicate;

/// Outcome of testing one child against a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    /// The child is not matched
    Unmatched,
    /// The child is matched and the segment is consumed; matching continues
    /// with the rest of the path below it
    MatchedBound,
    /// The child is matched but the segment stays active below it
    MatchedUnbound,
}

impl MatchResult {
    #[inline]
    #[must_use]
    pub fn is_match(self) -> bool {
        !matches!(self, Self::Unmatched)
    }
}

/// One step of a [`Path`](super::Path)
#[derive(Debug, Clone)]
pub enum PathSegment {
    /// Object fields by name; a single name is a plain key step
    Keys(Vec<Arc<str>>),
    /// Array positions; negative positions count back from the end
    Indices(Vec<i64>),
    /// Half-open `[start, end)` range of array positions; `None` is unbounded
    Slice { start: Option<i64>, end: Option<i64> },
    /// Every key or index of the current level
    Wildcard,
    /// A key with this name at any depth below the current point
    DeepScan(Arc<str>),
    /// Items of the current container whose value satisfies the predicate
    Conditional(BasketPredicate),
}

impl PathSegment {
    pub fn key(name: impl Into<Arc<str>>) -> Self {
        Self::Keys(vec![name.into()])
    }

    pub fn keys<K: Into<Arc<str>>>(names: impl IntoIterator<Item = K>) -> Self {
        Self::Keys(names.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn index(index: i64) -> Self {
        Self::Indices(vec![index])
    }

    pub fn indices(indices: impl IntoIterator<Item = i64>) -> Self {
        Self::Indices(indices.into_iter().collect())
    }

    #[must_use]
    pub fn slice(start: Option<i64>, end: Option<i64>) -> Self {
        Self::Slice { start, end }
    }

    pub fn deep_scan(name: impl Into<Arc<str>>) -> Self {
        Self::DeepScan(name.into())
    }

    #[must_use]
    pub fn conditional(predicate: BasketPredicate) -> Self {
        Self::Conditional(predicate)
    }

    /// Test the array child at `index`
    ///
    /// Negative positions cannot be answered without the array length, so
    /// they never match here; see [`requires_length`](Self::requires_length).
    #[must_use]
    pub fn match_index(&self, index: usize) -> MatchResult {
        let position = i64::try_from(index).unwrap_or(i64::MAX);
        match self {
            Self::Indices(indices) => bound_if(indices.contains(&position)),
            Self::Slice { start, end } => {
                let lower = start.unwrap_or(0);
                let within = lower >= 0
                    && position >= lower
                    && end.is_none_or(|upper| upper >= 0 && position < upper);
                bound_if(within)
            }
            Self::Wildcard => MatchResult::MatchedBound,
            Self::DeepScan(_) => MatchResult::MatchedUnbound,
            Self::Keys(_) | Self::Conditional(_) => MatchResult::Unmatched,
        }
    }

    /// Test the object child under `key`
    #[must_use]
    pub fn match_key(&self, key: &str) -> MatchResult {
        match self {
            Self::Keys(names) => bound_if(names.iter().any(|name| name.as_ref() == key)),
            Self::Wildcard => MatchResult::MatchedBound,
            Self::DeepScan(name) if name.as_ref() == key => MatchResult::MatchedBound,
            Self::DeepScan(_) => MatchResult::MatchedUnbound,
            Self::Indices(_) | Self::Slice { .. } | Self::Conditional(_) => MatchResult::Unmatched,
        }
    }

    /// Whether matching needs the length of the array being matched
    #[must_use]
    pub fn requires_length(&self) -> bool {
        match self {
            Self::Indices(indices) => indices.iter().any(|&index| index < 0),
            Self::Slice { start, end } => {
                start.is_some_and(|s| s < 0) || end.is_some_and(|e| e < 0)
            }
            _ => false,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_conditional(&self) -> bool {
        matches!(self, Self::Conditional(_))
    }

    /// Whether the segment can match children of an array
    #[must_use]
    pub fn applies_to_arrays(&self) -> bool {
        !matches!(self, Self::Keys(_))
    }

    /// Whether the segment can match children of an object
    #[must_use]
    pub fn applies_to_objects(&self) -> bool {
        !matches!(self, Self::Indices(_) | Self::Slice { .. })
    }

    /// Number of declared alternatives when the segment lists more than one
    /// index or key; matches are grouped per alternative in that case
    #[must_use]
    pub fn declared_slots(&self) -> Option<usize> {
        match self {
            Self::Keys(names) if names.len() > 1 => Some(names.len()),
            Self::Indices(indices) if indices.len() > 1 => Some(indices.len()),
            _ => None,
        }
    }

    /// Declared position of the alternative matching array child `index`
    #[must_use]
    pub fn slot_for_index(&self, index: usize) -> Option<usize> {
        let position = i64::try_from(index).ok()?;
        match self {
            Self::Indices(indices) => indices.iter().position(|&i| i == position),
            _ => None,
        }
    }

    /// Declared position of the alternative matching object child `key`
    #[must_use]
    pub fn slot_for_key(&self, key: &str) -> Option<usize> {
        match self {
            Self::Keys(names) => names.iter().position(|name| name.as_ref() == key),
            _ => None,
        }
    }

    /// Positions selected by an `Indices` segment in an array of `len` items
    ///
    /// Declared order, negative positions resolved against `len`, out of range
    /// and repeated positions dropped.
    #[must_use]
    pub fn resolve_indices(&self, len: usize) -> Vec<usize> {
        let Self::Indices(indices) = self else {
            return Vec::new();
        };
        let len = len as i64;
        let mut seen = HashSet::with_capacity(indices.len());
        indices
            .iter()
            .map(|&index| if index < 0 { len + index } else { index })
            .filter(|position| (0..len).contains(position) && seen.insert(*position))
            .map(|position| position as usize)
            .collect()
    }

    /// Names selected by a `Keys` segment, declared order, repeats dropped
    #[must_use]
    pub fn resolve_keys(&self) -> Vec<&Arc<str>> {
        let Self::Keys(names) = self else {
            return Vec::new();
        };
        let mut seen: HashSet<&str> = HashSet::with_capacity(names.len());
        names.iter().filter(|&name| seen.insert(&**name)).collect()
    }

    /// Range selected by a `Slice` segment in an array of `len` items
    #[must_use]
    pub fn resolve_slice(&self, len: usize) -> Range<usize> {
        let Self::Slice { start, end } = self else {
            return 0..0;
        };
        let len = len as i64;
        let clamp = |bound: i64| {
            let position = if bound < 0 { len + bound } else { bound };
            position.clamp(0, len) as usize
        };
        let lower = start.map_or(0, clamp);
        let upper = end.map_or(len as usize, clamp);
        lower..upper.max(lower)
    }
}

#[inline]
fn bound_if(matched: bool) -> MatchResult {
    if matched {
        MatchResult::MatchedBound
    } else {
        MatchResult::Unmatched
    }
}

/// Names that can be written as `.name` rather than `['name']`
pub(crate) fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// `name` in single quotes, with `'` and `\` escaped by a backslash
fn quote(name: &str) -> String {
    let mut quoted = String::with_capacity(name.len() + 2);
    quoted.push('\'');
    for c in name.chars() {
        if matches!(c, '\'' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('\'');
    quoted
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keys(names) if names.len() == 1 && is_plain_name(&names[0]) => {
                write!(f, ".{}", names[0])
            }
            Self::Keys(names) => {
                let quoted: Vec<String> = names.iter().map(|name| quote(name)).collect();
                write!(f, "[{}]", quoted.join(", "))
            }
            Self::Indices(indices) => {
                let listed: Vec<String> = indices.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", listed.join(", "))
            }
            Self::Slice { start, end } => {
                let start = start.map(|s| s.to_string()).unwrap_or_default();
                let end = end.map(|e| e.to_string()).unwrap_or_default();
                write!(f, "[{start}:{end}]")
            }
            Self::Wildcard => f.write_str(".*"),
            Self::DeepScan(name) => write!(f, "..{name}"),
            Self::Conditional(_) => f.write_str("[?]"),
        }
    }
}
