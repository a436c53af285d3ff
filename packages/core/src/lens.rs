//! Lenses: reusable paths with convenience operations
//!
//! A [`Lens`] wraps a [`Path`] and offers the common ways of using one:
//! reading matched values, writing through them, turning them into
//! predicates, and building streaming engines.
//!
//! ```
//! use wicker_core::basket::Basket;
//! use wicker_core::lens::Lens;
//!
//! let doc = Basket::object([("a", Basket::array([Basket::from(1), Basket::from(2)]))]);
//! let second = Lens::root().key("a").index(1);
//! assert_eq!(second.get_one(&doc), Some(Basket::from(2)));
//! assert_eq!(second.set(&doc, Basket::Null).to_string(), r#"{"a":[1,null]}"#);
//! ```

use std::fmt;
use std::sync::Arc;

use crate::basket::{Basket, Number};
use crate::error::PathError;
use crate::path::{Path, PathSegment};
use crate::predicate::{self, BasketPredicate};
use crate::streaming::{PathMatchingWriter, Projecting, Rewriting};
use crate::tree::{self, Projector};
use crate::writer::BasketWriter;

/// A path plus the operations built on it
#[derive(Clone, Debug, Default)]
pub struct Lens {
    path: Path,
}

impl Lens {
    /// Lens on the root value
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Lens from path text, binding each `[?]` to the next predicate
    ///
    /// # Errors
    ///
    /// Returns a `PathError` if the text is malformed.
    pub fn new(
        text: &str,
        predicates: impl IntoIterator<Item = BasketPredicate>,
    ) -> Result<Self, PathError> {
        Path::parse(text, predicates).map(Self::from)
    }

    /// Lens from path text without `[?]` placeholders
    ///
    /// # Errors
    ///
    /// Returns a `PathError` if the text is malformed.
    pub fn parse(text: &str) -> Result<Self, PathError> {
        Path::parse_plain(text).map(Self::from)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn then(&self, segment: PathSegment) -> Self {
        Self {
            path: self.path.then(segment),
        }
    }

    #[must_use]
    pub fn key(&self, name: impl Into<Arc<str>>) -> Self {
        self.then(PathSegment::key(name))
    }

    #[must_use]
    pub fn keys<K: Into<Arc<str>>>(&self, names: impl IntoIterator<Item = K>) -> Self {
        self.then(PathSegment::keys(names))
    }

    #[must_use]
    pub fn index(&self, index: i64) -> Self {
        self.then(PathSegment::index(index))
    }

    #[must_use]
    pub fn indices(&self, indices: impl IntoIterator<Item = i64>) -> Self {
        self.then(PathSegment::indices(indices))
    }

    #[must_use]
    pub fn slice(&self, start: Option<i64>, end: Option<i64>) -> Self {
        self.then(PathSegment::slice(start, end))
    }

    /// Every item or property value
    #[must_use]
    pub fn all(&self) -> Self {
        self.then(PathSegment::Wildcard)
    }

    /// `name` at any depth below
    #[must_use]
    pub fn any(&self, name: impl Into<Arc<str>>) -> Self {
        self.then(PathSegment::deep_scan(name))
    }

    /// Items or property values accepted by `predicate`
    #[must_use]
    pub fn matching(&self, predicate: BasketPredicate) -> Self {
        self.then(PathSegment::conditional(predicate))
    }

    /// Items or property values that are objects with `key`
    #[must_use]
    pub fn having_key(&self, key: impl Into<Arc<str>>) -> Self {
        self.matching(predicate::has_key(key))
    }

    /// Every matched value, in match order
    #[must_use]
    pub fn get_all(&self, value: &Basket) -> Vec<Basket> {
        tree::project(&self.path, value)
    }

    /// The matched value when there is exactly one
    #[must_use]
    pub fn get_one(&self, value: &Basket) -> Option<Basket> {
        let mut matches = self.get_all(value);
        if matches.len() == 1 { matches.pop() } else { None }
    }

    /// `value` with every matched value replaced by `transform` applied to it
    pub fn update<F>(&self, value: &Basket, mut transform: F) -> Basket
    where
        F: FnMut(Basket) -> Basket,
    {
        tree::rewrite(&self.path, value, &mut transform)
    }

    /// Every match converted by `convert`, or `None` if any match does not
    /// convert
    pub fn get_all_as<T, F>(&self, value: &Basket, convert: F) -> Option<Vec<T>>
    where
        F: FnMut(&Basket) -> Option<T>,
    {
        self.get_all(value).iter().map(convert).collect()
    }

    /// Every match as a string, or `None` if some match is not a string
    #[must_use]
    pub fn get_strings(&self, value: &Basket) -> Option<Vec<String>> {
        self.get_all_as(value, |found| found.as_str().map(str::to_owned))
    }

    /// `value` with every matched string replaced by `transform` applied to
    /// it; matches of other kinds are left as they are
    pub fn update_strings<F>(&self, value: &Basket, mut transform: F) -> Basket
    where
        F: FnMut(&str) -> String,
    {
        self.update(value, |found| {
            let replaced = found.as_str().map(&mut transform);
            replaced.map_or(found, Basket::from)
        })
    }

    /// `value` with every matched value replaced by `replacement`
    #[must_use]
    pub fn set(&self, value: &Basket, replacement: Basket) -> Basket {
        self.update(value, |_| replacement.clone())
    }

    /// Predicate accepting values where this lens matches something
    #[must_use]
    pub fn exists(&self) -> BasketPredicate {
        let lens = self.clone();
        BasketPredicate::new(format!("exists({lens})"), move |value| {
            !lens.get_all(value).is_empty()
        })
    }

    /// Predicate accepting values where every match is accepted by `predicate`
    ///
    /// Values with no match are accepted.
    #[must_use]
    pub fn all_match(&self, predicate: BasketPredicate) -> BasketPredicate {
        let lens = self.clone();
        let label = format!("all({lens}, {})", predicate.label());
        BasketPredicate::new(label, move |value| {
            lens.get_all(value).iter().all(|found| predicate.test(found))
        })
    }

    /// Predicate accepting values where some match is accepted by `predicate`
    #[must_use]
    pub fn any_match(&self, predicate: BasketPredicate) -> BasketPredicate {
        let lens = self.clone();
        let label = format!("any({lens}, {})", predicate.label());
        BasketPredicate::new(label, move |value| {
            lens.get_all(value).iter().any(|found| predicate.test(found))
        })
    }

    /// Predicate accepting values where some match is the string `expected`
    #[must_use]
    pub fn matching_string(&self, expected: impl Into<Arc<str>>) -> BasketPredicate {
        self.any_match(predicate::string_eq(expected))
    }

    /// Predicate accepting values where some match is the number `expected`
    #[must_use]
    pub fn matching_number(&self, expected: impl Into<Number>) -> BasketPredicate {
        self.any_match(predicate::number_eq(expected))
    }

    /// Streaming engine forwarding a document to `sink` with matches rewritten
    pub fn rewriting<W, F>(&self, sink: W, transform: F) -> PathMatchingWriter<Rewriting<W, F>>
    where
        W: BasketWriter,
        F: FnMut(Basket) -> Basket,
    {
        PathMatchingWriter::rewriting(self.path.clone(), sink, transform)
    }

    /// Streaming engine collecting matches
    #[must_use]
    pub fn projecting(&self) -> PathMatchingWriter<Projecting> {
        PathMatchingWriter::projecting(self.path.clone())
    }
}

impl From<Path> for Lens {
    fn from(path: Path) -> Self {
        Self { path }
    }
}

impl fmt::Display for Lens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.path, f)
    }
}

impl Projector for Lens {
    fn project(&self, value: &Basket) -> Vec<Basket> {
        self.get_all(value)
    }
}
