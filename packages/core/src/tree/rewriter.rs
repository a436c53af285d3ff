//! Whole-tree rewriting

use crate::basket::{Basket, PropertySet};
use crate::path::{Path, PathSegment};

/// A copy of `value` with every subtree matched by `path` replaced by
/// `transform` applied to it
///
/// Unmatched structure is shared with `value`. When nothing matches the
/// result equals `value`. `transform` sees matches in document order, as it
/// does when rewriting a stream.
pub fn rewrite<F>(path: &Path, value: &Basket, transform: &mut F) -> Basket
where
    F: FnMut(Basket) -> Basket,
{
    let Some(segment) = path.head() else {
        return transform(value.clone());
    };
    let tail = path.tail();

    match (segment, value) {
        (PathSegment::Keys(_), Basket::Object(properties)) => {
            Basket::Object(properties.map(|name, child| {
                if segment.match_key(name).is_match() {
                    rewrite(&tail, child, transform)
                } else {
                    child.clone()
                }
            }))
        }
        (PathSegment::Indices(_), Basket::Array(items)) => {
            let mut indices = segment.resolve_indices(items.len());
            indices.sort_unstable();
            let mut updated = items.clone();
            for index in indices {
                if let Some(child) = items.get(index) {
                    updated = updated.with(index, rewrite(&tail, child, transform));
                }
            }
            Basket::Array(updated)
        }
        (PathSegment::Slice { .. }, Basket::Array(items)) => {
            let mut updated = items.clone();
            for index in segment.resolve_slice(items.len()) {
                if let Some(child) = items.get(index) {
                    updated = updated.with(index, rewrite(&tail, child, transform));
                }
            }
            Basket::Array(updated)
        }
        (PathSegment::Wildcard, Basket::Array(items)) => {
            Basket::Array(items.map(|child| rewrite(&tail, child, transform)))
        }
        (PathSegment::Wildcard, Basket::Object(properties)) => {
            Basket::Object(properties.map(|_, child| rewrite(&tail, child, transform)))
        }
        (PathSegment::DeepScan(name), _) => scan(name, &tail, value, transform),
        (PathSegment::Conditional(predicate), Basket::Array(items)) => {
            Basket::Array(items.map(|child| {
                if predicate.test(child) {
                    rewrite(&tail, child, transform)
                } else {
                    child.clone()
                }
            }))
        }
        (PathSegment::Conditional(predicate), Basket::Object(properties)) => {
            Basket::Object(properties.map(|_, child| {
                if predicate.test(child) {
                    rewrite(&tail, child, transform)
                } else {
                    child.clone()
                }
            }))
        }
        _ => value.clone(),
    }
}

fn scan<F>(name: &str, tail: &Path, value: &Basket, transform: &mut F) -> Basket
where
    F: FnMut(Basket) -> Basket,
{
    match value {
        Basket::Object(properties) => Basket::Object(scan_properties(name, tail, properties, transform)),
        Basket::Array(items) => Basket::Array(items.map(|child| scan(name, tail, child, transform))),
        _ => value.clone(),
    }
}

fn scan_properties<F>(name: &str, tail: &Path, properties: &PropertySet, transform: &mut F) -> PropertySet
where
    F: FnMut(Basket) -> Basket,
{
    properties.map(|key, child| {
        if key == name {
            rewrite(tail, child, transform)
        } else {
            scan(name, tail, child, transform)
        }
    })
}
