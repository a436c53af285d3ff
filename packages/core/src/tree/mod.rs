//! Whole-tree path operations
//!
//! The non-streaming counterparts of the match engine: apply a [`Path`] to a
//! Basket that is already built. The streaming engine falls back to these for
//! the remainder of a path once it has woven a subtree (after a predicate
//! accepted an item, or when a segment needs the length of an array).
//!
//! Both operations follow the same per-segment rules:
//!
//! - keys and indices are visited in declared order, missing ones skipped
//! - negative indices and slice bounds count back from the array length
//! - a deep scan hands each matching key to the rest of the path and does
//!   not scan again inside that value

mod projector;
mod rewriter;

pub use projector::project;
pub use rewriter::rewrite;

use crate::basket::Basket;
use crate::path::Path;

/// Something that extracts zero or more values from a Basket
pub trait Projector {
    fn project(&self, value: &Basket) -> Vec<Basket>;
}

impl Projector for Path {
    fn project(&self, value: &Basket) -> Vec<Basket> {
        project(self, value)
    }
}

impl<F> Projector for F
where
    F: Fn(&Basket) -> Vec<Basket>,
{
    fn project(&self, value: &Basket) -> Vec<Basket> {
        self(value)
    }
}
