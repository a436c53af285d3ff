//! Streaming path matching
//!
//! [`PathMatchingWriter`] sits between a document producer and a consumer.
//! It follows the document one structural event at a time, keeps a frame for
//! every open container that can still contain a match, and materializes
//! only the subtrees a path selects.
//!
//! # Architecture
//!
//! - `types`: engine state, frames, routes and statistics
//! - `transitions`: event routing; pass-through, weaving and predicate tests
//! - `policy`: what happens to matches ([`Rewriting`] or [`Projecting`])
//! - `engine`: construction, completion and the [`BasketWriter`](crate::writer::BasketWriter) surface
//!
//! # Performance
//!
//! Unmatched subtrees are copied through without allocation and with O(1)
//! state regardless of their size. Engine memory is bounded by the depth of
//! the document plus the size of the largest matched subtree. Segments whose
//! answer depends on the container length (negative indices and slice bounds)
//! buffer that container, unless [`NegativeIndexPolicy::Reject`](crate::config::NegativeIndexPolicy)
//! is configured.

mod engine;
mod policy;
mod transitions;
mod types;

pub use policy::{MatchPolicy, Projecting, Rewriting};
pub use types::{EngineState, EngineStats, PathMatchingWriter};
