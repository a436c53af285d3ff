//! Wicker Prelude
//!
//! The types most programs need to build, match and rewrite documents.

// Values
pub use crate::basket::{ArrayContents, Basket, Number, PropertySet};

// Paths and predicates
pub use crate::lens::Lens;
pub use crate::path::{MatchResult, Path, PathSegment};
pub use crate::predicate::BasketPredicate;

// Event protocol
pub use crate::writer::{BasketWeaver, BasketWriter, Discard, Event, EventRecorder};

// Streaming engine
pub use crate::config::{NegativeIndexPolicy, StreamingConfig};
pub use crate::streaming::{EngineStats, MatchPolicy, PathMatchingWriter, Projecting, Rewriting};
pub use crate::tree::Projector;

// Error types
pub use crate::error::{JsonError, PathError, WriterError};
