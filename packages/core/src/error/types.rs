//! Error types
//!
//! Core error enums for event writing, path parsing and the JSON bridge.

use crate::config::ConfigurationError;

/// Result alias for event protocol operations
pub type WriterResult<T> = std::result::Result<T, WriterError>;

/// Crate-level result alias
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Misuse of the structural event protocol
///
/// Raised both by [`BasketWeaver`](crate::writer::BasketWeaver) and by the
/// streaming engine. Every variant is fatal for the writer that reported it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WriterError {
    #[error("{operation} called when value already complete")]
    AlreadyComplete { operation: &'static str },

    #[error("weave called on incomplete value")]
    Incomplete,

    #[error("{operation} called while writing object, but key not given")]
    MissingKey { operation: &'static str },

    #[error("key '{key}' given, but key already set")]
    DuplicateKey { key: String },

    #[error("key called, but not writing object")]
    KeyOutsideObject,

    #[error("end called without corresponding begin")]
    UnmatchedEnd,

    #[error("end called after a key that was never given a value")]
    DanglingKey,

    #[error("{operation} called after the document was complete")]
    CompleteWriterMisuse { operation: &'static str },

    #[error("writer was poisoned by an earlier error")]
    Poisoned,

    #[error("nesting depth {depth} exceeds the configured maximum of {max}")]
    DepthLimitExceeded { depth: usize, max: usize },

    #[error("segment {segment} needs the container length and cannot be matched while streaming")]
    UnsupportedSegment { segment: String },

    #[error("failed to encode output: {message}")]
    Encoding { message: String },
}

/// Malformed path text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("path '{path}' must start with '$' or '@'")]
    MissingRoot { path: String },

    #[error("unrecognised segment in path '{path}' at position {position}")]
    UnrecognisedSegment { path: String, position: usize },

    #[error("invalid index '{token}' in path '{path}'")]
    InvalidIndex { path: String, token: String },

    #[error("invalid slice '{token}' in path '{path}'")]
    InvalidSlice { path: String, token: String },

    #[error("path '{path}' has a predicate placeholder at position {position} but no predicate was supplied for it")]
    UnmatchedPredicate { path: String, position: usize },

    #[error("path '{path}' was given {count} predicate(s) it never used")]
    UnusedPredicates { path: String, count: usize },
}

/// Failure while bridging JSON text and the event protocol
#[derive(Debug, thiserror::Error)]
pub enum JsonError {
    #[error("JSON syntax error: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("writer rejected JSON input: {0}")]
    Writer(#[from] WriterError),
}

/// Unified error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Writer(#[from] WriterError),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Json(#[from] JsonError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}
