//! Error constructor helpers
//!
//! Shorthand factories used by the parser and the JSON bridge.

use super::types::{PathError, WriterError};

impl PathError {
    /// Creates an error for text that does not start with a root marker
    pub fn missing_root(path: impl Into<String>) -> Self {
        Self::MissingRoot { path: path.into() }
    }

    /// Creates an error for an unparseable segment at `position`
    pub fn unrecognised(path: impl Into<String>, position: usize) -> Self {
        Self::UnrecognisedSegment {
            path: path.into(),
            position,
        }
    }

    pub fn invalid_index(path: impl Into<String>, token: impl Into<String>) -> Self {
        Self::InvalidIndex {
            path: path.into(),
            token: token.into(),
        }
    }

    pub fn invalid_slice(path: impl Into<String>, token: impl Into<String>) -> Self {
        Self::InvalidSlice {
            path: path.into(),
            token: token.into(),
        }
    }

    /// The path text these errors refer to
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::MissingRoot { path }
            | Self::UnrecognisedSegment { path, .. }
            | Self::InvalidIndex { path, .. }
            | Self::InvalidSlice { path, .. }
            | Self::UnmatchedPredicate { path, .. }
            | Self::UnusedPredicates { path, .. } => path,
        }
    }
}

impl WriterError {
    /// Creates an encoding error from any displayable cause
    pub fn encoding(cause: impl std::fmt::Display) -> Self {
        Self::Encoding {
            message: cause.to_string(),
        }
    }
}
