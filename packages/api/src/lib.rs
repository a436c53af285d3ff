//! Wicker Public API
//!
//! Streaming path queries over immutable Basket documents with a fluent
//! builder. Queries run over in-memory values or straight over JSON text,
//! in which case only the matched parts of the document are ever built.
//!
//! ```
//! use wicker::Wicker;
//!
//! let authors = Wicker::path("$..book[1, 0].author")
//!     .project_json(r#"{"book": [{"author": "Rees"}, {"author": "Waugh"}]}"#)?;
//! assert_eq!(authors.len(), 2);
//! assert_eq!(authors[0].as_str(), Some("Waugh"));
//! # Ok::<(), wicker::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod builder;

// Re-export all public API components
pub use builder::*;

// Re-export the core crate's modules and canonical types
pub use wicker_core::prelude::*;
pub use wicker_core::{basket, config, json, lens, path, predicate, streaming, tree, writer};
pub use wicker_core::{Error, Result};

/// Main Wicker entry point providing static builder methods
pub struct Wicker;

impl Wicker {
    /// Start a query with the default configuration
    ///
    /// Shorthand for `QueryBuilder::new()`
    #[must_use]
    pub fn query() -> QueryBuilder {
        QueryBuilder::new()
    }

    /// Start a query over `path`
    ///
    /// Shorthand for `QueryBuilder::new().path(path)`
    #[must_use]
    pub fn path(path: impl Into<String>) -> QueryBuilder<PathSet> {
        QueryBuilder::new().path(path)
    }
}
