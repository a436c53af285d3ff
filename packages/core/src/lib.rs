//! # Wicker Core
//!
//! Streaming path matching over immutable Basket documents.
//!
//! A Basket is a JSON-shaped value with persistent, structurally shared
//! collections. Documents travel between components as structural events
//! (begin object, key, value, end); the [`PathMatchingWriter`] follows that
//! stream and only materializes the subtrees a path selects, either
//! rewriting them in place or collecting them.
//!
//! ## Features
//!
//! - **Immutable values** with O(log n) structural updates
//! - **Streaming matching** whose memory does not grow with unmatched input
//! - **Rewrite and projection** policies over one generic engine
//! - **Declared-order projection** for multi-key and multi-index segments
//! - **Predicates** as path segments, evaluated on the candidate value
//! - **JSON bridge** that feeds the engine straight from the parser
//!
//! ## Usage
//!
//! ```
//! use wicker_core::prelude::*;
//!
//! let path = Path::parse_plain("$..book[1, 0].title")?;
//! let text = r#"{"store": {"book": [{"title": "A"}, {"title": "B"}]}}"#;
//!
//! let mut engine = PathMatchingWriter::projecting(path);
//! wicker_core::json::read_str(text, &mut engine)?;
//! assert_eq!(engine.finish()?, [Basket::from("B"), Basket::from("A")]);
//! # Ok::<(), wicker_core::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod basket;
pub mod config;
pub mod error;
pub mod json;
pub mod lens;
pub mod path;
pub mod predicate;
pub mod streaming;
pub mod tree;
pub mod writer;

// Prelude with canonical types
pub mod prelude;

pub use crate::error::{Error, Result};
pub use crate::prelude::*;
