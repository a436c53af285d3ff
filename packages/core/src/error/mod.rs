//! Error handling module
//!
//! Error types for every layer of the crate: event protocol misuse while
//! writing or streaming, malformed path text, JSON bridge failures and invalid
//! configuration. Each layer has its own `thiserror` enum; [`Error`] unifies them.

mod constructors;
mod types;

pub use types::{Error, JsonError, PathError, Result, WriterError, WriterResult};
