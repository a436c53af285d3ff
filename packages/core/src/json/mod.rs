//! JSON bridge
//!
//! Connects JSON text to the event protocol in both directions. Reading
//! drives a [`BasketWriter`] straight from the serde_json parser, so the
//! streaming engine can match a document without it ever being built;
//! [`JsonTextWriter`] turns events back into compact text.
//!
//! # Architecture
//!
//! - `reader`: `read_str`, `read_slice`, `read_reader`
//! - `writer`: [`JsonTextWriter`] and `Display` for [`Basket`]
//! - `value`: serde `Serialize`/`Deserialize` and `serde_json::Value` conversions

mod reader;
mod value;
mod writer;

pub use reader::{read_reader, read_slice, read_str};
pub use value::write_value;
pub use writer::JsonTextWriter;

use crate::basket::Basket;
use crate::error::JsonError;
use crate::path::Path;
use crate::streaming::PathMatchingWriter;
use crate::writer::BasketWeaver;

/// Parse JSON text into a Basket
///
/// # Errors
///
/// Returns `JsonError::Syntax` if `text` is not a single JSON document.
pub fn parse(text: &str) -> Result<Basket, JsonError> {
    let mut weaver = BasketWeaver::new();
    read_str(text, &mut weaver)?;
    Ok(weaver.weave()?)
}

/// Compact JSON text for `value`
#[must_use]
pub fn to_string(value: &Basket) -> String {
    value.to_string()
}

/// Every value matched by `path` in the JSON document `text`
///
/// The document is matched while it is parsed; only matches are built.
///
/// # Errors
///
/// Returns a `JsonError` if `text` is not a single JSON document.
pub fn project_str(text: &str, path: &Path) -> Result<Vec<Basket>, JsonError> {
    let mut engine = PathMatchingWriter::projecting(path.clone());
    read_str(text, &mut engine)?;
    Ok(engine.finish()?)
}

/// `text` re-encoded as compact JSON with every value matched by `path`
/// replaced by `transform` applied to it
///
/// # Errors
///
/// Returns a `JsonError` if `text` is not a single JSON document.
pub fn rewrite_str<F>(text: &str, path: &Path, transform: F) -> Result<String, JsonError>
where
    F: FnMut(Basket) -> Basket,
{
    let mut engine = PathMatchingWriter::rewriting(path.clone(), JsonTextWriter::new(), transform);
    read_str(text, &mut engine)?;
    Ok(engine.finish()?.finish()?)
}
