//! Document sources
//!
//! Anything a query can run over: an in-memory [`Basket`], JSON text, or a
//! JSON byte stream. Every source is fed to the engine as events, so JSON
//! input is matched while it is parsed.

use std::io;

use wicker_core::basket::Basket;
use wicker_core::json;
use wicker_core::writer::BasketWriter;

/// A document that can be written as structural events
pub trait DocumentSource {
    /// Write the document into `writer`
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or `writer` rejects it.
    fn feed<W: BasketWriter>(self, writer: &mut W) -> wicker_core::Result<()>;
}

impl DocumentSource for &Basket {
    fn feed<W: BasketWriter>(self, writer: &mut W) -> wicker_core::Result<()> {
        Ok(self.write_to(writer)?)
    }
}

/// JSON text
#[derive(Debug, Clone, Copy)]
pub struct JsonText<'a>(pub &'a str);

impl DocumentSource for JsonText<'_> {
    fn feed<W: BasketWriter>(self, writer: &mut W) -> wicker_core::Result<()> {
        Ok(json::read_str(self.0, writer)?)
    }
}

/// JSON read from a byte stream
#[derive(Debug)]
pub struct JsonReader<R>(pub R);

impl<R: io::Read> DocumentSource for JsonReader<R> {
    fn feed<W: BasketWriter>(self, writer: &mut W) -> wicker_core::Result<()> {
        Ok(json::read_reader(self.0, writer)?)
    }
}
