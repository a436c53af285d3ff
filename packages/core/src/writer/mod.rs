//! Structural event protocol
//!
//! Producers describe a Basket as a stream of structural events: begin an
//! object or array, name a key, add a scalar, end the current container.
//! Anything that consumes such a stream implements [`BasketWriter`].
//!
//! # Architecture
//!
//! - `structure`: borrowed event tokens and the nesting validator shared by writers
//! - `weaving`: [`BasketWeaver`], which builds one Basket from an event sub-sequence
//! - `recording`: owned [`Event`]s and the [`EventRecorder`]

mod recording;
mod structure;
mod weaving;

pub use recording::{Event, EventRecorder};
pub(crate) use structure::{ShapeTracker, Token};
pub use weaving::BasketWeaver;

use crate::basket::Number;
use crate::error::WriterResult;

/// Consumer of structural events
///
/// Implementations expect a well-nested stream: keys only directly inside
/// objects, exactly one value after each key, one `end` per begin. Writers
/// that validate report violations as [`WriterError`](crate::error::WriterError).
pub trait BasketWriter {
    fn begin_object(&mut self) -> WriterResult<()>;

    fn begin_array(&mut self) -> WriterResult<()>;

    /// Name the next value of the enclosing object
    fn key(&mut self, key: &str) -> WriterResult<()>;

    fn add_string(&mut self, value: &str) -> WriterResult<()>;

    fn add_number(&mut self, value: &Number) -> WriterResult<()>;

    fn add_boolean(&mut self, value: bool) -> WriterResult<()>;

    fn add_null(&mut self) -> WriterResult<()>;

    /// Close the innermost open container
    fn end(&mut self) -> WriterResult<()>;

    /// Write a complete value as events
    fn add_basket(&mut self, value: &crate::basket::Basket) -> WriterResult<()> {
        value.write_to(self)
    }
}

impl<W: BasketWriter + ?Sized> BasketWriter for &mut W {
    fn begin_object(&mut self) -> WriterResult<()> {
        (**self).begin_object()
    }

    fn begin_array(&mut self) -> WriterResult<()> {
        (**self).begin_array()
    }

    fn key(&mut self, key: &str) -> WriterResult<()> {
        (**self).key(key)
    }

    fn add_string(&mut self, value: &str) -> WriterResult<()> {
        (**self).add_string(value)
    }

    fn add_number(&mut self, value: &Number) -> WriterResult<()> {
        (**self).add_number(value)
    }

    fn add_boolean(&mut self, value: bool) -> WriterResult<()> {
        (**self).add_boolean(value)
    }

    fn add_null(&mut self) -> WriterResult<()> {
        (**self).add_null()
    }

    fn end(&mut self) -> WriterResult<()> {
        (**self).end()
    }
}

/// Writer that accepts and drops every event
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl BasketWriter for Discard {
    fn begin_object(&mut self) -> WriterResult<()> {
        Ok(())
    }

    fn begin_array(&mut self) -> WriterResult<()> {
        Ok(())
    }

    fn key(&mut self, _key: &str) -> WriterResult<()> {
        Ok(())
    }

    fn add_string(&mut self, _value: &str) -> WriterResult<()> {
        Ok(())
    }

    fn add_number(&mut self, _value: &Number) -> WriterResult<()> {
        Ok(())
    }

    fn add_boolean(&mut self, _value: bool) -> WriterResult<()> {
        Ok(())
    }

    fn add_null(&mut self) -> WriterResult<()> {
        Ok(())
    }

    fn end(&mut self) -> WriterResult<()> {
        Ok(())
    }
}
