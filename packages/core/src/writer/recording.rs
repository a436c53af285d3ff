//! Owned events and event recording
//!
//! [`Event`] is the owned form of one protocol call. [`EventRecorder`] keeps
//! every call it receives, unvalidated, so a stream can be inspected or
//! replayed into another writer later.

use std::sync::Arc;

use crate::basket::Number;
use crate::error::WriterResult;

use super::BasketWriter;

/// One structural event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    BeginObject,
    BeginArray,
    Key(Arc<str>),
    String(Arc<str>),
    Number(Number),
    Boolean(bool),
    Null,
    End,
}

impl Event {
    /// Replay this event into `writer`
    ///
    /// # Errors
    ///
    /// Propagates the error reported by `writer`.
    pub fn write_to<W: BasketWriter + ?Sized>(&self, writer: &mut W) -> WriterResult<()> {
        match self {
            Self::BeginObject => writer.begin_object(),
            Self::BeginArray => writer.begin_array(),
            Self::Key(key) => writer.key(key),
            Self::String(value) => writer.add_string(value),
            Self::Number(value) => writer.add_number(value),
            Self::Boolean(value) => writer.add_boolean(*value),
            Self::Null => writer.add_null(),
            Self::End => writer.end(),
        }
    }
}

/// Writer that records every event it receives
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    events: Vec<Event>,
}

impl EventRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    #[must_use]
    pub fn into_events(self) -> Vec<Event> {
        self.events
    }

    /// Replay the recorded events, in order, into `writer`
    ///
    /// # Errors
    ///
    /// Stops at and returns the first error reported by `writer`.
    pub fn replay<W: BasketWriter + ?Sized>(&self, writer: &mut W) -> WriterResult<()> {
        self.events.iter().try_for_each(|event| event.write_to(writer))
    }
}

impl BasketWriter for EventRecorder {
    fn begin_object(&mut self) -> WriterResult<()> {
        self.events.push(Event::BeginObject);
        Ok(())
    }

    fn begin_array(&mut self) -> WriterResult<()> {
        self.events.push(Event::BeginArray);
        Ok(())
    }

    fn key(&mut self, key: &str) -> WriterResult<()> {
        self.events.push(Event::Key(Arc::from(key)));
        Ok(())
    }

    fn add_string(&mut self, value: &str) -> WriterResult<()> {
        self.events.push(Event::String(Arc::from(value)));
        Ok(())
    }

    fn add_number(&mut self, value: &Number) -> WriterResult<()> {
        self.events.push(Event::Number(value.clone()));
        Ok(())
    }

    fn add_boolean(&mut self, value: bool) -> WriterResult<()> {
        self.events.push(Event::Boolean(value));
        Ok(())
    }

    fn add_null(&mut self) -> WriterResult<()> {
        self.events.push(Event::Null);
        Ok(())
    }

    fn end(&mut self) -> WriterResult<()> {
        self.events.push(Event::End);
        Ok(())
    }
}
