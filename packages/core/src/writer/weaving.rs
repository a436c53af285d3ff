//! Weaving writer
//!
//! [`BasketWeaver`] turns one well-nested event sub-sequence into exactly one
//! Basket. It keeps a stack of partially built containers; closing a
//! container attaches it to its parent under the pending key or at the end of
//! the parent array.

use std::sync::Arc;

use crate::basket::{ArrayContents, Basket, Number, PropertySet};
use crate::error::{WriterError, WriterResult};

use super::BasketWriter;

#[derive(Debug)]
enum OpenContainer {
    Array(ArrayContents),
    Object {
        properties: PropertySet,
        pending_key: Option<Arc<str>>,
    },
}

/// Builds a single Basket from structural events
#[derive(Debug, Default)]
pub struct BasketWeaver {
    stack: Vec<OpenContainer>,
    result: Option<Basket>,
}

impl BasketWeaver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the top-level value has been completed
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.result.is_some()
    }

    /// Number of containers currently open
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Consume the weaver and return the completed value
    ///
    /// # Errors
    ///
    /// Returns `WriterError::Incomplete` if the top-level value is still open
    /// or was never started.
    pub fn weave(self) -> WriterResult<Basket> {
        self.result.ok_or(WriterError::Incomplete)
    }

    /// Take the completed value and reset the weaver for reuse
    ///
    /// # Errors
    ///
    /// Returns `WriterError::Incomplete` if the top-level value is still open;
    /// the weaver is left untouched in that case.
    pub fn take(&mut self) -> WriterResult<Basket> {
        let value = self.result.take().ok_or(WriterError::Incomplete)?;
        self.stack.clear();
        Ok(value)
    }

    fn ensure_open(&self, operation: &'static str) -> WriterResult<()> {
        if self.result.is_some() {
            return Err(WriterError::AlreadyComplete { operation });
        }
        if let Some(OpenContainer::Object { pending_key: None, .. }) = self.stack.last() {
            return Err(WriterError::MissingKey { operation });
        }
        Ok(())
    }

    /// Attach a finished value to the innermost container, or complete the weave
    fn attach(&mut self, value: Basket, operation: &'static str) -> WriterResult<()> {
        match self.stack.last_mut() {
            None => {
                self.result = Some(value);
                Ok(())
            }
            Some(OpenContainer::Array(items)) => {
                items.push(value);
                Ok(())
            }
            Some(OpenContainer::Object {
                properties,
                pending_key,
            }) => {
                let key = pending_key
                    .take()
                    .ok_or(WriterError::MissingKey { operation })?;
                properties.insert(key, value);
                Ok(())
            }
        }
    }

    fn add(&mut self, value: Basket, operation: &'static str) -> WriterResult<()> {
        self.ensure_open(operation)?;
        self.attach(value, operation)
    }
}

impl BasketWriter for BasketWeaver {
    fn begin_object(&mut self) -> WriterResult<()> {
        self.ensure_open("begin_object")?;
        self.stack.push(OpenContainer::Object {
            properties: PropertySet::new(),
            pending_key: None,
        });
        Ok(())
    }

    fn begin_array(&mut self) -> WriterResult<()> {
        self.ensure_open("begin_array")?;
        self.stack.push(OpenContainer::Array(ArrayContents::new()));
        Ok(())
    }

    fn key(&mut self, key: &str) -> WriterResult<()> {
        if self.result.is_some() {
            return Err(WriterError::AlreadyComplete { operation: "key" });
        }
        match self.stack.last_mut() {
            Some(OpenContainer::Object {
                pending_key: Some(_),
                ..
            }) => Err(WriterError::DuplicateKey { key: key.to_owned() }),
            Some(OpenContainer::Object { pending_key, .. }) => {
                *pending_key = Some(Arc::from(key));
                Ok(())
            }
            _ => Err(WriterError::KeyOutsideObject),
        }
    }

    fn add_string(&mut self, value: &str) -> WriterResult<()> {
        self.add(Basket::from(value), "add_string")
    }

    fn add_number(&mut self, value: &Number) -> WriterResult<()> {
        self.add(Basket::Number(value.clone()), "add_number")
    }

    fn add_boolean(&mut self, value: bool) -> WriterResult<()> {
        self.add(Basket::Boolean(value), "add_boolean")
    }

    fn add_null(&mut self) -> WriterResult<()> {
        self.add(Basket::Null, "add_null")
    }

    fn end(&mut self) -> WriterResult<()> {
        if self.result.is_some() {
            return Err(WriterError::AlreadyComplete { operation: "end" });
        }
        let finished = match self.stack.pop() {
            None => return Err(WriterError::UnmatchedEnd),
            Some(OpenContainer::Object {
                pending_key: Some(_),
                ..
            }) => return Err(WriterError::DanglingKey),
            Some(OpenContainer::Array(items)) => Basket::Array(items),
            Some(OpenContainer::Object { properties, .. }) => Basket::Object(properties),
        };
        self.attach(finished, "end")
    }

    fn add_basket(&mut self, value: &Basket) -> WriterResult<()> {
        self.add(value.clone(), "add_basket")
    }
}
