//! Event tokens and nesting validation
//!
//! [`Token`] is a borrowed view of one structural event, so engines can route
//! events without allocating. [`ShapeTracker`] checks the nesting rules of
//! the protocol and tracks depth.

use crate::basket::Number;
use crate::error::{WriterError, WriterResult};

use super::BasketWriter;

/// Borrowed structural event
#[derive(Debug, Clone, Copy)]
pub(crate) enum Token<'a> {
    BeginObject,
    BeginArray,
    Key(&'a str),
    String(&'a str),
    Number(&'a Number),
    Boolean(bool),
    Null,
    End,
}

impl Token<'_> {
    /// Name of the writer operation that produced this token
    pub(crate) fn operation(&self) -> &'static str {
        match self {
            Self::BeginObject => "begin_object",
            Self::BeginArray => "begin_array",
            Self::Key(_) => "key",
            Self::String(_) => "add_string",
            Self::Number(_) => "add_number",
            Self::Boolean(_) => "add_boolean",
            Self::Null => "add_null",
            Self::End => "end",
        }
    }

    #[inline]
    pub(crate) fn opens_container(&self) -> bool {
        matches!(self, Self::BeginObject | Self::BeginArray)
    }

    pub(crate) fn write_to<W: BasketWriter + ?Sized>(self, writer: &mut W) -> WriterResult<()> {
        match self {
            Self::BeginObject => writer.begin_object(),
            Self::BeginArray => writer.begin_array(),
            Self::Key(key) => writer.key(key),
            Self::String(value) => writer.add_string(value),
            Self::Number(value) => writer.add_number(value),
            Self::Boolean(value) => writer.add_boolean(value),
            Self::Null => writer.add_null(),
            Self::End => writer.end(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Nest {
    Array,
    Object { key_pending: bool },
}

/// Validates nesting of a single top-level value
#[derive(Debug, Default)]
pub(crate) struct ShapeTracker {
    stack: Vec<Nest>,
    complete: bool,
}

impl ShapeTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Check `token` against the nesting rules and record its effect
    ///
    /// `max_depth` bounds the number of simultaneously open containers.
    pub(crate) fn accept(&mut self, token: &Token<'_>, max_depth: usize) -> WriterResult<()> {
        let operation = token.operation();
        if self.complete {
            return Err(WriterError::AlreadyComplete { operation });
        }
        match *token {
            Token::Key(key) => match self.stack.last_mut() {
                Some(Nest::Object { key_pending }) => {
                    if *key_pending {
                        return Err(WriterError::DuplicateKey { key: key.to_owned() });
                    }
                    *key_pending = true;
                    Ok(())
                }
                _ => Err(WriterError::KeyOutsideObject),
            },
            Token::End => {
                match self.stack.pop() {
                    None => return Err(WriterError::UnmatchedEnd),
                    Some(Nest::Object { key_pending: true }) => return Err(WriterError::DanglingKey),
                    Some(_) => {}
                }
                self.complete = self.stack.is_empty();
                Ok(())
            }
            _ => {
                self.claim_slot(operation)?;
                match *token {
                    Token::BeginObject => self.open(Nest::Object { key_pending: false }, max_depth),
                    Token::BeginArray => self.open(Nest::Array, max_depth),
                    _ => {
                        self.complete = self.stack.is_empty();
                        Ok(())
                    }
                }
            }
        }
    }

    fn claim_slot(&mut self, operation: &'static str) -> WriterResult<()> {
        if let Some(Nest::Object { key_pending }) = self.stack.last_mut() {
            if !*key_pending {
                return Err(WriterError::MissingKey { operation });
            }
            *key_pending = false;
        }
        Ok(())
    }

    fn open(&mut self, nest: Nest, max_depth: usize) -> WriterResult<()> {
        if self.stack.len() >= max_depth {
            return Err(WriterError::DepthLimitExceeded {
                depth: self.stack.len() + 1,
                max: max_depth,
            });
        }
        self.stack.push(nest);
        Ok(())
    }

    /// Whether the top-level value has been closed
    #[inline]
    pub(crate) fn is_complete(&self) -> bool {
        self.complete
    }

    /// Number of open containers
    #[inline]
    pub(crate) fn depth(&self) -> usize {
        self.stack.len()
    }
}
