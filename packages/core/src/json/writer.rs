//! Structural events to compact JSON text

use std::fmt;

use crate::basket::{Basket, Number};
use crate::config::ConfigDefaults;
use crate::error::{WriterError, WriterResult};
use crate::writer::{BasketWriter, ShapeTracker, Token};

#[derive(Debug)]
struct Level {
    close: char,
    empty: bool,
}

/// Writer producing compact JSON text
///
/// Validates nesting the same way [`BasketWeaver`](crate::writer::BasketWeaver)
/// does; strings and keys are escaped by serde_json.
#[derive(Debug, Default)]
pub struct JsonTextWriter {
    out: String,
    shape: ShapeTracker,
    levels: Vec<Level>,
    after_key: bool,
}

impl JsonTextWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Text written so far
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.out
    }

    /// The finished document
    ///
    /// # Errors
    ///
    /// Returns `WriterError::Incomplete` if the top-level value is still open
    /// or was never started.
    pub fn finish(self) -> WriterResult<String> {
        if self.shape.is_complete() {
            Ok(self.out)
        } else {
            Err(WriterError::Incomplete)
        }
    }

    fn accept(&mut self, token: Token<'_>) -> WriterResult<()> {
        self.shape.accept(&token, ConfigDefaults::MAX_DEPTH_CEILING)
    }

    fn separate(&mut self) {
        if let Some(level) = self.levels.last_mut() {
            if !level.empty {
                self.out.push(',');
            }
            level.empty = false;
        }
    }

    fn start_value(&mut self, token: Token<'_>) -> WriterResult<()> {
        self.accept(token)?;
        if !std::mem::take(&mut self.after_key) {
            self.separate();
        }
        Ok(())
    }

    fn push_quoted(&mut self, text: &str) -> WriterResult<()> {
        let quoted = serde_json::to_string(text).map_err(WriterError::encoding)?;
        self.out.push_str(&quoted);
        Ok(())
    }

    fn open(&mut self, token: Token<'_>, open: char, close: char) -> WriterResult<()> {
        self.start_value(token)?;
        self.out.push(open);
        self.levels.push(Level { close, empty: true });
        Ok(())
    }
}

impl BasketWriter for JsonTextWriter {
    fn begin_object(&mut self) -> WriterResult<()> {
        self.open(Token::BeginObject, '{', '}')
    }

    fn begin_array(&mut self) -> WriterResult<()> {
        self.open(Token::BeginArray, '[', ']')
    }

    fn key(&mut self, key: &str) -> WriterResult<()> {
        self.accept(Token::Key(key))?;
        self.separate();
        self.push_quoted(key)?;
        self.out.push(':');
        self.after_key = true;
        Ok(())
    }

    fn add_string(&mut self, value: &str) -> WriterResult<()> {
        self.start_value(Token::String(value))?;
        self.push_quoted(value)
    }

    fn add_number(&mut self, value: &Number) -> WriterResult<()> {
        self.start_value(Token::Number(value))?;
        self.out.push_str(&value.to_string());
        Ok(())
    }

    fn add_boolean(&mut self, value: bool) -> WriterResult<()> {
        self.start_value(Token::Boolean(value))?;
        self.out.push_str(if value { "true" } else { "false" });
        Ok(())
    }

    fn add_null(&mut self) -> WriterResult<()> {
        self.start_value(Token::Null)?;
        self.out.push_str("null");
        Ok(())
    }

    fn end(&mut self) -> WriterResult<()> {
        self.accept(Token::End)?;
        if let Some(level) = self.levels.pop() {
            self.out.push(level.close);
        }
        Ok(())
    }
}

/// Compact JSON, object keys in insertion order
impl fmt::Display for Basket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut writer = JsonTextWriter::new();
        self.write_to(&mut writer).map_err(|_| fmt::Error)?;
        f.write_str(writer.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_output() {
        let cases = [
            (Basket::Null, "null"),
            (Basket::from("a\"b\n"), r#""a\"b\n""#),
            (Basket::empty_array(), "[]"),
            (Basket::empty_object(), "{}"),
            (
                Basket::object([
                    ("z", Basket::array([Basket::from(1), Basket::from(true), Basket::empty_object()])),
                    ("a", Basket::Null),
                ]),
                r#"{"z":[1,true,{}],"a":null}"#,
            ),
            (
                Basket::array([Basket::array([Basket::empty_array()]), Basket::from("x")]),
                r#"[[[]],"x"]"#,
            ),
        ];
        for (value, expected) in cases {
            assert_eq!(value.to_string(), expected);
        }
    }

    #[test]
    fn test_escaped_keys() {
        let value = Basket::object([("quote\"d", Basket::from(-2))]);
        assert_eq!(value.to_string(), r#"{"quote\"d":-2}"#);
    }

    #[test]
    fn test_nesting_is_validated() {
        let mut writer = JsonTextWriter::new();
        writer.begin_object().expect("open object");
        assert_eq!(
            writer.add_null(),
            Err(WriterError::MissingKey { operation: "add_null" })
        );

        let mut writer = JsonTextWriter::new();
        writer.begin_array().expect("open array");
        assert_eq!(writer.finish(), Err(WriterError::Incomplete));
    }
}
