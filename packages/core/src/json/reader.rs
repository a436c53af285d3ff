//! JSON text to structural events
//!
//! serde_json drives an [`EventSeed`] through `deserialize_any`; the seed
//! forwards every token to a [`BasketWriter`] as it is parsed, so no
//! intermediate value is built. Writer failures abort parsing and are
//! reported as [`JsonError::Writer`] rather than as syntax errors.
//!
//! serde_json is built with `arbitrary_precision`, so every number literal
//! arrives as a one-entry map holding its text, which is parsed into an
//! exact [`Number`].

use std::fmt;
use std::io;

use serde::de::{self, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};

use crate::basket::Number;
use crate::error::{JsonError, WriterError, WriterResult};
use crate::writer::BasketWriter;

/// Map key serde_json uses to hand over the text of a number literal
const NUMBER_TOKEN: &str = "$serde_json::private::Number";

/// Feed the JSON document in `text` to `writer`
///
/// # Errors
///
/// `JsonError::Syntax` for malformed or trailing input, `JsonError::Writer`
/// when `writer` rejects an event.
pub fn read_str<W: BasketWriter + ?Sized>(text: &str, writer: &mut W) -> Result<(), JsonError> {
    drive(&mut serde_json::Deserializer::from_str(text), writer)
}

/// Feed the JSON document in `bytes` to `writer`
///
/// # Errors
///
/// See [`read_str`].
pub fn read_slice<W: BasketWriter + ?Sized>(bytes: &[u8], writer: &mut W) -> Result<(), JsonError> {
    drive(&mut serde_json::Deserializer::from_slice(bytes), writer)
}

/// Feed the JSON document read from `reader` to `writer`
///
/// # Errors
///
/// See [`read_str`]; I/O failures are reported as `JsonError::Syntax`.
pub fn read_reader<R, W>(reader: R, writer: &mut W) -> Result<(), JsonError>
where
    R: io::Read,
    W: BasketWriter + ?Sized,
{
    drive(&mut serde_json::Deserializer::from_reader(reader), writer)
}

fn drive<'de, R, W>(deserializer: &mut serde_json::Deserializer<R>, writer: &mut W) -> Result<(), JsonError>
where
    R: serde_json::de::Read<'de>,
    W: BasketWriter + ?Sized,
{
    let mut failure = None;
    let outcome = EventSeed::new(writer, &mut failure).deserialize(&mut *deserializer);
    if let Some(err) = failure {
        return Err(JsonError::Writer(err));
    }
    outcome?;
    deserializer.end()?;
    Ok(())
}

/// Deserialization seed that writes one JSON value as events
///
/// The first writer failure is stored in `failure` and parsing stops with a
/// custom deserializer error.
pub(crate) struct EventSeed<'w, W: ?Sized> {
    writer: &'w mut W,
    failure: &'w mut Option<WriterError>,
}

impl<'w, W: BasketWriter + ?Sized> EventSeed<'w, W> {
    pub(crate) fn new(writer: &'w mut W, failure: &'w mut Option<WriterError>) -> Self {
        Self { writer, failure }
    }

    fn reborrow(&mut self) -> EventSeed<'_, W> {
        EventSeed {
            writer: &mut *self.writer,
            failure: &mut *self.failure,
        }
    }

    fn emit<E: de::Error>(&mut self, result: WriterResult<()>) -> Result<(), E> {
        result.map_err(|err| {
            let error = E::custom(&err);
            *self.failure = Some(err);
            error
        })
    }

    fn number<E: de::Error>(mut self, number: Number) -> Result<(), E> {
        let result = self.writer.add_number(&number);
        self.emit(result)
    }
}

impl<'de, W: BasketWriter + ?Sized> DeserializeSeed<'de> for EventSeed<'_, W> {
    type Value = ();

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de, W: BasketWriter + ?Sized> Visitor<'de> for EventSeed<'_, W> {
    type Value = ();

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("any JSON value")
    }

    fn visit_bool<E: de::Error>(mut self, value: bool) -> Result<(), E> {
        let result = self.writer.add_boolean(value);
        self.emit(result)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<(), E> {
        self.number(Number::from(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<(), E> {
        self.number(Number::from(value))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<(), E> {
        let number = Number::try_from(value).map_err(E::custom)?;
        self.number(number)
    }

    fn visit_str<E: de::Error>(mut self, value: &str) -> Result<(), E> {
        let result = self.writer.add_string(value);
        self.emit(result)
    }

    fn visit_unit<E: de::Error>(mut self) -> Result<(), E> {
        let result = self.writer.add_null();
        self.emit(result)
    }

    fn visit_none<E: de::Error>(self) -> Result<(), E> {
        self.visit_unit()
    }

    fn visit_seq<A: SeqAccess<'de>>(mut self, mut seq: A) -> Result<(), A::Error> {
        let result = self.writer.begin_array();
        self.emit(result)?;
        while seq.next_element_seed(self.reborrow())?.is_some() {}
        let result = self.writer.end();
        self.emit(result)
    }

    fn visit_map<A: MapAccess<'de>>(mut self, mut map: A) -> Result<(), A::Error> {
        match map.next_key_seed(FirstKeySeed(self.reborrow()))? {
            Some(FirstKey::Number) => {
                let literal: String = map.next_value()?;
                let number = literal
                    .parse::<Number>()
                    .map_err(<A::Error as de::Error>::custom)?;
                return self.number(number);
            }
            Some(FirstKey::Property) => map.next_value_seed(self.reborrow())?,
            None => {
                let result = self.writer.begin_object();
                self.emit(result)?;
            }
        }
        while map.next_key_seed(KeySeed(self.reborrow()))?.is_some() {
            map.next_value_seed(self.reborrow())?;
        }
        let result = self.writer.end();
        self.emit(result)
    }
}

enum FirstKey {
    Number,
    Property,
}

/// Seed for the first key of a map
///
/// Tells a number literal apart from an object. For an object it opens the
/// object and writes the key.
struct FirstKeySeed<'w, W: ?Sized>(EventSeed<'w, W>);

impl<'de, W: BasketWriter + ?Sized> DeserializeSeed<'de> for FirstKeySeed<'_, W> {
    type Value = FirstKey;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<FirstKey, D::Error> {
        deserializer.deserialize_str(self)
    }
}

impl<'de, W: BasketWriter + ?Sized> Visitor<'de> for FirstKeySeed<'_, W> {
    type Value = FirstKey;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("an object key")
    }

    fn visit_str<E: de::Error>(mut self, key: &str) -> Result<FirstKey, E> {
        if key == NUMBER_TOKEN {
            return Ok(FirstKey::Number);
        }
        let result = self.0.writer.begin_object();
        self.0.emit(result)?;
        let result = self.0.writer.key(key);
        self.0.emit(result)?;
        Ok(FirstKey::Property)
    }
}

/// Seed for object keys, written with `key` without allocating
struct KeySeed<'w, W: ?Sized>(EventSeed<'w, W>);

impl<'de, W: BasketWriter + ?Sized> DeserializeSeed<'de> for KeySeed<'_, W> {
    type Value = ();

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        deserializer.deserialize_str(self)
    }
}

impl<'de, W: BasketWriter + ?Sized> Visitor<'de> for KeySeed<'_, W> {
    type Value = ();

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("an object key")
    }

    fn visit_str<E: de::Error>(mut self, key: &str) -> Result<(), E> {
        let result = self.0.writer.key(key);
        self.0.emit(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basket::Basket;
    use crate::writer::{BasketWeaver, Event, EventRecorder};

    #[test]
    fn test_events_in_document_order() {
        let mut recorder = EventRecorder::new();
        read_str(r#"{"a": [1, "x", null], "b": {"c": true}}"#, &mut recorder).expect("valid json");
        let expected = vec![
            Event::BeginObject,
            Event::Key("a".into()),
            Event::BeginArray,
            Event::Number(Number::from(1)),
            Event::String("x".into()),
            Event::Null,
            Event::End,
            Event::Key("b".into()),
            Event::BeginObject,
            Event::Key("c".into()),
            Event::Boolean(true),
            Event::End,
            Event::End,
        ];
        assert_eq!(recorder.into_events(), expected);
    }

    #[test]
    fn test_fractional_numbers() {
        let mut weaver = BasketWeaver::new();
        read_str("[8.95, -0.5, 1e3]", &mut weaver).expect("valid json");
        let expected: Vec<Number> = ["8.95", "-0.5", "1000"]
            .iter()
            .map(|text| text.parse().expect("valid number"))
            .collect();
        let woven = weaver.weave().expect("complete document");
        let numbers: Vec<Number> = woven
            .as_array()
            .map(|items| items.iter().filter_map(Basket::as_number).cloned().collect())
            .unwrap_or_default();
        assert_eq!(numbers, expected);
    }

    #[test]
    fn test_number_literals_keep_every_digit() {
        let mut recorder = EventRecorder::new();
        read_str("[12345678901234567890123, 0.10000000000000000000001, -1.5e-400]", &mut recorder)
            .expect("valid json");
        let expected: Vec<Event> = ["12345678901234567890123", "0.10000000000000000000001", "-1.5e-400"]
            .iter()
            .map(|text| Event::Number(text.parse().expect("valid number")))
            .collect();
        assert_eq!(recorder.events()[1..4], expected[..]);
    }

    #[test]
    fn test_objects_and_empty_objects() {
        let mut recorder = EventRecorder::new();
        read_str(r#"{"n": {}, "m": {"x": 2.50}}"#, &mut recorder).expect("valid json");
        let expected = vec![
            Event::BeginObject,
            Event::Key("n".into()),
            Event::BeginObject,
            Event::End,
            Event::Key("m".into()),
            Event::BeginObject,
            Event::Key("x".into()),
            Event::Number("2.5".parse().expect("valid number")),
            Event::End,
            Event::End,
        ];
        assert_eq!(recorder.into_events(), expected);
    }

    #[test]
    fn test_syntax_errors() {
        for text in ["", "{", "[1,]", "{\"a\" 1}", "[1] [2]", "tru"] {
            let mut weaver = BasketWeaver::new();
            let result = read_str(text, &mut weaver);
            assert!(matches!(result, Err(JsonError::Syntax(_))), "{text:?}");
        }
    }

    #[test]
    fn test_writer_failure_is_not_a_syntax_error() {
        let mut weaver = BasketWeaver::new();
        weaver.add_null().expect("first value");
        let result = read_str("[1]", &mut weaver);
        assert!(matches!(
            result,
            Err(JsonError::Writer(WriterError::AlreadyComplete { operation: "begin_array" }))
        ));
    }

    #[test]
    fn test_reader_and_slice_inputs() {
        let text = r#"{"k": ["v"]}"#;
        let mut from_slice = BasketWeaver::new();
        read_slice(text.as_bytes(), &mut from_slice).expect("valid json");
        let mut from_reader = BasketWeaver::new();
        read_reader(text.as_bytes(), &mut from_reader).expect("valid json");
        assert_eq!(from_slice.weave(), from_reader.weave());
    }
}
