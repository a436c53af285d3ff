//! serde integration and `serde_json::Value` conversions

use serde::de::{self, Deserialize, DeserializeSeed, Deserializer};
use serde::ser::{self, Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Value;

use crate::basket::{Basket, Number};
use crate::writer::{BasketWeaver, BasketWriter};

use super::reader::EventSeed;

impl Serialize for Number {
    /// Integers within `i64`/`u64` serialize natively; any other value goes
    /// through `serde_json::Number` so JSON output keeps every digit
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if let Some(value) = self.as_i64() {
            serializer.serialize_i64(value)
        } else if let Some(value) = self.as_u64() {
            serializer.serialize_u64(value)
        } else {
            to_json_number(self)
                .map_err(<S::Error as ser::Error>::custom)?
                .serialize(serializer)
        }
    }
}

/// The exact `serde_json::Number` for `number`
fn to_json_number(number: &Number) -> Result<serde_json::Number, serde_json::Error> {
    number.to_string().parse()
}

impl Serialize for Basket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Basket::String(value) => serializer.serialize_str(value),
            Basket::Number(value) => value.serialize(serializer),
            Basket::Boolean(value) => serializer.serialize_bool(*value),
            Basket::Null => serializer.serialize_unit(),
            Basket::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Basket::Object(properties) => {
                let mut map = serializer.serialize_map(Some(properties.len()))?;
                for (key, value) in properties.iter() {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Basket {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut weaver = BasketWeaver::new();
        let mut failure = None;
        EventSeed::new(&mut weaver, &mut failure).deserialize(deserializer)?;
        if let Some(err) = failure {
            return Err(de::Error::custom(err));
        }
        weaver.weave().map_err(de::Error::custom)
    }
}

impl From<serde_json::Number> for Number {
    fn from(number: serde_json::Number) -> Self {
        if let Some(value) = number.as_i64() {
            return Number::from(value);
        }
        if let Some(value) = number.as_u64() {
            return Number::from(value);
        }
        // Literal text is kept verbatim; only exponents beyond `Number`'s
        // range fall back to the nearest float
        number
            .to_string()
            .parse()
            .ok()
            .or_else(|| number.as_f64().and_then(|value| Number::try_from(value).ok()))
            .unwrap_or_default()
    }
}

impl From<Value> for Basket {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Basket::Null,
            Value::Bool(value) => Basket::Boolean(value),
            Value::Number(number) => Basket::Number(number.into()),
            Value::String(value) => Basket::from(value),
            Value::Array(items) => Basket::array(items.into_iter().map(Basket::from)),
            Value::Object(entries) => {
                Basket::object(entries.into_iter().map(|(key, value)| (key, Basket::from(value))))
            }
        }
    }
}

impl From<&Basket> for Value {
    fn from(value: &Basket) -> Self {
        match value {
            Basket::String(value) => Value::String(value.to_string()),
            Basket::Number(number) => to_json_number(number).map_or(Value::Null, Value::Number),
            Basket::Boolean(value) => Value::Bool(*value),
            Basket::Null => Value::Null,
            Basket::Array(items) => Value::Array(items.iter().map(Value::from).collect()),
            Basket::Object(properties) => Value::Object(
                properties
                    .iter()
                    .map(|(key, value)| (key.to_string(), Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<Basket> for Value {
    fn from(value: Basket) -> Self {
        Value::from(&value)
    }
}

/// Write a `serde_json::Value` as events
///
/// # Errors
///
/// Propagates the error reported by `writer`.
pub fn write_value<W: BasketWriter + ?Sized>(value: &Value, writer: &mut W) -> crate::error::WriterResult<()> {
    match value {
        Value::Null => writer.add_null(),
        Value::Bool(value) => writer.add_boolean(*value),
        Value::Number(number) => writer.add_number(&Number::from(number.clone())),
        Value::String(value) => writer.add_string(value),
        Value::Array(items) => {
            writer.begin_array()?;
            for item in items {
                write_value(item, writer)?;
            }
            writer.end()
        }
        Value::Object(entries) => {
            writer.begin_object()?;
            for (key, value) in entries {
                writer.key(key)?;
                write_value(value, writer)?;
            }
            writer.end()
        }
    }
}
