//! Immutable Basket values
//!
//! A [`Basket`] is a tree-shaped value: string, number, boolean, null, array
//! or object. Baskets are never mutated after construction. Every update
//! returns a new value that shares its unchanged substructure with the
//! original, so cloning a basket is always cheap.
//!
//! # Architecture
//!
//! - `number`: arbitrary-precision [`Number`] with numeric equality
//! - `array`: persistent [`ArrayContents`]
//! - `object`: persistent insertion-ordered [`PropertySet`]

mod array;
mod number;
mod object;

use std::sync::Arc;

pub use array::ArrayContents;
pub use number::{Number, ParseNumberError};
pub use object::PropertySet;

use crate::error::WriterResult;
use crate::writer::BasketWriter;

/// Immutable tree-shaped value
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Basket {
    String(Arc<str>),
    Number(Number),
    Boolean(bool),
    Null,
    Array(ArrayContents),
    Object(PropertySet),
}

impl Basket {
    #[must_use]
    pub fn string(value: impl Into<Arc<str>>) -> Self {
        Self::String(value.into())
    }

    #[must_use]
    pub fn number(value: impl Into<Number>) -> Self {
        Self::Number(value.into())
    }

    #[must_use]
    pub fn boolean(value: bool) -> Self {
        Self::Boolean(value)
    }

    #[must_use]
    pub fn null() -> Self {
        Self::Null
    }

    /// Array of the given items
    #[must_use]
    pub fn array(items: impl IntoIterator<Item = Basket>) -> Self {
        Self::Array(items.into_iter().collect())
    }

    /// Object of the given entries, in the given order
    #[must_use]
    pub fn object<K: Into<Arc<str>>>(entries: impl IntoIterator<Item = (K, Basket)>) -> Self {
        Self::Object(entries.into_iter().collect())
    }

    #[must_use]
    pub fn empty_array() -> Self {
        Self::Array(ArrayContents::new())
    }

    #[must_use]
    pub fn empty_object() -> Self {
        Self::Object(PropertySet::new())
    }

    /// Name of the variant, as used in diagnostics
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Number(_) => "number",
            Self::Boolean(_) => "boolean",
            Self::Null => "null",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    #[inline]
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    #[inline]
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    #[inline]
    #[must_use]
    pub fn is_boolean(&self) -> bool {
        matches!(self, Self::Boolean(_))
    }

    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    #[inline]
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Whether the value is an array or object
    #[inline]
    #[must_use]
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Array(_) | Self::Object(_))
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value.as_ref()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&ArrayContents> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&PropertySet> {
        match self {
            Self::Object(properties) => Some(properties),
            _ => None,
        }
    }

    /// Property of an object; `None` for missing keys and non-objects
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Basket> {
        self.as_object().and_then(|properties| properties.get(key))
    }

    /// Item of an array; negative indices count from the end
    #[must_use]
    pub fn item(&self, index: i64) -> Option<&Basket> {
        self.as_array().and_then(|items| items.get_signed(index))
    }

    /// Number of children of a container; zero for scalars
    #[must_use]
    pub fn child_count(&self) -> usize {
        match self {
            Self::Array(items) => items.len(),
            Self::Object(properties) => properties.len(),
            _ => 0,
        }
    }

    /// Object with `key` bound to `value`; other variants are returned unchanged
    #[must_use]
    pub fn with_property(&self, key: impl Into<Arc<str>>, value: Basket) -> Self {
        match self {
            Self::Object(properties) => Self::Object(properties.with(key, value)),
            other => other.clone(),
        }
    }

    /// Object without `key`; other variants are returned unchanged
    #[must_use]
    pub fn without_property(&self, key: &str) -> Self {
        match self {
            Self::Object(properties) => Self::Object(properties.without(key)),
            other => other.clone(),
        }
    }

    /// Array with the item at `index` replaced; other variants are returned unchanged
    #[must_use]
    pub fn with_item(&self, index: usize, value: Basket) -> Self {
        match self {
            Self::Array(items) => Self::Array(items.with(index, value)),
            other => other.clone(),
        }
    }

    /// Array with `value` appended; other variants are returned unchanged
    #[must_use]
    pub fn appending(&self, value: Basket) -> Self {
        match self {
            Self::Array(items) => Self::Array(items.appending(value)),
            other => other.clone(),
        }
    }

    /// Array with `value` inserted before `index`; other variants are returned unchanged
    #[must_use]
    pub fn inserting(&self, index: usize, value: Basket) -> Self {
        match self {
            Self::Array(items) => Self::Array(items.inserting(index, value)),
            other => other.clone(),
        }
    }

    /// Array without the item at `index`; other variants are returned unchanged
    #[must_use]
    pub fn without_item(&self, index: usize) -> Self {
        match self {
            Self::Array(items) => Self::Array(items.without(index)),
            other => other.clone(),
        }
    }

    /// Replay this value as structural events
    ///
    /// Objects are written in key insertion order.
    ///
    /// # Errors
    ///
    /// Propagates the first error reported by `writer`.
    pub fn write_to<W: BasketWriter + ?Sized>(&self, writer: &mut W) -> WriterResult<()> {
        match self {
            Self::String(value) => writer.add_string(value),
            Self::Number(value) => writer.add_number(value),
            Self::Boolean(value) => writer.add_boolean(*value),
            Self::Null => writer.add_null(),
            Self::Array(items) => {
                writer.begin_array()?;
                for item in items {
                    item.write_to(writer)?;
                }
                writer.end()
            }
            Self::Object(properties) => {
                writer.begin_object()?;
                for (key, value) in properties.iter() {
                    writer.key(key)?;
                    value.write_to(writer)?;
                }
                writer.end()
            }
        }
    }
}

impl From<&str> for Basket {
    fn from(value: &str) -> Self {
        Self::String(Arc::from(value))
    }
}

impl From<String> for Basket {
    fn from(value: String) -> Self {
        Self::String(Arc::from(value))
    }
}

impl From<bool> for Basket {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i32> for Basket {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<i64> for Basket {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for Basket {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<Number> for Basket {
    fn from(value: Number) -> Self {
        Self::Number(value)
    }
}

impl From<ArrayContents> for Basket {
    fn from(value: ArrayContents) -> Self {
        Self::Array(value)
    }
}

impl From<PropertySet> for Basket {
    fn from(value: PropertySet) -> Self {
        Self::Object(value)
    }
}

impl From<Vec<Basket>> for Basket {
    fn from(items: Vec<Basket>) -> Self {
        Self::Array(items.into())
    }
}

impl<T: Into<Basket>> From<Option<T>> for Basket {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
