//! Persistent property sets
//!
//! A [`PropertySet`] keeps its entries in a persistent hash map for lookup and
//! a persistent vector for insertion order. Order is a presentation detail:
//! two property sets with the same entries are equal whatever their order.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use imbl::{HashMap, Vector};

use super::Basket;

/// Immutable insertion-ordered mapping from keys to baskets
#[derive(Clone, Default)]
pub struct PropertySet {
    order: Vector<Arc<str>>,
    values: HashMap<Arc<str>, Basket>,
}

impl PropertySet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Basket> {
        self.values.get(key)
    }

    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(AsRef::as_ref)
    }

    /// Values in key insertion order
    pub fn values(&self) -> impl Iterator<Item = &Basket> {
        self.iter().map(|(_, value)| value)
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Basket)> {
        self.order
            .iter()
            .filter_map(|key| self.values.get(key).map(|value| (key.as_ref(), value)))
    }

    /// Copy with `key` bound to `value`
    ///
    /// An existing key keeps its position; a new key is appended.
    #[must_use]
    pub fn with(&self, key: impl Into<Arc<str>>, value: Basket) -> Self {
        let mut next = self.clone();
        next.insert(key.into(), value);
        next
    }

    /// Copy with `key` removed
    #[must_use]
    pub fn without(&self, key: &str) -> Self {
        if !self.values.contains_key(key) {
            return self.clone();
        }
        let mut order = self.order.clone();
        if let Some(position) = order.iter().position(|k| k.as_ref() == key) {
            order.remove(position);
        }
        Self {
            order,
            values: self.values.without(key),
        }
    }

    /// Copy with every value passed through `f`, keys and order unchanged
    #[must_use]
    pub fn map(&self, mut f: impl FnMut(&str, &Basket) -> Basket) -> Self {
        let mut values = self.values.clone();
        for key in &self.order {
            if let Some(value) = self.values.get(key) {
                values.insert(Arc::clone(key), f(key, value));
            }
        }
        Self {
            order: self.order.clone(),
            values,
        }
    }

    /// In-place insert for builders that own the only handle
    pub(crate) fn insert(&mut self, key: Arc<str>, value: Basket) {
        if self.values.insert(Arc::clone(&key), value).is_none() {
            self.order.push_back(key);
        }
    }
}

impl PartialEq for PropertySet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .values
                .iter()
                .all(|(key, value)| other.values.get(key) == Some(value))
    }
}

impl Eq for PropertySet {}

impl Hash for PropertySet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Order-independent: combine per-entry digests commutatively.
        let combined = self.values.iter().fold(0u64, |acc, (key, value)| {
            let mut entry = DefaultHasher::new();
            key.hash(&mut entry);
            value.hash(&mut entry);
            acc.wrapping_add(entry.finish())
        });
        state.write_usize(self.len());
        state.write_u64(combined);
    }
}

impl fmt::Debug for PropertySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Into<Arc<str>>> FromIterator<(K, Basket)> for PropertySet {
    fn from_iter<I: IntoIterator<Item = (K, Basket)>>(iter: I) -> Self {
        let mut properties = Self::new();
        for (key, value) in iter {
            properties.insert(key.into(), value);
        }
        properties
    }
}
