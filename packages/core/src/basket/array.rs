//! Persistent array contents
//!
//! Backed by an `imbl` RRB vector so updates share all untouched structure
//! with the original.

use imbl::Vector;
use imbl::shared_ptr::DefaultSharedPtr;

use super::Basket;

/// Immutable ordered sequence of baskets
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ArrayContents {
    items: Vector<Basket>,
}

impl ArrayContents {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Basket> {
        self.items.get(index)
    }

    /// Item at a signed position; negative positions count back from the end
    #[must_use]
    pub fn get_signed(&self, index: i64) -> Option<&Basket> {
        self.resolve(index).and_then(|i| self.items.get(i))
    }

    /// Resolve a signed position against the current length
    #[must_use]
    pub fn resolve(&self, index: i64) -> Option<usize> {
        let len = self.items.len() as i64;
        let resolved = if index < 0 { len + index } else { index };
        (0..len).contains(&resolved).then_some(resolved as usize)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Basket> + ExactSizeIterator {
        self.items.iter()
    }

    /// Copy with the item at `index` replaced
    ///
    /// Out-of-range indices leave the contents unchanged.
    #[must_use]
    pub fn with(&self, index: usize, value: Basket) -> Self {
        if index >= self.items.len() {
            return self.clone();
        }
        Self {
            items: self.items.update(index, value),
        }
    }

    /// Copy with `value` appended
    #[must_use]
    pub fn appending(&self, value: Basket) -> Self {
        let mut items = self.items.clone();
        items.push_back(value);
        Self { items }
    }

    /// Copy with `value` inserted before `index`, clamped to the length
    #[must_use]
    pub fn inserting(&self, index: usize, value: Basket) -> Self {
        let mut items = self.items.clone();
        items.insert(index.min(items.len()), value);
        Self { items }
    }

    /// Copy with the item at `index` removed
    #[must_use]
    pub fn without(&self, index: usize) -> Self {
        if index >= self.items.len() {
            return self.clone();
        }
        let mut items = self.items.clone();
        items.remove(index);
        Self { items }
    }

    /// Copy with every item passed through `f`
    #[must_use]
    pub fn map(&self, f: impl FnMut(&Basket) -> Basket) -> Self {
        self.items.iter().map(f).collect()
    }

    /// In-place append for builders that own the only handle
    #[inline]
    pub(crate) fn push(&mut self, value: Basket) {
        self.items.push_back(value);
    }
}

impl FromIterator<Basket> for ArrayContents {
    fn from_iter<I: IntoIterator<Item = Basket>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ArrayContents {
    type Item = &'a Basket;
    type IntoIter = imbl::vector::Iter<'a, Basket, DefaultSharedPtr>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl From<Vec<Basket>> for ArrayContents {
    fn from(items: Vec<Basket>) -> Self {
        items.into_iter().collect()
    }
}
