//! Basket predicates
//!
//! A [`BasketPredicate`] is a shareable boolean test over a fully built
//! Basket. Predicates back the conditional `[?]` path segment and the lens
//! helpers. A predicate applied to a value of the wrong type answers `false`
//! rather than failing.

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::basket::{Basket, Number};

type Test = dyn Fn(&Basket) -> bool + Send + Sync;

/// Shareable boolean test over a Basket
#[derive(Clone)]
pub struct BasketPredicate {
    label: Arc<str>,
    test: Arc<Test>,
}

impl BasketPredicate {
    /// Wrap a closure; `label` is used in `Debug` output and diagnostics
    pub fn new(
        label: impl Into<Arc<str>>,
        test: impl Fn(&Basket) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            test: Arc::new(test),
        }
    }

    #[inline]
    #[must_use]
    pub fn test(&self, value: &Basket) -> bool {
        (self.test)(value)
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn and(self, other: BasketPredicate) -> Self {
        let label = format!("({} && {})", self.label, other.label);
        Self::new(label, move |value| self.test(value) && other.test(value))
    }

    #[must_use]
    pub fn or(self, other: BasketPredicate) -> Self {
        let label = format!("({} || {})", self.label, other.label);
        Self::new(label, move |value| self.test(value) || other.test(value))
    }

    #[must_use]
    pub fn not(self) -> Self {
        let label = format!("!{}", self.label);
        Self::new(label, move |value| !self.test(value))
    }
}

impl fmt::Debug for BasketPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BasketPredicate({})", self.label)
    }
}

/// Accepts every value
#[must_use]
pub fn always() -> BasketPredicate {
    BasketPredicate::new("always", |_| true)
}

#[must_use]
pub fn is_string() -> BasketPredicate {
    BasketPredicate::new("is_string", Basket::is_string)
}

#[must_use]
pub fn is_number() -> BasketPredicate {
    BasketPredicate::new("is_number", Basket::is_number)
}

#[must_use]
pub fn is_boolean() -> BasketPredicate {
    BasketPredicate::new("is_boolean", Basket::is_boolean)
}

#[must_use]
pub fn is_null() -> BasketPredicate {
    BasketPredicate::new("is_null", Basket::is_null)
}

#[must_use]
pub fn is_array() -> BasketPredicate {
    BasketPredicate::new("is_array", Basket::is_array)
}

#[must_use]
pub fn is_object() -> BasketPredicate {
    BasketPredicate::new("is_object", Basket::is_object)
}

#[must_use]
pub fn is_true() -> BasketPredicate {
    BasketPredicate::new("is_true", |value| value.as_bool() == Some(true))
}

#[must_use]
pub fn is_false() -> BasketPredicate {
    BasketPredicate::new("is_false", |value| value.as_bool() == Some(false))
}

/// Empty string, array or object
#[must_use]
pub fn is_empty() -> BasketPredicate {
    BasketPredicate::new("is_empty", |value| match value {
        Basket::String(text) => text.is_empty(),
        Basket::Array(items) => items.is_empty(),
        Basket::Object(properties) => properties.is_empty(),
        _ => false,
    })
}

/// Object that has `key`
pub fn has_key(key: impl Into<Arc<str>>) -> BasketPredicate {
    let key: Arc<str> = key.into();
    BasketPredicate::new(format!("has_key({key})"), move |value| {
        value.as_object().is_some_and(|properties| properties.contains_key(&key))
    })
}

/// Object whose `key` holds a value accepted by `predicate`
pub fn has_key_matching(key: impl Into<Arc<str>>, predicate: BasketPredicate) -> BasketPredicate {
    let key: Arc<str> = key.into();
    BasketPredicate::new(format!("has_key({key}, {})", predicate.label()), move |value| {
        value.get(&key).is_some_and(|field| predicate.test(field))
    })
}

/// String equal to `expected`
pub fn string_eq(expected: impl Into<Arc<str>>) -> BasketPredicate {
    let expected: Arc<str> = expected.into();
    BasketPredicate::new(format!("== {expected:?}"), move |value| {
        value.as_str() == Some(&*expected)
    })
}

/// String matching `pattern`
///
/// # Errors
///
/// Returns an error if `pattern` is not a valid regular expression.
pub fn matches_regex(pattern: &str) -> crate::Result<BasketPredicate> {
    let regex = Regex::new(pattern)?;
    Ok(BasketPredicate::new(format!("=~ /{pattern}/"), move |value| {
        value.as_str().is_some_and(|text| regex.is_match(text))
    }))
}

fn compare(
    symbol: &str,
    bound: Number,
    accept: impl Fn(std::cmp::Ordering) -> bool + Send + Sync + 'static,
) -> BasketPredicate {
    BasketPredicate::new(format!("{symbol} {bound}"), move |value| {
        value.as_number().is_some_and(|number| accept(number.cmp(&bound)))
    })
}

pub fn number_eq(bound: impl Into<Number>) -> BasketPredicate {
    compare("==", bound.into(), std::cmp::Ordering::is_eq)
}

pub fn number_lt(bound: impl Into<Number>) -> BasketPredicate {
    compare("<", bound.into(), std::cmp::Ordering::is_lt)
}

pub fn number_le(bound: impl Into<Number>) -> BasketPredicate {
    compare("<=", bound.into(), std::cmp::Ordering::is_le)
}

pub fn number_gt(bound: impl Into<Number>) -> BasketPredicate {
    compare(">", bound.into(), std::cmp::Ordering::is_gt)
}

pub fn number_ge(bound: impl Into<Number>) -> BasketPredicate {
    compare(">=", bound.into(), std::cmp::Ordering::is_ge)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_mismatch_is_false() {
        let text = Basket::from("10");
        assert!(!number_lt(20).test(&text));
        assert!(!has_key("a").test(&text));
        assert!(!is_true().test(&Basket::from(1)));
    }

    #[test]
    fn test_number_comparisons() {
        let price: Number = "8.99".parse().expect("number");
        let value = Basket::from(price);
        assert!(number_lt(10).test(&value));
        assert!(number_le(10).test(&value));
        assert!(!number_gt(10).test(&value));
        assert!(number_ge(8).test(&value));
        assert!(number_eq(Number::try_from(8.99).expect("finite")).test(&value));
    }

    #[test]
    fn test_key_predicates() {
        let book = Basket::object([("isbn", Basket::from("0-553-21311-3"))]);
        assert!(has_key("isbn").test(&book));
        assert!(has_key_matching("isbn", is_string()).test(&book));
        assert!(!has_key_matching("isbn", is_number()).test(&book));
        assert!(!has_key("price").test(&book));
    }

    #[test]
    fn test_combinators() {
        let small_number = is_number().and(number_lt(5));
        assert!(small_number.test(&Basket::from(3)));
        assert!(!small_number.test(&Basket::from(7)));
        assert!(small_number.clone().not().test(&Basket::from(7)));
        assert!(small_number.or(is_null()).test(&Basket::Null));
    }

    #[test]
    fn test_regex_and_empty() {
        let reference = matches_regex("^ref-[0-9]+$").expect("valid pattern");
        assert!(reference.test(&Basket::from("ref-42")));
        assert!(!reference.test(&Basket::from("ref-x")));
        assert!(matches_regex("(").is_err());

        assert!(is_empty().test(&Basket::empty_array()));
        assert!(is_empty().test(&Basket::from("")));
        assert!(!is_empty().test(&Basket::Null));
    }
}
