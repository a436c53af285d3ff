//! Arbitrary-precision decimal numbers
//!
//! A [`Number`] is kept in normalized form: a sign, the significant decimal
//! digits without leading or trailing zeros, and a base-10 exponent. Two
//! numbers are equal exactly when they denote the same value, so `1`, `1.0`
//! and `10e-1` compare and hash identically.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Exponent magnitude beyond which `Display` switches to scientific notation
const PLAIN_NOTATION_LIMIT: i64 = 21;

/// Largest accepted magnitude of the normalized exponent. Keeps digit-count
/// and exponent arithmetic inside `i64`.
const EXPONENT_LIMIT: i64 = i64::MAX / 4;

/// Arbitrary-precision decimal number
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Number {
    negative: bool,
    /// Significant digits, each `0..=9`, most significant first. Empty for zero.
    digits: Arc<[u8]>,
    /// The value is `digits * 10^exponent`
    exponent: i64,
}

/// Text that is not a JSON number
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid number literal '{literal}'")]
pub struct ParseNumberError {
    literal: String,
}

impl ParseNumberError {
    fn new(literal: &str) -> Self {
        Self {
            literal: literal.to_owned(),
        }
    }
}

impl Number {
    /// The number zero
    #[must_use]
    pub fn zero() -> Self {
        Self {
            negative: false,
            digits: Arc::from(Vec::new()),
            exponent: 0,
        }
    }

    /// Normalized number, or `None` when the exponent is out of range
    fn from_parts(negative: bool, mut digits: Vec<u8>, exponent: i64) -> Option<Self> {
        let leading = digits.iter().take_while(|&&d| d == 0).count();
        digits.drain(..leading);
        let trailing = digits.iter().rev().take_while(|&&d| d == 0).count();
        digits.truncate(digits.len() - trailing);
        if digits.is_empty() {
            return Some(Self::zero());
        }
        let exponent = exponent.checked_add(i64::try_from(trailing).ok()?)?;
        if exponent.unsigned_abs() > EXPONENT_LIMIT.unsigned_abs() {
            return None;
        }
        Some(Self {
            negative,
            digits: Arc::from(digits),
            exponent,
        })
    }

    fn from_magnitude(negative: bool, mut magnitude: u128) -> Self {
        if magnitude == 0 {
            return Self::zero();
        }
        let mut exponent = 0;
        while magnitude % 10 == 0 {
            magnitude /= 10;
            exponent += 1;
        }
        let mut digits = Vec::new();
        while magnitude > 0 {
            digits.push((magnitude % 10) as u8);
            magnitude /= 10;
        }
        digits.reverse();
        Self {
            negative,
            digits: Arc::from(digits),
            exponent,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Whether the value has no fractional part
    #[inline]
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.exponent >= 0
    }

    /// The negated value; zero stays zero
    #[must_use]
    pub fn neg(&self) -> Self {
        if self.is_zero() {
            return self.clone();
        }
        Self {
            negative: !self.negative,
            digits: Arc::clone(&self.digits),
            exponent: self.exponent,
        }
    }

    /// The value as `i64` if it is an integer in range
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        let magnitude = self.integer_magnitude()?;
        if self.negative {
            0i128.checked_sub(magnitude as i128).and_then(|v| i64::try_from(v).ok())
        } else {
            i64::try_from(magnitude).ok()
        }
    }

    /// The value as `u64` if it is a non-negative integer in range
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        if self.negative {
            return None;
        }
        self.integer_magnitude().and_then(|m| u64::try_from(m).ok())
    }

    fn integer_magnitude(&self) -> Option<u128> {
        if !self.is_integer() {
            return None;
        }
        let width = self.digits.len() as i64 + self.exponent;
        if width > 38 {
            return None;
        }
        let mut value: u128 = 0;
        for &digit in self.digits.iter() {
            value = value.checked_mul(10)?.checked_add(u128::from(digit))?;
        }
        for _ in 0..self.exponent {
            value = value.checked_mul(10)?;
        }
        Some(value)
    }

    /// Nearest `f64`; values outside the `f64` range become infinite
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        self.to_string().parse().unwrap_or(f64::NAN)
    }

    /// Position of the decimal point relative to the first significant digit
    fn point(&self) -> i64 {
        self.digits.len() as i64 + self.exponent
    }

    fn cmp_magnitude(&self, other: &Self) -> Ordering {
        match (self.is_zero(), other.is_zero()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }
        self.point()
            .cmp(&other.point())
            .then_with(|| self.digits.iter().cmp(other.digits.iter()))
    }
}

impl Default for Number {
    fn default() -> Self {
        Self::zero()
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => self.cmp_magnitude(other),
            (true, true) => other.cmp_magnitude(self),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for Number {
    type Err = ParseNumberError;

    /// Parses JSON number syntax: `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`
    fn from_str(literal: &str) -> Result<Self, Self::Err> {
        let bytes = literal.as_bytes();
        let mut pos = 0;
        let negative = bytes.first() == Some(&b'-');
        if negative {
            pos += 1;
        }

        let int_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        let integer = &bytes[int_start..pos];
        if integer.is_empty() || (integer.len() > 1 && integer[0] == b'0') {
            return Err(ParseNumberError::new(literal));
        }

        let mut fraction: &[u8] = &[];
        if bytes.get(pos) == Some(&b'.') {
            pos += 1;
            let frac_start = pos;
            while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                pos += 1;
            }
            fraction = &bytes[frac_start..pos];
            if fraction.is_empty() {
                return Err(ParseNumberError::new(literal));
            }
        }

        let mut exponent: i64 = 0;
        if matches!(bytes.get(pos), Some(b'e' | b'E')) {
            pos += 1;
            let exp_start = pos;
            if matches!(bytes.get(pos), Some(b'+' | b'-')) {
                pos += 1;
            }
            if !bytes.get(pos).is_some_and(u8::is_ascii_digit) {
                return Err(ParseNumberError::new(literal));
            }
            exponent = literal[exp_start..]
                .parse()
                .map_err(|_| ParseNumberError::new(literal))?;
            pos = bytes.len();
        }

        if pos != bytes.len() {
            return Err(ParseNumberError::new(literal));
        }

        let digits = integer
            .iter()
            .chain(fraction)
            .map(|b| b - b'0')
            .collect::<Vec<_>>();
        i64::try_from(fraction.len())
            .ok()
            .and_then(|shift| exponent.checked_sub(shift))
            .and_then(|exponent| Self::from_parts(negative, digits, exponent))
            .ok_or_else(|| ParseNumberError::new(literal))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }
        if self.negative {
            f.write_str("-")?;
        }
        let digits: String = self.digits.iter().map(|d| char::from(b'0' + d)).collect();
        let point = self.point();

        if (0..=PLAIN_NOTATION_LIMIT).contains(&self.exponent) {
            f.write_str(&digits)?;
            for _ in 0..self.exponent {
                f.write_str("0")?;
            }
            Ok(())
        } else if self.exponent < 0 && point > 0 {
            let (whole, frac) = digits.split_at(point as usize);
            write!(f, "{whole}.{frac}")
        } else if point <= 0 && point > -PLAIN_NOTATION_LIMIT {
            f.write_str("0.")?;
            for _ in point..0 {
                f.write_str("0")?;
            }
            f.write_str(&digits)
        } else {
            let (first, rest) = digits.split_at(1);
            if rest.is_empty() {
                write!(f, "{first}e{}", point - 1)
            } else {
                write!(f, "{first}.{rest}e{}", point - 1)
            }
        }
    }
}

impl fmt::Debug for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Number({self})")
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self::from_magnitude(value < 0, u128::from(value.unsigned_abs()))
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Self::from(i64::from(value))
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        Self::from_magnitude(false, u128::from(value))
    }
}

impl From<usize> for Number {
    fn from(value: usize) -> Self {
        Self::from_magnitude(false, value as u128)
    }
}

impl TryFrom<f64> for Number {
    type Error = ParseNumberError;

    /// Converts finite floats using their shortest round-trip representation
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(ParseNumberError::new(&value.to_string()));
        }
        format!("{value:e}").parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(text: &str) -> Number {
        text.parse().expect("valid number literal")
    }

    #[test]
    fn test_numeric_equality_ignores_representation() {
        assert_eq!(num("1"), num("1.0"));
        assert_eq!(num("1"), num("10e-1"));
        assert_eq!(num("100"), num("1e2"));
        assert_eq!(num("0"), num("-0.000"));
        assert_ne!(num("1"), num("-1"));
        assert_eq!(Number::from(42), num("42.00"));
    }

    #[test]
    fn test_ordering() {
        let mut values = vec![num("10"), num("-2.5"), num("0"), num("9.99"), num("-10"), num("1e3")];
        values.sort();
        let rendered: Vec<String> = values.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["-10", "-2.5", "0", "9.99", "10", "1000"]);
        assert!(num("0.001") < num("0.01"));
        assert!(num("-0.001") > num("-0.01"));
    }

    #[test]
    fn test_display_forms() {
        let cases = [
            ("12.5", "12.5"),
            ("-0.25", "-0.25"),
            ("1.500e2", "150"),
            ("0.000123", "0.000123"),
            ("1e30", "1e30"),
            ("12345678901234567890123456789", "12345678901234567890123456789"),
            ("2.5e-40", "2.5e-40"),
            ("8.95", "8.95"),
        ];
        for (input, expected) in cases {
            assert_eq!(num(input).to_string(), expected, "display of {input}");
        }
    }

    #[test]
    fn test_rejects_non_json_literals() {
        for literal in ["", "-", "01", "1.", ".5", "1e", "1e+", "+1", "1x", "NaN"] {
            assert!(literal.parse::<Number>().is_err(), "{literal:?} should be rejected");
        }
    }

    #[test]
    fn test_extreme_exponents() {
        for literal in ["10e9223372036854775807", "1e9223372036854775807", "1e-9223372036854775808", "0.1e-9223372036854775807"] {
            assert!(literal.parse::<Number>().is_err(), "{literal} should be out of range");
        }
        assert_eq!(num("0e9223372036854775807"), Number::zero());

        let huge = num("1e1000000000000");
        assert_eq!(huge.to_string(), "1e1000000000000");
        assert!(huge > num("9e999999999999"));
        assert!(num("-1e1000000000000") < num("-9e999999999999"));
        assert_eq!(huge.as_i64(), None);
        assert_eq!(num("2.5e-1000000000000").to_string(), "2.5e-1000000000000");
    }

    #[test]
    fn test_integer_conversions() {
        assert_eq!(num("-9223372036854775808").as_i64(), Some(i64::MIN));
        assert_eq!(num("9223372036854775808").as_i64(), None);
        assert_eq!(num("9223372036854775808").as_u64(), Some(9_223_372_036_854_775_808));
        assert_eq!(num("1.5").as_i64(), None);
        assert_eq!(num("2e3").as_i64(), Some(2000));
        assert_eq!(num("-3").neg(), num("3"));
    }

    #[test]
    fn test_float_conversions() {
        assert_eq!(Number::try_from(8.99).map(|n| n.to_string()), Ok("8.99".to_string()));
        assert_eq!(Number::try_from(-0.5), Ok(num("-0.5")));
        assert!(Number::try_from(f64::NAN).is_err());
        assert!((num("22.99").as_f64() - 22.99).abs() < f64::EPSILON);
    }
}
