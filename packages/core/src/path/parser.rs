//! Path text parser
//!
//! Grammar, after a leading `$` or `@`:
//!
//! - `.*` and `[*]`: wildcard
//! - `[?]`: conditional, bound to the next supplied predicate
//! - `.name`: key, where `name` is `[A-Za-z0-9_-]+`
//! - `..name`: deep scan
//! - `['a']`, `['a', 'b']`: keys (single or double quotes, `\` escapes the
//!   next character)
//! - `[1]`, `[0, -1]`: indices
//! - `[1:3]`, `[1:]`, `[:-1]`: slices
//!
//! Whitespace around the whole path and inside brackets is ignored.

use std::borrow::Cow;
use std::collections::VecDeque;

use super::segment::PathSegment;
use super::Path;
use crate::error::PathError;
use crate::predicate::BasketPredicate;

/// Parse `text` into a [`Path`]
///
/// # Errors
///
/// Returns a `PathError` describing the first problem found.
pub fn parse_path(
    text: &str,
    predicates: impl IntoIterator<Item = BasketPredicate>,
) -> Result<Path, PathError> {
    let mut parser = PathParser {
        source: text,
        predicates: predicates.into_iter().collect(),
        segments: Vec::new(),
    };
    let path = parser.parse()?;
    log::debug!("parsed path '{}' into {} segment(s)", text, path.len());
    Ok(path)
}

struct PathParser<'a> {
    source: &'a str,
    predicates: VecDeque<BasketPredicate>,
    segments: Vec<PathSegment>,
}

impl PathParser<'_> {
    fn parse(&mut self) -> Result<Path, PathError> {
        let source = self.source;
        let trimmed = source.trim();
        let Some(mut rest) = trimmed
            .strip_prefix('$')
            .or_else(|| trimmed.strip_prefix('@'))
        else {
            return Err(PathError::missing_root(source));
        };

        while !rest.is_empty() {
            let position = trimmed.len() - rest.len();
            rest = self.parse_segment(rest, position)?;
        }

        if !self.predicates.is_empty() {
            return Err(PathError::UnusedPredicates {
                path: self.source.to_owned(),
                count: self.predicates.len(),
            });
        }
        Ok(Path::from_segments(std::mem::take(&mut self.segments)))
    }

    /// Parse one segment from the front of `rest`, returning what follows it
    fn parse_segment<'r>(&mut self, rest: &'r str, position: usize) -> Result<&'r str, PathError> {
        if let Some(after) = rest.strip_prefix("..") {
            let (name, after) = split_name(after);
            if name.is_empty() {
                return Err(PathError::unrecognised(self.source, position));
            }
            self.segments.push(PathSegment::deep_scan(name));
            return Ok(after);
        }

        if let Some(after) = rest.strip_prefix(".*") {
            self.segments.push(PathSegment::Wildcard);
            return Ok(after);
        }

        if let Some(after) = rest.strip_prefix('.') {
            let (name, after) = split_name(after);
            if name.is_empty() {
                return Err(PathError::unrecognised(self.source, position));
            }
            self.segments.push(PathSegment::key(name));
            return Ok(after);
        }

        if rest.starts_with('[') {
            let close = closing_bracket(rest)
                .ok_or_else(|| PathError::unrecognised(self.source, position))?;
            let expression = rest[1..close].trim();
            let segment = self.parse_bracket(expression, position)?;
            self.segments.push(segment);
            return Ok(&rest[close + 1..]);
        }

        Err(PathError::unrecognised(self.source, position))
    }

    fn parse_bracket(&mut self, expression: &str, position: usize) -> Result<PathSegment, PathError> {
        match expression {
            "*" => return Ok(PathSegment::Wildcard),
            "?" => {
                let predicate = self.predicates.pop_front().ok_or_else(|| {
                    PathError::UnmatchedPredicate {
                        path: self.source.to_owned(),
                        position,
                    }
                })?;
                return Ok(PathSegment::conditional(predicate));
            }
            "" => return Err(PathError::unrecognised(self.source, position)),
            _ => {}
        }

        let items = split_list(expression);
        if items.len() > 1 {
            return self.parse_list(&items);
        }

        if let Some(name) = unquote(expression) {
            return Ok(PathSegment::key(name));
        }

        if let Some((start, end)) = expression.split_once(':') {
            return self.parse_slice(expression, start.trim(), end.trim());
        }

        parse_index(expression)
            .map(PathSegment::index)
            .ok_or_else(|| PathError::invalid_index(self.source, expression))
    }

    fn parse_list(&self, items: &[&str]) -> Result<PathSegment, PathError> {
        if items.iter().all(|item| unquote(item).is_some()) {
            return Ok(PathSegment::keys(items.iter().filter_map(|item| unquote(item))));
        }
        items
            .iter()
            .map(|item| {
                parse_index(item).ok_or_else(|| PathError::invalid_index(self.source, *item))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(PathSegment::Indices)
    }

    fn parse_slice(&self, expression: &str, start: &str, end: &str) -> Result<PathSegment, PathError> {
        if start.is_empty() && end.is_empty() {
            return Err(PathError::invalid_slice(self.source, expression));
        }
        let bound = |text: &str| -> Result<Option<i64>, PathError> {
            if text.is_empty() {
                return Ok(None);
            }
            parse_index(text)
                .map(Some)
                .ok_or_else(|| PathError::invalid_slice(self.source, expression))
        };
        Ok(PathSegment::slice(bound(start)?, bound(end)?))
    }
}

/// Split a leading `[A-Za-z0-9_-]+` name from `text`
fn split_name(text: &str) -> (&str, &str) {
    let end = text
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
        .unwrap_or(text.len());
    text.split_at(end)
}

/// Byte offset of the `]` closing the bracket that opens `text`, ignoring
/// brackets inside quoted names
fn closing_bracket(text: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (offset, c) in text.char_indices().skip(1) {
        match (quote, c) {
            (Some(_), _) if escaped => escaped = false,
            (Some(_), '\\') => escaped = true,
            (Some(open), c) if c == open => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, ']') => return Some(offset),
            (None, _) => {}
        }
    }
    None
}

/// Split on commas outside quotes, trimming each item
fn split_list(expression: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;
    for (offset, c) in expression.char_indices() {
        match (quote, c) {
            (Some(_), _) if escaped => escaped = false,
            (Some(_), '\\') => escaped = true,
            (Some(open), c) if c == open => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, ',') => {
                items.push(expression[start..offset].trim());
                start = offset + 1;
            }
            (None, _) => {}
        }
    }
    items.push(expression[start..].trim());
    items
}

/// The name inside matching single or double quotes, with backslash
/// escapes resolved
fn unquote(item: &str) -> Option<Cow<'_, str>> {
    let quote = item.chars().next().filter(|c| matches!(c, '\'' | '"'))?;
    let inner = item.strip_prefix(quote)?.strip_suffix(quote)?;
    if !inner.contains('\\') {
        return (!inner.contains(quote)).then_some(Cow::Borrowed(inner));
    }
    let mut name = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => name.push(chars.next()?),
            c if c == quote => return None,
            c => name.push(c),
        }
    }
    Some(Cow::Owned(name))
}

/// `-?[0-9]+`
fn parse_index(text: &str) -> Option<i64> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::{has_key, is_null};

    fn display(text: &str) -> String {
        parse_path(text, std::iter::empty())
            .map(|path| path.to_string())
            .unwrap_or_else(|err| format!("error: {err}"))
    }

    #[test]
    fn test_canonical_forms() {
        let cases = [
            ("$", "$", "root only"),
            ("  $.store.book  ", "$.store.book", "surrounding whitespace"),
            ("@.store", "$.store", "current-node root"),
            ("$.store.*", "$.store.*", "dot wildcard"),
            ("$.store[*]", "$.store.*", "bracket wildcard"),
            ("$..author", "$..author", "deep scan"),
            ("$['store']", "$.store", "quoted key"),
            ("$[\"store\"]", "$.store", "double quoted key"),
            ("$['a b']", "$['a b']", "key needing quotes"),
            ("$.store['bicycle','book']", "$.store['bicycle', 'book']", "key list"),
            ("$..book[2 ]", "$..book[2]", "padded index"),
            ("$..book[ -2]", "$..book[-2]", "negative index"),
            ("$..book[0, 100, 1]", "$..book[0, 100, 1]", "index list"),
            ("$..book[:-1]", "$..book[:-1]", "slice without start"),
            ("$..book[1:]", "$..book[1:]", "slice without end"),
            ("$..book[0:-2]", "$..book[0:-2]", "bounded slice"),
            ("$['x]y']", "$['x]y']", "bracket inside quotes"),
            (r#"$["it's"]"#, r"$['it\'s']", "apostrophe in double quotes"),
            (r#"$['a\'b"c\\d']"#, r#"$['a\'b"c\\d']"#, "escaped quote and backslash"),
            (r"$['p\']', 'q,r']", r"$['p\']', 'q,r']", "escapes inside a key list"),
            ("$.a-b_c.d1", "$.a-b_c.d1", "name characters"),
        ];
        for (input, expected, description) in cases {
            assert_eq!(display(input), expected, "{description}");
        }
    }

    #[test]
    fn test_malformed_paths() {
        let cases = [
            ("store.book", PathError::missing_root("store.book")),
            ("$.", PathError::unrecognised("$.", 1)),
            ("$..", PathError::unrecognised("$..", 1)),
            ("$.a!", PathError::unrecognised("$.a!", 3)),
            ("$[1", PathError::unrecognised("$[1", 1)),
            ("$[]", PathError::unrecognised("$[]", 1)),
            ("$[x]", PathError::invalid_index("$[x]", "x")),
            ("$[1, 'a']", PathError::invalid_index("$[1, 'a']", "'a'")),
            ("$[1,]", PathError::invalid_index("$[1,]", "")),
            ("$[:]", PathError::invalid_slice("$[:]", ":")),
            ("$[1:x]", PathError::invalid_slice("$[1:x]", "1:x")),
        ];
        for (input, expected) in cases {
            assert_eq!(parse_path(input, std::iter::empty()).err(), Some(expected), "{input}");
        }
    }

    #[test]
    fn test_predicates_bind_in_order() {
        let path = parse_path("$.a[?].b[?]", [has_key("x"), is_null()]).expect("valid path");
        let labels: Vec<&str> = path
            .segments()
            .iter()
            .filter_map(|segment| match segment {
                PathSegment::Conditional(predicate) => Some(predicate.label()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, ["has_key(x)", "is_null"]);
    }

    #[test]
    fn test_predicate_count_mismatch() {
        assert_eq!(
            parse_path("$.a[?]", std::iter::empty()).err(),
            Some(PathError::UnmatchedPredicate { path: "$.a[?]".into(), position: 3 })
        );
        assert_eq!(
            parse_path("$.a", [is_null()]).err(),
            Some(PathError::UnusedPredicates { path: "$.a".into(), count: 1 })
        );
    }

    #[test]
    fn test_display_round_trip() {
        for text in ["$.store.book[0, 1].title", "$..book[-2:]", "$['a b'].*", "$[1:3]..x"] {
            let once = display(text);
            assert_eq!(display(&once), once);
        }
    }
}
