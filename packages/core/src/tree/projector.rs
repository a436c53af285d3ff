//! Whole-tree projection

use crate::basket::Basket;
use crate::path::{Path, PathSegment};

/// Every value in `value` matched by `path`, in match order
///
/// Returns an empty vector when nothing matches.
#[must_use]
pub fn project(path: &Path, value: &Basket) -> Vec<Basket> {
    let mut matches = Vec::new();
    project_into(path, value, &mut matches);
    matches
}

fn project_into(path: &Path, value: &Basket, matches: &mut Vec<Basket>) {
    let Some(segment) = path.head() else {
        matches.push(value.clone());
        return;
    };
    let tail = path.tail();

    match (segment, value) {
        (PathSegment::Keys(_), Basket::Object(properties)) => {
            for name in segment.resolve_keys() {
                if let Some(child) = properties.get(name) {
                    project_into(&tail, child, matches);
                }
            }
        }
        (PathSegment::Indices(_), Basket::Array(items)) => {
            for index in segment.resolve_indices(items.len()) {
                if let Some(child) = items.get(index) {
                    project_into(&tail, child, matches);
                }
            }
        }
        (PathSegment::Slice { .. }, Basket::Array(items)) => {
            for index in segment.resolve_slice(items.len()) {
                if let Some(child) = items.get(index) {
                    project_into(&tail, child, matches);
                }
            }
        }
        (PathSegment::Wildcard, Basket::Array(items)) => {
            for child in items {
                project_into(&tail, child, matches);
            }
        }
        (PathSegment::Wildcard, Basket::Object(properties)) => {
            for child in properties.values() {
                project_into(&tail, child, matches);
            }
        }
        (PathSegment::DeepScan(name), _) => scan_into(name, &tail, value, matches),
        (PathSegment::Conditional(predicate), Basket::Array(items)) => {
            for child in items.iter().filter(|child| predicate.test(child)) {
                project_into(&tail, child, matches);
            }
        }
        (PathSegment::Conditional(predicate), Basket::Object(properties)) => {
            for child in properties.values().filter(|child| predicate.test(child)) {
                project_into(&tail, child, matches);
            }
        }
        _ => {}
    }
}

fn scan_into(name: &str, tail: &Path, value: &Basket, matches: &mut Vec<Basket>) {
    match value {
        Basket::Object(properties) => {
            for (key, child) in properties.iter() {
                if key == name {
                    project_into(tail, child, matches);
                } else {
                    scan_into(name, tail, child, matches);
                }
            }
        }
        Basket::Array(items) => {
            for child in items {
                scan_into(name, tail, child, matches);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::number_gt;

    fn sample() -> Basket {
        Basket::object([
            ("a", Basket::array([1, 2, 3, 4].map(Basket::from))),
            (
                "b",
                Basket::object([
                    ("a", Basket::object([("a", Basket::from("inner"))])),
                    ("c", Basket::object([("a", Basket::from(true))])),
                ]),
            ),
        ])
    }

    fn run(text: &str) -> Vec<Basket> {
        project(&Path::parse_plain(text).expect("valid path"), &sample())
    }

    #[test]
    fn test_empty_path_yields_root() {
        assert_eq!(project(&Path::root(), &sample()), vec![sample()]);
    }

    #[test]
    fn test_indices_and_slices() {
        assert_eq!(run("$.a[-1]"), vec![Basket::from(4)]);
        assert_eq!(run("$.a[2, 0]"), vec![Basket::from(3), Basket::from(1)]);
        assert_eq!(run("$.a[1:-1]"), vec![Basket::from(2), Basket::from(3)]);
        assert!(run("$.a[9]").is_empty());
        assert!(run("$.b[0]").is_empty());
    }

    #[test]
    fn test_deep_scan_does_not_rescan_matches() {
        let found = run("$..a");
        assert_eq!(found.len(), 3);
        assert!(found[0].is_array());
        assert_eq!(found[1], Basket::object([("a", Basket::from("inner"))]));
        assert_eq!(found[2], Basket::from(true));
    }

    #[test]
    fn test_conditional_filters_items() {
        let path = Path::parse("$.a[?]", [number_gt(2)]).expect("valid path");
        assert_eq!(project(&path, &sample()), vec![Basket::from(3), Basket::from(4)]);
    }

    #[test]
    fn test_scalar_input_yields_nothing() {
        assert!(project(&Path::parse_plain("$.*").expect("valid"), &Basket::from(1)).is_empty());
    }
}
