//! Store document queries, streaming and whole-tree side by side

use wicker_core::json;
use wicker_core::predicate::{has_key, has_key_matching, number_lt};
use wicker_core::prelude::*;
use wicker_core::tree;

const STORE: &str = r#"{
  "store": {
    "book": [
      {"category": "reference", "author": "Nigel Rees", "title": "Sayings of the Century", "price": 8.95},
      {"category": "fiction", "author": "Evelyn Waugh", "title": "Sword of Honour", "price": 12.99},
      {"category": "fiction", "author": "Herman Melville", "title": "Moby Dick", "isbn": "0-553-21311-3", "price": 8.99},
      {"category": "fiction", "author": "J. R. R. Tolkien", "title": "The Lord of the Rings", "isbn": "0-395-19395-8", "price": 22.99}
    ],
    "bicycle": [
      {"color": "red", "price": 19.95}
    ]
  },
  "expensive": 10
}"#;

const REES: &str = "Nigel Rees";
const WAUGH: &str = "Evelyn Waugh";
const MELVILLE: &str = "Herman Melville";
const TOLKIEN: &str = "J. R. R. Tolkien";
const BIKE: &str = "red bicycle";

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn store() -> Basket {
    json::parse(STORE).expect("store document is valid JSON")
}

/// Short label for a matched book or bicycle
fn label(value: &Basket) -> String {
    if let Some(text) = value.as_str() {
        return text.to_owned();
    }
    if let Some(author) = value.get("author").and_then(Basket::as_str) {
        return author.to_owned();
    }
    if let Some(color) = value.get("color").and_then(Basket::as_str) {
        return format!("{color} bicycle");
    }
    value.to_string()
}

fn streamed(path: &Path) -> Vec<Basket> {
    json::project_str(STORE, path).expect("streaming projection succeeds")
}

#[test]
fn test_projection_examples() {
    init_logging();
    let cases: Vec<(&str, Vec<&str>, &str)> = vec![
        ("$.store.book[*].author", vec![REES, WAUGH, MELVILLE, TOLKIEN], "authors of all books"),
        ("$..author", vec![REES, WAUGH, MELVILLE, TOLKIEN], "all authors"),
        ("$.store.*[*]", vec![REES, WAUGH, MELVILLE, TOLKIEN, BIKE], "all items"),
        ("$.store['book', 'bicycle'][*]", vec![REES, WAUGH, MELVILLE, TOLKIEN, BIKE], "books and bicycles"),
        ("$.store['bicycle', 'book'][*]", vec![BIKE, REES, WAUGH, MELVILLE, TOLKIEN], "bicycles and books"),
        (
            "$.store['bicycle', 'book', 'balloon'][*]",
            vec![BIKE, REES, WAUGH, MELVILLE, TOLKIEN],
            "missing key skipped",
        ),
        ("$..book[:-1]", vec![REES, WAUGH, MELVILLE], "all but last book"),
        ("$..book[0:-2]", vec![REES, WAUGH], "all but last two books"),
        ("$..book[-2:]", vec![MELVILLE, TOLKIEN], "last two books"),
        ("$..book[1:-1]", vec![WAUGH, MELVILLE], "middle two books"),
        ("$..book[1:]", vec![WAUGH, MELVILLE, TOLKIEN], "last three books"),
        ("$..book[2 ]", vec![MELVILLE], "third book"),
        ("$..book[ -2]", vec![MELVILLE], "second to last book"),
        ("$..book[0, 1]", vec![REES, WAUGH], "first two books"),
        ("$..book[1, 0]", vec![WAUGH, REES], "first two books reversed"),
        ("$..book[0, 100, 1]", vec![REES, WAUGH], "missing index skipped"),
        ("$..book[100]", vec![], "missing book"),
        ("$.gruffalo", vec![], "missing key"),
        ("$..gruffalo", vec![], "deep scan for missing key"),
    ];

    for (text, expected, description) in cases {
        let path = Path::parse_plain(text).expect("valid path");
        let from_stream: Vec<String> = streamed(&path).iter().map(label).collect();
        let from_tree: Vec<String> = tree::project(&path, &store()).iter().map(label).collect();
        assert_eq!(from_stream, expected, "streaming: {description}");
        assert_eq!(from_tree, expected, "whole tree: {description}");
    }
}

#[test]
fn test_all_prices() {
    let path = Path::parse_plain("$.store..price").expect("valid path");
    let expected: Vec<Number> = ["8.95", "12.99", "8.99", "22.99", "19.95"]
        .iter()
        .map(|text| text.parse().expect("valid number"))
        .collect();
    let prices: Vec<Number> = streamed(&path)
        .iter()
        .filter_map(Basket::as_number)
        .cloned()
        .collect();
    assert_eq!(prices, expected);
}

#[test]
fn test_predicate_queries() {
    init_logging();
    let cases = [
        (has_key("isbn"), vec![MELVILLE, TOLKIEN], "books with an isbn"),
        (has_key_matching("price", number_lt(10)), vec![REES, MELVILLE], "books cheaper than 10"),
    ];
    for (predicate, expected, description) in cases {
        let path = Path::parse("$..book[?]", [predicate]).expect("valid path");
        let from_stream: Vec<String> = streamed(&path).iter().map(label).collect();
        let from_tree: Vec<String> = tree::project(&path, &store()).iter().map(label).collect();
        assert_eq!(from_stream, expected, "streaming: {description}");
        assert_eq!(from_tree, expected, "whole tree: {description}");
    }
}

#[test]
fn test_rewrites_agree() {
    init_logging();
    let paths = [
        "$..price",
        "$.store.book[1, 3].title",
        "$.store.book[-1].author",
        "$.store.*[0]",
        "$..book[1:3]",
        "$.expensive",
        "$.nothing.here",
    ];
    let document = store();
    let mark = |value: Basket| Basket::object([("was", value)]);

    for text in paths {
        let path = Path::parse_plain(text).expect("valid path");
        let streamed = json::rewrite_str(STORE, &path, mark).expect("streaming rewrite succeeds");
        let expected = tree::rewrite(&path, &document, &mut |value| mark(value));
        assert_eq!(json::parse(&streamed).expect("output is valid JSON"), expected, "{text}");
    }
}

#[test]
fn test_update_through_lens() {
    let document = store();
    let titles = Lens::parse("$.store.book[*].title").expect("valid path");
    let shouted = titles.update_strings(&document, str::to_uppercase);
    let first = Lens::parse("$.store.book[0].title").expect("valid path");
    assert_eq!(first.get_one(&shouted), Some(Basket::from("SAYINGS OF THE CENTURY")));
    assert_eq!(first.get_one(&document), Some(Basket::from("Sayings of the Century")));
    assert_eq!(shouted.get("expensive"), document.get("expensive"));

    let authors = Lens::root().any("author");
    assert_eq!(
        authors.get_strings(&document),
        Some([REES, WAUGH, MELVILLE, TOLKIEN].map(String::from).to_vec())
    );
    assert_eq!(Lens::root().any("price").get_strings(&document), None);
}
