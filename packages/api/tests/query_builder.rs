//! Fluent query API over values and JSON text

use wicker::predicate::{has_key, number_gt};
use wicker::{Basket, Error, JsonReader, JsonText, Lens, NegativeIndexPolicy, PathError, Wicker, WriterError};

const CATALOGUE: &str = r#"{
  "shelves": [
    {"label": "A", "items": [{"sku": 1, "qty": 4}, {"sku": 2, "qty": 0}]},
    {"label": "B", "items": [{"sku": 3, "qty": 9}]},
    {"label": "C"}
  ]
}"#;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn restock(value: Basket) -> Basket {
    match value.as_number().and_then(|qty| qty.as_i64()) {
        Some(qty) => Basket::from(qty + 10),
        None => value,
    }
}

#[test]
fn test_project_json() {
    init_logging();
    let labels = Wicker::path("$.shelves[*].label")
        .debug()
        .project_json(CATALOGUE)
        .expect("query succeeds");
    assert_eq!(labels, ["A", "B", "C"].map(Basket::from));

    let skus = Wicker::path("$..sku").project_json(CATALOGUE).expect("query succeeds");
    assert_eq!(skus, [1, 2, 3].map(Basket::from));
}

#[test]
fn test_predicates_bind_in_order() {
    let stocked = Wicker::path("$.shelves[?].items[?].sku")
        .predicate(has_key("items"))
        .predicate(Lens::root().key("qty").all_match(number_gt(0)))
        .project_json(CATALOGUE)
        .expect("query succeeds");
    assert_eq!(stocked, [1, 3].map(Basket::from));
}

#[test]
fn test_rewrite_json_and_value_agree() {
    let query = Wicker::path("$.shelves[*].items[*].qty").compile().expect("valid query");
    let text = query.rewrite_json(CATALOGUE, restock).expect("rewrite succeeds");

    let document = wicker::json::parse(CATALOGUE).expect("valid json");
    let rewritten = query.rewrite(&document, restock).expect("rewrite succeeds");
    assert_eq!(wicker::json::parse(&text).expect("valid json"), rewritten);

    let quantities = query.project(&rewritten).expect("query succeeds");
    assert_eq!(quantities, [14, 10, 19].map(Basket::from));
}

#[test]
fn test_sources() {
    let query = Wicker::path("$.shelves[-1].label").compile().expect("valid query");
    let document = wicker::json::parse(CATALOGUE).expect("valid json");
    let expected = vec![Basket::from("C")];

    assert_eq!(query.project(&document).expect("value source"), expected);
    assert_eq!(query.project(JsonText(CATALOGUE)).expect("text source"), expected);
    assert_eq!(
        query.project(JsonReader(CATALOGUE.as_bytes())).expect("reader source"),
        expected
    );
}

#[test]
fn test_sub_projection() {
    let query = Wicker::path("$.shelves[1, 0]").compile().expect("valid query");
    let labels = query
        .project_with(JsonText(CATALOGUE), Lens::root().key("label"))
        .expect("query succeeds");
    assert_eq!(labels, ["B", "A"].map(Basket::from));
}

#[test]
fn test_configuration() {
    let in_document_order = Wicker::path("$.shelves[2, 0].label")
        .declared_order(false)
        .project_json(CATALOGUE)
        .expect("query succeeds");
    assert_eq!(in_document_order, ["A", "C"].map(Basket::from));

    let rejected = Wicker::path("$.shelves[-1]")
        .negative_indices(NegativeIndexPolicy::Reject)
        .project_json(CATALOGUE);
    assert!(matches!(
        rejected,
        Err(Error::Json(wicker::JsonError::Writer(WriterError::UnsupportedSegment { .. })))
    ));

    let too_deep = Wicker::path("$..sku").max_depth(2).project_json(CATALOGUE);
    assert!(matches!(
        too_deep,
        Err(Error::Json(wicker::JsonError::Writer(WriterError::DepthLimitExceeded { max: 2, .. })))
    ));

    let invalid = Wicker::path("$").max_depth(0).compile();
    assert!(matches!(invalid, Err(Error::Configuration(_))));
}

#[test]
fn test_errors() {
    let cases = [
        ("shelves", "missing root"),
        ("$.shelves[", "unclosed bracket"),
        ("$[?]", "placeholder without predicate"),
    ];
    for (text, description) in cases {
        let result = Wicker::path(text).compile();
        assert!(matches!(result, Err(Error::Path(_))), "{description}");
    }

    let unused = Wicker::path("$.a").predicate(has_key("x")).compile();
    assert!(matches!(unused, Err(Error::Path(PathError::UnusedPredicates { count: 1, .. }))));

    let malformed = Wicker::path("$.a").project_json("{\"a\": ");
    assert!(matches!(malformed, Err(Error::Json(wicker::JsonError::Syntax(_)))));
}
