//! Serialization tests, compiled only with the `serde` feature.
#![cfg(feature = "serde")]

use matpath::build_delimited;
use matpath::model::Tree;
use serde_json::json;

#[test]
fn tree_serializes_as_nested_structure() {
    let items = [("", "A"), ("b", "B"), ("b.c", "C")];
    let tree = build_delimited(
        items,
        '.',
        |item: &(&str, &str), _| item.0.to_string(),
        |item: &(&str, &str), _| item.1.to_string(),
    )
    .unwrap();

    let value = serde_json::to_value(&tree).unwrap();
    assert_eq!(
        value,
        json!({
            "data": "A",
            "children": {
                "0": {
                    "data": "B",
                    "children": {
                        "0": { "data": "C", "children": {} }
                    }
                }
            }
        })
    );
}

#[test]
fn rootless_tree_serializes_as_null() {
    let tree: Tree<i32> = Tree::new();
    assert_eq!(serde_json::to_value(&tree).unwrap(), serde_json::Value::Null);
}
