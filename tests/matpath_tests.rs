//! Tests for the materialized-path builder: ordering tolerance, bridge
//! absorption, collision handling and the extractor helpers.

use matpath::error::BuildErrorKind;
use matpath::matpath::{TreeBuilder, delimited};
use matpath::model::Tree;
use matpath::{build_delimited, build_fixed, parse_path};
use proptest::prelude::*;

type Item = (&'static str, &'static str);

fn builder() -> TreeBuilder<
    Tree<&'static str>,
    impl FnMut(&Item, usize) -> &'static str,
    impl FnMut(&Item, usize, &&'static str) -> Result<matpath::model::PathVector, matpath::BuildError>,
> {
    TreeBuilder::new(
        |item: &Item, _| item.1,
        delimited('.', |item: &Item, _| item.0.to_string()),
    )
}

/// Collects (parent data, child data) edges of a built tree.
fn edges(tree: &Tree<&'static str>) -> Vec<(&'static str, &'static str)> {
    let mut edges: Vec<_> = tree
        .pre_order_iter()
        .filter_map(|visit| {
            let parent = tree[visit.id].parent()?;
            Some((*tree[parent].data(), *visit.data))
        })
        .collect();
    edges.sort();
    edges
}

#[test]
fn builds_small_tree_from_unordered_input() {
    let items: [Item; 3] = [("1.1", "C"), ("", "A"), ("1", "B")];
    let tree = builder().build(items).unwrap();

    assert!(tree.is_valid());
    assert_eq!(tree.node_count(), 3);
    assert_eq!(*tree.root().unwrap().data(), "A");
    assert_eq!(edges(&tree), vec![("A", "B"), ("B", "C")]);
}

#[test]
fn input_order_does_not_change_the_structure() {
    let forward: [Item; 4] = [("", "A"), ("1", "B"), ("1.1", "C"), ("2", "D")];
    let backward: [Item; 4] = [("2", "D"), ("1.1", "C"), ("1", "B"), ("", "A")];

    let first = builder().build(forward).unwrap();
    let second = builder().build(backward).unwrap();

    assert_eq!(edges(&first), edges(&second));
    assert_eq!(*first.root().unwrap().data(), *second.root().unwrap().data());
}

#[test]
fn missing_ancestors_reparent_to_nearest_present_one() {
    // "1" and "1.2" never appear; "1.2.3" attaches directly to the root.
    let items: [Item; 2] = [("", "A"), ("1.2.3", "Z")];
    let tree = builder().build(items).unwrap();

    assert!(tree.is_valid());
    assert_eq!(tree.node_count(), 2);
    assert_eq!(edges(&tree), vec![("A", "Z")]);
}

#[test]
fn gap_of_one_level_is_bridged() {
    let items: [Item; 4] = [("", "A"), ("1.1", "X"), ("1.2", "Y"), ("2", "B")];
    let tree = builder().build(items).unwrap();

    // Both grandchildren share the same synthesized gap, so they stay
    // siblings once re-parented to the root.
    assert_eq!(edges(&tree), vec![("A", "B"), ("A", "X"), ("A", "Y")]);
}

#[test]
fn missing_root_fails_the_build() {
    let items: [Item; 2] = [("1", "B"), ("1.1", "C")];
    let error = builder().build(items).unwrap_err();

    assert!(matches!(error.kind(), BuildErrorKind::InvalidInputData(_)));
    assert_eq!(error.context().get("nodes"), Some("2"));
}

#[test]
fn process_input_tolerates_a_missing_root() {
    let items: [Item; 2] = [("1", "B"), ("1.1", "C")];
    let outcome = builder().process_input(items).unwrap();

    assert!(!outcome.has_root());
    assert!(outcome.root().is_none());
    // The shadow root exists (synthesized as a bridge) but holds no data.
    let shadow_root = outcome.shadow_root().unwrap();
    assert!(!outcome.shadow().node(shadow_root).is_filled());
    assert_eq!(outcome.shadow().bridge_count(), 1);
    // Real nodes exist and the fragment below the gap is wired up.
    let tree = outcome.tree();
    assert_eq!(tree.node_count(), 2);
    assert_eq!(tree[1].parent(), Some(0));
}

#[test]
fn empty_input_yields_no_shadow_root() {
    let items: [Item; 0] = [];
    let outcome = builder().process_input(items).unwrap();

    assert!(outcome.shadow_root().is_none());
    assert_eq!(outcome.tree().node_count(), 0);

    let empty: [Item; 0] = [];
    let error = builder().build(empty).unwrap_err();
    assert!(matches!(error.kind(), BuildErrorKind::InvalidInputData(_)));
}

#[test]
fn duplicate_vector_is_fatal() {
    let items: [Item; 3] = [("", "A"), ("1", "B"), ("1", "B again")];
    let error = builder().build(items).unwrap_err();

    assert!(matches!(error.kind(), BuildErrorKind::InvalidInputData(_)));
    assert_eq!(error.context().get("vector"), Some("1"));
    assert_eq!(error.context().get("index"), Some("2"));
}

#[test]
fn duplicate_root_vector_is_fatal() {
    let items: [Item; 2] = [("", "A"), ("", "A again")];
    let error = builder().build(items).unwrap_err();

    assert!(matches!(error.kind(), BuildErrorKind::InvalidInputData(_)));
    assert_eq!(error.context().get("vector"), Some("(root)"));
}

#[test]
fn late_arriving_parent_fills_its_bridge() {
    // "1" is first seen as a bridge under "1.1"; the real item then fills it.
    let items: [Item; 3] = [("1.1", "C"), ("1", "B"), ("", "A")];
    let outcome = builder().process_input(items).unwrap();

    assert_eq!(outcome.shadow().bridge_count(), 0);
    assert_eq!(outcome.shadow().node_count(), 3);
    assert!(outcome.has_root());
}

#[test]
fn quick_delimited_api() {
    let items: [Item; 4] = [("2", "D"), ("", "A"), ("1.1", "C"), ("1", "B")];
    let tree = build_delimited(
        items,
        '.',
        |item: &Item, _| item.0.to_string(),
        |item: &Item, _| item.1,
    )
    .unwrap();

    assert!(tree.is_valid());
    assert_eq!(edges(&tree), vec![("A", "B"), ("A", "D"), ("B", "C")]);
}

#[test]
fn quick_fixed_api() {
    let items: [Item; 4] = [("007007", "C"), ("", "A"), ("007", "B"), ("042", "D")];
    let tree = build_fixed(
        items,
        3,
        |item: &Item, _| item.0.to_string(),
        |item: &Item, _| item.1,
    )
    .unwrap();

    assert!(tree.is_valid());
    assert_eq!(edges(&tree), vec![("A", "B"), ("A", "D"), ("B", "C")]);
}

#[test]
fn fixed_width_rejects_ragged_paths() {
    let items: [Item; 2] = [("", "A"), ("0101", "bad")];
    let error = build_fixed(
        items,
        3,
        |item: &Item, _| item.0.to_string(),
        |item: &Item, _| item.1,
    )
    .unwrap_err();

    assert!(matches!(error.kind(), BuildErrorKind::ExtractorReturnValueIssue(_)));
    assert_eq!(error.context().get("index"), Some("1"));
    assert_eq!(error.context().get("path"), Some("0101"));
}

#[test]
fn extractor_sees_item_index_and_data() {
    let items = ["A", "B", "C"];
    let mut seen = Vec::new();
    let mut builder = TreeBuilder::<Tree<String>, _, _>::new(
        |item: &&str, _| item.to_string(),
        |_item: &&str, index, data: &String| {
            seen.push((index, data.clone()));
            // Chain under the root by index: "", "0", "0.1", ...
            Ok((0..index).map(|i| matpath::Segment::from(i as i64)).collect())
        },
    );
    let tree = builder.build(items).unwrap();
    drop(builder);

    assert_eq!(tree.node_count(), 3);
    assert_eq!(seen, vec![(0, "A".into()), (1, "B".into()), (2, "C".into())]);
}

#[test]
fn parse_path_splits_and_handles_root() {
    assert!(parse_path("", '.').is_empty());
    assert_eq!(
        parse_path("a.b", '.'),
        vec![matpath::Segment::from("a"), matpath::Segment::from("b")]
    );
}

proptest! {
    /// The structure only depends on which vectors are present, never on the
    /// order the items arrive in.
    #[test]
    fn structure_is_permutation_invariant(
        items in Just(vec![
            ("", "R"),
            ("1", "A"),
            ("2", "B"),
            ("1.1", "C"),
            ("1.2", "D"),
            ("2.1", "E"),
            ("1.1.1", "F"),
        ])
        .prop_shuffle()
    ) {
        let tree = builder().build(items).unwrap();
        prop_assert!(tree.is_valid());
        prop_assert_eq!(*tree.root().unwrap().data(), "R");
        prop_assert_eq!(
            edges(&tree),
            vec![
                ("A", "C"),
                ("A", "D"),
                ("B", "E"),
                ("C", "F"),
                ("R", "A"),
                ("R", "B"),
            ]
        );
    }

    /// Dropping inner items re-parents their descendants but never loses them.
    #[test]
    fn subsets_keep_every_present_node_reachable(
        items in proptest::sample::subsequence(
            vec![("1", "A"), ("2", "B"), ("1.1", "C"), ("1.2", "D"), ("2.1.1", "E")],
            0..=5,
        )
        .prop_shuffle()
    ) {
        let mut all = items.clone();
        all.push(("", "R"));
        let count = all.len();

        let tree = builder().build(all).unwrap();
        prop_assert!(tree.is_valid());
        prop_assert_eq!(tree.node_count(), count);
        prop_assert_eq!(tree.pre_order_iter().count(), count);
    }
}
