//! Tests for the pre-order and post-order traversal iterators.

use matpath::model::{PathVector, PreOrderIter, Segment, Tree};
use std::collections::BTreeMap;

/// A ── a ── B ── c ── D
///   └─ b ── C
/// Returns (tree, [a_idx, b_idx, c_idx, d_idx]).
fn sample_tree() -> (Tree<&'static str>, [usize; 4]) {
    let mut tree = Tree::new();
    let a = tree.add_node("A");
    let b = tree.add_node("B");
    let c = tree.add_node("C");
    let d = tree.add_node("D");
    tree.link(a, b, Some(Segment::from("a"))).unwrap();
    tree.link(a, c, Some(Segment::from("b"))).unwrap();
    tree.link(b, d, Some(Segment::from("c"))).unwrap();
    tree.set_root(Some(a));
    assert!(tree.is_valid());
    (tree, [a, b, c, d])
}

#[test]
fn pre_order_visits_parents_first() {
    let (tree, _) = sample_tree();
    let data: Vec<_> = tree.pre_order_iter().map(|visit| *visit.data).collect();
    assert_eq!(data, ["A", "B", "D", "C"]);
}

#[test]
fn post_order_visits_children_first() {
    let (tree, _) = sample_tree();
    let data: Vec<_> = tree.post_order_iter().map(|visit| *visit.data).collect();
    assert_eq!(data, ["D", "B", "C", "A"]);
}

#[test]
fn pre_order_reports_vectors_from_child_keys() {
    let (tree, _) = sample_tree();
    let vectors: Vec<PathVector> = tree.pre_order_iter().map(|visit| visit.vector).collect();
    assert_eq!(
        vectors,
        vec![
            vec![],
            vec![Segment::from("a")],
            vec![Segment::from("a"), Segment::from("c")],
            vec![Segment::from("b")],
        ]
    );
}

#[test]
fn counter_increments_once_per_visit() {
    let (tree, _) = sample_tree();
    for (expected, visit) in tree.post_order_iter().enumerate() {
        assert_eq!(visit.counter, expected);
    }
}

#[test]
fn child_seq_reports_position_among_siblings() {
    let (tree, [a, b, c, d]) = sample_tree();
    let seqs: BTreeMap<usize, usize> = tree
        .pre_order_iter()
        .map(|visit| (visit.id, visit.child_seq))
        .collect();
    assert_eq!(seqs[&a], 0);
    assert_eq!(seqs[&b], 0);
    assert_eq!(seqs[&c], 1);
    assert_eq!(seqs[&d], 0);
}

#[test]
fn subtree_iteration_starts_mid_tree() {
    let (tree, [_, b, _, _]) = sample_tree();
    let data: Vec<_> = tree.pre_order_at(b).map(|visit| *visit.data).collect();
    assert_eq!(data, ["B", "D"]);

    let data: Vec<_> = tree.post_order_at(b).map(|visit| *visit.data).collect();
    assert_eq!(data, ["D", "B"]);
}

#[test]
fn starting_vector_prefixes_subtree_vectors() {
    let (tree, [_, b, _, _]) = sample_tree();
    let vectors: Vec<PathVector> = PreOrderIter::from_node(&tree, b)
        .with_starting_vector(vec![Segment::from("a")])
        .map(|visit| visit.vector)
        .collect();
    assert_eq!(
        vectors,
        vec![
            vec![Segment::from("a")],
            vec![Segment::from("a"), Segment::from("c")],
        ]
    );
}

#[test]
fn keyed_by_counter_never_collides() {
    let (tree, _) = sample_tree();
    let map: BTreeMap<usize, &&str> = tree
        .pre_order_iter()
        .keyed(|visit| visit.counter)
        .collect();
    assert_eq!(map.len(), tree.node_count());
    assert_eq!(*map[&0], "A");
}

#[test]
fn keyed_by_vector_addresses_nodes() {
    let (tree, _) = sample_tree();
    let map: BTreeMap<PathVector, &&str> = tree
        .pre_order_iter()
        .keyed(|visit| visit.vector.clone())
        .collect();
    assert_eq!(**map.get(&PathVector::new()).unwrap(), "A");
    assert_eq!(
        **map
            .get(&vec![Segment::from("a"), Segment::from("c")])
            .unwrap(),
        "D"
    );
}

#[test]
fn iterators_are_empty_without_root() {
    let tree: Tree<i32> = Tree::new();
    assert_eq!(tree.pre_order_iter().count(), 0);
    assert_eq!(tree.post_order_iter().count(), 0);
}

#[test]
fn single_node_tree_yields_one_visit() {
    let mut tree = Tree::new();
    let root = tree.add_node(42);
    tree.set_root(Some(root));

    let visits: Vec<_> = tree.pre_order_iter().collect();
    assert_eq!(visits.len(), 1);
    assert_eq!(visits[0].id, root);
    assert!(visits[0].vector.is_empty());
    assert_eq!(visits[0].child_seq, 0);
    assert_eq!(visits[0].counter, 0);
}

#[test]
fn deep_chain_does_not_overflow() {
    // Depth well beyond what recursive traversal could handle.
    let mut tree = Tree::new();
    let root = tree.add_node(0u32);
    let mut current = root;
    for depth in 1..200_000u32 {
        let next = tree.add_node(depth);
        tree.link(current, next, None).unwrap();
        current = next;
    }
    tree.set_root(Some(root));

    assert_eq!(tree.pre_order_iter().count(), 200_000);
    let last = tree.post_order_iter().next().unwrap();
    assert_eq!(*last.data, 199_999);
}
