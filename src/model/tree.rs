//! Arena-backed tree of data nodes.
//!
//! This module provides the core container for the crate:
//! - `Tree<T>`: the tree structure using the arena pattern.
//! - [NodeIndex] is used to reference nodes.
//!
//! The mutation surface deliberately mirrors the two independent link
//! directions: `set_parent` touches only the child's back-reference, while
//! `add_child`/`remove_child` touch only the parent's child list. The
//! builders always perform both; `link` is a convenience doing the same.

use crate::error::BuildError;
use crate::model::access::{MovableTree, TreeAccess};
use crate::model::node::{Node, NodeIndex};
use crate::model::segment::Segment;
use crate::model::traversal::{PostOrderIter, PreOrderIter};
use std::fmt;
use std::fmt::Write as _;

// =#========================================================================#=
// TREE
// =#========================================================================#=
/// A tree of data nodes represented using the arena pattern on [Node].
///
/// Nodes are stored in a contiguous vector and referenced by [NodeIndex],
/// which avoids ownership cycles between parents and children and keeps
/// traversal cache-friendly.
///
/// # Structure
/// - All nodes live in the arena, attached or detached
/// - The index of the root is maintained separately (`None` until designated)
/// - Children are keyed by [Segment] and kept in insertion order
/// - Child keys are unique within one parent
///
/// # Construction
/// Trees are usually produced by the builders
/// ([matpath](crate::matpath::TreeBuilder), [simple](crate::simple::TreeWrapper)),
/// but can be assembled by hand: create nodes with [add_node](Tree::add_node),
/// then connect them with [link](Tree::link) and designate a root with
/// [set_root](Tree::set_root). Test validity with [Tree::is_valid].
///
/// # Example
/// ```
/// use matpath::model::{Segment, Tree};
///
/// let mut tree = Tree::new();
/// let root = tree.add_node("root");
/// let child = tree.add_node("child");
/// tree.link(root, child, Some(Segment::from("a"))).unwrap();
/// tree.set_root(Some(root));
///
/// assert!(tree.is_valid());
/// assert_eq!(tree[root].child(&Segment::from("a")), Some(child));
/// ```
#[derive(Debug, Clone)]
pub struct Tree<T> {
    /// Nodes of this tree (arena pattern)
    nodes: Vec<Node<T>>,
    /// Index of the root of this tree, once designated
    root_index: Option<NodeIndex>,
}

// ============================================================================
// New, Getters / Accessors (pub)
// ============================================================================
impl<T> Tree<T> {
    /// Creates a new, empty tree.
    pub fn new() -> Self {
        Tree { nodes: Vec::new(), root_index: None }
    }

    /// Creates a new, empty tree with capacity for `nodes` nodes.
    pub fn with_capacity(nodes: usize) -> Self {
        Tree { nodes: Vec::with_capacity(nodes), root_index: None }
    }

    /// Creates a new detached node holding `data` and returns its index.
    pub fn add_node(&mut self, data: T) -> NodeIndex {
        let index = self.nodes.len();
        self.nodes.push(Node::new(index, data));
        index
    }

    /// Returns a reference to the node at `index`, or `None` if out of bounds.
    pub fn get_node(&self, index: NodeIndex) -> Option<&Node<T>> {
        self.nodes.get(index)
    }

    /// Returns a mutable reference to the node at `index`, or `None` if out
    /// of bounds.
    pub fn get_node_mut(&mut self, index: NodeIndex) -> Option<&mut Node<T>> {
        self.nodes.get_mut(index)
    }

    /// Returns the index of the root node, if designated.
    pub fn root_index(&self) -> Option<NodeIndex> {
        self.root_index
    }

    /// Returns a reference to the root node, if designated.
    pub fn root(&self) -> Option<&Node<T>> {
        self.root_index.map(|index| &self.nodes[index])
    }

    /// Designates (or clears) the root node.
    ///
    /// # Panics
    /// Panics if the index is out of bounds.
    pub fn set_root(&mut self, root: Option<NodeIndex>) {
        if let Some(index) = root {
            assert!(index < self.nodes.len(), "root index out of bounds: {index}");
        }
        self.root_index = root;
    }

    /// Returns the number of nodes in the arena, attached or not.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Walks up the parent chain from `index` and returns the topmost
    /// ancestor. May be `index` itself.
    pub fn root_of(&self, index: NodeIndex) -> NodeIndex {
        let mut current = index;
        while let Some(parent) = self.nodes[current].parent() {
            current = parent;
        }
        current
    }
}

// ============================================================================
// Topology mutation (pub)
// ============================================================================
impl<T> Tree<T> {
    /// Sets the parent back-reference of a node.
    ///
    /// Does NOT alter the child lists of the new or the previous parent.
    ///
    /// # Panics
    /// Panics if an index is out of bounds.
    pub fn set_parent(&mut self, index: NodeIndex, parent: Option<NodeIndex>) {
        if let Some(parent) = parent {
            assert!(parent < self.nodes.len(), "parent index out of bounds: {parent}");
        }
        self.nodes[index].set_parent(parent);
    }

    /// Appends a node to a parent's child list, optionally under an explicit
    /// key, and returns the key the child was stored under.
    ///
    /// With `key = None`, the next free integer key is assigned (one past the
    /// highest integer key in use, or `0`).
    ///
    /// Does NOT set the parent on the child node; see [link](Tree::link).
    ///
    /// # Errors
    /// Fails with [ChildKeyCollision](crate::error::BuildErrorKind::ChildKeyCollision)
    /// when an explicit key is already taken.
    pub fn add_child(
        &mut self,
        parent: NodeIndex,
        child: NodeIndex,
        key: Option<Segment>,
    ) -> Result<Segment, BuildError> {
        assert!(child < self.nodes.len(), "child index out of bounds: {child}");
        let parent_node = &mut self.nodes[parent];
        let key = match key {
            Some(key) => {
                if parent_node.child(&key).is_some() {
                    return Err(BuildError::child_key_collision(format!(
                        "key '{key}' already taken on node {parent}"
                    ))
                    .tag("parent", parent.to_string())
                    .tag("child", child.to_string()));
                }
                key
            }
            None => {
                let next = parent_node
                    .children()
                    .iter()
                    .filter_map(|(k, _)| k.as_int())
                    .max()
                    .map_or(0, |max| max + 1);
                Segment::Int(next)
            }
        };
        parent_node.push_child(key.clone(), child);
        Ok(key)
    }

    /// Connects a child to a parent in both directions: sets the child's
    /// parent and appends the child to the parent's child list.
    ///
    /// # Errors
    /// Same as [add_child](Tree::add_child); on a key collision the child's
    /// parent is left untouched.
    pub fn link(
        &mut self,
        parent: NodeIndex,
        child: NodeIndex,
        key: Option<Segment>,
    ) -> Result<Segment, BuildError> {
        let key = self.add_child(parent, child, key)?;
        self.nodes[child].set_parent(Some(parent));
        Ok(key)
    }

    /// Removes a node from a parent's child list, returning the key it was
    /// stored under, or `None` if it was not a child.
    ///
    /// Does NOT unset the parent of the removed child.
    pub fn remove_child(&mut self, parent: NodeIndex, child: NodeIndex) -> Option<Segment> {
        self.nodes[parent].remove_child_entry(child)
    }

    /// Removes the child stored under `key`, returning its index.
    ///
    /// Does NOT unset the parent of the removed child.
    pub fn remove_child_by_key(&mut self, parent: NodeIndex, key: &Segment) -> Option<NodeIndex> {
        self.nodes[parent].remove_child_by_key(key)
    }

    /// Removes all children of a node.
    ///
    /// Does NOT unset the parent of the removed children.
    pub fn remove_children(&mut self, parent: NodeIndex) {
        self.nodes[parent].clear_children();
    }
}

// ============================================================================
// Validation + traversal (pub)
// ============================================================================
impl<T> Tree<T> {
    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - A root is designated, in bounds, and has no parent set
    /// - All node indices match their arena position
    /// - All child references are in bounds and point back to the parent
    /// - All parent references are in bounds and list the node as a child
    /// - Child keys are unique within each node
    /// - Every node is reachable from the root (no detached fragments)
    ///
    /// # Returns
    /// `true` if the tree is valid, `false` otherwise.
    pub fn is_valid(&self) -> bool {
        let Some(root_index) = self.root_index else {
            return false;
        };
        if root_index >= self.nodes.len() || self.nodes[root_index].parent().is_some() {
            return false;
        }

        for (index, node) in self.nodes.iter().enumerate() {
            if node.index() != index {
                return false;
            }

            // Check children references and key uniqueness
            for (position, (key, child)) in node.children().iter().enumerate() {
                if *child >= self.nodes.len() {
                    return false;
                }
                if self.nodes[*child].parent() != Some(index) {
                    return false;
                }
                if node.children()[..position].iter().any(|(k, _)| k == key) {
                    return false;
                }
            }

            // Check parent references
            if let Some(parent) = node.parent() {
                if parent >= self.nodes.len() {
                    return false;
                }
                if !self.nodes[parent].has_child(index) {
                    return false;
                }
            }
        }

        // Check reachability from the root
        let mut reached = 0usize;
        let mut stack = vec![root_index];
        while let Some(index) = stack.pop() {
            reached += 1;
            for (_, child) in self.nodes[index].children() {
                stack.push(*child);
            }
        }
        reached == self.nodes.len()
    }

    /// Returns an iterator over the tree in pre-order (parents before
    /// children), starting at the root. Empty if no root is designated.
    pub fn pre_order_iter(&self) -> PreOrderIter<'_, Self> {
        PreOrderIter::new(self)
    }

    /// Returns a pre-order iterator over the subtree rooted at `index`.
    pub fn pre_order_at(&self, index: NodeIndex) -> PreOrderIter<'_, Self> {
        PreOrderIter::from_node(self, index)
    }

    /// Returns an iterator over the tree in post-order (children before
    /// parents), starting at the root. Empty if no root is designated.
    pub fn post_order_iter(&self) -> PostOrderIter<'_, Self> {
        PostOrderIter::new(self)
    }

    /// Returns a post-order iterator over the subtree rooted at `index`.
    pub fn post_order_at(&self, index: NodeIndex) -> PostOrderIter<'_, Self> {
        PostOrderIter::from_node(self, index)
    }
}

// ============================================================================
// Rendering (pub)
// ============================================================================
impl<T: fmt::Display> Tree<T> {
    /// Renders a visual representation of the tree.
    ///
    /// # Example output
    /// ```text
    /// [0] A
    ///   ├─ 1: [1] B
    ///   │  └─ 2: [2] C
    ///   └─ x: [3] D
    /// ```
    pub fn render(&self) -> String {
        let mut out = String::new();
        match self.root_index {
            None => out.push_str("(no root set)\n"),
            Some(root) => self.render_node(&mut out, root, None, "", true),
        }
        out
    }

    fn render_node(
        &self,
        out: &mut String,
        index: NodeIndex,
        key: Option<&Segment>,
        prefix: &str,
        is_last: bool,
    ) {
        let connector = if prefix.is_empty() {
            ""
        } else if is_last {
            "└─ "
        } else {
            "├─ "
        };
        let node = &self.nodes[index];
        let _ = match key {
            Some(key) => writeln!(out, "{prefix}{connector}{key}: [{index}] {}", node.data()),
            None => writeln!(out, "{prefix}{connector}[{index}] {}", node.data()),
        };

        let child_prefix = if prefix.is_empty() {
            "  ".to_string()
        } else {
            format!("{prefix}{}  ", if is_last { " " } else { "│" })
        };
        let num_children = node.children().len();
        for (position, (key, child)) in node.children().iter().enumerate() {
            self.render_node(out, *child, Some(key), &child_prefix, position + 1 == num_children);
        }
    }
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Tree::new()
    }
}

impl<T> std::ops::Index<NodeIndex> for Tree<T> {
    type Output = Node<T>;

    fn index(&self, index: NodeIndex) -> &Self::Output {
        &self.nodes[index]
    }
}

impl<T> std::ops::IndexMut<NodeIndex> for Tree<T> {
    fn index_mut(&mut self, index: NodeIndex) -> &mut Self::Output {
        &mut self.nodes[index]
    }
}

// ============================================================================
// Capability trait implementations
// ============================================================================
impl<T> TreeAccess for Tree<T> {
    type Data = T;
    type NodeId = NodeIndex;

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn root_id(&self) -> Option<NodeIndex> {
        self.root_index
    }

    fn data_of(&self, id: NodeIndex) -> &T {
        self.nodes[id].data()
    }

    fn parent_of(&self, id: NodeIndex) -> Option<NodeIndex> {
        self.nodes[id].parent()
    }

    fn children_of(&self, id: NodeIndex) -> &[(Segment, NodeIndex)] {
        self.nodes[id].children()
    }
}

impl<T> MovableTree for Tree<T> {
    fn add_node(&mut self, data: T) -> NodeIndex {
        Tree::add_node(self, data)
    }

    fn set_root(&mut self, root: Option<NodeIndex>) {
        Tree::set_root(self, root)
    }

    fn set_parent(&mut self, id: NodeIndex, parent: Option<NodeIndex>) {
        Tree::set_parent(self, id, parent)
    }

    fn add_child(
        &mut self,
        parent: NodeIndex,
        child: NodeIndex,
        key: Option<Segment>,
    ) -> Result<Segment, BuildError> {
        Tree::add_child(self, parent, child, key)
    }

    fn remove_child(&mut self, parent: NodeIndex, child: NodeIndex) -> Option<Segment> {
        Tree::remove_child(self, parent, child)
    }
}

// ============================================================================
// Serialization (feature "serde")
// ============================================================================
// Serializes the tree as its nested shape from the root:
// `{ "data": …, "children": { "<key>": <node>, … } }`.
// A tree without a designated root serializes as a unit/null value.
#[cfg(feature = "serde")]
mod serde_support {
    use super::{NodeIndex, Tree};
    use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};

    struct NodeSer<'a, T> {
        tree: &'a Tree<T>,
        index: NodeIndex,
    }

    struct ChildrenSer<'a, T> {
        tree: &'a Tree<T>,
        index: NodeIndex,
    }

    impl<'a, T: Serialize> Serialize for NodeSer<'a, T> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut state = serializer.serialize_struct("Node", 2)?;
            state.serialize_field("data", self.tree[self.index].data())?;
            state.serialize_field("children", &ChildrenSer { tree: self.tree, index: self.index })?;
            state.end()
        }
    }

    impl<'a, T: Serialize> Serialize for ChildrenSer<'a, T> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let children = self.tree[self.index].children();
            let mut map = serializer.serialize_map(Some(children.len()))?;
            for (key, child) in children {
                map.serialize_entry(&key.to_string(), &NodeSer { tree: self.tree, index: *child })?;
            }
            map.end()
        }
    }

    impl<T: Serialize> Serialize for Tree<T> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self.root_index {
                Some(root) => NodeSer { tree: self, index: root }.serialize(serializer),
                None => serializer.serialize_unit(),
            }
        }
    }
}
