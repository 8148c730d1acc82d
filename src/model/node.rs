//! Node type for the arena-backed tree.

use crate::model::segment::Segment;

/// Index of a node in a [Tree](crate::model::tree::Tree) arena.
pub type NodeIndex = usize;

// =#========================================================================#=
// NODE
// =#========================================================================#=
/// A data node in an arena-backed tree.
///
/// Holds the data payload, a non-owning back-reference to the parent and an
/// ordered list of keyed children. Nodes are stored in a [Tree] arena and
/// referenced by [NodeIndex]; a node never owns other nodes directly.
///
/// # Invariants
/// - `index` is this node's position in the arena
/// - Child keys are unique within one node
/// - `parent` is `None` for the root and for detached nodes
///
/// [Tree]: crate::model::tree::Tree
#[derive(Debug, Clone, PartialEq)]
pub struct Node<T> {
    /// Index of this node in the tree arena
    index: NodeIndex,
    /// Data payload assigned to this node
    data: T,
    /// Index of the parent node, if attached
    parent: Option<NodeIndex>,
    /// Keyed children, in insertion order
    children: Vec<(Segment, NodeIndex)>,
}

impl<T> Node<T> {
    /// Creates a detached node. Used by the tree arena only.
    pub(crate) fn new(index: NodeIndex, data: T) -> Self {
        Node { index, data, parent: None, children: Vec::new() }
    }

    /// Returns the index of this node in the arena.
    pub fn index(&self) -> NodeIndex {
        self.index
    }

    /// Returns a reference to the node's assigned data.
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Returns a mutable reference to the node's assigned data.
    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    /// Assigns new data to the node, returning the previous payload.
    pub fn set_data(&mut self, data: T) -> T {
        std::mem::replace(&mut self.data, data)
    }

    /// Returns the parent index, if any.
    ///
    /// `None` means the node is a root or has not been attached yet.
    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    /// Returns the keyed children in insertion order.
    pub fn children(&self) -> &[(Segment, NodeIndex)] {
        &self.children
    }

    /// Returns the child stored under the given key, if any.
    pub fn child(&self, key: &Segment) -> Option<NodeIndex> {
        self.children
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, index)| *index)
    }

    /// Returns the key a child is stored under, if it is a child of this node.
    pub fn child_key(&self, child: NodeIndex) -> Option<&Segment> {
        self.children
            .iter()
            .find(|(_, index)| *index == child)
            .map(|(key, _)| key)
    }

    /// Discovers whether the given node is one of this node's children.
    pub fn has_child(&self, child: NodeIndex) -> bool {
        self.child_key(child).is_some()
    }

    /// Returns `true` if the node has no children, i.e. it is a leaf node.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns `true` if the node has no parent, i.e. it is a root node.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    // Arena-internal mutators; the public mutation surface lives on `Tree`,
    // which keeps both directions of each link consistent or documents when
    // it does not.

    pub(crate) fn set_parent(&mut self, parent: Option<NodeIndex>) {
        self.parent = parent;
    }

    pub(crate) fn push_child(&mut self, key: Segment, child: NodeIndex) {
        self.children.push((key, child));
    }

    pub(crate) fn remove_child_entry(&mut self, child: NodeIndex) -> Option<Segment> {
        let position = self.children.iter().position(|(_, index)| *index == child)?;
        Some(self.children.remove(position).0)
    }

    pub(crate) fn remove_child_by_key(&mut self, key: &Segment) -> Option<NodeIndex> {
        let position = self.children.iter().position(|(k, _)| k == key)?;
        Some(self.children.remove(position).1)
    }

    pub(crate) fn clear_children(&mut self) {
        self.children.clear();
    }
}
