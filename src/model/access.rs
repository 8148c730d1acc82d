//! Capability traits decoupling tree consumers from the concrete arena.
//!
//! Builders and traversal iterators are generic over these traits, so the
//! construction logic can target any tree representation:
//! - [TreeAccess] is the read-only capability set (topology queries).
//! - [MovableTree] adds the mutations needed to create and (re)attach nodes.
//!
//! [Tree](crate::model::tree::Tree) is the built-in implementation.

use crate::error::BuildError;
use crate::model::segment::Segment;
use std::fmt::Debug;

// =#========================================================================#=
// TREE ACCESS (trait)
// =#========================================================================#=
/// Read-only access to a tree's topology and data.
///
/// # Implementing this trait
/// Implementors expose nodes through copyable ids. Children are reported as
/// `(key, id)` pairs in insertion order; keys use the same [Segment] type as
/// path vectors, so traversal vectors are made of child keys.
pub trait TreeAccess {
    /// The data payload stored per node.
    type Data;

    /// The id used to reference nodes.
    ///
    /// Must be `Copy` since builders store and reuse ids freely.
    type NodeId: Copy + Eq + Debug;

    /// Returns the number of nodes held by the tree, attached or not.
    fn node_count(&self) -> usize;

    /// Returns the id of the root node, if a root has been designated.
    fn root_id(&self) -> Option<Self::NodeId>;

    /// Returns a reference to the data of the given node.
    fn data_of(&self, id: Self::NodeId) -> &Self::Data;

    /// Returns the parent of the given node, if attached.
    fn parent_of(&self, id: Self::NodeId) -> Option<Self::NodeId>;

    /// Returns the keyed children of the given node, in insertion order.
    fn children_of(&self, id: Self::NodeId) -> &[(Segment, Self::NodeId)];

    /// Returns `true` if the node has no children.
    fn is_leaf(&self, id: Self::NodeId) -> bool {
        self.children_of(id).is_empty()
    }

    /// Returns `true` if the node has no parent.
    fn is_root(&self, id: Self::NodeId) -> bool {
        self.parent_of(id).is_none()
    }

    /// Walks up the parent chain and returns the topmost ancestor.
    /// May be the node itself.
    fn root_of(&self, id: Self::NodeId) -> Self::NodeId {
        let mut current = id;
        while let Some(parent) = self.parent_of(current) {
            current = parent;
        }
        current
    }
}

// =#========================================================================#=
// MOVABLE TREE (trait)
// =#========================================================================#=
/// Mutating access needed to create nodes and rearrange topology.
///
/// The two link directions are independent on purpose: [`set_parent`] only
/// updates the child's back-reference and [`add_child`] only appends to the
/// parent's child list. Builders call both; callers doing manual surgery are
/// responsible for keeping the directions consistent.
///
/// [`set_parent`]: MovableTree::set_parent
/// [`add_child`]: MovableTree::add_child
pub trait MovableTree: TreeAccess {
    /// Creates a new detached node holding `data`, returning its id.
    fn add_node(&mut self, data: Self::Data) -> Self::NodeId;

    /// Designates (or clears) the root node.
    fn set_root(&mut self, root: Option<Self::NodeId>);

    /// Sets the parent back-reference of a node.
    ///
    /// Does NOT alter any child list.
    fn set_parent(&mut self, id: Self::NodeId, parent: Option<Self::NodeId>);

    /// Appends a node to a parent's child list, optionally under an explicit
    /// key, returning the key the child was stored under.
    ///
    /// With `None`, the implementation assigns the next free integer key.
    /// Fails with [ChildKeyCollision](crate::error::BuildErrorKind::ChildKeyCollision)
    /// when an explicit key is already taken.
    ///
    /// Does NOT set the parent on the child node.
    fn add_child(
        &mut self,
        parent: Self::NodeId,
        child: Self::NodeId,
        key: Option<Segment>,
    ) -> Result<Segment, BuildError>;

    /// Removes a node from a parent's child list, returning the key it was
    /// stored under, or `None` if it was not a child.
    ///
    /// Does NOT unset the parent of the removed child.
    fn remove_child(&mut self, parent: Self::NodeId, child: Self::NodeId) -> Option<Segment>;
}
