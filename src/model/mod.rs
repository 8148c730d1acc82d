//! Tree model: the arena-backed node container, capability traits and
//! traversal iterators.

/// Capability traits for tree access and mutation
pub mod access;
/// Data node stored in the arena
pub mod node;
/// Path segments and vectors
pub mod segment;
/// Arena-backed tree structure
pub mod tree;
/// Depth-first traversal iterators
pub mod traversal;

pub use access::{MovableTree, TreeAccess};
pub use node::{Node, NodeIndex};
pub use segment::{PathVector, Segment, format_vector};
pub use traversal::{PostOrderIter, PreOrderIter, Visit};
pub use tree::Tree;
