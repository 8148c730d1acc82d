//! Shadow tree: transient construction-time proxies for real nodes.
//!
//! During a materialized-path build the real nodes cannot be connected yet,
//! because a child may arrive before its parent's item. Shadow nodes stand in
//! for real nodes and accumulate the structural links; unfilled shadow nodes
//! ("bridges") absorb gaps in the ancestor chain. After ingestion the shadow
//! topology is replayed onto the real tree, skipping bridges.

use crate::error::BuildError;
use crate::model::access::MovableTree;

/// Index of a shadow node in a [ShadowTree] arena.
pub type ShadowIndex = usize;

// =#========================================================================#=
// SHADOW NODE
// =#========================================================================#=
/// A transient proxy for at most one real node.
///
/// # Invariants
/// - `real` is set at most once ([fill](ShadowTree::fill) asserts this;
///   the builder checks for collisions before calling)
/// - A node with `real = None` is a bridge: it never materializes in the
///   final tree, its filled descendants re-parent to the nearest filled
///   ancestor
#[derive(Debug, Clone)]
pub struct ShadowNode<Id> {
    /// The real node this shadow stands for, once an item claimed the vector
    real: Option<Id>,
    /// Shadow parent, if linked
    parent: Option<ShadowIndex>,
    /// Shadow children, in linking order
    children: Vec<ShadowIndex>,
}

impl<Id: Copy> ShadowNode<Id> {
    /// Returns the wrapped real node, if filled.
    pub fn real(&self) -> Option<Id> {
        self.real
    }

    /// Returns the shadow parent, if linked.
    pub fn parent(&self) -> Option<ShadowIndex> {
        self.parent
    }

    /// Returns the shadow children in linking order.
    pub fn children(&self) -> &[ShadowIndex] {
        &self.children
    }

    /// Returns `true` if a real node has been assigned.
    pub fn is_filled(&self) -> bool {
        self.real.is_some()
    }
}

// =#========================================================================#=
// SHADOW TREE
// =#========================================================================#=
/// Arena of shadow nodes, local to one build invocation.
#[derive(Debug, Default)]
pub struct ShadowTree<Id> {
    nodes: Vec<ShadowNode<Id>>,
}

impl<Id: Copy> ShadowTree<Id> {
    /// Creates an empty shadow tree.
    pub fn new() -> Self {
        ShadowTree { nodes: Vec::new() }
    }

    /// Adds a shadow node already wrapping a real node.
    pub fn add_filled(&mut self, real: Id) -> ShadowIndex {
        self.add(Some(real))
    }

    /// Adds an unfilled bridging shadow node.
    pub fn add_bridge(&mut self) -> ShadowIndex {
        self.add(None)
    }

    fn add(&mut self, real: Option<Id>) -> ShadowIndex {
        let index = self.nodes.len();
        self.nodes.push(ShadowNode { real, parent: None, children: Vec::new() });
        index
    }

    /// Returns the shadow node at `index`.
    ///
    /// # Panics
    /// Panics if the index is out of bounds.
    pub fn node(&self, index: ShadowIndex) -> &ShadowNode<Id> {
        &self.nodes[index]
    }

    /// Returns the number of shadow nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of unfilled (bridge) nodes.
    pub fn bridge_count(&self) -> usize {
        self.nodes.iter().filter(|node| !node.is_filled()).count()
    }

    /// Assigns the real node to a shadow node.
    ///
    /// # Panics
    /// Panics if the shadow node is already filled; the builder checks
    /// [is_filled](ShadowNode::is_filled) first and reports a duplicate
    /// vector collision instead of calling this.
    pub fn fill(&mut self, index: ShadowIndex, real: Id) {
        let node = &mut self.nodes[index];
        assert!(node.real.is_none(), "shadow node {index} filled twice");
        node.real = Some(real);
    }

    /// Establishes the shadow parent-child relationship in both directions.
    pub fn link(&mut self, parent: ShadowIndex, child: ShadowIndex) {
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
    }

    /// Replays the shadow topology rooted at `root` onto the real tree.
    ///
    /// For every filled shadow node with a filled ancestor, the real
    /// parent/child edge is established; bridges are structurally
    /// transparent, so their filled descendants attach to the nearest filled
    /// ancestor, in shadow-child order. Uses an explicit work stack, so tree
    /// depth cannot exhaust the call stack.
    ///
    /// # Returns
    /// The real node of the shadow root, or `None` when the root vector was
    /// never claimed by real data. In the latter case edges below the
    /// topmost filled nodes are still established, which leaves the
    /// partially assembled fragments inspectable.
    pub fn reconstruct<S>(&self, root: ShadowIndex, tree: &mut S) -> Result<Option<Id>, BuildError>
    where
        S: MovableTree<NodeId = Id>,
    {
        // (shadow index, nearest filled ancestor's real node)
        let mut stack: Vec<(ShadowIndex, Option<Id>)> = vec![(root, None)];
        while let Some((index, ancestor)) = stack.pop() {
            let node = &self.nodes[index];

            if let Some(real) = node.real {
                if let Some(parent_real) = ancestor {
                    tree.set_parent(real, Some(parent_real));
                    tree.add_child(parent_real, real, None)?;
                }
            }

            let nearest = node.real.or(ancestor);
            // Reverse so the first shadow child is attached first.
            for &child in node.children.iter().rev() {
                stack.push((child, nearest));
            }
        }

        Ok(self.nodes[root].real)
    }
}
