//! Depth-first traversal iterators.
//!
//! Both iterators are explicit-stack (no recursion) and work over any
//! [TreeAccess] implementation. Each visit carries the node's path vector
//! (built from child keys), its sequence number among its siblings, and a
//! global visit counter.
//!
//! The counter exists because collecting a traversal into an associative
//! container keyed by anything less unique would silently collapse entries;
//! it is the default key of the [keyed](PreOrderIter::keyed) adapters.

use crate::model::access::TreeAccess;
use crate::model::segment::PathVector;

// =#========================================================================#=
// VISIT
// =#========================================================================#=
/// One entry yielded by a traversal iterator.
#[derive(Debug)]
pub struct Visit<'a, S: TreeAccess> {
    /// Id of the visited node
    pub id: S::NodeId,
    /// Data of the visited node
    pub data: &'a S::Data,
    /// Path vector of the visited node, built from child keys
    pub vector: PathVector,
    /// Sequence number of the node among its siblings (0 for the start node)
    pub child_seq: usize,
    /// Global visit counter, incremented once per yielded node
    pub counter: usize,
}

// =#========================================================================#=
// PRE-ORDER ITERATOR
// =#========================================================================#=
/// Iterator for pre-order traversal (parents before children).
///
/// Uses a stack-based approach to traverse the tree without recursion.
/// Each node is visited before any of its descendants.
pub struct PreOrderIter<'a, S: TreeAccess> {
    tree: &'a S,
    stack: Vec<(S::NodeId, PathVector, usize)>,
    counter: usize,
}

impl<'a, S: TreeAccess> PreOrderIter<'a, S> {
    /// Creates a pre-order iterator starting at the tree's root.
    /// The iterator is empty when no root is designated.
    pub fn new(tree: &'a S) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root_id() {
            stack.push((root, PathVector::new(), 0));
        }
        PreOrderIter { tree, stack, counter: 0 }
    }

    /// Creates a pre-order iterator over the subtree rooted at `id`.
    pub fn from_node(tree: &'a S, id: S::NodeId) -> Self {
        PreOrderIter { tree, stack: vec![(id, PathVector::new(), 0)], counter: 0 }
    }

    /// Replaces the vector reported for the start node (and therefore the
    /// prefix of every descendant's vector). Useful when iterating a subtree
    /// whose position within a larger tree is known.
    pub fn with_starting_vector(mut self, vector: PathVector) -> Self {
        if let Some(entry) = self.stack.last_mut() {
            entry.1 = vector;
        }
        self
    }

    /// Adapts the traversal into `(key, data)` pairs using a caller-supplied
    /// key function.
    ///
    /// For a collision-free default, key by the visit counter:
    /// `iter.keyed(|visit| visit.counter)`.
    pub fn keyed<K, F>(self, mut key_fn: F) -> impl Iterator<Item = (K, &'a S::Data)>
    where
        F: FnMut(&Visit<'a, S>) -> K,
    {
        self.map(move |visit| {
            let key = key_fn(&visit);
            (key, visit.data)
        })
    }
}

impl<'a, S: TreeAccess> Iterator for PreOrderIter<'a, S> {
    type Item = Visit<'a, S>;

    fn next(&mut self) -> Option<Self::Item> {
        let (id, vector, child_seq) = self.stack.pop()?;

        // Push children in reverse so the first child is processed first.
        let children = self.tree.children_of(id);
        for (seq, (key, child)) in children.iter().enumerate().rev() {
            let mut child_vector = vector.clone();
            child_vector.push(key.clone());
            self.stack.push((*child, child_vector, seq));
        }

        let visit = Visit {
            id,
            data: self.tree.data_of(id),
            vector,
            child_seq,
            counter: self.counter,
        };
        self.counter += 1;
        Some(visit)
    }
}

// =#========================================================================#=
// POST-ORDER ITERATOR
// =#========================================================================#=
/// Iterator for post-order traversal (children before parents).
///
/// Uses a stack-based approach to traverse the tree without recursion.
/// Each node is visited after all of its descendants.
pub struct PostOrderIter<'a, S: TreeAccess> {
    tree: &'a S,
    // (id, vector, child_seq, children_expanded)
    stack: Vec<(S::NodeId, PathVector, usize, bool)>,
    counter: usize,
}

impl<'a, S: TreeAccess> PostOrderIter<'a, S> {
    /// Creates a post-order iterator starting at the tree's root.
    /// The iterator is empty when no root is designated.
    pub fn new(tree: &'a S) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root_id() {
            stack.push((root, PathVector::new(), 0, false));
        }
        PostOrderIter { tree, stack, counter: 0 }
    }

    /// Creates a post-order iterator over the subtree rooted at `id`.
    pub fn from_node(tree: &'a S, id: S::NodeId) -> Self {
        PostOrderIter { tree, stack: vec![(id, PathVector::new(), 0, false)], counter: 0 }
    }

    /// Replaces the vector reported for the start node (and therefore the
    /// prefix of every descendant's vector).
    pub fn with_starting_vector(mut self, vector: PathVector) -> Self {
        if let Some(entry) = self.stack.last_mut() {
            entry.1 = vector;
        }
        self
    }

    /// Adapts the traversal into `(key, data)` pairs using a caller-supplied
    /// key function. See [PreOrderIter::keyed].
    pub fn keyed<K, F>(self, mut key_fn: F) -> impl Iterator<Item = (K, &'a S::Data)>
    where
        F: FnMut(&Visit<'a, S>) -> K,
    {
        self.map(move |visit| {
            let key = key_fn(&visit);
            (key, visit.data)
        })
    }
}

impl<'a, S: TreeAccess> Iterator for PostOrderIter<'a, S> {
    type Item = Visit<'a, S>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((id, vector, child_seq, expanded)) = self.stack.pop() {
            let children = self.tree.children_of(id);

            if expanded || children.is_empty() {
                // Children already yielded, or nothing to expand: yield node.
                let visit = Visit {
                    id,
                    data: self.tree.data_of(id),
                    vector,
                    child_seq,
                    counter: self.counter,
                };
                self.counter += 1;
                return Some(visit);
            }

            // Re-push marked as expanded, then children in reverse.
            self.stack.push((id, vector.clone(), child_seq, true));
            for (seq, (key, child)) in children.iter().enumerate().rev() {
                let mut child_vector = vector.clone();
                child_vector.push(key.clone());
                self.stack.push((*child, child_vector, seq, false));
            }
        }
        None
    }
}
