//! Wrapping nested data in tree nodes.

use crate::error::{BuildError, DynError};
use crate::model::access::MovableTree;
use crate::model::segment::Segment;
use log::trace;
use std::marker::PhantomData;

// =#========================================================================#=
// TREE WRAPPER
// =#========================================================================#=
/// Wraps already-nested data in tree nodes, top down.
///
/// Unlike the [materialized-path builder](crate::matpath::TreeBuilder), the
/// wrapper receives data whose hierarchy is already explicit: each datum can
/// name its children. The node factory creates a node's data from a datum and
/// the children extractor lists the child data, each optionally under an
/// explicit key. Omitted keys fall back to the next integer key of the parent.
///
/// Both callables are fallible; their failures come back as
/// [CallableIssue](crate::error::BuildErrorKind::CallableIssue) errors with
/// the chain of keys leading to the failing datum recorded in the error's
/// trace.
///
/// # Example
/// ```
/// use matpath::model::Tree;
/// use matpath::simple::TreeWrapper;
///
/// // (name, children)
/// #[derive(Clone)]
/// struct Item(&'static str, Vec<Item>);
///
/// let data = Item("A", vec![Item("B", vec![]), Item("C", vec![])]);
/// let mut wrapper = TreeWrapper::<Tree<&str>, _, _>::new(
///     |item: &Item| Ok(item.0),
///     |item: &Item, _: &&str| Ok(Some(item.1.iter().cloned().map(|c| (None, c)).collect())),
/// );
/// let tree = wrapper.wrap(data).unwrap();
/// assert_eq!(tree.root().unwrap().children().len(), 2);
/// ```
pub struct TreeWrapper<S, F, X> {
    /// Node factory, `fn(&datum) -> Result<data, _>`
    factory: F,
    /// Children extractor, `fn(&datum, &data) -> Result<Option<Vec<(key, datum)>>, _>`
    children: X,
    _store: PhantomData<fn() -> S>,
}

impl<S, F, X> TreeWrapper<S, F, X>
where
    S: MovableTree + Default,
{
    /// Creates a wrapper from a node factory and a children extractor.
    pub fn new(factory: F, children: X) -> Self {
        TreeWrapper { factory, children, _store: PhantomData }
    }

    /// Wraps a nested datum and its descendants into a tree.
    ///
    /// Traversal is depth-first with an explicit work stack, so data depth
    /// cannot exhaust the call stack. Parents are wrapped before their
    /// children and siblings are wrapped in extraction order.
    ///
    /// # Errors
    /// - [CallableIssue]: the factory or children extractor failed; the
    ///   underlying error stays reachable through `source`
    /// - [ChildKeyCollision]: the extractor produced an explicit key already
    ///   taken under the same parent
    ///
    /// [CallableIssue]: crate::error::BuildErrorKind::CallableIssue
    /// [ChildKeyCollision]: crate::error::BuildErrorKind::ChildKeyCollision
    pub fn wrap<D>(&mut self, data: D) -> Result<S, BuildError>
    where
        F: FnMut(&D) -> Result<S::Data, DynError>,
        X: FnMut(&D, &S::Data) -> Result<Option<Vec<(Option<Segment>, D)>>, DynError>,
    {
        let mut tree = S::default();
        let mut root = None;
        let mut stack: Vec<Pending<D, S::NodeId>> =
            vec![Pending { data, parent: None, key: None, path: Vec::new() }];

        while let Some(Pending { data, parent, key, path }) = stack.pop() {
            let node_data = (self.factory)(&data)
                .map_err(|source| decorate(BuildError::callable(source), &path))?;
            let node = tree.add_node(node_data);

            match parent {
                Some(parent_id) => {
                    tree.set_parent(node, Some(parent_id));
                    let key = tree
                        .add_child(parent_id, node, key)
                        .map_err(|error| decorate(error, &path))?;
                    trace!("wrapped node {node:?} under {parent_id:?} as {key}");
                }
                None => root = Some(node),
            }

            let children = (self.children)(&data, tree.data_of(node))
                .map_err(|source| decorate(BuildError::callable(source), &path))?;

            // Push in reverse so the first extracted child is wrapped first;
            // integer key fallback then numbers siblings in extraction order.
            if let Some(children) = children {
                for (seq, (key, child_data)) in children.into_iter().enumerate().rev() {
                    let mut child_path = path.clone();
                    child_path.push(match &key {
                        Some(segment) => segment.to_string(),
                        None => format!("#{seq}"),
                    });
                    stack.push(Pending {
                        data: child_data,
                        parent: Some(node),
                        key,
                        path: child_path,
                    });
                }
            }
        }

        tree.set_root(root);
        Ok(tree)
    }
}

/// One datum waiting to be wrapped.
struct Pending<D, Id> {
    data: D,
    parent: Option<Id>,
    key: Option<Segment>,
    /// Display keys leading to this datum, for error traces. Children with
    /// omitted keys appear as `#n` by extraction position.
    path: Vec<String>,
}

/// Records the chain of keys from the failure point up to the root in the
/// error's trace.
fn decorate(mut error: BuildError, path: &[String]) -> BuildError {
    for depth in (0..=path.len()).rev() {
        let entry = if depth == 0 { "(root)".to_string() } else { path[..depth].join(".") };
        error = error.push_trace(entry);
    }
    error
}
