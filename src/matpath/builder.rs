//! Materialized-path tree builder.

use crate::error::BuildError;
use crate::matpath::register::Register;
use crate::matpath::shadow::{ShadowIndex, ShadowTree};
use crate::model::access::{MovableTree, TreeAccess};
use crate::model::segment::{PathVector, format_vector};
use log::{debug, trace};
use std::marker::PhantomData;

// =#========================================================================#=
// TREE BUILDER
// =#========================================================================#=
/// Builds trees from flat data collections with materialized-path
/// information.
///
/// The builder needs an iterable input collection, a node factory and a
/// vector extractor returning each item's path vector. Input items may
/// arrive in any order: a child arriving before its parent is held together
/// by transient bridge nodes until (and unless) the parent's item shows up.
/// The extractor will typically split a serialized path attribute of the
/// item into a vector; the [fixed](crate::matpath::fixed) and
/// [delimited](crate::matpath::delimited) helpers cover the two common
/// shapes.
///
/// # Example
/// ```
/// use matpath::matpath::{TreeBuilder, delimited};
/// use matpath::model::Tree;
///
/// let items = [("1.1", "C"), ("", "A"), ("1", "B")];
/// let mut builder = TreeBuilder::<Tree<&str>, _, _>::new(
///     |item: &(&'static str, &'static str), _| item.1,
///     delimited('.', |item: &(&'static str, &'static str), _| item.0.to_string()),
/// );
/// let tree = builder.build(items).unwrap();
/// assert_eq!(tree.root().unwrap().data(), &"A");
/// ```
pub struct TreeBuilder<S, F, X> {
    /// Node factory, `fn(&item, input_index) -> data`
    factory: F,
    /// Vector extractor, `fn(&item, input_index, &data) -> Result<PathVector, _>`
    extractor: X,
    _store: PhantomData<fn() -> S>,
}

impl<S, F, X> TreeBuilder<S, F, X>
where
    S: MovableTree + Default,
{
    /// Creates a builder from a node factory and a vector extractor.
    pub fn new(factory: F, extractor: X) -> Self {
        TreeBuilder { factory, extractor, _store: PhantomData }
    }

    /// Consumes an input collection and builds the tree.
    ///
    /// # Errors
    /// - [InvalidInputData]: no item claimed the root (empty) vector, or two
    ///   items claimed the same vector
    /// - [ExtractorReturnValueIssue]: the extractor rejected an item's path
    ///
    /// Errors are tagged with the input index and vector involved.
    ///
    /// [InvalidInputData]: crate::error::BuildErrorKind::InvalidInputData
    /// [ExtractorReturnValueIssue]: crate::error::BuildErrorKind::ExtractorReturnValueIssue
    pub fn build<I>(&mut self, input: I) -> Result<S, BuildError>
    where
        I: IntoIterator,
        F: FnMut(&I::Item, usize) -> S::Data,
        X: FnMut(&I::Item, usize, &S::Data) -> Result<PathVector, BuildError>,
    {
        let outcome = self.process_input(input)?;
        if outcome.root().is_none() {
            return Err(BuildError::invalid_input(
                "no root node found in the input collection",
            )
            .tag("nodes", outcome.tree().node_count().to_string())
            .tag("shadow_nodes", outcome.shadow().node_count().to_string()));
        }
        Ok(outcome.into_tree())
    }

    /// Consumes an input collection and returns a [BuildOutcome], which
    /// exposes both the real root (possibly absent) and the shadow tree.
    ///
    /// Unlike [build](TreeBuilder::build), a missing root is not an error
    /// here; callers wanting to inspect a partially assembled structure can
    /// look at the shadow topology and the real fragments wired up below it.
    ///
    /// # Errors
    /// Same as [build](TreeBuilder::build), except the missing-root case.
    pub fn process_input<I>(&mut self, input: I) -> Result<BuildOutcome<S>, BuildError>
    where
        I: IntoIterator,
        F: FnMut(&I::Item, usize) -> S::Data,
        X: FnMut(&I::Item, usize, &S::Data) -> Result<PathVector, BuildError>,
    {
        let mut tree = S::default();
        let mut shadow = ShadowTree::new();
        let mut register = Register::new();

        for (input_index, item) in input.into_iter().enumerate() {
            let data = (self.factory)(&item, input_index);
            let vector = (self.extractor)(&item, input_index, &data)
                .map_err(|error| error.tag("index", input_index.to_string()))?;

            let node = tree.add_node(data);
            trace!(
                "item {input_index}: node {node:?} at vector {}",
                format_vector(&vector)
            );

            Self::connect(&mut shadow, &mut register, node, vector).map_err(|error| {
                error
                    .tag("index", input_index.to_string())
                    .tag("node", format!("{node:?}"))
            })?;
        }

        // Pull the shadow root and replay the shadow topology onto the
        // real tree. No shadow root means no item was close to the root at
        // all; an unfilled shadow root means the structure exists but the
        // root vector was never claimed by real data.
        let shadow_root = register.pull(&[]);
        let root = match shadow_root {
            Some(index) => shadow.reconstruct(index, &mut tree)?,
            None => None,
        };
        tree.set_root(root);

        debug!(
            "built tree: {} nodes, {} shadow nodes ({} bridges), root {}",
            tree.node_count(),
            shadow.node_count(),
            shadow.bridge_count(),
            root.map_or_else(|| "absent".to_string(), |id| format!("{id:?}")),
        );

        Ok(BuildOutcome { tree, root, shadow, shadow_root })
    }

    /// Connects one freshly created real node into the shadow graph.
    fn connect(
        shadow: &mut ShadowTree<S::NodeId>,
        register: &mut Register,
        real: S::NodeId,
        vector: PathVector,
    ) -> Result<(), BuildError> {
        // The vector is already known: either a descendant synthesized a
        // bridge here (merge into it), or a previous item claimed it (fatal).
        if let Some(existing) = register.pull(&vector) {
            if shadow.node(existing).is_filled() {
                return Err(BuildError::invalid_input(format!(
                    "duplicate node vector: {}",
                    format_vector(&vector)
                ))
                .tag("vector", format_vector(&vector)));
            }
            shadow.fill(existing, real);
            return Ok(());
        }

        // First sight of this vector: register it, then walk the ancestry
        // upward, synthesizing bridges until a registered ancestor absorbs
        // the walk. Terminates at the empty vector at the latest.
        let mut current = shadow.add_filled(real);
        let mut vector = vector;
        register.push(vector.clone(), current);

        while !vector.is_empty() {
            vector.pop();
            if let Some(parent) = register.pull(&vector) {
                shadow.link(parent, current);
                return Ok(());
            }
            let bridge = shadow.add_bridge();
            trace!("bridge at vector {}", format_vector(&vector));
            register.push(vector.clone(), bridge);
            shadow.link(bridge, current);
            current = bridge;
        }
        Ok(())
    }
}

// =#========================================================================#=
// BUILD OUTCOME
// =#========================================================================#=
/// Result of [TreeBuilder::process_input]: the real tree (root possibly
/// absent) together with the shadow tree for failure introspection.
///
/// The shadow structures never outlive the outcome; converting with
/// [into_tree](BuildOutcome::into_tree) discards them.
#[derive(Debug)]
pub struct BuildOutcome<S: TreeAccess> {
    tree: S,
    root: Option<S::NodeId>,
    shadow: ShadowTree<S::NodeId>,
    shadow_root: Option<ShadowIndex>,
}

impl<S: TreeAccess> BuildOutcome<S> {
    /// Returns the tree under construction. Its root is designated only when
    /// [root](BuildOutcome::root) is present.
    pub fn tree(&self) -> &S {
        &self.tree
    }

    /// Consumes the outcome, returning the tree and discarding the shadow
    /// structures.
    pub fn into_tree(self) -> S {
        self.tree
    }

    /// Returns the real root, if the root vector was claimed by real data.
    pub fn root(&self) -> Option<S::NodeId> {
        self.root
    }

    /// Returns `true` when a real root was established.
    pub fn has_root(&self) -> bool {
        self.root.is_some()
    }

    /// Returns the shadow tree built during ingestion.
    pub fn shadow(&self) -> &ShadowTree<S::NodeId> {
        &self.shadow
    }

    /// Returns the shadow root (the shadow node at the empty vector), if any
    /// item's ancestry reached the root at all.
    pub fn shadow_root(&self) -> Option<ShadowIndex> {
        self.shadow_root
    }
}
