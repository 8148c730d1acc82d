//! # matpath
//!
//! A toolkit for building trees out of flat or nested data collections.
//!
//! The crate covers two shapes of input:
//! - flat collections where each item carries a materialized path
//!   (`"1.2.3"`, `"007007"`, ...), assembled by
//!   [matpath::TreeBuilder](crate::matpath::TreeBuilder), tolerant of
//!   arbitrary input order and missing ancestors;
//! - already-nested data, wrapped top down by
//!   [simple::TreeWrapper](crate::simple::TreeWrapper).
//!
//! Both produce any tree implementing the
//! [MovableTree](crate::model::MovableTree) capability trait;
//! [Tree](crate::model::Tree) is the arena-backed implementation shipped with
//! the crate, complete with pre-order and post-order iterators.
//!
//! # Example
//! ```
//! use matpath::build_delimited;
//!
//! let items = [
//!     ("1.1", "leaf under B"),
//!     ("", "root A"),
//!     ("1", "inner B"),
//!     ("2", "leaf C"),
//! ];
//! let tree = build_delimited(
//!     items,
//!     '.',
//!     |item: &(&str, &str), _| item.0.to_string(),
//!     |item: &(&str, &str), _| item.1,
//! )
//! .unwrap();
//!
//! assert_eq!(tree.node_count(), 4);
//! let names: Vec<_> = tree.pre_order_iter().map(|visit| *visit.data).collect();
//! assert_eq!(names, ["root A", "inner B", "leaf under B", "leaf C"]);
//! ```

/// Error types for tree construction
pub mod error;
/// Materialized-path building from flat collections
pub mod matpath;
/// Tree model: nodes, capability traits, traversals
pub mod model;
/// Wrapping nested data into trees
pub mod simple;

pub use error::{BuildError, BuildErrorKind, DebugContext, DynError};
pub use model::{MovableTree, Segment, Tree, TreeAccess};

use model::PathVector;

// =#========================================================================#=
// QUICK API
// =#========================================================================#=
/// Builds a [Tree] from a flat collection of items carrying delimited paths.
///
/// Thin shorthand over [matpath::TreeBuilder] with the
/// [delimited](matpath::delimited) extractor; the `path` accessor returns the
/// serialized path of an item (empty string for the root) and `data` produces
/// the node payload.
///
/// # Errors
/// See [matpath::TreeBuilder::build].
pub fn build_delimited<I, T>(
    input: I,
    delimiter: char,
    path: impl FnMut(&I::Item, usize) -> String,
    data: impl FnMut(&I::Item, usize) -> T,
) -> Result<Tree<T>, BuildError>
where
    I: IntoIterator,
{
    matpath::TreeBuilder::<Tree<T>, _, _>::new(data, matpath::delimited(delimiter, path))
        .build(input)
}

/// Builds a [Tree] from a flat collection of items carrying fixed-width
/// paths, split into segments of `width` characters.
///
/// # Panics
/// Panics if `width` is zero.
///
/// # Errors
/// See [matpath::TreeBuilder::build]; additionally, a path whose length is
/// not a multiple of `width` fails extraction.
pub fn build_fixed<I, T>(
    input: I,
    width: usize,
    path: impl FnMut(&I::Item, usize) -> String,
    data: impl FnMut(&I::Item, usize) -> T,
) -> Result<Tree<T>, BuildError>
where
    I: IntoIterator,
{
    matpath::TreeBuilder::<Tree<T>, _, _>::new(data, matpath::fixed(width, path)).build(input)
}

/// Parses a delimited path into a vector, outside of any builder. The empty
/// string maps to the empty (root) vector.
pub fn parse_path(path: &str, delimiter: char) -> PathVector {
    if path.is_empty() {
        return PathVector::new();
    }
    path.split(delimiter).map(Segment::from).collect()
}
