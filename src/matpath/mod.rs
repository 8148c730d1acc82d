//! Building trees from flat collections with materialized-path information.
//!
//! Each input item carries a serialized path describing its position in the
//! tree ("1.2.3", "007007", ...). The [TreeBuilder] splits those paths into
//! vectors, assembles the hierarchy in a transient [shadow tree](ShadowTree),
//! then replays the structure onto real nodes. Items may arrive in any order
//! and ancestors may be missing entirely; unfilled shadow nodes bridge such
//! gaps and never appear in the final tree.

/// The materialized-path builder and its outcome type
pub mod builder;
/// Vector extractor factories for delimited and fixed-width paths
pub mod extract;
/// Vector-to-shadow lookup table
pub mod register;
/// Transient shadow tree used during construction
pub mod shadow;

pub use builder::{BuildOutcome, TreeBuilder};
pub use extract::{delimited, fixed};
pub use register::Register;
pub use shadow::{ShadowIndex, ShadowNode, ShadowTree};
