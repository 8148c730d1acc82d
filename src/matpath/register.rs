//! Vector register used during materialized-path construction.

use crate::matpath::shadow::ShadowIndex;
use crate::model::segment::{PathVector, Segment, format_vector};
use std::collections::HashMap;

// =#========================================================================#=
// REGISTER
// =#========================================================================#=
/// Lookup table from path vector to shadow node, scoped to one build.
///
/// Keyed by the typed vector itself: [Segment] derives `Eq + Hash`, so two
/// distinct vectors can never alias the way naively joined strings can
/// (`["1","2"]` vs `["1.2"]`).
///
/// # Invariants
/// - Each vector is registered exactly once, at first sight
/// - Every shadow node created during a build is reachable by its vector
#[derive(Debug, Default)]
pub struct Register {
    map: HashMap<PathVector, ShadowIndex>,
}

impl Register {
    /// Creates an empty register.
    pub fn new() -> Self {
        Register { map: HashMap::new() }
    }

    /// Registers a shadow node under a vector.
    ///
    /// # Panics
    /// Panics if the vector was already registered; callers must `pull`
    /// first and only push unseen vectors.
    pub fn push(&mut self, vector: PathVector, shadow: ShadowIndex) {
        let message = format_vector(&vector);
        let previous = self.map.insert(vector, shadow);
        assert!(previous.is_none(), "vector registered twice: {message}");
    }

    /// Looks up the shadow node registered under a vector, if any.
    pub fn pull(&self, vector: &[Segment]) -> Option<ShadowIndex> {
        self.map.get(vector).copied()
    }

    /// Returns the number of registered vectors.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if nothing has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
