//! Wrapping data with explicit hierarchy into trees.

/// The recursive-data wrapper
pub mod wrapper;

pub use wrapper::TreeWrapper;
