//! Mutable collection form and its invariants.

/// Ordered, key-unique favorites collection.
pub mod collection;
