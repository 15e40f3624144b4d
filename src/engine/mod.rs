//! Favorites update engine.

/// Update path and per-message orchestration.
pub mod favorites;
