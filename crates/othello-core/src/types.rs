//! Common type aliases used throughout the engine.

/// Search depth.
pub type Depth = u32;

/// Evaluation score from the root player's perspective.
pub type Score = i32;
