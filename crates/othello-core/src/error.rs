//! Engine error types.

use std::fmt;

/// Errors surfaced by the distribution coordinator.
///
/// In-search errors are impossible by construction (only legality-checked
/// moves are ever searched), so the only failures are on the messaging
/// boundary between the master and its workers.
#[derive(Debug)]
pub enum EngineError {
    /// A worker's command channel or the shared reply channel closed while a
    /// move-generation cycle was still in flight. Fatal to the match.
    WorkerDisconnected,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::WorkerDisconnected => {
                write!(f, "a search worker disconnected mid-cycle")
            }
        }
    }
}

impl std::error::Error for EngineError {}

/// Result alias for coordinator operations.
pub type Result<T> = std::result::Result<T, EngineError>;
