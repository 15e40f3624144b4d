//! Runtime event stream payloads.

use crate::types::MessageId;

/// Events emitted from the single-writer dispatch loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// A confirmed message was scanned for media candidates.
    Scanned {
        /// Scanned message id.
        message: MessageId,
        /// Number of favorites added.
        added: usize,
    },
    /// A locally-optimistic echo was dropped without scanning.
    OptimisticIgnored {
        /// Echoed message id.
        message: MessageId,
    },
}
