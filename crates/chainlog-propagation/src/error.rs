//! Error types for peer propagation.

use thiserror::Error;

use crate::transport::PeerAddr;

/// Errors that can occur while delivering a block to a peer.
///
/// These are collected for observability and never escalated to the caller
/// that triggered the broadcast.
#[derive(Debug, Error)]
pub enum PropagationError {
    /// Transport-level delivery failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The peer did not respond within the per-peer timeout.
    #[error("delivery to {0} timed out")]
    Timeout(PeerAddr),

    /// The peer endpoint is not reachable through this transport.
    #[error("peer not found: {0}")]
    PeerNotFound(PeerAddr),

    /// The peer received the block but rejected it.
    #[error("peer {0} rejected the block")]
    Rejected(PeerAddr),
}

/// Result type for propagation operations.
pub type Result<T> = std::result::Result<T, PropagationError>;
