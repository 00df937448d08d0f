//! Error types for the node facade.

use chainlog_core::{IdentityError, SealError, ValidationError};
use thiserror::Error;

/// Errors surfaced to callers of node operations.
///
/// Authentication and rejection are distinct on purpose: a transport layer
/// maps the former to 401 and the latter to 500-style responses, and the
/// remediation differs (re-sign vs re-submit against the new tail).
#[derive(Debug, Error)]
pub enum NodeError {
    /// The submitted signature did not verify.
    #[error("authentication failed: {0}")]
    Authentication(#[from] IdentityError),

    /// The candidate block did not extend the current tail.
    #[error("append rejected: {0}")]
    Rejected(#[from] ValidationError),

    /// The proof-of-work search was cancelled or exhausted.
    #[error("seal failed: {0}")]
    Seal(#[from] SealError),

    /// A runtime-level failure (blocked task join, executor shutdown).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for node operations.
pub type Result<T> = std::result::Result<T, NodeError>;
