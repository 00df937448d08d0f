//! Fire-and-forget block broadcast.
//!
//! One delivery task per peer, each bounded by a per-peer timeout. A slow
//! or dead peer delays or fails only its own delivery; the aggregate
//! report exists for observability and is never an error.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;

use chainlog_core::Block;

use crate::error::PropagationError;
use crate::transport::{PeerAddr, Transport};

/// Default bound on a single peer delivery attempt.
pub const DEFAULT_PEER_TIMEOUT: Duration = Duration::from_secs(5);

/// Outcome of one broadcast, for logging and tests only.
#[derive(Debug, Default)]
pub struct BroadcastReport {
    /// Peers that acknowledged delivery within the timeout.
    pub delivered: Vec<PeerAddr>,
    /// Peers that failed, with the reason.
    pub failed: Vec<(PeerAddr, PropagationError)>,
}

impl BroadcastReport {
    /// Number of peers the block reached.
    pub fn delivered_count(&self) -> usize {
        self.delivered.len()
    }
}

/// Disseminates sealed blocks to known peers.
pub struct Broadcaster<T: Transport> {
    transport: Arc<T>,
    peer_timeout: Duration,
}

impl<T: Transport + 'static> Broadcaster<T> {
    /// Create a broadcaster with the default per-peer timeout.
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            transport,
            peer_timeout: DEFAULT_PEER_TIMEOUT,
        }
    }

    /// Override the per-peer timeout.
    pub fn with_peer_timeout(mut self, timeout: Duration) -> Self {
        self.peer_timeout = timeout;
        self
    }

    /// Deliver `block` to every peer, concurrently.
    ///
    /// Waits for all attempts to settle (each bounded by the per-peer
    /// timeout) and returns the per-peer outcomes. Callers wanting true
    /// fire-and-forget spawn this future and drop the handle.
    pub async fn broadcast(&self, block: &Block, peers: &[PeerAddr]) -> BroadcastReport {
        let mut tasks: JoinSet<(PeerAddr, Result<(), PropagationError>)> = JoinSet::new();

        for peer in peers {
            let transport = Arc::clone(&self.transport);
            let peer = peer.clone();
            let block = block.clone();
            let timeout = self.peer_timeout;

            tasks.spawn(async move {
                let outcome =
                    match tokio::time::timeout(timeout, transport.deliver(&peer, &block)).await {
                        Ok(result) => result,
                        Err(_) => Err(PropagationError::Timeout(peer.clone())),
                    };
                (peer, outcome)
            });
        }

        let mut report = BroadcastReport::default();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((peer, Ok(()))) => report.delivered.push(peer),
                Ok((peer, Err(e))) => {
                    tracing::warn!(peer = %peer, error = %e, "block delivery failed");
                    report.failed.push((peer, e));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "broadcast task panicked");
                }
            }
        }

        tracing::debug!(
            delivered = report.delivered.len(),
            failed = report.failed.len(),
            "broadcast settled"
        );
        report
    }
}
