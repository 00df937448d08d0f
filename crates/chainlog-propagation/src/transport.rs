//! Transport abstraction for block delivery.
//!
//! The transport layer handles serialization and delivery of a sealed
//! block to one peer endpoint. Implementations may use HTTP, a message
//! bus, or the in-memory network below for tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use chainlog_core::Block;

use crate::error::{PropagationError, Result};

/// A peer endpoint, e.g. `"127.0.0.1:5001"`.
///
/// Ordered and hashable so peer registries stay deterministic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeerAddr(String);

impl PeerAddr {
    /// Wrap an endpoint string.
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    /// The endpoint string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PeerAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PeerAddr {
    fn from(addr: &str) -> Self {
        Self(addr.to_string())
    }
}

/// Transport trait for pushing a block to one peer.
///
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Deliver `block` to `peer`.
    ///
    /// A returned error means this one delivery failed; it must not affect
    /// deliveries to other peers.
    async fn deliver(&self, peer: &PeerAddr, block: &Block) -> Result<()>;
}

/// A channel-based transport for testing multi-node scenarios in-process.
pub mod memory {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::{mpsc, Mutex, RwLock};

    /// Shared routing table for the in-memory network.
    pub struct MemoryNetwork {
        senders: RwLock<HashMap<PeerAddr, mpsc::Sender<Block>>>,
    }

    impl MemoryNetwork {
        /// Create a new in-memory network.
        pub fn new() -> Arc<Self> {
            Arc::new(Self {
                senders: RwLock::new(HashMap::new()),
            })
        }

        /// Register an endpoint and get its inbound mailbox.
        pub async fn attach(self: &Arc<Self>, addr: PeerAddr) -> Mailbox {
            let (tx, rx) = mpsc::channel(64);
            self.senders.write().await.insert(addr, tx);
            Mailbox {
                receiver: Mutex::new(rx),
            }
        }

        /// Drop an endpoint; subsequent deliveries to it fail.
        pub async fn detach(self: &Arc<Self>, addr: &PeerAddr) {
            self.senders.write().await.remove(addr);
        }

        /// A transport that routes through this network.
        pub fn transport(self: &Arc<Self>) -> MemoryTransport {
            MemoryTransport {
                network: Arc::clone(self),
            }
        }
    }

    /// Inbound queue of blocks pushed to one endpoint.
    pub struct Mailbox {
        receiver: Mutex<mpsc::Receiver<Block>>,
    }

    impl Mailbox {
        /// Wait for the next delivered block.
        pub async fn recv(&self) -> Option<Block> {
            self.receiver.lock().await.recv().await
        }

        /// Take a delivered block if one is already queued.
        pub fn try_recv(&self) -> Option<Block> {
            self.receiver.try_lock().ok()?.try_recv().ok()
        }
    }

    /// In-memory transport implementation.
    pub struct MemoryTransport {
        network: Arc<MemoryNetwork>,
    }

    #[async_trait]
    impl Transport for MemoryTransport {
        async fn deliver(&self, peer: &PeerAddr, block: &Block) -> Result<()> {
            let senders = self.network.senders.read().await;
            let sender = senders
                .get(peer)
                .ok_or_else(|| PropagationError::PeerNotFound(peer.clone()))?;
            sender
                .send(block.clone())
                .await
                .map_err(|_| PropagationError::Transport("peer mailbox closed".into()))
        }
    }
}
