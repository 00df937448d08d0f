//! The Node: unified API for one Chainlog participant.
//!
//! Composes the ledger, the identity checks, and peer propagation into
//! the operation set a transport layer exposes: submit a signed event,
//! accept a peer block, snapshot the chain, register peers.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};

use chainlog_core::{
    verify_event, Block, BlockData, CancelToken, Chain, LogPayload, ProofOfWork,
};
use chainlog_propagation::{Broadcaster, PeerAddr, Transport, DEFAULT_PEER_TIMEOUT};

use crate::error::{NodeError, Result};

/// Configuration for a node.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Required zero-prefix length for sealed blocks. Fixed at creation.
    pub difficulty: u32,
    /// Optional bound on the proof-of-work search; `None` is unbounded.
    pub proof_ceiling: Option<u64>,
    /// Per-peer delivery timeout for broadcast.
    pub broadcast_timeout: Duration,
    /// Genesis timestamp shared by cooperating nodes. `None` stamps the
    /// genesis at creation time, which keeps a fresh node incompatible
    /// with peers started at a different instant.
    pub genesis_timestamp: Option<i64>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            difficulty: 4,
            proof_ceiling: None,
            broadcast_timeout: DEFAULT_PEER_TIMEOUT,
            genesis_timestamp: None,
        }
    }
}

/// A signed event as submitted by a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSubmission {
    /// The event text.
    pub event: String,
    /// SPKI PEM public key of the submitter.
    pub public_key: String,
    /// Base64 RSA-PSS signature over the event text.
    pub signature: String,
}

/// The full chain plus its length, as returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainSnapshot {
    /// All committed blocks, genesis first.
    pub chain: Vec<Block>,
    /// Number of blocks, genesis included.
    pub length: usize,
}

/// One Chainlog participant.
///
/// The chain is the single shared mutable resource; it lives behind one
/// mutex, and the lock is held across every validate-append sequence.
/// The proof-of-work search runs outside the lock, so concurrent
/// submissions do not serialize behind it; the final append re-validates
/// against the (possibly advanced) tail and the loser of a race is
/// rejected.
pub struct Node<T: Transport> {
    chain: Mutex<Chain>,
    peers: RwLock<BTreeSet<PeerAddr>>,
    broadcaster: Arc<Broadcaster<T>>,
    config: NodeConfig,
    cancel: CancelToken,
}

impl<T: Transport + 'static> Node<T> {
    /// Create a node over the given transport.
    pub fn new(transport: T, config: NodeConfig) -> Self {
        let chain = match config.genesis_timestamp {
            Some(ts) => Chain::with_genesis_timestamp(config.difficulty, ts),
            None => Chain::new(config.difficulty),
        };
        let broadcaster = Arc::new(
            Broadcaster::new(Arc::new(transport)).with_peer_timeout(config.broadcast_timeout),
        );
        Self {
            chain: Mutex::new(chain),
            peers: RwLock::new(BTreeSet::new()),
            broadcaster,
            config,
            cancel: CancelToken::new(),
        }
    }

    /// Verify, seal, and append a submitted event, then broadcast the
    /// sealed block to registered peers.
    ///
    /// The submitter gets the appended block back; peer delivery is
    /// fire-and-forget and never reflected in this result.
    pub async fn submit_log(&self, submission: LogSubmission) -> Result<Block> {
        verify_event(
            &submission.public_key,
            &submission.event,
            &submission.signature,
        )?;

        let data = BlockData::Log(LogPayload {
            event: submission.event,
            public_key: submission.public_key,
            signature: submission.signature,
        });

        // Tail snapshot under the lock; the expensive search runs outside it.
        let (index, previous_hash) = {
            let chain = self.chain.lock().await;
            let tip = chain.tip();
            (tip.index + 1, tip.hash.clone())
        };

        let mut pow = ProofOfWork::new(self.config.difficulty);
        if let Some(ceiling) = self.config.proof_ceiling {
            pow = pow.with_ceiling(ceiling);
        }
        let cancel = self.cancel.clone();
        let seal_data = data.clone();
        let seal_prev = previous_hash.clone();
        let sealed =
            tokio::task::spawn_blocking(move || pow.seal(index, &seal_data, &seal_prev, &cancel))
                .await
                .map_err(|e| NodeError::Internal(e.to_string()))??;

        let block = Block::new(index, sealed.timestamp, data, previous_hash, sealed.proof);

        {
            let mut chain = self.chain.lock().await;
            // A tail that moved during the search rejects this candidate.
            chain.append(block.clone())?;
        }
        tracing::info!(index = block.index, hash = %block.hash, "appended local block");

        self.broadcast_in_background(block.clone()).await;
        Ok(block)
    }

    /// Accept a block pushed by a peer.
    ///
    /// Applies exactly the same validity rule as the local path; a peer
    /// cannot force acceptance of a block that does not extend this
    /// node's tail. Accepted blocks are not re-broadcast.
    pub async fn receive_block(&self, block: Block) -> Result<()> {
        let index = block.index;
        let hash = block.hash.clone();

        let mut chain = self.chain.lock().await;
        match chain.append(block) {
            Ok(()) => {
                tracing::info!(index, hash = %hash, "accepted peer block");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(index, hash = %hash, error = %e, "rejected peer block");
                Err(NodeError::Rejected(e))
            }
        }
    }

    /// The full ordered chain plus its length.
    pub async fn chain_snapshot(&self) -> ChainSnapshot {
        let chain = self.chain.lock().await;
        ChainSnapshot {
            chain: chain.blocks().to_vec(),
            length: chain.len(),
        }
    }

    /// Merge endpoints into the peer registry (idempotent union) and
    /// return the resulting total set.
    pub async fn register_peers(
        &self,
        new_peers: impl IntoIterator<Item = PeerAddr>,
    ) -> Vec<PeerAddr> {
        let mut peers = self.peers.write().await;
        peers.extend(new_peers);
        peers.iter().cloned().collect()
    }

    /// The currently registered peers.
    pub async fn peers(&self) -> Vec<PeerAddr> {
        self.peers.read().await.iter().cloned().collect()
    }

    /// Cancel any in-flight proof-of-work searches. Used on shutdown.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Push `block` to all registered peers without blocking the caller.
    async fn broadcast_in_background(&self, block: Block) {
        let peers: Vec<PeerAddr> = self.peers.read().await.iter().cloned().collect();
        if peers.is_empty() {
            return;
        }
        let broadcaster = Arc::clone(&self.broadcaster);
        tokio::spawn(async move {
            broadcaster.broadcast(&block, &peers).await;
        });
    }
}
