//! # Chainlog Node
//!
//! The unified API for one Chainlog participant: a tamper-evident,
//! append-only ledger of signed security events shared across a small set
//! of cooperating nodes.
//!
//! ## Overview
//!
//! - **Submit**: verify a client's RSA-PSS signature, seal the event into
//!   a proof-of-work block, append it, broadcast it to peers
//! - **Receive**: re-validate and append a block pushed by a peer
//! - **Snapshot**: the full ordered chain plus its length
//! - **Peers**: an idempotent registry of peer endpoints
//!
//! The HTTP layer that exposes these operations is deliberately out of
//! scope; this crate is what such a layer calls into.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chainlog_node::{LogSubmission, Node, NodeConfig};
//! use chainlog_core::Identity;
//! use chainlog_propagation::MemoryNetwork;
//!
//! async fn example() {
//!     let network = MemoryNetwork::new();
//!     let node = Node::new(network.transport(), NodeConfig::default());
//!
//!     let identity = Identity::generate().unwrap();
//!     let event = "SECURITY_ALERT: unauthorized login attempt".to_string();
//!     let submission = LogSubmission {
//!         public_key: identity.public_key_pem().unwrap(),
//!         signature: identity.sign(&event).unwrap(),
//!         event,
//!     };
//!
//!     let block = node.submit_log(submission).await.unwrap();
//!     println!("sealed at index {}", block.index);
//! }
//! ```
//!
//! ## Re-exports
//!
//! Component crates are re-exported for convenience:
//!
//! - `chainlog_node::core` - ledger primitives (Block, Chain, Identity)
//! - `chainlog_node::propagation` - transport seam and broadcast

pub mod error;
pub mod node;

// Re-export component crates
pub use chainlog_core as core;
pub use chainlog_propagation as propagation;

// Re-export main types for convenience
pub use error::{NodeError, Result};
pub use node::{ChainSnapshot, LogSubmission, Node, NodeConfig};

// Re-export commonly used core types
pub use chainlog_core::{Block, BlockData, Chain, Identity, LogPayload};
pub use chainlog_propagation::PeerAddr;
