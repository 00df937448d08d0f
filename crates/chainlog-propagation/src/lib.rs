//! # Chainlog Propagation
//!
//! Best-effort dissemination of newly sealed blocks to known peers.
//!
//! ## Overview
//!
//! A node that appends a block pushes it to every registered peer. Each
//! peer independently re-validates before accepting, so propagation never
//! needs to be trusted, only attempted:
//!
//! - **Fire-and-forget**: the submitter never waits on peers
//! - **Isolated failures**: one dead peer cannot delay or fail the rest
//! - **Bounded**: every delivery attempt carries a per-peer timeout
//!
//! There is no re-broadcast of accepted peer blocks, no retry, and no
//! fork reconciliation; a rejected block is simply dropped by the peer.
//!
//! ## Message Flow
//!
//! ```text
//! Node A                     Node B                    Node C
//!   |-- seal + append
//!   |-------- Block ---------->|                          |
//!   |-------- Block ------------------------------------->|
//!   |                          |-- validate + append      |-- validate + append
//! ```

pub mod broadcast;
pub mod error;
pub mod transport;

pub use broadcast::{BroadcastReport, Broadcaster, DEFAULT_PEER_TIMEOUT};
pub use error::{PropagationError, Result};
pub use transport::{memory::Mailbox, memory::MemoryNetwork, memory::MemoryTransport, PeerAddr, Transport};
