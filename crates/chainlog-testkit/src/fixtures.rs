//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::OnceLock;

use chainlog_core::{Block, BlockData, CancelToken, Chain, Identity, LogPayload, ProofOfWork};
use chainlog_node::LogSubmission;

/// A test fixture with a signing identity.
pub struct TestFixture {
    pub identity: Identity,
}

impl TestFixture {
    /// Create a new test fixture with a freshly generated keypair.
    pub fn new() -> Self {
        Self {
            identity: Identity::generate().expect("key generation"),
        }
    }

    /// A process-wide shared fixture.
    ///
    /// RSA key generation is slow; tests that only need some valid identity
    /// should reuse this one instead of generating their own.
    pub fn shared() -> &'static TestFixture {
        static SHARED: OnceLock<TestFixture> = OnceLock::new();
        SHARED.get_or_init(TestFixture::new)
    }

    /// The fixture's public key, SPKI PEM.
    pub fn public_key_pem(&self) -> String {
        self.identity.public_key_pem().expect("key export")
    }

    /// A correctly signed submission for `event`.
    pub fn submission(&self, event: &str) -> LogSubmission {
        LogSubmission {
            event: event.to_string(),
            public_key: self.public_key_pem(),
            signature: self.identity.sign(event).expect("signing"),
        }
    }

    /// A correctly signed block payload for `event`.
    pub fn payload(&self, event: &str) -> BlockData {
        BlockData::Log(LogPayload {
            event: event.to_string(),
            public_key: self.public_key_pem(),
            signature: self.identity.sign(event).expect("signing"),
        })
    }

    /// A chain of signed events sealed at the given difficulty.
    pub fn sealed_chain(&self, difficulty: u32, events: &[&str]) -> Chain {
        let mut chain = Chain::new(difficulty);
        for event in events {
            let block = seal_next(&chain, self.payload(event));
            chain.append(block).expect("sealed successor is valid");
        }
        chain
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Seal a valid successor for the chain's current tip.
pub fn seal_next(chain: &Chain, data: BlockData) -> Block {
    let tip = chain.tip();
    let pow = ProofOfWork::new(chain.difficulty());
    let sealed = pow
        .seal(tip.index + 1, &data, &tip.hash, &CancelToken::new())
        .expect("unbounded search cannot fail");
    Block::new(
        tip.index + 1,
        sealed.timestamp,
        data,
        tip.hash.clone(),
        sealed.proof,
    )
}

/// Create multiple fixtures with distinct identities for multi-party tests.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count).map(|_| TestFixture::new()).collect()
}
