//! Error types for the Chainlog core.

use thiserror::Error;

/// Errors from the identity subsystem (key handling and signatures).
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Key generation failed (randomness or resource failure).
    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    /// The public key PEM could not be parsed.
    #[error("invalid public key encoding")]
    InvalidKeyEncoding,

    /// The PEM parsed, but the key is not an RSA key.
    #[error("unsupported key type")]
    UnsupportedKeyType,

    /// The signature is not valid base64.
    #[error("invalid signature encoding")]
    InvalidSignatureEncoding,

    /// Decoding succeeded but cryptographic verification failed.
    #[error("signature mismatch")]
    SignatureMismatch,

    /// Signing failed (should not happen with a well-formed key).
    #[error("signing failed: {0}")]
    Signing(String),

    /// Public key export failed.
    #[error("public key export failed: {0}")]
    KeyExport(String),
}

/// Reasons a candidate block fails to extend a chain tail.
///
/// Rejection is a normal, reportable outcome. None of these variants
/// should ever escape as a panic.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Candidate index is not previous index + 1.
    #[error("index mismatch: expected {expected}, got {got}")]
    IndexMismatch { expected: u64, got: u64 },

    /// Candidate previous_hash does not equal the tail's hash.
    #[error("previous hash does not match chain tail")]
    PreviousHashMismatch,

    /// The stored hash does not match the recomputed content hash
    /// (tamper detection).
    #[error("content hash mismatch")]
    ContentHashMismatch,

    /// The hash does not carry the required zero prefix.
    #[error("hash does not meet difficulty {difficulty}")]
    DifficultyNotMet { difficulty: u32 },
}

/// Errors from the proof-of-work search.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SealError {
    /// The search was cancelled via its [`CancelToken`](crate::pow::CancelToken).
    #[error("proof-of-work search cancelled")]
    Cancelled,

    /// The configured proof ceiling was reached without a valid proof.
    #[error("proof-of-work search exhausted at ceiling {ceiling}")]
    Exhausted { ceiling: u64 },
}
