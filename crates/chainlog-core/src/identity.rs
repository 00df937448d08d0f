//! Identity: RSA keypairs and event signatures.
//!
//! Every submitted event is attributed to its submitter by an RSA-PSS
//! signature over SHA-256 of the event text. Public keys travel as SPKI
//! PEM blobs, signatures as standard base64.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rsa::pkcs8::der::Document;
use rsa::pkcs8::spki::SubjectPublicKeyInfoRef;
use rsa::pkcs8::{EncodePublicKey, LineEnding};
use rsa::pss::{Signature, SigningKey, VerifyingKey};
use rsa::signature::{RandomizedSigner, SignatureEncoding, Verifier};
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;
use std::fmt;

use crate::error::IdentityError;

/// RSA modulus size for generated identities.
pub const KEY_BITS: usize = 2048;

/// PEM label for an SPKI public key.
const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";

/// An asymmetric signing identity.
///
/// The private key lives only in process memory; nothing here persists it.
#[derive(Clone)]
pub struct Identity {
    private_key: RsaPrivateKey,
    public_key: RsaPublicKey,
}

impl Identity {
    /// Generate a fresh 2048-bit RSA identity.
    ///
    /// Fails only if the underlying RNG or key generation fails.
    pub fn generate() -> Result<Self, IdentityError> {
        let mut rng = rand::thread_rng();
        let private_key = RsaPrivateKey::new(&mut rng, KEY_BITS)
            .map_err(|e| IdentityError::KeyGeneration(e.to_string()))?;
        let public_key = RsaPublicKey::from(&private_key);
        Ok(Self {
            private_key,
            public_key,
        })
    }

    /// Export the public key as SPKI PEM.
    ///
    /// Deterministic for a given key, suitable for transmission and
    /// later re-parsing by [`verify_event`].
    pub fn public_key_pem(&self) -> Result<String, IdentityError> {
        self.public_key
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| IdentityError::KeyExport(e.to_string()))
    }

    /// Sign an event string.
    ///
    /// RSA-PSS over SHA-256 with a randomized salt: two signatures over the
    /// same event differ, but each verifies independently. Returns the
    /// signature as standard base64.
    pub fn sign(&self, event: &str) -> Result<String, IdentityError> {
        let signing_key = SigningKey::<Sha256>::new(self.private_key.clone());
        let signature = signing_key
            .try_sign_with_rng(&mut rand::thread_rng(), event.as_bytes())
            .map_err(|e| IdentityError::Signing(e.to_string()))?;
        Ok(BASE64.encode(signature.to_vec()))
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity(rsa-{})", KEY_BITS)
    }
}

/// Verify an event signature against a PEM-encoded public key.
///
/// Succeeds iff `signature_b64` is a valid RSA-PSS/SHA-256 signature over
/// `event` under the key in `public_key_pem`. Each failure mode is
/// distinguished:
///
/// - [`IdentityError::InvalidKeyEncoding`] — the PEM/SPKI cannot be parsed
/// - [`IdentityError::UnsupportedKeyType`] — parsed, but not an RSA key
/// - [`IdentityError::InvalidSignatureEncoding`] — not valid base64
/// - [`IdentityError::SignatureMismatch`] — cryptographic verification
///   failed, including any byte-level change to the signed text
pub fn verify_event(
    public_key_pem: &str,
    event: &str,
    signature_b64: &str,
) -> Result<(), IdentityError> {
    let public_key = parse_public_key_pem(public_key_pem)?;

    let signature_bytes = BASE64
        .decode(signature_b64)
        .map_err(|_| IdentityError::InvalidSignatureEncoding)?;
    let signature = Signature::try_from(signature_bytes.as_slice())
        .map_err(|_| IdentityError::SignatureMismatch)?;

    let verifying_key = VerifyingKey::<Sha256>::new(public_key);
    verifying_key
        .verify(event.as_bytes(), &signature)
        .map_err(|_| IdentityError::SignatureMismatch)
}

/// Parse an SPKI PEM blob into an RSA public key.
///
/// Distinguishes "unparseable" from "parsed but not RSA" so callers can
/// report the right rejection reason.
fn parse_public_key_pem(pem: &str) -> Result<RsaPublicKey, IdentityError> {
    let (label, document) =
        Document::from_pem(pem).map_err(|_| IdentityError::InvalidKeyEncoding)?;
    if label != PUBLIC_KEY_LABEL {
        return Err(IdentityError::InvalidKeyEncoding);
    }

    let spki = SubjectPublicKeyInfoRef::try_from(document.as_bytes())
        .map_err(|_| IdentityError::InvalidKeyEncoding)?;
    if spki.algorithm.oid != rsa::pkcs1::ALGORITHM_OID {
        return Err(IdentityError::UnsupportedKeyType);
    }

    RsaPublicKey::try_from(spki).map_err(|_| IdentityError::InvalidKeyEncoding)
}
