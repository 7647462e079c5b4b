//! # Digital Signatures Module
//!
//! Detached Ed25519 signatures.
//!
//! ## Signature Flow
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    SIGN / VERIFY                                        │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  sign(message, &KeyPair)                                               │
//! │  ┌──────────────┐     ┌─────────────────────┐     ┌──────────────┐     │
//! │  │   Message    │ ──► │  Ed25519 sign       │ ──► │  Signature   │     │
//! │  │  (any bytes) │     │  (64-byte private)  │     │  (64 bytes)  │     │
//! │  └──────────────┘     └─────────────────────┘     └──────────────┘     │
//! │                                                                         │
//! │  verify(signature, message, public_key) -> bool                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐                  │
//! │  │  Signature   │  │   Message    │  │  Public Key  │                  │
//! │  │  64 bytes    │  │              │  │  32 bytes    │                  │
//! │  └──────┬───────┘  └──────┬───────┘  └──────┬───────┘                  │
//! │         └─────────────────┼─────────────────┘                          │
//! │                           ▼                                             │
//! │               true  = valid                                            │
//! │               false = invalid, OR any input malformed                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Signing is deterministic: the same key and message always produce the
//! same signature.

use ed25519_dalek::{Signature as Ed25519Signature, Signer, VerifyingKey};
use serde::{Deserialize, Serialize};

use super::keys::{KeyPair, PUBLIC_KEY_SIZE};
use crate::buffer;
use crate::encoding::{self, serde_hex};
use crate::error::{EncodingError, SignError};

/// Size of an Ed25519 signature in bytes
pub const SIGNATURE_SIZE: usize = ed25519_dalek::SIGNATURE_LENGTH;

/// An Ed25519 digital signature
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature(#[serde(with = "serde_hex")] [u8; SIGNATURE_SIZE]);

impl Signature {
    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; SIGNATURE_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create from a slice (must be exactly 64 bytes)
    pub fn from_slice(slice: &[u8]) -> Result<Self, EncodingError> {
        let bytes = slice.try_into().map_err(|_| EncodingError::InvalidLength {
            expected: SIGNATURE_SIZE,
            actual: slice.len(),
        })?;
        Ok(Self(bytes))
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_SIZE] {
        &self.0
    }

    /// Encode as hex string
    pub fn to_hex(&self) -> String {
        encoding::to_hex(&self.0)
    }

    /// Decode from hex string
    pub fn from_hex(hex_str: &str) -> Result<Self, EncodingError> {
        encoding::from_hex_array(hex_str).map(Self)
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Sign a message using Ed25519
///
/// ## Example
///
/// ```
/// use dlcrypto_core::crypto::{sign, verify, KeyPair};
///
/// let keypair = KeyPair::new_random().unwrap();
/// let signature = sign(b"Hello, World!", &keypair).unwrap();
/// assert!(verify(signature.as_bytes(), b"Hello, World!", keypair.public_key().as_bytes()));
/// ```
pub fn sign(message: &[u8], keypair: &KeyPair) -> Result<Signature, SignError> {
    tracing::trace!(len = message.len(), "Signing message");

    let produced = buffer::produce_fixed(SIGNATURE_SIZE, |buf| {
        let signature = keypair
            .signing_key()
            .try_sign(message)
            .map_err(|_| SignError::SignFailed)?;
        buffer::copy_exact(buf, &signature.to_bytes(), SignError::SignFailed)
    })?;

    Signature::from_slice(&produced).map_err(|_| SignError::SignFailed)
}

/// Verify a detached Ed25519 signature
///
/// Returns `false` for an invalid signature and for any malformed input:
/// a signature that is not 64 bytes, a public key that is not 32 bytes, or
/// a public key that is not a valid curve point.
pub fn verify(signature: &[u8], message: &[u8], public_key: &[u8]) -> bool {
    let Ok(public_key) = <&[u8; PUBLIC_KEY_SIZE]>::try_from(public_key) else {
        return false;
    };
    let Ok(verifying_key) = VerifyingKey::from_bytes(public_key) else {
        return false;
    };
    let Ok(signature) = Ed25519Signature::from_slice(signature) else {
        return false;
    };

    verifying_key.verify_strict(message, &signature).is_ok()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const MESSAGE: &[u8] = b"TokenD is awesome";
    const EXPECTED_SIGNATURE: &str = "b0b890056ccba3b3188eff742f581ec08f0540706c9aa83b2b669e58f5e488dd892fd543f9c9182f6e6cba013d3953cadd2d9edf2938a45918f063fca01a0b0a";

    fn counting_keypair() -> KeyPair {
        let seed: Vec<u8> = (0u8..32).collect();
        KeyPair::new_from_seed(&seed).unwrap()
    }

    #[test]
    fn test_known_signature() {
        let signature = sign(MESSAGE, &counting_keypair()).unwrap();
        assert_eq!(signature.to_hex(), EXPECTED_SIGNATURE);
    }

    #[test]
    fn test_known_signature_verifies() {
        let keypair = counting_keypair();
        let signature = hex::decode(EXPECTED_SIGNATURE).unwrap();

        assert!(verify(&signature, MESSAGE, keypair.public_key().as_bytes()));
    }

    #[test]
    fn test_sign_verify() {
        let keypair = KeyPair::new_random().unwrap();
        let message = b"Hello, World!";

        let signature = sign(message, &keypair).unwrap();

        assert!(verify(signature.as_bytes(), message, keypair.public_key().as_bytes()));
        assert!(keypair.public_key().verify(message, &signature));
    }

    #[test]
    fn test_verify_wrong_message_fails() {
        let keypair = KeyPair::new_random().unwrap();

        let signature = sign(b"Hello, World!", &keypair).unwrap();

        assert!(!verify(signature.as_bytes(), b"Wrong message!", keypair.public_key().as_bytes()));
    }

    #[test]
    fn test_verify_wrong_key_fails() {
        let keypair1 = KeyPair::new_random().unwrap();
        let keypair2 = KeyPair::new_random().unwrap();
        let message = b"Hello, World!";

        let signature = sign(message, &keypair1).unwrap();

        assert!(!verify(signature.as_bytes(), message, keypair2.public_key().as_bytes()));
    }

    #[test]
    fn test_verify_mutated_signature_fails() {
        let keypair = counting_keypair();
        let public = keypair.public_key();

        for i in [0usize, 31, 32, 63] {
            let mut signature = hex::decode(EXPECTED_SIGNATURE).unwrap();
            signature[i] ^= 0x01;
            assert!(!verify(&signature, MESSAGE, public.as_bytes()));
        }
    }

    #[test]
    fn test_verify_malformed_inputs() {
        let keypair = counting_keypair();
        let public = keypair.public_key();
        let signature = sign(MESSAGE, &keypair).unwrap();

        assert!(!verify(&signature.as_bytes()[..63], MESSAGE, public.as_bytes()));
        assert!(!verify(&[], MESSAGE, public.as_bytes()));
        assert!(!verify(signature.as_bytes(), MESSAGE, &public.as_bytes()[..31]));
        assert!(!verify(signature.as_bytes(), MESSAGE, &[]));
    }

    #[test]
    fn test_deterministic_signatures() {
        let keypair = KeyPair::new_random().unwrap();
        let message = b"Hello, World!";

        let sig1 = sign(message, &keypair).unwrap();
        let sig2 = keypair.sign(message).unwrap();

        // Ed25519 is deterministic
        assert_eq!(sig1, sig2);
    }

    #[test]
    fn test_empty_message() {
        let keypair = KeyPair::new_random().unwrap();
        let signature = sign(b"", &keypair).unwrap();

        assert!(verify(signature.as_bytes(), b"", keypair.public_key().as_bytes()));
    }

    #[test]
    fn test_signature_serialization() {
        let keypair = KeyPair::new_random().unwrap();
        let signature = sign(b"test", &keypair).unwrap();

        let json = serde_json::to_string(&signature).unwrap();
        let restored: Signature = serde_json::from_str(&json).unwrap();

        assert_eq!(signature, restored);
    }

    #[test]
    fn test_signature_hex() {
        let signature = Signature::from_hex(EXPECTED_SIGNATURE).unwrap();
        assert_eq!(signature.to_hex(), EXPECTED_SIGNATURE);

        assert!(Signature::from_slice(&[0u8; 63]).is_err());
    }
}
