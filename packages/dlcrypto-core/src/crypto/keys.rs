//! # Key Management
//!
//! Ed25519 key pair construction and the public key value type.
//!
//! ## Key Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          KEY LAYOUT                                     │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Seed (32 bytes)                                                       │
//! │       │                                                                 │
//! │       ▼  Ed25519 key expansion                                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  Private key (64 bytes)                                         │   │
//! │  │  ┌──────────────────────────┬──────────────────────────┐        │   │
//! │  │  │  seed (32 bytes)         │  public key (32 bytes)   │        │   │
//! │  │  └──────────────────────────┴──────────────────────────┘        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  Public key (32 bytes)  shared freely                           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The seed is not stored on its own. [`KeyPair::get_seed`] reads it back
//! out of the private key, so `new_from_seed(get_seed())` rebuilds the
//! identical pair.

use std::fmt;

use ed25519_dalek::{SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::signing::{self, Signature};
use crate::buffer::{self, SecureBytes};
use crate::encoding::{self, serde_hex};
use crate::error::{EncodingError, KeyInitError, SignError};

/// Size of a key seed in bytes
pub const SEED_SIZE: usize = ed25519_dalek::SECRET_KEY_LENGTH;

/// Size of a private key (seed || public key) in bytes
pub const PRIVATE_KEY_SIZE: usize = ed25519_dalek::KEYPAIR_LENGTH;

/// Size of a public key in bytes
pub const PUBLIC_KEY_SIZE: usize = ed25519_dalek::PUBLIC_KEY_LENGTH;

/// Ed25519 signing key pair
///
/// ## Security
///
/// - The private key is zeroized when this struct is dropped
/// - `Debug` never prints private material
/// - The public key is always the one derived from the private key
pub struct KeyPair {
    /// Private signing key (secret). `SigningKey` zeroizes itself.
    secret: SigningKey,
    /// Public key (derived from secret)
    public: PublicKey,
}

impl KeyPair {
    /// Generate a new random key pair
    ///
    /// Uses the operating system's secure random number generator.
    pub fn new_random() -> Result<Self, KeyInitError> {
        tracing::debug!("Generating random key pair");
        Self::assemble(&SigningKey::generate(&mut OsRng))
    }

    /// Create a key pair from a 32-byte seed
    ///
    /// This is deterministic: the same seed always produces the same keys.
    pub fn new_from_seed(seed: &[u8]) -> Result<Self, KeyInitError> {
        let seed: Zeroizing<[u8; SEED_SIZE]> = Zeroizing::new(seed.try_into().map_err(|_| {
            KeyInitError::WrongSeedSize {
                expected: SEED_SIZE,
                actual: seed.len(),
            }
        })?);

        Self::assemble(&SigningKey::from_bytes(&seed))
    }

    /// Produce the private and public keys through scoped buffers, check
    /// their shape and rebuild the signing key from the private bytes.
    fn assemble(signing_key: &SigningKey) -> Result<Self, KeyInitError> {
        let mut public = None;

        let private = buffer::produce(PRIVATE_KEY_SIZE, |private_buf, private_len| {
            let public_bytes = buffer::produce(PUBLIC_KEY_SIZE, |public_buf, public_len| {
                let keypair_bytes = Zeroizing::new(signing_key.to_keypair_bytes());
                buffer::copy_exact(private_buf, keypair_bytes.as_slice(), KeyInitError::InitFailed)?;
                buffer::copy_exact(
                    public_buf,
                    signing_key.verifying_key().as_bytes(),
                    KeyInitError::InitFailed,
                )?;
                *public_len = PUBLIC_KEY_SIZE;
                Ok(())
            })?;

            *private_len = PRIVATE_KEY_SIZE;
            public = Some(public_bytes);
            Ok(())
        })?;

        let public = public.ok_or(KeyInitError::InitFailed)?;
        if private.len() != PRIVATE_KEY_SIZE || public.len() != PUBLIC_KEY_SIZE {
            return Err(KeyInitError::InitFailed);
        }

        let keypair_bytes: Zeroizing<[u8; PRIVATE_KEY_SIZE]> = Zeroizing::new(
            private
                .as_bytes()
                .try_into()
                .map_err(|_| KeyInitError::InitFailed)?,
        );
        // Rejects a private key whose public half does not match its seed
        let secret =
            SigningKey::from_keypair_bytes(&keypair_bytes).map_err(|_| KeyInitError::InitFailed)?;
        let public = PublicKey::from_slice(&public).map_err(|_| KeyInitError::InitFailed)?;

        Ok(Self { secret, public })
    }

    /// Get the 32-byte seed this key pair was built from
    ///
    /// ## Security Warning
    ///
    /// Only use this for secure storage. Never log or transmit these bytes.
    pub fn get_seed(&self) -> SecureBytes {
        let seed = Zeroizing::new(self.secret.to_bytes());
        buffer::produce_safe(SEED_SIZE, |buf| buf.copy_from_slice(seed.as_slice()))
    }

    /// Get the 64-byte private key (seed || public key)
    pub fn private_key(&self) -> SecureBytes {
        let keypair_bytes = Zeroizing::new(self.secret.to_keypair_bytes());
        buffer::produce_safe(PRIVATE_KEY_SIZE, |buf| buf.copy_from_slice(keypair_bytes.as_slice()))
    }

    /// Get the public key
    pub fn public_key(&self) -> PublicKey {
        self.public
    }

    /// Sign `message` with this key pair
    pub fn sign(&self, message: &[u8]) -> Result<Signature, SignError> {
        signing::sign(message, self)
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.secret
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public", &self.public.to_hex())
            .finish_non_exhaustive()
    }
}

/// An Ed25519 public key
///
/// This contains only public information and can be serialized,
/// transmitted, and stored without security concerns.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PublicKey(#[serde(with = "serde_hex")] [u8; PUBLIC_KEY_SIZE]);

impl PublicKey {
    /// Create from raw bytes
    ///
    /// No curve check happens here; an invalid point simply never verifies.
    pub fn from_bytes(bytes: [u8; PUBLIC_KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create from a slice (must be exactly 32 bytes)
    pub fn from_slice(slice: &[u8]) -> Result<Self, EncodingError> {
        let bytes = slice.try_into().map_err(|_| EncodingError::InvalidLength {
            expected: PUBLIC_KEY_SIZE,
            actual: slice.len(),
        })?;
        Ok(Self(bytes))
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_SIZE] {
        &self.0
    }

    /// Get the dalek verifying key, if these bytes are a valid point
    pub fn verifying_key(&self) -> Option<VerifyingKey> {
        VerifyingKey::from_bytes(&self.0).ok()
    }

    /// Verify `signature` over `message` against this key
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        signing::verify(signature.as_bytes(), message, &self.0)
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

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// ============================================================================
// TESTS
// ============================================================================
