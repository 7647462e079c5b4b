//! # AEAD Codec
//!
//! AES-256-GCM encryption over a single self-describing frame.
//!
//! ## Frame Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                              AEAD FRAME                                 │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌───────────────────────────────┬──────────────┬──────────────────┐    │
//! │  │  ciphertext                   │  final       │  tag             │    │
//! │  │  (same length as plaintext)   │  (0 bytes)   │  (16 bytes)      │    │
//! │  └───────────────────────────────┴──────────────┴──────────────────┘    │
//! │                                                                         │
//! │  The nonce is NOT part of the frame. Callers store or derive it        │
//! │  themselves and pass the same value to `decrypt`.                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Encryption Steps
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  encrypt(plaintext, key, nonce)                                        │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  1. Init      key must be 32 bytes, nonce any non-zero length          │
//! │  2. Update    plaintext → ciphertext   (buffer sized to plaintext)     │
//! │  3. Finalize  → 0 bytes for GCM        (still invoked)                 │
//! │  4. Get tag   → 16 bytes                                               │
//! │                                                                         │
//! │  Output: ciphertext || final || tag                                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Decryption reverses this: split off the tag, update with the ciphertext,
//! set the expected tag, then finalize. A tag that does not authenticate is
//! reported as [`DecryptError::VerificationFailed`] and no plaintext is ever
//! returned.
//!
//! ## Security Properties
//!
//! | Property | Guarantee |
//! |----------|-----------|
//! | Confidentiality | Ciphertext reveals only the plaintext length |
//! | Integrity | Any modification of ciphertext or tag is detected |
//! | Hygiene | Working buffers are zeroed on every exit path |

use aes_gcm::aead::consts::U12;
use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::aes::Aes256;
use aes_gcm::{AesGcm, Nonce, Tag};
use rand::rngs::OsRng;
use rand::RngCore;

use crate::buffer::{self, SecureBytes};
use crate::crypto::gcm::ExtendedGcm;
use crate::error::{CipherError, DecryptError, EncryptError};

/// Size of the AES-GCM authentication tag in bytes (128 bits)
pub const TAG_SIZE: usize = 16;

/// Size of the standard AES-GCM nonce in bytes (96 bits)
///
/// Other non-zero lengths are accepted too; their counter block is derived
/// through GHASH.
pub const NONCE_SIZE: usize = 12;

/// Size of the encryption key in bytes (256 bits)
pub const KEY_SIZE: usize = 32;

/// Nothing is authenticated beyond the ciphertext itself.
const NO_ASSOCIATED_DATA: &[u8] = &[];

type Aes256Gcm96 = AesGcm<Aes256, U12>;

/// Generate a random 12-byte nonce
///
/// **Never reuse a nonce with the same key.** Random 96-bit nonces are safe
/// for up to 2^32 messages per key.
pub fn generate_nonce() -> [u8; NONCE_SIZE] {
    let mut nonce = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce);
    nonce
}

/// Encrypt `plaintext` into a `ciphertext || tag` frame
///
/// ## Errors
///
/// - [`CipherError::IvLengthAdjustFailed`] if the nonce is empty
/// - [`CipherError::IvOrKeyInitFailed`] if the key is not 32 bytes
/// - [`EncryptError::FailedToEncrypt`] if any later step fails
///
/// ## Example
///
/// ```
/// use dlcrypto_core::crypto::aead;
///
/// let key = [7u8; aead::KEY_SIZE];
/// let nonce = aead::generate_nonce();
/// let frame = aead::encrypt(b"Hello", &key, &nonce).unwrap();
/// assert_eq!(frame.len(), 5 + aead::TAG_SIZE);
/// ```
pub fn encrypt(plaintext: &[u8], key: &[u8], nonce: &[u8]) -> Result<Vec<u8>, EncryptError> {
    tracing::debug!(len = plaintext.len(), nonce_len = nonce.len(), "Encrypting frame");

    let mut context = EncryptContext::new(Cipher::init(key, nonce)?);

    let ciphertext = context.update(plaintext)?;
    let last = context.finalize()?;
    let tag = context.tag()?;

    let mut frame = Vec::with_capacity(ciphertext.len() + last.len() + tag.len());
    frame.extend_from_slice(&ciphertext);
    frame.extend_from_slice(&last);
    frame.extend_from_slice(&tag);
    Ok(frame)
}

/// Decrypt and authenticate a `ciphertext || tag` frame
///
/// ## Errors
///
/// - [`DecryptError::MalformedFrame`] if the frame is shorter than the tag
/// - [`DecryptError::Cipher`] if the key or nonce is rejected
/// - [`DecryptError::FailedToDecrypt`] if the update step fails
/// - [`DecryptError::VerificationFailed`] if the tag does not authenticate
///   (tampering, wrong key or wrong nonce)
pub fn decrypt(frame: &[u8], key: &[u8], nonce: &[u8]) -> Result<SecureBytes, DecryptError> {
    if frame.len() < TAG_SIZE {
        return Err(DecryptError::MalformedFrame { len: frame.len() });
    }
    let (ciphertext, tag) = frame.split_at(frame.len() - TAG_SIZE);

    tracing::debug!(len = ciphertext.len(), nonce_len = nonce.len(), "Decrypting frame");

    let cipher = Cipher::init(key, nonce)?;

    buffer::produce(ciphertext.len(), |buf, produced| {
        // Update
        buffer::copy_exact(buf, ciphertext, DecryptError::FailedToDecrypt)?;

        // Set the expected tag and finalize
        cipher.open(buf, tag).map_err(|_| {
            tracing::debug!("Frame failed authentication");
            DecryptError::VerificationFailed
        })?;

        *produced = ciphertext.len();
        Ok(())
    })
}

// ============================================================================
// CIPHER CONTEXT
// ============================================================================

/// AES-256-GCM keyed for the nonce it will be used with
enum Cipher<'n> {
    Standard(Box<Aes256Gcm96>, &'n [u8]),
    Extended(Box<ExtendedGcm>, &'n [u8]),
}

impl<'n> Cipher<'n> {
    fn init(key: &[u8], nonce: &'n [u8]) -> Result<Self, CipherError> {
        let key_rejected = CipherError::IvOrKeyInitFailed(key.len());

        match nonce.len() {
            0 => Err(CipherError::IvLengthAdjustFailed(0)),
            NONCE_SIZE => {
                let cipher = Aes256Gcm96::new_from_slice(key).map_err(|_| key_rejected)?;
                Ok(Cipher::Standard(Box::new(cipher), nonce))
            }
            _ => {
                let cipher = ExtendedGcm::new_from_slice(key).map_err(|_| key_rejected)?;
                Ok(Cipher::Extended(Box::new(cipher), nonce))
            }
        }
    }

    /// Encrypt `buf` in place, returning the detached tag
    fn seal(&self, buf: &mut [u8]) -> Result<Tag, aes_gcm::Error> {
        match self {
            Cipher::Standard(cipher, nonce) => cipher.encrypt_in_place_detached(
                Nonce::<U12>::from_slice(nonce),
                NO_ASSOCIATED_DATA,
                buf,
            ),
            Cipher::Extended(cipher, nonce) => cipher.encrypt_in_place_detached(nonce, buf),
        }
    }

    /// Verify `tag` and decrypt `buf` in place
    fn open(&self, buf: &mut [u8], tag: &[u8]) -> Result<(), aes_gcm::Error> {
        match self {
            Cipher::Standard(cipher, nonce) => {
                let tag: &Tag = GenericArray::from_slice(tag);
                cipher.decrypt_in_place_detached(
                    Nonce::<U12>::from_slice(nonce),
                    NO_ASSOCIATED_DATA,
                    buf,
                    tag,
                )
            }
            Cipher::Extended(cipher, nonce) => cipher.decrypt_in_place_detached(nonce, buf, tag),
        }
    }
}

/// Update / finalize / get-tag sequencing for one encryption
struct EncryptContext<'n> {
    cipher: Cipher<'n>,
    tag: Option<Tag>,
}

impl<'n> EncryptContext<'n> {
    fn new(cipher: Cipher<'n>) -> Self {
        Self { cipher, tag: None }
    }

    fn update(&mut self, plaintext: &[u8]) -> Result<SecureBytes, EncryptError> {
        let cipher = &self.cipher;
        let tag = &mut self.tag;

        buffer::produce(plaintext.len(), |buf, produced| {
            buffer::copy_exact(buf, plaintext, EncryptError::FailedToEncrypt)?;
            *tag = Some(cipher.seal(buf).map_err(|_| EncryptError::FailedToEncrypt)?);
            *produced = plaintext.len();
            Ok(())
        })
    }

    /// GCM has no trailing block, so this only checks sequencing.
    fn finalize(&mut self) -> Result<SecureBytes, EncryptError> {
        let updated = self.tag.is_some();

        buffer::produce(0, |_, produced| {
            if !updated {
                return Err(EncryptError::FailedToEncrypt);
            }
            *produced = 0;
            Ok(())
        })
    }

    fn tag(&self) -> Result<SecureBytes, EncryptError> {
        let tag = self.tag.as_ref().ok_or(EncryptError::FailedToEncrypt)?;

        buffer::produce_fixed(TAG_SIZE, |buf| {
            buffer::copy_exact(buf, tag.as_slice(), EncryptError::FailedToEncrypt)
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
