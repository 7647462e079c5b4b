//! # Scoped Buffers
//!
//! Every primitive in this crate writes its output through one of the
//! functions in this module. They are the only place where working memory for
//! key material, ciphertext and digests is handled.
//!
//! ## Lifecycle
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SCOPED BUFFER LIFECYCLE                          │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  1. Acquire    vec![0u8; capacity] wrapped in Zeroizing                │
//! │                          │                                              │
//! │                          ▼                                              │
//! │  2. Fill       fill(&mut buffer, &mut produced_len)  (exactly once)    │
//! │                          │                                              │
//! │               ┌──────────┴──────────┐                                   │
//! │               ▼                     ▼                                   │
//! │  3a. Ok       copy buffer[..len]    3b. Err / panic                     │
//! │               into SecureBytes          propagate                       │
//! │               └──────────┬──────────┘                                   │
//! │                          ▼                                              │
//! │  4. Release    Zeroizing::drop wipes the buffer, then frees it         │
//! │                (runs on every path, including unwinding)               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The value handed back to the caller is a [`SecureBytes`]: it cannot be
//! mutated through its public API and is itself wiped when dropped.

use std::fmt;
use std::ops::Deref;

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Run `fill` against a zeroed buffer of `capacity` bytes and copy out the
/// prefix it reports as produced.
///
/// `fill` receives the buffer and a slot for the produced length. The slot
/// starts at zero. A reported length larger than `capacity` is clamped.
///
/// The working buffer is zeroed and released before this returns, whether
/// `fill` succeeds, fails, or panics.
pub fn produce<E, F>(capacity: usize, fill: F) -> Result<SecureBytes, E>
where
    F: FnOnce(&mut [u8], &mut usize) -> Result<(), E>,
{
    let mut working = Zeroizing::new(vec![0u8; capacity]);
    let mut produced = 0usize;

    fill(working.as_mut_slice(), &mut produced)?;

    if produced > capacity {
        tracing::warn!(capacity, produced, "Produced length exceeds buffer capacity, clamping");
        produced = capacity;
    }

    Ok(SecureBytes::new(&working[..produced]))
}

/// Run `fill` against a zeroed buffer of `capacity` bytes and copy out all
/// of it.
///
/// Used where the primitive always fills its output completely: tags,
/// digests, fixed-size keys.
pub fn produce_fixed<E, F>(capacity: usize, fill: F) -> Result<SecureBytes, E>
where
    F: FnOnce(&mut [u8]) -> Result<(), E>,
{
    let mut working = Zeroizing::new(vec![0u8; capacity]);

    fill(working.as_mut_slice())?;

    Ok(SecureBytes::new(&working))
}

/// Fixed-capacity variant for primitives that cannot fail.
pub fn produce_safe<F>(capacity: usize, fill: F) -> SecureBytes
where
    F: FnOnce(&mut [u8]),
{
    let mut working = Zeroizing::new(vec![0u8; capacity]);

    fill(working.as_mut_slice());

    SecureBytes::new(&working)
}

/// Copy `src` into `dst`, failing with `err` instead of panicking when the
/// lengths differ.
pub(crate) fn copy_exact<E>(dst: &mut [u8], src: &[u8], err: E) -> Result<(), E> {
    if dst.len() != src.len() {
        return Err(err);
    }
    dst.copy_from_slice(src);
    Ok(())
}

// ============================================================================
// SECURE BYTES
// ============================================================================

/// An immutable byte sequence that is wiped when dropped
///
/// ## Security
///
/// - No mutating accessors: once produced, the contents never change
/// - Zeroized on drop
/// - `Debug` prints only the length
/// - Equality is constant-time
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecureBytes(Vec<u8>);

impl SecureBytes {
    /// Copy `bytes` into a new value
    pub fn new(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }

    /// Number of bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no bytes
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Copy the bytes into an ordinary `Vec`
    ///
    /// The copy is not wiped on drop. Only use this for data that is not
    /// secret (ciphertext, digests, public keys).
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.clone()
    }

    /// Encode as lowercase hex
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl Deref for SecureBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for SecureBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl PartialEq for SecureBytes {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_slice().ct_eq(other.0.as_slice()).into()
    }
}

impl Eq for SecureBytes {}

impl fmt::Debug for SecureBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecureBytes([REDACTED; {}])", self.0.len())
    }
}

// ============================================================================
// TESTS
// ============================================================================
