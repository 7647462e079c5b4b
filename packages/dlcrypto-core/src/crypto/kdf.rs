//! # Key Derivation Functions
//!
//! Turns a user's login and password into wallet keys.
//!
//! ## Derivation Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    PASSWORD → WALLET KEY                                │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  1. CHECK                                                       │   │
//! │  │                                                                 │   │
//! │  │  • version ∈ SUPPORTED_ENCRYPTION_VERSIONS                     │   │
//! │  │  • login, password, master key are valid UTF-8                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │                                ▼                                        │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  2. COMPOSED SALT                                               │   │
//! │  │                                                                 │   │
//! │  │  SHA-256( version (1 byte) || salt || login )                  │   │
//! │  │                                                                 │   │
//! │  │  → 32 bytes, binds the key to the account and the version     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │                                ▼                                        │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  3. STRETCH                                                     │   │
//! │  │                                                                 │   │
//! │  │  scrypt(                                                       │   │
//! │  │    password = password,                                       │   │
//! │  │    salt     = composed salt,                                  │   │
//! │  │    N, r, p,                                                   │   │
//! │  │    len      = key_length                                      │   │
//! │  │  )                                                            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │              ┌─────────────────┴─────────────────┐                     │
//! │              ▼                                   ▼                     │
//! │  ┌───────────────────────────┐   ┌───────────────────────────┐       │
//! │  │  4. HMAC-SHA256(          │   │  4. HMAC-SHA256(          │       │
//! │  │    key = stretched[..32], │   │    key = stretched[..32], │       │
//! │  │    msg = "WALLET_ID"      │   │    msg = "WALLET_KEY"     │       │
//! │  │  )                        │   │  )                        │       │
//! │  │                           │   │                           │       │
//! │  │  → 32-byte wallet id key  │   │  → 32-byte wallet key     │       │
//! │  └───────────────────────────┘   └───────────────────────────┘       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Security Considerations
//!
//! | Aspect | Design Choice |
//! |--------|---------------|
//! | Password hardening | scrypt with caller-tunable cost |
//! | Account binding | login hashed into the salt |
//! | Key separation | HMAC over distinct master key labels |
//! | Versioning | version byte prefixed to the salt |

use crate::buffer::SecureBytes;
use crate::config::{self, KdfParams};
use crate::crypto::hash;
use crate::error::DeriveKeyError;

/// Master key labels
///
/// Keys derived under different labels are cryptographically independent,
/// even when derived from the same login and password.
pub mod master_key {
    /// Label for the key that identifies a wallet
    pub const WALLET_ID: &str = "WALLET_ID";

    /// Label for the key that encrypts a wallet
    pub const WALLET_KEY: &str = "WALLET_KEY";
}

/// Both wallet keys derived from one login / password pair
#[derive(Debug)]
pub struct WalletKeys {
    /// Key derived under [`master_key::WALLET_ID`]
    pub wallet_id: SecureBytes,
    /// Key derived under [`master_key::WALLET_KEY`]
    pub wallet_key: SecureBytes,
}

/// Derive a key for `master_key` from a login and password
///
/// The result is always 32 bytes. `key_length` sets the length of the
/// intermediate scrypt output, of which only the first
/// [`HMAC_KEY_LENGTH`](config::HMAC_KEY_LENGTH) bytes key the HMAC. Any
/// `key_length` of at least 32 therefore gives the same result.
///
/// ## Errors
///
/// - [`DeriveKeyError::UnsupportedEncryptionVersion`] if `encryption_version`
///   is not supported
/// - [`DeriveKeyError::StringEncodingFailed`] if login, password or master
///   key is not UTF-8
/// - [`DeriveKeyError::KeyLengthTooShort`] if `key_length` is below 32
/// - [`DeriveKeyError::Hash`] if scrypt rejects the cost parameters or a
///   primitive fails
///
/// All of these checks run before any expensive work starts.
#[allow(clippy::too_many_arguments)]
pub fn derive_key(
    login: impl AsRef<[u8]>,
    password: impl AsRef<[u8]>,
    salt: &[u8],
    master_key: impl AsRef<[u8]>,
    n: u64,
    r: u32,
    p: u32,
    encryption_version: u32,
    key_length: usize,
) -> Result<SecureBytes, DeriveKeyError> {
    let params = KdfParams {
        n,
        r,
        p,
        key_length,
        encryption_version,
    };
    derive_key_with(login, password, salt, master_key, &params)
}

/// [`derive_key`] with the cost parameters taken from a [`KdfParams`]
pub fn derive_key_with(
    login: impl AsRef<[u8]>,
    password: impl AsRef<[u8]>,
    salt: &[u8],
    master_key: impl AsRef<[u8]>,
    params: &KdfParams,
) -> Result<SecureBytes, DeriveKeyError> {
    check_version(params.encryption_version)?;
    let master_key = utf8(master_key.as_ref())?;

    let stretched = stretch(login.as_ref(), password.as_ref(), salt, params)?;
    Ok(hash::hmac_sha256(hmac_key(&stretched)?, master_key.as_bytes())?)
}

/// Derive both wallet keys with a single scrypt run
///
/// Equivalent to calling [`derive_key_with`] once per label, at half the
/// cost.
pub fn derive_wallet_keys(
    login: impl AsRef<[u8]>,
    password: impl AsRef<[u8]>,
    salt: &[u8],
    params: &KdfParams,
) -> Result<WalletKeys, DeriveKeyError> {
    check_version(params.encryption_version)?;

    let stretched = stretch(login.as_ref(), password.as_ref(), salt, params)?;
    let key = hmac_key(&stretched)?;

    Ok(WalletKeys {
        wallet_id: hash::hmac_sha256(key, master_key::WALLET_ID.as_bytes())?,
        wallet_key: hash::hmac_sha256(key, master_key::WALLET_KEY.as_bytes())?,
    })
}

/// Steps 1 to 3: validate, compose the salt, run scrypt
fn stretch(
    login: &[u8],
    password: &[u8],
    salt: &[u8],
    params: &KdfParams,
) -> Result<SecureBytes, DeriveKeyError> {
    let version = check_version(params.encryption_version)?;
    let login = utf8(login)?;
    let password = utf8(password)?;

    if params.key_length < config::HMAC_KEY_LENGTH {
        return Err(DeriveKeyError::KeyLengthTooShort {
            len: params.key_length,
            min: config::HMAC_KEY_LENGTH,
        });
    }

    tracing::debug!(
        version,
        n = params.n,
        r = params.r,
        p = params.p,
        key_length = params.key_length,
        "Deriving key"
    );

    let composed_salt = compose_salt(version, salt, login.as_bytes());

    Ok(hash::scrypt(
        password.as_bytes(),
        &composed_salt,
        params.n,
        params.r,
        params.p,
        params.key_length,
    )?)
}

/// Step 4 key: the leading bytes of the scrypt output
fn hmac_key(stretched: &[u8]) -> Result<&[u8], DeriveKeyError> {
    stretched
        .get(..config::HMAC_KEY_LENGTH)
        .ok_or(DeriveKeyError::KeyLengthTooShort {
            len: stretched.len(),
            min: config::HMAC_KEY_LENGTH,
        })
}

/// SHA-256( version || salt || login )
fn compose_salt(version: u8, salt: &[u8], login: &[u8]) -> SecureBytes {
    let mut raw = zeroize::Zeroizing::new(Vec::with_capacity(1 + salt.len() + login.len()));
    raw.push(version);
    raw.extend_from_slice(salt);
    raw.extend_from_slice(login);

    hash::sha256(&raw)
}

fn check_version(version: u32) -> Result<u8, DeriveKeyError> {
    if !config::is_supported_version(version) {
        return Err(DeriveKeyError::UnsupportedEncryptionVersion(version));
    }
    u8::try_from(version).map_err(|_| DeriveKeyError::UnsupportedEncryptionVersion(version))
}

fn utf8(bytes: &[u8]) -> Result<&str, DeriveKeyError> {
    std::str::from_utf8(bytes).map_err(|_| DeriveKeyError::StringEncodingFailed)
}

// ============================================================================
// TESTS
// ============================================================================
