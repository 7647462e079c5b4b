//! # Error Handling
//!
//! Every component reports its own error enum so callers can match on the
//! exact failure kind of the operation they invoked. The crate-level [`Error`]
//! wraps all of them for callers that just want to bubble failures up with `?`.
//!
//! ## Error Hierarchy
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           ERROR HIERARCHY                               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Error (top-level)                                                     │
//! │  │                                                                      │
//! │  ├── EncryptError          - AEAD encryption                           │
//! │  │   ├── Cipher(CipherError)   - context could not be set up           │
//! │  │   └── FailedToEncrypt       - update / finalize / tag step failed   │
//! │  │                                                                      │
//! │  ├── DecryptError          - AEAD decryption                           │
//! │  │   ├── Cipher(CipherError)   - context could not be set up           │
//! │  │   ├── MalformedFrame        - frame shorter than the tag            │
//! │  │   ├── FailedToDecrypt       - update step failed                    │
//! │  │   └── VerificationFailed    - tag did not authenticate              │
//! │  │                                                                      │
//! │  ├── KeyInitError          - key pair construction                     │
//! │  │   ├── WrongSeedSize         - seed is not 32 bytes                  │
//! │  │   └── InitFailed            - primitive produced bad key material   │
//! │  │                                                                      │
//! │  ├── SignError             - detached signing                          │
//! │  ├── HashError             - hash / HMAC / scrypt primitives           │
//! │  ├── DeriveKeyError        - KDF pipeline                              │
//! │  └── EncodingError         - hex / base64 helpers                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Error payloads only ever carry lengths and parameter values. Key bytes,
//! passwords and plaintext never end up in an error.

use thiserror::Error;

/// Result type alias for crate-level operations
pub type Result<T> = std::result::Result<T, Error>;

// ============================================================================
// COMPONENT ERRORS
// ============================================================================

/// The AES-256-GCM context could not be initialized
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherError {
    /// The cipher context could not be allocated
    #[error("Failed to create cipher context")]
    ContextInitFailed,

    /// The provider does not offer AES-256 in GCM mode
    #[error("AES-256-GCM is unavailable")]
    CipherUnavailable,

    /// The nonce length is not accepted by the cipher
    #[error("Nonce length {0} is not supported by AES-256-GCM")]
    IvLengthAdjustFailed(usize),

    /// The key was rejected by the cipher
    #[error("Cipher rejected the key ({0} bytes)")]
    IvOrKeyInitFailed(usize),
}

/// Errors that may occur while encrypting
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncryptError {
    /// Cipher context setup failed
    #[error(transparent)]
    Cipher(#[from] CipherError),

    /// An update, finalize or tag extraction step failed
    #[error("Encryption failed")]
    FailedToEncrypt,
}

/// Errors that may occur while decrypting
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecryptError {
    /// Cipher context setup failed
    #[error(transparent)]
    Cipher(#[from] CipherError),

    /// The frame is too short to contain an authentication tag
    #[error("Malformed frame: {len} bytes is shorter than the authentication tag")]
    MalformedFrame {
        /// Length of the rejected frame
        len: usize,
    },

    /// The decrypt update step failed
    #[error("Decryption failed")]
    FailedToDecrypt,

    /// The authentication tag did not match
    #[error("Decryption failed: authentication tag mismatch")]
    VerificationFailed,
}

/// Errors that may occur while constructing a key pair
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInitError {
    /// The seed does not have the required length
    #[error("Seed must be {expected} bytes, got {actual}")]
    WrongSeedSize {
        /// Required seed length
        expected: usize,
        /// Length that was supplied
        actual: usize,
    },

    /// Key generation failed or produced keys of the wrong shape
    #[error("Failed to initialize key pair")]
    InitFailed,
}

/// Errors that may occur while signing
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignError {
    /// The signing primitive failed
    #[error("Signing failed")]
    SignFailed,
}

/// Errors raised by the hashing primitives
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashError {
    /// scrypt cost parameters were rejected
    #[error("Invalid scrypt parameters (n={n}, r={r}, p={p}, len={len})")]
    InvalidScryptParameters {
        /// CPU/memory cost
        n: u64,
        /// Block size
        r: u32,
        /// Parallelism
        p: u32,
        /// Requested output length
        len: usize,
    },

    /// scrypt failed to produce output
    #[error("scrypt derivation failed")]
    HashFailed,

    /// HMAC rejected its key
    #[error("HMAC-SHA256 failed")]
    HmacFailed,
}

/// Errors that may occur while deriving a key
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeriveKeyError {
    /// The encryption version is not in the supported table
    #[error("Unsupported encryption version: {0}")]
    UnsupportedEncryptionVersion(u32),

    /// Login, password or master key is not valid UTF-8
    #[error("String encoding failed")]
    StringEncodingFailed,

    /// `key_length` is shorter than the HMAC key cut from the scrypt output
    #[error("Key length {len} is below the {min}-byte minimum")]
    KeyLengthTooShort {
        /// Requested scrypt output length
        len: usize,
        /// Bytes the HMAC step consumes
        min: usize,
    },

    /// One of the underlying primitives failed
    #[error(transparent)]
    Hash(#[from] HashError),
}

/// Errors raised by the hex / base64 helpers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// Input is not valid hex
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Input is not valid base64
    #[error("Invalid base64: {0}")]
    InvalidBase64(String),

    /// Decoded value has the wrong length
    #[error("Expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Required length
        expected: usize,
        /// Decoded length
        actual: usize,
    },
}

// ============================================================================
// TOP-LEVEL ERROR
// ============================================================================

/// Main error type for dlcrypto-core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Encryption failed
    #[error(transparent)]
    Encrypt(#[from] EncryptError),

    /// Decryption failed
    #[error(transparent)]
    Decrypt(#[from] DecryptError),

    /// Key pair construction failed
    #[error(transparent)]
    KeyInit(#[from] KeyInitError),

    /// Signing failed
    #[error(transparent)]
    Sign(#[from] SignError),

    /// A hashing primitive failed
    #[error(transparent)]
    Hash(#[from] HashError),

    /// Key derivation failed
    #[error(transparent)]
    DeriveKey(#[from] DeriveKeyError),

    /// Encoding helper failed
    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

impl Error {
    /// Get a stable numeric code for this error
    ///
    /// Codes are organized by category:
    /// - 100-199: Configuration (caller supplied unsupported parameters)
    /// - 200-299: Provider (primitive or environment failure)
    /// - 300-399: Authentication
    /// - 400-499: Encoding
    pub fn code(&self) -> i32 {
        match self {
            // Configuration (100-199)
            Error::DeriveKey(DeriveKeyError::UnsupportedEncryptionVersion(_)) => 100,
            Error::KeyInit(KeyInitError::WrongSeedSize { .. }) => 101,
            Error::Hash(HashError::InvalidScryptParameters { .. })
            | Error::DeriveKey(DeriveKeyError::Hash(HashError::InvalidScryptParameters { .. })) => 102,
            Error::Decrypt(DecryptError::MalformedFrame { .. }) => 103,
            Error::Encrypt(EncryptError::Cipher(CipherError::IvLengthAdjustFailed(_)))
            | Error::Decrypt(DecryptError::Cipher(CipherError::IvLengthAdjustFailed(_))) => 104,
            Error::Encrypt(EncryptError::Cipher(CipherError::IvOrKeyInitFailed(_)))
            | Error::Decrypt(DecryptError::Cipher(CipherError::IvOrKeyInitFailed(_))) => 105,
            Error::DeriveKey(DeriveKeyError::KeyLengthTooShort { .. }) => 106,

            // Provider (200-299)
            Error::Encrypt(EncryptError::Cipher(CipherError::ContextInitFailed))
            | Error::Decrypt(DecryptError::Cipher(CipherError::ContextInitFailed)) => 200,
            Error::Encrypt(EncryptError::Cipher(CipherError::CipherUnavailable))
            | Error::Decrypt(DecryptError::Cipher(CipherError::CipherUnavailable)) => 201,
            Error::Encrypt(EncryptError::FailedToEncrypt) => 202,
            Error::Decrypt(DecryptError::FailedToDecrypt) => 203,
            Error::KeyInit(KeyInitError::InitFailed) => 204,
            Error::Sign(SignError::SignFailed) => 205,
            Error::Hash(HashError::HashFailed)
            | Error::DeriveKey(DeriveKeyError::Hash(HashError::HashFailed)) => 206,
            Error::Hash(HashError::HmacFailed)
            | Error::DeriveKey(DeriveKeyError::Hash(HashError::HmacFailed)) => 207,

            // Authentication (300-399)
            Error::Decrypt(DecryptError::VerificationFailed) => 300,

            // Encoding (400-499)
            Error::DeriveKey(DeriveKeyError::StringEncodingFailed) => 400,
            Error::Encoding(EncodingError::InvalidHex(_)) => 401,
            Error::Encoding(EncodingError::InvalidBase64(_)) => 402,
            Error::Encoding(EncodingError::InvalidLength { .. }) => 403,
        }
    }

    /// Check if this error was caused by caller input
    ///
    /// Configuration and encoding errors can be fixed by the caller.
    /// Provider errors point at the environment or a programming defect,
    /// and none of them are worth retrying.
    pub fn is_caller_error(&self) -> bool {
        matches!(self.code(), 100..=199 | 400..=499)
    }

    /// Check if this is an AEAD authentication failure
    ///
    /// Callers must treat this as "the frame is not authentic" and never
    /// fall back to using any partially decrypted data.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, Error::Decrypt(DecryptError::VerificationFailed))
    }
}

// ============================================================================
// ERROR CONVERSIONS
// ============================================================================

impl From<hex::FromHexError> for EncodingError {
    fn from(err: hex::FromHexError) -> Self {
        EncodingError::InvalidHex(err.to_string())
    }
}

impl From<base64::DecodeError> for EncodingError {
    fn from(err: base64::DecodeError) -> Self {
        EncodingError::InvalidBase64(err.to_string())
    }
}

// ============================================================================
// TESTS
// ============================================================================
