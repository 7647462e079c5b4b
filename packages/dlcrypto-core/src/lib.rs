//! # dlcrypto-core
//!
//! Exactly-sized, zeroizing wrappers around audited cryptographic
//! primitives: AES-256-GCM frames, Ed25519 key pairs and the
//! login/password key derivation pipeline used for TokenD wallets.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       DLCRYPTO CORE MODULES                             │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────┐  ┌──────────────┐   │
//! │  │    AEAD     │  │    Keys     │  │     KDF     │  │   Hashing    │   │
//! │  │             │  │             │  │             │  │              │   │
//! │  │ - Encrypt   │  │ - Random    │  │ - Salt      │  │ - SHA-1/2/3  │   │
//! │  │ - Decrypt   │  │ - From seed │  │ - scrypt    │  │ - Keccak     │   │
//! │  │ - Frame     │  │ - Sign      │  │ - HMAC      │  │ - HMAC       │   │
//! │  └──────┬──────┘  └──────┬──────┘  └──────┬──────┘  └──────┬───────┘   │
//! │         │                │                │                │           │
//! │         └────────────────┴────────────────┴────────────────┘           │
//! │                                   │                                     │
//! │  ┌─────────────┐  ┌─────────────┐ │ ┌─────────────────────────────────┐│
//! │  │   Config    │  │  Encoding   │ │ │         Scoped Buffer           ││
//! │  │             │  │             │ │ │                                 ││
//! │  │ - KdfParams │  │ - Hex       │ └►│ - Zeroed on acquire             ││
//! │  │ - Versions  │  │ - Base64    │   │ - Wiped on every exit path      ││
//! │  │             │  │ - Base64url │   │ - Immutable SecureBytes output  ││
//! │  └─────────────┘  └─────────────┘   └─────────────────────────────────┘│
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Hierarchy
//!
//! - [`error`] - Error types for the entire library
//! - [`buffer`] - Scoped output buffers and [`SecureBytes`]
//! - [`crypto`] - AEAD, key pairs, signatures, KDF, hashing, randomness
//! - [`config`] - KDF parameters and supported versions
//! - [`encoding`] - Hex and base64 helpers
//!
//! ## Quick Start
//!
//! ```
//! use dlcrypto_core::crypto::{self, KeyPair};
//!
//! let key = [0x11u8; crypto::KEY_SIZE];
//! let nonce = crypto::generate_nonce();
//! let frame = crypto::encrypt(b"hello", &key, &nonce).unwrap();
//! assert_eq!(crypto::decrypt(&frame, &key, &nonce).unwrap().as_bytes(), b"hello");
//!
//! let keypair = KeyPair::new_random().unwrap();
//! let signature = crypto::sign(b"hello", &keypair).unwrap();
//! assert!(keypair.public_key().verify(b"hello", &signature));
//! ```
//!
//! ## Logging
//!
//! The crate emits `tracing` events (lengths, versions and cost parameters
//! only) and never installs a subscriber.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod buffer;
pub mod config;
pub mod crypto;
pub mod encoding;
pub mod error;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use buffer::SecureBytes;
pub use config::KdfParams;
pub use crypto::{KeyPair, PublicKey, Signature};
pub use error::{Error, Result};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Returns the version of dlcrypto-core
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Returns build information for debugging
pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: env!("CARGO_PKG_VERSION"),
        target: std::env::consts::OS,
        profile: if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        },
    }
}

/// Build information for debugging
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Crate version
    pub version: &'static str,
    /// Target operating system
    pub target: &'static str,
    /// Build profile (debug/release)
    pub profile: &'static str,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_types_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}

        assert_send_sync::<KeyPair>();
        assert_send_sync::<PublicKey>();
        assert_send_sync::<Signature>();
        assert_send_sync::<SecureBytes>();
        assert_send_sync::<Error>();
    }

    #[test]
    fn test_build_info() {
        let info = build_info();
        assert_eq!(info.version, version());
        assert!(!info.target.is_empty());
    }

    #[test]
    fn test_errors_bubble_up() {
        fn roundtrip() -> Result<()> {
            let key = [0u8; crypto::KEY_SIZE];
            let nonce = [0u8; crypto::NONCE_SIZE];
            crypto::decrypt(&[0u8; 4], &key, &nonce)?;
            Ok(())
        }

        let err = roundtrip().unwrap_err();
        assert_eq!(err.code(), 103);
        assert!(err.is_caller_error());
    }
}
