//! # Cryptography Module
//!
//! All cryptographic operations offered by dlcrypto-core.
//!
//! ## Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CRYPTOGRAPHIC ARCHITECTURE                           │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │                              caller                                     │
//! │                                │                                        │
//! │         ┌──────────────────────┼──────────────────────┐                 │
//! │         ▼                      ▼                      ▼                 │
//! │  ┌─────────────┐      ┌─────────────────┐     ┌──────────────┐         │
//! │  │    aead     │      │  keys / signing │     │     kdf      │         │
//! │  │ AES-256-GCM │      │     Ed25519     │     │ SHA-256 →    │         │
//! │  │ frame codec │      │  key lifecycle  │     │ scrypt →     │         │
//! │  │             │      │                 │     │ HMAC-SHA256  │         │
//! │  └──────┬──────┘      └────────┬────────┘     └──────┬───────┘         │
//! │         │                      │                     │                  │
//! │         │                      │              ┌──────┴───────┐          │
//! │         │                      │              │     hash     │          │
//! │         │                      │              │   random     │          │
//! │         │                      │              └──────┬───────┘          │
//! │         └──────────────────────┼─────────────────────┘                  │
//! │                                ▼                                        │
//! │                  ┌──────────────────────────┐                           │
//! │                  │   buffer (scoped, wiped) │                           │
//! │                  └──────────────────────────┘                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Algorithm Choices
//!
//! | Algorithm | Purpose | Crate |
//! |-----------|---------|-------|
//! | AES-256-GCM | Authenticated encryption | `aes-gcm` |
//! | Ed25519 | Signatures | `ed25519-dalek` |
//! | scrypt | Password hardening | `scrypt` |
//! | HMAC-SHA256 | Label binding | `hmac`, `sha2` |
//! | SHA-1 / SHA-2 / SHA-3 / Keccak | Digests | `sha1`, `sha2`, `sha3` |
//!
//! ## Security Considerations
//!
//! 1. **Key Zeroization**: Secret keys and intermediate buffers are zeroized when dropped
//! 2. **Constant-Time Operations**: dalek and RustCrypto primitives, `subtle` for comparisons
//! 3. **Secure Random**: `rand::rngs::OsRng` for key generation and nonces
//! 4. **No Key Reuse**: Never encrypt twice under the same key and nonce

pub mod aead;
pub mod hash;
pub mod kdf;
mod gcm;
mod keys;
pub mod random;
mod signing;

pub use aead::{decrypt, encrypt, generate_nonce, KEY_SIZE, NONCE_SIZE, TAG_SIZE};
pub use kdf::{derive_key, derive_key_with, derive_wallet_keys, master_key, WalletKeys};
pub use keys::{KeyPair, PublicKey, PRIVATE_KEY_SIZE, PUBLIC_KEY_SIZE, SEED_SIZE};
pub use random::random_bytes;
pub use signing::{sign, verify, Signature, SIGNATURE_SIZE};
