//! # Configuration
//!
//! Cost parameters for the key derivation pipeline and the immutable tables
//! it checks against.
//!
//! ```
//! use dlcrypto_core::config::KdfParams;
//!
//! let params = KdfParams::default();
//! assert_eq!(params.n, 4096);
//! assert!(params.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{DeriveKeyError, HashError};

/// Encryption versions the KDF pipeline knows how to handle
pub const SUPPORTED_ENCRYPTION_VERSIONS: &[u32] = &[1];

/// Version used when none is configured
pub const DEFAULT_ENCRYPTION_VERSION: u32 = 1;

/// Default scrypt CPU/memory cost
pub const DEFAULT_SCRYPT_N: u64 = 4096;

/// Default scrypt block size
pub const DEFAULT_SCRYPT_R: u32 = 8;

/// Default scrypt parallelism
pub const DEFAULT_SCRYPT_P: u32 = 1;

/// Default stretched key length in bytes
pub const DEFAULT_KEY_LENGTH: usize = 32;

/// Leading bytes of the stretched key that key the HMAC step
///
/// Also the smallest accepted `key_length`. Longer scrypt output is allowed
/// but only this prefix reaches the HMAC.
pub const HMAC_KEY_LENGTH: usize = 32;

/// Check whether `version` is in [`SUPPORTED_ENCRYPTION_VERSIONS`]
pub fn is_supported_version(version: u32) -> bool {
    SUPPORTED_ENCRYPTION_VERSIONS.contains(&version)
}

/// Parameters for [`derive_key_with`](crate::crypto::kdf::derive_key_with)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KdfParams {
    /// scrypt CPU/memory cost, a power of two greater than one
    pub n: u64,
    /// scrypt block size
    pub r: u32,
    /// scrypt parallelism
    pub p: u32,
    /// Length of the scrypt output, at least [`HMAC_KEY_LENGTH`]
    pub key_length: usize,
    /// Salt composition version
    pub encryption_version: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            n: DEFAULT_SCRYPT_N,
            r: DEFAULT_SCRYPT_R,
            p: DEFAULT_SCRYPT_P,
            key_length: DEFAULT_KEY_LENGTH,
            encryption_version: DEFAULT_ENCRYPTION_VERSION,
        }
    }
}

impl KdfParams {
    /// Check the parameters without running the pipeline
    ///
    /// Rejects the same inputs `derive_key` would, in the same order.
    pub fn validate(&self) -> Result<(), DeriveKeyError> {
        if !is_supported_version(self.encryption_version) {
            return Err(DeriveKeyError::UnsupportedEncryptionVersion(self.encryption_version));
        }

        if self.key_length < HMAC_KEY_LENGTH {
            return Err(DeriveKeyError::KeyLengthTooShort {
                len: self.key_length,
                min: HMAC_KEY_LENGTH,
            });
        }

        let shape_ok = self.n > 1 && self.n.is_power_of_two() && self.r > 0 && self.p > 0;
        if !shape_ok {
            return Err(HashError::InvalidScryptParameters {
                n: self.n,
                r: self.r,
                p: self.p,
                len: self.key_length,
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = KdfParams::default();
        assert_eq!(params.n, 4096);
        assert_eq!(params.r, 8);
        assert_eq!(params.p, 1);
        assert_eq!(params.key_length, 32);
        assert_eq!(params.encryption_version, 1);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_supported_versions() {
        assert!(is_supported_version(1));
        assert!(!is_supported_version(0));
        assert!(!is_supported_version(2));
    }

    #[test]
    fn test_validate_rejects_version() {
        let params = KdfParams { encryption_version: 2, ..Default::default() };
        assert_eq!(
            params.validate(),
            Err(DeriveKeyError::UnsupportedEncryptionVersion(2))
        );
    }

    #[test]
    fn test_validate_rejects_cost() {
        for n in [0, 1, 1000] {
            let params = KdfParams { n, ..Default::default() };
            assert!(matches!(
                params.validate(),
                Err(DeriveKeyError::Hash(HashError::InvalidScryptParameters { .. }))
            ));
        }
    }

    #[test]
    fn test_validate_key_length() {
        for key_length in [0usize, 1, 31] {
            let params = KdfParams { key_length, ..Default::default() };
            assert_eq!(
                params.validate(),
                Err(DeriveKeyError::KeyLengthTooShort { len: key_length, min: 32 })
            );
        }

        for key_length in [32usize, 64] {
            let params = KdfParams { key_length, ..Default::default() };
            assert!(params.validate().is_ok());
        }
    }

    #[test]
    fn test_serde_roundtrip() {
        let params = KdfParams { n: 16384, ..Default::default() };
        let json = serde_json::to_string(&params).unwrap();
        let restored: KdfParams = serde_json::from_str(&json).unwrap();
        assert_eq!(params, restored);
    }

    #[test]
    fn test_serde_fills_missing_fields() {
        let params: KdfParams = serde_json::from_str(r#"{"n": 16}"#).unwrap();
        assert_eq!(params.n, 16);
        assert_eq!(params.r, DEFAULT_SCRYPT_R);
        assert_eq!(params.encryption_version, DEFAULT_ENCRYPTION_VERSION);
    }
}
