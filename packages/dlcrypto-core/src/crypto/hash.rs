//! # Hashing Primitives
//!
//! Plain digests, HMAC-SHA256 and scrypt, each producing its output through
//! a scoped buffer.
//!
//! | Function | Output | Used by |
//! |----------|--------|---------|
//! | `sha1` | 20 bytes | callers |
//! | `sha256` | 32 bytes | KDF salt composition |
//! | `sha3_*` / `keccak*` | 28 / 32 / 48 / 64 bytes | callers |
//! | `hmac_sha256` | 32 bytes | KDF label binding |
//! | `scrypt` | caller-chosen | KDF password stretching |

use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Digest, Sha256};
use sha3::{Keccak224, Keccak256, Keccak384, Keccak512, Sha3_224, Sha3_256, Sha3_384, Sha3_512};

use crate::buffer::{self, SecureBytes};
use crate::error::HashError;

type HmacSha256 = Hmac<Sha256>;

/// Size of an HMAC-SHA256 output in bytes
pub const HMAC_SHA256_SIZE: usize = 32;

/// `len` handed to `scrypt::Params`. It only describes PHC string output;
/// the real output length is taken from the output buffer.
const SCRYPT_PARAMS_LEN: usize = 32;

fn digest<D: Digest>(data: &[u8]) -> SecureBytes {
    buffer::produce_safe(<D as Digest>::output_size(), |buf| {
        buf.copy_from_slice(D::digest(data).as_slice());
    })
}

/// SHA-1 digest (20 bytes)
pub fn sha1(data: &[u8]) -> SecureBytes {
    digest::<Sha1>(data)
}

/// SHA-256 digest (32 bytes)
pub fn sha256(data: &[u8]) -> SecureBytes {
    digest::<Sha256>(data)
}

/// SHA3-224 digest
pub fn sha3_224(data: &[u8]) -> SecureBytes {
    digest::<Sha3_224>(data)
}

/// SHA3-256 digest
pub fn sha3_256(data: &[u8]) -> SecureBytes {
    digest::<Sha3_256>(data)
}

/// SHA3-384 digest
pub fn sha3_384(data: &[u8]) -> SecureBytes {
    digest::<Sha3_384>(data)
}

/// SHA3-512 digest
pub fn sha3_512(data: &[u8]) -> SecureBytes {
    digest::<Sha3_512>(data)
}

/// Keccak-224 digest (pre-standard padding, as used by Ethereum)
pub fn keccak224(data: &[u8]) -> SecureBytes {
    digest::<Keccak224>(data)
}

/// Keccak-256 digest
pub fn keccak256(data: &[u8]) -> SecureBytes {
    digest::<Keccak256>(data)
}

/// Keccak-384 digest
pub fn keccak384(data: &[u8]) -> SecureBytes {
    digest::<Keccak384>(data)
}

/// Keccak-512 digest
pub fn keccak512(data: &[u8]) -> SecureBytes {
    digest::<Keccak512>(data)
}

/// HMAC-SHA256 of `message` under `key`
pub fn hmac_sha256(key: &[u8], message: &[u8]) -> Result<SecureBytes, HashError> {
    buffer::produce_fixed(HMAC_SHA256_SIZE, |buf| {
        let mut mac = HmacSha256::new_from_slice(key).map_err(|_| HashError::HmacFailed)?;
        mac.update(message);
        let tag = mac.finalize().into_bytes();
        buffer::copy_exact(buf, tag.as_slice(), HashError::HmacFailed)
    })
}

/// scrypt (Salsa20/8, SHA-256) with explicit cost parameters
///
/// `n` must be a power of two greater than one, `r` and `p` non-zero, and
/// `len` non-zero.
pub fn scrypt(
    password: &[u8],
    salt: &[u8],
    n: u64,
    r: u32,
    p: u32,
    len: usize,
) -> Result<SecureBytes, HashError> {
    let invalid = HashError::InvalidScryptParameters { n, r, p, len };

    let log_n = cost_to_log2(n).ok_or(invalid)?;
    if len == 0 {
        return Err(invalid);
    }
    let params = scrypt::Params::new(log_n, r, p, SCRYPT_PARAMS_LEN).map_err(|_| invalid)?;

    tracing::trace!(log_n, r, p, len, "Running scrypt");

    buffer::produce_fixed(len, |buf| {
        scrypt::scrypt(password, salt, &params, buf).map_err(|_| HashError::HashFailed)
    })
}

/// `log2(n)` if `n` is a power of two greater than one
fn cost_to_log2(n: u64) -> Option<u8> {
    if n > 1 && n.is_power_of_two() {
        u8::try_from(n.trailing_zeros()).ok()
    } else {
        None
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const LONG_INPUT: &[u8] = b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq";

    #[test]
    fn test_sha1() {
        assert_eq!(
            sha1(b"Test string").to_hex(),
            "18af819125b70879d36378431c4e8d9bfa6a2599"
        );
        assert_eq!(
            sha1(b"Test string other").to_hex(),
            "c046dcb785c75613db685c144ee1813c71321c62"
        );
    }

    #[test]
    fn test_sha256() {
        assert_eq!(
            sha256(b"Test string").to_hex(),
            "a3e49d843df13c2e2a7786f6ecd7e0d184f45d718d1ac1a8a63e570466e489dd"
        );
        assert_eq!(
            sha256(b"Test string other").to_hex(),
            "70e9c4d76323eab94d7f2cc3f1af5b348cbab0427e0503df6c6e7eb3c7ea3758"
        );
    }

    #[test]
    fn test_sha3() {
        assert_eq!(
            sha3_224(LONG_INPUT).to_hex(),
            "8a24108b154ada21c9fd5574494479ba5c7e7ab76ef264ead0fcce33"
        );
        assert_eq!(
            sha3_256(LONG_INPUT).to_hex(),
            "41c0dba2a9d6240849100376a8235e2c82e1b9998a999e21db32dd97496d3376"
        );
        assert_eq!(
            sha3_384(LONG_INPUT).to_hex(),
            "991c665755eb3a4b6bbdfb75c78a492e8c56a22c5c4d7e429bfdbc32b9d4ad5aa04a1f076e62fea19eef51acd0657c22"
        );
        assert_eq!(
            sha3_512(LONG_INPUT).to_hex(),
            "04a371e84ecfb5b8b77cb48610fca8182dd457ce6f326a0fd3d7ec2f1e91636dee691fbe0c985302ba1b0d8dc78c086346b533b49c030d99a27daf1139d6e75e"
        );
    }

    #[test]
    fn test_keccak() {
        assert_eq!(
            keccak224(LONG_INPUT).to_hex(),
            "e51faa2b4655150b931ee8d700dc202f763ca5f962c529eae55012b6"
        );
        assert_eq!(
            keccak256(LONG_INPUT).to_hex(),
            "45d3b367a6904e6e8d502ee04999a7c27647f91fa845d456525fd352ae3d7371"
        );
        assert_eq!(
            keccak384(LONG_INPUT).to_hex(),
            "b41e8896428f1bcbb51e17abd6acc98052a3502e0d5bf7fa1af949b4d3c855e7c4dc2c390326b3f3e74c7b1e2b9a3657"
        );
        assert_eq!(
            keccak512(LONG_INPUT).to_hex(),
            "6aa6d3669597df6d5a007b00d09c20795b5c4218234e1698a944757a488ecdc09965435d97ca32c3cfed7201ff30e070cd947f1fc12b9d9214c467d342bcba5d"
        );
    }

    #[test]
    fn test_keccak256_hello() {
        assert_eq!(
            keccak256(b"hello").to_hex(),
            "1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8"
        );
    }

    #[test]
    fn test_hmac_sha256() {
        // RFC 4231, test case 2
        let mac = hmac_sha256(b"Jefe", b"what do ya want for nothing?").unwrap();
        assert_eq!(
            mac.to_hex(),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_scrypt_vector() {
        // RFC 7914, section 12, first vector
        let out = scrypt(b"", b"", 16, 1, 1, 64).unwrap();
        assert_eq!(
            out.to_hex(),
            "77d6576238657b203b19ca42c18a0497f16b4844e3074ae8dfdffa3fede21442fcd0069ded0948f8326a753a0fc81f17e8d3e0fb2e0d3628cf35e20c38d18906"
        );
    }

    #[test]
    fn test_scrypt_rejects_bad_cost() {
        for n in [0u64, 1, 3, 1000] {
            assert!(matches!(
                scrypt(b"pw", b"salt", n, 8, 1, 32),
                Err(HashError::InvalidScryptParameters { .. })
            ));
        }
    }

    #[test]
    fn test_scrypt_rejects_zero_parameters() {
        assert!(scrypt(b"pw", b"salt", 16, 0, 1, 32).is_err());
        assert!(scrypt(b"pw", b"salt", 16, 1, 0, 32).is_err());
        assert!(scrypt(b"pw", b"salt", 16, 1, 1, 0).is_err());
    }

    #[test]
    fn test_scrypt_output_length_follows_request() {
        assert_eq!(scrypt(b"pw", b"salt", 16, 1, 1, 1).unwrap().len(), 1);
        assert_eq!(scrypt(b"pw", b"salt", 16, 1, 1, 100).unwrap().len(), 100);
    }

    #[test]
    fn test_cost_to_log2() {
        assert_eq!(cost_to_log2(2), Some(1));
        assert_eq!(cost_to_log2(4096), Some(12));
        assert_eq!(cost_to_log2(1 << 63), Some(63));
        assert_eq!(cost_to_log2(6), None);
    }
}
