//! Randomness from the operating system CSPRNG.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::buffer::{self, SecureBytes};

/// Fill a new buffer of `len` bytes from the OS CSPRNG
pub fn random_bytes(len: usize) -> SecureBytes {
    buffer::produce_safe(len, |buf| OsRng.fill_bytes(buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_bytes_length() {
        assert_eq!(random_bytes(0).len(), 0);
        assert_eq!(random_bytes(16).len(), 16);
        assert_eq!(random_bytes(1000).len(), 1000);
    }

    #[test]
    fn test_random_bytes_differ() {
        assert_ne!(random_bytes(32), random_bytes(32));
    }
}
