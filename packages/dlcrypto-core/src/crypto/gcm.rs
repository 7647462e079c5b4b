//! AES-256-GCM for nonces whose length is only known at runtime
//!
//! `aes-gcm` fixes the nonce length in the type. Any length other than the
//! standard 12 bytes comes through here, with the pre-counter block derived
//! as in NIST SP 800-38D section 7.2:
//!
//! ```text
//! J0 = GHASH_H( IV || 0^(s+64) || [len(IV)]_64 )
//! ```
//!
//! Everything after J0 (CTR keystream, GHASH over the ciphertext, tag mask)
//! is the same as for a 12-byte nonce.

use aes_gcm::aead::consts::U16;
use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::KeyInit;
use aes_gcm::aes::cipher::{BlockEncrypt, InnerIvInit, InvalidLength, StreamCipherCore};
use aes_gcm::aes::Aes256;
use aes_gcm::{Tag, C_MAX, P_MAX};
use ghash::universal_hash::UniversalHash;
use ghash::GHash;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

type Block = GenericArray<u8, U16>;
type Ctr32BE<'a> = ctr::CtrCore<&'a Aes256, ctr::flavors::Ctr32BE>;

/// AES-256-GCM keyed once, usable with any non-empty nonce
pub(crate) struct ExtendedGcm {
    cipher: Aes256,
    ghash: GHash,
}

impl ExtendedGcm {
    pub(crate) fn new_from_slice(key: &[u8]) -> Result<Self, InvalidLength> {
        let cipher = Aes256::new_from_slice(key)?;

        // H = E_K(0^128)
        let mut ghash_key = ghash::Key::default();
        cipher.encrypt_block(&mut ghash_key);
        let ghash = GHash::new(&ghash_key);
        ghash_key.as_mut_slice().zeroize();

        Ok(Self { cipher, ghash })
    }

    pub(crate) fn encrypt_in_place_detached(
        &self,
        nonce: &[u8],
        buf: &mut [u8],
    ) -> Result<Tag, aes_gcm::Error> {
        if nonce.is_empty() || buf.len() as u64 > P_MAX {
            return Err(aes_gcm::Error);
        }

        let (ctr, mask) = self.init_ctr(nonce);
        ctr.apply_keystream_partial(buf.into());

        Ok(self.compute_tag(mask, buf))
    }

    /// The buffer is only decrypted once the tag has verified.
    pub(crate) fn decrypt_in_place_detached(
        &self,
        nonce: &[u8],
        buf: &mut [u8],
        tag: &[u8],
    ) -> Result<(), aes_gcm::Error> {
        if nonce.is_empty() || buf.len() as u64 > C_MAX {
            return Err(aes_gcm::Error);
        }

        let (ctr, mask) = self.init_ctr(nonce);
        let expected = self.compute_tag(mask, buf);

        if expected.as_slice().ct_eq(tag).into() {
            ctr.apply_keystream_partial(buf.into());
            Ok(())
        } else {
            Err(aes_gcm::Error)
        }
    }

    /// Derive J0 from the nonce and return the counter positioned after it,
    /// plus E_K(J0) for masking the tag
    fn init_ctr(&self, nonce: &[u8]) -> (Ctr32BE<'_>, Block) {
        let mut ghash = self.ghash.clone();
        ghash.update_padded(nonce);

        let mut lengths = Block::default();
        let nonce_bits = (nonce.len() as u64) * 8;
        lengths[8..].copy_from_slice(&nonce_bits.to_be_bytes());
        ghash.update(&[lengths]);
        let j0 = ghash.finalize();

        let mut ctr = Ctr32BE::inner_iv_init(&self.cipher, &j0);
        let mut mask = Block::default();
        ctr.write_keystream_block(&mut mask);
        (ctr, mask)
    }

    /// GHASH over the ciphertext (no associated data) and the length block
    fn compute_tag(&self, mask: Block, ciphertext: &[u8]) -> Tag {
        let mut ghash = self.ghash.clone();
        ghash.update_padded(ciphertext);

        let mut lengths = Block::default();
        let ciphertext_bits = (ciphertext.len() as u64) * 8;
        lengths[8..].copy_from_slice(&ciphertext_bits.to_be_bytes());
        ghash.update(&[lengths]);

        let mut tag = ghash.finalize();
        for (t, m) in tag.iter_mut().zip(mask.iter()) {
            *t ^= *m;
        }
        tag
    }
}
