//! Property-based tests for the public API
//!
//! 1. **Round-trip**: decrypt(encrypt(m)) == m for all messages
//! 2. **Tamper detection**: any single bit flip in a frame is rejected
//! 3. **Seed round-trip**: get_seed(new_from_seed(s)) == s
//! 4. **Sign/verify**: signatures verify, and mutations never do
//! 5. **KDF**: derivation is deterministic and label-separated

use dlcrypto_core::config::KdfParams;
use dlcrypto_core::crypto::{
    decrypt, derive_key_with, encrypt, master_key, sign, verify, KeyPair, KEY_SIZE, NONCE_SIZE,
    TAG_SIZE,
};
use dlcrypto_core::error::DecryptError;
use proptest::prelude::*;

fn array32() -> impl Strategy<Value = [u8; 32]> {
    prop::collection::vec(any::<u8>(), 32..=32).prop_map(|v| {
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&v);
        arr
    })
}

fn nonce() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        prop::collection::vec(any::<u8>(), NONCE_SIZE..=NONCE_SIZE),
        prop::collection::vec(any::<u8>(), 1..=64),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_encrypt_decrypt_roundtrip(
        plaintext in prop::collection::vec(any::<u8>(), 0..1000),
        key in array32(),
        nonce in nonce(),
    ) {
        let frame = encrypt(&plaintext, &key, &nonce).unwrap();
        prop_assert_eq!(frame.len(), plaintext.len() + TAG_SIZE);

        let decrypted = decrypt(&frame, &key, &nonce).unwrap();
        prop_assert_eq!(decrypted.as_bytes(), plaintext.as_slice());
    }

    #[test]
    fn prop_bit_flip_is_detected(
        plaintext in prop::collection::vec(any::<u8>(), 0..256),
        key in array32(),
        nonce in nonce(),
        position in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let mut frame = encrypt(&plaintext, &key, &nonce).unwrap();
        let i = position.index(frame.len());
        frame[i] ^= 1 << bit;

        prop_assert_eq!(decrypt(&frame, &key, &nonce).unwrap_err(), DecryptError::VerificationFailed);
    }

    #[test]
    fn prop_other_nonce_is_rejected(
        plaintext in prop::collection::vec(any::<u8>(), 0..256),
        key in array32(),
        nonce in nonce(),
        other in nonce(),
    ) {
        prop_assume!(nonce != other);

        let frame = encrypt(&plaintext, &key, &nonce).unwrap();
        prop_assert_eq!(decrypt(&frame, &key, &other).unwrap_err(), DecryptError::VerificationFailed);
    }

    #[test]
    fn prop_short_frames_are_malformed(
        frame in prop::collection::vec(any::<u8>(), 0..TAG_SIZE),
    ) {
        let key = [0u8; KEY_SIZE];
        let nonce = [0u8; NONCE_SIZE];

        prop_assert_eq!(
            decrypt(&frame, &key, &nonce).unwrap_err(),
            DecryptError::MalformedFrame { len: frame.len() }
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_seed_roundtrip(seed in array32()) {
        let keypair = KeyPair::new_from_seed(&seed).unwrap();
        let recovered = keypair.get_seed();
        prop_assert_eq!(recovered.as_bytes(), &seed[..]);

        let again = KeyPair::new_from_seed(&seed).unwrap();
        prop_assert_eq!(keypair.public_key(), again.public_key());
        prop_assert_eq!(keypair.private_key(), again.private_key());
    }

    #[test]
    fn prop_sign_verify(
        seed in array32(),
        message in prop::collection::vec(any::<u8>(), 0..512),
    ) {
        let keypair = KeyPair::new_from_seed(&seed).unwrap();
        let signature = sign(&message, &keypair).unwrap();

        prop_assert!(verify(signature.as_bytes(), &message, keypair.public_key().as_bytes()));
    }

    #[test]
    fn prop_mutated_message_fails(
        seed in array32(),
        message in prop::collection::vec(any::<u8>(), 1..512),
        position in any::<prop::sample::Index>(),
    ) {
        let keypair = KeyPair::new_from_seed(&seed).unwrap();
        let signature = sign(&message, &keypair).unwrap();

        let mut mutated = message.clone();
        let i = position.index(mutated.len());
        mutated[i] ^= 0x01;

        prop_assert!(!verify(signature.as_bytes(), &mutated, keypair.public_key().as_bytes()));
    }

    #[test]
    fn prop_substituted_key_fails(
        seed in array32(),
        other_seed in array32(),
        message in prop::collection::vec(any::<u8>(), 0..128),
    ) {
        prop_assume!(seed != other_seed);

        let keypair = KeyPair::new_from_seed(&seed).unwrap();
        let other = KeyPair::new_from_seed(&other_seed).unwrap();
        let signature = sign(&message, &keypair).unwrap();

        prop_assert!(!verify(signature.as_bytes(), &message, other.public_key().as_bytes()));
    }

    #[test]
    fn prop_verify_never_panics(
        signature in prop::collection::vec(any::<u8>(), 0..100),
        message in prop::collection::vec(any::<u8>(), 0..64),
        public_key in prop::collection::vec(any::<u8>(), 0..40),
    ) {
        // Arbitrary bytes are almost never a valid signature
        let _ = verify(&signature, &message, &public_key);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn prop_kdf_deterministic_and_separated(
        login in "[a-z0-9@.]{1,24}",
        password in "\\PC{0,24}",
        salt in prop::collection::vec(any::<u8>(), 0..32),
    ) {
        let params = KdfParams { n: 16, r: 1, p: 1, ..Default::default() };

        let id1 = derive_key_with(&login, &password, &salt, master_key::WALLET_ID, &params).unwrap();
        let id2 = derive_key_with(&login, &password, &salt, master_key::WALLET_ID, &params).unwrap();
        let key = derive_key_with(&login, &password, &salt, master_key::WALLET_KEY, &params).unwrap();

        prop_assert_eq!(id1.len(), 32);
        prop_assert_eq!(&id1, &id2);
        prop_assert_ne!(&id1, &key);
    }
}
