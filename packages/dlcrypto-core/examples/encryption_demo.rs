//! # Encryption Demo
//!
//! Encrypts a message into an AES-256-GCM frame, decrypts it, then shows
//! what happens when the frame is tampered with.
//!
//! ## Run
//!
//! ```bash
//! cargo run --example encryption_demo
//! ```

use dlcrypto_core::crypto::{decrypt, encrypt, generate_nonce, random_bytes, TAG_SIZE};
use dlcrypto_core::error::DecryptError;

fn main() {
    println!("=== dlcrypto-core: AEAD Frame Demo ===\n");

    // Step 1: Key and nonce
    println!("Step 1: Generating a key and nonce...");

    let key = random_bytes(32);
    let nonce = generate_nonce();

    println!("  Key:   {}... ({} bytes)", hex::encode(&key[..8]), key.len());
    println!("  Nonce: {} ({} bytes)", hex::encode(nonce), nonce.len());
    println!();

    // Step 2: Encrypt
    println!("Step 2: Encrypting...");

    let message = b"TokenD is awesome";
    let frame = encrypt(message, &key, &nonce).expect("Encryption failed");

    println!("  Plaintext: \"{}\"", String::from_utf8_lossy(message));
    println!();
    println!("  ┌─────────────────────────────────────────────────────────────┐");
    println!("  │  ciphertext ({:>3} bytes)         │  tag ({:>2} bytes)          │", frame.len() - TAG_SIZE, TAG_SIZE);
    println!("  └─────────────────────────────────────────────────────────────┘");
    println!();
    println!("  Ciphertext: {}", hex::encode(&frame[..frame.len() - TAG_SIZE]));
    println!("  Tag:        {}", hex::encode(&frame[frame.len() - TAG_SIZE..]));
    println!();

    // Step 3: Decrypt
    println!("Step 3: Decrypting...");

    let plaintext = decrypt(&frame, &key, &nonce).expect("Decryption failed");
    if plaintext.as_bytes() == message {
        println!("  [OK] Round trip matches: \"{}\"", String::from_utf8_lossy(&plaintext));
    } else {
        println!("  [FAILED] Round trip mismatch!");
        return;
    }
    println!();

    // Step 4: Tamper
    println!("Step 4: Flipping one bit of the ciphertext...");

    let mut tampered = frame.clone();
    tampered[0] ^= 0x01;

    match decrypt(&tampered, &key, &nonce) {
        Err(DecryptError::VerificationFailed) => {
            println!("  [OK] Tampering detected, no plaintext released");
        }
        other => {
            println!("  [FAILED] Unexpected result: {:?}", other);
            return;
        }
    }
    println!();

    // Step 5: Malformed frame
    println!("Step 5: Decrypting a frame shorter than the tag...");

    match decrypt(&frame[..TAG_SIZE - 1], &key, &nonce) {
        Err(err @ DecryptError::MalformedFrame { .. }) => println!("  [OK] Rejected: {}", err),
        other => println!("  [FAILED] Unexpected result: {:?}", other),
    }

    println!("\n=== Demo Complete ===");
}
