//! # Digital Signature Demo
//!
//! Demonstrates the Ed25519 key pair lifecycle: deterministic keys from a
//! seed, detached signatures, and seed recovery.
//!
//! ## Run
//!
//! ```bash
//! cargo run --example signing_demo
//! ```

use dlcrypto_core::crypto::{sign, verify, KeyPair};

fn main() {
    println!("=== dlcrypto-core: Digital Signature Demo ===\n");

    // Step 1: Create a keypair
    println!("Step 1: Creating Ed25519 key pair from a seed...");

    let seed: Vec<u8> = (0u8..32).collect(); // In production, use a random key pair
    let keypair = KeyPair::new_from_seed(&seed).expect("Failed to create key pair");

    println!("  Public key (hex): {}", keypair.public_key().to_hex());
    println!("  Private key: {} bytes (seed || public key)", keypair.private_key().len());
    println!();

    // Step 2: Sign a message
    println!("Step 2: Signing a message...");

    let message = b"TokenD is awesome";
    println!("  Message: \"{}\"", String::from_utf8_lossy(message));

    let signature = sign(message, &keypair).expect("Signing failed");

    println!("  Signature (hex): {}", signature.to_hex());
    println!("  Signature length: {} bytes", signature.as_bytes().len());
    println!();

    // Step 3: Verify the signature
    println!("Step 3: Verifying the signature...");

    let public = keypair.public_key();
    if verify(signature.as_bytes(), message, public.as_bytes()) {
        println!("  [OK] Signature is valid!");
    } else {
        println!("  [FAILED] Signature verification failed!");
    }
    println!();

    // Step 4: Demonstrate forgery detection
    println!("Step 4: Verifying against a modified message...");

    let forged = b"TokenD is awful";
    if verify(signature.as_bytes(), forged, public.as_bytes()) {
        println!("  [FAILED] Forgery accepted!");
    } else {
        println!("  [OK] Modified message rejected");
    }

    if verify(&signature.as_bytes()[..32], message, public.as_bytes()) {
        println!("  [FAILED] Truncated signature accepted!");
    } else {
        println!("  [OK] Truncated signature rejected (no error, just false)");
    }
    println!();

    // Step 5: Seed recovery
    println!("Step 5: Recovering the key pair from its seed...");

    let recovered = KeyPair::new_from_seed(&keypair.get_seed()).expect("Failed to recover key pair");
    if recovered.public_key() == keypair.public_key() {
        println!("  [OK] Recovered key pair matches");
    } else {
        println!("  [FAILED] Recovered key pair differs!");
    }

    println!("\n=== Demo Complete ===");
}
