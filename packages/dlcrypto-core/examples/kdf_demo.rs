//! # Key Derivation Demo
//!
//! Derives wallet keys from a login and password, then shows how each
//! input changes the result.
//!
//! ## Run
//!
//! ```bash
//! cargo run --release --example kdf_demo
//! ```

use std::time::Instant;

use dlcrypto_core::config::KdfParams;
use dlcrypto_core::crypto::{derive_key_with, derive_wallet_keys, master_key};
use dlcrypto_core::encoding;

fn main() {
    println!("=== dlcrypto-core: Key Derivation Demo ===\n");

    let login = "oleg@tokend.org";
    let password = "qwe123";
    let salt = encoding::decode_base64("67ufG1N/Rf+j2ugDaXaopw==").expect("Invalid salt");
    let params = KdfParams::default();

    // Step 1: Parameters
    println!("Step 1: Parameters");
    println!("  Login:    {}", login);
    println!("  Salt:     {} ({} bytes)", encoding::to_hex(&salt), salt.len());
    println!(
        "  scrypt:   N={} r={} p={} len={}",
        params.n, params.r, params.p, params.key_length
    );
    println!("  Version:  {}", params.encryption_version);
    println!();

    println!("  ┌─────────────────────────────────────────────────────────────┐");
    println!("  │  SHA-256(version || salt || login)   → composed salt       │");
    println!("  │  scrypt(password, composed salt)     → stretched key       │");
    println!("  │  HMAC-SHA256(stretched, label)       → 32-byte wallet key  │");
    println!("  └─────────────────────────────────────────────────────────────┘");
    println!();

    // Step 2: Derive both wallet keys
    println!("Step 2: Deriving wallet keys...");

    let started = Instant::now();
    let keys = derive_wallet_keys(login, password, &salt, &params).expect("Derivation failed");

    println!("  {:<11} {}", master_key::WALLET_ID, keys.wallet_id.to_hex());
    println!("  {:<11} {}", master_key::WALLET_KEY, keys.wallet_key.to_hex());
    println!("  Took {:?}", started.elapsed());
    println!();

    // Step 3: A different password gives an unrelated key
    println!("Step 3: Deriving with a different password...");

    let other = derive_key_with(login, "qwe124", &salt, master_key::WALLET_ID, &params)
        .expect("Derivation failed");

    println!("  {:<11} {}", master_key::WALLET_ID, other.to_hex());
    if other != keys.wallet_id {
        println!("  [OK] Keys differ");
    } else {
        println!("  [FAILED] Keys collide!");
    }
    println!();

    // Step 4: Unsupported version
    println!("Step 4: Requesting an unsupported encryption version...");

    let unsupported = KdfParams { encryption_version: 2, ..params };
    match derive_key_with(login, password, &salt, master_key::WALLET_ID, &unsupported) {
        Ok(_) => println!("  [FAILED] Unsupported version accepted!"),
        Err(err) => println!("  [OK] Rejected: {}", err),
    }

    println!("\n=== Demo Complete ===");
}
