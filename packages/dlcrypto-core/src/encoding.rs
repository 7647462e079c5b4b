//! # Encoding Helpers
//!
//! Hex and base64 conversions for keys, salts, nonces and frames.
//!
//! Hex output is always lowercase. Hex input is accepted in either case but
//! must be well formed: an odd number of digits or a non-hex character is an
//! error rather than being silently skipped.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::EncodingError;

/// Encode bytes as lowercase hex
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decode a hex string
pub fn from_hex(hex_str: &str) -> Result<Vec<u8>, EncodingError> {
    Ok(hex::decode(hex_str)?)
}

/// Decode a hex string into a fixed-size array
pub fn from_hex_array<const N: usize>(hex_str: &str) -> Result<[u8; N], EncodingError> {
    let bytes = from_hex(hex_str)?;
    let actual = bytes.len();
    bytes
        .try_into()
        .map_err(|_| EncodingError::InvalidLength { expected: N, actual })
}

/// Encode bytes as padded standard base64
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode padded standard base64
pub fn decode_base64(input: &str) -> Result<Vec<u8>, EncodingError> {
    Ok(STANDARD.decode(input)?)
}

/// Convert base64url text to standard base64
///
/// Swaps `-` for `+` and `_` for `/`, then pads with `=` to a multiple of
/// four characters.
pub fn base64url_to_base64(input: &str) -> String {
    pad_to_quad(input.replace('-', "+").replace('_', "/"))
}

/// Convert standard base64 text to base64url
///
/// Swaps `+` for `-` and `/` for `_`. Padding is kept, and added if the
/// input was short of a multiple of four characters.
pub fn base64_to_base64url(input: &str) -> String {
    pad_to_quad(input.replace('+', "-").replace('/', "_"))
}

fn pad_to_quad(mut text: String) -> String {
    let rem = text.chars().count() % 4;
    if rem != 0 {
        text.extend(std::iter::repeat('=').take(4 - rem));
    }
    text
}

/// Serde helper for fixed-size byte arrays stored as hex strings
pub(crate) mod serde_hex {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S, const N: usize>(bytes: &[u8; N], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D, const N: usize>(deserializer: D) -> Result<[u8; N], D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        bytes
            .try_into()
            .map_err(|_| serde::de::Error::custom("Invalid length"))
    }
}
