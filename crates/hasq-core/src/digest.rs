//! Digest engine.
//!
//! A digest is SHA3-256 over the concatenation of each input's `Display`
//! rendering. Integers therefore hash as their base-10 text, not as binary
//! fields: `hash(&[&1u64, &"A"])` hashes the two bytes `"1A"`.
//!
//! Any other implementation of the protocol must reproduce this exactly, or
//! keys and links will not match across implementations.

use std::fmt::{self, Write};

use sha3::{Digest, Sha3_256};

use crate::error::CoreError;

/// Compute the raw 32-byte digest of the concatenated parts.
pub fn digest(parts: &[&dyn fmt::Display]) -> [u8; 32] {
    let mut text = String::new();
    for part in parts {
        // Writing into a String cannot fail.
        let _ = write!(text, "{}", part);
    }
    sha3_256(text.as_bytes())
}

/// Compute the digest of the concatenated parts as uppercase hex.
pub fn hash(parts: &[&dyn fmt::Display]) -> String {
    encode_upper(&digest(parts))
}

/// SHA3-256 over raw bytes.
pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha3_256::digest(data));
    out
}

/// Encode bytes as uppercase hex.
pub fn encode_upper(data: &[u8]) -> String {
    hex::encode_upper(data)
}

/// Decode a stored hash back into raw bytes.
///
/// Accepts either case. Malformed input is reported, never fatal.
pub fn decode_hex(data: &str) -> Result<Vec<u8>, CoreError> {
    Ok(hex::decode(data)?)
}
