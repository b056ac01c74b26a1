//! Strong type definitions for HASQ chains.
//!
//! Every value in a chain is an uppercase hex hash string. Each role gets its
//! own newtype so a generator can never be stored where an owner belongs.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::digest::{decode_hex, encode_upper, hash, sha3_256};
use crate::error::CoreError;

/// Length of a hex-encoded 256-bit digest.
pub const HASH_HEX_LEN: usize = 64;

fn short(s: &str) -> &str {
    s.get(..16).unwrap_or(s)
}

/// Identity of the thing being owned.
///
/// Derived once from arbitrary data and immutable for the life of a chain.
/// Keys are salted with its string form, which is what ties a key to one chain.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// Wrap an already computed token hash without checking it.
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Parse a token hash, rejecting anything that is not a 256-bit hex digest.
    ///
    /// The result is normalized to uppercase.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let bytes = decode_hex(s)?;
        if bytes.len() != 32 {
            return Err(CoreError::InvalidEncoding(format!(
                "token must be 32 bytes, got {}",
                bytes.len()
            )));
        }
        Ok(Self(encode_upper(&bytes)))
    }

    /// Get the hash string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({})", short(&self.0))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Proof of control at one chain position.
///
/// Either derived from `(id, token, passphrase)` or loaded verbatim from
/// storage. Two keys are equal iff their strings are equal.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(String);

impl Key {
    /// Derive the key for position `id` of the chain identified by `token`.
    pub fn derive(id: u64, token: &Token, passphrase: &str) -> Self {
        Self(hash(&[&id, token, &passphrase]))
    }

    /// Get the hash string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({})", short(&self.0))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Forward link stored on element `i - 1`, committing to the key at `i`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Generator(String);

impl Generator {
    /// `hash(index, token, key)` where `key` will occupy position `index`.
    pub fn derive(index: u64, token: &Token, key: &Key) -> Self {
        Self(hash(&[&index, token, key]))
    }

    /// Self-referential generator of a bootstrap element.
    pub fn bootstrap(key: &Key) -> Self {
        Self(key.0.clone())
    }

    /// Wrap a stored generator string.
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Get the hash string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Generator({})", short(&self.0))
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Confirmation of a generator, stored one element before the generator.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Owner(String);

impl Owner {
    /// `hash(generator)`.
    pub fn derive(generator: &Generator) -> Self {
        Self(hash(&[generator]))
    }

    /// Self-referential owner of a bootstrap element.
    pub fn bootstrap(key: &Key) -> Self {
        Self(key.0.clone())
    }

    /// Wrap a stored owner string.
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Get the hash string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Owner({})", short(&self.0))
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derive a token from arbitrary data.
///
/// This is a single SHA3-256 over `data`, hex-encoded. It is not routed
/// through [`hash`], so the bytes are never re-stringified.
pub fn create_token(data: &[u8]) -> Token {
    Token(encode_upper(&sha3_256(data)))
}

/// The bootstrap key at position 0.
pub fn create_key(token: &Token, passphrase: &str) -> Key {
    Key::derive(0, token, passphrase)
}

/// Wrap a hash string fetched from storage as a key.
pub fn load_key(hash: impl Into<String>) -> Key {
    Key(hash.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_token_deterministic() {
        let t1 = create_token(b"TEST_DATA");
        let t2 = create_token(b"TEST_DATA");
        assert_eq!(t1, t2);
        assert_eq!(t1.as_str().len(), HASH_HEX_LEN);
        assert_ne!(t1, create_token(b"OTHER_DATA"));
    }

    #[test]
    fn test_create_token_is_single_hash() {
        let token = create_token(b"abc");
        assert_eq!(
            token.as_str(),
            "3A985DA74FE225B2045C172D6BD390BD855F086E3E9D525B46BFE24511431532"
        );
        // Data that is not valid text still hashes its raw bytes.
        let binary = create_token(&[0xff, 0x00, 0xfe]);
        assert_eq!(binary.as_str().len(), HASH_HEX_LEN);
    }

    #[test]
    fn test_create_key_matches_position_zero() {
        let token = create_token(b"TEST_DATA");
        let key = create_key(&token, "password");
        assert_eq!(key, Key::derive(0, &token, "password"));
        assert_eq!(key.as_str(), hash(&[&0u64, &token.as_str(), &"password"]));
    }

    #[test]
    fn test_keys_are_salted_by_token() {
        let t1 = create_token(b"one");
        let t2 = create_token(b"two");
        assert_ne!(create_key(&t1, "pw"), create_key(&t2, "pw"));
    }

    #[test]
    fn test_load_key_is_verbatim() {
        let key = load_key("ABCDEF");
        assert_eq!(key.as_str(), "ABCDEF");
        assert_eq!(key, load_key(String::from("ABCDEF")));
    }

    #[test]
    fn test_generator_and_owner_derivation() {
        let token = create_token(b"TEST_DATA");
        let key = Key::derive(1, &token, "pw");
        let gen = Generator::derive(1, &token, &key);
        assert_eq!(gen.as_str(), hash(&[&1u64, &token.as_str(), &key.as_str()]));
        let owner = Owner::derive(&gen);
        assert_eq!(owner.as_str(), hash(&[&gen.as_str()]));
    }

    #[test]
    fn test_bootstrap_values_copy_the_key() {
        let key = load_key("00FF");
        assert_eq!(Generator::bootstrap(&key).as_str(), "00FF");
        assert_eq!(Owner::bootstrap(&key).as_str(), "00FF");
    }

    #[test]
    fn test_token_parse() {
        let token = create_token(b"x");
        let parsed = Token::parse(&token.as_str().to_lowercase()).unwrap();
        assert_eq!(parsed, token);

        assert!(matches!(Token::parse("nothex"), Err(CoreError::InvalidEncoding(_))));
        assert!(matches!(Token::parse("ABCD"), Err(CoreError::InvalidEncoding(_))));
    }

    #[test]
    fn test_debug_is_abbreviated() {
        let token = create_token(b"x");
        let debug = format!("{:?}", token);
        assert!(debug.starts_with("Token("));
        assert_eq!(debug.len(), "Token()".len() + 16);
        assert_eq!(format!("{:?}", load_key("AB")), "Key(AB)");
    }

    #[test]
    fn test_serde_transparent() {
        let key = load_key("ABCD");
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"ABCD\"");
        let back: Key = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }
}
