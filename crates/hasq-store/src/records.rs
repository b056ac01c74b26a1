//! Records kept next to the chain rows: registered tokens and issued keys.

use serde::{Deserialize, Serialize};
use std::fmt;

use hasq_core::{Key, Token};

/// Identifies whoever holds a key. Opaque to the protocol.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HolderId(String);

impl HolderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for HolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HolderId({})", self.0)
    }
}

impl fmt::Display for HolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HolderId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A registered token and the data it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    /// `create_token(data)`.
    pub token: Token,

    /// Human-readable title.
    pub title: String,

    /// The raw data the token was derived from.
    pub data: Vec<u8>,
}

/// A key issued to a holder for one chain position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRecord {
    /// Chain the key belongs to.
    pub token: Token,

    /// Position the key was derived for.
    pub id: u64,

    /// The derived key.
    pub key: Key,

    /// Who the key was issued to.
    pub holder: HolderId,
}
