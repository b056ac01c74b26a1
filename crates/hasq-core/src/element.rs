//! Elements, transfer deltas, and their storage row form.

use serde::{Deserialize, Serialize};

use crate::types::{Generator, Key, Owner};

/// One position in a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Position number, strictly increasing by one.
    pub id: u64,

    /// Key of the holder at this position.
    pub key: Key,

    /// Link to the next holder's key. Set when the next transfer happens.
    pub generator: Option<Generator>,

    /// Confirmation of the next element's generator. Set one transfer later.
    pub owner: Option<Owner>,
}

impl Element {
    /// A freshly appended element with no links yet.
    pub fn new(id: u64, key: Key) -> Self {
        Self {
            id,
            key,
            generator: None,
            owner: None,
        }
    }

    /// Convert to the storage row form.
    pub fn to_row(&self) -> ChainRow {
        ChainRow {
            id: self.id,
            key: self.key.as_str().to_owned(),
            generator: self.generator.as_ref().map(|g| g.as_str().to_owned()),
            owner: self.owner.as_ref().map(|o| o.as_str().to_owned()),
        }
    }
}

/// The delta produced by one ownership transfer.
///
/// Persisting a transfer means inserting the row at `id` and updating the
/// two cells named here. Nothing else in the chain changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    /// Id of the appended element.
    pub id: u64,

    /// Generator written onto element `generator_id`.
    pub generator: Option<Generator>,

    /// Id of the element that received `generator`.
    pub generator_id: u64,

    /// Owner written onto element `owner_id`.
    pub owner: Option<Owner>,

    /// Id of the element that received `owner`.
    pub owner_id: u64,
}

impl Change {
    /// Change for the first element of an empty chain: nothing to backfill.
    pub fn first(id: u64) -> Self {
        Self {
            id,
            generator: None,
            generator_id: 0,
            owner: None,
            owner_id: 0,
        }
    }

    /// Whether this transfer finalized an owner link.
    pub fn has_owner(&self) -> bool {
        self.owner.is_some()
    }
}

/// A persisted chain element as exchanged with storage.
///
/// Every string is an uppercase hex digest, except on bootstrap elements where
/// generator and owner repeat the key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainRow {
    pub id: u64,
    pub key: String,
    pub generator: Option<String>,
    pub owner: Option<String>,
}
