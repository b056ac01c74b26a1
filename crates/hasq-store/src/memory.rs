//! In-memory implementation of the Store trait.
//!
//! Primarily for tests and embedding. Same semantics as a persistent
//! backend, but everything is lost when the store is dropped.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use hasq_core::{Change, ChainRow, Key, Token};

use crate::error::{Result, StoreError};
use crate::records::{HolderId, KeyRecord, TokenRecord};
use crate::traits::{InsertResult, Store};

/// In-memory store implementation.
///
/// Thread-safe via an async RwLock. A change is applied under one write
/// guard, so readers never observe half a transfer.
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

#[derive(Default)]
struct MemoryStoreInner {
    /// Registered tokens.
    tokens: HashMap<Token, TokenRecord>,

    /// Issued keys per token, in issue order.
    keys: HashMap<Token, Vec<KeyRecord>>,

    /// Chain rows per token, keyed by element id.
    rows: HashMap<Token, BTreeMap<u64, ChainRow>>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryStoreInner::default()),
        }
    }

    /// Overwrite one stored row. Bypasses every check.
    ///
    /// Lets tests simulate a corrupted or forged backend.
    pub async fn overwrite_row(&self, token: &Token, row: ChainRow) {
        let mut inner = self.inner.write().await;
        inner.rows.entry(token.clone()).or_default().insert(row.id, row);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(token: &Token) -> StoreError {
    StoreError::NotFound(format!("token {}", token))
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_token(&self, record: &TokenRecord) -> Result<InsertResult> {
        let mut inner = self.inner.write().await;

        if inner.tokens.contains_key(&record.token) {
            return Ok(InsertResult::AlreadyExists);
        }

        inner.tokens.insert(record.token.clone(), record.clone());
        inner.rows.insert(record.token.clone(), BTreeMap::new());
        debug!(token = %record.token, title = %record.title, "token stored");
        Ok(InsertResult::Inserted)
    }

    async fn get_token(&self, token: &Token) -> Result<Option<TokenRecord>> {
        let inner = self.inner.read().await;
        Ok(inner.tokens.get(token).cloned())
    }

    async fn list_tokens(&self) -> Result<Vec<Token>> {
        let inner = self.inner.read().await;
        let mut tokens: Vec<Token> = inner.tokens.keys().cloned().collect();
        tokens.sort();
        Ok(tokens)
    }

    async fn insert_key(&self, record: &KeyRecord) -> Result<()> {
        let mut inner = self.inner.write().await;

        if !inner.tokens.contains_key(&record.token) {
            return Err(not_found(&record.token));
        }

        inner
            .keys
            .entry(record.token.clone())
            .or_default()
            .push(record.clone());
        Ok(())
    }

    async fn latest_key(&self, holder: &HolderId, token: &Token) -> Result<Option<KeyRecord>> {
        let inner = self.inner.read().await;
        Ok(inner.keys.get(token).and_then(|keys| {
            keys.iter()
                .filter(|k| &k.holder == holder)
                // Later issues win ties at the same position.
                .max_by(|a, b| a.id.cmp(&b.id))
                .cloned()
        }))
    }

    async fn holder_of(&self, token: &Token, key: &Key) -> Result<Option<HolderId>> {
        let inner = self.inner.read().await;
        Ok(inner.keys.get(token).and_then(|keys| {
            keys.iter()
                .rev()
                .find(|k| &k.key == key)
                .map(|k| k.holder.clone())
        }))
    }

    async fn count_rows(&self, token: &Token) -> Result<u64> {
        let inner = self.inner.read().await;
        let rows = inner.rows.get(token).ok_or_else(|| not_found(token))?;
        Ok(rows.len() as u64)
    }

    async fn load_rows(&self, token: &Token) -> Result<Vec<ChainRow>> {
        let inner = self.inner.read().await;
        let rows = inner.rows.get(token).ok_or_else(|| not_found(token))?;
        Ok(rows.values().cloned().collect())
    }

    async fn apply_change(&self, token: &Token, change: &Change, key: &Key) -> Result<()> {
        let mut inner = self.inner.write().await;
        let rows = inner.rows.get_mut(token).ok_or_else(|| not_found(token))?;

        // Check everything before touching anything. The new row must extend
        // the table without a gap, or the rows no longer load.
        let next = match rows.last_key_value() {
            Some((&last, _)) => last.checked_add(1),
            None => Some(0),
        };
        if next != Some(change.id) {
            return Err(StoreError::Conflict {
                token: token.to_string(),
                id: change.id,
            });
        }
        for (cell, id) in [
            (change.generator.is_some(), change.generator_id),
            (change.owner.is_some(), change.owner_id),
        ] {
            if cell && !rows.contains_key(&id) {
                return Err(StoreError::NotFound(format!("row {} of token {}", id, token)));
            }
        }

        rows.insert(
            change.id,
            ChainRow {
                id: change.id,
                key: key.as_str().to_owned(),
                generator: None,
                owner: None,
            },
        );
        if let Some(generator) = &change.generator {
            if let Some(row) = rows.get_mut(&change.generator_id) {
                row.generator = Some(generator.as_str().to_owned());
            }
        }
        if let Some(owner) = &change.owner {
            if let Some(row) = rows.get_mut(&change.owner_id) {
                row.owner = Some(owner.as_str().to_owned());
            }
        }

        debug!(
            token = %token,
            id = change.id,
            generator_id = change.generator_id,
            owner_id = change.owner.as_ref().map(|_| change.owner_id),
            "change applied"
        );
        Ok(())
    }
}
