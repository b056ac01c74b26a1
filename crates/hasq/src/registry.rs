//! The Registry: unified API for HASQ tokens.
//!
//! The Registry brings a [`Store`] and the protocol core together. Every
//! operation rebuilds the token's chain from storage, works on that private
//! copy, and writes back only the [`Change`] a transfer produced.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, warn};

use hasq_core::{create_token, Chain, Change, Token, ValidationError};
use hasq_store::{HolderId, InsertResult, KeyRecord, Store, StoreExt, TokenRecord};

use crate::error::{RegistryError, Result};

/// Configuration for the Registry.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Whether chains must validate before keys are issued or transfers run.
    pub validate_on_load: bool,
    /// Whether a transfer requires the holder's key to be derived for the
    /// next chain position.
    pub enforce_key_sequence: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            validate_on_load: true,
            enforce_key_sequence: true,
        }
    }
}

/// Outcome of validating a stored chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Whether every link holds.
    pub valid: bool,
    /// Id of the last element. `None` when the chain is empty.
    pub last_id: Option<u64>,
    /// Who the current key was issued to, when the chain is valid.
    pub holder: Option<HolderId>,
    /// The first broken link, when the chain is invalid.
    pub error: Option<ValidationError>,
}

/// The main Registry struct.
///
/// Provides a unified API for:
/// - Registering and looking up tokens
/// - Issuing keys to holders
/// - Transferring ownership
/// - Validating chains
pub struct Registry<S: Store> {
    /// The storage backend.
    store: Arc<S>,
    /// Configuration.
    config: RegistryConfig,
    /// One lock per token, held for a whole load → mutate → persist cycle.
    locks: Mutex<HashMap<Token, Arc<Mutex<()>>>>,
}

impl<S: Store> Registry<S> {
    /// Create a new registry over a store.
    pub fn new(store: S, config: RegistryConfig) -> Self {
        Self {
            store: Arc::new(store),
            config,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get the configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Token Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Register a token derived from `data`, with an empty chain.
    pub async fn create_token(&self, title: &str, data: &[u8]) -> Result<TokenRecord> {
        let record = TokenRecord {
            token: create_token(data),
            title: title.to_string(),
            data: data.to_vec(),
        };

        match self.store.insert_token(&record).await? {
            InsertResult::Inserted => {
                debug!(token = %record.token, title, "token created");
                Ok(record)
            }
            InsertResult::AlreadyExists => Err(RegistryError::TokenExists(record.token)),
        }
    }

    /// Look up a registered token.
    pub async fn search_token(&self, token: &Token) -> Result<TokenRecord> {
        match self.store.get_token(token).await? {
            Some(record) => {
                debug!(token = %record.token, title = %record.title, "token found");
                Ok(record)
            }
            None => {
                debug!(token = %token, "token not found");
                Err(RegistryError::TokenNotFound(token.clone()))
            }
        }
    }

    /// List every registered token.
    pub async fn list_tokens(&self) -> Result<Vec<Token>> {
        Ok(self.store.list_tokens().await?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Chain Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Rebuild a token's chain from storage.
    ///
    /// Validated when `validate_on_load` is set.
    pub async fn load_chain(&self, token: &Token) -> Result<Chain> {
        self.search_token(token).await?;
        let chain = self.store.load_chain(token).await?;

        if self.config.validate_on_load {
            if let Err(source) = chain.verify() {
                warn!(token = %token, broken_at = source.id(), "chain damaged");
                return Err(RegistryError::ChainDamaged {
                    token: token.clone(),
                    source,
                });
            }
        }

        Ok(chain)
    }

    /// Issue a key for the next chain position to `holder`.
    ///
    /// The key is derived from the passphrase and recorded so a later
    /// [`Registry::transfer`] can commit it.
    pub async fn issue_key(
        &self,
        holder: &HolderId,
        token: &Token,
        passphrase: &str,
    ) -> Result<KeyRecord> {
        // Lock entries are only created for registered tokens.
        self.search_token(token).await?;
        let _guard = self.lock_token(token).await;
        let chain = self.load_chain(token).await?;

        let next = next_position(&chain)?;
        let (id, key) = chain.key_on(next, passphrase);
        let record = KeyRecord {
            token: token.clone(),
            id,
            key,
            holder: holder.clone(),
        };
        self.store.insert_key(&record).await?;

        debug!(token = %token, holder = %holder, id, key = ?record.key, "key issued");
        Ok(record)
    }

    /// Transfer ownership of a token to the holder's latest key.
    ///
    /// Runs under the token's lock: load, check, [`Chain::owned`], then
    /// persist the returned [`Change`].
    pub async fn transfer(&self, holder: &HolderId, token: &Token) -> Result<Change> {
        self.search_token(token).await?;
        let _guard = self.lock_token(token).await;
        let mut chain = self.load_chain(token).await?;

        let record = self
            .store
            .latest_key(holder, token)
            .await?
            .ok_or_else(|| RegistryError::KeyNotFound {
                holder: holder.clone(),
                token: token.clone(),
            })?;

        if let Some((_, key)) = chain.get_owner() {
            if *key == record.key {
                return Err(RegistryError::AlreadyOwner(holder.clone()));
            }
        }

        if self.config.enforce_key_sequence {
            let expected = next_position(&chain)?;
            if record.id != expected {
                return Err(RegistryError::KeyOutOfSequence {
                    expected,
                    got: record.id,
                });
            }
        }

        let change = chain.owned(record.key.clone())?;
        self.store.apply_change(token, &change, &record.key).await?;

        info!(
            token = %token,
            holder = %holder,
            id = change.id,
            finalized_owner = change.has_owner(),
            "ownership transferred"
        );
        Ok(change)
    }

    /// Validate a token's chain and report its current holder.
    ///
    /// A broken chain is reported, not returned as an error.
    pub async fn validate(&self, token: &Token) -> Result<ValidationReport> {
        self.search_token(token).await?;
        let chain = self.store.load_chain(token).await?;

        let last_id = chain.get_owner().map(|(id, _)| id);
        let report = match chain.verify() {
            Ok(()) => {
                let holder = match chain.get_owner() {
                    Some((_, key)) => self.store.holder_of(token, key).await?,
                    None => None,
                };
                ValidationReport {
                    valid: true,
                    last_id,
                    holder,
                    error: None,
                }
            }
            Err(error) => {
                warn!(token = %token, broken_at = error.id(), "validation failed");
                ValidationReport {
                    valid: false,
                    last_id,
                    holder: None,
                    error: Some(error),
                }
            }
        };

        debug!(token = %token, valid = report.valid, ?last_id, "chain validated");
        Ok(report)
    }

    /// Take the exclusive lock for one token.
    async fn lock_token(&self, token: &Token) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            Arc::clone(locks.entry(token.clone()).or_default())
        };
        lock.lock_owned().await
    }
}

/// The position the next transfer will append at.
fn next_position(chain: &Chain) -> Result<u64> {
    match chain.get_owner() {
        Some((id, _)) => id
            .checked_add(1)
            .ok_or(RegistryError::Core(hasq_core::CoreError::IdOverflow)),
        None => Ok(0),
    }
}
