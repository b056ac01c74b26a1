//! Store trait: the abstract interface for chain persistence.
//!
//! The protocol core never touches storage. This trait is the seam a
//! backend implements so chains can be loaded, mutated, and written back as
//! deltas.

use async_trait::async_trait;
use hasq_core::{Change, ChainRow, Chain, Key, Token};

use crate::error::Result;
use crate::records::{HolderId, KeyRecord, TokenRecord};

/// Result of inserting a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertResult {
    /// Record was inserted.
    Inserted,
    /// A record with the same identity already exists (not an error).
    AlreadyExists,
}

/// The Store trait: async interface for chain persistence.
///
/// # Design Notes
///
/// - **Rows in order**: `load_rows` returns rows by ascending id, ready for
///   [`Chain::from_rows`].
/// - **Delta writes**: `apply_change` inserts the new row and updates the
///   generator and owner cells a [`Change`] names, all or nothing.
/// - **No validation**: the store trusts its rows. Callers validate the
///   rebuilt chain.
#[async_trait]
pub trait Store: Send + Sync {
    // ─────────────────────────────────────────────────────────────────────────
    // Token Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Register a token with an empty chain.
    async fn insert_token(&self, record: &TokenRecord) -> Result<InsertResult>;

    /// Look up a registered token.
    async fn get_token(&self, token: &Token) -> Result<Option<TokenRecord>>;

    /// List every registered token.
    async fn list_tokens(&self) -> Result<Vec<Token>>;

    // ─────────────────────────────────────────────────────────────────────────
    // Key Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Record a key issued to a holder.
    async fn insert_key(&self, record: &KeyRecord) -> Result<()>;

    /// The holder's key with the highest position for a token.
    async fn latest_key(&self, holder: &HolderId, token: &Token) -> Result<Option<KeyRecord>>;

    /// Who a key on a token was issued to.
    async fn holder_of(&self, token: &Token, key: &Key) -> Result<Option<HolderId>>;

    // ─────────────────────────────────────────────────────────────────────────
    // Chain Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Number of rows stored for a token.
    async fn count_rows(&self, token: &Token) -> Result<u64>;

    /// All rows of a token, ordered by id.
    async fn load_rows(&self, token: &Token) -> Result<Vec<ChainRow>>;

    /// Persist a transfer: insert `(change.id, key)` and update the cells
    /// `change` names. `change.id` must be the next row id.
    async fn apply_change(&self, token: &Token, change: &Change, key: &Key) -> Result<()>;
}

/// Extension trait for common store patterns.
pub trait StoreExt: Store {
    /// Load the rows of a token and rebuild its chain.
    ///
    /// The chain is not validated.
    fn load_chain(
        &self,
        token: &Token,
    ) -> impl std::future::Future<Output = Result<Chain>> + Send;
}

impl<S: Store + ?Sized> StoreExt for S {
    async fn load_chain(&self, token: &Token) -> Result<Chain> {
        let rows = self.load_rows(token).await?;
        Ok(Chain::from_rows(token.as_str(), rows)?)
    }
}
