//! # HASQ Store
//!
//! Storage abstraction for HASQ chains. Provides a trait-based interface for
//! token, key, and chain-row persistence, with an in-memory implementation.
//!
//! ## Overview
//!
//! The protocol core only manipulates an in-memory [`hasq_core::Chain`].
//! This crate is the collaborator on the other side: it hands rows to the
//! chain in id order and writes back the [`hasq_core::Change`] a transfer
//! produced, touching exactly the cells that changed.
//!
//! ## Key Types
//!
//! - [`Store`] - The async trait for all storage operations
//! - [`StoreExt`] - Convenience methods built on [`Store`]
//! - [`MemoryStore`] - In-memory storage
//! - [`TokenRecord`], [`KeyRecord`], [`HolderId`] - What is stored beside the rows
//!
//! ## Usage
//!
//! ```rust
//! use hasq_core::create_token;
//! use hasq_store::{MemoryStore, Store, StoreExt, TokenRecord};
//!
//! # let rt = tokio::runtime::Runtime::new().unwrap();
//! # rt.block_on(async {
//! let store = MemoryStore::new();
//! let record = TokenRecord {
//!     token: create_token(b"TEST_DATA"),
//!     title: "example".into(),
//!     data: b"TEST_DATA".to_vec(),
//! };
//! store.insert_token(&record).await.unwrap();
//!
//! let mut chain = store.load_chain(&record.token).await.unwrap();
//! let (_, key) = chain.key_on(0, "password");
//! let change = chain.owned(key.clone()).unwrap();
//! store.apply_change(&record.token, &change, &key).await.unwrap();
//! # });
//! ```
//!
//! ## Design Notes
//!
//! - **Idempotent token inserts**: Inserting the same token twice returns `AlreadyExists`
//! - **Conflict detection**: Appending anywhere but the next row returns `Conflict`
//! - **No validation**: The store trusts its rows; callers validate rebuilt chains

pub mod error;
pub mod memory;
pub mod records;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use records::{HolderId, KeyRecord, TokenRecord};
pub use traits::{InsertResult, Store, StoreExt};

// Rows are defined next to the chain that produces them.
pub use hasq_core::ChainRow;
