//! # HASQ
//!
//! The unified API for HASQ ownership chains: register tokens, issue keys,
//! transfer ownership, and validate chains kept in a [`store::Store`].
//!
//! ## Overview
//!
//! A token's history is a hash chain. Every transfer links the previous
//! holder's record to the next holder's key (a *generator*) and confirms the
//! link before that one (an *owner*). Nobody can forge a successor without
//! the cooperation of the holders that follow.
//!
//! The [`Registry`] runs each request as load → mutate or validate →
//! persist the delta, holding one lock per token so transfers on the same
//! token never interleave.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hasq::{Registry, RegistryConfig};
//! use hasq::store::{HolderId, MemoryStore};
//!
//! async fn example() {
//!     let registry = Registry::new(MemoryStore::new(), RegistryConfig::default());
//!
//!     let record = registry.create_token("deed", b"parcel 42").await.unwrap();
//!
//!     let alice = HolderId::from("alice");
//!     registry.issue_key(&alice, &record.token, "alice-secret").await.unwrap();
//!     registry.transfer(&alice, &record.token).await.unwrap();
//!
//!     let report = registry.validate(&record.token).await.unwrap();
//!     assert!(report.valid);
//!     assert_eq!(report.holder, Some(alice));
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `hasq::core` - Protocol primitives (Chain, Token, Key, Change, ...)
//! - `hasq::store` - Storage abstraction and in-memory store

pub mod error;
pub mod registry;

// Re-export component crates
pub use hasq_core as core;
pub use hasq_store as store;

// Re-export main types for convenience
pub use error::{RegistryError, Result};
pub use registry::{Registry, RegistryConfig, ValidationReport};

// Re-export commonly used core types
pub use hasq_core::{create_key, create_token, load_key, Chain, Change, Key, Token};
