//! # HASQ Core
//!
//! Pure primitives for HASQ ownership chains: digests, tokens, keys, and the
//! two-step delayed-commitment transfer protocol.
//!
//! This crate contains no I/O, no storage, no networking. A [`Chain`] is a
//! plain value owned by one caller for the duration of a request.
//!
//! ## Key Types
//!
//! - [`Token`] - Identity of the thing being owned, derived once from data
//! - [`Key`] - Passphrase-derived proof of control at one chain position
//! - [`Generator`] - Forward link committing to the next owner's key
//! - [`Owner`] - Confirmation of a generator, stored one element further back
//! - [`Chain`] - Ordered sequence of [`Element`]s for one token
//! - [`Change`] - The cells a transfer touched, for persisting a delta
//!
//! ## Usage
//!
//! ```rust
//! use hasq_core::Chain;
//!
//! let mut chain = Chain::create(b"TEST_DATA", "password");
//!
//! let (_, key) = chain.key("password1");
//! let change = chain.owned(key).unwrap();
//! assert_eq!(change.id, 1);
//!
//! assert!(chain.validate());
//! ```
//!
//! ## Digests
//!
//! Every hash is SHA3-256 over the concatenated string renderings of its
//! inputs, hex-encoded in uppercase. See [`digest`] module.

pub mod chain;
pub mod digest;
pub mod element;
pub mod error;
pub mod types;
pub mod validation;

pub use chain::Chain;
pub use digest::{decode_hex, digest, encode_upper, hash, sha3_256};
pub use element::{Change, ChainRow, Element};
pub use error::{CoreError, ValidationError};
pub use types::{create_key, create_token, load_key, Generator, Key, Owner, Token};
