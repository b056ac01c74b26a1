//! # HASQ Testkit
//!
//! Testing utilities for HASQ chains.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known chains with expected hashes for cross-implementation verification
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Helper structs for setting up test scenarios
//!
//! ## Golden Vectors
//!
//! Golden vectors pin token, key, generator, and owner derivation:
//!
//! ```rust
//! use hasq_testkit::vectors::{all_vectors, chain_from_vector};
//!
//! for vector in all_vectors() {
//!     let chain = chain_from_vector(&vector).unwrap();
//!     println!("{}: {}", vector.name, chain.token());
//! }
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use hasq_testkit::generators::{chain_from_params, ChainParams};
//!
//! proptest! {
//!     #[test]
//!     fn built_chains_validate(params: ChainParams) {
//!         let chain = chain_from_params(&params).unwrap();
//!         prop_assert!(chain.validate());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! Quickly set up test scenarios:
//!
//! ```rust
//! use hasq_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let chain = fixture.build_chain(3).unwrap();
//! assert!(chain.validate());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_holder_fixtures, owner_passphrase, TestFixture, TestHolder};
pub use generators::{chain_from_params, linked_cells, tamper, ChainParams, LinkedCell};
pub use vectors::{all_vectors, chain_from_vector, verify_all_vectors, GoldenVector};
