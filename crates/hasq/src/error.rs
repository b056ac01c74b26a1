//! Error types for the Registry.

use hasq_core::{CoreError, Token, ValidationError};
use hasq_store::{HolderId, StoreError};
use thiserror::Error;

/// Errors that can occur during Registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Protocol error.
    #[error("chain error: {0}")]
    Core(#[from] CoreError),

    /// Token already registered.
    #[error("token already exists: {0:?}")]
    TokenExists(Token),

    /// Token not registered.
    #[error("token not found: {0:?}")]
    TokenNotFound(Token),

    /// The holder has no key for this token.
    #[error("no key issued to {holder} for token {token:?}")]
    KeyNotFound { holder: HolderId, token: Token },

    /// The holder already owns the token.
    #[error("token already owned by {0}")]
    AlreadyOwner(HolderId),

    /// The holder's latest key was derived for a different position.
    #[error("key derived for position {got}, next position is {expected}")]
    KeyOutOfSequence { expected: u64, got: u64 },

    /// The stored chain failed validation.
    #[error("chain of token {token:?} is damaged: {source}")]
    ChainDamaged {
        token: Token,
        #[source]
        source: ValidationError,
    },
}

/// Result type for Registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
