//! Error types for the store module.

use hasq_core::CoreError;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Token, key, or chain row not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// A change does not append at the next free row.
    #[error("conflict on token {token}: row {id} is not the next row")]
    Conflict { token: String, id: u64 },

    /// Stored rows could not be turned back into a chain.
    #[error("invalid data: {0}")]
    Core(#[from] CoreError),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
