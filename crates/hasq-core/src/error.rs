//! Error types for HASQ Core.

use thiserror::Error;

/// Core errors that can occur while building or mutating a chain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid hex encoding: {0}")]
    InvalidEncoding(String),

    #[error("out of order element: expected id {expected}, got {got}")]
    OutOfOrder { expected: u64, got: u64 },

    #[error("element {id} is already bound to a successor")]
    AlreadyBound { id: u64 },

    #[error("element id space exhausted")]
    IdOverflow,
}

impl From<hex::FromHexError> for CoreError {
    fn from(e: hex::FromHexError) -> Self {
        CoreError::InvalidEncoding(e.to_string())
    }
}

/// The first broken link found while walking a chain backwards.
///
/// `id` is always the id of the element whose stored value did not match.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("generator mismatch on element {id}")]
    GeneratorMismatch { id: u64 },

    #[error("element {id} has no generator")]
    MissingGenerator { id: u64 },

    #[error("owner mismatch on element {id}")]
    OwnerMismatch { id: u64 },

    #[error("element {id} has no owner")]
    MissingOwner { id: u64 },
}

impl ValidationError {
    /// The id of the element holding the broken link.
    pub fn id(&self) -> u64 {
        match self {
            ValidationError::GeneratorMismatch { id }
            | ValidationError::MissingGenerator { id }
            | ValidationError::OwnerMismatch { id }
            | ValidationError::MissingOwner { id } => *id,
        }
    }
}
