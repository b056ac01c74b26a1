//! Chain validation: recompute every link walking backwards from the tail.

use crate::chain::Chain;
use crate::error::ValidationError;
use crate::types::{Generator, Owner};

/// Validate every link of a chain, reporting the first broken one.
///
/// For each element `curr` at index `i >= 1` with predecessor `prev`:
/// - `prev.generator` must equal `hash(curr.id, token, curr.key)`
/// - if `curr.generator` is set, `prev.owner` must equal `hash(curr.generator)`
///
/// The owner check runs from `i = 1` on. The element it reads always exists,
/// and a generator on `curr` is only ever written together with the owner on
/// `prev`. Empty and single-element chains are valid.
pub fn validate_chain(chain: &Chain) -> Result<(), ValidationError> {
    let elements = chain.elements();

    for i in (1..elements.len()).rev() {
        let curr = &elements[i];
        let prev = &elements[i - 1];

        let expected = Generator::derive(curr.id, chain.token(), &curr.key);
        match &prev.generator {
            None => return Err(ValidationError::MissingGenerator { id: prev.id }),
            Some(generator) if *generator != expected => {
                return Err(ValidationError::GeneratorMismatch { id: prev.id })
            }
            Some(_) => {}
        }

        if let Some(generator) = &curr.generator {
            let expected = Owner::derive(generator);
            match &prev.owner {
                None => return Err(ValidationError::MissingOwner { id: prev.id }),
                Some(owner) if *owner != expected => {
                    return Err(ValidationError::OwnerMismatch { id: prev.id })
                }
                Some(_) => {}
            }
        }
    }

    Ok(())
}

impl Chain {
    /// Check every link, reporting the first broken one from the tail.
    pub fn verify(&self) -> Result<(), ValidationError> {
        validate_chain(self)
    }

    /// Whether every link in the chain holds.
    ///
    /// A `false` result is not an error: the caller decides whether a broken
    /// chain is fatal.
    pub fn validate(&self) -> bool {
        self.verify().is_ok()
    }
}
