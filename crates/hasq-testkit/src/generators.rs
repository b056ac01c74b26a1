//! Proptest generators for property-based testing.

use proptest::prelude::*;

use hasq_core::{create_token, encode_upper, sha3_256, Chain, ChainRow, CoreError, Token};

/// Generate token data of at most `max_len` bytes.
pub fn token_data(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Generate a passphrase.
pub fn passphrase() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9]{1,24}".prop_map(String::from)
}

/// Generate a random Token.
pub fn token() -> impl Strategy<Value = Token> {
    any::<[u8; 32]>().prop_map(|bytes| Token::from_hash(encode_upper(&bytes)))
}

/// Generate a position on a chain.
pub fn position() -> impl Strategy<Value = u64> {
    0u64..=1_000_000
}

/// Parameters for building a chain.
#[derive(Debug, Clone)]
pub struct ChainParams {
    pub data: Vec<u8>,
    /// `Some` starts with `Chain::create`, `None` with an empty chain.
    pub bootstrap: Option<String>,
    /// One passphrase per transfer, pairwise distinct.
    pub passphrases: Vec<String>,
}

impl Arbitrary for ChainParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            token_data(256),
            any::<bool>(),
            // A sorted set keeps generation reproducible and passphrases distinct.
            prop::collection::btree_set("[a-z0-9]{1,16}", 0..12),
        )
            .prop_map(|(data, bootstrap, passphrases)| ChainParams {
                data,
                // '#' never appears in transfer passphrases.
                bootstrap: bootstrap.then(|| "#bootstrap".to_string()),
                passphrases: passphrases.into_iter().collect(),
            })
            .boxed()
    }
}

/// Build the chain `params` describes, committing each passphrase's key at
/// the current position.
pub fn chain_from_params(params: &ChainParams) -> Result<Chain, CoreError> {
    let mut chain = match &params.bootstrap {
        Some(passphrase) => Chain::create(&params.data, passphrase),
        None => Chain::with_token(create_token(&params.data), 0),
    };

    for passphrase in &params.passphrases {
        let (_, key) = chain.key(passphrase);
        chain.owned(key)?;
    }

    Ok(chain)
}

/// A cell of a stored row that some link constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkedCell {
    Key(usize),
    Generator(usize),
    Owner(usize),
}

/// Every cell of a chain of `len` elements that validation depends on.
///
/// Keys from index 1, generators up to the second to last element, and
/// owners up to the third to last.
pub fn linked_cells(len: usize) -> Vec<LinkedCell> {
    let mut cells = Vec::new();
    cells.extend((1..len).map(LinkedCell::Key));
    cells.extend((0..len.saturating_sub(1)).map(LinkedCell::Generator));
    cells.extend((0..len.saturating_sub(2)).map(LinkedCell::Owner));
    cells
}

/// Replace one cell of `rows` with an unrelated hash.
pub fn tamper(rows: &mut [ChainRow], cell: LinkedCell) {
    let forge = |old: &str| encode_upper(&sha3_256(format!("forged:{}", old).as_bytes()));

    match cell {
        LinkedCell::Key(i) => rows[i].key = forge(&rows[i].key),
        LinkedCell::Generator(i) => {
            rows[i].generator = Some(forge(rows[i].generator.as_deref().unwrap_or_default()))
        }
        LinkedCell::Owner(i) => {
            rows[i].owner = Some(forge(rows[i].owner.as_deref().unwrap_or_default()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hasq_core::Key;

    proptest! {
        #[test]
        fn test_create_token_deterministic(data in token_data(512)) {
            prop_assert_eq!(create_token(&data), create_token(&data));
        }

        #[test]
        fn test_create_token_distinct(a in token_data(64), b in token_data(64)) {
            prop_assume!(a != b);
            prop_assert_ne!(create_token(&a), create_token(&b));
        }

        #[test]
        fn test_key_on_deterministic(token in token(), id in position(), pass in passphrase()) {
            let chain = Chain::with_token(token, 0);
            prop_assert_eq!(chain.key_on(id, &pass), chain.key_on(id, &pass));
        }

        #[test]
        fn test_key_on_depends_on_position(token in token(), id in position(), pass in passphrase()) {
            let chain = Chain::with_token(token, 0);
            let (_, here): (u64, Key) = chain.key_on(id, &pass);
            let (_, next) = chain.key_on(id + 1, &pass);
            prop_assert_ne!(here, next);
        }

        #[test]
        fn test_built_chain_validates(params: ChainParams) {
            let chain = chain_from_params(&params).unwrap();
            prop_assert!(chain.validate());
        }

        #[test]
        fn test_rows_roundtrip_preserves_validity_and_owner(params: ChainParams) {
            let chain = chain_from_params(&params).unwrap();
            let rebuilt = Chain::from_rows(chain.token().as_str(), chain.rows()).unwrap();

            prop_assert!(rebuilt.validate());
            prop_assert_eq!(rebuilt.get_owner(), chain.get_owner());
        }

        #[test]
        fn test_tampered_linked_cell_detected(params in any::<ChainParams>(), pick in any::<prop::sample::Index>()) {
            let chain = chain_from_params(&params).unwrap();
            let cells = linked_cells(chain.len());
            prop_assume!(!cells.is_empty());

            let cell = cells[pick.index(cells.len())];
            let mut rows = chain.rows();
            tamper(&mut rows, cell);

            let forged = Chain::from_rows(chain.token().as_str(), rows).unwrap();
            prop_assert!(!forged.validate(), "tampering {:?} went unnoticed", cell);
        }
    }

    #[test]
    fn test_linked_cells_small_chains() {
        assert!(linked_cells(0).is_empty());
        assert!(linked_cells(1).is_empty());
        assert_eq!(
            linked_cells(2),
            vec![LinkedCell::Key(1), LinkedCell::Generator(0)]
        );
        assert_eq!(linked_cells(3).len(), 5);
    }
}
