//! Chain: the ordered ownership history of one token.
//!
//! Elements live in an append-only `Vec` and are addressed by position. A
//! transfer touches only the last two elements before appending a new one:
//!
//! ```text
//!   ... [i-1] -------- [i] ------------ [i+1 new]
//!        owner         generator         key
//!        = H(gen_i)    = H(i+1, T, key)
//! ```
//!
//! The generator on `i` commits to the incoming key. The owner on `i-1`
//! confirms that generator, which is why confirming a transfer needs
//! information that only exists after the following transfer.

use crate::element::{Change, ChainRow, Element};
use crate::error::CoreError;
use crate::types::{create_key, create_token, load_key, Generator, Key, Owner, Token};

/// Upper bound on the capacity reserved from a length hint.
const MAX_PREALLOC: usize = 4096;

/// An in-memory chain of ownership for one token.
///
/// Not synchronized. Callers sharing a token across tasks must serialize
/// access themselves, one exclusive holder per token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    token: Token,
    elements: Vec<Element>,
    expected_len: u64,
}

impl Chain {
    /// Create a fresh chain for `data`, held by `passphrase`.
    ///
    /// The bootstrap element at id 0 stores its own key as both generator
    /// and owner, so validation sees the same shape at every position.
    pub fn create(data: &[u8], passphrase: &str) -> Self {
        let token = create_token(data);
        let key = create_key(&token, passphrase);
        let bootstrap = Element {
            id: 0,
            generator: Some(Generator::bootstrap(&key)),
            owner: Some(Owner::bootstrap(&key)),
            key,
        };
        Self {
            token,
            elements: vec![bootstrap],
            expected_len: 1,
        }
    }

    /// Create a chain with no elements for an already computed token hash.
    ///
    /// `expected_len` only sizes the backing storage. It is never enforced.
    pub fn empty(token_hash: impl Into<String>, expected_len: u64) -> Self {
        Self::with_token(Token::from_hash(token_hash), expected_len)
    }

    /// Create a chain with no elements for `token`.
    pub fn with_token(token: Token, expected_len: u64) -> Self {
        let capacity = usize::try_from(expected_len)
            .unwrap_or(MAX_PREALLOC)
            .min(MAX_PREALLOC);
        Self {
            token,
            elements: Vec::with_capacity(capacity),
            expected_len,
        }
    }

    /// Rebuild a chain from persisted rows in ascending id order.
    pub fn from_rows<I>(token_hash: impl Into<String>, rows: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = ChainRow>,
    {
        let rows = rows.into_iter();
        let mut chain = Self::empty(token_hash, rows.size_hint().0 as u64);
        for row in rows {
            chain.push(row.id, row.key, row.generator, row.owner)?;
        }
        Ok(chain)
    }

    /// The token this chain belongs to.
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// All elements, ordered by id.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the chain has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The length hint this chain was created with.
    pub fn expected_len(&self) -> u64 {
        self.expected_len
    }

    /// Export every element as a storage row.
    pub fn rows(&self) -> Vec<ChainRow> {
        self.elements.iter().map(Element::to_row).collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Key Derivation
    // ─────────────────────────────────────────────────────────────────────────

    /// Derive the key for position `id` from a passphrase.
    ///
    /// Pure: a holder can re-derive their key from a memorized passphrase.
    pub fn key_on(&self, id: u64, passphrase: &str) -> (u64, Key) {
        (id, Key::derive(id, &self.token, passphrase))
    }

    /// Derive a key at the id of the current last element (0 when empty).
    pub fn key(&self, passphrase: &str) -> (u64, Key) {
        let id = self.elements.last().map_or(0, |e| e.id);
        self.key_on(id, passphrase)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Ownership
    // ─────────────────────────────────────────────────────────────────────────

    /// The id and key of the current presumed holder.
    pub fn get_owner(&self) -> Option<(u64, &Key)> {
        self.elements.last().map(|e| (e.id, &e.key))
    }

    /// Commit `key` as the next owner.
    ///
    /// Sets the generator on the last element, the owner on the element
    /// before it (when there is one), and appends the new element. The
    /// returned [`Change`] names exactly those cells.
    ///
    /// Rejects with [`CoreError::AlreadyBound`] when the last element already
    /// links to a successor, or when `key` is the current owner's own key.
    /// Nothing is modified on rejection.
    pub fn owned(&mut self, key: Key) -> Result<Change, CoreError> {
        let len = self.elements.len();
        let Some(prev) = self.elements.last() else {
            self.elements.push(Element::new(0, key));
            return Ok(Change::first(0));
        };

        if prev.key == key || prev.generator.as_ref().is_some_and(|g| !is_bootstrap(g, prev)) {
            return Err(CoreError::AlreadyBound { id: prev.id });
        }

        let prev_id = prev.id;
        let next_id = prev_id.checked_add(1).ok_or(CoreError::IdOverflow)?;
        let generator = Generator::derive(next_id, &self.token, &key);

        let mut owner = None;
        let mut owner_id = 0;
        if len >= 2 {
            let grandprev = &mut self.elements[len - 2];
            let confirmed = Owner::derive(&generator);
            grandprev.owner = Some(confirmed.clone());
            owner = Some(confirmed);
            owner_id = grandprev.id;
        }

        self.elements[len - 1].generator = Some(generator.clone());
        self.elements.push(Element::new(next_id, key));

        Ok(Change {
            id: next_id,
            generator: Some(generator),
            generator_id: prev_id,
            owner,
            owner_id,
        })
    }

    /// Append a persisted element verbatim.
    ///
    /// Only for rebuilding a chain from storage. No link is checked here;
    /// call [`Chain::validate`] once every row is in. The first id is taken
    /// as the base, after which ids must increase by exactly one.
    pub fn push(
        &mut self,
        id: u64,
        key: impl Into<String>,
        generator: Option<String>,
        owner: Option<String>,
    ) -> Result<(), CoreError> {
        if let Some(last) = self.elements.last() {
            let expected = last.id.checked_add(1).ok_or(CoreError::IdOverflow)?;
            if id != expected {
                return Err(CoreError::OutOfOrder { expected, got: id });
            }
        }

        self.elements.push(Element {
            id,
            key: load_key(key),
            generator: generator.map(Generator::from_hash),
            owner: owner.map(Owner::from_hash),
        });
        Ok(())
    }
}

/// A bootstrap element links to itself rather than to a successor.
fn is_bootstrap(generator: &Generator, element: &Element) -> bool {
    generator.as_str() == element.key.as_str()
}
