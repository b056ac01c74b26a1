//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use rand::distributions::Alphanumeric;
use rand::{Rng, RngCore};

use hasq_core::{Chain, CoreError, Token};
use hasq_store::{HolderId, MemoryStore, Store, StoreError, TokenRecord};

/// A test fixture with random token data and a memory store.
pub struct TestFixture {
    pub data: Vec<u8>,
    pub store: MemoryStore,
}

impl TestFixture {
    /// Create a new test fixture with 32 random bytes of token data.
    pub fn new() -> Self {
        let mut data = vec![0u8; 32];
        rand::thread_rng().fill_bytes(&mut data);
        Self::with_data(data)
    }

    /// Create with fixed token data.
    pub fn with_data(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            store: MemoryStore::new(),
        }
    }

    /// The token of the fixture's data.
    pub fn token(&self) -> Token {
        hasq_core::create_token(&self.data)
    }

    /// Build a chain of `transfers` owners on an initially empty chain.
    ///
    /// Owner `n` uses passphrase `"owner-{n}"`.
    pub fn build_chain(&self, transfers: usize) -> Result<Chain, CoreError> {
        let mut chain = Chain::with_token(self.token(), transfers as u64);
        for n in 0..transfers {
            let (_, key) = chain.key(&owner_passphrase(n));
            chain.owned(key)?;
        }
        Ok(chain)
    }

    /// Register the fixture's token and write every row of `chain`.
    pub async fn persist(&self, chain: &Chain) -> Result<TokenRecord, StoreError> {
        let record = TokenRecord {
            token: chain.token().clone(),
            title: "fixture".to_string(),
            data: self.data.clone(),
        };
        self.store.insert_token(&record).await?;
        for row in chain.rows() {
            self.store.overwrite_row(&record.token, row).await;
        }
        Ok(record)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// The passphrase [`TestFixture::build_chain`] uses for owner `n`.
pub fn owner_passphrase(n: usize) -> String {
    format!("owner-{}", n)
}

/// A holder with a random passphrase.
#[derive(Debug, Clone)]
pub struct TestHolder {
    pub id: HolderId,
    pub passphrase: String,
}

/// Create `count` holders named `holder-0`, `holder-1`, ... for multi-party
/// tests.
pub fn multi_holder_fixtures(count: usize) -> Vec<TestHolder> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| TestHolder {
            id: HolderId::new(format!("holder-{}", i)),
            passphrase: (&mut rng)
                .sample_iter(&Alphanumeric)
                .take(20)
                .map(char::from)
                .collect(),
        })
        .collect()
}
