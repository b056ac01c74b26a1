//! Golden test vectors for cross-implementation verification.
//!
//! Every implementation of the protocol must derive identical tokens, keys,
//! generators, and owners. The expected values here are full uppercase
//! SHA3-256 hex strings.

use serde::Serialize;

use hasq_core::{Chain, ChainRow, CoreError};

/// How a vector's chain starts.
#[derive(Debug, Clone, Copy, Serialize)]
pub enum Start {
    /// `Chain::create(data, passphrase)`.
    Create(&'static str),
    /// `Chain::with_token(create_token(data), 0)`.
    Empty,
}

/// How a transfer's key is derived.
#[derive(Debug, Clone, Copy, Serialize)]
pub enum KeyStep {
    /// `chain.key(passphrase)`: position of the current last element.
    Key(&'static str),
    /// `chain.key_on(id, passphrase)`.
    KeyOn(u64, &'static str),
}

/// An expected row after all transfers.
#[derive(Debug, Clone, Serialize)]
pub struct ExpectedRow {
    pub id: u64,
    pub key: &'static str,
    pub generator: Option<&'static str>,
    pub owner: Option<&'static str>,
}

impl ExpectedRow {
    fn matches(&self, row: &ChainRow) -> bool {
        row.id == self.id
            && row.key == self.key
            && row.generator.as_deref() == self.generator
            && row.owner.as_deref() == self.owner
    }
}

/// A golden test vector.
#[derive(Debug, Clone, Serialize)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Data the token is derived from.
    pub data: &'static [u8],
    /// How the chain starts.
    pub start: Start,
    /// Keys committed with `owned`, in order.
    pub transfers: &'static [KeyStep],
    /// Expected token hash.
    pub expected_token: &'static str,
    /// Expected rows after every transfer.
    pub expected_rows: &'static [ExpectedRow],
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "bootstrap then two transfers",
            data: b"TEST_DATA",
            start: Start::Create("password"),
            transfers: &[KeyStep::Key("password1"), KeyStep::Key("password2")],
            expected_token: "844410C7F7EBB264C5A2EA699F8595A73BA11433953FF61066176D964E181CEB",
            expected_rows: &[
                ExpectedRow {
                    id: 0,
                    key: "3E49BB634F16DB9D3AADBB54EDFCD2F95F8D292F334C243FA7693C2F9DC225C8",
                    generator: Some(
                        "8E0EC86AC42602D94C8C19DBDFB152412AFD8FB2898FF619D7BE8812173FF877",
                    ),
                    owner: Some("B97B635D59EB5EA857428544E0E03E252C064DF5807A1166DAEAA33C6E814165"),
                },
                ExpectedRow {
                    id: 1,
                    key: "51A337FC5CF17B05BF81B00E8E20CCB1B3CFBBEF6E6D0C9A16E438B485A02B24",
                    generator: Some(
                        "970A12D140FA2E0103C9D09300FB44D12B5E4A8583B9D058CD279CA79A5F3C73",
                    ),
                    owner: None,
                },
                ExpectedRow {
                    id: 2,
                    key: "7670BF06CE10D18DD3E9E561669D313EDF65C83A53655E43FDF414CFF58AE36A",
                    generator: None,
                    owner: None,
                },
            ],
        },
        GoldenVector {
            name: "empty chain with four positional keys",
            data: b"parcel 42",
            start: Start::Empty,
            transfers: &[
                KeyStep::KeyOn(0, "pw0"),
                KeyStep::KeyOn(1, "pw1"),
                KeyStep::KeyOn(2, "pw2"),
                KeyStep::KeyOn(3, "pw3"),
            ],
            expected_token: "A1E7686FAE63FE25BA0CE34266C8992FA8615ABF9C04FC3B7898FF0D897C57EA",
            expected_rows: &[
                ExpectedRow {
                    id: 0,
                    key: "9A80A46221FF44BA9363FC5F630C4855737F03E0CABD4C6226B2EBBDF42ABAD4",
                    generator: Some(
                        "C74E3F6A30D6CCB437E8E2DD0263DDFBB3DA554539713D6B077E15E5E9C21337",
                    ),
                    owner: Some("E4B8EE4C6DE9F9242DD0BCB60E653AA5C4E4BFB47F9963EF3D15A3D73B52E1EE"),
                },
                ExpectedRow {
                    id: 1,
                    key: "2D0A34100ED063D1DEA3FC34ACFDB5E71386208614A1C44F6A920D57C2370208",
                    generator: Some(
                        "37B64AA5A594EF9E17AFA3EFD2C3C40B7F46DF4674BB4A2D7F74BBD5D653B2D9",
                    ),
                    owner: Some("03C22032E4946EBB0EED98D8FB226AE993D0C6125433C9F2550CF19EA83BB20D"),
                },
                ExpectedRow {
                    id: 2,
                    key: "F040B10FBC226A47EBA1AA087D32CCF581F0B8459C5A6E8E98463C7D741D37D0",
                    generator: Some(
                        "1485408157A5DDB915557E4D1C0027B7A76E559219D1767A21348E2A711103CE",
                    ),
                    owner: None,
                },
                ExpectedRow {
                    id: 3,
                    key: "DD6D73AB0FC29B84C6D4D7F99242953AA158A7922C11F9014CED4270FE574004",
                    generator: None,
                    owner: None,
                },
            ],
        },
        GoldenVector {
            name: "empty data, bootstrap only",
            data: b"",
            start: Start::Create("password"),
            transfers: &[],
            expected_token: "A7FFC6F8BF1ED76651C14756A061D662F580FF4DE43B49FA82D80A4B80F8434A",
            // Checked separately: the bootstrap repeats its key.
            expected_rows: &[],
        },
    ]
}

/// Build the chain a vector describes.
pub fn chain_from_vector(vector: &GoldenVector) -> Result<Chain, CoreError> {
    let mut chain = match vector.start {
        Start::Create(passphrase) => Chain::create(vector.data, passphrase),
        Start::Empty => Chain::with_token(hasq_core::create_token(vector.data), 0),
    };

    for step in vector.transfers {
        let (_, key) = match *step {
            KeyStep::Key(passphrase) => chain.key(passphrase),
            KeyStep::KeyOn(id, passphrase) => chain.key_on(id, passphrase),
        };
        chain.owned(key)?;
    }

    Ok(chain)
}

/// Verify all golden vectors against this implementation.
///
/// Returns `(name, matches)` for each vector. An empty `expected_rows`
/// checks only the token.
pub fn verify_all_vectors() -> Vec<(String, bool)> {
    all_vectors()
        .iter()
        .map(|v| {
            let chain = match chain_from_vector(v) {
                Ok(chain) => chain,
                Err(_) => return (v.name.to_string(), false),
            };
            let rows = chain.rows();

            let token_ok = chain.token().as_str() == v.expected_token;
            let rows_ok = v.expected_rows.is_empty()
                || (rows.len() == v.expected_rows.len()
                    && v.expected_rows.iter().zip(&rows).all(|(e, r)| e.matches(r)));

            (v.name.to_string(), token_ok && rows_ok && chain.validate())
        })
        .collect()
}

/// All vectors as pretty JSON, for sharing with other implementations.
pub fn vectors_json() -> serde_json::Result<String> {
    serde_json::to_string_pretty(&all_vectors())
}
