//! Golden test vectors for cross-implementation verification.
//!
//! Every implementation of HASQ must derive identical:
//! - token hashes
//! - keys
//! - generators
//! - owners

use hasq::core::{create_token, Chain, ChainRow};
use hasq_testkit::vectors::{all_vectors, chain_from_vector, vectors_json, verify_all_vectors};

#[test]
fn test_vectors_verify() {
    let results = verify_all_vectors();
    assert_eq!(results.len(), all_vectors().len());

    for (name, ok) in results {
        assert!(ok, "golden vector mismatch for {}", name);
    }
}

#[test]
fn test_two_transfers_step_by_step() {
    let mut chain = Chain::create(b"TEST_DATA", "password");
    assert_eq!(
        chain.token().as_str(),
        "844410C7F7EBB264C5A2EA699F8595A73BA11433953FF61066176D964E181CEB"
    );

    let (id, key1) = chain.key("password1");
    assert_eq!(id, 0);
    let change1 = chain.owned(key1).unwrap();
    assert_eq!(change1.id, 1);
    assert_eq!(change1.generator_id, 0);
    assert!(!change1.has_owner());
    assert_eq!(
        change1.generator.as_ref().map(|g| g.as_str()),
        Some("8E0EC86AC42602D94C8C19DBDFB152412AFD8FB2898FF619D7BE8812173FF877")
    );

    let (id, key2) = chain.key("password2");
    assert_eq!(id, 1);
    let change2 = chain.owned(key2).unwrap();
    assert_eq!(change2.id, 2);
    assert_eq!(change2.owner_id, 0);
    assert_eq!(
        change2.owner.as_ref().map(|o| o.as_str()),
        Some("B97B635D59EB5EA857428544E0E03E252C064DF5807A1166DAEAA33C6E814165")
    );

    assert!(chain.validate());
    let (owner_id, owner_key) = chain.get_owner().unwrap();
    assert_eq!(owner_id, 2);
    assert_eq!(
        owner_key.as_str(),
        "7670BF06CE10D18DD3E9E561669D313EDF65C83A53655E43FDF414CFF58AE36A"
    );
}

#[test]
fn test_vectors_rebuild_from_rows() {
    for vector in all_vectors() {
        let chain = chain_from_vector(&vector).unwrap();
        let rows: Vec<ChainRow> = chain.rows();
        let rebuilt = Chain::from_rows(vector.expected_token, rows).unwrap();

        assert_eq!(rebuilt.token(), chain.token());
        assert_eq!(rebuilt.rows(), chain.rows(), "rebuild mismatch for {}", vector.name);
        assert!(rebuilt.validate(), "rebuilt chain invalid for {}", vector.name);
    }
}

#[test]
fn test_empty_data_token() {
    assert_eq!(
        create_token(b"").as_str(),
        "A7FFC6F8BF1ED76651C14756A061D662F580FF4DE43B49FA82D80A4B80F8434A"
    );
}

#[test]
fn print_golden_vectors_json() {
    let json = vectors_json().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(
        parsed.as_array().map(Vec::len),
        Some(all_vectors().len())
    );
    println!("{}", json);
}

// =============================================================================
// REJECTION TEST VECTORS
// These test that invalid inputs are properly rejected.
// =============================================================================

#[test]
fn test_reject_out_of_order_rows() {
    let chain = chain_from_vector(&all_vectors()[1]).unwrap();
    let mut rows = chain.rows();
    rows.swap(1, 2);

    assert!(matches!(
        Chain::from_rows(chain.token().as_str(), rows),
        Err(hasq::core::CoreError::OutOfOrder { expected: 1, got: 2 })
    ));
}

#[test]
fn test_reject_rebinding_the_owner_key() {
    let mut chain = chain_from_vector(&all_vectors()[0]).unwrap();
    let (_, owner_key) = chain.get_owner().unwrap();
    let owner_key = owner_key.clone();

    assert!(matches!(
        chain.owned(owner_key),
        Err(hasq::core::CoreError::AlreadyBound { id: 2 })
    ));
    assert!(chain.validate());
}
