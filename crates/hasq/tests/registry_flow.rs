//! End-to-end registry flows over the in-memory store.

use std::sync::Arc;

use anyhow::Result;
use hasq::core::ValidationError;
use hasq::store::{ChainRow, HolderId, MemoryStore, Store};
use hasq::{Registry, RegistryConfig, RegistryError};
use hasq_testkit::fixtures::multi_holder_fixtures;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn registry() -> Registry<MemoryStore> {
    Registry::new(MemoryStore::new(), RegistryConfig::default())
}

#[tokio::test]
async fn test_ownership_passes_along_holders() -> Result<()> {
    init_tracing();
    let registry = registry();
    let record = registry.create_token("deed", b"parcel 42").await?;
    let holders = multi_holder_fixtures(4);

    for (n, holder) in holders.iter().enumerate() {
        let key = registry
            .issue_key(&holder.id, &record.token, &holder.passphrase)
            .await?;
        assert_eq!(key.id, n as u64);

        let change = registry.transfer(&holder.id, &record.token).await?;
        assert_eq!(change.id, n as u64);
        assert_eq!(change.has_owner(), n >= 2);

        let report = registry.validate(&record.token).await?;
        assert!(report.valid);
        assert_eq!(report.last_id, Some(n as u64));
        assert_eq!(report.holder.as_ref(), Some(&holder.id));
    }

    assert_eq!(registry.store().count_rows(&record.token).await?, 4);
    Ok(())
}

#[tokio::test]
async fn test_previous_holder_cannot_take_back() -> Result<()> {
    init_tracing();
    let registry = registry();
    let record = registry.create_token("deed", b"TEST_DATA").await?;
    let alice = HolderId::from("alice");
    let bob = HolderId::from("bob");

    registry.issue_key(&alice, &record.token, "alice-1").await?;
    registry.transfer(&alice, &record.token).await?;
    registry.issue_key(&bob, &record.token, "bob-1").await?;
    registry.transfer(&bob, &record.token).await?;

    // Alice's latest key was consumed at position 0.
    let err = registry.transfer(&alice, &record.token).await.unwrap_err();
    assert!(matches!(
        err,
        RegistryError::KeyOutOfSequence {
            expected: 2,
            got: 0
        }
    ));

    // Bob already holds the token.
    let err = registry.transfer(&bob, &record.token).await.unwrap_err();
    assert!(matches!(err, RegistryError::AlreadyOwner(ref h) if *h == bob));

    let report = registry.validate(&record.token).await?;
    assert_eq!(report.holder, Some(bob));
    Ok(())
}

#[tokio::test]
async fn test_concurrent_transfers_keep_chain_valid() -> Result<()> {
    init_tracing();
    let registry = Arc::new(registry());
    let record = registry.create_token("contested", b"contested data").await?;
    let holders = multi_holder_fixtures(8);

    let mut tasks = Vec::new();
    for holder in holders.clone() {
        let registry = Arc::clone(&registry);
        let token = record.token.clone();
        tasks.push(tokio::spawn(async move {
            // Someone else may move the chain between issue and transfer.
            loop {
                registry
                    .issue_key(&holder.id, &token, &holder.passphrase)
                    .await?;
                match registry.transfer(&holder.id, &token).await {
                    Ok(change) => return Ok::<u64, RegistryError>(change.id),
                    Err(RegistryError::KeyOutOfSequence { .. }) => continue,
                    Err(e) => return Err(e),
                }
            }
        }));
    }

    let mut ids = Vec::new();
    for task in tasks {
        ids.push(task.await??);
    }
    ids.sort_unstable();
    assert_eq!(ids, (0..holders.len() as u64).collect::<Vec<_>>());

    let chain = registry.load_chain(&record.token).await?;
    assert_eq!(chain.len(), holders.len());
    assert!(chain.validate());
    Ok(())
}

#[tokio::test]
async fn test_tampered_store_is_detected() -> Result<()> {
    init_tracing();
    let registry = registry();
    let record = registry.create_token("deed", b"tamper me").await?;
    let holders = multi_holder_fixtures(3);
    for holder in &holders {
        registry
            .issue_key(&holder.id, &record.token, &holder.passphrase)
            .await?;
        registry.transfer(&holder.id, &record.token).await?;
    }

    // Swap in a key nobody was issued.
    let rows = registry.store().load_rows(&record.token).await?;
    let forged = hasq::create_key(&record.token, "mallory");
    registry
        .store()
        .overwrite_row(
            &record.token,
            ChainRow {
                key: forged.as_str().to_owned(),
                ..rows[2].clone()
            },
        )
        .await;

    let report = registry.validate(&record.token).await?;
    assert!(!report.valid);
    assert_eq!(report.holder, None);
    assert_eq!(report.last_id, Some(2));
    assert_eq!(
        report.error,
        Some(ValidationError::GeneratorMismatch { id: 1 })
    );

    // Mutations refuse to build on a damaged chain.
    let mallory = HolderId::from("mallory");
    let err = registry
        .issue_key(&mallory, &record.token, "mallory")
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::ChainDamaged { .. }));
    let err = registry.transfer(&holders[0].id, &record.token).await.unwrap_err();
    assert!(matches!(err, RegistryError::ChainDamaged { .. }));
    Ok(())
}

#[tokio::test]
async fn test_unknown_token() -> Result<()> {
    init_tracing();
    let registry = registry();
    let token = hasq::create_token(b"never registered");

    assert!(matches!(
        registry.validate(&token).await,
        Err(RegistryError::TokenNotFound(_))
    ));
    assert!(matches!(
        registry.issue_key(&HolderId::from("alice"), &token, "pw").await,
        Err(RegistryError::TokenNotFound(_))
    ));
    assert!(registry.list_tokens().await?.is_empty());
    Ok(())
}
