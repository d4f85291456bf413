// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tests for the event categorizer: batch validation, the closed-world
//! referential check, checkpoint behavior, and the idempotency boundary.

mod helpers;

use chainfeed::errors::CategorizeError;
use chainfeed::{Categorizer, SmartcontractStore};

use helpers::{contract, key, record, store};

fn categorizer(
    s: &std::sync::Arc<chainfeed::MemoryStore>,
) -> Categorizer<chainfeed::MemoryStore, chainfeed::MemoryStore> {
    Categorizer::new(s.clone(), s.clone())
}

#[tokio::test]
async fn test_empty_contract_batch_fails() {
    let store = store();
    let categorizer = categorizer(&store);

    let result = categorizer.categorize(&[], &[]).await;
    assert!(matches!(result, Err(CategorizeError::EmptyBatch)));
}

#[tokio::test]
async fn test_invalid_contract_fails_whole_batch() {
    let store = store();
    let categorizer = categorizer(&store);
    let a = key("1", "0xaaaa");

    let mut bad = contract(&a, 10, 100);
    bad.deployer.clear();

    let result = categorizer.categorize(&[bad], &[]).await;
    assert!(matches!(
        result,
        Err(CategorizeError::InvalidSmartcontract { .. })
    ));
    assert!(
        store.get(&a).await.is_err(),
        "nothing may be persisted on validation failure"
    );
}

#[tokio::test]
async fn test_invalid_log_fails_whole_batch() {
    let store = store();
    let categorizer = categorizer(&store);
    let a = key("1", "0xaaaa");

    let mut unnamed = record(&a, "0xt1", 0, 10, 100);
    unnamed.name.clear();

    let result = categorizer
        .categorize(&[contract(&a, 10, 100)], &[unnamed])
        .await;
    assert!(matches!(result, Err(CategorizeError::InvalidLog { .. })));
}

#[tokio::test]
async fn test_referential_check_is_closed_world() {
    let store = store();
    let categorizer = categorizer(&store);
    let a = key("1", "0xaaaa");
    let b = key("1", "0xbbbb");

    // Track contract B in an earlier call; it must not satisfy the check.
    categorizer
        .categorize(&[contract(&b, 5, 50)], &[])
        .await
        .unwrap();

    let result = categorizer
        .categorize(&[contract(&a, 10, 100)], &[record(&b, "0xt1", 0, 10, 100)])
        .await;
    assert!(matches!(
        result,
        Err(CategorizeError::UnknownSmartcontract { .. })
    ));
}

#[tokio::test]
async fn test_successful_batch_persists_logs_and_checkpoint() {
    let store = store();
    let categorizer = categorizer(&store);
    let a = key("1", "0xaaaa");

    categorizer
        .categorize(
            &[contract(&a, 20, 200)],
            &[
                record(&a, "0xt1", 0, 19, 190),
                record(&a, "0xt1", 1, 19, 190),
            ],
        )
        .await
        .unwrap();

    assert_eq!(store.record_count().await, 2);
    let tracked = categorizer.get(&a).await.unwrap();
    assert_eq!(tracked.checkpoint.number, 20);
}

#[tokio::test]
async fn test_duplicate_identity_across_calls_conflicts_without_duplicate_row() {
    let store = store();
    let categorizer = categorizer(&store);
    let a = key("1", "0xaaaa");

    let batch = [record(&a, "0xt1", 3, 10, 100)];
    categorizer
        .categorize(&[contract(&a, 10, 100)], &batch)
        .await
        .unwrap();

    let result = categorizer
        .categorize(&[contract(&a, 10, 100)], &batch)
        .await;
    match result {
        Err(CategorizeError::Storage(e)) => assert!(e.is_conflict()),
        other => panic!("expected a conflict, got {other:?}"),
    }
    assert_eq!(store.record_count().await, 1, "no duplicate row may exist");
}

#[tokio::test]
async fn test_duplicate_identity_differs_only_in_address_case() {
    let store = store();
    let categorizer = categorizer(&store);
    let lower = key("1", "0xaaaa");
    let upper = key("1", "0xAAAA");

    categorizer
        .categorize(&[contract(&lower, 10, 100)], &[record(&lower, "0xt1", 0, 10, 100)])
        .await
        .unwrap();

    let result = categorizer
        .categorize(&[contract(&upper, 10, 100)], &[record(&upper, "0xt1", 0, 10, 100)])
        .await;
    assert!(
        matches!(result, Err(CategorizeError::Storage(e)) if e.is_conflict()),
        "identity comparison must be case-insensitive on the address"
    );
}

#[tokio::test]
async fn test_checkpoint_never_moves_backward() {
    let store = store();
    let categorizer = categorizer(&store);
    let a = key("1", "0xaaaa");

    categorizer
        .categorize(&[contract(&a, 30, 300)], &[])
        .await
        .unwrap();

    // A redelivered batch with an older checkpoint succeeds but does not
    // rewind progress.
    categorizer
        .categorize(&[contract(&a, 20, 200)], &[record(&a, "0xt9", 0, 20, 200)])
        .await
        .unwrap();

    let tracked = categorizer.get(&a).await.unwrap();
    assert_eq!(tracked.checkpoint.number, 30);
}

#[tokio::test]
async fn test_read_companions() {
    let store = store();
    let categorizer = categorizer(&store);
    let a = key("eth", "0xaaaa");
    let b = key("imx", "0xbbbb");

    categorizer
        .categorize(&[contract(&a, 10, 100), contract(&b, 20, 200)], &[])
        .await
        .unwrap();

    assert_eq!(categorizer.all().await.unwrap().len(), 2);
    let imx = categorizer.all_by_network_id("imx").await.unwrap();
    assert_eq!(imx.len(), 1);
    assert_eq!(imx[0].key, b);
    assert!(categorizer.get(&key("eth", "0xmissing")).await.is_err());
}
