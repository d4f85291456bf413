// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end tests for the wire command surface: name registry, numeric
//! coercion at the boundary, and error-to-reason-string mapping.

mod helpers;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use chainfeed::errors::StorageError;
use chainfeed::{
    CommandHandler, FeedHandle, KeyResolver, MemoryStore, SmartcontractKey, SmartcontractStore,
    SyncConfig, TopicFilter,
};

use helpers::{store, ScriptedAdapter};

/// Resolves a filter's `network_ids` dimension against the tracked set.
struct NetworkResolver {
    store: Arc<MemoryStore>,
}

#[async_trait]
impl KeyResolver for NetworkResolver {
    async fn resolve(&self, filter: &TopicFilter) -> Result<Vec<SmartcontractKey>, StorageError> {
        let mut keys = Vec::new();
        if filter.network_ids.is_empty() {
            for record in self.store.all().await? {
                keys.push(record.key);
            }
        } else {
            for network_id in &filter.network_ids {
                for record in self.store.all_by_network_id(network_id).await? {
                    keys.push(record.key);
                }
            }
        }
        Ok(keys)
    }
}

fn gateway(store: &Arc<MemoryStore>) -> FeedHandle {
    CommandHandler::init(
        Arc::new(ScriptedAdapter::new("imx", 1)),
        SyncConfig::default(),
        store.clone(),
        store.clone(),
        Arc::new(NetworkResolver {
            store: store.clone(),
        }),
    )
}

fn contract_payload(address: &str, checkpoint_number: u64, checkpoint_timestamp: u64) -> serde_json::Value {
    json!({
        "network_id": "imx",
        "address": address,
        // Numeric strings must be accepted everywhere a number is expected.
        "checkpoint_number": checkpoint_number.to_string(),
        "checkpoint_timestamp": checkpoint_timestamp,
        "deployer": "0xdeployer",
        "transaction_id": "0xdeploytx",
        "transaction_index": 0,
    })
}

fn log_payload(address: &str, tx_id: &str, log_index: u64, timestamp: u64) -> serde_json::Value {
    json!({
        "network_id": "imx",
        "address": address,
        "transaction_id": tx_id,
        "transaction_index": "0",
        "block_number": 10,
        "block_timestamp": timestamp,
        "log_index": log_index,
        "name": "Transfer",
        "parameters": { "value": "1000" },
    })
}

#[tokio::test]
async fn test_unknown_command_is_rejected() {
    let handle = gateway(&store());
    let result = handle.request("no_such_command", json!({})).await;
    assert!(result.unwrap_err().contains("unknown command"));
}

#[tokio::test]
async fn test_malformed_payload_is_rejected() {
    let handle = gateway(&store());
    let result = handle.request("snapshot_get", json!("not a dictionary")).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_smartcontract_set_and_get_round_trip() {
    let handle = gateway(&store());

    let reply = handle
        .request("smartcontract_set", contract_payload("0xaaaa", 10, 100))
        .await
        .unwrap();
    assert_eq!(reply, json!({}), "set replies empty on success");

    let reply = handle
        .request(
            "smartcontract_get",
            json!({ "network_id": "imx", "address": "0xAAAA" }),
        )
        .await
        .unwrap();
    assert_eq!(reply["smartcontract"]["address"], json!("0xaaaa"));
    assert_eq!(reply["smartcontract"]["checkpoint_number"], json!(10));

    let duplicate = handle
        .request("smartcontract_set", contract_payload("0xAAAA", 10, 100))
        .await;
    assert!(duplicate.unwrap_err().contains("duplicate"));
}

#[tokio::test]
async fn test_categorize_then_snapshot_over_the_wire() {
    let handle = gateway(&store());

    handle
        .request(
            "categorize",
            json!({
                "smartcontracts": [contract_payload("0xaaaa", 10, 100)],
                "logs": [
                    log_payload("0xaaaa", "0xt1", 0, 60),
                    log_payload("0xaaaa", "0xt1", 1, 80),
                ],
            }),
        )
        .await
        .unwrap();

    let reply = handle
        .request(
            "snapshot_get",
            json!({
                "block_timestamp": "70",
                "smartcontract_keys": [{ "network_id": "imx", "address": "0xaaaa" }],
            }),
        )
        .await
        .unwrap();

    assert_eq!(reply["block_timestamp"], json!(80));
    assert_eq!(reply["logs"].as_array().unwrap().len(), 1);
    assert_eq!(reply["logs"][0]["name"], json!("Transfer"));
}

#[tokio::test]
async fn test_categorize_referential_failure_reaches_the_caller() {
    let handle = gateway(&store());

    let result = handle
        .request(
            "categorize",
            json!({
                "smartcontracts": [contract_payload("0xaaaa", 10, 100)],
                "logs": [log_payload("0xbbbb", "0xt1", 0, 60)],
            }),
        )
        .await;
    assert!(result.unwrap_err().contains("absent from the batch"));
}

#[tokio::test]
async fn test_list_by_network_id() {
    let handle = gateway(&store());
    handle
        .request("smartcontract_set", contract_payload("0xaaaa", 10, 100))
        .await
        .unwrap();
    handle
        .request("smartcontract_set", contract_payload("0xbbbb", 20, 200))
        .await
        .unwrap();

    let reply = handle
        .request(
            "smartcontract_get_all_by_network_id",
            json!({ "network_id": "imx" }),
        )
        .await
        .unwrap();
    assert_eq!(reply["smartcontracts"].as_array().unwrap().len(), 2);

    let reply = handle
        .request(
            "smartcontract_get_all_by_network_id",
            json!({ "network_id": "eth" }),
        )
        .await
        .unwrap();
    assert!(reply["smartcontracts"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_subscriber_state_answers_slowest_checkpoint() {
    let handle = gateway(&store());
    handle
        .request("smartcontract_set", contract_payload("0xaaaa", 10, 100))
        .await
        .unwrap();
    handle
        .request("smartcontract_set", contract_payload("0xbbbb", 20, 200))
        .await
        .unwrap();

    let reply = handle
        .request(
            "subscriber_state",
            json!({
                "topic_filter": { "network_ids": ["imx"] },
                "public_key": "pk",
            }),
        )
        .await
        .unwrap();
    assert_eq!(
        reply["block_timestamp"],
        json!(100),
        "a new subscription starts where its slowest contract stands"
    );
}

#[tokio::test]
async fn test_log_filter_over_the_wire() {
    let handle = gateway(&store());

    let reply = handle
        .request(
            "log-filter",
            json!({ "block_from": "100", "addresses": ["0xcafe"] }),
        )
        .await
        .unwrap();

    assert_eq!(reply["block_to"], json!(600), "default 500-block batch");
    assert_eq!(reply["block_timestamp"], json!(1_000_100));
    let raw_logs = reply["raw_logs"].as_array().unwrap();
    assert_eq!(raw_logs.len(), 501);
    assert_eq!(
        raw_logs[0]["transaction"]["block_number"],
        json!(100),
        "raw logs carry their full transaction context"
    );
}
