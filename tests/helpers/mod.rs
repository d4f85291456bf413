// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for chainfeed integration tests
//!
//! Provides fixture constructors and a scripted chain adapter so the
//! pipeline can be exercised without real blockchain connections.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Map};

use chainfeed::{
    BlockHeader, ChainAdapter, ChainBlock, EventRecord, MemoryStore, RawLog, Smartcontract,
    SmartcontractKey, Transaction, TransactionKey,
};
use chainfeed::errors::AdapterError;

#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .try_init();
}

#[allow(dead_code)]
pub fn key(network_id: &str, address: &str) -> SmartcontractKey {
    SmartcontractKey::new(network_id, address)
}

/// A valid tracked contract with its checkpoint at `(number, timestamp)`.
#[allow(dead_code)]
pub fn contract(key: &SmartcontractKey, number: u64, timestamp: u64) -> Smartcontract {
    Smartcontract::new(
        key.clone(),
        BlockHeader::new(number, timestamp),
        "0xdeployer",
        TransactionKey::new("0xdeploytx", 0),
    )
}

/// A valid decoded event record; `tx_id` + `log_index` form its identity
/// together with `key`.
#[allow(dead_code)]
pub fn record(
    key: &SmartcontractKey,
    tx_id: &str,
    log_index: u64,
    block_number: u64,
    timestamp: u64,
) -> EventRecord {
    let mut parameters = Map::new();
    parameters.insert("value".to_owned(), json!("1000"));
    EventRecord::new(
        key.clone(),
        TransactionKey::new(tx_id, 0),
        BlockHeader::new(block_number, timestamp),
        log_index,
        "Transfer",
        parameters,
    )
}

#[allow(dead_code)]
pub fn store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new())
}

/// Scripted chain adapter for sync worker tests.
///
/// Serves blocks `head..` deterministically, failing the head query and
/// individual block fetches a configured number of times first.
#[allow(dead_code)]
pub struct ScriptedAdapter {
    network_id: String,
    head: u64,
    head_failures: Mutex<u32>,
    /// Block numbers that fail exactly once before succeeding
    flaky_blocks: Mutex<HashSet<u64>>,
}

#[allow(dead_code)]
impl ScriptedAdapter {
    pub fn new(network_id: &str, head: u64) -> Self {
        Self {
            network_id: network_id.to_owned(),
            head,
            head_failures: Mutex::new(0),
            flaky_blocks: Mutex::new(HashSet::new()),
        }
    }

    /// Fail the head query this many times before answering.
    pub fn with_head_failures(self, failures: u32) -> Self {
        *self.head_failures.lock().unwrap() = failures;
        self
    }

    /// Fail each of these block fetches exactly once.
    pub fn with_flaky_blocks(self, numbers: impl IntoIterator<Item = u64>) -> Self {
        *self.flaky_blocks.lock().unwrap() = numbers.into_iter().collect();
        self
    }

    fn block(&self, number: u64) -> ChainBlock {
        let timestamp = 1_000_000 + number;
        let log = RawLog::new(
            Transaction::new(
                SmartcontractKey::new(&self.network_id, "0xcafe"),
                BlockHeader::new(number, timestamp),
                TransactionKey::new(format!("0xtx{number}"), 0),
            ),
            0,
            "0x00",
        );
        ChainBlock {
            network_id: self.network_id.clone(),
            header: BlockHeader::new(number, timestamp),
            logs: vec![log],
        }
    }
}

#[async_trait]
impl ChainAdapter for ScriptedAdapter {
    fn network_id(&self) -> &str {
        &self.network_id
    }

    async fn head_number(&self) -> Result<u64, AdapterError> {
        let mut failures = self.head_failures.lock().unwrap();
        if *failures > 0 {
            *failures -= 1;
            return Err(AdapterError::rpc("scripted head failure"));
        }
        Ok(self.head)
    }

    async fn block_with_logs(&self, number: u64) -> Result<ChainBlock, AdapterError> {
        if self.flaky_blocks.lock().unwrap().remove(&number) {
            return Err(AdapterError::rpc("scripted block failure"));
        }
        Ok(self.block(number))
    }

    async fn logs_in_range(
        &self,
        from: u64,
        to: u64,
        addresses: &[String],
    ) -> Result<Vec<RawLog>, AdapterError> {
        let mut logs = Vec::new();
        for number in from..=to {
            for log in self.block(number).logs {
                if addresses
                    .iter()
                    .any(|a| log.transaction.smartcontract_key.matches_address(a))
                {
                    logs.push(log);
                }
            }
        }
        Ok(logs)
    }

    async fn block_timestamp(&self, number: u64) -> Result<u64, AdapterError> {
        Ok(1_000_000 + number)
    }
}
