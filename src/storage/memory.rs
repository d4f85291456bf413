// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory store implementation.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use super::{LogStore, SmartcontractStore};
use crate::chain::SmartcontractKey;
use crate::errors::StorageError;
use crate::record::{EventRecord, RecordIdentity};
use crate::smartcontract::Smartcontract;

/// Internal state for the memory store.
#[derive(Debug, Default)]
struct MemoryState {
    /// Tracked contracts by key
    smartcontracts: HashMap<SmartcontractKey, Smartcontract>,
    /// Identity tuples already inserted, backing the uniqueness constraint
    identities: HashSet<RecordIdentity>,
    /// Insertion-ordered record list backing the select path
    rows: Vec<EventRecord>,
}

/// In-memory implementation of both store traits.
///
/// State lives in a `tokio::sync::Mutex`-wrapped map, so a single instance is
/// safe to share behind an `Arc` across concurrently-running categorizers and
/// snapshot services. The log identity uniqueness constraint and the
/// monotonic checkpoint clamp are enforced here exactly as a relational
/// backend would enforce them.
///
/// # Examples
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use chainfeed::storage::MemoryStore;
///
/// let store = Arc::new(MemoryStore::new());
/// let categorizer = Categorizer::new(store.clone(), store.clone());
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of decoded records currently held.
    pub async fn record_count(&self) -> usize {
        self.state.lock().await.rows.len()
    }
}

#[async_trait]
impl SmartcontractStore for MemoryStore {
    async fn register(&self, record: Smartcontract) -> Result<(), StorageError> {
        let mut state = self.state.lock().await;
        if state.smartcontracts.contains_key(&record.key) {
            return Err(StorageError::conflict(format!(
                "smartcontract {}",
                record.key
            )));
        }
        debug!(key = %record.key, "registering smartcontract");
        state.smartcontracts.insert(record.key.clone(), record);
        Ok(())
    }

    async fn upsert_checkpoint(&self, record: &Smartcontract) -> Result<(), StorageError> {
        let mut state = self.state.lock().await;
        match state.smartcontracts.get_mut(&record.key) {
            Some(stored) => {
                // Monotonic clamp: never rewind categorization progress.
                if record.checkpoint.number >= stored.checkpoint.number {
                    stored.checkpoint = record.checkpoint;
                }
            }
            None => {
                state
                    .smartcontracts
                    .insert(record.key.clone(), record.clone());
            }
        }
        Ok(())
    }

    async fn get(&self, key: &SmartcontractKey) -> Result<Smartcontract, StorageError> {
        self.state
            .lock()
            .await
            .smartcontracts
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::not_found(format!("smartcontract {key}")))
    }

    async fn all(&self) -> Result<Vec<Smartcontract>, StorageError> {
        Ok(self
            .state
            .lock()
            .await
            .smartcontracts
            .values()
            .cloned()
            .collect())
    }

    async fn all_by_network_id(&self, network_id: &str) -> Result<Vec<Smartcontract>, StorageError> {
        Ok(self
            .state
            .lock()
            .await
            .smartcontracts
            .values()
            .filter(|record| record.key.network_id == network_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl LogStore for MemoryStore {
    async fn insert(&self, record: EventRecord) -> Result<(), StorageError> {
        let mut state = self.state.lock().await;
        let identity = record.identity();
        if state.identities.contains(&identity) {
            return Err(StorageError::conflict(format!(
                "log {}/{}#{}",
                identity.smartcontract_key, identity.transaction_key.id, identity.log_index
            )));
        }
        state.rows.push(record);
        state.identities.insert(identity);
        Ok(())
    }

    async fn select_from_timestamp(
        &self,
        keys: &[SmartcontractKey],
        cursor: u64,
        limit: usize,
    ) -> Result<Vec<EventRecord>, StorageError> {
        Ok(self
            .state
            .lock()
            .await
            .rows
            .iter()
            .filter(|record| {
                record.block.timestamp >= cursor
                    && keys.iter().any(|key| *key == record.smartcontract_key)
            })
            .take(limit)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::{BlockHeader, TransactionKey};
    use serde_json::Map;

    fn key() -> SmartcontractKey {
        SmartcontractKey::new("1", "0xabc")
    }

    fn contract(checkpoint_number: u64) -> Smartcontract {
        Smartcontract::new(
            key(),
            BlockHeader::new(checkpoint_number, checkpoint_number * 10),
            "0xdeployer",
            TransactionKey::new("0xdeploy", 0),
        )
    }

    fn record(log_index: u64, timestamp: u64) -> EventRecord {
        EventRecord::new(
            key(),
            TransactionKey::new("0xdead", 0),
            BlockHeader::new(5, timestamp),
            log_index,
            "Transfer",
            Map::new(),
        )
    }

    #[tokio::test]
    async fn test_duplicate_registration_conflicts() {
        let store = MemoryStore::new();
        store.register(contract(1)).await.unwrap();

        let err = store.register(contract(2)).await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_checkpoint_clamp_ignores_backward_moves() {
        let store = MemoryStore::new();
        store.upsert_checkpoint(&contract(10)).await.unwrap();
        store.upsert_checkpoint(&contract(7)).await.unwrap();

        let stored = store.get(&key()).await.unwrap();
        assert_eq!(stored.checkpoint.number, 10, "backward move is ignored");

        store.upsert_checkpoint(&contract(12)).await.unwrap();
        let stored = store.get(&key()).await.unwrap();
        assert_eq!(stored.checkpoint.number, 12);
    }

    #[tokio::test]
    async fn test_duplicate_identity_first_writer_wins() {
        let store = MemoryStore::new();
        store.insert(record(0, 100)).await.unwrap();

        let mut replay = record(0, 100);
        replay.name = "Renamed".to_owned();
        assert!(store.insert(replay).await.unwrap_err().is_conflict());

        assert_eq!(store.record_count().await, 1);
        let rows = store
            .select_from_timestamp(&[key()], 0, 10)
            .await
            .unwrap();
        assert_eq!(rows[0].name, "Transfer");
    }

    #[tokio::test]
    async fn test_select_applies_cursor_and_limit() {
        let store = MemoryStore::new();
        for i in 0..6u64 {
            store.insert(record(i, 100 + i)).await.unwrap();
        }

        let rows = store
            .select_from_timestamp(&[key()], 102, 3)
            .await
            .unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.block.timestamp >= 102));
    }
}
