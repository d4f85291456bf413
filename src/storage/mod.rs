// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Storage collaborator interface.
//!
//! The relational engine itself lives outside this crate; these traits define
//! what the pipeline requires of it: insert a row, select rows by structured
//! condition, enforce uniqueness, and report a violation as a typed
//! [`StorageError::Conflict`](crate::errors::StorageError::Conflict),
//! never as an error string to be pattern-matched.
//!
//! [`MemoryStore`] is the bundled reference implementation, used by the test
//! suite and suitable for embedding.

mod memory;

use async_trait::async_trait;

pub use memory::MemoryStore;

use crate::chain::SmartcontractKey;
use crate::errors::StorageError;
use crate::record::EventRecord;
use crate::smartcontract::Smartcontract;

/// Persistence of tracked smartcontracts and their checkpoints.
#[async_trait]
pub trait SmartcontractStore: Send + Sync {
    /// Register a new tracked contract.
    ///
    /// A second registration under the same key is a
    /// [`StorageError::Conflict`](crate::errors::StorageError::Conflict).
    async fn register(&self, record: Smartcontract) -> Result<(), StorageError>;

    /// Upsert by key: insert the record if absent, otherwise advance the
    /// stored checkpoint.
    ///
    /// Checkpoint updates are monotonic: an update that would move the
    /// stored checkpoint's block number backward is ignored, so redelivered
    /// categorization batches cannot rewind progress.
    async fn upsert_checkpoint(&self, record: &Smartcontract) -> Result<(), StorageError>;

    /// Fetch one tracked contract by key.
    async fn get(&self, key: &SmartcontractKey) -> Result<Smartcontract, StorageError>;

    /// List all tracked contracts.
    async fn all(&self) -> Result<Vec<Smartcontract>, StorageError>;

    /// List tracked contracts on one network.
    async fn all_by_network_id(&self, network_id: &str) -> Result<Vec<Smartcontract>, StorageError>;
}

/// Persistence of decoded event records.
#[async_trait]
pub trait LogStore: Send + Sync {
    /// Insert a record by its identity tuple.
    ///
    /// A duplicate identity is a
    /// [`StorageError::Conflict`](crate::errors::StorageError::Conflict);
    /// the row that is already present stays untouched (first writer wins).
    async fn insert(&self, record: EventRecord) -> Result<(), StorageError>;

    /// Select up to `limit` records whose key is in `keys` and whose block
    /// timestamp is `>= cursor`.
    ///
    /// No ordering is guaranteed beyond membership.
    async fn select_from_timestamp(
        &self,
        keys: &[SmartcontractKey],
        cursor: u64,
        limit: usize,
    ) -> Result<Vec<EventRecord>, StorageError>;
}
