// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! The event categorizer: validate-and-persist for decoded log candidates.
//!
//! Categorization turns decoded log candidates into durable
//! [`EventRecord`](crate::record::EventRecord)s and advances the per-contract
//! checkpoint in the same call. Validation is all-or-nothing: any malformed
//! entity or dangling contract reference fails the whole batch before a
//! single row is written.

use std::sync::Arc;

use tracing::{debug, info};

use crate::errors::CategorizeError;
use crate::record::EventRecord;
use crate::smartcontract::Smartcontract;
use crate::spans;
use crate::storage::{LogStore, SmartcontractStore};
use crate::chain::SmartcontractKey;

/// Stateless-per-call categorization service.
///
/// Safe to invoke concurrently from multiple networks; the only shared
/// mutable resource is the underlying storage, and the log identity
/// uniqueness constraint is the only concurrency-control primitive used
/// (optimistic first-writer-wins, not a lock).
pub struct Categorizer<S, L> {
    smartcontracts: Arc<S>,
    logs: Arc<L>,
}

impl<S, L> Categorizer<S, L>
where
    S: SmartcontractStore,
    L: LogStore,
{
    /// Create a new categorizer over shared stores.
    pub fn new(smartcontracts: Arc<S>, logs: Arc<L>) -> Self {
        Self {
            smartcontracts,
            logs,
        }
    }

    /// Validate and persist one categorization batch.
    ///
    /// Validation order, each step a hard failure for the whole batch:
    ///
    /// 1. `smartcontracts` must be non-empty.
    /// 2. Every contract must pass structural validation.
    /// 3. Every log candidate must pass structural validation.
    /// 4. Every candidate's key must match a contract in this same batch,
    ///    a closed-world check; previously tracked contracts do not count.
    ///
    /// Persistence then upserts each contract's checkpoint (monotonic, see
    /// [`SmartcontractStore::upsert_checkpoint`]) and inserts each record by
    /// its identity tuple. A duplicate identity surfaces as a conflict and
    /// aborts the remaining inserts; no partial-commit guarantee is assumed
    /// from the storage collaborator beyond row-level atomicity.
    pub async fn categorize(
        &self,
        smartcontracts: &[Smartcontract],
        candidates: &[EventRecord],
    ) -> Result<(), CategorizeError> {
        {
            let span = spans::categorize(smartcontracts.len(), candidates.len());
            let _guard = span.enter();
            validate_batch(smartcontracts, candidates)?;
        }

        for contract in smartcontracts {
            self.smartcontracts.upsert_checkpoint(contract).await?;
            debug!(
                key = %contract.key,
                checkpoint = contract.checkpoint.number,
                "Checkpoint advanced"
            );
        }
        for record in candidates {
            self.logs.insert(record.clone()).await?;
        }

        info!(
            smartcontracts = smartcontracts.len(),
            logs = candidates.len(),
            "Categorized batch"
        );
        Ok(())
    }

    /// Fetch one tracked contract by key.
    pub async fn get(&self, key: &SmartcontractKey) -> Result<Smartcontract, CategorizeError> {
        Ok(self.smartcontracts.get(key).await?)
    }

    /// List all tracked contracts.
    pub async fn all(&self) -> Result<Vec<Smartcontract>, CategorizeError> {
        Ok(self.smartcontracts.all().await?)
    }

    /// List tracked contracts on one network.
    pub async fn all_by_network_id(
        &self,
        network_id: &str,
    ) -> Result<Vec<Smartcontract>, CategorizeError> {
        Ok(self.smartcontracts.all_by_network_id(network_id).await?)
    }
}

/// The four-step batch validation, separated out so it stays synchronous.
fn validate_batch(
    smartcontracts: &[Smartcontract],
    candidates: &[EventRecord],
) -> Result<(), CategorizeError> {
    if smartcontracts.is_empty() {
        return Err(CategorizeError::EmptyBatch);
    }
    for contract in smartcontracts {
        contract
            .validate()
            .map_err(|source| CategorizeError::invalid_smartcontract(contract.key.to_string(), source))?;
    }
    for candidate in candidates {
        candidate
            .validate()
            .map_err(|source| CategorizeError::invalid_log(candidate.name.clone(), source))?;
        if !smartcontracts
            .iter()
            .any(|contract| contract.key == candidate.smartcontract_key)
        {
            return Err(CategorizeError::unknown_smartcontract(
                candidate.smartcontract_key.to_string(),
            ));
        }
    }
    Ok(())
}
