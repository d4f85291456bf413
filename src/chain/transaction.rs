// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use super::{BlockHeader, SmartcontractKey};
use crate::errors::ValidationError;

/// Identifier of a transaction within its block: `(id, index)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionKey {
    /// Chain-level transaction id (hash on EVM networks)
    pub id: String,
    /// Position of the transaction within its block
    pub index: u64,
}

impl TransactionKey {
    /// Create a new transaction key.
    pub fn new(id: impl Into<String>, index: u64) -> Self {
        Self {
            id: id.into(),
            index,
        }
    }

    /// Structural validation: the id must be non-empty. Index zero is valid
    /// (the first transaction in a block).
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_empty() {
            return Err(ValidationError::missing_field("transaction_id"));
        }
        Ok(())
    }
}

/// The transaction context a raw log is embedded in: which contract emitted
/// it, in which block, in which transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Contract the log belongs to
    pub smartcontract_key: SmartcontractKey,
    /// Block the transaction was included in
    pub block: BlockHeader,
    /// Transaction id and index
    pub key: TransactionKey,
}

impl Transaction {
    /// Create a new transaction context.
    pub fn new(smartcontract_key: SmartcontractKey, block: BlockHeader, key: TransactionKey) -> Self {
        Self {
            smartcontract_key,
            block,
            key,
        }
    }

    /// Structural validation of all three components.
    ///
    /// Transaction validity is load-bearing for the validity of the log that
    /// embeds it.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.smartcontract_key.validate()?;
        self.block.validate()?;
        self.key.validate()
    }
}
