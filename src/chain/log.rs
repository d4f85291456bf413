// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use serde_json::{json, Map, Value};

use super::{BlockHeader, Transaction};
use crate::errors::WireError;
use crate::wire;

/// A chain-agnostic, not-yet-decoded event log together with its transaction
/// context.
///
/// The log index and topic list are optional on the wire: an absent index
/// decodes to 0 and absent topics decode to the empty list. The embedded
/// transaction is required and must itself be structurally valid for the log
/// to (de)serialize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLog {
    /// Transaction the log was emitted in
    pub transaction: Transaction,
    /// Position of the log within its block
    pub index: u64,
    /// Opaque hex-encoded event data
    pub data: String,
    /// Indexed topic strings, in emission order
    pub topics: Vec<String>,
}

impl RawLog {
    /// Create a new raw log.
    pub fn new(transaction: Transaction, index: u64, data: impl Into<String>) -> Self {
        Self {
            transaction,
            index,
            data: data.into(),
            topics: Vec::new(),
        }
    }

    /// Attach topic strings.
    pub fn with_topics(mut self, topics: Vec<String>) -> Self {
        self.topics = topics;
        self
    }

    /// Encode to a wire dictionary.
    ///
    /// Fails if the embedded transaction is structurally invalid, since a log
    /// without a valid transaction context is meaningless downstream.
    pub fn to_object(&self) -> Result<Map<String, Value>, WireError> {
        wire_valid(&self.transaction)?;

        let mut map = Map::new();
        map.insert(
            "transaction".to_owned(),
            json!({
                "network_id": self.transaction.smartcontract_key.network_id,
                "address": self.transaction.smartcontract_key.address,
                "block_number": self.transaction.block.number,
                "block_timestamp": self.transaction.block.timestamp,
                "transaction_id": self.transaction.key.id,
                "transaction_index": self.transaction.key.index,
            }),
        );
        map.insert("log_index".to_owned(), json!(self.index));
        map.insert("data".to_owned(), json!(self.data));
        map.insert("topics".to_owned(), json!(self.topics));
        Ok(map)
    }

    /// Decode from a wire dictionary.
    ///
    /// Required fields must round-trip exactly; `log_index` defaults to 0 and
    /// `topics` to empty when absent. A missing or invalid transaction is an
    /// error.
    pub fn from_object(map: &Map<String, Value>) -> Result<Self, WireError> {
        let tx = wire::get_object(map, "transaction")?;
        let transaction = Transaction::new(
            super::SmartcontractKey::new(
                wire::get_str(tx, "network_id")?,
                wire::get_str(tx, "address")?,
            ),
            BlockHeader::new(
                wire::get_u64(tx, "block_number")?,
                wire::get_u64(tx, "block_timestamp")?,
            ),
            super::TransactionKey::new(
                wire::get_str(tx, "transaction_id")?,
                wire::get_u64(tx, "transaction_index")?,
            ),
        );
        wire_valid(&transaction)?;

        let topics = match map.get("topics") {
            None | Some(Value::Null) => Vec::new(),
            Some(_) => wire::get_string_array(map, "topics")?,
        };

        Ok(Self {
            transaction,
            index: wire::opt_u64(map, "log_index", 0)?,
            data: wire::opt_str(map, "data")?,
            topics,
        })
    }
}

/// Wire-level transaction validity: the contract key, transaction id, and
/// block number must be present. The block timestamp may still be zero at
/// the raw stage (ranged chain queries do not carry per-log timestamps)
/// and is only required non-zero once a log is decoded and categorized.
fn wire_valid(transaction: &Transaction) -> Result<(), WireError> {
    transaction
        .smartcontract_key
        .validate()
        .and_then(|()| transaction.key.validate())
        .map_err(|e| WireError::invalid_shape(e.to_string()))?;
    if transaction.block.number == 0 {
        return Err(WireError::invalid_shape("block_number must be non-zero"));
    }
    Ok(())
}

/// Keep only the logs whose emitting contract address matches `address`,
/// case-insensitively, preserving input order.
///
/// No match yields an empty vector, never an error.
pub fn filter_by_address(logs: &[RawLog], address: &str) -> Vec<RawLog> {
    logs.iter()
        .filter(|log| log.transaction.smartcontract_key.matches_address(address))
        .cloned()
        .collect()
}

/// The header with the maximum block number across the logs.
///
/// Empty input reduces to the zero header. Ties keep the first-seen maximum:
/// the comparison is strict `>`, so a later log with an equal number never
/// replaces an earlier one.
pub fn recent_block(logs: &[RawLog]) -> BlockHeader {
    let mut recent = BlockHeader::default();
    for log in logs {
        if log.transaction.block.number > recent.number {
            recent = log.transaction.block;
        }
    }
    recent
}
