// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Durable decoded event records.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::chain::{BlockHeader, RawLog, SmartcontractKey, TransactionKey};
use crate::errors::{ValidationError, WireError};
use crate::wire;

/// Identity tuple of a decoded event record.
///
/// Uniqueness of this tuple is the storage engine's only concurrency-control
/// primitive in the pipeline: the first writer wins, every later writer sees
/// a conflict. Downstream consumers deduplicate deliveries on it as well.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordIdentity {
    /// Contract the event belongs to
    pub smartcontract_key: SmartcontractKey,
    /// Transaction the event was emitted in
    pub transaction_key: TransactionKey,
    /// Position of the log within its block
    pub log_index: u64,
}

/// The durable, canonical event record: a named, parameter-decoded event tied
/// to a specific transaction and contract.
///
/// Created once by the categorizer from a validated raw log plus its decoded
/// name and parameters; never mutated after insertion; never deleted by this
/// subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Contract the event belongs to
    pub smartcontract_key: SmartcontractKey,
    /// Transaction the event was emitted in
    pub transaction_key: TransactionKey,
    /// Block the event was emitted in
    pub block: BlockHeader,
    /// Position of the log within its block
    pub log_index: u64,
    /// Decoded event name
    pub name: String,
    /// Decoded parameters, an open string-keyed map of JSON values
    pub parameters: Map<String, Value>,
}

impl EventRecord {
    /// Create a new record.
    pub fn new(
        smartcontract_key: SmartcontractKey,
        transaction_key: TransactionKey,
        block: BlockHeader,
        log_index: u64,
        name: impl Into<String>,
        parameters: Map<String, Value>,
    ) -> Self {
        Self {
            smartcontract_key,
            transaction_key,
            block,
            log_index,
            name: name.into(),
            parameters,
        }
    }

    /// Build a record from a raw log and its decoded name and parameters.
    pub fn from_raw(raw: &RawLog, name: impl Into<String>, parameters: Map<String, Value>) -> Self {
        Self::new(
            raw.transaction.smartcontract_key.clone(),
            raw.transaction.key.clone(),
            raw.transaction.block,
            raw.index,
            name,
            parameters,
        )
    }

    /// The record's identity tuple.
    pub fn identity(&self) -> RecordIdentity {
        RecordIdentity {
            smartcontract_key: self.smartcontract_key.clone(),
            transaction_key: self.transaction_key.clone(),
            log_index: self.log_index,
        }
    }

    /// Structural validation: name non-empty, key, transaction key and block
    /// header all valid. (The parameter map is always present; an event with
    /// no parameters carries an empty map.)
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::missing_field("name"));
        }
        self.smartcontract_key.validate()?;
        self.transaction_key.validate()?;
        self.block.validate()
    }

    /// Encode to a wire dictionary.
    pub fn to_object(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("network_id".to_owned(), json!(self.smartcontract_key.network_id));
        map.insert("address".to_owned(), json!(self.smartcontract_key.address));
        map.insert("transaction_id".to_owned(), json!(self.transaction_key.id));
        map.insert(
            "transaction_index".to_owned(),
            json!(self.transaction_key.index),
        );
        map.insert("block_number".to_owned(), json!(self.block.number));
        map.insert("block_timestamp".to_owned(), json!(self.block.timestamp));
        map.insert("log_index".to_owned(), json!(self.log_index));
        map.insert("name".to_owned(), json!(self.name));
        map.insert("parameters".to_owned(), Value::Object(self.parameters.clone()));
        map
    }

    /// Decode from a wire dictionary, with numeric coercion.
    pub fn from_object(map: &Map<String, Value>) -> Result<Self, WireError> {
        Ok(Self {
            smartcontract_key: SmartcontractKey::new(
                wire::get_str(map, "network_id")?,
                wire::get_str(map, "address")?,
            ),
            transaction_key: TransactionKey::new(
                wire::get_str(map, "transaction_id")?,
                wire::get_u64(map, "transaction_index")?,
            ),
            block: BlockHeader::new(
                wire::get_u64(map, "block_number")?,
                wire::get_u64(map, "block_timestamp")?,
            ),
            log_index: wire::opt_u64(map, "log_index", 0)?,
            name: wire::get_str(map, "name")?,
            parameters: wire::get_object(map, "parameters")?.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> EventRecord {
        let mut parameters = Map::new();
        parameters.insert("from".to_owned(), json!("0xaaaa"));
        parameters.insert("value".to_owned(), json!("1000"));
        EventRecord::new(
            SmartcontractKey::new("1", "0xabc"),
            TransactionKey::new("0xdead", 1),
            BlockHeader::new(50, 1_700_000_000),
            3,
            "Transfer",
            parameters,
        )
    }

    #[test]
    fn test_identity_is_case_insensitive_on_address() {
        let a = record();
        let mut b = record();
        b.smartcontract_key.address = b.smartcontract_key.address.to_uppercase();
        assert_eq!(a.identity(), b.identity());
    }

    #[test]
    fn test_identity_distinguishes_log_index() {
        let a = record();
        let mut b = record();
        b.log_index = 4;
        assert_ne!(a.identity(), b.identity());
    }

    #[test]
    fn test_validation_requires_event_name() {
        let mut unnamed = record();
        unnamed.name.clear();
        assert!(unnamed.validate().is_err());
        assert!(record().validate().is_ok());
    }

    #[test]
    fn test_wire_round_trip_preserves_parameters() {
        let decoded = EventRecord::from_object(&record().to_object()).unwrap();
        assert_eq!(decoded, record());
        assert_eq!(decoded.parameters["value"], json!("1000"));
    }
}
