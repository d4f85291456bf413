// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tracked smartcontract records.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::chain::{BlockHeader, SmartcontractKey, TransactionKey};
use crate::errors::{ValidationError, WireError};
use crate::wire;

/// A contract registered for event tracking.
///
/// The embedded [`BlockHeader`] is a progress checkpoint, not a deployment
/// block: events at or above it have been, or are about to be, categorized.
/// Records are created at registration, mutated only by the categorizer
/// advancing the checkpoint, and never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Smartcontract {
    /// Unique key of the contract
    pub key: SmartcontractKey,
    /// Categorization progress checkpoint
    pub checkpoint: BlockHeader,
    /// Account that deployed the contract
    pub deployer: String,
    /// Transaction the contract was deployed in
    pub deploy_transaction: TransactionKey,
    /// Reference to the contract's ABI in the decoder's registry, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abi_id: Option<String>,
}

impl Smartcontract {
    /// Create a new tracked contract.
    pub fn new(
        key: SmartcontractKey,
        checkpoint: BlockHeader,
        deployer: impl Into<String>,
        deploy_transaction: TransactionKey,
    ) -> Self {
        Self {
            key,
            checkpoint,
            deployer: deployer.into(),
            deploy_transaction,
            abi_id: None,
        }
    }

    /// Attach an ABI reference.
    pub fn with_abi_id(mut self, abi_id: impl Into<String>) -> Self {
        self.abi_id = Some(abi_id.into());
        self
    }

    /// Structural validation: key, deployer, deployment transaction and
    /// checkpoint must all be present and non-zero where required.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.key.validate()?;
        self.checkpoint.validate()?;
        if self.deployer.is_empty() {
            return Err(ValidationError::missing_field("deployer"));
        }
        self.deploy_transaction.validate()
    }

    /// Encode to a wire dictionary.
    pub fn to_object(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("network_id".to_owned(), json!(self.key.network_id));
        map.insert("address".to_owned(), json!(self.key.address));
        map.insert("checkpoint_number".to_owned(), json!(self.checkpoint.number));
        map.insert(
            "checkpoint_timestamp".to_owned(),
            json!(self.checkpoint.timestamp),
        );
        map.insert("deployer".to_owned(), json!(self.deployer));
        map.insert(
            "transaction_id".to_owned(),
            json!(self.deploy_transaction.id),
        );
        map.insert(
            "transaction_index".to_owned(),
            json!(self.deploy_transaction.index),
        );
        if let Some(abi_id) = &self.abi_id {
            map.insert("abi_id".to_owned(), json!(abi_id));
        }
        map
    }

    /// Decode from a wire dictionary, with numeric coercion.
    pub fn from_object(map: &Map<String, Value>) -> Result<Self, WireError> {
        let abi_id = match map.get("abi_id") {
            None | Some(Value::Null) => None,
            Some(value) => Some(
                value
                    .as_str()
                    .map(str::to_owned)
                    .ok_or_else(|| WireError::invalid_type("abi_id", "string"))?,
            ),
        };
        Ok(Self {
            key: SmartcontractKey::new(
                wire::get_str(map, "network_id")?,
                wire::get_str(map, "address")?,
            ),
            checkpoint: BlockHeader::new(
                wire::get_u64(map, "checkpoint_number")?,
                wire::get_u64(map, "checkpoint_timestamp")?,
            ),
            deployer: wire::get_str(map, "deployer")?,
            deploy_transaction: TransactionKey::new(
                wire::get_str(map, "transaction_id")?,
                wire::get_u64(map, "transaction_index")?,
            ),
            abi_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract() -> Smartcontract {
        Smartcontract::new(
            SmartcontractKey::new("1", "0xabc"),
            BlockHeader::new(100, 1_700_000_000),
            "0xdeployer",
            TransactionKey::new("0xdeploy", 2),
        )
    }

    #[test]
    fn test_validation_requires_deployment_metadata() {
        assert!(contract().validate().is_ok());

        let mut missing_deployer = contract();
        missing_deployer.deployer.clear();
        assert!(missing_deployer.validate().is_err());

        let mut missing_tx = contract();
        missing_tx.deploy_transaction.id.clear();
        assert!(missing_tx.validate().is_err());
    }

    #[test]
    fn test_wire_round_trip() {
        let record = contract().with_abi_id("vault-v1");
        let decoded = Smartcontract::from_object(&record.to_object()).unwrap();
        assert_eq!(decoded, record);
    }
}
