// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Per-command request and reply structs.
//!
//! Every command has its own explicit shape, even where it is structurally
//! identical to a domain entity, so the wire contract stays decoupled from
//! internal model changes. Decoding goes through the shared
//! [`wire`](crate::wire) helpers, which perform numeric coercion once at the
//! boundary.

use serde_json::{json, Value};

use crate::chain::{RawLog, SmartcontractKey};
use crate::errors::WireError;
use crate::record::EventRecord;
use crate::smartcontract::Smartcontract;
use crate::topic::TopicFilter;
use crate::wire;

fn keys_from(values: &[Value], field: &str) -> Result<Vec<SmartcontractKey>, WireError> {
    values
        .iter()
        .map(|value| {
            let map = value
                .as_object()
                .ok_or_else(|| WireError::invalid_type(field, "array of objects"))?;
            Ok(SmartcontractKey::new(
                wire::get_str(map, "network_id")?,
                wire::get_str(map, "address")?,
            ))
        })
        .collect()
}

fn key_to_value(key: &SmartcontractKey) -> Value {
    json!({ "network_id": key.network_id, "address": key.address })
}

/// `log-filter`: on-demand ranged log query against one chain adapter.
#[derive(Debug, Clone)]
pub struct LogFilterRequest {
    /// First block of the range, inclusive
    pub block_from: u64,
    /// Contract addresses to filter for
    pub addresses: Vec<String>,
}

impl LogFilterRequest {
    pub fn from_value(value: &Value) -> Result<Self, WireError> {
        let map = wire::as_object(value)?;
        Ok(Self {
            block_from: wire::get_u64(map, "block_from")?,
            addresses: wire::get_string_array(map, "addresses")?,
        })
    }

    pub fn to_value(&self) -> Value {
        json!({ "block_from": self.block_from, "addresses": self.addresses })
    }
}

/// Reply to `log-filter`.
#[derive(Debug, Clone)]
pub struct LogFilterReply {
    /// Last block of the range, inclusive
    pub block_to: u64,
    /// Unix timestamp of the requested `block_from`
    pub block_timestamp: u64,
    /// Matching raw logs
    pub raw_logs: Vec<RawLog>,
}

impl LogFilterReply {
    pub fn to_value(&self) -> Result<Value, WireError> {
        let raw_logs = self
            .raw_logs
            .iter()
            .map(|log| log.to_object().map(Value::Object))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(json!({
            "block_to": self.block_to,
            "block_timestamp": self.block_timestamp,
            "raw_logs": raw_logs,
        }))
    }

    pub fn from_value(value: &Value) -> Result<Self, WireError> {
        let map = wire::as_object(value)?;
        let raw_logs = wire::get_array(map, "raw_logs")?
            .iter()
            .map(|value| RawLog::from_object(wire::as_object(value)?))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            block_to: wire::get_u64(map, "block_to")?,
            block_timestamp: wire::get_u64(map, "block_timestamp")?,
            raw_logs,
        })
    }
}

/// `categorize`: one validate-and-persist batch.
#[derive(Debug, Clone)]
pub struct CategorizeRequest {
    /// Contracts whose checkpoints the batch advances
    pub smartcontracts: Vec<Smartcontract>,
    /// Decoded log candidates
    pub logs: Vec<EventRecord>,
}

impl CategorizeRequest {
    pub fn from_value(value: &Value) -> Result<Self, WireError> {
        let map = wire::as_object(value)?;
        let smartcontracts = wire::get_array(map, "smartcontracts")?
            .iter()
            .map(|value| Smartcontract::from_object(wire::as_object(value)?))
            .collect::<Result<Vec<_>, _>>()?;
        let logs = wire::get_array(map, "logs")?
            .iter()
            .map(|value| EventRecord::from_object(wire::as_object(value)?))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            smartcontracts,
            logs,
        })
    }

    pub fn to_value(&self) -> Value {
        json!({
            "smartcontracts": self
                .smartcontracts
                .iter()
                .map(|record| Value::Object(record.to_object()))
                .collect::<Vec<_>>(),
            "logs": self
                .logs
                .iter()
                .map(|record| Value::Object(record.to_object()))
                .collect::<Vec<_>>(),
        })
    }
}

/// `snapshot_get`: one page of the delivery read path.
#[derive(Debug, Clone)]
pub struct SnapshotGetRequest {
    /// Timestamp cursor
    pub block_timestamp: u64,
    /// Contract scope, must be non-empty
    pub smartcontract_keys: Vec<SmartcontractKey>,
}

impl SnapshotGetRequest {
    pub fn from_value(value: &Value) -> Result<Self, WireError> {
        let map = wire::as_object(value)?;
        Ok(Self {
            block_timestamp: wire::get_u64(map, "block_timestamp")?,
            smartcontract_keys: keys_from(
                wire::get_array(map, "smartcontract_keys")?,
                "smartcontract_keys",
            )?,
        })
    }

    pub fn to_value(&self) -> Value {
        json!({
            "block_timestamp": self.block_timestamp,
            "smartcontract_keys": self
                .smartcontract_keys
                .iter()
                .map(key_to_value)
                .collect::<Vec<_>>(),
        })
    }
}

/// Reply to `snapshot_get`.
#[derive(Debug, Clone)]
pub struct SnapshotGetReply {
    /// Next cursor, non-decreasing
    pub block_timestamp: u64,
    /// Delivered records
    pub logs: Vec<EventRecord>,
}

impl SnapshotGetReply {
    pub fn to_value(&self) -> Value {
        json!({
            "block_timestamp": self.block_timestamp,
            "logs": self
                .logs
                .iter()
                .map(|record| Value::Object(record.to_object()))
                .collect::<Vec<_>>(),
        })
    }

    pub fn from_value(value: &Value) -> Result<Self, WireError> {
        let map = wire::as_object(value)?;
        let logs = wire::get_array(map, "logs")?
            .iter()
            .map(|value| EventRecord::from_object(wire::as_object(value)?))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            block_timestamp: wire::get_u64(map, "block_timestamp")?,
            logs,
        })
    }
}

/// `smartcontract_get`: fetch one tracked contract.
#[derive(Debug, Clone)]
pub struct SmartcontractGetRequest {
    /// Key of the contract to fetch
    pub key: SmartcontractKey,
}

impl SmartcontractGetRequest {
    pub fn from_value(value: &Value) -> Result<Self, WireError> {
        let map = wire::as_object(value)?;
        Ok(Self {
            key: SmartcontractKey::new(
                wire::get_str(map, "network_id")?,
                wire::get_str(map, "address")?,
            ),
        })
    }

    pub fn to_value(&self) -> Value {
        key_to_value(&self.key)
    }
}

/// Reply to `smartcontract_get`.
#[derive(Debug, Clone)]
pub struct SmartcontractGetReply {
    /// The tracked contract record
    pub smartcontract: Smartcontract,
}

impl SmartcontractGetReply {
    pub fn to_value(&self) -> Value {
        json!({ "smartcontract": Value::Object(self.smartcontract.to_object()) })
    }

    pub fn from_value(value: &Value) -> Result<Self, WireError> {
        let map = wire::as_object(value)?;
        Ok(Self {
            smartcontract: Smartcontract::from_object(wire::get_object(map, "smartcontract")?)?,
        })
    }
}

/// `smartcontract_get_all_by_network_id`: list one network's contracts.
#[derive(Debug, Clone)]
pub struct SmartcontractListRequest {
    /// Network to list
    pub network_id: String,
}

impl SmartcontractListRequest {
    pub fn from_value(value: &Value) -> Result<Self, WireError> {
        let map = wire::as_object(value)?;
        Ok(Self {
            network_id: wire::get_str(map, "network_id")?,
        })
    }

    pub fn to_value(&self) -> Value {
        json!({ "network_id": self.network_id })
    }
}

/// Reply carrying tracked contract records.
#[derive(Debug, Clone)]
pub struct SmartcontractListReply {
    /// The matching records
    pub smartcontracts: Vec<Smartcontract>,
}

impl SmartcontractListReply {
    pub fn to_value(&self) -> Value {
        json!({
            "smartcontracts": self
                .smartcontracts
                .iter()
                .map(|record| Value::Object(record.to_object()))
                .collect::<Vec<_>>(),
        })
    }

    pub fn from_value(value: &Value) -> Result<Self, WireError> {
        let map = wire::as_object(value)?;
        let smartcontracts = wire::get_array(map, "smartcontracts")?
            .iter()
            .map(|value| Smartcontract::from_object(wire::as_object(value)?))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { smartcontracts })
    }
}

/// `smartcontract_set`: register a tracked contract. The payload is the
/// record itself.
#[derive(Debug, Clone)]
pub struct SmartcontractSetRequest {
    /// The record to register
    pub smartcontract: Smartcontract,
}

impl SmartcontractSetRequest {
    pub fn from_value(value: &Value) -> Result<Self, WireError> {
        Ok(Self {
            smartcontract: Smartcontract::from_object(wire::as_object(value)?)?,
        })
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.smartcontract.to_object())
    }
}

/// `subscriber_state`: one-shot initial-cursor resolution for a topic
/// filter. Signature verification of `public_key` happens upstream.
#[derive(Debug, Clone)]
pub struct SubscriberStateRequest {
    /// Scope of the subscription
    pub topic_filter: TopicFilter,
    /// Subscriber's public key, already verified upstream
    pub public_key: String,
}

impl SubscriberStateRequest {
    pub fn from_value(value: &Value) -> Result<Self, WireError> {
        let map = wire::as_object(value)?;
        let filter_value = map
            .get("topic_filter")
            .ok_or_else(|| WireError::missing_field("topic_filter"))?;
        let topic_filter = TopicFilter::from_value(filter_value)
            .map_err(|e| WireError::invalid_shape(e.to_string()))?;
        Ok(Self {
            topic_filter,
            public_key: wire::get_str(map, "public_key")?,
        })
    }

    pub fn to_value(&self) -> Value {
        json!({
            "topic_filter": serde_json::to_value(&self.topic_filter).unwrap_or(Value::Null),
            "public_key": self.public_key,
        })
    }
}

/// Reply to `subscriber_state`.
#[derive(Debug, Clone)]
pub struct SubscriberStateReply {
    /// Initial cursor for the subscription
    pub block_timestamp: u64,
}

impl SubscriberStateReply {
    pub fn to_value(&self) -> Value {
        json!({ "block_timestamp": self.block_timestamp })
    }

    pub fn from_value(value: &Value) -> Result<Self, WireError> {
        let map = wire::as_object(value)?;
        Ok(Self {
            block_timestamp: wire::get_u64(map, "block_timestamp")?,
        })
    }
}
