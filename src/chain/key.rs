// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Globally unique identifier of a tracked smartcontract:
/// `(network_id, address)`.
///
/// Address comparison is case-insensitive (EVM addresses are checksummed with
/// mixed case but denote the same account); the network id is compared
/// exactly. Keys are immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmartcontractKey {
    /// Identifier of the network the contract lives on
    pub network_id: String,
    /// Contract account address, kept in its original casing
    pub address: String,
}

impl SmartcontractKey {
    /// Create a new key.
    pub fn new(network_id: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            network_id: network_id.into(),
            address: address.into(),
        }
    }

    /// Structural validation: both fields must be non-empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.network_id.is_empty() {
            return Err(ValidationError::missing_field("network_id"));
        }
        if self.address.is_empty() {
            return Err(ValidationError::missing_field("address"));
        }
        Ok(())
    }

    /// Case-insensitive comparison against a bare address.
    pub fn matches_address(&self, address: &str) -> bool {
        self.address.eq_ignore_ascii_case(address)
    }
}

impl PartialEq for SmartcontractKey {
    fn eq(&self, other: &Self) -> bool {
        self.network_id == other.network_id && self.address.eq_ignore_ascii_case(&other.address)
    }
}

impl Eq for SmartcontractKey {}

impl Hash for SmartcontractKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.network_id.hash(state);
        self.address.to_ascii_lowercase().hash(state);
    }
}

impl fmt::Display for SmartcontractKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network_id, self.address)
    }
}
