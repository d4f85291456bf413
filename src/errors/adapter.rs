// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for chain adapters.
//!
//! An [`AdapterError::Rpc`] is transient from the sync worker's point of view
//! and is retried indefinitely inside the worker; it never propagates to any
//! caller outside it. [`AdapterError::UnsupportedNetwork`] is a configuration
//! error and is fatal at the point of use.

/// Errors raised by [`ChainAdapter`](crate::adapter::ChainAdapter)
/// implementations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdapterError {
    /// The underlying RPC transport failed or returned an error.
    #[error("chain RPC failure: {details}")]
    Rpc {
        /// Details about the failure
        details: String,
    },

    /// A block was requested that the chain does not (yet) have.
    #[error("block {number} not available")]
    MissingBlock {
        /// The requested block number
        number: u64,
    },

    /// The network id is not supported by this deployment.
    #[error("unsupported network id: {network_id:?}")]
    UnsupportedNetwork {
        /// The offending network id
        network_id: String,
    },
}

impl AdapterError {
    /// Create an `Rpc` error with details.
    pub fn rpc(details: impl Into<String>) -> Self {
        AdapterError::Rpc {
            details: details.into(),
        }
    }

    /// Create an `UnsupportedNetwork` error.
    pub fn unsupported_network(network_id: impl Into<String>) -> Self {
        AdapterError::UnsupportedNetwork {
            network_id: network_id.into(),
        }
    }
}
