// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the event categorizer.

use super::{StorageError, ValidationError};

/// Errors raised by [`Categorizer::categorize`](crate::categorizer::Categorizer::categorize)
/// and its read companions.
///
/// Every validation failure is a hard failure for the whole batch; there is no
/// partial success. A [`CategorizeError::Storage`] wrapping a conflict means a
/// log with the same identity tuple was already persisted.
#[derive(Debug, thiserror::Error)]
pub enum CategorizeError {
    /// The batch contains no smartcontracts.
    #[error("categorize batch contains no smartcontracts")]
    EmptyBatch,

    /// A smartcontract in the batch failed structural validation.
    #[error("invalid smartcontract {key}: {source}")]
    InvalidSmartcontract {
        /// Display form of the offending smartcontract key
        key: String,
        /// The underlying validation failure
        source: ValidationError,
    },

    /// A log candidate in the batch failed structural validation.
    #[error("invalid log candidate {name:?}: {source}")]
    InvalidLog {
        /// Event name of the offending candidate (may be empty)
        name: String,
        /// The underlying validation failure
        source: ValidationError,
    },

    /// A log candidate references a smartcontract that is not part of the
    /// same batch.
    ///
    /// This is a closed-world check per call: previously tracked contracts do
    /// not satisfy it.
    #[error("log references smartcontract {key} absent from the batch")]
    UnknownSmartcontract {
        /// Display form of the unreferenced smartcontract key
        key: String,
    },

    /// The storage collaborator rejected a write or read.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl CategorizeError {
    /// Create an `InvalidSmartcontract` error.
    pub fn invalid_smartcontract(key: impl Into<String>, source: ValidationError) -> Self {
        CategorizeError::InvalidSmartcontract {
            key: key.into(),
            source,
        }
    }

    /// Create an `InvalidLog` error.
    pub fn invalid_log(name: impl Into<String>, source: ValidationError) -> Self {
        CategorizeError::InvalidLog {
            name: name.into(),
            source,
        }
    }

    /// Create an `UnknownSmartcontract` error.
    pub fn unknown_smartcontract(key: impl Into<String>) -> Self {
        CategorizeError::UnknownSmartcontract { key: key.into() }
    }
}
