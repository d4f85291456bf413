// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Typed failures for the storage collaborator.
//!
//! The storage engine itself is external to this crate; these variants define
//! the interface contract every implementation must honor. In particular a
//! uniqueness violation must surface as [`StorageError::Conflict`] rather than
//! being detectable only by inspecting a backend error string.

/// Errors returned by [`SmartcontractStore`](crate::storage::SmartcontractStore)
/// and [`LogStore`](crate::storage::LogStore) implementations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// A uniqueness constraint was violated.
    ///
    /// For logs this is the identity tuple
    /// `(smartcontract key, transaction key, log index)`; for smartcontracts
    /// it is the key itself. Callers should treat a conflict as "already
    /// applied" (idempotency contract), not as data loss.
    #[error("duplicate record: {details}")]
    Conflict {
        /// What was duplicated
        details: String,
    },

    /// No record matched the requested key.
    #[error("record not found: {details}")]
    NotFound {
        /// What was looked up
        details: String,
    },

    /// The backend itself failed (connection, I/O, serialization).
    #[error("storage backend failure: {details}")]
    Backend {
        /// Details about the failure
        details: String,
    },
}

impl StorageError {
    /// Create a `Conflict` error with details.
    pub fn conflict(details: impl Into<String>) -> Self {
        StorageError::Conflict {
            details: details.into(),
        }
    }

    /// Create a `NotFound` error with details.
    pub fn not_found(details: impl Into<String>) -> Self {
        StorageError::NotFound {
            details: details.into(),
        }
    }

    /// Create a `Backend` error with details.
    pub fn backend(details: impl Into<String>) -> Self {
        StorageError::Backend {
            details: details.into(),
        }
    }

    /// Whether this error is a uniqueness conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, StorageError::Conflict { .. })
    }
}
