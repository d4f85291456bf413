// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the snapshot read path.

use super::{StorageError, ValidationError};

/// Errors raised by
/// [`SnapshotService::get_snapshot`](crate::snapshot::SnapshotService::get_snapshot).
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The request named no smartcontract keys.
    ///
    /// An empty scope is rejected rather than treated as "everything".
    #[error("snapshot scope contains no smartcontract keys")]
    EmptyScope,

    /// A smartcontract key in the scope failed structural validation.
    #[error("invalid smartcontract key {key}: {source}")]
    InvalidKey {
        /// Display form of the offending key
        key: String,
        /// The underlying validation failure
        source: ValidationError,
    },

    /// The storage collaborator rejected the read.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl SnapshotError {
    /// Create an `InvalidKey` error.
    pub fn invalid_key(key: impl Into<String>, source: ValidationError) -> Self {
        SnapshotError::InvalidKey {
            key: key.into(),
            source,
        }
    }
}
