// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the subscriber loop.

use super::SnapshotError;

/// Errors raised by [`SnapshotClient`](crate::subscriber::SnapshotClient)
/// implementations and surfaced on the subscriber's output channel.
#[derive(Debug, thiserror::Error)]
pub enum SubscribeError {
    /// The one-shot subscriber state query failed.
    #[error("subscriber state request failed: {details}")]
    State {
        /// Details about the failure
        details: String,
    },

    /// The transport carrying a snapshot request failed.
    #[error("snapshot transport failure: {details}")]
    Transport {
        /// Details about the failure
        details: String,
    },

    /// The gateway rejected a snapshot request.
    #[error("snapshot request rejected: {details}")]
    Rejected {
        /// The gateway's reason string
        details: String,
    },
}

impl SubscribeError {
    /// Create a `State` error with details.
    pub fn state(details: impl Into<String>) -> Self {
        SubscribeError::State {
            details: details.into(),
        }
    }

    /// Create a `Transport` error with details.
    pub fn transport(details: impl Into<String>) -> Self {
        SubscribeError::Transport {
            details: details.into(),
        }
    }

    /// Create a `Rejected` error with details.
    pub fn rejected(details: impl Into<String>) -> Self {
        SubscribeError::Rejected {
            details: details.into(),
        }
    }
}

impl From<SnapshotError> for SubscribeError {
    fn from(error: SnapshotError) -> Self {
        SubscribeError::rejected(error.to_string())
    }
}
