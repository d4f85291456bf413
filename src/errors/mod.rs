//! Error types for the chainfeed library.
//!
//! This module provides strongly-typed errors for all public APIs in chainfeed.
//! It follows a hybrid approach:
//!
//! - **Module-specific errors** for fine-grained error handling ([`TopicError`],
//!   [`CategorizeError`], etc.)
//! - **Unified error type** ([`ChainfeedError`]) for convenience when you don't
//!   need to distinguish between error sources
//!
//! # Architecture
//!
//! Each major module has its own error type:
//! - [`ValidationError`] - Structural validation failures on domain entities
//! - [`TopicError`] - Topic and topic-filter grammar failures
//! - [`CategorizeError`] - Errors from the event categorizer
//! - [`SnapshotError`] - Errors from the snapshot read path
//! - [`StorageError`] - Typed failures from the storage collaborator
//! - [`AdapterError`] - Chain adapter (RPC) failures
//! - [`WireError`] - Wire dictionary decoding failures
//! - [`SubscribeError`] - Subscriber-side request failures
//!
//! Conflicts are a first-class [`StorageError::Conflict`] variant; callers are
//! expected to treat a conflict as "already applied" rather than data loss.

mod adapter;
mod categorize;
mod snapshot;
mod storage;
mod subscribe;
mod topic;
mod validation;
mod wire;

pub use adapter::AdapterError;
pub use categorize::CategorizeError;
pub use snapshot::SnapshotError;
pub use storage::StorageError;
pub use subscribe::SubscribeError;
pub use topic::TopicError;
pub use validation::ValidationError;
pub use wire::WireError;

/// Unified error type for all chainfeed operations.
///
/// This enum wraps all module-specific error types, providing a convenient way
/// to handle errors when you don't need to distinguish between different error
/// sources. All module-specific error types automatically convert to
/// `ChainfeedError` via `From` implementations, so you can use `?` to propagate
/// errors naturally.
#[derive(Debug, thiserror::Error)]
pub enum ChainfeedError {
    /// Structural validation failure on a domain entity.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Topic or topic-filter grammar failure.
    #[error("Topic error: {0}")]
    Topic(#[from] TopicError),

    /// Error from the event categorizer.
    #[error("Categorize error: {0}")]
    Categorize(#[from] CategorizeError),

    /// Error from the snapshot read path.
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// Typed failure from the storage collaborator.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Chain adapter failure.
    #[error("Adapter error: {0}")]
    Adapter(#[from] AdapterError),

    /// Wire dictionary decoding failure.
    #[error("Wire error: {0}")]
    Wire(#[from] WireError),

    /// Subscriber-side request failure.
    #[error("Subscribe error: {0}")]
    Subscribe(#[from] SubscribeError),
}
