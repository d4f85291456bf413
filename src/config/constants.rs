//! Timing and paging constants
//!
//! This module centralizes the magic constants of the pipeline's retry and
//! paging discipline, improving discoverability and maintainability.

use std::time::Duration;

/// Pipeline timing defaults
pub mod timing {
    use super::*;

    /// Delay between attempts to acquire the chain head at worker start.
    pub const HEAD_RETRY_DELAY: Duration = Duration::from_secs(1);

    /// Delay before re-fetching a block that failed to fetch.
    ///
    /// Deliberately longer than the head retry: a missing block usually means
    /// the chain has not produced it yet.
    pub const BLOCK_RETRY_DELAY: Duration = Duration::from_secs(10);

    /// Pause after a successfully broadcast block before advancing the
    /// cursor, to avoid hammering the adapter.
    pub const BLOCK_POLL_DELAY: Duration = Duration::from_secs(1);

    /// Pause between subscriber snapshot polls.
    pub const SUBSCRIBER_POLL_INTERVAL: Duration = Duration::from_secs(1);
}

/// Paging defaults
pub mod paging {
    /// Maximum block range of a single on-demand log-filter query.
    pub const PROVIDER_BATCH_LENGTH: u64 = 500;

    /// Maximum rows returned by one snapshot call.
    pub const SNAPSHOT_PAGE_LIMIT: usize = 500;
}
