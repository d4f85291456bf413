// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! The snapshot service: the single read path for delivered events.
//!
//! A snapshot is scoped by an explicit set of smartcontract keys and a
//! timestamp cursor. The cursor comparison is inclusive (`>=`), which makes
//! delivery gap-free but at-least-once: a log whose timestamp equals the
//! returned cursor will be returned again on the next poll. Consumers must
//! deduplicate on the log identity tuple, never on the cursor alone.

use std::sync::Arc;

use tracing::debug;

use crate::chain::SmartcontractKey;
use crate::config::constants::paging;
use crate::errors::SnapshotError;
use crate::record::EventRecord;
use crate::spans;
use crate::storage::LogStore;

/// One page of delivered events plus the cursor to poll next.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// `max(cursor, max timestamp of the returned logs)`; unchanged when no
    /// logs matched, so callers can always re-poll with it
    pub next_cursor: u64,
    /// Matching records, at most the page limit, in storage order
    pub logs: Vec<EventRecord>,
}

/// Stateless-per-call snapshot service.
pub struct SnapshotService<L> {
    logs: Arc<L>,
    page_limit: usize,
}

impl<L: LogStore> SnapshotService<L> {
    /// Create a service with the default page limit of 500 rows.
    pub fn new(logs: Arc<L>) -> Self {
        Self {
            logs,
            page_limit: paging::SNAPSHOT_PAGE_LIMIT,
        }
    }

    /// Override the page limit.
    pub fn with_page_limit(mut self, page_limit: usize) -> Self {
        self.page_limit = page_limit;
        self
    }

    /// Return every persisted record whose key is in `keys` and whose block
    /// timestamp is `>= cursor`, bounded to the page limit.
    ///
    /// `keys` must be non-empty (a snapshot scoped to zero contracts is
    /// rejected, not treated as "everything") and every key must validate.
    pub async fn get_snapshot(
        &self,
        cursor: u64,
        keys: &[SmartcontractKey],
    ) -> Result<Snapshot, SnapshotError> {
        {
            let span = spans::snapshot_get(cursor, keys.len());
            let _guard = span.enter();
            if keys.is_empty() {
                return Err(SnapshotError::EmptyScope);
            }
            for key in keys {
                key.validate()
                    .map_err(|source| SnapshotError::invalid_key(key.to_string(), source))?;
            }
        }

        let logs = self
            .logs
            .select_from_timestamp(keys, cursor, self.page_limit)
            .await?;

        let next_cursor = logs
            .iter()
            .map(|record| record.block.timestamp)
            .fold(cursor, u64::max);

        debug!(
            cursor = cursor,
            next_cursor = next_cursor,
            logs_count = logs.len(),
            "Served snapshot"
        );

        Ok(Snapshot { next_cursor, logs })
    }
}
