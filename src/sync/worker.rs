// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};
use tracing::{debug, info, warn};

use crate::adapter::{ChainAdapter, ChainBlock};
use crate::chain::RawLog;
use crate::config::SyncConfig;
use crate::errors::AdapterError;

/// Result of an on-demand ranged log query.
#[derive(Debug, Clone)]
pub struct LogRange {
    /// First block of the range, inclusive
    pub block_from: u64,
    /// Last block of the range, inclusive
    pub block_to: u64,
    /// Unix timestamp of `block_from`
    pub timestamp: u64,
    /// Logs the queried addresses emitted inside the range
    pub logs: Vec<RawLog>,
}

/// Fetch all logs for `addresses` from `block_from` through
/// `block_from + batch_length`, plus the timestamp of `block_from`.
///
/// This is a stateless point query used by callers backfilling a gap; it is
/// not part of the continuous sync loop and does not retry.
pub async fn fetch_range<A: ChainAdapter + ?Sized>(
    adapter: &A,
    config: &SyncConfig,
    block_from: u64,
    addresses: &[String],
) -> Result<LogRange, AdapterError> {
    let block_to = block_from.saturating_add(config.batch_length_for(adapter.network_id()));
    let logs = adapter.logs_in_range(block_from, block_to, addresses).await?;
    let timestamp = adapter.block_timestamp(block_from).await?;

    debug!(
        network_id = %adapter.network_id(),
        block_from = block_from,
        block_to = block_to,
        logs_count = logs.len(),
        "Fetched log range"
    );

    Ok(LogRange {
        block_from,
        block_to,
        timestamp,
        logs,
    })
}

/// Long-lived block synchronization worker for one network.
///
/// The worker runs two stages:
///
/// 1. **AcquireHead** - ask the adapter for the most recent block number,
///    retrying forever on its head backoff. Connectivity loss is always
///    transient from this component's point of view.
/// 2. **Sync** - fetch the block at the cursor; on failure wait out the block
///    backoff and retry the *same* cursor (the cursor never advances past a
///    block that failed to fetch); on success hand the block to the sink,
///    pause for the poll delay, and advance by exactly one.
///
/// Blocks therefore reach the sink strictly in increasing number order, with
/// no gaps and no duplicates, as long as the adapter returns monotonically
/// available blocks.
///
/// The worker stops when the shutdown signal flips to `true`, when the
/// shutdown sender is dropped, or when the sink is closed.
pub struct SyncWorker<A> {
    adapter: Arc<A>,
    config: SyncConfig,
    sink: mpsc::Sender<ChainBlock>,
    shutdown: watch::Receiver<bool>,
}

impl<A: ChainAdapter + 'static> SyncWorker<A> {
    /// Create a new worker.
    pub fn new(
        adapter: Arc<A>,
        config: SyncConfig,
        sink: mpsc::Sender<ChainBlock>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            adapter,
            config,
            sink,
            shutdown,
        }
    }

    /// Spawn the worker onto the runtime.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Drive the worker until shutdown.
    pub async fn run(mut self) {
        let network_id = self.adapter.network_id().to_owned();

        let Some(head) = self.acquire_head(&network_id).await else {
            info!(network_id = %network_id, "Sync worker stopped before acquiring head");
            return;
        };
        info!(network_id = %network_id, head = head, "Starting block sync");

        let mut cursor = head;
        let mut attempt = 0u32;
        loop {
            if self.stop_requested() {
                break;
            }

            match self.adapter.block_with_logs(cursor).await {
                Ok(block) => {
                    attempt = 0;
                    debug!(
                        network_id = %network_id,
                        number = block.header.number,
                        logs_count = block.logs.len(),
                        "Broadcasting block"
                    );
                    if self.sink.send(block).await.is_err() {
                        warn!(network_id = %network_id, "Broadcast sink closed, stopping sync");
                        break;
                    }
                    if !self.pause(self.config.poll_delay_for(&network_id)).await {
                        break;
                    }
                    cursor += 1;
                }
                Err(error) => {
                    let delay = self.config.block_backoff_for(&network_id).delay(attempt);
                    attempt = attempt.saturating_add(1);
                    warn!(
                        network_id = %network_id,
                        cursor = cursor,
                        error = %error,
                        delay_ms = delay.as_millis(),
                        "Block fetch failed, holding cursor"
                    );
                    if !self.pause(delay).await {
                        break;
                    }
                }
            }
        }

        info!(network_id = %network_id, "Block sync stopped");
    }

    /// Acquire the chain head, retrying until it succeeds or shutdown is
    /// requested. Returns `None` on shutdown.
    async fn acquire_head(&mut self, network_id: &str) -> Option<u64> {
        let mut attempt = 0u32;
        loop {
            if self.stop_requested() {
                return None;
            }
            match self.adapter.head_number().await {
                Ok(head) => return Some(head),
                Err(error) => {
                    let delay = self.config.head_backoff_for(network_id).delay(attempt);
                    attempt = attempt.saturating_add(1);
                    warn!(
                        network_id = %network_id,
                        error = %error,
                        delay_ms = delay.as_millis(),
                        "Head fetch failed, retrying"
                    );
                    if !self.pause(delay).await {
                        return None;
                    }
                }
            }
        }
    }

    fn stop_requested(&self) -> bool {
        *self.shutdown.borrow()
    }

    /// Sleep for `delay`, waking early on shutdown. Returns `false` when the
    /// worker should stop.
    async fn pause(&mut self, delay: Duration) -> bool {
        let timer = sleep(delay);
        tokio::pin!(timer);
        loop {
            tokio::select! {
                _ = &mut timer => return true,
                changed = self.shutdown.changed() => match changed {
                    Err(_) => return false,
                    Ok(()) if *self.shutdown.borrow() => return false,
                    Ok(()) => {}
                },
            }
        }
    }
}
