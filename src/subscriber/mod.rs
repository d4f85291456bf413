// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! The client-side subscriber loop.
//!
//! A [`Subscriber`] drives one subscription: it resolves its initial cursor
//! with a one-shot subscriber-state query, then polls the snapshot service,
//! forwarding each page to its output channel together with the
//! `[cursor, next_cursor)` window it covers.
//!
//! Delivery is at-least-once (consecutive windows may overlap at their
//! boundary timestamp), so consumers deduplicate on
//! [`EventRecord::identity`](crate::record::EventRecord::identity).

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};
use tracing::{debug, error, info};

use crate::chain::SmartcontractKey;
use crate::config::constants::timing;
use crate::errors::SubscribeError;
use crate::record::EventRecord;
use crate::snapshot::Snapshot;
use crate::topic::TopicFilter;

/// The subscriber's view of the gateway.
///
/// The transport behind it (socket creation, connection security, wire
/// framing) is outside this crate; implementations only need to answer the
/// two logical requests.
#[async_trait]
pub trait SnapshotClient: Send + Sync {
    /// One-shot query resolving the initial cursor for a topic filter.
    async fn subscriber_state(&self, filter: &TopicFilter) -> Result<u64, SubscribeError>;

    /// Fetch one snapshot page.
    async fn snapshot(
        &self,
        cursor: u64,
        keys: &[SmartcontractKey],
    ) -> Result<Snapshot, SubscribeError>;
}

/// Messages emitted on the subscriber's output channel.
#[derive(Debug, Clone)]
pub enum SubscriberEvent {
    /// One snapshot page covering `[window_start, window_end)`.
    Logs {
        /// Cursor the page was requested with
        window_start: u64,
        /// Cursor to request the next page with
        window_end: u64,
        /// Records delivered in this page
        logs: Vec<EventRecord>,
    },
    /// The loop hit an unrecoverable error and terminated.
    Failed {
        /// Human-readable reason
        reason: String,
    },
}

/// Single logical thread of control for one subscription.
///
/// The loop never terminates on its own in the success path; it stops on an
/// upstream error (after emitting [`SubscriberEvent::Failed`]), when the
/// output channel is closed, or when the shutdown signal flips.
pub struct Subscriber<C> {
    client: Arc<C>,
    filter: TopicFilter,
    keys: Vec<SmartcontractKey>,
    poll_interval: Duration,
    out: mpsc::Sender<SubscriberEvent>,
    shutdown: watch::Receiver<bool>,
}

impl<C: SnapshotClient + 'static> Subscriber<C> {
    /// Create a new subscriber.
    ///
    /// `keys` is the contract scope resolved externally from the topic
    /// filter; `filter` is still sent with the one-shot state query.
    pub fn new(
        client: Arc<C>,
        filter: TopicFilter,
        keys: Vec<SmartcontractKey>,
        out: mpsc::Sender<SubscriberEvent>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            client,
            filter,
            keys,
            poll_interval: timing::SUBSCRIBER_POLL_INTERVAL,
            out,
            shutdown,
        }
    }

    /// Override the pause between polls.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Spawn the subscriber onto the runtime.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Drive the subscription until error or shutdown.
    pub async fn run(mut self) {
        let mut cursor = match self.client.subscriber_state(&self.filter).await {
            Ok(cursor) => cursor,
            Err(error) => {
                error!(error = %error, "Subscriber state query failed");
                let _ = self
                    .out
                    .send(SubscriberEvent::Failed {
                        reason: error.to_string(),
                    })
                    .await;
                return;
            }
        };
        info!(cursor = cursor, keys = self.keys.len(), "Subscription started");

        loop {
            if *self.shutdown.borrow() {
                break;
            }

            match self.client.snapshot(cursor, &self.keys).await {
                Ok(Snapshot { next_cursor, logs }) => {
                    debug!(
                        window_start = cursor,
                        window_end = next_cursor,
                        logs_count = logs.len(),
                        "Snapshot page received"
                    );
                    let event = SubscriberEvent::Logs {
                        window_start: cursor,
                        window_end: next_cursor,
                        logs,
                    };
                    if self.out.send(event).await.is_err() {
                        break;
                    }
                    cursor = next_cursor;
                    if !self.pause().await {
                        break;
                    }
                }
                Err(error) => {
                    error!(error = %error, cursor = cursor, "Snapshot poll failed");
                    let _ = self
                        .out
                        .send(SubscriberEvent::Failed {
                            reason: error.to_string(),
                        })
                        .await;
                    break;
                }
            }
        }

        info!("Subscription stopped");
    }

    /// Sleep for the poll interval, waking early on shutdown. Returns
    /// `false` when the loop should stop.
    async fn pause(&mut self) -> bool {
        let timer = sleep(self.poll_interval);
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
