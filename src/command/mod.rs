// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! The gateway command surface.
//!
//! The transport itself (socket creation, connection security, wire framing)
//! is outside this crate; what arrives here is a named command with a
//! dictionary of parameters. [`CommandKind`] is the closed registry of those
//! names, the structs in [`requests`] are the per-command payload shapes, and
//! [`CommandHandler`] is the single place where a validation, referential, or
//! conflict error becomes a caller-visible failure reply with a
//! human-readable reason string.

mod requests;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tracing::error;

pub use requests::{
    CategorizeRequest, LogFilterRequest, LogFilterReply, SmartcontractGetReply,
    SmartcontractGetRequest, SmartcontractListReply, SmartcontractListRequest,
    SmartcontractSetRequest, SnapshotGetReply, SnapshotGetRequest, SubscriberStateReply,
    SubscriberStateRequest,
};

use crate::adapter::ChainAdapter;
use crate::categorizer::Categorizer;
use crate::chain::SmartcontractKey;
use crate::config::SyncConfig;
use crate::errors::StorageError;
use crate::snapshot::SnapshotService;
use crate::spans;
use crate::storage::{LogStore, SmartcontractStore};
use crate::sync::fetch_range;
use crate::topic::TopicFilter;

/// The closed set of command names understood by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// On-demand ranged log query
    LogFilter,
    /// Validate-and-persist one batch of decoded events
    Categorize,
    /// One page of the delivery read path
    SnapshotGet,
    /// Fetch one tracked contract
    SmartcontractGet,
    /// List tracked contracts on one network
    SmartcontractGetAllByNetworkId,
    /// Register a tracked contract
    SmartcontractSet,
    /// One-shot initial-cursor resolution
    SubscriberState,
}

impl CommandKind {
    /// Every command, in registry order.
    pub const ALL: [CommandKind; 7] = [
        CommandKind::LogFilter,
        CommandKind::Categorize,
        CommandKind::SnapshotGet,
        CommandKind::SmartcontractGet,
        CommandKind::SmartcontractGetAllByNetworkId,
        CommandKind::SmartcontractSet,
        CommandKind::SubscriberState,
    ];

    /// The command's wire name.
    pub fn name(self) -> &'static str {
        match self {
            CommandKind::LogFilter => "log-filter",
            CommandKind::Categorize => "categorize",
            CommandKind::SnapshotGet => "snapshot_get",
            CommandKind::SmartcontractGet => "smartcontract_get",
            CommandKind::SmartcontractGetAllByNetworkId => "smartcontract_get_all_by_network_id",
            CommandKind::SmartcontractSet => "smartcontract_set",
            CommandKind::SubscriberState => "subscriber_state",
        }
    }

    /// Resolve a wire name back to its command.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

/// Resolution of a topic filter to the tracked-contract keys it selects.
///
/// The filter-to-configuration mapping lives outside this core, so the
/// gateway takes it as a seam.
#[async_trait]
pub trait KeyResolver: Send + Sync {
    /// The keys a subscription with this filter should be scoped to.
    async fn resolve(&self, filter: &TopicFilter) -> Result<Vec<SmartcontractKey>, StorageError>;
}

type Responder<T> = oneshot::Sender<Result<T, String>>;

/// Commands accepted by the [`CommandHandler`] task.
pub enum Command {
    LogFilter {
        request: LogFilterRequest,
        responder: Responder<LogFilterReply>,
    },
    Categorize {
        request: CategorizeRequest,
        responder: Responder<()>,
    },
    SnapshotGet {
        request: SnapshotGetRequest,
        responder: Responder<SnapshotGetReply>,
    },
    SmartcontractGet {
        request: SmartcontractGetRequest,
        responder: Responder<SmartcontractGetReply>,
    },
    SmartcontractGetAllByNetworkId {
        request: SmartcontractListRequest,
        responder: Responder<SmartcontractListReply>,
    },
    SmartcontractSet {
        request: SmartcontractSetRequest,
        responder: Responder<()>,
    },
    SubscriberState {
        request: SubscriberStateRequest,
        responder: Responder<SubscriberStateReply>,
    },
}

/// The gateway's command-processing task.
///
/// Owns the categorizer, the snapshot service, and the chain adapter used by
/// the on-demand log filter, and serves commands from an mpsc queue with
/// oneshot responders.
pub struct CommandHandler<A, S, L, R> {
    adapter: Arc<A>,
    config: SyncConfig,
    smartcontracts: Arc<S>,
    categorizer: Categorizer<S, L>,
    snapshots: SnapshotService<L>,
    resolver: Arc<R>,
}

impl<A, S, L, R> CommandHandler<A, S, L, R>
where
    A: ChainAdapter + 'static,
    S: SmartcontractStore + 'static,
    L: LogStore + 'static,
    R: KeyResolver + 'static,
{
    /// Initializes the handler task and returns a [`FeedHandle`].
    pub fn init(
        adapter: Arc<A>,
        config: SyncConfig,
        smartcontracts: Arc<S>,
        logs: Arc<L>,
        resolver: Arc<R>,
    ) -> FeedHandle {
        let (tx, mut rx) = mpsc::channel(16);

        let handler = CommandHandler {
            adapter,
            config,
            smartcontracts: smartcontracts.clone(),
            categorizer: Categorizer::new(smartcontracts, logs.clone()),
            snapshots: SnapshotService::new(logs),
            resolver,
        };

        tokio::spawn(async move {
            while let Some(command) = rx.recv().await {
                handler.dispatch(command).await;
            }
        });

        FeedHandle { tx }
    }

    async fn dispatch(&self, command: Command) {
        match command {
            Command::LogFilter { request, responder } => {
                let result = self.handle_log_filter(request).await;
                if responder.send(result).is_err() {
                    error!("Failed to send log-filter response");
                }
            }
            Command::Categorize { request, responder } => {
                let result = self
                    .categorizer
                    .categorize(&request.smartcontracts, &request.logs)
                    .await
                    .map_err(|e| e.to_string());
                if responder.send(result).is_err() {
                    error!("Failed to send categorize response");
                }
            }
            Command::SnapshotGet { request, responder } => {
                let result = self
                    .snapshots
                    .get_snapshot(request.block_timestamp, &request.smartcontract_keys)
                    .await
                    .map(|snapshot| SnapshotGetReply {
                        block_timestamp: snapshot.next_cursor,
                        logs: snapshot.logs,
                    })
                    .map_err(|e| e.to_string());
                if responder.send(result).is_err() {
                    error!("Failed to send snapshot response");
                }
            }
            Command::SmartcontractGet { request, responder } => {
                let result = self
                    .categorizer
                    .get(&request.key)
                    .await
                    .map(|smartcontract| SmartcontractGetReply { smartcontract })
                    .map_err(|e| e.to_string());
                if responder.send(result).is_err() {
                    error!("Failed to send smartcontract response");
                }
            }
            Command::SmartcontractGetAllByNetworkId { request, responder } => {
                let result = self
                    .categorizer
                    .all_by_network_id(&request.network_id)
                    .await
                    .map(|smartcontracts| SmartcontractListReply { smartcontracts })
                    .map_err(|e| e.to_string());
                if responder.send(result).is_err() {
                    error!("Failed to send smartcontract list response");
                }
            }
            Command::SmartcontractSet { request, responder } => {
                let result = self.handle_smartcontract_set(request).await;
                if responder.send(result).is_err() {
                    error!("Failed to send smartcontract set response");
                }
            }
            Command::SubscriberState { request, responder } => {
                let result = self.handle_subscriber_state(request).await;
                if responder.send(result).is_err() {
                    error!("Failed to send subscriber state response");
                }
            }
        }
    }

    async fn handle_log_filter(
        &self,
        request: LogFilterRequest,
    ) -> Result<LogFilterReply, String> {
        let range = fetch_range(
            self.adapter.as_ref(),
            &self.config,
            request.block_from,
            &request.addresses,
        )
        .await
        .map_err(|e| e.to_string())?;

        Ok(LogFilterReply {
            block_to: range.block_to,
            block_timestamp: range.timestamp,
            raw_logs: range.logs,
        })
    }

    async fn handle_smartcontract_set(
        &self,
        request: SmartcontractSetRequest,
    ) -> Result<(), String> {
        request
            .smartcontract
            .validate()
            .map_err(|e| e.to_string())?;
        self.smartcontracts
            .register(request.smartcontract)
            .await
            .map_err(|e| e.to_string())
    }

    /// Resolve the filter to its contract scope and answer with the smallest
    /// checkpoint timestamp among the matching contracts, so a new
    /// subscription starts where categorization of its slowest contract
    /// stands. An empty scope starts from zero.
    async fn handle_subscriber_state(
        &self,
        request: SubscriberStateRequest,
    ) -> Result<SubscriberStateReply, String> {
        let keys = self
            .resolver
            .resolve(&request.topic_filter)
            .await
            .map_err(|e| e.to_string())?;

        let mut cursor: Option<u64> = None;
        for key in &keys {
            let record = self
                .smartcontracts
                .get(key)
                .await
                .map_err(|e| e.to_string())?;
            let timestamp = record.checkpoint.timestamp;
            cursor = Some(cursor.map_or(timestamp, |c| c.min(timestamp)));
        }

        Ok(SubscriberStateReply {
            block_timestamp: cursor.unwrap_or(0),
        })
    }
}

/// Cloneable handle for submitting commands to the handler task.
#[derive(Clone)]
pub struct FeedHandle {
    /// Raw command queue; prefer [`FeedHandle::request`] for wire payloads
    pub tx: mpsc::Sender<Command>,
}

impl FeedHandle {
    /// Decode and dispatch one wire command, replying with a wire value.
    ///
    /// This is the command boundary: decoding failures, validation and
    /// referential failures, and storage conflicts all come back as `Err`
    /// with a human-readable reason string.
    pub async fn request(&self, name: &str, params: Value) -> Result<Value, String> {
        let kind = {
            let span = spans::command(name);
            let _guard = span.enter();
            CommandKind::from_name(name).ok_or_else(|| format!("unknown command: {name}"))?
        };

        match kind {
            CommandKind::LogFilter => {
                let request = LogFilterRequest::from_value(&params).map_err(|e| e.to_string())?;
                let reply = self
                    .submit(|responder| Command::LogFilter { request, responder })
                    .await?;
                reply.to_value().map_err(|e| e.to_string())
            }
            CommandKind::Categorize => {
                let request = CategorizeRequest::from_value(&params).map_err(|e| e.to_string())?;
                self.submit(|responder| Command::Categorize { request, responder })
                    .await?;
                Ok(Value::Object(serde_json::Map::new()))
            }
            CommandKind::SnapshotGet => {
                let request = SnapshotGetRequest::from_value(&params).map_err(|e| e.to_string())?;
                let reply = self
                    .submit(|responder| Command::SnapshotGet { request, responder })
                    .await?;
                Ok(reply.to_value())
            }
            CommandKind::SmartcontractGet => {
                let request =
                    SmartcontractGetRequest::from_value(&params).map_err(|e| e.to_string())?;
                let reply = self
                    .submit(|responder| Command::SmartcontractGet { request, responder })
                    .await?;
                Ok(reply.to_value())
            }
            CommandKind::SmartcontractGetAllByNetworkId => {
                let request =
                    SmartcontractListRequest::from_value(&params).map_err(|e| e.to_string())?;
                let reply = self
                    .submit(|responder| Command::SmartcontractGetAllByNetworkId {
                        request,
                        responder,
                    })
                    .await?;
                Ok(reply.to_value())
            }
            CommandKind::SmartcontractSet => {
                let request =
                    SmartcontractSetRequest::from_value(&params).map_err(|e| e.to_string())?;
                self.submit(|responder| Command::SmartcontractSet { request, responder })
                    .await?;
                Ok(Value::Object(serde_json::Map::new()))
            }
            CommandKind::SubscriberState => {
                let request =
                    SubscriberStateRequest::from_value(&params).map_err(|e| e.to_string())?;
                let reply = self
                    .submit(|responder| Command::SubscriberState { request, responder })
                    .await?;
                Ok(reply.to_value())
            }
        }
    }

    async fn submit<T>(
        &self,
        build: impl FnOnce(Responder<T>) -> Command,
    ) -> Result<T, String> {
        let (responder, rx) = oneshot::channel();
        self.tx
            .send(build(responder))
            .await
            .map_err(|_| "command channel closed".to_owned())?;
        rx.await.map_err(|_| "command handler stopped".to_owned())?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_names_round_trip() {
        for kind in CommandKind::ALL {
            assert_eq!(CommandKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(CommandKind::from_name("no_such_command"), None);
    }
}
