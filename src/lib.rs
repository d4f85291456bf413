pub mod adapter;
pub mod categorizer;
pub mod chain;
pub mod command;
pub mod config;
pub mod errors;
pub mod record;
pub mod smartcontract;
pub mod snapshot;
mod spans;
pub mod storage;
pub mod subscriber;
pub mod sync;
pub mod topic;
pub mod transport;
pub mod wire;

pub use adapter::{ChainAdapter, ChainBlock, EvmAdapter};
pub use categorizer::Categorizer;
pub use chain::{
    filter_by_address, recent_block, BlockHeader, RawLog, SmartcontractKey, Transaction,
    TransactionKey,
};
pub use command::{CommandHandler, CommandKind, FeedHandle, KeyResolver};
pub use config::{NetworkConfig, SyncConfig, SyncConfigBuilder};
pub use errors::ChainfeedError;
pub use record::{EventRecord, RecordIdentity};
pub use smartcontract::Smartcontract;
pub use snapshot::{Snapshot, SnapshotService};
pub use storage::{LogStore, MemoryStore, SmartcontractStore};
pub use subscriber::{SnapshotClient, Subscriber, SubscriberEvent};
pub use sync::{fetch_range, BackoffPolicy, LogRange, SyncWorker};
pub use topic::{Topic, TopicFilter};
