// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Chain adapters.
//!
//! A [`ChainAdapter`] is the seam between the sync worker and a concrete
//! blockchain client. Adapters normalize chain-specific log shapes into the
//! [`RawLog`](crate::chain::RawLog) model and are responsible for dropping
//! logs flagged "removed" by the chain (reorged out); the worker has no
//! reorg handling beyond that filter.

mod evm;

use async_trait::async_trait;

pub use evm::EvmAdapter;

use crate::chain::{BlockHeader, RawLog};
use crate::errors::AdapterError;

/// A fully assembled block as broadcast by the sync worker.
#[derive(Debug, Clone)]
pub struct ChainBlock {
    /// Network the block belongs to
    pub network_id: String,
    /// Block number and timestamp
    pub header: BlockHeader,
    /// Logs emitted in the block, post reorg filter
    pub logs: Vec<RawLog>,
}

/// Read access to one blockchain network.
#[async_trait]
pub trait ChainAdapter: Send + Sync {
    /// Identifier of the network this adapter serves.
    fn network_id(&self) -> &str;

    /// The most recent block number the chain reports.
    async fn head_number(&self) -> Result<u64, AdapterError>;

    /// The block at `number` together with all of its logs.
    ///
    /// Fails with [`AdapterError::MissingBlock`] when the chain has not
    /// produced the block yet.
    async fn block_with_logs(&self, number: u64) -> Result<ChainBlock, AdapterError>;

    /// All logs emitted by `addresses` in `[from, to]`, inclusive.
    async fn logs_in_range(
        &self,
        from: u64,
        to: u64,
        addresses: &[String],
    ) -> Result<Vec<RawLog>, AdapterError>;

    /// The unix timestamp of block `number`.
    async fn block_timestamp(&self, number: u64) -> Result<u64, AdapterError>;
}
