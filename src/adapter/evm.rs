// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! EVM chain adapter on top of Alloy providers.

use std::str::FromStr;

use alloy_primitives::Address;
use alloy_provider::{Provider, ProviderBuilder};
use alloy_rpc_client::ClientBuilder;
use alloy_rpc_types::{BlockNumberOrTag, Filter, Log};
use async_trait::async_trait;
use tracing::debug;
use url::Url;

use super::{ChainAdapter, ChainBlock};
use crate::chain::{BlockHeader, RawLog, SmartcontractKey, Transaction, TransactionKey};
use crate::errors::AdapterError;
use crate::transport::RetryLayer;

/// Normalize an RPC log into the chain-agnostic model.
///
/// Returns `None` for logs that must not enter the pipeline: logs flagged
/// `removed` (reorged out) and pending logs that do not yet carry a block
/// number or transaction hash. Ranged queries often omit per-log timestamps;
/// `fallback_timestamp` fills the gap when the caller knows the block.
fn raw_log_from_rpc(network_id: &str, log: &Log, fallback_timestamp: Option<u64>) -> Option<RawLog> {
    if log.removed {
        return None;
    }
    let block_number = log.block_number?;
    let transaction_hash = log.transaction_hash?;
    let timestamp = log.block_timestamp.or(fallback_timestamp).unwrap_or_default();

    let transaction = Transaction::new(
        SmartcontractKey::new(network_id, log.address().to_string()),
        BlockHeader::new(block_number, timestamp),
        TransactionKey::new(
            transaction_hash.to_string(),
            log.transaction_index.unwrap_or_default(),
        ),
    );

    Some(
        RawLog::new(
            transaction,
            log.log_index.unwrap_or_default(),
            log.data().data.to_string(),
        )
        .with_topics(log.topics().iter().map(|topic| topic.to_string()).collect()),
    )
}

/// [`ChainAdapter`] implementation for EVM networks.
///
/// # Examples
///
/// ```rust,ignore
/// use chainfeed::adapter::EvmAdapter;
///
/// let adapter = EvmAdapter::from_http("1", "https://eth.example.com".parse()?);
/// let head = adapter.head_number().await?;
/// ```
#[derive(Debug, Clone)]
pub struct EvmAdapter<P> {
    provider: P,
    network_id: String,
}

impl<P: Provider> EvmAdapter<P> {
    /// Wrap an existing provider.
    pub fn new(provider: P, network_id: impl Into<String>) -> Self {
        Self {
            provider,
            network_id: network_id.into(),
        }
    }
}

impl EvmAdapter<()> {
    /// Connect over HTTP with the crate's retry layer installed.
    ///
    /// The retry layer handles short transient transport failures; the sync
    /// worker's own backoff discipline sits above it and covers everything
    /// longer-lived.
    pub fn from_http(network_id: impl Into<String>, url: Url) -> EvmAdapter<impl Provider> {
        let client = ClientBuilder::default().layer(RetryLayer::new()).http(url);
        let provider = ProviderBuilder::new().connect_client(client);
        EvmAdapter {
            provider,
            network_id: network_id.into(),
        }
    }
}

#[async_trait]
impl<P: Provider> ChainAdapter for EvmAdapter<P> {
    fn network_id(&self) -> &str {
        &self.network_id
    }

    async fn head_number(&self) -> Result<u64, AdapterError> {
        self.provider
            .get_block_number()
            .await
            .map_err(|e| AdapterError::rpc(e.to_string()))
    }

    async fn block_with_logs(&self, number: u64) -> Result<ChainBlock, AdapterError> {
        let tag = BlockNumberOrTag::Number(number);
        let filter = Filter::new().from_block(number).to_block(number);

        let (block, logs) = futures::try_join!(
            async { self.provider.get_block_by_number(tag).await },
            async { self.provider.get_logs(&filter).await },
        )
        .map_err(|e| AdapterError::rpc(e.to_string()))?;

        let block = block.ok_or(AdapterError::MissingBlock { number })?;
        let header = BlockHeader::new(block.header.number, block.header.timestamp);

        let logs: Vec<RawLog> = logs
            .iter()
            .filter_map(|log| raw_log_from_rpc(&self.network_id, log, Some(header.timestamp)))
            .collect();

        debug!(
            network_id = %self.network_id,
            number = number,
            logs_count = logs.len(),
            "Fetched block with logs"
        );

        Ok(ChainBlock {
            network_id: self.network_id.clone(),
            header,
            logs,
        })
    }

    async fn logs_in_range(
        &self,
        from: u64,
        to: u64,
        addresses: &[String],
    ) -> Result<Vec<RawLog>, AdapterError> {
        let addresses: Vec<Address> = addresses
            .iter()
            .map(|address| Address::from_str(address))
            .collect::<Result<_, _>>()
            .map_err(|e| AdapterError::rpc(format!("invalid address in filter: {e}")))?;

        let filter = Filter::new().from_block(from).to_block(to).address(addresses);
        let logs = self
            .provider
            .get_logs(&filter)
            .await
            .map_err(|e| AdapterError::rpc(e.to_string()))?;

        Ok(logs
            .iter()
            .filter_map(|log| raw_log_from_rpc(&self.network_id, log, None))
            .collect())
    }

    async fn block_timestamp(&self, number: u64) -> Result<u64, AdapterError> {
        let block = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Number(number))
            .await
            .map_err(|e| AdapterError::rpc(e.to_string()))?
            .ok_or(AdapterError::MissingBlock { number })?;
        Ok(block.header.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Bytes, LogData, B256};

    fn rpc_log(removed: bool, block_number: Option<u64>) -> Log {
        Log {
            inner: alloy_primitives::Log {
                address: Address::repeat_byte(0x11),
                data: LogData::new_unchecked(vec![B256::repeat_byte(0x22)], Bytes::from(vec![0xab])),
            },
            block_hash: None,
            block_number,
            block_timestamp: None,
            transaction_hash: Some(B256::repeat_byte(0x33)),
            transaction_index: Some(4),
            log_index: Some(2),
            removed,
        }
    }

    #[test]
    fn test_removed_logs_are_dropped() {
        assert!(raw_log_from_rpc("1", &rpc_log(true, Some(5)), Some(100)).is_none());
    }

    #[test]
    fn test_pending_logs_are_dropped() {
        assert!(raw_log_from_rpc("1", &rpc_log(false, None), Some(100)).is_none());
    }

    #[test]
    fn test_conversion_fills_fallback_timestamp() {
        let raw = raw_log_from_rpc("1", &rpc_log(false, Some(5)), Some(100)).unwrap();

        assert_eq!(raw.transaction.smartcontract_key.network_id, "1");
        assert_eq!(raw.transaction.block, BlockHeader::new(5, 100));
        assert_eq!(raw.transaction.key.index, 4);
        assert_eq!(raw.index, 2);
        assert_eq!(raw.topics.len(), 1);
        assert_eq!(raw.data, "0xab");
    }
}
