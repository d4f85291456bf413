//! Configuration for the sync and delivery pipeline
//!
//! This module provides a flexible configuration system for controlling the
//! retry discipline, polling cadence, and paging limits of the pipeline,
//! with per-network overrides on top of global defaults.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use chainfeed::SyncConfig;
//!
//! // 1s head retry, 10s block retry, 1s poll delay, 500-block batches
//! let config = SyncConfig::default();
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use chainfeed::{SyncConfigBuilder, BackoffPolicy};
//! use std::time::Duration;
//!
//! let config = SyncConfigBuilder::new()
//!     .block_backoff(BackoffPolicy::Exponential {
//!         base: Duration::from_secs(1),
//!         max: Duration::from_secs(60),
//!     })
//!     .network_batch_length("imx", 100)
//!     .build();
//! ```

use std::collections::HashMap;
use std::time::Duration;

use crate::sync::BackoffPolicy;

pub mod constants;

use constants::{paging, timing};

/// Configuration for the sync and delivery pipeline
///
/// Controls the worker's retry backoff, polling cadence, and the paging
/// limits of the on-demand log-filter query. Use [`SyncConfigBuilder`] for a
/// fluent API to construct instances.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Backoff applied while acquiring the chain head at worker start
    pub head_backoff: BackoffPolicy,

    /// Backoff applied when a block fails to fetch; the cursor holds
    pub block_backoff: BackoffPolicy,

    /// Pause after each successfully broadcast block
    pub poll_delay: Duration,

    /// Maximum block range of a single on-demand log-filter query
    pub batch_length: u64,

    /// Network-specific overrides, keyed by network id
    pub network_overrides: HashMap<String, NetworkConfig>,
}

/// Network-specific configuration overrides
#[derive(Debug, Clone, Default)]
pub struct NetworkConfig {
    /// Override head-acquisition backoff for this network
    pub head_backoff: Option<BackoffPolicy>,

    /// Override block-retry backoff for this network
    pub block_backoff: Option<BackoffPolicy>,

    /// Override the post-block pause for this network
    pub poll_delay: Option<Duration>,

    /// Override the log-filter batch length for this network
    pub batch_length: Option<u64>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            head_backoff: BackoffPolicy::Fixed(timing::HEAD_RETRY_DELAY),
            block_backoff: BackoffPolicy::Fixed(timing::BLOCK_RETRY_DELAY),
            poll_delay: timing::BLOCK_POLL_DELAY,
            batch_length: paging::PROVIDER_BATCH_LENGTH,
            network_overrides: HashMap::new(),
        }
    }
}

impl SyncConfig {
    /// Effective head-acquisition backoff for a network.
    pub fn head_backoff_for(&self, network_id: &str) -> BackoffPolicy {
        self.network_overrides
            .get(network_id)
            .and_then(|c| c.head_backoff)
            .unwrap_or(self.head_backoff)
    }

    /// Effective block-retry backoff for a network.
    pub fn block_backoff_for(&self, network_id: &str) -> BackoffPolicy {
        self.network_overrides
            .get(network_id)
            .and_then(|c| c.block_backoff)
            .unwrap_or(self.block_backoff)
    }

    /// Effective post-block pause for a network.
    pub fn poll_delay_for(&self, network_id: &str) -> Duration {
        self.network_overrides
            .get(network_id)
            .and_then(|c| c.poll_delay)
            .unwrap_or(self.poll_delay)
    }

    /// Effective log-filter batch length for a network.
    pub fn batch_length_for(&self, network_id: &str) -> u64 {
        self.network_overrides
            .get(network_id)
            .and_then(|c| c.batch_length)
            .unwrap_or(self.batch_length)
    }

    /// Set a network-specific override.
    pub fn set_network_override(&mut self, network_id: impl Into<String>, config: NetworkConfig) {
        self.network_overrides.insert(network_id.into(), config);
    }
}

/// Builder for [`SyncConfig`]
///
/// # Example
///
/// ```rust
/// use chainfeed::SyncConfigBuilder;
/// use std::time::Duration;
///
/// let config = SyncConfigBuilder::new()
///     .poll_delay(Duration::from_millis(500))
///     .network_poll_delay("imx", Duration::from_secs(2))
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct SyncConfigBuilder {
    config: SyncConfig,
}

impl SyncConfigBuilder {
    /// Create a new builder with the common defaults.
    pub fn new() -> Self {
        Self {
            config: SyncConfig::default(),
        }
    }

    /// Set the global head-acquisition backoff.
    pub fn head_backoff(mut self, policy: BackoffPolicy) -> Self {
        self.config.head_backoff = policy;
        self
    }

    /// Set the global block-retry backoff.
    pub fn block_backoff(mut self, policy: BackoffPolicy) -> Self {
        self.config.block_backoff = policy;
        self
    }

    /// Set the global post-block pause.
    pub fn poll_delay(mut self, delay: Duration) -> Self {
        self.config.poll_delay = delay;
        self
    }

    /// Set the global log-filter batch length.
    pub fn batch_length(mut self, length: u64) -> Self {
        self.config.batch_length = length;
        self
    }

    /// Add a full network-specific configuration.
    pub fn network_config(mut self, network_id: impl Into<String>, config: NetworkConfig) -> Self {
        self.config.set_network_override(network_id, config);
        self
    }

    /// Convenience: set the post-block pause for one network.
    pub fn network_poll_delay(mut self, network_id: impl Into<String>, delay: Duration) -> Self {
        let network_id = network_id.into();
        let mut existing = self
            .config
            .network_overrides
            .remove(&network_id)
            .unwrap_or_default();
        existing.poll_delay = Some(delay);
        self.config.set_network_override(network_id, existing);
        self
    }

    /// Convenience: set the log-filter batch length for one network.
    pub fn network_batch_length(mut self, network_id: impl Into<String>, length: u64) -> Self {
        let network_id = network_id.into();
        let mut existing = self
            .config
            .network_overrides
            .remove(&network_id)
            .unwrap_or_default();
        existing.batch_length = Some(length);
        self.config.set_network_override(network_id, existing);
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> SyncConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SyncConfig::default();

        assert_eq!(
            config.head_backoff_for("any"),
            BackoffPolicy::Fixed(Duration::from_secs(1))
        );
        assert_eq!(
            config.block_backoff_for("any"),
            BackoffPolicy::Fixed(Duration::from_secs(10))
        );
        assert_eq!(config.poll_delay_for("any"), Duration::from_secs(1));
        assert_eq!(config.batch_length_for("any"), 500);
    }

    #[test]
    fn test_network_override_shadows_global() {
        let config = SyncConfigBuilder::new()
            .network_batch_length("imx", 100)
            .build();

        assert_eq!(config.batch_length_for("imx"), 100);
        assert_eq!(config.batch_length_for("eth"), 500);
    }

    #[test]
    fn test_builder_preserves_existing_override_fields() {
        let config = SyncConfigBuilder::new()
            .network_batch_length("imx", 100)
            .network_poll_delay("imx", Duration::from_secs(2))
            .build();

        assert_eq!(config.batch_length_for("imx"), 100);
        assert_eq!(config.poll_delay_for("imx"), Duration::from_secs(2));
    }
}
