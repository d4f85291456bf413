// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tower-based retry layer with backoff for Alloy RPC providers.
//!
//! This layer handles short transient transport failures (connection resets,
//! HTTP 5xx, rate limits) with a bounded number of retries. The sync worker's
//! own unbounded, fixed-delay discipline sits above it: when this layer gives
//! up, the worker holds its cursor and tries the whole call again.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
    time::Duration,
};

use alloy_json_rpc::{RequestPacket, ResponsePacket, RpcError};
use alloy_transport::{TransportError, TransportErrorKind};
use tower::Layer;
use tracing::{debug, warn};

use crate::sync::BackoffPolicy;

/// Default maximum number of retry attempts.
const DEFAULT_MAX_RETRIES: u32 = 3;
/// Default base delay for exponential backoff (100ms).
const DEFAULT_BASE_DELAY_MS: u64 = 100;
/// Default maximum delay between retries (30 seconds).
const DEFAULT_MAX_DELAY_MS: u64 = 30_000;

/// A Tower layer that adds retry logic to RPC requests.
///
/// # Example
///
/// ```rust,ignore
/// use chainfeed::transport::RetryLayer;
/// use chainfeed::BackoffPolicy;
/// use alloy_rpc_client::ClientBuilder;
/// use std::time::Duration;
///
/// let layer = RetryLayer::with_policy(
///     5,
///     BackoffPolicy::Fixed(Duration::from_millis(200)),
/// );
///
/// let client = ClientBuilder::default()
///     .layer(layer)
///     .http(rpc_url);
/// ```
#[derive(Clone, Debug)]
pub struct RetryLayer {
    config: Arc<RetryConfig>,
}

/// Configuration for retry behavior.
#[derive(Clone, Debug)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (not including the initial request).
    pub max_retries: u32,
    /// Delay schedule between attempts.
    pub backoff: BackoffPolicy,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            backoff: BackoffPolicy::Exponential {
                base: Duration::from_millis(DEFAULT_BASE_DELAY_MS),
                max: Duration::from_millis(DEFAULT_MAX_DELAY_MS),
            },
        }
    }
}

impl RetryLayer {
    /// Creates a new retry layer with default settings: 3 attempts with
    /// exponential backoff from 100ms up to 30s.
    pub fn new() -> Self {
        Self {
            config: Arc::new(RetryConfig::default()),
        }
    }

    /// Creates a retry layer with an explicit attempt bound and backoff
    /// policy.
    pub fn with_policy(max_retries: u32, backoff: BackoffPolicy) -> Self {
        Self {
            config: Arc::new(RetryConfig {
                max_retries,
                backoff,
            }),
        }
    }
}

impl Default for RetryLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for RetryLayer {
    type Service = RetryService<S>;

    fn layer(&self, service: S) -> Self::Service {
        RetryService {
            service,
            config: self.config.clone(),
        }
    }
}

/// A Tower service that adds retry logic to an inner transport service.
#[derive(Clone, Debug)]
pub struct RetryService<S> {
    service: S,
    config: Arc<RetryConfig>,
}

impl<S> tower::Service<RequestPacket> for RetryService<S>
where
    S: tower::Service<RequestPacket, Response = ResponsePacket, Error = TransportError>
        + Clone
        + Send
        + 'static,
    S::Future: Send,
{
    type Response = ResponsePacket;
    type Error = TransportError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&mut self, request: RequestPacket) -> Self::Future {
        let service = self.service.clone();
        let config = self.config.clone();

        Box::pin(async move {
            let mut attempt = 0u32;
            loop {
                let mut service_clone = service.clone();

                match service_clone.call(request.clone()).await {
                    Ok(response) => {
                        if attempt > 0 {
                            debug!(attempt = attempt, "Request succeeded after retry");
                        }
                        return Ok(response);
                    }
                    Err(error) => {
                        if !is_retryable_error(&error) {
                            debug!(
                                error = %error,
                                "Non-retryable error, not retrying"
                            );
                            return Err(error);
                        }

                        if attempt >= config.max_retries {
                            warn!(
                                error = %error,
                                attempts = attempt + 1,
                                "Max retries exceeded"
                            );
                            return Err(error);
                        }

                        let delay = config.backoff.delay(attempt);
                        warn!(
                            error = %error,
                            attempt = attempt + 1,
                            max_retries = config.max_retries,
                            delay_ms = delay.as_millis(),
                            "Retryable error, backing off"
                        );

                        tokio::time::sleep(delay).await;
                        attempt += 1;
                    }
                }
            }
        })
    }
}

/// Determines if an error is retryable.
///
/// Returns `true` for transient errors that may succeed on retry and `false`
/// for errors that will not benefit from one (a malformed request stays
/// malformed).
fn is_retryable_error(error: &TransportError) -> bool {
    match error {
        RpcError::Transport(kind) => is_transport_kind_retryable(kind),
        // Serialization errors indicate a malformed request - not retryable
        RpcError::SerError(_) => false,
        // Deserialization errors may be transient (malformed response)
        RpcError::DeserError { .. } => true,
        RpcError::ErrorResp(err) => err.is_retry_err(),
        // Null response may be a transient issue
        RpcError::NullResp => true,
        _ => false,
    }
}

fn is_transport_kind_retryable(kind: &TransportErrorKind) -> bool {
    kind.is_retry_err()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_layer_default() {
        let layer = RetryLayer::new();
        assert_eq!(layer.config.max_retries, DEFAULT_MAX_RETRIES);
        assert_eq!(
            layer.config.backoff,
            BackoffPolicy::Exponential {
                base: Duration::from_millis(DEFAULT_BASE_DELAY_MS),
                max: Duration::from_millis(DEFAULT_MAX_DELAY_MS),
            }
        );
    }

    #[test]
    fn test_retry_layer_with_policy() {
        let layer = RetryLayer::with_policy(5, BackoffPolicy::Fixed(Duration::from_millis(200)));
        assert_eq!(layer.config.max_retries, 5);
        assert_eq!(
            layer.config.backoff.delay(9),
            Duration::from_millis(200),
            "fixed policy ignores the attempt number"
        );
    }
}
