// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Backoff policies for the pipeline's retry loops.

use std::time::Duration;

/// How long to wait before retry attempt `n`.
///
/// The sync worker retries its chain calls indefinitely, since connectivity
/// loss is always transient from its point of view, so a policy only shapes the
/// delay, never the attempt count. `Fixed` reproduces the classic
/// one-delay-per-stage discipline; `Exponential` backs off as
/// `min(base * 2^attempt, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackoffPolicy {
    /// The same delay for every attempt.
    Fixed(Duration),
    /// Exponentially growing delay, capped at `max`.
    Exponential {
        /// Delay before the first retry
        base: Duration,
        /// Upper bound for the computed delay
        max: Duration,
    },
}

impl BackoffPolicy {
    /// The delay to apply before retry attempt `attempt` (0-based).
    pub fn delay(&self, attempt: u32) -> Duration {
        match self {
            BackoffPolicy::Fixed(delay) => *delay,
            BackoffPolicy::Exponential { base, max } => {
                let multiplier = 2u64.saturating_pow(attempt);
                let delay_ms = base.as_millis().saturating_mul(multiplier as u128);
                let capped_ms = delay_ms.min(max.as_millis()) as u64;
                Duration::from_millis(capped_ms)
            }
        }
    }
}
