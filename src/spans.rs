// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Span creation helpers for pipeline operations.
//!
//! Telemetry concerns are kept orthogonal to business logic: instead of
//! `#[instrument]` attributes on functions, each instrumented operation has a
//! corresponding span helper here. The helpers are entered around the
//! synchronous validation sections only, so the guards never live across an
//! await point.

use tracing::Span;

/// Create span for validating and persisting a categorization batch.
#[inline]
pub(crate) fn categorize(smartcontracts: usize, logs: usize) -> Span {
    tracing::debug_span!(
        "chainfeed.categorize",
        smartcontracts = smartcontracts,
        logs = logs,
    )
}

/// Create span for serving one snapshot request.
#[inline]
pub(crate) fn snapshot_get(cursor: u64, keys: usize) -> Span {
    tracing::debug_span!("chainfeed.snapshot_get", cursor = cursor, keys = keys,)
}

/// Create span for decoding and dispatching one wire command.
#[inline]
pub(crate) fn command(name: &str) -> Span {
    tracing::debug_span!("chainfeed.command", name = name,)
}
