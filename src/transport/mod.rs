// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Transport-level middleware for Alloy RPC clients.

mod retry;

pub use retry::{RetryConfig, RetryLayer};
