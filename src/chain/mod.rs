// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Chain-agnostic log model.
//!
//! This module defines the raw shapes that every chain adapter normalizes
//! into: a [`SmartcontractKey`] identifying a tracked contract, the
//! [`BlockHeader`] checkpoint, the [`TransactionKey`] and [`Transaction`]
//! context, and the [`RawLog`] itself. Logs flagged "removed" by a chain
//! (reorged out) are dropped by the adapter before a `RawLog` is ever
//! constructed, so everything in this model is post-reorg-filter.

mod block;
mod key;
mod log;
mod transaction;

pub use block::BlockHeader;
pub use key::SmartcontractKey;
pub use log::{filter_by_address, recent_block, RawLog};
pub use transaction::{Transaction, TransactionKey};
