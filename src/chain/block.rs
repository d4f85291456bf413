// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// A block checkpoint: number and unix timestamp, both in seconds-of-truth
/// units for their chain.
///
/// This is deliberately not a full block; it marks a position on a chain.
/// Once validated, both fields are non-zero. The all-zero header is the
/// conventional result of reducing an empty log set (see
/// [`recent_block`](super::recent_block)).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    /// Block height
    pub number: u64,
    /// Block unix timestamp
    pub timestamp: u64,
}

impl BlockHeader {
    /// Create a new header.
    pub fn new(number: u64, timestamp: u64) -> Self {
        Self { number, timestamp }
    }

    /// Structural validation: both fields must be non-zero.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.number == 0 {
            return Err(ValidationError::zero_field("block_number"));
        }
        if self.timestamp == 0 {
            return Err(ValidationError::zero_field("block_timestamp"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_non_zero_fields() {
        assert!(BlockHeader::new(0, 10).validate().is_err());
        assert!(BlockHeader::new(10, 0).validate().is_err());
        assert!(BlockHeader::new(10, 10).validate().is_ok());
    }

    #[test]
    fn test_default_is_the_zero_header() {
        assert_eq!(BlockHeader::default(), BlockHeader::new(0, 0));
    }
}
