// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Structural validation errors shared by the domain entities.

/// Errors raised when a domain entity fails structural validation.
///
/// Validation is performed eagerly at the system boundary (wire decoding,
/// categorization, snapshot requests) so that business logic only ever sees
/// well-formed entities.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required string field is empty or absent.
    #[error("missing required field: {field}")]
    MissingField {
        /// Name of the empty or absent field
        field: String,
    },

    /// A required numeric field is zero where zero is not a valid value.
    #[error("field must be non-zero: {field}")]
    ZeroField {
        /// Name of the zero-valued field
        field: String,
    },
}

impl ValidationError {
    /// Create a `MissingField` error for a specific field.
    pub fn missing_field(field: impl Into<String>) -> Self {
        ValidationError::MissingField {
            field: field.into(),
        }
    }

    /// Create a `ZeroField` error for a specific field.
    pub fn zero_field(field: impl Into<String>) -> Self {
        ValidationError::ZeroField {
            field: field.into(),
        }
    }
}
