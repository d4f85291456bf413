// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for wire dictionary decoding.

/// Errors raised while decoding a wire dictionary into a typed request,
/// reply, or domain record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    /// A required field is absent from the dictionary.
    #[error("missing wire field: {field}")]
    MissingField {
        /// Name of the absent field
        field: String,
    },

    /// A field is present but has the wrong JSON type.
    #[error("wire field {field} is not a {expected}")]
    InvalidType {
        /// Name of the mistyped field
        field: String,
        /// The expected JSON type
        expected: &'static str,
    },

    /// A field could not be coerced to a number.
    ///
    /// Numeric fields are accepted as native numbers, JSON numbers, or
    /// numeric strings; anything else lands here.
    #[error("wire field {field} is not a valid number: {value:?}")]
    InvalidNumber {
        /// Name of the field
        field: String,
        /// The value that failed coercion
        value: String,
    },

    /// The payload as a whole is not a dictionary.
    #[error("wire payload must be a dictionary, found {found}")]
    InvalidShape {
        /// Short description of the encountered JSON shape
        found: String,
    },
}

impl WireError {
    /// Create a `MissingField` error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        WireError::MissingField {
            field: field.into(),
        }
    }

    /// Create an `InvalidType` error.
    pub fn invalid_type(field: impl Into<String>, expected: &'static str) -> Self {
        WireError::InvalidType {
            field: field.into(),
            expected,
        }
    }

    /// Create an `InvalidNumber` error.
    pub fn invalid_number(field: impl Into<String>, value: impl Into<String>) -> Self {
        WireError::InvalidNumber {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create an `InvalidShape` error.
    pub fn invalid_shape(found: impl Into<String>) -> Self {
        WireError::InvalidShape {
            found: found.into(),
        }
    }
}
