// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for topic and topic-filter parsing.
//!
//! The topic string grammar (`o,p,n,g,s,e` keys, `;` segment separator,
//! `:` key/value separator) is part of the stable external format, so these
//! errors are what a caller sees when a persisted or submitted topic string
//! does not conform.

/// Errors raised while parsing or encoding topics and topic filters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopicError {
    /// A requested encoding level is outside `1..=6`.
    #[error("topic level out of range: {level}")]
    LevelOutOfRange {
        /// The requested level
        level: u8,
    },

    /// A requested encoding level is deeper than the populated prefix.
    #[error("topic populated to level {populated}, cannot encode level {requested}")]
    UnpopulatedLevel {
        /// The requested level
        requested: u8,
        /// The level the topic is actually populated to
        populated: u8,
    },

    /// A topic string has fewer than 2 or more than 6 segments.
    #[error("topic string must have 2 to 6 segments, found {count}")]
    SegmentCount {
        /// Number of segments found
        count: usize,
    },

    /// A segment is not of the form `key:value`.
    #[error("malformed topic segment: {segment:?}")]
    MalformedSegment {
        /// The offending segment
        segment: String,
    },

    /// A segment key is not one of `o,p,n,g,s,e`.
    #[error("unknown topic key: {key:?}")]
    UnknownKey {
        /// The offending key
        key: String,
    },

    /// The same key appears in more than one segment.
    #[error("duplicate topic key: {key:?}")]
    DuplicateKey {
        /// The repeated key
        key: String,
    },

    /// A value contains a character outside `[A-Za-z0-9 _-]`.
    #[error("invalid topic value: {value:?}")]
    InvalidValue {
        /// The offending value
        value: String,
    },

    /// A topic filter dictionary is not a JSON object.
    #[error("topic filter must be a dictionary, found {found}")]
    InvalidFilterShape {
        /// Short description of the encountered JSON shape
        found: String,
    },
}

impl TopicError {
    /// Create a `MalformedSegment` error.
    pub fn malformed_segment(segment: impl Into<String>) -> Self {
        TopicError::MalformedSegment {
            segment: segment.into(),
        }
    }

    /// Create an `UnknownKey` error.
    pub fn unknown_key(key: impl Into<String>) -> Self {
        TopicError::UnknownKey { key: key.into() }
    }

    /// Create a `DuplicateKey` error.
    pub fn duplicate_key(key: impl Into<String>) -> Self {
        TopicError::DuplicateKey { key: key.into() }
    }

    /// Create an `InvalidValue` error.
    pub fn invalid_value(value: impl Into<String>) -> Self {
        TopicError::InvalidValue {
            value: value.into(),
        }
    }
}
