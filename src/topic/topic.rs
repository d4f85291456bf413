// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Write as _;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::TopicError;

/// Number of levels in a fully-populated topic path.
pub const TOPIC_DEPTH: u8 = 6;

/// Single-letter segment keys, in level order.
const KEYS: [&str; TOPIC_DEPTH as usize] = ["o", "p", "n", "g", "s", "e"];

/// Whether a value conforms to the literal token charset `[A-Za-z0-9 _-]*`.
pub(crate) fn is_literal_token(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '_' || c == '-')
}

/// A 6-level hierarchical address:
/// organization → project → network id → group → smartcontract → event.
///
/// Fields are optional but left-to-right required: the populated fields must
/// form a contiguous prefix. A field populated after a gap does not deepen
/// the topic (see [`Topic::level`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// Organization the contract belongs to
    #[serde(default)]
    pub organization: String,
    /// Project within the organization
    #[serde(default)]
    pub project: String,
    /// Network the contract is deployed on
    #[serde(default)]
    pub network_id: String,
    /// Free-form contract grouping
    #[serde(default)]
    pub group: String,
    /// Contract name
    #[serde(default)]
    pub smartcontract: String,
    /// Event name
    #[serde(default)]
    pub event: String,
}

impl Topic {
    fn fields(&self) -> [&str; TOPIC_DEPTH as usize] {
        [
            &self.organization,
            &self.project,
            &self.network_id,
            &self.group,
            &self.smartcontract,
            &self.event,
        ]
    }

    /// Builder-style setters used during parsing and registration.
    pub fn with_organization(mut self, value: impl Into<String>) -> Self {
        self.organization = value.into();
        self
    }

    pub fn with_project(mut self, value: impl Into<String>) -> Self {
        self.project = value.into();
        self
    }

    pub fn with_network_id(mut self, value: impl Into<String>) -> Self {
        self.network_id = value.into();
        self
    }

    pub fn with_group(mut self, value: impl Into<String>) -> Self {
        self.group = value.into();
        self
    }

    pub fn with_smartcontract(mut self, value: impl Into<String>) -> Self {
        self.smartcontract = value.into();
        self
    }

    pub fn with_event(mut self, value: impl Into<String>) -> Self {
        self.event = value.into();
        self
    }

    /// Length of the longest populated left prefix, 0–6.
    ///
    /// A populated field after a gap does not increase the level; such a
    /// topic is considered malformed beyond the gap.
    pub fn level(&self) -> u8 {
        self.fields()
            .iter()
            .take_while(|field| !field.is_empty())
            .count() as u8
    }

    /// Encode the topic down to `level` segments.
    ///
    /// Fails when `level` is outside `1..=6` or deeper than the populated
    /// prefix: a topic cannot be printed deeper than it is populated.
    pub fn to_level_string(&self, level: u8) -> Result<String, TopicError> {
        if level < 1 || level > TOPIC_DEPTH {
            return Err(TopicError::LevelOutOfRange { level });
        }
        let populated = self.level();
        if populated < level {
            return Err(TopicError::UnpopulatedLevel {
                requested: level,
                populated,
            });
        }

        let mut encoded = String::new();
        for (key, value) in KEYS.iter().zip(self.fields()).take(level as usize) {
            if !encoded.is_empty() {
                encoded.push(';');
            }
            let _ = write!(encoded, "{key}:{value}");
        }
        Ok(encoded)
    }
}

impl FromStr for Topic {
    type Err = TopicError;

    /// Parse the canonical string encoding.
    ///
    /// Segment order is irrelevant; each key may appear at most once; values
    /// are restricted to `[A-Za-z0-9 _-]*`; the segment count must be in
    /// `2..=6` (anything shorter than organization + project is malformed).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s.split(';').collect();
        if segments.len() < 2 || segments.len() > TOPIC_DEPTH as usize {
            return Err(TopicError::SegmentCount {
                count: segments.len(),
            });
        }

        let mut topic = Topic::default();
        let mut seen = [false; TOPIC_DEPTH as usize];
        for segment in segments {
            let (key, value) = segment
                .split_once(':')
                .ok_or_else(|| TopicError::malformed_segment(segment))?;
            if !is_literal_token(value) {
                return Err(TopicError::invalid_value(value));
            }
            let slot = KEYS
                .iter()
                .position(|k| *k == key)
                .ok_or_else(|| TopicError::unknown_key(key))?;
            if seen[slot] {
                return Err(TopicError::duplicate_key(key));
            }
            seen[slot] = true;

            let value = value.to_owned();
            match slot {
                0 => topic.organization = value,
                1 => topic.project = value,
                2 => topic.network_id = value,
                3 => topic.group = value,
                4 => topic.smartcontract = value,
                _ => topic.event = value,
            }
        }
        Ok(topic)
    }
}
