// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Property tests for the topic grammar: encoding and parsing must
//! round-trip for every well-formed topic at every populated level.

use proptest::prelude::*;

use chainfeed::Topic;

/// A non-empty value drawn from the literal token charset.
fn token() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 _-]{1,16}"
}

/// A well-formed topic populated to exactly `level` fields.
fn topic_at_level(values: Vec<String>) -> Topic {
    let mut topic = Topic::default();
    let mut fields = values.into_iter();
    if let Some(v) = fields.next() {
        topic = topic.with_organization(v);
    }
    if let Some(v) = fields.next() {
        topic = topic.with_project(v);
    }
    if let Some(v) = fields.next() {
        topic = topic.with_network_id(v);
    }
    if let Some(v) = fields.next() {
        topic = topic.with_group(v);
    }
    if let Some(v) = fields.next() {
        topic = topic.with_smartcontract(v);
    }
    if let Some(v) = fields.next() {
        topic = topic.with_event(v);
    }
    topic
}

proptest! {
    #[test]
    fn round_trip_at_every_level(values in prop::collection::vec(token(), 2..=6)) {
        let level = values.len() as u8;
        let topic = topic_at_level(values);
        prop_assert_eq!(topic.level(), level);

        let encoded = topic.to_level_string(level).unwrap();
        let parsed: Topic = encoded.parse().unwrap();
        prop_assert_eq!(&parsed, &topic);
        prop_assert_eq!(parsed.to_level_string(level).unwrap(), encoded);
    }

    #[test]
    fn encoding_never_exceeds_population(values in prop::collection::vec(token(), 2..=5)) {
        let level = values.len() as u8;
        let topic = topic_at_level(values);

        // One level deeper than populated must fail; the populated level
        // must succeed.
        prop_assert!(topic.to_level_string(level + 1).is_err());
        prop_assert!(topic.to_level_string(level).is_ok());
    }

    #[test]
    fn out_of_range_levels_always_fail(values in prop::collection::vec(token(), 2..=6), level in 7u8..=255) {
        let topic = topic_at_level(values);
        prop_assert!(topic.to_level_string(0).is_err());
        prop_assert!(topic.to_level_string(level).is_err());
    }
}
