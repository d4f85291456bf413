// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use super::topic::is_literal_token;
use super::Topic;
use crate::errors::TopicError;

/// The set-valued generalization of [`Topic`] used to scope a subscription.
///
/// Each dimension holds the allowed values for that level; an empty set is a
/// wildcard. The string encoding emits only non-empty dimensions, in fixed
/// key order, each segment as `k:v1,v2,...;`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TopicFilter {
    /// Allowed organizations
    pub organizations: Vec<String>,
    /// Allowed projects
    pub projects: Vec<String>,
    /// Allowed network ids
    pub network_ids: Vec<String>,
    /// Allowed groups
    pub groups: Vec<String>,
    /// Allowed contract names
    pub smartcontracts: Vec<String>,
    /// Allowed event names
    pub events: Vec<String>,
}

impl TopicFilter {
    fn dimensions(&self) -> [(&'static str, &Vec<String>); 6] {
        [
            ("o", &self.organizations),
            ("p", &self.projects),
            ("n", &self.network_ids),
            ("g", &self.groups),
            ("s", &self.smartcontracts),
            ("e", &self.events),
        ]
    }

    /// Parse a filter from a wire dictionary.
    ///
    /// Parsing is permissive per dimension: a missing or malformed value list
    /// leaves that dimension as a wildcard. Only a payload that is not a
    /// dictionary at all fails.
    pub fn from_value(value: &Value) -> Result<Self, TopicError> {
        let map = value.as_object().ok_or_else(|| TopicError::InvalidFilterShape {
            found: match value {
                Value::Null => "null",
                Value::Bool(_) => "bool",
                Value::Number(_) => "number",
                Value::String(_) => "string",
                Value::Array(_) => "array",
                Value::Object(_) => "object",
            }
            .to_owned(),
        })?;

        let dimension = |field: &str| -> Vec<String> {
            map.get(field)
                .and_then(Value::as_array)
                .map(|values| {
                    values
                        .iter()
                        .filter_map(Value::as_str)
                        .filter(|v| is_literal_token(v))
                        .map(str::to_owned)
                        .collect()
                })
                .unwrap_or_default()
        };

        Ok(Self {
            organizations: dimension("organizations"),
            projects: dimension("projects"),
            network_ids: dimension("network_ids"),
            groups: dimension("groups"),
            smartcontracts: dimension("smartcontracts"),
            events: dimension("events"),
        })
    }

    /// Whether a topic is selected by this filter.
    ///
    /// Every dimension with a non-empty allowed set must contain the topic's
    /// value at that level; wildcard dimensions match anything, including an
    /// unpopulated field.
    pub fn matches(&self, topic: &Topic) -> bool {
        let values = [
            &topic.organization,
            &topic.project,
            &topic.network_id,
            &topic.group,
            &topic.smartcontract,
            &topic.event,
        ];
        self.dimensions()
            .iter()
            .zip(values)
            .all(|((_, allowed), value)| allowed.is_empty() || allowed.iter().any(|a| a == value))
    }
}

impl fmt::Display for TopicFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, values) in self.dimensions() {
            if values.is_empty() {
                continue;
            }
            write!(f, "{key}:{};", values.join(","))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_string_fixed_key_order_and_trailing_separator() {
        let filter = TopicFilter {
            events: vec!["Transfer".into(), "Approval".into()],
            organizations: vec!["acme".into()],
            ..TopicFilter::default()
        };
        assert_eq!(filter.to_string(), "o:acme;e:Transfer,Approval;");
    }

    #[test]
    fn test_empty_filter_encodes_to_empty_string() {
        assert_eq!(TopicFilter::default().to_string(), "");
    }

    #[test]
    fn test_from_value_is_permissive_per_dimension() {
        let filter = TopicFilter::from_value(&json!({
            "organizations": ["acme"],
            "network_ids": "not a list",
            "events": [1, 2],
        }))
        .unwrap();

        assert_eq!(filter.organizations, vec!["acme".to_owned()]);
        assert!(filter.network_ids.is_empty(), "malformed list is a wildcard");
        assert!(filter.events.is_empty(), "non-string values are skipped");
    }

    #[test]
    fn test_from_value_rejects_non_dictionary() {
        assert!(TopicFilter::from_value(&json!(["o"])).is_err());
        assert!(TopicFilter::from_value(&json!(null)).is_err());
    }

    #[test]
    fn test_matches_wildcards_and_sets() {
        let topic = Topic::default()
            .with_organization("acme")
            .with_project("core")
            .with_network_id("1");

        assert!(TopicFilter::default().matches(&topic), "all-wildcard filter");

        let filter = TopicFilter {
            network_ids: vec!["1".into(), "56".into()],
            ..TopicFilter::default()
        };
        assert!(filter.matches(&topic));

        let filter = TopicFilter {
            network_ids: vec!["56".into()],
            ..TopicFilter::default()
        };
        assert!(!filter.matches(&topic));
    }
}
