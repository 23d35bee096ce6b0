//! Metric event records for the downstream sonification tool.
//!
//! Events are written one JSON object per line (JSONL), never as a single
//! array: the consumer reads the file line by line.

use serde::{Deserialize, Serialize};

/// Milliseconds timestamp on the shared event axis.
pub type TimestampMs = i64;

/// A single timestamped observation of one feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricEvent {
    pub timestamp: TimestampMs,

    /// Feature label, e.g. "brightness".
    pub feature: String,

    pub value: f64,

    pub parameters: EventParameters,
}

/// Fixed annotation tying every event to one logical channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventParameters {
    pub system: String,
}

impl MetricEvent {
    pub fn new(
        timestamp: TimestampMs,
        feature: impl Into<String>,
        value: f64,
        system: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            feature: feature.into(),
            value,
            parameters: EventParameters {
                system: system.into(),
            },
        }
    }
}

/// Parse events from JSONL content (one JSON object per line).
pub fn parse_events(jsonl: &str) -> Result<Vec<MetricEvent>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(serde_json::from_str)
        .collect()
}

/// Serialize events to JSONL format.
pub fn serialize_events(events: &[MetricEvent]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for event in events {
        output.push_str(&serde_json::to_string(event)?);
        output.push('\n');
    }
    Ok(output)
}

/// Values of one feature, ordered by timestamp.
pub fn feature_values(events: &[MetricEvent], feature: &str) -> Vec<f64> {
    let mut matching: Vec<&MetricEvent> =
        events.iter().filter(|e| e.feature == feature).collect();
    matching.sort_by_key(|e| e.timestamp);
    matching.into_iter().map(|e| e.value).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_format_matches_consumer_contract() {
        let event = MetricEvent::new(1_526_210_008_000, "brightness", 42.5, "track1");
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"timestamp":1526210008000,"feature":"brightness","value":42.5,"parameters":{"system":"track1"}}"#
        );
    }

    #[test]
    fn test_jsonl_has_one_object_per_line() {
        let events = vec![
            MetricEvent::new(0, "a", 1.0, "track1"),
            MetricEvent::new(1000, "a", 2.0, "track1"),
        ];
        let jsonl = serialize_events(&events).unwrap();
        assert!(!jsonl.starts_with('['));
        assert!(jsonl.ends_with('\n'));
        assert_eq!(jsonl.lines().count(), 2);
        assert_eq!(parse_events(&jsonl).unwrap(), events);
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let jsonl = "\n{\"timestamp\":0,\"feature\":\"a\",\"value\":-1,\"parameters\":{\"system\":\"track1\"}}\n\n";
        let parsed = parse_events(jsonl).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].value, -1.0);
    }

    #[test]
    fn test_feature_values_sorted_by_timestamp() {
        let events = vec![
            MetricEvent::new(2000, "a", 3.0, "track1"),
            MetricEvent::new(0, "a", 1.0, "track1"),
            MetricEvent::new(0, "b", 9.0, "track1"),
            MetricEvent::new(1000, "a", 2.0, "track1"),
        ];
        assert_eq!(feature_values(&events, "a"), vec![1.0, 2.0, 3.0]);
        assert_eq!(feature_values(&events, "b"), vec![9.0]);
        assert!(feature_values(&events, "c").is_empty());
    }
}
