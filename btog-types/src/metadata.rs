//! Metric metadata as exposed by Bosun.

use std::collections::BTreeMap;
use std::fmt;

/// Rate type of a metric, as recorded in Bosun metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateKind {
    /// Monotonically increasing counter; queries must wrap it in a rate.
    Counter,
    /// Point-in-time value.
    Gauge,
    /// Already a per-second rate.
    Rate,
    /// Anything Bosun does not define.
    Other(String),
}

impl RateKind {
    /// Parse a rate string from metadata.
    pub fn parse(s: &str) -> Self {
        match s {
            "counter" => RateKind::Counter,
            "gauge" => RateKind::Gauge,
            "rate" => RateKind::Rate,
            other => RateKind::Other(other.to_string()),
        }
    }
}

impl fmt::Display for RateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateKind::Counter => f.write_str("counter"),
            RateKind::Gauge => f.write_str("gauge"),
            RateKind::Rate => f.write_str("rate"),
            RateKind::Other(s) => f.write_str(s),
        }
    }
}

/// Descriptive metadata attached to a metric.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MetricMetadata {
    /// Human readable description.
    pub desc: Option<String>,
    /// Unit of measurement (e.g. "bytes", "requests").
    pub unit: Option<String>,
    /// Rate type: "counter", "gauge" or "rate".
    pub rate: Option<String>,
    /// Unix time Bosun last updated the record.
    pub last_touched: Option<i64>,
}

impl MetricMetadata {
    /// Check whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.desc.is_none()
            && self.unit.is_none()
            && self.rate.is_none()
            && self.last_touched.is_none()
    }

    /// Parsed rate type, if one was recorded.
    pub fn rate_kind(&self) -> Option<RateKind> {
        self.rate.as_deref().map(RateKind::parse)
    }
}

/// One metric from the metadata endpoint.
///
/// `metadata` is `None` when Bosun knows the metric (usually through its
/// tag keys) but keeps no metadata record for it. A record is present as
/// soon as any of its fields is, `LastTouched` included.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "wire::MetricEntryWire", into = "wire::MetricEntryWire")
)]
pub struct MetricEntry {
    /// Metric name. Not part of the entry body on the wire: it is the key
    /// the body is stored under.
    pub metric: String,
    /// Metadata, if any was recorded.
    pub metadata: Option<MetricMetadata>,
    /// Tag keys seen on this metric.
    pub tag_keys: Vec<String>,
}

impl MetricEntry {
    /// Create an entry without metadata.
    pub fn new(metric: impl Into<String>) -> Self {
        Self {
            metric: metric.into(),
            ..Default::default()
        }
    }

    /// Attach metadata.
    pub fn with_metadata(mut self, metadata: MetricMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Set the tag keys.
    pub fn with_tag_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tag_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Check if metadata is present.
    pub fn has_metadata(&self) -> bool {
        self.metadata.is_some()
    }

    /// True when the metric is recorded as a counter.
    pub fn is_counter(&self) -> bool {
        self.metadata
            .as_ref()
            .and_then(|m| m.rate_kind())
            .is_some_and(|r| r == RateKind::Counter)
    }

    /// Unit, or an empty string.
    pub fn unit(&self) -> &str {
        self.metadata
            .as_ref()
            .and_then(|m| m.unit.as_deref())
            .unwrap_or("")
    }

    /// Description, or an empty string.
    pub fn desc(&self) -> &str {
        self.metadata
            .as_ref()
            .and_then(|m| m.desc.as_deref())
            .unwrap_or("")
    }
}

/// Decoded body of `/api/metadata/metrics`, keyed by metric name.
pub type MetadataResponse = BTreeMap<String, MetricEntry>;

/// Flatten a metadata response into entries, stamping each with its name.
pub fn into_entries(response: MetadataResponse) -> Vec<MetricEntry> {
    response
        .into_iter()
        .map(|(name, mut entry)| {
            entry.metric = name;
            entry
        })
        .collect()
}

#[cfg(feature = "serde")]
mod wire {
    use serde::{Deserialize, Serialize};

    use super::{MetricEntry, MetricMetadata};

    /// Entry body as Bosun encodes it: metadata fields sit next to the tag
    /// keys, and a missing field means "not recorded".
    #[derive(Clone, Serialize, Deserialize)]
    pub(super) struct MetricEntryWire {
        #[serde(
            rename = "Desc",
            alias = "desc",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        desc: Option<String>,
        #[serde(
            rename = "Unit",
            alias = "unit",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        unit: Option<String>,
        #[serde(
            rename = "Rate",
            alias = "rate",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        rate: Option<String>,
        #[serde(
            rename = "LastTouched",
            alias = "lastTouched",
            alias = "last_touched",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        last_touched: Option<i64>,
        #[serde(rename = "TagKeys", alias = "tagKeys", alias = "tag_keys", default)]
        tag_keys: Option<Vec<String>>,
    }

    impl From<MetricEntryWire> for MetricEntry {
        fn from(wire: MetricEntryWire) -> Self {
            let metadata = MetricMetadata {
                desc: wire.desc,
                unit: wire.unit,
                rate: wire.rate,
                last_touched: wire.last_touched,
            };
            MetricEntry {
                metric: String::new(),
                metadata: (!metadata.is_empty()).then_some(metadata),
                tag_keys: wire.tag_keys.unwrap_or_default(),
            }
        }
    }

    impl From<MetricEntry> for MetricEntryWire {
        fn from(entry: MetricEntry) -> Self {
            let metadata = entry.metadata.unwrap_or_default();
            MetricEntryWire {
                desc: metadata.desc,
                unit: metadata.unit,
                rate: metadata.rate,
                last_touched: metadata.last_touched,
                tag_keys: Some(entry.tag_keys),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter_entry() -> MetricEntry {
        MetricEntry::new("haproxy.server.hrsp_5xx")
            .with_metadata(MetricMetadata {
                desc: Some("5xx responses".to_string()),
                unit: Some("responses".to_string()),
                rate: Some("counter".to_string()),
                ..Default::default()
            })
            .with_tag_keys(["host", "svname"])
    }

    #[test]
    fn test_rate_kind_parse() {
        assert_eq!(RateKind::parse("counter"), RateKind::Counter);
        assert_eq!(RateKind::parse("gauge"), RateKind::Gauge);
        assert_eq!(RateKind::parse("rate"), RateKind::Rate);
        assert_eq!(
            RateKind::parse("weird"),
            RateKind::Other("weird".to_string())
        );
        assert_eq!(RateKind::Counter.to_string(), "counter");
    }

    #[test]
    fn test_entry_accessors() {
        let entry = counter_entry();
        assert!(entry.has_metadata());
        assert!(entry.is_counter());
        assert_eq!(entry.unit(), "responses");
        assert_eq!(entry.desc(), "5xx responses");
        assert_eq!(entry.tag_keys, vec!["host", "svname"]);
    }

    #[test]
    fn test_entry_without_metadata() {
        let entry = MetricEntry::new("os.cpu");
        assert!(!entry.has_metadata());
        assert!(!entry.is_counter());
        assert_eq!(entry.unit(), "");
        assert_eq!(entry.desc(), "");
    }

    #[test]
    fn test_gauge_is_not_counter() {
        let entry = MetricEntry::new("os.mem.used").with_metadata(MetricMetadata {
            rate: Some("gauge".to_string()),
            ..Default::default()
        });
        assert!(!entry.is_counter());
    }

    #[test]
    fn test_into_entries_stamps_names() {
        let mut response = MetadataResponse::new();
        response.insert("b.metric".to_string(), MetricEntry::default());
        response.insert("a.metric".to_string(), MetricEntry::default());

        let entries = into_entries(response);
        let names: Vec<_> = entries.iter().map(|e| e.metric.as_str()).collect();
        assert_eq!(names, vec!["a.metric", "b.metric"]);
    }

    #[cfg(feature = "serde")]
    mod serde_tests {
        use super::super::*;

        #[test]
        fn test_decode_bosun_response() {
            let json = r#"{
                "haproxy.server.bin": {
                    "Desc": "Bytes in.",
                    "Unit": "bytes",
                    "Rate": "counter",
                    "TagKeys": ["host", "pxname", "svname"]
                },
                "haproxy.server.weight": {
                    "TagKeys": ["host"]
                },
                "haproxy.server.status": {
                    "Unit": "",
                    "TagKeys": null
                }
            }"#;

            let response: MetadataResponse = serde_json::from_str(json).unwrap();
            let entries = into_entries(response);
            assert_eq!(entries.len(), 3);

            let bin = &entries[0];
            assert_eq!(bin.metric, "haproxy.server.bin");
            assert!(bin.is_counter());
            assert_eq!(bin.unit(), "bytes");
            assert_eq!(bin.tag_keys.len(), 3);

            // An empty but present field still counts as metadata.
            let status = &entries[1];
            assert_eq!(status.metric, "haproxy.server.status");
            assert!(status.has_metadata());
            assert!(status.tag_keys.is_empty());

            let weight = &entries[2];
            assert!(!weight.has_metadata());
            assert_eq!(weight.tag_keys, vec!["host"]);
        }

        #[test]
        fn test_last_touched_alone_is_metadata() {
            let json = r#"{
                "haproxy.server.status": {"LastTouched": 1500000000, "TagKeys": ["host"]},
                "haproxy.server.act": {"lastTouched": 1500000001}
            }"#;

            let entries = into_entries(serde_json::from_str(json).unwrap());
            assert_eq!(entries.len(), 2);
            assert!(entries.iter().all(MetricEntry::has_metadata));

            let status = &entries[1];
            assert_eq!(status.metric, "haproxy.server.status");
            assert_eq!(status.unit(), "");
            assert!(!status.is_counter());
            assert_eq!(
                status.metadata.as_ref().and_then(|m| m.last_touched),
                Some(1500000000)
            );
        }

        #[test]
        fn test_encode_omits_missing_fields() {
            let entry = MetricEntry::new("x").with_metadata(MetricMetadata {
                unit: Some("bytes".to_string()),
                ..Default::default()
            });
            let value = serde_json::to_value(&entry).unwrap();
            assert_eq!(
                value,
                serde_json::json!({ "Unit": "bytes", "TagKeys": [] })
            );
        }
    }
}
