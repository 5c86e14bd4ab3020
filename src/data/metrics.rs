//! The list of metrics a dashboard is built from.

use btog_types::MetricEntry;
use tracing::warn;

/// An ordered list of metrics with their metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Metrics(Vec<MetricEntry>);

impl Metrics {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of metrics.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the metrics.
    pub fn iter(&self) -> impl Iterator<Item = &MetricEntry> {
        self.0.iter()
    }

    /// Add a metric.
    pub fn push(&mut self, entry: MetricEntry) {
        self.0.push(entry);
    }

    /// Metric names in list order.
    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|m| m.metric.as_str()).collect()
    }

    /// Metrics whose name starts with `prefix` and which carry metadata.
    ///
    /// Matching metrics without metadata are logged and skipped.
    pub fn starts_with(&self, prefix: &str) -> Metrics {
        self.0
            .iter()
            .filter(|m| m.metric.starts_with(prefix))
            .filter(|m| {
                if !m.has_metadata() {
                    warn!("No metadata for {}, skipping", m.metric);
                    return false;
                }
                true
            })
            .cloned()
            .collect()
    }

    /// Sort by metric name, ascending.
    pub fn sort_by_name(&mut self) {
        self.0.sort_by(|a, b| a.metric.cmp(&b.metric));
    }

    /// Consume and return a name-sorted copy.
    pub fn sorted(mut self) -> Self {
        self.sort_by_name();
        self
    }
}

impl From<Vec<MetricEntry>> for Metrics {
    fn from(entries: Vec<MetricEntry>) -> Self {
        Self(entries)
    }
}

impl FromIterator<MetricEntry> for Metrics {
    fn from_iter<I: IntoIterator<Item = MetricEntry>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Metrics {
    type Item = MetricEntry;
    type IntoIter = std::vec::IntoIter<MetricEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Metrics {
    type Item = &'a MetricEntry;
    type IntoIter = std::slice::Iter<'a, MetricEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
