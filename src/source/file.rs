//! File-based data source.
//!
//! Reads a saved response of Bosun's `/api/metadata/metrics` endpoint.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use btog_types::{into_entries, MetadataResponse};

use super::MetadataSource;
use crate::data::Metrics;

/// A data source that reads metric metadata from a JSON file.
///
/// The file has the same shape as the HTTP response: an object keyed by
/// metric name. Capture one with
/// `curl http://bosun/api/metadata/metrics > metadata.json`.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self { path, description }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl MetadataSource for FileSource {
    async fn fetch(&self) -> Result<Metrics> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Read error: {}", self.path.display()))?;
        let response: MetadataResponse = serde_json::from_str(&content)
            .with_context(|| format!("Parse error: {}", self.path.display()))?;
        Ok(Metrics::from(into_entries(response)))
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_json() -> &'static str {
        r#"{
            "haproxy.server.bin": {
                "Desc": "Bytes in.",
                "Unit": "bytes",
                "Rate": "counter",
                "TagKeys": ["host", "svname"]
            },
            "haproxy.server.weight": {
                "TagKeys": ["host"]
            }
        }"#
    }

    #[test]
    fn test_file_source_new() {
        let source = FileSource::new("/tmp/metadata.json");
        assert_eq!(source.path(), Path::new("/tmp/metadata.json"));
        assert_eq!(source.description(), "file: /tmp/metadata.json");
    }

    #[tokio::test]
    async fn test_file_source_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let source = FileSource::new(file.path());
        let metrics = source.fetch().await.unwrap();

        assert_eq!(
            metrics.names(),
            vec!["haproxy.server.bin", "haproxy.server.weight"]
        );
        let bin = metrics.iter().next().unwrap();
        assert!(bin.is_counter());
        assert_eq!(bin.desc(), "Bytes in.");
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let source = FileSource::new("/nonexistent/path/metadata.json");

        let err = source.fetch().await.unwrap_err();
        assert!(err.to_string().contains("Read error"));
    }

    #[tokio::test]
    async fn test_file_source_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid json").unwrap();

        let source = FileSource::new(file.path());

        let err = source.fetch().await.unwrap_err();
        assert!(err.to_string().contains("Parse error"));
    }
}
