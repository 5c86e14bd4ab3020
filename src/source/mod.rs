//! Metadata source abstraction.
//!
//! Metric metadata normally comes from a live Bosun server, but a saved
//! response of the metadata endpoint works just as well (offline runs,
//! fixtures, reproducible dashboards).

mod bosun;
mod file;

pub use bosun::BosunSource;
pub use file::FileSource;

use std::fmt::Debug;

use anyhow::Result;
use async_trait::async_trait;

use crate::data::Metrics;
use crate::settings::Settings;

/// Trait for loading metric metadata from various sources.
///
/// # Example
///
/// ```no_run
/// use btog::{FileSource, MetadataSource};
///
/// # tokio_test::block_on(async {
/// let source = FileSource::new("metadata.json");
/// let metrics = source.fetch().await.unwrap();
/// println!("Got {} metrics from {}", metrics.len(), source.description());
/// # });
/// ```
#[async_trait]
pub trait MetadataSource: Send + Sync + Debug {
    /// Load every metric the source knows about, unfiltered.
    async fn fetch(&self) -> Result<Metrics>;

    /// Returns a human-readable description of the source.
    ///
    /// Used in log messages.
    fn description(&self) -> &str;
}

/// Pick the source the settings ask for: the input file if one is set,
/// Bosun otherwise.
pub fn from_settings(settings: &Settings) -> Result<Box<dyn MetadataSource>> {
    let source: Box<dyn MetadataSource> = match &settings.input {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(BosunSource::new(&settings.base_url, settings.timeout()?)?),
    };
    Ok(source)
}
