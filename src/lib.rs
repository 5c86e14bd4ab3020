//! # btog
//!
//! Generate Grafana dashboards from Bosun metric metadata.
//!
//! Bosun records a description, unit and rate type for the metrics it
//! collects. This crate reads that metadata, picks the metrics under a name
//! prefix and lays out one graph panel per metric, producing a dashboard
//! document Grafana can import.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  ┌──────────┐    ┌──────────┐    ┌──────────┐    ┌────────────┐  │
//! │  │  source  │───▶│   data   │───▶│ generate │───▶│   output   │  │
//! │  │ (input)  │    │ (select) │    │ (layout) │    │   (JSON)   │  │
//! │  └──────────┘    └──────────┘    └──────────┘    └────────────┘  │
//! │       ▲                               ▲                          │
//! │  BosunSource | FileSource        settings (file, env, flags)     │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: Metadata sources ([`MetadataSource`] trait) for a live
//!   Bosun server and for saved responses
//! - **[`data`]**: Prefix filtering and sorting of [`Metrics`], tag sets and
//!   query templates
//! - **[`generate`]**: [`DashboardGenerator`], which turns metrics into rows
//!   of panels
//! - **[`output`]**: Tab-indented JSON to stdout or a file
//! - **[`settings`]**: Layered configuration
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # All haproxy server metrics, four panels per row
//! btog -b http://bosun:8070 -m haproxy.server. -p 4 > haproxy.json
//!
//! # Group by every tag key and add a $host template variable
//! btog -m os.net. -t host=ny-web01 --wheretags 'host=$host' --fillgrouptags
//! ```
//!
//! ### As a library
//!
//! ```
//! use btog::{DashboardGenerator, GeneratorSettings, Metrics};
//! use btog_types::{MetricEntry, MetricMetadata};
//!
//! let metrics: Metrics = vec![MetricEntry::new("haproxy.server.scur").with_metadata(
//!     MetricMetadata {
//!         unit: Some("sessions".to_string()),
//!         ..Default::default()
//!     },
//! )]
//! .into();
//!
//! let generator = DashboardGenerator::new(GeneratorSettings::default()).unwrap();
//! let dashboard = generator.generate(&metrics.starts_with("haproxy.server."));
//! assert_eq!(dashboard.panel_count(), 1);
//! ```

pub mod data;
pub mod error;
pub mod generate;
pub mod output;
pub mod settings;
pub mod source;

use anyhow::Result;
use btog_types::Dashboard;
use tracing::info;

// Re-export main types for convenience
pub use data::{Metrics, QueryTemplate, TagSet, TemplateVar};
pub use error::GenerateError;
pub use generate::{DashboardGenerator, GeneratorSettings};
pub use settings::{Overrides, Settings};
pub use source::{BosunSource, FileSource, MetadataSource};

/// Run the whole pipeline against `source`: fetch, filter, sort, lay out.
///
/// Settings are validated before anything is fetched.
pub async fn generate_from(settings: &Settings, source: &dyn MetadataSource) -> Result<Dashboard> {
    let generator = DashboardGenerator::new(settings.generator_settings()?)?;

    info!("Fetching metric metadata from {}", source.description());
    let metrics = source.fetch().await?;

    let selected = metrics.starts_with(&settings.metric_root);
    info!(
        "{} of {} metrics match prefix {:?}",
        selected.len(),
        metrics.len(),
        settings.metric_root
    );

    Ok(generator.generate(&selected))
}

/// Run the whole pipeline with the source the settings select.
pub async fn generate(settings: &Settings) -> Result<Dashboard> {
    let source = source::from_settings(settings)?;
    generate_from(settings, source.as_ref()).await
}
