//! # btog-adapters
//!
//! Clients for collecting metric metadata from monitoring servers.
//!
//! ## Supported Systems
//!
//! - **Bosun** (`bosun` feature) - Fetches descriptions, units, rate types
//!   and tag keys of every known metric via `/api/metadata/metrics`
//!
//! ## Quick Start (Bosun)
//!
//! ```rust,no_run
//! use btog_adapters::bosun::BosunClient;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BosunClient::builder()
//!         .endpoint("http://bosun:8070")
//!         .timeout(Duration::from_secs(5))
//!         .build()?;
//!
//!     let metrics = client.fetch_metric_metadata().await?;
//!
//!     println!("Bosun knows {} metrics", metrics.len());
//!     Ok(())
//! }
//! ```

pub mod error;

#[cfg(feature = "bosun")]
pub mod bosun;

pub use error::AdapterError;

// Re-export types for convenience
pub use btog_types::{MetadataResponse, MetricEntry, MetricMetadata};
