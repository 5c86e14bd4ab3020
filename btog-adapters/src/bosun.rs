//! Bosun adapter using the metadata HTTP API.
//!
//! Bosun keeps descriptive metadata for every metric it has seen. The
//! `/api/metadata/metrics` endpoint returns all of it in one JSON object
//! keyed by metric name.
//!
//! ## Metadata Collected
//!
//! - **Description**: free text, used as the panel link title
//! - **Unit**: used as the y-axis label
//! - **Rate**: `counter`, `gauge` or `rate`; counters get wrapped in a rate
//! - **Tag keys**: used to fill group-by and filter tags
//!
//! ## Example
//!
//! ```rust,no_run
//! use btog_adapters::bosun::BosunClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BosunClient::builder()
//!         .endpoint("http://bosun")
//!         .build()?;
//!
//!     for entry in client.fetch_metric_metadata().await? {
//!         println!("{}: {}", entry.metric, entry.unit());
//!     }
//!
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use btog_types::{into_entries, MetadataResponse, MetricEntry};

use crate::AdapterError;

/// Path of the metric metadata endpoint, relative to the Bosun root.
pub const METADATA_METRICS_PATH: &str = "/api/metadata/metrics";

/// Client for a Bosun server's metadata API.
#[derive(Debug, Clone)]
pub struct BosunClient {
    client: Client,
    endpoint: String,
}

impl BosunClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> BosunClientBuilder {
        BosunClientBuilder::default()
    }

    /// The Bosun root URL this client talks to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Full URL of the metric metadata endpoint.
    pub fn metadata_url(&self) -> String {
        format!("{}{}", self.endpoint, METADATA_METRICS_PATH)
    }

    /// Fetch metadata for every metric Bosun knows about.
    ///
    /// Entries come back in name order, each stamped with its metric name.
    pub async fn fetch_metric_metadata(&self) -> Result<Vec<MetricEntry>, AdapterError> {
        let url = self.metadata_url();
        debug!(%url, "fetching metric metadata");

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(AdapterError::Http(format!(
                "API returned status {}",
                response.status()
            )));
        }

        let metadata: MetadataResponse = response.json().await?;

        debug!(count = metadata.len(), "decoded metric metadata");
        Ok(into_entries(metadata))
    }
}

/// Builder for BosunClient.
#[derive(Debug, Default)]
pub struct BosunClientBuilder {
    endpoint: Option<String>,
    timeout: Option<Duration>,
    no_proxy: bool,
}

impl BosunClientBuilder {
    /// Set the Bosun root URL (e.g., "http://bosun:8070").
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Ignore proxy settings from the environment.
    pub fn no_proxy(mut self) -> Self {
        self.no_proxy = true;
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<BosunClient, AdapterError> {
        let timeout = self.timeout.unwrap_or(Duration::from_secs(10));

        let mut builder = Client::builder().timeout(timeout);
        if self.no_proxy {
            builder = builder.no_proxy();
        }

        let client = builder
            .build()
            .map_err(|e| AdapterError::Config(e.to_string()))?;

        let endpoint = self.endpoint.unwrap_or_else(|| "http://bosun".to_string());

        Ok(BosunClient {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }
}
