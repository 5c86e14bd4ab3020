//! Live Bosun data source.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use btog_adapters::bosun::BosunClient;

use super::MetadataSource;
use crate::data::Metrics;

/// A data source that fetches metadata from a Bosun server over HTTP.
#[derive(Debug)]
pub struct BosunSource {
    client: BosunClient,
    description: String,
}

impl BosunSource {
    /// Create a source for the Bosun server at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = BosunClient::builder()
            .endpoint(base_url)
            .timeout(timeout)
            .build()?;
        Ok(Self::from_client(client))
    }

    /// Wrap an already configured client.
    pub fn from_client(client: BosunClient) -> Self {
        let description = format!("bosun: {}", client.endpoint());
        Self {
            client,
            description,
        }
    }

    /// The underlying client.
    pub fn client(&self) -> &BosunClient {
        &self.client
    }
}

#[async_trait]
impl MetadataSource for BosunSource {
    async fn fetch(&self) -> Result<Metrics> {
        let entries = self
            .client
            .fetch_metric_metadata()
            .await
            .with_context(|| format!("Failed to get metrics from {}", self.client.metadata_url()))?;
        Ok(Metrics::from(entries))
    }

    fn description(&self) -> &str {
        &self.description
    }
}
