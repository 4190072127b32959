//! Configuration module
//!
//! Connection settings for the analysis backend, resolved from flags and
//! environment variables.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use docsight_client::AnalysisClient;
use docsight_watch::HttpAnalysisRepository;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the analysis API
    pub api_url: String,

    /// Timeout applied to every backend request
    pub request_timeout: Duration,

    /// Print watch states as JSON lines instead of text
    pub json: bool,
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_url.is_empty() {
            anyhow::bail!("api_url cannot be empty");
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            anyhow::bail!("api_url must start with http:// or https://");
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        Ok(())
    }

    /// Builds the backend repository described by this configuration
    pub fn repository(&self) -> Result<Arc<HttpAnalysisRepository>> {
        let http = reqwest::Client::builder()
            .timeout(self.request_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        let client = AnalysisClient::with_client(self.api_url.clone(), http);
        Ok(Arc::new(HttpAnalysisRepository::new(client)))
    }
}
