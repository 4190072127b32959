//! Docsight HTTP Client
//!
//! A small, type-safe HTTP client for the document analysis backend.
//!
//! The backend exposes three operations: submitting a document, querying a
//! job's status, and fetching a completed job's result. This crate only
//! moves bytes and classifies failures; deciding what to do with a status
//! is left to the caller.
//!
//! # Example
//!
//! ```no_run
//! use docsight_client::AnalysisClient;
//! use docsight_core::domain::job::JobId;
//!
//! # async fn example() -> docsight_client::Result<()> {
//! let client = AnalysisClient::new("http://localhost:3001/api");
//! let job_id = JobId::parse("job_abc123").expect("valid id");
//!
//! let status = client.job_status(&job_id).await?;
//! println!("{} is {}", status.job_id, status.status);
//! # Ok(())
//! # }
//! ```

mod documents;
pub mod error;
mod jobs;

pub use error::{ClientError, Result};

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

/// Base URL used when none is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/api";

/// HTTP client for the analysis backend
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    /// Base URL of the API (e.g., "http://localhost:3001/api")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl AnalysisClient {
    /// Create a new analysis client
    ///
    /// # Example
    /// ```
    /// use docsight_client::AnalysisClient;
    ///
    /// let client = AnalysisClient::new("http://localhost:3001/api/");
    /// assert_eq!(client.base_url(), "http://localhost:3001/api");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new analysis client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the backend
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status code and deserialize the JSON body
    ///
    /// A 404 becomes [`ClientError::NotFound`] carrying `resource`; any other
    /// non-success status becomes [`ClientError::ApiError`].
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        resource: &str,
    ) -> Result<T> {
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(resource.to_string()));
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}
