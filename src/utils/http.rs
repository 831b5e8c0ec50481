//! HTTP client utilities.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;

use super::retry::{with_retry, RetryConfig};
use crate::config::HttpConfig;
use crate::sources::{DocumentFetcher, SourceError};

/// Shared HTTP client that fetches pages as text
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Arc<Client>,
    retry: RetryConfig,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, SourceError> {
        Self::from_config(&HttpConfig::default())
    }

    /// Create a client honouring the configured timeout, user agent and retries
    pub fn from_config(config: &HttpConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.timeout_secs.min(10)))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| SourceError::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client: Arc::new(client),
            retry: RetryConfig::default().max_retries(config.max_retries),
        })
    }

    async fn get_text(client: &Client, url: &str) -> Result<String, SourceError> {
        let response = client
            .get(url)
            .header("Accept", "text/html")
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to fetch {}: {}", url, e)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(url.to_string()));
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(SourceError::RateLimit);
        }
        if !status.is_success() {
            return Err(SourceError::Api {
                status: status.as_u16(),
                message: format!("{} returned status {}", url, status),
            });
        }

        response
            .text()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to read response body: {}", e)))
    }
}

#[async_trait]
impl DocumentFetcher for HttpClient {
    async fn fetch(&self, url: &str) -> Result<String, SourceError> {
        tracing::debug!("GET {}", url);
        let client = Arc::clone(&self.client);

        with_retry(self.retry, || {
            let client = Arc::clone(&client);
            async move { HttpClient::get_text(&client, url).await }
        })
        .await
    }
}
