//! Utility modules supporting listing fetches.
//!
//! - [`HttpClient`]: reqwest-backed [`DocumentFetcher`](crate::sources::DocumentFetcher)
//! - [`RetryConfig`]: configuration for retry logic with exponential backoff
//! - [`with_retry`]: execute an operation with automatic retry on transient errors
//!
//! # Retry with Backoff
//!
//! ```rust,no_run
//! use arxiv_weekly::utils::{with_retry, RetryConfig};
//! use arxiv_weekly::sources::SourceError;
//!
//! # async fn fetch_data() -> Result<String, SourceError> { Ok("data".to_string()) }
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RetryConfig::default().max_retries(3);
//! let result = with_retry(config, || fetch_data()).await?;
//! # Ok(())
//! # }
//! ```

mod http;
mod retry;

pub use http::HttpClient;
pub use retry::{with_retry, RetryConfig, TransientError};
