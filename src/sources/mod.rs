//! Page sources feeding the listing parser.
//!
//! The [`DocumentFetcher`] trait is the seam between network I/O and the pure
//! parsing code in [`listing`](crate::listing): a fetcher turns a URL into a
//! page body, and [`ArxivSource`] drives the fetch / parse sequence for one
//! listing:
//!
//! 1. fetch `<site>/list/<subject>[.<field>]/pastweek` and read the declared entry count
//! 2. fetch the same page with `?show=<count>` so every entry is on one page
//! 3. parse the day-groups and keep the entries whose titles pass the filter
//!
//! [`HttpClient`](crate::utils::HttpClient) is the production fetcher;
//! [`MockFetcher`] serves canned pages in tests.

mod arxiv;
pub mod mock;

pub use arxiv::{ArxivSource, ScanError, ScanReport};
pub use mock::MockFetcher;

use async_trait::async_trait;

/// Fetches the body of a page
#[async_trait]
pub trait DocumentFetcher: Send + Sync + std::fmt::Debug {
    /// Fetch the page at `url` and return its body as text
    async fn fetch(&self, url: &str) -> Result<String, SourceError>;
}

/// Errors that can occur while fetching a page
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    /// Network or transport error
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered 404 for this URL
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimit,

    /// Any other non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Other error
    #[error("Error: {0}")]
    Other(String),
}
