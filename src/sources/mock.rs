//! Mock fetcher for testing purposes.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::sources::{DocumentFetcher, SourceError};

/// A fetcher that serves predefined pages and records every request.
///
/// URLs without a page answer with [`SourceError::NotFound`], like a 404.
#[derive(Debug, Default)]
pub struct MockFetcher {
    pages: Mutex<HashMap<String, String>>,
    requests: Mutex<Vec<String>>,
}

impl MockFetcher {
    /// Create a mock fetcher with no pages
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url`
    pub fn with_page(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.set_page(url, body);
        self
    }

    /// Serve `body` for `url`, replacing any previous page
    pub fn set_page(&self, url: impl Into<String>, body: impl Into<String>) {
        let mut guard = self.pages.lock().unwrap();
        guard.insert(url.into(), body.into());
    }

    /// URLs requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String, SourceError> {
        self.requests.lock().unwrap().push(url.to_string());
        let guard = self.pages.lock().unwrap();
        guard
            .get(url)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(url.to_string()))
    }
}
