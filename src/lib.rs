//! # arxiv-weekly
//!
//! Scan the past-week arXiv listing of a subject (or one field of it) for
//! papers whose titles match a set of keywords, and write the matches to a
//! weekly HTML report.
//!
//! ## Architecture
//!
//! - [`models`]: entries, listing requests and filter specs
//! - [`listing`]: entry-count resolution, listing parsing and keyword filtering
//! - [`sources`]: the page fetcher seam and the arXiv listing source
//! - [`report`]: HTML reports and terminal output
//! - [`utils`]: HTTP client and retry logic
//! - [`config`]: configuration management

pub mod config;
pub mod listing;
pub mod models;
pub mod report;
pub mod sources;
pub mod utils;

// Re-export commonly used types
pub use listing::{ListingError, ListingParser};
pub use models::{Entry, FilterMode, FilterSpec, ListingRequest};
pub use sources::{ArxivSource, DocumentFetcher};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
