//! Listing page parsing and keyword filtering.
//!
//! This is the pure part of the crate: everything here works on an
//! already-fetched [`ListingDocument`] and performs no I/O.
//!
//! - [`resolve_entry_count`]: the number of entries a listing declares
//! - [`ListingParser`]: reconstructs [`Entry`](crate::models::Entry) records from the day-groups
//! - [`matches`]: evaluates a title against a [`FilterSpec`](crate::models::FilterSpec)
//! - [`parse_subjects`]: the subject / field shortcut taxonomy of the home page
//!
//! # Example
//!
//! ```rust
//! use arxiv_weekly::listing::{ListingDocument, ListingParser};
//! use arxiv_weekly::models::{FilterMode, FilterSpec};
//!
//! # fn example(html: &str) -> Result<(), Box<dyn std::error::Error>> {
//! let document = ListingDocument::parse(html);
//! let spec = FilterSpec::new(FilterMode::Any, ["transformer", "attention"])?;
//! let entries = ListingParser::new("https://arxiv.org").parse_filtered(&document, &spec)?;
//! for entry in entries {
//!     println!("{} ({})", entry.title, entry.pdf_link);
//! }
//! # Ok(())
//! # }
//! ```

mod count;
mod document;
mod filter;
mod parser;
mod subjects;

pub use count::{resolve_entry_count, COUNT_CONTAINER_ID};
pub use document::ListingDocument;
pub use filter::matches;
pub use parser::{ListingParser, CONTENT_ID};
pub use subjects::{parse_subjects, FieldShortcut, SubjectGroup};

/// Kind of record inside a day-group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// `dt` record holding the abstract and PDF links
    Link,
    /// `dd` record holding the title
    Body,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Link => f.write_str("link"),
            RecordKind::Body => f.write_str("body"),
        }
    }
}

/// Where a record sits in the listing (both numbers 1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordPosition {
    pub day_group: usize,
    pub record: usize,
}

impl RecordPosition {
    pub fn new(day_group: usize, record: usize) -> Self {
        Self { day_group, record }
    }
}

impl std::fmt::Display for RecordPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "day-group {}, record {}", self.day_group, self.record)
    }
}

/// Errors that can occur while reading a listing page
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListingError {
    /// The requested listing does not exist upstream
    #[error("Page not found: {0}")]
    PageNotFound(String),

    /// The count element is present but does not hold a number where expected
    #[error("Malformed entry count: {0}")]
    MalformedCount(String),

    /// The content region cannot be located
    #[error("Missing content region: {0}")]
    MissingContent(String),

    /// A body record without a link record before it in its day-group
    #[error("Unpaired entry at {0}: body record has no preceding link record")]
    UnpairedEntry(RecordPosition),

    /// A record does not have the expected structure
    #[error("Malformed {kind} record at {at}: expected {expected}")]
    MalformedRecord {
        kind: RecordKind,
        at: RecordPosition,
        expected: &'static str,
    },
}
