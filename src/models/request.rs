//! Listing request model.

use serde::{Deserialize, Serialize};

/// Field label used when a whole subject is listed
pub const ALL_FIELDS: &str = "all";

/// Which weekly listing to fetch: a subject and an optional field within it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRequest {
    /// Subject shortcut (e.g. "cs", "math", "stat")
    pub subject: String,

    /// Field shortcut within the subject (e.g. "LG"), or `None` for the whole subject
    pub field: Option<String>,
}

impl ListingRequest {
    /// Create a request for a whole subject
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            field: None,
        }
    }

    /// Restrict the request to one field
    pub fn field(mut self, field: impl Into<String>) -> Self {
        let field = field.into();
        self.field = if field.is_empty() { None } else { Some(field) };
        self
    }

    /// The field label used in banners and report names
    pub fn field_label(&self) -> &str {
        self.field.as_deref().unwrap_or(ALL_FIELDS)
    }

    /// URL of the past-week listing page
    pub fn base_url(&self, site_root: &str) -> String {
        let site_root = site_root.trim_end_matches('/');
        match &self.field {
            Some(field) => format!("{}/list/{}.{}/pastweek", site_root, self.subject, field),
            None => format!("{}/list/{}/pastweek", site_root, self.subject),
        }
    }

    /// URL of the listing page showing all `count` entries at once
    pub fn show_all_url(&self, site_root: &str, count: usize) -> String {
        format!("{}?show={}", self.base_url(site_root), count)
    }
}
