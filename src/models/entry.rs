//! Entry model representing one paper on a listing page.

use serde::{Deserialize, Serialize};

/// One listed paper: its title plus the abstract and PDF links.
///
/// Entries are only produced by pairing a link record with the body record
/// that follows it, so all three fields are always populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Paper title as published
    pub title: String,

    /// Absolute URL of the PDF rendition
    pub pdf_link: String,

    /// Absolute URL of the abstract page
    pub abstract_link: String,
}

impl Entry {
    /// Create a new entry
    pub fn new(
        title: impl Into<String>,
        pdf_link: impl Into<String>,
        abstract_link: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            pdf_link: pdf_link.into(),
            abstract_link: abstract_link.into(),
        }
    }

    /// arXiv identifier taken from the abstract link (`.../abs/2410.01234`)
    pub fn arxiv_id(&self) -> Option<&str> {
        self.abstract_link
            .rsplit_once("/abs/")
            .map(|(_, id)| id)
            .filter(|id| !id.is_empty())
    }
}

impl std::fmt::Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.title, self.pdf_link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_new() {
        let entry = Entry::new(
            "Attention Is All You Need",
            "https://arxiv.org/pdf/1706.03762",
            "https://arxiv.org/abs/1706.03762",
        );

        assert_eq!(entry.title, "Attention Is All You Need");
        assert_eq!(entry.pdf_link, "https://arxiv.org/pdf/1706.03762");
        assert_eq!(entry.abstract_link, "https://arxiv.org/abs/1706.03762");
    }

    #[test]
    fn test_arxiv_id() {
        let entry = Entry::new("T", "https://arxiv.org/pdf/2410.01234", "https://arxiv.org/abs/2410.01234");
        assert_eq!(entry.arxiv_id(), Some("2410.01234"));

        let entry = Entry::new("T", "https://arxiv.org/pdf/x", "https://arxiv.org/list/cs");
        assert_eq!(entry.arxiv_id(), None);
    }

    #[test]
    fn test_serialized_field_names() {
        let entry = Entry::new("T", "p", "a");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["title"], "T");
        assert_eq!(json["pdf_link"], "p");
        assert_eq!(json["abstract_link"], "a");
    }
}
