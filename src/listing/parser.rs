//! Listing page parser.
//!
//! A listing page holds one `dl` element per publication day inside its
//! content root. Each day alternates a `dt` link record (abstract and PDF
//! links) with a `dd` body record (title and metadata):
//!
//! ```html
//! <div id="content"><div id="dlpage">
//!   <h3>Mon, 14 Oct 2024</h3>
//!   <dl>
//!     <dt><a name="item1">[1]</a>
//!       <span class="list-identifier"><a href="/abs/2410.01234">arXiv:2410.01234</a>
//!         [<a href="/pdf/2410.01234">pdf</a>, <a href="/format/2410.01234">other</a>]</span></dt>
//!     <dd><div class="meta"><div class="list-title">
//!       <span class="descriptor">Title:</span> A Paper Title
//!     </div></div></dd>
//!   </dl>
//! </div></div>
//! ```

use scraper::ElementRef;

use super::document::{child_elements, nth_child_element, tag, trailing_text, ListingDocument};
use super::{matches, ListingError, RecordKind, RecordPosition};
use crate::models::{Entry, FilterSpec};

/// Id of the element whose first child is the content root
pub const CONTENT_ID: &str = "content";

const DAY_GROUP_TAG: &str = "dl";
const LINK_RECORD_TAG: &str = "dt";
const BODY_RECORD_TAG: &str = "dd";

/// A link record and the body record that follows it in the same day-group
struct RecordPair<'a> {
    link: ElementRef<'a>,
    link_at: RecordPosition,
    body: ElementRef<'a>,
    body_at: RecordPosition,
}

/// Abstract and PDF paths as they appear in a link record
struct LinkPaths<'a> {
    abstract_path: &'a str,
    pdf_path: &'a str,
}

/// Turns a listing page into [`Entry`] records
#[derive(Debug, Clone)]
pub struct ListingParser {
    site_root: String,
}

impl ListingParser {
    /// Create a parser resolving relative links against `site_root`
    pub fn new(site_root: impl Into<String>) -> Self {
        let site_root = site_root.into().trim_end_matches('/').to_string();
        Self { site_root }
    }

    /// The site root links are resolved against
    pub fn site_root(&self) -> &str {
        &self.site_root
    }

    /// Every entry on the page, in document order
    pub fn parse(&self, document: &ListingDocument) -> Result<Vec<Entry>, ListingError> {
        self.collect(document, |_| true)
    }

    /// Entries whose titles pass `spec`, in document order
    pub fn parse_filtered(
        &self,
        document: &ListingDocument,
        spec: &FilterSpec,
    ) -> Result<Vec<Entry>, ListingError> {
        self.collect(document, |entry| {
            let keep = matches(&entry.title, spec);
            if keep {
                tracing::debug!("* {} ({})", entry.title, entry.pdf_link);
            }
            keep
        })
    }

    fn collect<F>(&self, document: &ListingDocument, mut keep: F) -> Result<Vec<Entry>, ListingError>
    where
        F: FnMut(&Entry) -> bool,
    {
        let root = content_root(document)?;
        let mut entries = Vec::new();

        for (index, group) in child_elements(root)
            .filter(|element| tag(*element) == DAY_GROUP_TAG)
            .enumerate()
        {
            let pairs = pair_records(group, index + 1)?;
            tracing::debug!("Day-group {} holds {} entries", index + 1, pairs.len());

            for pair in &pairs {
                let entry = self.build_entry(pair)?;
                if keep(&entry) {
                    entries.push(entry);
                }
            }
        }

        Ok(entries)
    }

    fn build_entry(&self, pair: &RecordPair<'_>) -> Result<Entry, ListingError> {
        let paths = link_paths(pair.link, pair.link_at)?;
        let title = title(pair.body, pair.body_at)?;

        Ok(Entry::new(
            title,
            self.resolve(paths.pdf_path),
            self.resolve(paths.abstract_path),
        ))
    }

    /// Make a link absolute by prefixing the site root
    fn resolve(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if path.starts_with('/') {
            format!("{}{}", self.site_root, path)
        } else {
            format!("{}/{}", self.site_root, path)
        }
    }
}

/// First child element of the `content` element
fn content_root(document: &ListingDocument) -> Result<ElementRef<'_>, ListingError> {
    let content = document
        .element_by_id(CONTENT_ID)
        .ok_or_else(|| ListingError::MissingContent(format!("no element with id '{}'", CONTENT_ID)))?;

    nth_child_element(content, 0)
        .ok_or_else(|| ListingError::MissingContent(format!("'{}' has no child element", CONTENT_ID)))
}

/// Split a day-group into (link, body) pairs.
///
/// The pending link starts empty in every day-group, so a link never pairs
/// with a body from another day. A link followed by another link is dropped;
/// a body with no pending link fails the whole parse.
fn pair_records<'a>(
    group: ElementRef<'a>,
    day_group: usize,
) -> Result<Vec<RecordPair<'a>>, ListingError> {
    let mut pending: Option<(ElementRef<'a>, RecordPosition)> = None;
    let mut pairs = Vec::new();

    for (index, record) in child_elements(group).enumerate() {
        let at = RecordPosition::new(day_group, index + 1);

        match tag(record) {
            LINK_RECORD_TAG => {
                if let Some((_, stale)) = pending.replace((record, at)) {
                    tracing::warn!("Link record at {} superseded by {} before any body record", stale, at);
                }
            }
            BODY_RECORD_TAG => {
                let (link, link_at) = pending.take().ok_or(ListingError::UnpairedEntry(at))?;
                pairs.push(RecordPair {
                    link,
                    link_at,
                    body: record,
                    body_at: at,
                });
            }
            _ => {}
        }
    }

    if let Some((_, stale)) = pending {
        tracing::warn!("Link record at {} has no body record", stale);
    }

    Ok(pairs)
}

/// Abstract and PDF paths: the first and second children of the link record's second child
fn link_paths(link: ElementRef<'_>, at: RecordPosition) -> Result<LinkPaths<'_>, ListingError> {
    let identifier = nth_child_element(link, 1)
        .ok_or_else(|| malformed(RecordKind::Link, at, "an identifier element as second child"))?;

    let abstract_path = href_of_child(identifier, 0)
        .ok_or_else(|| malformed(RecordKind::Link, at, "an abstract link with href as first identifier child"))?;

    let pdf_path = href_of_child(identifier, 1)
        .ok_or_else(|| malformed(RecordKind::Link, at, "a PDF link with href as second identifier child"))?;

    Ok(LinkPaths {
        abstract_path,
        pdf_path,
    })
}

fn href_of_child(parent: ElementRef<'_>, n: usize) -> Option<&str> {
    nth_child_element(parent, n)?
        .value()
        .attr("href")
        .filter(|href| !href.is_empty())
}

/// Title: the text after the title descriptor (`dd > div.meta > div.list-title > span`),
/// without its first and last character
fn title(body: ElementRef<'_>, at: RecordPosition) -> Result<String, ListingError> {
    let descriptor = nth_child_element(body, 0)
        .and_then(|meta| nth_child_element(meta, 0))
        .and_then(|list_title| nth_child_element(list_title, 0))
        .ok_or_else(|| malformed(RecordKind::Body, at, "a title descriptor three elements deep"))?;

    let text = trailing_text(descriptor);
    strip_delimiters(&text)
        .map(str::to_string)
        .ok_or_else(|| malformed(RecordKind::Body, at, "non-empty title text after the descriptor"))
}

/// Drop the first and last character, the markup's delimiters around a title
fn strip_delimiters(text: &str) -> Option<&str> {
    let mut chars = text.chars();
    chars.next()?;
    chars.next_back()?;
    let inner = chars.as_str();
    if inner.trim().is_empty() {
        None
    } else {
        Some(inner)
    }
}

fn malformed(kind: RecordKind, at: RecordPosition, expected: &'static str) -> ListingError {
    ListingError::MalformedRecord { kind, at, expected }
}
