//! arXiv weekly listing source.

use std::sync::Arc;

use serde::Serialize;

use crate::config::Config;
use crate::listing::{
    parse_subjects, resolve_entry_count, ListingDocument, ListingError, ListingParser,
    SubjectGroup,
};
use crate::models::{Entry, FilterSpec, ListingRequest};
use crate::sources::{DocumentFetcher, SourceError};
use crate::utils::HttpClient;

/// Errors from a listing scan
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error(transparent)]
    Fetch(#[from] SourceError),

    #[error(transparent)]
    Listing(#[from] ListingError),
}

/// Outcome of scanning one weekly listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanReport {
    /// Entry count declared by the listing
    pub total: usize,

    /// URL of the base listing page
    pub url: String,

    /// Matching entries, in page order
    pub entries: Vec<Entry>,
}

/// Fetches weekly listings and the subject directory from an arXiv site
#[derive(Debug, Clone)]
pub struct ArxivSource {
    fetcher: Arc<dyn DocumentFetcher>,
    parser: ListingParser,
}

impl ArxivSource {
    /// Create a source backed by an HTTP client built from `config`
    pub fn new(config: &Config) -> Result<Self, SourceError> {
        let client = HttpClient::from_config(&config.http)?;
        Ok(Self::with_fetcher(
            Arc::new(client),
            config.listing.site_root.as_str(),
        ))
    }

    /// Create a source with a custom fetcher
    pub fn with_fetcher(fetcher: Arc<dyn DocumentFetcher>, site_root: impl Into<String>) -> Self {
        Self {
            fetcher,
            parser: ListingParser::new(site_root),
        }
    }

    /// Site root listing URLs are built on
    pub fn site_root(&self) -> &str {
        self.parser.site_root()
    }

    /// Number of entries the listing declares for the past week
    pub async fn entry_count(&self, request: &ListingRequest) -> Result<usize, ScanError> {
        let url = request.base_url(self.site_root());
        let body = self.fetch_listing(&url).await?;

        let count = resolve_entry_count(&ListingDocument::parse(&body))?;
        tracing::debug!("{} declares {} entries", url, count);
        Ok(count)
    }

    /// Fetch the page showing all `count` entries and keep those passing `spec`
    pub async fn fetch_entries(
        &self,
        request: &ListingRequest,
        count: usize,
        spec: &FilterSpec,
    ) -> Result<Vec<Entry>, ScanError> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let url = request.show_all_url(self.site_root(), count);
        let body = self.fetch_listing(&url).await?;

        let entries = self
            .parser
            .parse_filtered(&ListingDocument::parse(&body), spec)?;
        tracing::info!("{} of {} entries match", entries.len(), count);
        Ok(entries)
    }

    /// Resolve the entry count, then fetch and filter every entry
    pub async fn scan(
        &self,
        request: &ListingRequest,
        spec: &FilterSpec,
    ) -> Result<ScanReport, ScanError> {
        let total = self.entry_count(request).await?;
        let entries = self.fetch_entries(request, total, spec).await?;

        Ok(ScanReport {
            total,
            url: request.base_url(self.site_root()),
            entries,
        })
    }

    /// Subject and field shortcuts listed on the home page
    pub async fn subjects(&self) -> Result<Vec<SubjectGroup>, ScanError> {
        let url = format!("{}/", self.site_root());
        let body = self.fetcher.fetch(&url).await?;
        Ok(parse_subjects(&ListingDocument::parse(&body))?)
    }

    async fn fetch_listing(&self, url: &str) -> Result<String, ScanError> {
        match self.fetcher.fetch(url).await {
            Ok(body) => Ok(body),
            Err(SourceError::NotFound(_)) => Err(ListingError::PageNotFound(url.to_string()).into()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FilterMode;
    use crate::sources::MockFetcher;

    const SITE: &str = "https://arxiv.test";

    fn count_page(total: usize) -> String {
        format!(
            r##"<html><body><div id="content"><div id="dlpage">
            <h1>Computer Science</h1><h2>Authors and titles for recent submissions</h2>
            <ul><li><a href="#item0">Mon</a></li></ul>
            <small>[ total of {} entries: 1-25 ]</small>
            <h3>Mon, 13 Oct 2025</h3><dl></dl>
            </div></div></body></html>"##,
            total
        )
    }

    fn pair(id: &str, title: &str) -> String {
        format!(
            r#"<dt><a name="item"></a><span class="list-identifier"><a href="/abs/{id}" title="Abstract">arXiv:{id}</a> [<a href="/pdf/{id}" title="Download PDF">pdf</a>]</span></dt>
            <dd><div class="meta"><div class="list-title mathjax"><span class="descriptor">Title:</span> {title}
</div></div></dd>"#
        )
    }

    fn listing_page(groups: &[Vec<(&str, &str)>]) -> String {
        let groups: String = groups
            .iter()
            .map(|group| {
                let pairs: String = group.iter().map(|(id, title)| pair(id, title)).collect();
                format!("<h3>day</h3><dl>{}</dl>", pairs)
            })
            .collect();
        format!(
            r#"<html><body><div id="content"><div id="dlpage">{}</div></div></body></html>"#,
            groups
        )
    }

    fn any(keywords: &[&str]) -> FilterSpec {
        FilterSpec::new(FilterMode::Any, keywords.iter().copied()).unwrap()
    }

    #[tokio::test]
    async fn test_scan_fetches_count_then_show_all() {
        let request = ListingRequest::new("cs").field("LG");
        let fetcher = Arc::new(
            MockFetcher::new()
                .with_page(request.base_url(SITE), count_page(3))
                .with_page(
                    request.show_all_url(SITE, 3),
                    listing_page(&[
                        vec![("2510.00001", "Sparse Transformers"), ("2510.00002", "Graph Kernels")],
                        vec![("2510.00003", "Transformer Pruning")],
                    ]),
                ),
        );
        let source = ArxivSource::with_fetcher(fetcher.clone(), SITE);

        let report = source.scan(&request, &any(&["transformer"])).await.unwrap();

        assert_eq!(report.total, 3);
        assert_eq!(report.url, "https://arxiv.test/list/cs.LG/pastweek");
        let titles: Vec<&str> = report.entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Sparse Transformers", "Transformer Pruning"]);
        assert_eq!(report.entries[0].pdf_link, "https://arxiv.test/pdf/2510.00001");
        assert_eq!(report.entries[0].abstract_link, "https://arxiv.test/abs/2510.00001");

        assert_eq!(
            fetcher.requests(),
            vec![
                "https://arxiv.test/list/cs.LG/pastweek".to_string(),
                "https://arxiv.test/list/cs.LG/pastweek?show=3".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_listing_is_page_not_found() {
        let request = ListingRequest::new("nope");
        let source = ArxivSource::with_fetcher(Arc::new(MockFetcher::new()), SITE);

        let err = source.entry_count(&request).await.unwrap_err();
        match err {
            ScanError::Listing(ListingError::PageNotFound(url)) => {
                assert_eq!(url, "https://arxiv.test/list/nope/pastweek")
            }
            other => panic!("expected PageNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_zero_count_skips_second_fetch() {
        let request = ListingRequest::new("cs");
        let fetcher = Arc::new(MockFetcher::new().with_page(request.base_url(SITE), count_page(0)));
        let source = ArxivSource::with_fetcher(fetcher.clone(), SITE);

        let report = source.scan(&request, &any(&["anything"])).await.unwrap();

        assert_eq!(report.total, 0);
        assert!(report.entries.is_empty());
        assert_eq!(fetcher.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_listing_propagates() {
        let request = ListingRequest::new("cs");
        let fetcher = Arc::new(
            MockFetcher::new()
                .with_page(request.base_url(SITE), count_page(1))
                .with_page(
                    request.show_all_url(SITE, 1),
                    r#"<div id="content"><div><dl><dd><div><div><span>Title:</span> Orphan
</div></div></dd></dl></div></div>"#,
                ),
        );
        let source = ArxivSource::with_fetcher(fetcher, SITE);

        let err = source.scan(&request, &any(&["orphan"])).await.unwrap_err();
        assert!(matches!(
            err,
            ScanError::Listing(ListingError::UnpairedEntry(_))
        ));
    }

    #[tokio::test]
    async fn test_subjects_reads_home_page() {
        let home = r#"<html><body><div id="content">
            <ul><li><a>Computer Science</a> (<b>cs</b> <a>new</a>, <a>recent</a>, <a>search</a>)
            <a id="cs.AI">Artificial Intelligence</a>; <a id="cs.LG">Machine Learning</a></li></ul>
            </div></body></html>"#;
        let fetcher = Arc::new(MockFetcher::new().with_page("https://arxiv.test/", home));
        let source = ArxivSource::with_fetcher(fetcher, SITE);

        let subjects = source.subjects().await.unwrap();
        assert_eq!(subjects.len(), 1);
        assert_eq!(subjects[0].name, "Computer Science");
        assert_eq!(subjects[0].code, "cs");
        assert_eq!(subjects[0].field_code("machine learning"), Some("cs.LG"));
    }
}
