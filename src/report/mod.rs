//! Weekly report output.
//!
//! Matching entries are written as an HTML table under
//! `<out_path>/reports_<year>_<week>/`, where year and week are the ISO
//! calendar week of the run. [`display`] renders the same entries (and the
//! subject directory) for the terminal.

pub mod display;
mod html;

pub use html::render_html_table;

use std::path::{Path, PathBuf};

use chrono::{Datelike, Local, NaiveDate};

use crate::config::ReportConfig;
use crate::models::{Entry, ListingRequest};

/// Errors while writing a report
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Failed to create report directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write report {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Nothing to report")]
    Empty,
}

/// Where a report for one listing and one ISO week goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTarget {
    pub out_path: PathBuf,
    pub prefix: String,
    pub subject: String,
    pub field: String,
    pub name: Option<String>,
    pub year: i32,
    pub week: u32,
}

impl ReportTarget {
    /// Target for `request` in the current ISO week
    pub fn current(config: &ReportConfig, request: &ListingRequest) -> Self {
        Self::for_date(config, request, Local::now().date_naive())
    }

    /// Target for `request` in the ISO week containing `date`
    pub fn for_date(config: &ReportConfig, request: &ListingRequest, date: NaiveDate) -> Self {
        let week = date.iso_week();
        Self {
            out_path: config.out_path.clone(),
            prefix: config.prefix.clone(),
            subject: request.subject.clone(),
            field: request.field_label().to_string(),
            name: None,
            year: week.year(),
            week: week.week(),
        }
    }

    /// Override the output root
    pub fn out_path(mut self, out_path: impl Into<PathBuf>) -> Self {
        self.out_path = out_path.into();
        self
    }

    /// Add a filter name to the file name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.name = if name.is_empty() { None } else { Some(name) };
        self
    }

    /// `<out_path>/reports_<year>_<week>`
    pub fn directory(&self) -> PathBuf {
        self.out_path
            .join(format!("reports_{}_{}", self.year, self.week))
    }

    /// `<prefix>_<subject>_<field>[_<name>]_<year>_<week>.html`
    pub fn file_name(&self) -> String {
        match &self.name {
            Some(name) => format!(
                "{}_{}_{}_{}_{}_{}.html",
                self.prefix, self.subject, self.field, name, self.year, self.week
            ),
            None => format!(
                "{}_{}_{}_{}_{}.html",
                self.prefix, self.subject, self.field, self.year, self.week
            ),
        }
    }

    /// Full path of the report file
    pub fn path(&self) -> PathBuf {
        self.directory().join(self.file_name())
    }
}

/// Write `entries` as an HTML table to the target's path, creating its directory.
///
/// Returns the path written. An empty entry list is rejected; callers report
/// "no matches" instead of writing an empty table.
pub fn write_report(target: &ReportTarget, entries: &[Entry]) -> Result<PathBuf, ReportError> {
    if entries.is_empty() {
        return Err(ReportError::Empty);
    }

    let dir = target.directory();
    create_dir(&dir)?;

    let path = target.path();
    std::fs::write(&path, render_html_table(entries)).map_err(|source| ReportError::Write {
        path: path.clone(),
        source,
    })?;

    tracing::info!("Wrote {} entries to {}", entries.len(), path.display());
    Ok(path)
}

fn create_dir(dir: &Path) -> Result<(), ReportError> {
    tracing::debug!("Creating output dir {}", dir.display());
    std::fs::create_dir_all(dir).map_err(|source| ReportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn date() -> NaiveDate {
        // Thursday of ISO week 42
        NaiveDate::from_ymd_opt(2025, 10, 16).unwrap()
    }

    fn entries() -> Vec<Entry> {
        vec![Entry::new(
            "Sparse Transformers",
            "https://arxiv.org/pdf/2510.00001",
            "https://arxiv.org/abs/2510.00001",
        )]
    }

    #[test]
    fn test_target_names() {
        let request = ListingRequest::new("cs").field("LG");
        let target = ReportTarget::for_date(&ReportConfig::default(), &request, date());

        assert_eq!(target.year, 2025);
        assert_eq!(target.week, 42);
        assert_eq!(target.directory(), PathBuf::from("./data/reports_2025_42"));
        assert_eq!(target.file_name(), "arxiv_cs_LG_2025_42.html");
    }

    #[test]
    fn test_target_name_and_all_fields() {
        let request = ListingRequest::new("math");
        let target = ReportTarget::for_date(&ReportConfig::default(), &request, date()).name("graphs");

        assert_eq!(target.file_name(), "arxiv_math_all_graphs_2025_42.html");
    }

    #[test]
    fn test_iso_year_differs_from_calendar_year() {
        let request = ListingRequest::new("cs");
        let new_year = NaiveDate::from_ymd_opt(2027, 1, 1).unwrap();
        let target = ReportTarget::for_date(&ReportConfig::default(), &request, new_year);

        assert_eq!((target.year, target.week), (2026, 53));
    }

    #[test]
    fn test_write_report_creates_directory() {
        let dir = TempDir::new().unwrap();
        let request = ListingRequest::new("cs").field("LG");
        let target = ReportTarget::for_date(&ReportConfig::default(), &request, date())
            .out_path(dir.path());

        let path = write_report(&target, &entries()).unwrap();

        assert_eq!(
            path,
            dir.path().join("reports_2025_42").join("arxiv_cs_LG_2025_42.html")
        );
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("Sparse Transformers"));
        assert!(html.contains(r#"<a href="https://arxiv.org/pdf/2510.00001" target="_blank">"#));
    }

    #[test]
    fn test_write_report_overwrites_same_week() {
        let dir = TempDir::new().unwrap();
        let request = ListingRequest::new("cs");
        let target = ReportTarget::for_date(&ReportConfig::default(), &request, date())
            .out_path(dir.path());

        write_report(&target, &entries()).unwrap();
        let second = vec![Entry::new("Other Paper", "/pdf/x", "/abs/x")];
        let path = write_report(&target, &second).unwrap();

        let html = std::fs::read_to_string(path).unwrap();
        assert!(html.contains("Other Paper"));
        assert!(!html.contains("Sparse Transformers"));
    }

    #[test]
    fn test_write_report_rejects_empty() {
        let dir = TempDir::new().unwrap();
        let target = ReportTarget::for_date(&ReportConfig::default(), &ListingRequest::new("cs"), date())
            .out_path(dir.path());

        assert!(matches!(write_report(&target, &[]), Err(ReportError::Empty)));
        assert!(!target.directory().exists());
    }
}
