//! Title matching against a [`FilterSpec`].

use crate::models::{FilterMode, FilterSpec};

/// Whether `title` passes `spec`.
///
/// The title is lower-cased before matching. Keywords are compared
/// lower-cased too; a regex pattern is used as written, so upper-case
/// literals in a pattern never match.
pub fn matches(title: &str, spec: &FilterSpec) -> bool {
    let title = title.to_lowercase();

    match spec.mode() {
        FilterMode::Any => spec
            .folded_keywords()
            .iter()
            .any(|keyword| title.contains(keyword.as_str())),
        FilterMode::All => spec
            .folded_keywords()
            .iter()
            .all(|keyword| title.contains(keyword.as_str())),
        FilterMode::Regex => spec
            .pattern()
            .map(|pattern| pattern.is_match(&title))
            .unwrap_or(false),
    }
}
