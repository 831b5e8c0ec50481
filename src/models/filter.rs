//! Keyword filter configuration.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Matching semantics applied to an entry title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// At least one keyword occurs in the title
    Any,
    /// Every keyword occurs in the title
    All,
    /// A single regular expression is found in the title
    Regex,
}

impl FilterMode {
    /// Returns the mode name as accepted on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterMode::Any => "any",
            FilterMode::All => "all",
            FilterMode::Regex => "regex",
        }
    }
}

impl std::fmt::Display for FilterMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterMode {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any" => Ok(FilterMode::Any),
            "all" => Ok(FilterMode::All),
            "regex" => Ok(FilterMode::Regex),
            other => Err(FilterError::UnsupportedMode(other.to_string())),
        }
    }
}

/// Errors raised while building a [`FilterSpec`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    /// The keyword set does not fit the selected mode
    #[error("Invalid filter spec: {0}")]
    InvalidFilterSpec(String),

    /// The mode string is not one of `any`, `all`, `regex`
    #[error("Unsupported filter mode: '{0}' (expected any, all or regex)")]
    UnsupportedMode(String),
}

/// A validated keyword filter.
///
/// Construction checks the keyword set against the mode, so a `FilterSpec`
/// that exists is always usable: keywords are non-empty, and regex mode holds
/// exactly one compiled pattern.
#[derive(Debug, Clone)]
pub struct FilterSpec {
    mode: FilterMode,
    keywords: Vec<String>,
    folded: Vec<String>,
    pattern: Option<Regex>,
}

impl FilterSpec {
    /// Build a filter for `mode` over `keywords`
    pub fn new<I, S>(mode: FilterMode, keywords: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keywords: Vec<String> = keywords.into_iter().map(Into::into).collect();

        if keywords.is_empty() {
            return Err(FilterError::InvalidFilterSpec(format!(
                "mode '{}' needs at least one keyword",
                mode
            )));
        }

        let pattern = match mode {
            FilterMode::Regex => {
                // Count first: several keywords are rejected whether or not they compile.
                if keywords.len() != 1 {
                    return Err(FilterError::InvalidFilterSpec(format!(
                        "regex mode takes exactly one pattern, got {}",
                        keywords.len()
                    )));
                }
                let re = Regex::new(&keywords[0]).map_err(|e| {
                    FilterError::InvalidFilterSpec(format!(
                        "invalid pattern '{}': {}",
                        keywords[0], e
                    ))
                })?;
                Some(re)
            }
            FilterMode::Any | FilterMode::All => None,
        };

        let folded = keywords.iter().map(|k| k.to_lowercase()).collect();

        Ok(Self {
            mode,
            keywords,
            folded,
            pattern,
        })
    }

    /// Build a filter from a mode name, as given on the command line
    pub fn parse<I, S>(mode: &str, keywords: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(mode.parse()?, keywords)
    }

    /// The selected mode
    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    /// The keywords as supplied
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub(crate) fn folded_keywords(&self) -> &[String] {
        &self.folded
    }

    pub(crate) fn pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }

    /// Whether `title` passes this filter
    pub fn matches(&self, title: &str) -> bool {
        crate::listing::matches(title, self)
    }
}
