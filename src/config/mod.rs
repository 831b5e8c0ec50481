//! Configuration management.
//!
//! Settings come from three layers, later ones winning: built-in defaults, an
//! optional TOML file, and `ARXIV_WEEKLY_*` environment variables (nested keys
//! separated by `__`, e.g. `ARXIV_WEEKLY_HTTP__TIMEOUT_SECS=60`).

mod file_config;

pub use file_config::{render_config, save_config, ConfigFileError};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "ARXIV_WEEKLY";

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "arxiv-weekly.toml";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where listings are fetched from
    pub listing: ListingConfig,

    /// Where and how reports are written
    pub report: ReportConfig,

    /// HTTP client settings
    pub http: HttpConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Listing source settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Site root that listing URLs and relative entry links are built on
    pub site_root: String,

    /// Subject scanned when none is given on the command line
    pub default_subject: String,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            site_root: "https://arxiv.org".to_string(),
            default_subject: "cs".to_string(),
        }
    }
}

/// Report output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory under which weekly report folders are created
    pub out_path: PathBuf,

    /// First component of every report file name
    pub prefix: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            out_path: PathBuf::from("./data"),
            prefix: "arxiv".to_string(),
        }
    }
}

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// User agent sent with every request
    pub user_agent: String,

    /// Retries after a transient failure (0 disables retrying)
    pub max_retries: u32,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            max_retries: 3,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level used when no `-v` flag is given
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Load configuration from an optional file plus environment overrides
pub fn load_config(path: Option<&Path>) -> Result<Config, config::ConfigError> {
    let mut builder = config::Config::builder();

    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path));
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

/// Find a configuration file in the default locations.
///
/// Checks `./arxiv-weekly.toml` first, then `arxiv-weekly/config.toml` in the
/// platform config directory.
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("arxiv-weekly").join("config.toml"))
        .filter(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.listing.site_root, "https://arxiv.org");
        assert_eq!(config.listing.default_subject, "cs");
        assert_eq!(config.report.out_path, PathBuf::from("./data"));
        assert_eq!(config.report.prefix, "arxiv");
        assert_eq!(config.http.timeout_secs, 30);
        assert!(config.http.user_agent.starts_with("arxiv-weekly/"));
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let toml_content = r#"
[listing]
site_root = "https://export.arxiv.org"

[report]
out_path = "/tmp/reports"

[http]
timeout_secs = 5
"#;
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(toml_content.as_bytes()).unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.listing.site_root, "https://export.arxiv.org");
        // Keys not in the file keep their defaults
        assert_eq!(config.listing.default_subject, "cs");
        assert_eq!(config.report.out_path, PathBuf::from("/tmp/reports"));
        assert_eq!(config.report.prefix, "arxiv");
        assert_eq!(config.http.timeout_secs, 5);
        assert_eq!(config.http.max_retries, 3);
    }

    #[test]
    fn test_load_missing_file() {
        let path = PathBuf::from("/nonexistent/arxiv-weekly.toml");
        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid.toml");
        std::fs::write(&path, "invalid = toml = content").unwrap();

        assert!(load_config(Some(&path)).is_err());
    }
}
