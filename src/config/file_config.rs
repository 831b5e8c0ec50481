//! Writing configuration files.
//!
//! A generated file looks like:
//!
//! ```toml
//! [listing]
//! site_root = "https://arxiv.org"
//! default_subject = "cs"
//!
//! [report]
//! out_path = "./data"
//! prefix = "arxiv"
//!
//! [http]
//! timeout_secs = 30
//! user_agent = "arxiv-weekly/0.1.0"
//! max_retries = 3
//!
//! [logging]
//! level = "info"
//! ```

use std::path::Path;

use super::Config;

/// Render a configuration as TOML
pub fn render_config(config: &Config) -> Result<String, ConfigFileError> {
    toml::to_string_pretty(config).map_err(|e| ConfigFileError::Serialize(e.to_string()))
}

/// Write a configuration to a TOML file, creating parent directories.
///
/// Refuses to replace an existing file unless `overwrite` is set.
pub fn save_config(config: &Config, path: &Path, overwrite: bool) -> Result<(), ConfigFileError> {
    if path.exists() && !overwrite {
        return Err(ConfigFileError::Exists(path.display().to_string()));
    }

    let content = render_config(config)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ConfigFileError::Io(e.to_string()))?;
    }

    std::fs::write(path, content).map_err(|e| ConfigFileError::Io(e.to_string()))
}

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialize error: {0}")]
    Serialize(String),

    #[error("Config file already exists: {0}")]
    Exists(String),
}
