//! Core configuration.
//!
//! # Responsibility
//! - Describe where the on-device store lives and, optionally, where the
//!   remote API is reachable.
//!
//! # Invariants
//! - An absent `remote_base_url` means local-only mode; no remote call is
//!   ever attempted.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configuration for constructing an `AppContext`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreConfig {
    /// Remote API root, e.g. `https://host/api`. `None` = local-only.
    #[serde(default)]
    pub remote_base_url: Option<String>,
    /// Directory holding the per-collection JSON blobs and log files.
    pub data_dir: PathBuf,
    /// Log level override; defaults per build mode when absent.
    #[serde(default)]
    pub log_level: Option<String>,
}

impl CoreConfig {
    /// Local-only configuration rooted at `data_dir`.
    pub fn local_only(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            remote_base_url: None,
            data_dir: data_dir.into(),
            log_level: None,
        }
    }

    /// Loads configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        serde_json::from_str(&raw).map_err(|err| ConfigError::Parse(path.to_path_buf(), err))
    }
}

/// Configuration loading failure.
#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(path, err) => {
                write!(f, "failed to read config `{}`: {err}", path.display())
            }
            Self::Parse(path, err) => {
                write!(f, "failed to parse config `{}`: {err}", path.display())
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(_, err) => Some(err),
            Self::Parse(_, err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig};

    #[test]
    fn local_only_has_no_remote() {
        let config = CoreConfig::local_only("/tmp/federwi");
        assert!(config.remote_base_url.is_none());
        assert!(config.log_level.is_none());
    }

    #[test]
    fn load_parses_json_with_optional_fields() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"dataDir": "/var/lib/federwi"}"#).expect("write config");

        let config = CoreConfig::load(&path).expect("config should parse");
        assert!(config.remote_base_url.is_none());
        assert_eq!(config.data_dir, std::path::PathBuf::from("/var/lib/federwi"));
    }

    #[test]
    fn load_reports_missing_file_as_io_error() {
        let err = CoreConfig::load("/nonexistent/federwi.json").expect_err("must fail");
        assert!(matches!(err, ConfigError::Io(_, _)));
    }
}
