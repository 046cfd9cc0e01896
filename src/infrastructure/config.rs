//! Runtime configuration.
//!
//! Values come from built-in defaults, then an optional JSON file, then
//! environment variables, with later sources winning.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5001/api/generate";
pub const DEFAULT_CONFIG_FILE: &str = "math2visual.json";

pub const CONFIG_ENV: &str = "MATH2VISUAL_CONFIG";
pub const ENDPOINT_ENV: &str = "MATH2VISUAL_ENDPOINT";
pub const EXPORT_DIR_ENV: &str = "MATH2VISUAL_EXPORT_DIR";
pub const LOG_FILE_ENV: &str = "MATH2VISUAL_LOG_FILE";
pub const LOG_LEVEL_ENV: &str = "MATH2VISUAL_LOG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("generation endpoint must be an http(s) URL, got {0:?}")]
    InvalidEndpoint(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// URL receiving generation requests
    pub endpoint: String,
    /// Directory that exported SVGs are written to
    pub export_dir: PathBuf,
    pub log_file: PathBuf,
    /// Fallback filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            export_dir: PathBuf::from("."),
            log_file: PathBuf::from("math2visual.log"),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from the file and process environment.
    ///
    /// An explicitly named config file must exist; the default one is optional.
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = env::var_os(CONFIG_ENV).map(PathBuf::from);
        let path = explicit
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        let mut config = if explicit.is_some() || path.exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };
        config.apply_overrides(|key| env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies environment-style overrides; blank values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(endpoint) = value(ENDPOINT_ENV) {
            self.endpoint = endpoint.trim().to_string();
        }
        if let Some(dir) = value(EXPORT_DIR_ENV) {
            self.export_dir = PathBuf::from(dir);
        }
        if let Some(file) = value(LOG_FILE_ENV) {
            self.log_file = PathBuf::from(file);
        }
        if let Some(level) = value(LOG_LEVEL_ENV) {
            self.log_level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = self.endpoint.trim();
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            Ok(())
        } else {
            Err(ConfigError::InvalidEndpoint(self.endpoint.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.endpoint, "http://localhost:5001/api/generate");
        assert_eq!(config.export_dir, PathBuf::from("."));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"endpoint": "https://m2v.example/api/generate"}}"#).unwrap();

        let config = Config::from_file(file.path()).unwrap();

        assert_eq!(config.endpoint, "https://m2v.example/api/generate");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ endpoint = 3 }}").unwrap();

        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"endpont": "http://x"}}"#).unwrap();

        assert!(matches!(
            Config::from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = Config::from_file(Path::new("/nonexistent/math2visual.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_overrides_win_and_blank_is_ignored() {
        let env: HashMap<&str, &str> = [
            (ENDPOINT_ENV, " http://10.0.0.5:5001/api/generate "),
            (EXPORT_DIR_ENV, "out"),
            (LOG_LEVEL_ENV, "  "),
        ]
        .into_iter()
        .collect();
        let mut config = Config::default();

        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.endpoint, "http://10.0.0.5:5001/api/generate");
        assert_eq!(config.export_dir, PathBuf::from("out"));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_endpoint_must_be_http() {
        let config = Config {
            endpoint: "localhost:5001".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidEndpoint(_))
        ));

        let config = Config {
            endpoint: String::new(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
