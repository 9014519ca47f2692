//! Dashboard Configuration
//! Defaults, optional JSON config file and command-line overrides.

use crate::data::TextEncoding;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File published by the Busan Port Authority
pub const DEFAULT_DATA_PATH: &str = "부산항만공사_부산항 연도별 물동량 추이_20241231.csv";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("At least one encoding is required")]
    NoEncodings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    /// Tried in order until one decodes and parses
    pub encodings: Vec<TextEncoding>,
    /// Ports selected in the history chart at startup
    pub default_ports: Vec<String>,
    /// `tracing_subscriber::EnvFilter` directive
    pub log_level: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            encodings: TextEncoding::DEFAULT_ORDER.to_vec(),
            default_ports: vec!["북항".to_string(), "신항".to_string()],
            log_level: "info".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Read a JSON config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults, or the given file when present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.encodings.is_empty() {
            return Err(ConfigError::NoEncodings);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::load(None).unwrap();
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(config.encodings, TextEncoding::DEFAULT_ORDER.to_vec());
        assert_eq!(config.default_ports, vec!["북항", "신항"]);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"data_path": "volumes.csv", "encodings": ["cp949", "utf-8-sig"]}}"#).unwrap();

        let config = DashboardConfig::from_file(file.path()).unwrap();
        assert_eq!(config.data_path, PathBuf::from("volumes.csv"));
        assert_eq!(config.encodings, vec![TextEncoding::Cp949, TextEncoding::Utf8Sig]);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_rejects_empty_encodings() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"encodings": []}}"#).unwrap();
        assert!(matches!(
            DashboardConfig::from_file(file.path()),
            Err(ConfigError::NoEncodings)
        ));
    }

    #[test]
    fn test_unknown_encoding_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"encodings": ["latin-1"]}}"#).unwrap();
        assert!(matches!(
            DashboardConfig::from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }
}
