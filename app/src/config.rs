//! FILENAME: app/src/config.rs
// PURPOSE: Runtime configuration (file -> environment -> CLI flags).

use std::path::{Path, PathBuf};
use std::time::Duration;

use roster_engine::date_format::DEFAULT_UTC_OFFSET_MINUTES;
use roster_source::{DEFAULT_TIMEOUT, DEFAULT_WINDOW_DAYS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_SOURCE_URL: &str = "ROSTER_SOURCE_URL";
pub const ENV_WINDOW_DAYS: &str = "ROSTER_WINDOW_DAYS";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RosterConfig {
    /// Remote JSON endpoint. Unset means a file source must be given.
    pub source_url: Option<String>,
    /// Half-width of the fetch window around today, in days.
    pub window_days: u32,
    /// Display offset for timestamp dates, in minutes east of UTC.
    pub utc_offset_minutes: i32,
    pub timeout_secs: u64,
    pub log_file: Option<PathBuf>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        RosterConfig {
            source_url: None,
            window_days: DEFAULT_WINDOW_DAYS,
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            log_file: None,
        }
    }
}

impl RosterConfig {
    /// Reads a JSON config file; missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Defaults, then the optional file, then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(p) => RosterConfig::from_file(p)?,
            None => RosterConfig::default(),
        };
        config.with_env(|key| std::env::var(key).ok())
    }

    /// Applies environment overrides through `lookup`.
    pub fn with_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_SOURCE_URL).filter(|v| !v.trim().is_empty()) {
            self.source_url = Some(url);
        }
        if let Some(raw) = lookup(ENV_WINDOW_DAYS) {
            self.window_days = parse_window_days(ENV_WINDOW_DAYS, &raw)?;
        }
        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// Parses a window half-width. Negative or non-numeric values are rejected.
pub fn parse_window_days(key: &'static str, raw: &str) -> Result<u32, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = RosterConfig::default();
        assert_eq!(config.window_days, 3);
        assert_eq!(config.utc_offset_minutes, 420);
        assert!(config.source_url.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"sourceUrl": "https://example.test/exec", "windowDays": 5}}"#).unwrap();

        let config = RosterConfig::from_file(file.path()).unwrap();
        assert_eq!(config.source_url.as_deref(), Some("https://example.test/exec"));
        assert_eq!(config.window_days, 5);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_bad_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            RosterConfig::from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_SOURCE_URL, "https://env.test/exec"),
            (ENV_WINDOW_DAYS, "7"),
        ]
        .into_iter()
        .collect();

        let config = RosterConfig::default()
            .with_env(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.source_url.as_deref(), Some("https://env.test/exec"));
        assert_eq!(config.window_days, 7);
    }

    #[test]
    fn test_env_bad_number() {
        let result = RosterConfig::default().with_env(|k| {
            (k == ENV_WINDOW_DAYS).then(|| "three".to_string())
        });
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_negative_window_rejected() {
        let result = RosterConfig::default().with_env(|k| {
            (k == ENV_WINDOW_DAYS).then(|| "-2".to_string())
        });
        match result {
            Err(ConfigError::InvalidValue { key, value }) => {
                assert_eq!(key, ENV_WINDOW_DAYS);
                assert_eq!(value, "-2");
            }
            other => panic!("expected InvalidValue, got {:?}", other),
        }
        assert!(parse_window_days("--days", "-1").is_err());
        assert_eq!(parse_window_days("--days", " 0 ").unwrap(), 0);
    }

    #[test]
    fn test_negative_window_in_file_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"windowDays": -2}}"#).unwrap();
        assert!(matches!(
            RosterConfig::from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }
}
