use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scraping::ticketing_html;
use crate::utils;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),
    #[error("unable to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub calendar_id: Option<String>,
    pub access_token: Option<String>,
    pub ticketing_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl AppConfig {
    /// Loads the JSON config file and applies environment overrides.
    ///
    /// Without an explicit path the default location is used, and a missing
    /// file there just means defaults. An explicit path must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                read_config(path)?
            }
            None => {
                let path = utils::config_path();
                if path.exists() {
                    read_config(&path)?
                } else {
                    AppConfig::default()
                }
            }
        };
        Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
    }

    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("BRENTFORD_CALENDAR_ID") {
            self.calendar_id = Some(value);
        }
        if let Some(value) = lookup("GOOGLE_CALENDAR_TOKEN") {
            self.access_token = Some(value);
        }
        if let Some(value) = lookup("BRENTFORD_TICKETING_URL") {
            self.ticketing_url = Some(value);
        }
        if let Some(secs) = lookup("BRENTFORD_FETCH_TIMEOUT_SECS").and_then(|s| s.parse().ok()) {
            self.timeout_secs = Some(secs);
        }
        self
    }

    pub fn ticketing_url(&self) -> &str {
        self.ticketing_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(ticketing_html::DEFAULT_URL)
    }

    pub fn http_timeout(&self) -> Duration {
        self.timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(ticketing_html::DEFAULT_TIMEOUT)
    }
}

fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    tracing::info!(path = %path.display(), "loading config");
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
