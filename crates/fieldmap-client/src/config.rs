//! Client configuration.

use std::path::PathBuf;
use std::time::Duration;

use fieldmap_model::EXPORT_FILE_NAME;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};

/// Backend used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable overriding the backend base URL.
pub const API_URL_ENV: &str = "FIELDMAP_API_URL";

/// Environment variable overriding the request timeout in seconds.
pub const API_TIMEOUT_ENV: &str = "FIELDMAP_API_TIMEOUT_SECS";

/// Settings for talking to the backend and writing the export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL the endpoint paths are appended to.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Where `map` writes the export document.
    #[serde(default = "default_export_file")]
    pub export_file: PathBuf,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_export_file() -> PathBuf {
    PathBuf::from(EXPORT_FILE_NAME)
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            export_file: default_export_file(),
        }
    }
}

impl ClientConfig {
    /// Defaults overlaid with the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the timeout variable is not a number.
    pub fn from_env() -> Result<Self> {
        Self::default().with_env(|key| std::env::var(key).ok())
    }

    /// Overlays values found through `lookup` onto `self`.
    ///
    /// Empty values are ignored.
    pub fn with_env<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(url) = value(API_URL_ENV) {
            self.api_url = url.trim().to_string();
        }
        if let Some(raw) = value(API_TIMEOUT_ENV) {
            self.timeout_secs = parse_timeout(&raw)?;
        }
        Ok(self)
    }

    /// Applies command-line overrides, which win over everything else.
    #[must_use]
    pub fn with_overrides(
        mut self,
        api_url: Option<String>,
        timeout_secs: Option<u64>,
        export_file: Option<PathBuf>,
    ) -> Self {
        if let Some(url) = api_url {
            self.api_url = url;
        }
        if let Some(secs) = timeout_secs {
            self.timeout_secs = secs;
        }
        if let Some(path) = export_file {
            self.export_file = path;
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn parse_timeout(raw: &str) -> Result<u64> {
    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => Err(ClientError::Config(format!(
            "{API_TIMEOUT_ENV} must be a positive number of seconds, got '{raw}'"
        ))),
        Ok(secs) => Ok(secs),
    }
}
