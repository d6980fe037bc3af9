//! Client configuration parsed from environment variables.

use std::path::PathBuf;

pub const DEFAULT_API_BASE: &str = "https://api.badwords.milliytech.uz";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

const COLLECTION_PATH: &str = "/api/v1/badword/";
const CSV_PATH: &str = "/media/words/bad_words.csv";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The base URL is empty or not an http(s) URL.
    #[error("invalid API base URL: {0:?}")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base: String,
    pub timeouts: Timeouts,
    pub prefs_path: Option<PathBuf>,
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `BADWORDS_API_BASE`: default `https://api.badwords.milliytech.uz`
    /// - `BADWORDS_REQUEST_TIMEOUT_SECS`: default 30
    /// - `BADWORDS_CONNECT_TIMEOUT_SECS`: default 10
    /// - `BADWORDS_PREFS_PATH`: JSON preference file (native only)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the base URL is unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base = std::env::var("BADWORDS_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let timeouts = Timeouts {
            request_secs: env_parse_u64("BADWORDS_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("BADWORDS_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        let prefs_path = std::env::var_os("BADWORDS_PREFS_PATH").map(PathBuf::from);

        let mut config = Self::new(&api_base)?;
        config.timeouts = timeouts;
        config.prefs_path = prefs_path;
        Ok(config)
    }

    /// Build a config for `api_base` with default timeouts and no preference file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the base URL is unusable.
    pub fn new(api_base: &str) -> Result<Self, ConfigError> {
        Ok(Self { api_base: normalize_base(api_base)?, timeouts: Timeouts::default(), prefs_path: None })
    }

    /// URL of the first collection page, used only for its `total_items`.
    #[must_use]
    pub fn count_url(&self) -> String {
        self.page_url(1)
    }

    #[must_use]
    pub fn page_url(&self, page: u32) -> String {
        format!("{}{COLLECTION_PATH}?page={page}", self.api_base)
    }

    #[must_use]
    pub fn create_url(&self) -> String {
        format!("{}{COLLECTION_PATH}", self.api_base)
    }

    /// Public CSV export of the whole list.
    #[must_use]
    pub fn csv_download_url(&self) -> String {
        format!("{}{CSV_PATH}", self.api_base)
    }
}

fn normalize_base(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let has_host = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .is_some_and(|rest| !rest.is_empty());
    if !has_host {
        return Err(ConfigError::InvalidBaseUrl(raw.to_string()));
    }
    Ok(trimmed.to_string())
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
