//! Application configuration.
//!
//! Values come from defaults, then `VOYAGE_*` environment variables, then
//! command-line overrides applied by the binary.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::api::{DEFAULT_API_URL, DEFAULT_PAGE_LIMIT};

pub const ENV_API_URL: &str = "VOYAGE_API_URL";
pub const ENV_TOKEN: &str = "VOYAGE_TOKEN";
pub const ENV_PAGE_LIMIT: &str = "VOYAGE_PAGE_LIMIT";
pub const ENV_SCROLL_THRESHOLD: &str = "VOYAGE_SCROLL_THRESHOLD";
pub const ENV_LOG_FILE: &str = "VOYAGE_LOG_FILE";
pub const ENV_REQUEST_TIMEOUT: &str = "VOYAGE_REQUEST_TIMEOUT";

/// Near-bottom distance of the terminal list: two itineraries of 3 rows.
pub const DEFAULT_SCROLL_THRESHOLD_ROWS: u32 = 6;

/// Seconds a backend request may take before it fails with a timeout.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Errors raised while reading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },

    #[error("page limit must be at least 1")]
    ZeroPageLimit,

    #[error("request timeout must be at least 1 second")]
    ZeroRequestTimeout,
}

/// Runtime configuration of the itinerary browser.
///
/// # Example
///
/// ```ignore
/// use voyage::config::AppConfig;
///
/// let config = AppConfig::default()
///     .with_api_url("http://10.0.0.5:3000")
///     .with_page_limit(20);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Backend base URL
    pub api_url: String,
    /// Bearer token, if the backend requires one
    pub auth_token: Option<String>,
    /// Itineraries per page
    pub page_limit: u32,
    /// Near-bottom distance in terminal rows
    pub near_bottom_threshold: u32,
    /// Where tracing output goes; stdout belongs to the UI
    pub log_file: PathBuf,
    /// Upper bound on each backend request
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            auth_token: None,
            page_limit: DEFAULT_PAGE_LIMIT,
            near_bottom_threshold: DEFAULT_SCROLL_THRESHOLD_ROWS,
            log_file: default_log_file(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

fn default_log_file() -> PathBuf {
    std::env::temp_dir().join("voyage.log")
}

fn parse_number(var: &'static str, value: &str) -> Result<u32, ConfigError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| ConfigError::InvalidNumber {
            var,
            value: value.to_string(),
        })
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn with_page_limit(mut self, limit: u32) -> Self {
        self.page_limit = limit;
        self
    }

    pub fn with_near_bottom_threshold(mut self, threshold: u32) -> Self {
        self.near_bottom_threshold = threshold;
        self
    }

    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = path.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its
    /// value. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get(ENV_API_URL) {
            config.api_url = url.trim().to_string();
        }
        if let Some(token) = get(ENV_TOKEN) {
            config.auth_token = Some(token.trim().to_string());
        }
        if let Some(limit) = get(ENV_PAGE_LIMIT) {
            config.page_limit = parse_number(ENV_PAGE_LIMIT, &limit)?;
        }
        if let Some(threshold) = get(ENV_SCROLL_THRESHOLD) {
            config.near_bottom_threshold = parse_number(ENV_SCROLL_THRESHOLD, &threshold)?;
        }
        if let Some(path) = get(ENV_LOG_FILE) {
            config.log_file = PathBuf::from(path);
        }
        if let Some(secs) = get(ENV_REQUEST_TIMEOUT) {
            let secs = parse_number(ENV_REQUEST_TIMEOUT, &secs)?;
            config.request_timeout = Duration::from_secs(u64::from(secs));
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_limit == 0 {
            return Err(ConfigError::ZeroPageLimit);
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::ZeroRequestTimeout);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_url, "http://localhost:3000");
        assert_eq!(config.auth_token, None);
        assert_eq!(config.page_limit, 10);
        assert_eq!(config.near_bottom_threshold, DEFAULT_SCROLL_THRESHOLD_ROWS);
        assert!(config.log_file.ends_with("voyage.log"));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_from_lookup_reads_all_values() {
        let config = AppConfig::from_lookup(lookup(&[
            (ENV_API_URL, "http://api.test:3000"),
            (ENV_TOKEN, "secret"),
            (ENV_PAGE_LIMIT, "25"),
            (ENV_SCROLL_THRESHOLD, " 8 "),
            (ENV_LOG_FILE, "/var/log/voyage.log"),
            (ENV_REQUEST_TIMEOUT, "5"),
        ]))
        .unwrap();

        assert_eq!(config.api_url, "http://api.test:3000");
        assert_eq!(config.auth_token.as_deref(), Some("secret"));
        assert_eq!(config.page_limit, 25);
        assert_eq!(config.near_bottom_threshold, 8);
        assert_eq!(config.log_file, PathBuf::from("/var/log/voyage.log"));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_empty_values_are_ignored() {
        let config = AppConfig::from_lookup(lookup(&[(ENV_TOKEN, ""), (ENV_PAGE_LIMIT, "  ")])).unwrap();
        assert_eq!(config.auth_token, None);
        assert_eq!(config.page_limit, DEFAULT_PAGE_LIMIT);
    }

    #[test]
    fn test_invalid_number() {
        let err = AppConfig::from_lookup(lookup(&[(ENV_SCROLL_THRESHOLD, "lots")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                var: ENV_SCROLL_THRESHOLD,
                value: "lots".to_string()
            }
        );
        assert!(err.to_string().contains("VOYAGE_SCROLL_THRESHOLD"));
    }

    #[test]
    fn test_zero_page_limit_rejected() {
        let err = AppConfig::from_lookup(lookup(&[(ENV_PAGE_LIMIT, "0")])).unwrap_err();
        assert_eq!(err, ConfigError::ZeroPageLimit);
        assert!(AppConfig::default().with_page_limit(0).validate().is_err());
    }

    #[test]
    fn test_zero_request_timeout_rejected() {
        let err = AppConfig::from_lookup(lookup(&[(ENV_REQUEST_TIMEOUT, "0")])).unwrap_err();
        assert_eq!(err, ConfigError::ZeroRequestTimeout);
    }

    #[test]
    #[serial]
    fn test_from_env() {
        std::env::set_var(ENV_API_URL, "http://env.test");
        std::env::set_var(ENV_PAGE_LIMIT, "12");
        let config = AppConfig::from_env();
        std::env::remove_var(ENV_API_URL);
        std::env::remove_var(ENV_PAGE_LIMIT);

        let config = config.unwrap();
        assert_eq!(config.api_url, "http://env.test");
        assert_eq!(config.page_limit, 12);
    }
}
