//! Dashboard configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use rag_api::{ClientConfig, DEFAULT_BASE_PATH, DEFAULT_TIMEOUT};
use thiserror::Error;

/// Default number of search hits requested.
pub const DEFAULT_SEARCH_K: u32 = 5;
/// Default number of context chunks for a RAG query.
pub const DEFAULT_RAG_K: u32 = 3;
/// Page size for the documents panel.
pub const DEFAULT_DOCUMENT_LIMIT: u32 = 10;
/// Health polling cadence.
pub const DEFAULT_HEALTH_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a positive integer, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

/// Configuration for the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Backend scheme, host and port.
    pub endpoint: String,
    /// Path prefix for every backend route.
    pub base_path: String,
    /// Per-request ceiling.
    pub request_timeout: Duration,
    /// How often the health monitor polls.
    pub health_interval: Duration,
    pub search_k: u32,
    pub rag_k: u32,
    pub document_limit: u32,
    /// Log filter (trace, debug, info, warn, error or an EnvFilter directive).
    pub log_level: String,
    /// Where TUI mode writes its log.
    pub log_file: PathBuf,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8000".to_string(),
            base_path: DEFAULT_BASE_PATH.to_string(),
            request_timeout: DEFAULT_TIMEOUT,
            health_interval: DEFAULT_HEALTH_INTERVAL,
            search_k: DEFAULT_SEARCH_K,
            rag_k: DEFAULT_RAG_K,
            document_limit: DEFAULT_DOCUMENT_LIMIT,
            log_level: "info".to_string(),
            log_file: PathBuf::from("rag-dash.log"),
        }
    }
}

impl DashboardConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `RAG_DASH_ENDPOINT`: backend URL (default: http://127.0.0.1:8000)
    /// - `RAG_DASH_BASE_PATH`: route prefix (default: /api)
    /// - `RAG_DASH_TIMEOUT_SECS`: request timeout (default: 30)
    /// - `RAG_DASH_HEALTH_INTERVAL_SECS`: health poll interval (default: 30)
    /// - `RAG_DASH_LOG_LEVEL` or `RUST_LOG`: log filter (default: info)
    /// - `RAG_DASH_LOG_FILE`: TUI log file (default: rag-dash.log)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. `from_env` passes the process
    /// environment; tests pass a map.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let request_timeout = match lookup("RAG_DASH_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(parse_positive("RAG_DASH_TIMEOUT_SECS", &v)?),
            None => defaults.request_timeout,
        };
        let health_interval = match lookup("RAG_DASH_HEALTH_INTERVAL_SECS") {
            Some(v) => Duration::from_secs(parse_positive("RAG_DASH_HEALTH_INTERVAL_SECS", &v)?),
            None => defaults.health_interval,
        };

        Ok(Self {
            endpoint: lookup("RAG_DASH_ENDPOINT").unwrap_or(defaults.endpoint),
            base_path: lookup("RAG_DASH_BASE_PATH").unwrap_or(defaults.base_path),
            request_timeout,
            health_interval,
            log_level: lookup("RAG_DASH_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),
            log_file: lookup("RAG_DASH_LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_file),
            ..defaults
        })
    }

    /// Reject values the panels cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout.is_zero() {
            return Err(ConfigError::Zero("request timeout"));
        }
        if self.health_interval.is_zero() {
            return Err(ConfigError::Zero("health interval"));
        }
        if self.document_limit == 0 {
            return Err(ConfigError::Zero("document limit"));
        }
        Ok(())
    }

    /// Settings for the HTTP client.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.endpoint.clone())
            .with_base_path(self.base_path.clone())
            .with_timeout(self.request_timeout)
    }
}

fn parse_positive(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::Zero(key)),
        Ok(n) => Ok(n),
        Err(_) => Err(ConfigError::InvalidNumber {
            key,
            value: value.to_string(),
        }),
    }
}
