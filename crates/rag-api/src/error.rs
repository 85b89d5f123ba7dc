//! Errors returned by the RAG API client.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur when communicating with the RAG backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response reached us (connection refused, DNS failure, reset).
    #[error("Network error: {0}")]
    Network(String),
    /// The backend did not answer within the request ceiling.
    #[error("Request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),
    /// The backend answered with a non-2xx status.
    #[error("Backend returned HTTP {status}{}", detail_suffix(.detail))]
    Request { status: u16, detail: Option<String> },
    /// A 2xx body did not match the expected shape.
    #[error("Failed to parse response: {0}")]
    Decode(String),
    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(d) => format!(": {d}"),
        None => String::new(),
    }
}

impl ApiError {
    /// Backend-provided detail, if the backend rejected the request with one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Request { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// HTTP status for rejected requests.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Timeout(_))
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }

    /// Text to show a user: the backend detail when present, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_string()
    }

    /// Classify a transport-level reqwest failure.
    pub(crate) fn from_transport(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            ApiError::Timeout(timeout)
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}
