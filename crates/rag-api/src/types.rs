//! API response types matching the RAG backend's JSON contract.

use serde::{Deserialize, Serialize};

/// Backend health status as reported by `/health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
    #[default]
    #[serde(other)]
    Unknown,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Unhealthy => "unhealthy",
            HealthStatus::Unknown => "unknown",
        }
    }
}

/// Response from `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSnapshot {
    #[serde(default)]
    pub status: HealthStatus,
    #[serde(default)]
    pub vector_index_loaded: bool,
    #[serde(default)]
    pub vector_count: u64,
    #[serde(default, rename = "raw_documents")]
    pub raw_document_count: u64,
    #[serde(default, rename = "clean_documents")]
    pub clean_document_count: u64,
}

/// A single semantic search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub text: String,
}

/// Search hits in backend order (relevance-descending).
pub type SearchResultSet = Vec<SearchResult>;

/// Response from `GET /search`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub results: SearchResultSet,
    #[serde(default)]
    pub total_matches: Option<usize>,
    #[serde(default)]
    pub processing_time: Option<f64>,
}

/// Body of `POST /rag`.
#[derive(Debug, Clone, Serialize)]
pub struct RagRequest<'a> {
    pub q: &'a str,
    pub k: u32,
}

/// Response from `POST /rag`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RagAnswer {
    pub answer: String,
    #[serde(rename = "processing_time")]
    pub processing_time_seconds: f64,
    #[serde(rename = "ctx_count")]
    pub context_chunk_count: u32,
}

/// Cleaned text document from `/clean`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanDocument {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub text: String,
}

/// Raw HTML document from `/raw`.
///
/// The backend may project the `html` field away, so it defaults to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDocument {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub html: String,
}

/// Bounded page of documents of one kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentListing<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub count: Option<usize>,
}

/// Response from `POST /reload-index`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReloadIndexOutcome {
    pub status: String,
    #[serde(default)]
    pub vector_count: u64,
    #[serde(default)]
    pub message: String,
}

/// Error body the backend attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Flatten `detail` into a displayable string.
    ///
    /// Plain strings are used verbatim; validation lists contribute their
    /// `msg` entries joined with `"; "`.
    pub(crate) fn into_detail(self) -> Option<String> {
        match self.detail? {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Array(entries) => {
                let messages: Vec<&str> = entries
                    .iter()
                    .filter_map(|e| e.get("msg").and_then(|m| m.as_str()))
                    .collect();
                if messages.is_empty() {
                    None
                } else {
                    Some(messages.join("; "))
                }
            }
            _ => None,
        }
    }
}
