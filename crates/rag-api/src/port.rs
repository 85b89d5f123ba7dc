//! Outbound port for the RAG backend.
//!
//! Panels depend on this trait rather than on [`RagApiClient`](crate::RagApiClient)
//! so they can be driven by in-memory doubles.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::types::{
    CleanDocument, DocumentListing, HealthSnapshot, RagAnswer, RawDocument, ReloadIndexOutcome,
    SearchResultSet,
};

/// The operations the dashboard needs from the backend.
#[async_trait]
pub trait RagBackend: Send + Sync {
    async fn get_health(&self) -> Result<HealthSnapshot, ApiError>;

    /// Semantic search. `query` and `k` are forwarded untouched.
    async fn search(&self, query: &str, k: u32) -> Result<SearchResultSet, ApiError>;

    /// Retrieve `k` context chunks and synthesize an answer.
    async fn rag_query(&self, query: &str, k: u32) -> Result<RagAnswer, ApiError>;

    async fn get_raw_documents(&self, limit: u32)
        -> Result<DocumentListing<RawDocument>, ApiError>;

    async fn get_clean_documents(
        &self,
        limit: u32,
    ) -> Result<DocumentListing<CleanDocument>, ApiError>;

    /// Ask the backend to reload its vector index from storage.
    async fn reload_index(&self) -> Result<ReloadIndexOutcome, ApiError>;
}
