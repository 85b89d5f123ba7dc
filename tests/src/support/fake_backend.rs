//! In-memory [`RagBackend`] with scripted responses and a call log.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use rag_api::{
    ApiError, CleanDocument, DocumentListing, HealthSnapshot, HealthStatus, RagAnswer, RagBackend,
    RawDocument, ReloadIndexOutcome, SearchResult, SearchResultSet,
};

/// A backend call as the fake received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Health,
    Search { query: String, k: u32 },
    Rag { query: String, k: u32 },
    RawDocuments { limit: u32 },
    CleanDocuments { limit: u32 },
    ReloadIndex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    Health,
    Search,
    Rag,
    RawDocuments,
    CleanDocuments,
    ReloadIndex,
}

impl Call {
    pub fn kind(&self) -> CallKind {
        match self {
            Call::Health => CallKind::Health,
            Call::Search { .. } => CallKind::Search,
            Call::Rag { .. } => CallKind::Rag,
            Call::RawDocuments { .. } => CallKind::RawDocuments,
            Call::CleanDocuments { .. } => CallKind::CleanDocuments,
            Call::ReloadIndex => CallKind::ReloadIndex,
        }
    }
}

/// Cloneable description of an [`ApiError`].
#[derive(Debug, Clone)]
pub enum Failure {
    Network,
    Timeout,
    Rejected { status: u16, detail: Option<String> },
}

impl Failure {
    pub fn rejected(status: u16, detail: &str) -> Self {
        Failure::Rejected {
            status,
            detail: Some(detail.to_string()),
        }
    }

    fn into_error(self) -> ApiError {
        match self {
            Failure::Network => ApiError::Network("connection refused".to_string()),
            Failure::Timeout => ApiError::Timeout(Duration::from_secs(30)),
            Failure::Rejected { status, detail } => ApiError::Request { status, detail },
        }
    }
}

type Scripted<T> = Result<T, Failure>;

pub struct FakeBackend {
    calls: Mutex<Vec<Call>>,
    delays: Mutex<HashMap<CallKind, Duration>>,
    health: Mutex<Scripted<HealthSnapshot>>,
    search: Mutex<Scripted<SearchResultSet>>,
    rag: Mutex<Scripted<RagAnswer>>,
    clean: Mutex<Scripted<Vec<CleanDocument>>>,
    raw: Mutex<Scripted<Vec<RawDocument>>>,
    reload: Mutex<Scripted<ReloadIndexOutcome>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeBackend {
    /// Healthy backend with empty listings.
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            delays: Mutex::new(HashMap::new()),
            health: Mutex::new(Ok(healthy_snapshot())),
            search: Mutex::new(Ok(Vec::new())),
            rag: Mutex::new(Ok(answer("42", 0.5, 3))),
            clean: Mutex::new(Ok(Vec::new())),
            raw: Mutex::new(Ok(Vec::new())),
            reload: Mutex::new(Ok(ReloadIndexOutcome {
                status: "success".to_string(),
                vector_count: 100,
                message: "Index reloaded with 100 vectors".to_string(),
            })),
        }
    }

    pub fn set_health(&self, outcome: Scripted<HealthSnapshot>) {
        *self.health.lock() = outcome;
    }

    pub fn set_search(&self, outcome: Scripted<SearchResultSet>) {
        *self.search.lock() = outcome;
    }

    pub fn set_rag(&self, outcome: Scripted<RagAnswer>) {
        *self.rag.lock() = outcome;
    }

    pub fn set_clean(&self, outcome: Scripted<Vec<CleanDocument>>) {
        *self.clean.lock() = outcome;
    }

    pub fn set_raw(&self, outcome: Scripted<Vec<RawDocument>>) {
        *self.raw.lock() = outcome;
    }

    pub fn set_reload(&self, outcome: Scripted<ReloadIndexOutcome>) {
        *self.reload.lock() = outcome;
    }

    /// Hold every `kind` call for `delay` before answering.
    pub fn delay(&self, kind: CallKind, delay: Duration) {
        self.delays.lock().insert(kind, delay);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn count(&self, kind: CallKind) -> usize {
        self.calls.lock().iter().filter(|c| c.kind() == kind).count()
    }

    async fn enter(&self, call: Call) {
        let kind = call.kind();
        self.calls.lock().push(call);
        let delay = self.delays.lock().get(&kind).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl RagBackend for FakeBackend {
    async fn get_health(&self) -> Result<HealthSnapshot, ApiError> {
        self.enter(Call::Health).await;
        self.health.lock().clone().map_err(Failure::into_error)
    }

    async fn search(&self, query: &str, k: u32) -> Result<SearchResultSet, ApiError> {
        self.enter(Call::Search {
            query: query.to_string(),
            k,
        })
        .await;
        self.search.lock().clone().map_err(Failure::into_error)
    }

    async fn rag_query(&self, query: &str, k: u32) -> Result<RagAnswer, ApiError> {
        self.enter(Call::Rag {
            query: query.to_string(),
            k,
        })
        .await;
        self.rag.lock().clone().map_err(Failure::into_error)
    }

    async fn get_raw_documents(
        &self,
        limit: u32,
    ) -> Result<DocumentListing<RawDocument>, ApiError> {
        self.enter(Call::RawDocuments { limit }).await;
        let items = self.raw.lock().clone().map_err(Failure::into_error)?;
        let count = Some(items.len());
        Ok(DocumentListing { items, count })
    }

    async fn get_clean_documents(
        &self,
        limit: u32,
    ) -> Result<DocumentListing<CleanDocument>, ApiError> {
        self.enter(Call::CleanDocuments { limit }).await;
        let items = self.clean.lock().clone().map_err(Failure::into_error)?;
        let count = Some(items.len());
        Ok(DocumentListing { items, count })
    }

    async fn reload_index(&self) -> Result<ReloadIndexOutcome, ApiError> {
        self.enter(Call::ReloadIndex).await;
        self.reload.lock().clone().map_err(Failure::into_error)
    }
}

pub fn healthy_snapshot() -> HealthSnapshot {
    HealthSnapshot {
        status: HealthStatus::Healthy,
        vector_index_loaded: true,
        vector_count: 1500,
        raw_document_count: 12,
        clean_document_count: 12,
    }
}

pub fn search_hit(url: &str, score: f64, text: &str) -> SearchResult {
    SearchResult {
        url: Some(url.to_string()),
        score: Some(score),
        text: text.to_string(),
    }
}

pub fn answer(text: &str, seconds: f64, chunks: u32) -> RagAnswer {
    RagAnswer {
        answer: text.to_string(),
        processing_time_seconds: seconds,
        context_chunk_count: chunks,
    }
}

pub fn clean_doc(url: &str, text: &str) -> CleanDocument {
    CleanDocument {
        url: Some(url.to_string()),
        text: text.to_string(),
    }
}

pub fn raw_doc(url: &str, html: &str) -> RawDocument {
    RawDocument {
        url: Some(url.to_string()),
        html: html.to_string(),
    }
}

/// Let spawned tasks run without moving the clock.
pub async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}
