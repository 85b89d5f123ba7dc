//! Stored documents browser.
//!
//! Two kinds, clean text and raw HTML. Selecting a kind fetches it at once;
//! a failed fetch keeps the previous listing on screen.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use rag_api::{ApiError, CleanDocument, RagBackend, RawDocument};
use tokio::task::JoinHandle;

use super::generation::{RequestGeneration, RequestTicket};

const DOCUMENTS_FAILED: &str = "Failed to fetch documents";

/// Which document store to browse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DocumentKind {
    #[default]
    Clean,
    Raw,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 2] = [DocumentKind::Clean, DocumentKind::Raw];

    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::Clean => "Clean Text",
            DocumentKind::Raw => "Raw HTML",
        }
    }

    pub fn other(&self) -> DocumentKind {
        match self {
            DocumentKind::Clean => DocumentKind::Raw,
            DocumentKind::Raw => DocumentKind::Clean,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Clean => f.write_str("clean"),
            DocumentKind::Raw => f.write_str("raw"),
        }
    }
}

/// One stored document of either kind.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentRecord {
    Clean { url: Option<String>, text: String },
    Raw { url: Option<String>, html: String },
}

impl DocumentRecord {
    pub fn url(&self) -> Option<&str> {
        match self {
            DocumentRecord::Clean { url, .. } | DocumentRecord::Raw { url, .. } => url.as_deref(),
        }
    }

    pub fn kind(&self) -> DocumentKind {
        match self {
            DocumentRecord::Clean { .. } => DocumentKind::Clean,
            DocumentRecord::Raw { .. } => DocumentKind::Raw,
        }
    }
}

impl From<CleanDocument> for DocumentRecord {
    fn from(doc: CleanDocument) -> Self {
        DocumentRecord::Clean {
            url: doc.url,
            text: doc.text,
        }
    }
}

impl From<RawDocument> for DocumentRecord {
    fn from(doc: RawDocument) -> Self {
        DocumentRecord::Raw {
            url: doc.url,
            html: doc.html,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentsRequest {
    pub ticket: RequestTicket,
    pub kind: DocumentKind,
    pub limit: u32,
}

/// Documents panel state.
#[derive(Debug, Clone)]
pub struct DocumentsState {
    pub kind: DocumentKind,
    pub limit: u32,
    pub documents: Vec<DocumentRecord>,
    pub loading: bool,
    pub error: Option<String>,
    generation: RequestGeneration,
}

impl DocumentsState {
    pub fn new(limit: u32) -> Self {
        Self {
            kind: DocumentKind::default(),
            limit,
            documents: Vec::new(),
            loading: false,
            error: None,
            generation: RequestGeneration::default(),
        }
    }

    fn begin_fetch(&mut self) -> DocumentsRequest {
        self.loading = true;
        self.error = None;
        DocumentsRequest {
            ticket: self.generation.issue(),
            kind: self.kind,
            limit: self.limit,
        }
    }

    /// Initial fetch of the selected kind.
    pub fn begin_mount(&mut self) -> DocumentsRequest {
        self.begin_fetch()
    }

    /// Switch kind. A different kind always fetches, superseding any fetch
    /// still in flight; re-selecting the current kind does nothing.
    pub fn select_kind(&mut self, kind: DocumentKind) -> Option<DocumentsRequest> {
        if kind == self.kind {
            return None;
        }
        self.kind = kind;
        Some(self.begin_fetch())
    }

    /// Re-fetch the current kind; ignored while loading.
    pub fn begin_refresh(&mut self) -> Option<DocumentsRequest> {
        if self.loading {
            return None;
        }
        Some(self.begin_fetch())
    }

    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<Vec<DocumentRecord>, ApiError>,
    ) -> bool {
        if !self.generation.is_current(ticket) {
            return false;
        }
        self.loading = false;
        match outcome {
            Ok(documents) => self.documents = documents,
            Err(e) => self.error = Some(e.user_message(DOCUMENTS_FAILED)),
        }
        true
    }

    pub fn shows_empty_notice(&self) -> bool {
        !self.loading && self.documents.is_empty()
    }

    pub fn requests_issued(&self) -> u64 {
        self.generation.issued()
    }
}

/// Documents panel bound to a backend.
#[derive(Clone)]
pub struct DocumentsPanel {
    backend: Arc<dyn RagBackend>,
    state: Arc<Mutex<DocumentsState>>,
}

impl DocumentsPanel {
    pub fn new(backend: Arc<dyn RagBackend>, limit: u32) -> Self {
        Self {
            backend,
            state: Arc::new(Mutex::new(DocumentsState::new(limit))),
        }
    }

    pub fn snapshot(&self) -> DocumentsState {
        self.state.lock().clone()
    }

    /// Fetch the default kind.
    pub fn mount(&self) -> JoinHandle<()> {
        let request = self.state.lock().begin_mount();
        self.dispatch(request)
    }

    pub fn select_kind(&self, kind: DocumentKind) -> Option<JoinHandle<()>> {
        let request = self.state.lock().select_kind(kind)?;
        Some(self.dispatch(request))
    }

    pub fn toggle_kind(&self) -> Option<JoinHandle<()>> {
        let kind = self.state.lock().kind.other();
        self.select_kind(kind)
    }

    pub fn refresh(&self) -> Option<JoinHandle<()>> {
        let request = self.state.lock().begin_refresh()?;
        Some(self.dispatch(request))
    }

    fn dispatch(&self, request: DocumentsRequest) -> JoinHandle<()> {
        let backend = Arc::clone(&self.backend);
        let state = Arc::clone(&self.state);

        tracing::debug!(kind = %request.kind, limit = request.limit, "fetching documents");
        tokio::spawn(async move {
            let outcome = fetch_documents(backend.as_ref(), request.kind, request.limit).await;
            if let Err(e) = &outcome {
                tracing::warn!(kind = %request.kind, error = %e, "document fetch failed");
            }
            if !state.lock().complete(request.ticket, outcome) {
                tracing::debug!(kind = %request.kind, "stale document listing dropped");
            }
        })
    }
}

/// One listing of `kind`, normalized to [`DocumentRecord`]s.
pub async fn fetch_documents(
    backend: &dyn RagBackend,
    kind: DocumentKind,
    limit: u32,
) -> Result<Vec<DocumentRecord>, ApiError> {
    let records: Vec<DocumentRecord> = match kind {
        DocumentKind::Clean => backend
            .get_clean_documents(limit)
            .await?
            .items
            .into_iter()
            .map(DocumentRecord::from)
            .collect(),
        DocumentKind::Raw => backend
            .get_raw_documents(limit)
            .await?
            .items
            .into_iter()
            .map(DocumentRecord::from)
            .collect(),
    };
    Ok(records)
}
