//! Panel state machines and the root composition.
//!
//! Each panel keeps its state behind a short-lived lock and exposes explicit
//! transition points; requests run as spawned tasks so the UI loop never
//! waits on the network.

mod app;
mod documents;
mod generation;
mod health;
mod rag;
mod search;
mod text_input;

pub use app::{App, AppState, DashboardView, Focus};
pub use documents::{
    fetch_documents, DocumentKind, DocumentRecord, DocumentsPanel, DocumentsRequest,
    DocumentsState,
};
pub use generation::{RequestGeneration, RequestTicket};
pub use health::{poll_once, HealthMonitor, HealthPhase, HealthState, HealthView};
pub use rag::{RagPanel, RagRequest, RagState, RAG_K_RANGE};
pub use search::{SearchPanel, SearchRequest, SearchState, SEARCH_K_RANGE};
