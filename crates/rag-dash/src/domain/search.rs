//! Semantic search panel.
//!
//! Transition points: `begin_submit` (on submit) and `complete` (on success or
//! failure). Stale results stay visible while a new search is in flight; a
//! failed search clears them.

use std::ops::RangeInclusive;
use std::sync::Arc;

use parking_lot::Mutex;
use rag_api::{ApiError, RagBackend, SearchResultSet};
use tokio::task::JoinHandle;

use super::generation::{RequestGeneration, RequestTicket};
use super::text_input;

/// Advisory range for the result count; enforced only by the stepper keys.
pub const SEARCH_K_RANGE: RangeInclusive<u32> = 1..=20;

const SEARCH_FAILED: &str = "Search failed";

/// A search the panel has committed to issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub ticket: RequestTicket,
    pub query: String,
    pub k: u32,
}

/// Search panel state.
#[derive(Debug, Clone)]
pub struct SearchState {
    pub query: String,
    pub k: u32,
    pub results: SearchResultSet,
    pub loading: bool,
    pub error: Option<String>,
    /// Whether any search has completed yet.
    pub searched: bool,
    generation: RequestGeneration,
}

impl SearchState {
    pub fn new(k: u32) -> Self {
        Self {
            query: String::new(),
            k,
            results: Vec::new(),
            loading: false,
            error: None,
            searched: false,
            generation: RequestGeneration::default(),
        }
    }

    /// Start a search. Returns `None` for a blank query or while a search
    /// is already outstanding.
    pub fn begin_submit(&mut self) -> Option<SearchRequest> {
        if self.query.trim().is_empty() || self.loading {
            return None;
        }
        self.loading = true;
        self.error = None;
        Some(SearchRequest {
            ticket: self.generation.issue(),
            query: self.query.clone(),
            k: self.k,
        })
    }

    /// Apply a finished search. Returns `false` when the ticket is stale and
    /// the outcome was dropped.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<SearchResultSet, ApiError>,
    ) -> bool {
        if !self.generation.is_current(ticket) {
            return false;
        }
        self.loading = false;
        self.searched = true;
        match outcome {
            Ok(results) => self.results = results,
            Err(e) => {
                self.results.clear();
                self.error = Some(e.user_message(SEARCH_FAILED));
            }
        }
        true
    }

    /// Whether to show the "no results" notice.
    pub fn shows_empty_notice(&self) -> bool {
        self.searched && !self.loading && self.error.is_none() && self.results.is_empty()
    }

    pub fn requests_issued(&self) -> u64 {
        self.generation.issued()
    }
}

/// Search panel bound to a backend.
#[derive(Clone)]
pub struct SearchPanel {
    backend: Arc<dyn RagBackend>,
    state: Arc<Mutex<SearchState>>,
}

impl SearchPanel {
    pub fn new(backend: Arc<dyn RagBackend>, k: u32) -> Self {
        Self {
            backend,
            state: Arc::new(Mutex::new(SearchState::new(k))),
        }
    }

    /// Copy of the current state for rendering or assertions.
    pub fn snapshot(&self) -> SearchState {
        self.state.lock().clone()
    }

    pub fn set_query(&self, query: impl Into<String>) {
        self.state.lock().query = query.into();
    }

    pub fn push_char(&self, c: char) {
        text_input::push(&mut self.state.lock().query, c);
    }

    pub fn pop_char(&self) {
        self.state.lock().query.pop();
    }

    /// Set `k` without clamping.
    pub fn set_k(&self, k: u32) {
        self.state.lock().k = k;
    }

    /// Step `k` by one within [`SEARCH_K_RANGE`].
    pub fn step_k(&self, up: bool) {
        let mut state = self.state.lock();
        state.k = text_input::step(state.k, up, &SEARCH_K_RANGE);
    }

    /// Submit the current query. Returns the in-flight task, or `None` when
    /// nothing was sent.
    pub fn submit(&self) -> Option<JoinHandle<()>> {
        let request = self.state.lock().begin_submit()?;
        let backend = Arc::clone(&self.backend);
        let state = Arc::clone(&self.state);

        tracing::debug!(query = %request.query, k = request.k, "search submitted");
        Some(tokio::spawn(async move {
            let outcome = backend.search(&request.query, request.k).await;
            if let Err(e) = &outcome {
                tracing::warn!(error = %e, "search failed");
            }
            if !state.lock().complete(request.ticket, outcome) {
                tracing::debug!(ticket = request.ticket.value(), "stale search response dropped");
            }
        }))
    }
}
