//! RAG question-answering panel.
//!
//! Unlike search, submitting clears the previous answer and error before the
//! request goes out, so an old answer is never on screen while a new one is
//! pending.

use std::ops::RangeInclusive;
use std::sync::Arc;

use parking_lot::Mutex;
use rag_api::{ApiError, RagAnswer, RagBackend};
use tokio::task::JoinHandle;

use super::generation::{RequestGeneration, RequestTicket};
use super::text_input;

/// Advisory range for the context-chunk count.
pub const RAG_K_RANGE: RangeInclusive<u32> = 1..=10;

const RAG_FAILED: &str = "RAG query failed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RagRequest {
    pub ticket: RequestTicket,
    pub question: String,
    pub k: u32,
}

/// RAG panel state.
#[derive(Debug, Clone)]
pub struct RagState {
    pub question: String,
    pub k: u32,
    pub answer: Option<RagAnswer>,
    pub loading: bool,
    pub error: Option<String>,
    generation: RequestGeneration,
}

impl RagState {
    pub fn new(k: u32) -> Self {
        Self {
            question: String::new(),
            k,
            answer: None,
            loading: false,
            error: None,
            generation: RequestGeneration::default(),
        }
    }

    /// Start a query, clearing any previous answer and error.
    pub fn begin_submit(&mut self) -> Option<RagRequest> {
        if self.question.trim().is_empty() || self.loading {
            return None;
        }
        self.loading = true;
        self.error = None;
        self.answer = None;
        Some(RagRequest {
            ticket: self.generation.issue(),
            question: self.question.clone(),
            k: self.k,
        })
    }

    pub fn complete(&mut self, ticket: RequestTicket, outcome: Result<RagAnswer, ApiError>) -> bool {
        if !self.generation.is_current(ticket) {
            return false;
        }
        self.loading = false;
        match outcome {
            Ok(answer) => self.answer = Some(answer),
            Err(e) => self.error = Some(e.user_message(RAG_FAILED)),
        }
        true
    }

    pub fn requests_issued(&self) -> u64 {
        self.generation.issued()
    }
}

/// RAG panel bound to a backend.
#[derive(Clone)]
pub struct RagPanel {
    backend: Arc<dyn RagBackend>,
    state: Arc<Mutex<RagState>>,
}

impl RagPanel {
    pub fn new(backend: Arc<dyn RagBackend>, k: u32) -> Self {
        Self {
            backend,
            state: Arc::new(Mutex::new(RagState::new(k))),
        }
    }

    pub fn snapshot(&self) -> RagState {
        self.state.lock().clone()
    }

    pub fn set_question(&self, question: impl Into<String>) {
        self.state.lock().question = question.into();
    }

    pub fn push_char(&self, c: char) {
        text_input::push(&mut self.state.lock().question, c);
    }

    pub fn pop_char(&self) {
        self.state.lock().question.pop();
    }

    pub fn set_k(&self, k: u32) {
        self.state.lock().k = k;
    }

    pub fn step_k(&self, up: bool) {
        let mut state = self.state.lock();
        state.k = text_input::step(state.k, up, &RAG_K_RANGE);
    }

    /// Ask the current question. Returns the in-flight task, or `None` when
    /// nothing was sent.
    pub fn submit(&self) -> Option<JoinHandle<()>> {
        let request = self.state.lock().begin_submit()?;
        let backend = Arc::clone(&self.backend);
        let state = Arc::clone(&self.state);

        tracing::debug!(k = request.k, "rag query submitted");
        Some(tokio::spawn(async move {
            let outcome = backend.rag_query(&request.question, request.k).await;
            match &outcome {
                Ok(answer) => tracing::info!(
                    ctx_count = answer.context_chunk_count,
                    processing_time = answer.processing_time_seconds,
                    "rag answer received"
                ),
                Err(e) => tracing::warn!(error = %e, "rag query failed"),
            }
            state.lock().complete(request.ticket, outcome);
        }))
    }
}
