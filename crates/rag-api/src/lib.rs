//! # rag-api
//!
//! Typed client for the RAG backend's REST API.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET | `/health` | [`RagBackend::get_health`] |
//! | GET | `/search?q=&k=` | [`RagBackend::search`] |
//! | POST | `/rag` | [`RagBackend::rag_query`] |
//! | GET | `/raw?limit=` | [`RagBackend::get_raw_documents`] |
//! | GET | `/clean?limit=` | [`RagBackend::get_clean_documents`] |
//! | POST | `/reload-index` | [`RagBackend::reload_index`] |
//!
//! All routes live under a base path (`/api` by default) and share a single
//! request timeout (30 seconds by default).

mod client;
mod error;
mod port;
mod types;

pub use client::{ClientConfig, RagApiClient, DEFAULT_BASE_PATH, DEFAULT_TIMEOUT};
pub use error::ApiError;
pub use port::RagBackend;
pub use types::*;
