//! RAG-DASH: terminal dashboard for a retrieval-augmented generation backend.
//!
//! The dashboard shows backend health (polled on an interval), runs semantic
//! searches and RAG queries, and lists stored documents. All backend access
//! goes through [`rag_api::RagBackend`], so every panel can be driven by an
//! in-memory double.
//!
//! ## Layout
//!
//! - [`config`]: environment-driven settings
//! - [`domain`]: panel state machines and the root [`domain::App`]
//! - [`ui`]: ratatui renderers over an immutable [`domain::DashboardView`]
//! - [`cli`]: argument parsing and one-shot subcommands
//! - [`telemetry`]: tracing subscriber setup

pub mod cli;
pub mod config;
pub mod domain;
pub mod telemetry;
pub mod ui;
