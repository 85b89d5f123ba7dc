//! Command-line arguments and one-shot subcommands.
//!
//! Without a subcommand the binary opens the dashboard. With one it runs a
//! single backend call, prints the result the way the matching panel would
//! and exits.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rag_api::{ApiError, RagBackend};

use crate::config::{DashboardConfig, DEFAULT_DOCUMENT_LIMIT, DEFAULT_RAG_K, DEFAULT_SEARCH_K};
use crate::domain::{fetch_documents, DocumentKind};
use crate::ui::format::{document_lines, health_fields, rag_stats_line, search_result_lines};

/// RAG-DASH: terminal dashboard for a retrieval-augmented generation backend
#[derive(Parser, Debug)]
#[command(name = "rag-dash")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Backend URL (scheme, host, port); overrides RAG_DASH_ENDPOINT
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Route prefix, "" when the backend is served at root; overrides RAG_DASH_BASE_PATH
    #[arg(long)]
    pub base_path: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Health polling interval in seconds
    #[arg(long)]
    pub health_interval: Option<u64>,

    /// Log filter (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log file used while the dashboard is open
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print backend health
    Health,
    /// Semantic search over indexed chunks
    Search {
        query: String,
        /// Number of results (1-20 suggested; sent as given)
        #[arg(short, default_value_t = DEFAULT_SEARCH_K)]
        k: u32,
    },
    /// Ask a question answered from retrieved context
    Ask {
        question: String,
        /// Context chunks to retrieve (1-10 suggested; sent as given)
        #[arg(short, default_value_t = DEFAULT_RAG_K)]
        k: u32,
    },
    /// List stored documents
    Docs {
        #[arg(long, value_enum, default_value_t = KindArg::Clean)]
        kind: KindArg,
        #[arg(long, default_value_t = DEFAULT_DOCUMENT_LIMIT)]
        limit: u32,
    },
    /// Reload the backend's vector index
    ReloadIndex,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
    Clean,
    Raw,
}

impl From<KindArg> for DocumentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Clean => DocumentKind::Clean,
            KindArg::Raw => DocumentKind::Raw,
        }
    }
}

impl Args {
    /// Layer command-line overrides on top of `config`.
    pub fn apply(&self, config: &mut DashboardConfig) {
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(base_path) = &self.base_path {
            config.base_path = base_path.clone();
        }
        if let Some(secs) = self.timeout {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = self.health_interval {
            config.health_interval = Duration::from_secs(secs);
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if let Some(path) = &self.log_file {
            config.log_file = path.clone();
        }
    }
}

fn failed(err: ApiError, fallback: &str) -> anyhow::Error {
    let message = err.user_message(fallback);
    anyhow::Error::new(err).context(message)
}

/// Run one subcommand against `backend`, writing its report to `out`.
pub async fn run_command<W: Write>(
    command: &Command,
    backend: &dyn RagBackend,
    out: &mut W,
) -> Result<()> {
    match command {
        Command::Health => {
            let snapshot = backend
                .get_health()
                .await
                .map_err(|e| failed(e, "Failed to fetch health status"))?;
            for (label, value) in health_fields(&snapshot) {
                writeln!(out, "{label:<13}{value}")?;
            }
        }
        Command::Search { query, k } => {
            anyhow::ensure!(!query.trim().is_empty(), "query must not be empty");
            let results = backend
                .search(query, *k)
                .await
                .map_err(|e| failed(e, "Search failed"))?;
            if results.is_empty() {
                writeln!(out, "No results found")?;
            }
            for result in &results {
                for line in search_result_lines(result) {
                    writeln!(out, "{line}")?;
                }
                writeln!(out)?;
            }
        }
        Command::Ask { question, k } => {
            anyhow::ensure!(!question.trim().is_empty(), "question must not be empty");
            let answer = backend
                .rag_query(question, *k)
                .await
                .map_err(|e| failed(e, "RAG query failed"))?;
            writeln!(out, "Answer:")?;
            writeln!(out, "{}", answer.answer)?;
            writeln!(out)?;
            writeln!(out, "{}", rag_stats_line(&answer))?;
        }
        Command::Docs { kind, limit } => {
            let records = fetch_documents(backend, (*kind).into(), *limit)
                .await
                .map_err(|e| failed(e, "Failed to fetch documents"))?;
            if records.is_empty() {
                writeln!(out, "No documents found")?;
            }
            for record in &records {
                for line in document_lines(record) {
                    writeln!(out, "{line}")?;
                }
                writeln!(out)?;
            }
        }
        Command::ReloadIndex => {
            let outcome = backend
                .reload_index()
                .await
                .map_err(|e| failed(e, "Index reload failed"))?;
            writeln!(out, "Status: {}", outcome.status)?;
            writeln!(out, "Vectors: {}", outcome.vector_count)?;
            if !outcome.message.is_empty() {
                writeln!(out, "{}", outcome.message)?;
            }
        }
    }

    out.flush().context("failed to flush output")
}
