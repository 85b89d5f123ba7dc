//! Text formatting shared by the TUI panels and the one-shot CLI.

use rag_api::{HealthSnapshot, RagAnswer, SearchResult};

use crate::domain::DocumentRecord;

/// Characters of clean text shown per document.
pub const CLEAN_PREVIEW_CHARS: usize = 200;
/// Characters of raw HTML shown per document.
pub const RAW_PREVIEW_CHARS: usize = 150;

/// First `max` characters of `text`, with `...` when something was cut.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Similarity score with four decimals.
pub fn format_score(score: f64) -> String {
    format!("{score:.4}")
}

/// Timing and usage line under a RAG answer.
pub fn rag_stats_line(answer: &RagAnswer) -> String {
    format!(
        "Processed in {:.2}s using {} context chunks",
        answer.processing_time_seconds, answer.context_chunk_count
    )
}

pub fn index_label(loaded: bool) -> &'static str {
    if loaded {
        "Loaded"
    } else {
        "Not Loaded"
    }
}

/// Label/value pairs for a health snapshot.
pub fn health_fields(snapshot: &HealthSnapshot) -> [(&'static str, String); 5] {
    [
        ("Status", snapshot.status.as_str().to_string()),
        ("Vector Index", index_label(snapshot.vector_index_loaded).to_string()),
        ("Vectors", snapshot.vector_count.to_string()),
        ("Raw Docs", snapshot.raw_document_count.to_string()),
        ("Clean Docs", snapshot.clean_document_count.to_string()),
    ]
}

/// Display lines for one search hit: URL, score, text.
pub fn search_result_lines(result: &SearchResult) -> Vec<String> {
    let mut lines = Vec::with_capacity(3);
    if let Some(url) = &result.url {
        lines.push(format!("URL: {url}"));
    }
    if let Some(score) = result.score {
        lines.push(format!("Similarity Score: {}", format_score(score)));
    }
    lines.push(result.text.clone());
    lines
}

/// Truncated body of a document record.
pub fn document_preview(record: &DocumentRecord) -> Option<String> {
    match record {
        DocumentRecord::Clean { text, .. } if !text.is_empty() => {
            Some(truncate_chars(text, CLEAN_PREVIEW_CHARS))
        }
        DocumentRecord::Raw { html, .. } if !html.is_empty() => {
            Some(format!("HTML: {}", truncate_chars(html, RAW_PREVIEW_CHARS)))
        }
        _ => None,
    }
}

/// Display lines for one document: URL (if any) then preview (if any).
pub fn document_lines(record: &DocumentRecord) -> Vec<String> {
    let mut lines = Vec::with_capacity(2);
    if let Some(url) = record.url() {
        lines.push(format!("URL: {url}"));
    }
    if let Some(preview) = document_preview(record) {
        lines.push(preview);
    }
    lines
}
