//! Documents panel renderer.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::domain::{DocumentKind, DocumentsState};

use super::format::document_lines;
use super::layout::{error_line, panel_block};
use super::search_panel::submit_line;

pub fn render(frame: &mut Frame, area: Rect, documents: &DocumentsState, focused: bool) {
    let mut kind_spans = vec![Span::styled(
        "Document Type: ",
        Style::default().fg(Color::DarkGray),
    )];
    for kind in DocumentKind::ALL {
        let selected = kind == documents.kind;
        let marker = if selected { "(•) " } else { "( ) " };
        let style = if selected {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        kind_spans.push(Span::styled(format!("{marker}{}   ", kind.label()), style));
    }

    let mut lines = vec![
        Line::from(kind_spans),
        submit_line("Refresh Documents", "Refreshing...", documents.loading),
        Line::raw(""),
    ];

    if let Some(error) = &documents.error {
        lines.push(error_line(error));
    }

    for record in &documents.documents {
        for (idx, text) in document_lines(record).into_iter().enumerate() {
            let style = if idx == 0 && record.url().is_some() {
                Style::default().fg(Color::Blue)
            } else {
                Style::default()
            };
            lines.push(Line::styled(text, style));
        }
        lines.push(Line::raw(""));
    }

    if documents.shows_empty_notice() {
        lines.push(Line::styled(
            "No documents found",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let title = format!(" DOCUMENTS ({}) ", documents.kind);
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(panel_block(&title, focused));
    frame.render_widget(paragraph, area);
}
