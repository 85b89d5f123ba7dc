//! RAG query panel renderer.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::domain::RagState;

use super::format::rag_stats_line;
use super::layout::{error_line, panel_block};
use super::search_panel::{input_line, submit_line};

pub fn render(frame: &mut Frame, area: Rect, rag: &RagState, focused: bool) {
    let mut lines = vec![
        input_line("Question", &rag.question, focused),
        Line::from(vec![
            Span::styled("Context Chunks: ", Style::default().fg(Color::DarkGray)),
            Span::styled(rag.k.to_string(), Style::default().fg(Color::Yellow)),
            Span::styled("  (1-10)", Style::default().fg(Color::DarkGray)),
        ]),
        submit_line("Ask Question", "Processing...", rag.loading),
        Line::raw(""),
    ];

    if let Some(error) = &rag.error {
        lines.push(error_line(error));
    }

    if let Some(answer) = &rag.answer {
        lines.push(Line::styled(
            "Answer:",
            Style::default().add_modifier(Modifier::BOLD),
        ));
        lines.extend(answer.answer.lines().map(|l| Line::raw(l.to_string())));
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            rag_stats_line(answer),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(panel_block(" RAG QUERY ", focused));
    frame.render_widget(paragraph, area);
}
