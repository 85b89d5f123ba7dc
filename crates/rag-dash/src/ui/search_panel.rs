//! Semantic search panel renderer.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::domain::SearchState;

use super::format::search_result_lines;
use super::layout::{error_line, panel_block};

pub fn render(frame: &mut Frame, area: Rect, search: &SearchState, focused: bool) {
    let mut lines = vec![
        input_line("Query", &search.query, focused),
        Line::from(vec![
            Span::styled("Results: ", Style::default().fg(Color::DarkGray)),
            Span::styled(search.k.to_string(), Style::default().fg(Color::Yellow)),
            Span::styled("  (1-20)", Style::default().fg(Color::DarkGray)),
        ]),
        submit_line("Search", "Searching...", search.loading),
        Line::raw(""),
    ];

    if let Some(error) = &search.error {
        lines.push(error_line(error));
    }

    for result in &search.results {
        // Header lines come first: URL when present, then the score.
        let mut header_styles = result
            .url
            .iter()
            .map(|_| Style::default().fg(Color::Blue))
            .chain(result.score.iter().map(|_| Style::default().fg(Color::Green)));
        for text in search_result_lines(result) {
            match header_styles.next() {
                Some(style) => lines.push(Line::styled(text, style)),
                None => lines.extend(text.lines().map(|l| Line::raw(l.to_string()))),
            }
        }
        lines.push(Line::raw(""));
    }

    if search.shows_empty_notice() {
        lines.push(Line::styled(
            "No results found",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(panel_block(" SEMANTIC SEARCH ", focused));
    frame.render_widget(paragraph, area);
}

/// `Label: value` with a cursor when focused.
pub(super) fn input_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let mut spans = vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::DarkGray)),
        Span::styled(value.to_string(), Style::default().fg(Color::White)),
    ];
    if focused {
        spans.push(Span::styled("▏", Style::default().fg(Color::Cyan)));
    }
    Line::from(spans)
}

/// Submit hint, replaced by a busy label while loading.
pub(super) fn submit_line(idle: &str, busy: &str, loading: bool) -> Line<'static> {
    if loading {
        Line::styled(busy.to_string(), Style::default().fg(Color::Yellow))
    } else {
        Line::from(vec![
            Span::styled("[Enter] ", Style::default().fg(Color::Yellow)),
            Span::raw(idle.to_string()),
        ])
    }
}
