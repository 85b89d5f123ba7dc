//! Main layout orchestration.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  RAG-DASH v0.1.0          Last refresh: 12:00:00     [F1]Help   │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  SYSTEM HEALTH  Status · Vector Index · Vectors · Raw · Clean   │
//! ├────────────────────────────────┬────────────────────────────────┤
//! │  SEMANTIC SEARCH               │  RAG QUERY                     │
//! ├────────────────────────────────┴────────────────────────────────┤
//! │  DOCUMENTS                                                      │
//! └─────────────────────────────────────────────────────────────────┘
//! │  [Tab] Focus  [Enter] Submit  [↑↓] k  [F5] Health  [Esc] Quit   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::{AppState, DashboardView, Focus};

use super::{documents_panel, health_panel, rag_panel, search_panel, widgets};

/// Render the entire UI.
pub fn render(frame: &mut Frame, view: &DashboardView) {
    let size = frame.area();

    // Main vertical layout: header, health, forms, documents, footer
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),      // Header
            Constraint::Length(5),      // Health
            Constraint::Min(10),        // Search + RAG
            Constraint::Percentage(35), // Documents
            Constraint::Length(3),      // Footer (keybinds)
        ])
        .split(size);

    render_header(frame, main_chunks[0], view);
    health_panel::render(frame, main_chunks[1], &view.health);
    render_forms(frame, main_chunks[2], view);
    documents_panel::render(
        frame,
        main_chunks[3],
        &view.documents,
        view.focus == Focus::Documents,
    );
    render_footer(frame, main_chunks[4]);

    if view.state == AppState::Help {
        widgets::render_help_overlay(frame);
    }
}

/// Render the header bar.
fn render_header(frame: &mut Frame, area: Rect, view: &DashboardView) {
    let title = vec![
        Span::styled(
            " RAG-DASH ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            concat!("v", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    let status = match view.health.last_refresh {
        Some(time) => Span::styled(
            format!(" Last refresh: {} ", time.format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        ),
        None => Span::styled(" No data ", Style::default().fg(Color::DarkGray)),
    };

    let hints = vec![
        Span::styled("[F5]", Style::default().fg(Color::Yellow)),
        Span::raw("Health "),
        Span::styled("[F1]", Style::default().fg(Color::Yellow)),
        Span::raw("Help "),
    ];

    // Right-align the hints
    let title_len: usize = title.iter().map(|s| s.content.chars().count()).sum();
    let status_len = status.content.chars().count();
    let hints_len: usize = hints.iter().map(|s| s.content.chars().count()).sum();
    let padding = area
        .width
        .saturating_sub(2)
        .saturating_sub((title_len + status_len + hints_len) as u16);

    let mut spans = title;
    spans.push(status);
    spans.push(Span::raw(" ".repeat(padding as usize)));
    spans.extend(hints);

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(header, area);
}

/// Search and RAG side by side.
fn render_forms(frame: &mut Frame, area: Rect, view: &DashboardView) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    search_panel::render(frame, chunks[0], &view.search, view.focus == Focus::Search);
    rag_panel::render(frame, chunks[1], &view.rag, view.focus == Focus::Rag);
}

/// Render the footer with keyboard shortcuts.
fn render_footer(frame: &mut Frame, area: Rect) {
    let keybinds = vec![
        Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
        Span::raw(" Focus  "),
        Span::styled("[Enter]", Style::default().fg(Color::Yellow)),
        Span::raw(" Submit/Refresh  "),
        Span::styled("[↑↓]", Style::default().fg(Color::Yellow)),
        Span::raw(" k  "),
        Span::styled("[←→]", Style::default().fg(Color::Yellow)),
        Span::raw(" Doc Type  "),
        Span::styled("[F9]", Style::default().fg(Color::Yellow)),
        Span::raw(" Reload Index  "),
        Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
        Span::raw(" Quit  "),
    ];

    let footer = Paragraph::new(Line::from(keybinds))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .centered();

    frame.render_widget(footer, area);
}

/// Bordered block shared by the panels; cyan border marks focus.
pub(super) fn panel_block(title: &str, focused: bool) -> Block<'_> {
    let border = if focused { Color::Cyan } else { Color::DarkGray };
    Block::default()
        .title(title)
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
}

/// Red error line.
pub(super) fn error_line(message: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("⚠ {message}"),
        Style::default().fg(Color::Red),
    ))
}
