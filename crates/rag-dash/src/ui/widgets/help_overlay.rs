//! Help overlay widget.

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const NAVIGATION: &[(&str, &str)] = &[
    ("Tab", "Focus next panel"),
    ("Shift+Tab", "Focus previous panel"),
    ("F1", "Toggle this help"),
    ("Esc", "Quit"),
];

const EDITING: &[(&str, &str)] = &[
    ("Type", "Edit query / question"),
    ("Backspace", "Delete last character"),
    ("Enter", "Submit, or refresh documents"),
    ("↑/↓", "Adjust result / context count"),
    ("←/→ c r", "Switch document type"),
];

const BACKEND: &[(&str, &str)] = &[
    ("F5", "Refresh health now"),
    ("F9", "Reload vector index"),
];

/// Render a centered help overlay.
pub fn render_help_overlay(frame: &mut Frame) {
    let popup_area = centered_rect(60, 70, frame.area());
    frame.render_widget(Clear, popup_area);

    let mut help_text = vec![
        Line::styled(
            "RAG-DASH HELP",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
    ];
    for (heading, keys) in [
        ("Navigation", NAVIGATION),
        ("Editing", EDITING),
        ("Backend", BACKEND),
    ] {
        help_text.push(Line::styled(
            heading,
            Style::default().add_modifier(Modifier::BOLD),
        ));
        help_text.extend(keys.iter().map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("  {key:<11}"), Style::default().fg(Color::Yellow)),
                Span::raw(*action),
            ])
        }));
        help_text.push(Line::raw(""));
    }
    help_text.push(Line::styled(
        "Press any key to close",
        Style::default().fg(Color::DarkGray),
    ));

    let paragraph = Paragraph::new(help_text).block(
        Block::default()
            .title(" Help ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(paragraph, popup_area);
}

/// Create a centered rectangle.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);

    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}
