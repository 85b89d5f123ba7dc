//! System health strip.
//!
//! With no snapshot yet, only a loading or error line is drawn; numbers are
//! never invented.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use rag_api::HealthStatus;

use crate::domain::{HealthState, HealthView};

use super::format::health_fields;
use super::layout::{error_line, panel_block};

pub fn render(frame: &mut Frame, area: Rect, health: &HealthState) {
    let mut lines = Vec::new();

    match health.view() {
        HealthView::Loading => {
            lines.push(Line::styled(
                "Loading health status...",
                Style::default().fg(Color::DarkGray),
            ));
        }
        HealthView::Unavailable { error } => lines.push(error_line(error)),
        HealthView::Available { snapshot, error } => {
            if let Some(error) = error {
                lines.push(error_line(error));
            }

            let status_color = match snapshot.status {
                HealthStatus::Healthy => Color::Green,
                HealthStatus::Unhealthy | HealthStatus::Unknown => Color::Red,
            };

            let mut spans = Vec::new();
            for (idx, (label, value)) in health_fields(snapshot).into_iter().enumerate() {
                let value_style = if idx == 0 {
                    Style::default().fg(status_color).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
                };
                spans.push(Span::styled(
                    format!("{label}: "),
                    Style::default().fg(Color::DarkGray),
                ));
                spans.push(Span::styled(value, value_style));
                spans.push(Span::raw("   "));
            }
            lines.push(Line::from(spans));
        }
    }

    if health.reloading {
        lines.push(Line::styled(
            "Reloading index...",
            Style::default().fg(Color::Yellow),
        ));
    } else if let Some(notice) = &health.notice {
        lines.push(Line::styled(notice.clone(), Style::default().fg(Color::Yellow)));
    }

    let title = if health.loading {
        " SYSTEM HEALTH ⟳ "
    } else {
        " SYSTEM HEALTH "
    };
    let paragraph = Paragraph::new(lines).block(panel_block(title, false));
    frame.render_widget(paragraph, area);
}
