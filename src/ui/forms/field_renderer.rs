//! Field rendering utilities for forms

use crate::state::onboarding::FieldDescriptor;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by one field: bordered input plus the error line
pub const FIELD_HEIGHT: u16 = 4;

/// Draw a wizard input with its inline error message
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FieldDescriptor,
    value: &str,
    error: Option<&str>,
    is_active: bool,
) {
    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else if error.is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let cursor = if is_active { "▌" } else { "" };

    let value_span = if value.is_empty() {
        Span::styled(
            field.placeholder.unwrap_or_default(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )
    } else {
        Span::raw(value)
    };

    let mut spans = vec![];
    if is_active && value.is_empty() {
        spans.push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
        spans.push(value_span);
    } else {
        spans.push(value_span);
        spans.push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
    }

    let mut title = format!(" {} ", field.display_label());
    if let Some(tag) = field.kind.tag() {
        title.push_str(&format!("({tag}) "));
    }

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let input_area = Rect {
        height: area.height.min(3),
        ..area
    };
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), input_area);

    if let Some(message) = error {
        if area.height > 3 {
            let error_area = Rect {
                x: area.x + 1,
                y: area.y + 3,
                width: area.width.saturating_sub(1),
                height: 1,
            };
            let error_line = Paragraph::new(Span::styled(message, Style::default().fg(Color::Red)));
            frame.render_widget(error_line, error_area);
        }
    }
}

/// Draw help text at the bottom of a form
pub fn draw_help_text(frame: &mut Frame, area: Rect, text: &str) {
    let help = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}
