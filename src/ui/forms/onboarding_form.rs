//! Invite provider wizard form

use super::field_renderer::{draw_field, draw_help_text, FIELD_HEIGHT};
use crate::app::App;
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::onboarding::{descriptor, OnboardingWizard, Step};
use crate::state::{FormButton, Route};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::ops::Range;

/// Draw the invite provider form
pub fn draw_invite_provider(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(format!(" {} ", Route::InviteProvider.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(wizard) = app.wizard.as_ref() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2),             // Step indicator
            Constraint::Length(2),             // Heading + error summary
            Constraint::Min(FIELD_HEIGHT),     // Fields
            Constraint::Length(BUTTON_HEIGHT), // Buttons
            Constraint::Length(1),             // Help
        ])
        .split(inner);

    draw_step_indicator(frame, chunks[0], wizard.step());
    draw_heading(frame, chunks[1], wizard);
    draw_fields(frame, chunks[2], wizard, app.state.active_form_field);
    draw_buttons(frame, chunks[3], app, wizard);

    let help = format!(
        "Tab/↑↓:field  ←→:button  Enter:press  {SUBMIT_SHORTCUT}:{}  Esc:back",
        wizard.step().continue_label().to_lowercase()
    );
    draw_help_text(frame, chunks[4], &help);
}

fn draw_step_indicator(frame: &mut Frame, area: Rect, current: Step) {
    let mut spans = vec![];
    for step in Step::ALL {
        if step != Step::FIRST {
            spans.push(Span::styled(" ── ", Style::default().fg(Color::DarkGray)));
        }
        let style = if step == current {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else if step < current {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let marker = if step < current { "✓" } else { "●" };
        spans.push(Span::styled(
            format!("{marker} {}", step.heading()),
            style,
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_heading(frame: &mut Frame, area: Rect, wizard: &OnboardingWizard) {
    let step = wizard.step();
    let mut lines = vec![Line::from(vec![
        Span::styled(
            step.heading(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  (step {} of {})", step.number(), Step::ALL.len()),
            Style::default().fg(Color::DarkGray),
        ),
    ])];

    let failing: Vec<&str> = wizard
        .errors()
        .failing()
        .into_iter()
        .filter(|id| step.owns(*id))
        .filter_map(descriptor)
        .map(|field| field.label)
        .collect();
    if wizard.submission_attempted() && !failing.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Check: {}", failing.join(", ")),
            Style::default().fg(Color::Red),
        )));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_fields(frame: &mut Frame, area: Rect, wizard: &OnboardingWizard, active: usize) {
    let fields = wizard.step().fields();
    let capacity = (area.height / FIELD_HEIGHT).max(1) as usize;
    let range = visible_range(fields.len(), active, capacity);

    for (slot, index) in range.enumerate() {
        let field = &fields[index];
        let field_area = Rect {
            x: area.x,
            y: area.y + slot as u16 * FIELD_HEIGHT,
            width: area.width,
            height: FIELD_HEIGHT,
        };
        draw_field(
            frame,
            field_area,
            field,
            wizard.values().value(field.id),
            wizard.errors().message(field.id),
            index == active,
        );
    }
}

fn draw_buttons(frame: &mut Frame, area: Rect, app: &App, wizard: &OnboardingWizard) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(16),
            Constraint::Min(0),
        ])
        .split(area);

    let fields = wizard.step().fields().len();
    let on_buttons = app.state.on_button_row(fields);
    let selected = app.state.form_selected_button;
    let enabled = !wizard.is_submitting();

    render_button(
        frame,
        chunks[0],
        "Back",
        on_buttons && selected == FormButton::Back,
        enabled,
    );

    let label = if wizard.is_submitting() {
        "Sending..."
    } else {
        wizard.step().continue_label()
    };
    render_button(
        frame,
        chunks[2],
        label,
        on_buttons && selected == FormButton::Continue,
        enabled,
    );
}

/// Window of field indices that fits `capacity` rows and includes `active`
fn visible_range(count: usize, active: usize, capacity: usize) -> Range<usize> {
    if count <= capacity {
        return 0..count;
    }
    let active = active.min(count - 1);
    let start = active.saturating_sub(capacity - 1);
    start..start + capacity
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_range_fits_everything() {
        assert_eq!(visible_range(3, 0, 5), 0..3);
        assert_eq!(visible_range(3, 3, 5), 0..3);
    }

    #[test]
    fn test_visible_range_scrolls_to_active() {
        assert_eq!(visible_range(7, 0, 3), 0..3);
        assert_eq!(visible_range(7, 2, 3), 0..3);
        assert_eq!(visible_range(7, 4, 3), 2..5);
        assert_eq!(visible_range(7, 6, 3), 4..7);
    }

    #[test]
    fn test_visible_range_on_button_row_shows_last_fields() {
        // The button row index is one past the last field
        assert_eq!(visible_range(7, 7, 3), 4..7);
    }
}
