//! Layout components (sidebar, status bar)

use super::components::{render_button, BUTTON_HEIGHT};
use crate::app::App;
use crate::platform::{COPY_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::Route;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Pages shown in the sidebar
const SIDEBAR_ITEMS: &[&str] = &["Listings", "Invite", "Returns"];

/// Create the main layout with sidebar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    // Reserve bottom line for status bar
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(14), // Sidebar
            Constraint::Min(0),     // Main content
        ])
        .split(rows[0]);

    (chunks[0], chunks[1])
}

/// Draw the sidebar with boxed page buttons
pub fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(BUTTON_HEIGHT), // Listings
            Constraint::Length(BUTTON_HEIGHT), // Invite
            Constraint::Length(BUTTON_HEIGHT), // Returns
            Constraint::Min(0),
        ])
        .split(area);

    let route = app.state.current_route();
    for (idx, label) in SIDEBAR_ITEMS.iter().enumerate() {
        let is_selected = match idx {
            0 => matches!(route, Route::UserListings(_)),
            1 => route == Route::InviteProvider,
            2 => route == Route::Returns,
            _ => false,
        };
        render_button(frame, chunks[idx], label, is_selected, true);
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let route = app.state.current_route();
    let mut spans = vec![Span::styled(
        format!(" {} ", route.path()),
        Style::default().fg(Color::Blue),
    )];

    // Route-specific hints
    spans.push(Span::styled(
        get_route_hints(route),
        Style::default().fg(Color::Gray),
    ));

    // Latest success notice
    if let Some(msg) = app.state.notices.status() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let quit_hint = " ^C:quit ";

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    // Render quit hint on the right
    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: quit_hint.len() as u16,
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current route
fn get_route_hints(route: Route) -> String {
    match route {
        Route::UserListings(_) => "t:tab  i:invite provider  o:returns  q:quit".to_string(),
        Route::InviteProvider => format!("Tab:next  {SUBMIT_SHORTCUT}:continue  Esc:back"),
        Route::Returns => format!(
            "j/k:nav  n/p:page  r:rows  Enter:status  {COPY_SHORTCUT}:copy id  R:reload  Esc:back"
        ),
    }
}
