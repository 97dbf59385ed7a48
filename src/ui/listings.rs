//! User listings landing page

use crate::app::App;
use crate::state::ListingView;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};

/// Draw the listings page for the given tab
pub fn draw(frame: &mut Frame, area: Rect, app: &App, view: ListingView) {
    let block = Block::default()
        .title(format!(" {} ", app.state.current_route().title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let selected = match view {
        ListingView::Users => 0,
        ListingView::Providers => 1,
    };
    let tabs = Tabs::new([ListingView::Users.label(), ListingView::Providers.label()])
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider(" | ");
    frame.render_widget(tabs, chunks[0]);

    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Cyan));
    let mut lines = match view {
        ListingView::Users => vec![Line::from("Seller users and administrators.")],
        ListingView::Providers => vec![
            Line::from("Providers onboarded to the marketplace."),
            Line::from(""),
            Line::from(vec![
                Span::raw("Press "),
                key("i"),
                Span::raw(" to invite a new provider."),
            ]),
        ],
    };
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("Press "),
        key("o"),
        Span::raw(" to review return requests."),
    ]));

    if let Some(status) = app.state.notices.status() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            status,
            Style::default().fg(Color::Green),
        )));
    }

    let content = Paragraph::new(lines)
        .style(Style::default().fg(Color::Gray))
        .wrap(Wrap { trim: false });
    frame.render_widget(content, chunks[1]);
}
