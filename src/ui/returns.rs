//! Return orders table and status popover

use super::components::render_popover;
use super::widgets::render_scrollable_table;
use crate::app::App;
use crate::state::{ActionMenu, ReturnColumn, ReturnDecision, ReturnsTable, Route};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};

/// Draw the return orders page
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let table = &app.state.returns;

    let block = Block::default()
        .title(format!(" {} ", Route::Returns.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    if table.rows.is_empty() {
        let message = if table.loaded {
            "No return requests."
        } else {
            "Loading return requests..."
        };
        let content = Paragraph::new(message).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(content, chunks[0]);
    } else {
        draw_table(frame, chunks[0], table);
    }

    draw_pagination(frame, chunks[1], table);

    if let Some(menu) = &table.action_menu {
        draw_action_menu(frame, menu);
    }
}

fn draw_table(frame: &mut Frame, area: Rect, table: &ReturnsTable) {
    let header_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let header = Row::new(
        ReturnColumn::ALL
            .iter()
            .map(|column| column.label())
            .chain(std::iter::once("Action")),
    )
    .style(header_style);

    let rows = table.rows.iter().map(|order| {
        let mut cells: Vec<String> = ReturnColumn::ALL
            .iter()
            .map(|column| order.cell(*column).render())
            .collect();
        cells.push(if order.state.is_actionable() {
            "Update".to_string()
        } else {
            String::new()
        });

        let style = if order.state.is_actionable() {
            Style::default()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Row::new(cells).style(style)
    });

    let widths = ReturnColumn::ALL
        .iter()
        .map(|column| Constraint::Min(column.min_width()))
        .chain(std::iter::once(Constraint::Length(8)));

    let widget = Table::new(rows, widths)
        .header(header)
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▸ ");

    render_scrollable_table(frame, area, widget, Some(table.selected_index));
}

fn draw_pagination(frame: &mut Frame, area: Rect, table: &ReturnsTable) {
    let first = table.page * table.rows_per_page;
    let range = if table.total_records == 0 {
        "0 of 0".to_string()
    } else {
        format!(
            "{}-{} of {}",
            first + 1,
            (first + table.rows.len()).min(table.total_records),
            table.total_records
        )
    };

    let line = Line::from(vec![
        Span::styled("Rows per page: ", Style::default().fg(Color::DarkGray)),
        Span::raw(table.rows_per_page.to_string()),
        Span::raw("  "),
        Span::raw(range),
        Span::styled(
            format!("  page {}/{}", table.page + 1, table.page_count()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_action_menu(frame: &mut Frame, menu: &ActionMenu) {
    let mut lines = vec![Line::from(Span::styled(
        format!("Order {}", menu.order_id),
        Style::default().fg(Color::DarkGray),
    ))];
    lines.push(Line::from(""));

    for (idx, decision) in ReturnDecision::ALL.iter().enumerate() {
        let radio = if menu.selected == Some(*decision) {
            "(•)"
        } else {
            "( )"
        };
        let style = if idx == menu.highlighted {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!("{radio} {}", decision.label()),
            style,
        )));
    }

    let key_style = Style::default().fg(Color::Cyan);
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Space", key_style),
        Span::raw(":select  "),
        Span::styled("Enter", key_style),
        Span::raw(":update  "),
        Span::styled("Esc", key_style),
        Span::raw(":cancel"),
    ]));

    render_popover(frame, "Update Status", Color::Cyan, Color::Cyan, lines, 50);
}
