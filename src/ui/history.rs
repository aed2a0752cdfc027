//! Locally stored requests and orders

use crate::app::App;
use crate::state::RequestRecord;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw both history lists side by side
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    draw_records(
        frame,
        chunks[0],
        " Product Requests ",
        app.storage.requests(),
        app.state.scroll_offset,
    );
    draw_records(
        frame,
        chunks[1],
        " Product Orders ",
        app.storage.orders(),
        app.state.scroll_offset,
    );
}

fn draw_records(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    records: &[RequestRecord],
    scroll_offset: usize,
) {
    let block = Block::default()
        .title(format!("{title}({}) ", records.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if records.is_empty() {
        let content = Paragraph::new("Nothing submitted yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(content, area);
        return;
    }

    // Newest first
    let mut lines = Vec::new();
    for record in records.iter().rev() {
        lines.extend(record_lines(record));
        lines.push(Line::from(""));
    }

    let content = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll_offset.min(u16::MAX as usize) as u16, 0))
        .block(block);
    frame.render_widget(content, area);
}

fn record_lines(record: &RequestRecord) -> Vec<Line<'_>> {
    let label = Style::default().fg(Color::DarkGray);
    vec![
        Line::from(vec![
            Span::styled(
                record.id.as_str(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", record.created_at.format("%Y-%m-%d %H:%M")),
                label,
            ),
        ]),
        Line::from(vec![
            Span::styled("Product:  ", label),
            Span::raw(record.product.as_str()),
        ]),
        Line::from(vec![
            Span::styled("Name:     ", label),
            Span::raw(record.customer_name.as_str()),
        ]),
        Line::from(vec![
            Span::styled("Contact:  ", label),
            Span::raw(record.contact_info.as_str()),
        ]),
        Line::from(vec![
            Span::styled("Quantity: ", label),
            Span::raw(record.quantity_label()),
        ]),
    ]
}
