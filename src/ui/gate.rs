//! Password screen shown before the catalog

use super::components::centered_rect;
use super::forms::{draw_field, FIELD_HEIGHT};
use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (borders + label)
const BUTTON_HEIGHT: u16 = 3;

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let panel = centered_rect(area, 48, 3 + FIELD_HEIGHT + 1 + BUTTON_HEIGHT + 4);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),             // Heading
            Constraint::Length(FIELD_HEIGHT),  // Password
            Constraint::Length(1),             // Spacer
            Constraint::Length(BUTTON_HEIGHT), // Unlock
        ])
        .split(inner);

    let heading = Paragraph::new(vec![
        Line::from(Span::styled(
            "🔒 Restricted Access",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Enter the access password to continue.",
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    frame.render_widget(heading, chunks[0]);

    draw_field(frame, chunks[1], &app.state.gate.input, true);

    let button_area = centered_rect(chunks[3], 16, BUTTON_HEIGHT);
    draw_unlock_button(frame, button_area, !app.state.gate.input.is_blank());
}

/// Unlock button; lights up once something has been typed
fn draw_unlock_button(frame: &mut Frame, area: Rect, ready: bool) {
    let (border, text) = if ready {
        (
            Style::default().fg(Color::Green),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::DarkGray),
        )
    };

    let button = Paragraph::new(Line::from(Span::styled("⏎ Unlock", text)))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(border));
    frame.render_widget(button, area);
}
