//! Layout components (header, status bar)

use crate::app::App;
use crate::state::{CatalogFocus, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into header, content and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Draw the header with the view tabs
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        " Storefront ",
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];

    if app.state.current_view != View::Gate {
        for (view, label) in [(View::Catalog, "Catalog"), (View::History, "History")] {
            let style = if app.state.current_view == view {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::raw("  "));
            spans.push(Span::styled(label, style));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
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

    let mut spans = vec![];

    // Webhook reachability from the startup probe
    let conn_status = match app.state.webhook_reachable {
        Some(true) => Span::styled(" ● ", Style::default().fg(Color::Green)),
        Some(false) => Span::styled(" ○ ", Style::default().fg(Color::Red)),
        None => Span::styled(" ? ", Style::default().fg(Color::Gray)),
    };
    spans.push(conn_status);

    spans.push(Span::styled(
        get_view_hints(app),
        Style::default().fg(Color::Gray),
    ));

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(app: &App) -> &'static str {
    match app.state.current_view {
        View::Gate => "Enter:unlock  Esc:clear",
        View::Catalog => match app.state.catalog_focus {
            CatalogFocus::Search => {
                "type:search  ↓/Enter:list  Tab:list  ^N:request item  ^R:reset"
            }
            CatalogFocus::List => {
                "j/k:nav  Enter:order  n:request item  h:history  /:search  r:reset"
            }
        },
        View::History => "j/k:scroll  Esc:back  r:reset",
    }
}
