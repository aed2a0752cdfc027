//! Confirmation dialog for clearing local data

use super::base::centered_rect;
use crate::state::PendingReset;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render the "clear all" confirmation
pub fn render_reset_dialog(frame: &mut Frame, pending: &PendingReset) {
    let dialog_area = centered_rect(frame.area(), 52, 11);

    // Clear the area behind the dialog
    frame.render_widget(Clear, dialog_area);

    let mut content = vec![
        Line::from(Span::styled(
            "Clear All Local Data",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Delete every stored request and order,",
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            "sign out and return to the password screen?",
            Style::default().fg(Color::White),
        )),
        Line::from(""),
    ];

    // Add options with selection highlighting
    let options = [false, true]; // Cancel, Clear
    let labels = ["Cancel", "Clear all"];
    let colors = [Color::White, Color::Red];

    for (i, (&is_clear, &label)) in options.iter().zip(labels.iter()).enumerate() {
        let is_selected = pending.selected_option == is_clear;
        let prefix = if is_selected { "▸ " } else { "  " };
        let style = if is_selected {
            Style::default().fg(colors[i]).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        content.push(Line::from(Span::styled(format!("{prefix}{label}"), style)));
    }

    content.push(Line::from(""));
    content.push(Line::from(vec![
        Span::styled("↑↓", Style::default().fg(Color::Cyan)),
        Span::styled(" select  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Enter", Style::default().fg(Color::Cyan)),
        Span::styled(" confirm  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Cyan)),
        Span::styled(" cancel", Style::default().fg(Color::DarkGray)),
    ]));

    let dialog = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::new().bg(Color::Black).fg(Color::White));

    frame.render_widget(dialog, dialog_area);
}
