//! Step-by-step prompt for requests and orders

use super::field_renderer::{draw_field, FIELD_HEIGHT};
use crate::state::RequestWorkflow;
use crate::ui::components::{centered_rect, key_hint, wrap_text};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const DIALOG_WIDTH: u16 = 64;

/// Draw the prompt for the workflow's current field
pub fn draw_prompt_dialog(frame: &mut Frame, workflow: &RequestWorkflow) {
    let text_width = (DIALOG_WIDTH - 4) as usize;
    let question = wrap_text(&workflow.prompt_text(), text_width);
    let (step, total) = workflow.progress();

    // title + blank + question, field, spacer + hint, margin, borders
    let height = 2 + question.len() as u16 + FIELD_HEIGHT + 2 + 2 + 2;
    let dialog_area = centered_rect(frame.area(), DIALOG_WIDTH, height);

    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" Step {step}/{total} "))
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2 + question.len() as u16), // Title + question
            Constraint::Length(FIELD_HEIGHT),              // Input
            Constraint::Length(1),                         // Spacer
            Constraint::Length(1),                         // Hint
        ])
        .split(inner);

    let mut lines = vec![
        Line::from(Span::styled(
            workflow.title(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(question.into_iter().map(Line::from));
    frame.render_widget(Paragraph::new(lines), chunks[0]);

    draw_field(frame, chunks[1], &workflow.input, true);

    let hint = Paragraph::new(Line::from(key_hint(&[("Enter", "OK"), ("Esc", "cancel")])));
    frame.render_widget(hint, chunks[3]);
}
