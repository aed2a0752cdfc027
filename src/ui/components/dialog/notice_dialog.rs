//! Submission confirmation dialog

use super::base::{key_hint, render_dialog, DialogConfig};
use crate::platform::COPY_SHORTCUT;
use crate::state::RequestRecord;
use ratatui::{style::Color, Frame};

/// Render the summary shown after a request or order was sent
pub fn render_submission_dialog(frame: &mut Frame, record: &RequestRecord, link: &str) {
    let title = record.confirmation_title();
    let message = format!("{}\n\n{link}", record.confirmation_message());

    render_dialog(
        frame,
        DialogConfig {
            title: &title,
            title_color: Color::Green,
            border_color: Color::Green,
            message: &message,
            hint: Some(key_hint(&[("Enter", "open link"), (COPY_SHORTCUT, "copy ID")])),
            max_width: 64,
        },
    );
}
