//! Error dialog component

use super::base::{key_hint, render_dialog, DialogConfig};
use ratatui::{style::Color, Frame};

/// Render an error dialog overlay centered on the screen
pub fn render_error_dialog(frame: &mut Frame, error_message: &str) {
    render_dialog(
        frame,
        DialogConfig {
            title: "Alert",
            title_color: Color::Red,
            border_color: Color::Red,
            message: error_message,
            hint: Some(key_hint(&[("Enter", "dismiss"), ("Esc", "dismiss")])),
            max_width: 60,
        },
    );
}
