//! Dialog components for TUI

mod base;
mod confirm_dialog;
mod error_dialog;
mod notice_dialog;

pub use base::{centered_rect, key_hint, wrap_text};
pub use confirm_dialog::render_reset_dialog;
pub use error_dialog::render_error_dialog;
pub use notice_dialog::render_submission_dialog;
