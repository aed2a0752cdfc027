//! Reusable UI components

mod dialog;

pub use dialog::{
    centered_rect, key_hint, render_error_dialog, render_reset_dialog, render_submission_dialog,
    wrap_text,
};
