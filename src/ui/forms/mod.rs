//! Form rendering

mod field_renderer;
mod prompt_dialog;

pub use field_renderer::{draw_field, FIELD_HEIGHT};
pub use prompt_dialog::draw_prompt_dialog;
