//! UI module for rendering the TUI

mod catalog;
mod components;
mod forms;
mod gate;
mod history;
mod layout;

use crate::app::App;
use crate::state::View;
use ratatui::{
    layout::Rect,
    widgets::{List, ListState},
    Frame,
};

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (header_area, main_area) = layout::create_layout(frame.area());

    layout::draw_header(frame, header_area, app);

    match app.state.current_view {
        View::Gate => gate::draw(frame, main_area, app),
        View::Catalog => catalog::draw(frame, main_area, app),
        View::History => history::draw(frame, main_area, app),
    }

    layout::draw_status_bar(frame, app);

    // Overlays, later ones on top
    if let Some(workflow) = &app.state.workflow {
        forms::draw_prompt_dialog(frame, workflow);
    }
    if let Some(record) = &app.state.pending_confirmation {
        components::render_submission_dialog(frame, record, app.messaging_link());
    }
    if let Some(pending) = &app.state.pending_reset {
        components::render_reset_dialog(frame, pending);
    }
    if let Some(error) = app.state.current_error() {
        components::render_error_dialog(frame, error);
    }
}

/// Render a list that scrolls to keep the selected item in view
fn render_scrollable_list(frame: &mut Frame, area: Rect, list: List, selected_index: usize) {
    let mut list_state = ListState::default().with_selected(Some(selected_index));
    frame.render_stateful_widget(list, area, &mut list_state);
}
