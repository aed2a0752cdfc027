//! Application state definitions

use super::catalog::{self, Product};
use super::forms::RequestWorkflow;
use super::gate::AccessGate;
use super::records::RequestRecord;
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Password screen
    #[default]
    Gate,
    /// Product list with search bar
    Catalog,
    /// Locally stored requests and orders
    History,
}

/// Which part of the catalog view receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogFocus {
    #[default]
    Search,
    List,
}

impl CatalogFocus {
    pub fn toggle(&mut self) {
        *self = match self {
            Self::Search => Self::List,
            Self::List => Self::Search,
        };
    }
}

/// Pending "clear all" confirmation
#[derive(Debug, Clone, Default)]
pub struct PendingReset {
    /// false = Cancel, true = Clear
    pub selected_option: bool,
}

/// Main application state
pub struct AppState {
    // Navigation
    pub current_view: View,

    // Gate
    pub gate: AccessGate,

    // Catalog
    pub products: Vec<Product>,
    pub search_query: String,
    pub visible_products: Vec<usize>,
    pub catalog_focus: CatalogFocus,

    // Selection
    pub selected_index: usize,
    pub scroll_offset: usize,

    // Modals
    pub workflow: Option<RequestWorkflow>,
    pub pending_confirmation: Option<RequestRecord>,
    pub pending_reset: Option<PendingReset>,
    error_queue: VecDeque<String>,

    // Status
    pub webhook_reachable: Option<bool>,
}

impl AppState {
    pub fn new(access_password: &str, products: Vec<Product>) -> Self {
        let visible_products = catalog::visible_indices(&products, "");
        Self {
            current_view: View::Gate,
            gate: AccessGate::new(access_password),
            products,
            search_query: String::new(),
            visible_products,
            catalog_focus: CatalogFocus::default(),
            selected_index: 0,
            scroll_offset: 0,
            workflow: None,
            pending_confirmation: None,
            pending_reset: None,
            error_queue: VecDeque::new(),
            webhook_reachable: None,
        }
    }

    /// Re-initialise the view as a fresh page load would
    pub fn reload(&mut self, authenticated: bool) {
        self.current_view = if authenticated {
            View::Catalog
        } else {
            View::Gate
        };
        self.gate.input.clear();
        self.search_query.clear();
        self.catalog_focus = CatalogFocus::default();
        self.workflow = None;
        self.pending_confirmation = None;
        self.pending_reset = None;
        self.reset_selection();
        self.refilter();
    }

    /// True while a dialog owns the keyboard
    pub fn has_modal(&self) -> bool {
        self.has_errors()
            || self.workflow.is_some()
            || self.pending_confirmation.is_some()
            || self.pending_reset.is_some()
    }

    // Search

    pub fn push_search_char(&mut self, c: char) {
        self.search_query.push(c);
        self.refilter();
    }

    pub fn pop_search_char(&mut self) {
        self.search_query.pop();
        self.refilter();
    }

    pub fn clear_search(&mut self) {
        self.search_query.clear();
        self.refilter();
    }

    /// Recompute product visibility for the current query
    pub fn refilter(&mut self) {
        self.visible_products = catalog::visible_indices(&self.products, &self.search_query);
        if self.selected_index >= self.visible_products.len() {
            self.selected_index = self.visible_products.len().saturating_sub(1);
        }
    }

    pub fn show_no_results(&self) -> bool {
        catalog::show_no_results(self.visible_products.len(), &self.search_query)
    }

    /// Products currently visible, in catalog order
    pub fn visible(&self) -> impl Iterator<Item = &Product> {
        self.visible_products
            .iter()
            .filter_map(|&idx| self.products.get(idx))
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.visible_products
            .get(self.selected_index)
            .and_then(|&idx| self.products.get(idx))
    }

    // Selection

    /// Move selection down
    pub fn move_selection_down(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Reset selection
    pub fn reset_selection(&mut self) {
        self.selected_index = 0;
        self.scroll_offset = 0;
    }

    /// Scroll down, never past `max_offset`
    pub fn scroll_down(&mut self, max_offset: usize) {
        self.scroll_offset = (self.scroll_offset + 1).min(max_offset);
    }

    /// Scroll up
    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    // Errors

    /// Queue a message for the error dialog
    pub fn push_error(&mut self, message: String) {
        self.error_queue.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    /// Message currently shown in the error dialog
    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::builtin_catalog;

    fn state() -> AppState {
        AppState::new("P3pt!X9r", builtin_catalog())
    }

    #[test]
    fn test_starts_at_gate_with_everything_visible() {
        let state = state();
        assert_eq!(state.current_view, View::Gate);
        assert_eq!(state.visible_products.len(), state.products.len());
        assert!(!state.has_modal());
    }

    #[test]
    fn test_reload_skips_gate_when_authenticated() {
        let mut state = state();
        state.reload(true);
        assert_eq!(state.current_view, View::Catalog);
        state.reload(false);
        assert_eq!(state.current_view, View::Gate);
    }

    #[test]
    fn test_typing_filters_on_every_keystroke() {
        let mut state = state();
        state.push_search_char('t');
        let after_t = state.visible_products.len();
        state.push_search_char('b');
        state.push_search_char('-');
        assert!(state.visible_products.len() <= after_t);
        assert!(state.visible().all(|p| p.matches("tb-")));

        state.clear_search();
        assert_eq!(state.visible_products.len(), state.products.len());
    }

    #[test]
    fn test_no_results_indicator() {
        let mut state = state();
        for c in "zzz".chars() {
            state.push_search_char(c);
        }
        assert!(state.show_no_results());
        assert!(state.selected_product().is_none());

        state.pop_search_char();
        state.pop_search_char();
        state.pop_search_char();
        assert!(!state.show_no_results());
    }

    #[test]
    fn test_selection_is_clamped_after_filtering() {
        let mut state = state();
        let last = state.products.len() - 1;
        state.selected_index = last;
        for c in "semaglutide".chars() {
            state.push_search_char(c);
        }
        assert_eq!(state.selected_index, 0);
        assert_eq!(
            state.selected_product().map(|p| p.name.as_str()),
            Some("Semaglutide 5mg")
        );
    }

    #[test]
    fn test_move_selection_stays_in_bounds() {
        let mut state = state();
        state.move_selection_up();
        assert_eq!(state.selected_index, 0);
        for _ in 0..100 {
            state.move_selection_down(state.visible_products.len());
        }
        assert_eq!(state.selected_index, state.visible_products.len() - 1);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut state = state();
        for _ in 0..10 {
            state.scroll_down(3);
        }
        assert_eq!(state.scroll_offset, 3);
        state.scroll_up();
        assert_eq!(state.scroll_offset, 2);
        state.scroll_down(0);
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn test_error_queue_is_fifo() {
        let mut state = state();
        state.push_error("first".to_string());
        state.push_error("second".to_string());
        assert!(state.has_modal());
        assert_eq!(state.current_error(), Some("first"));
        state.dismiss_error();
        assert_eq!(state.current_error(), Some("second"));
        state.dismiss_error();
        assert!(!state.has_errors());
    }

    #[test]
    fn test_catalog_focus_toggle() {
        let mut focus = CatalogFocus::default();
        focus.toggle();
        assert_eq!(focus, CatalogFocus::List);
        focus.toggle();
        assert_eq!(focus, CatalogFocus::Search);
    }
}
