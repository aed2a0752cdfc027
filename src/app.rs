//! Application state and core logic

use crate::config::StoreConfig;
use crate::platform::{LinkOpener, SystemOpener};
use crate::state::{
    AppState, CatalogFocus, GateOutcome, PendingReset, Product, RequestDraft, RequestRecord,
    RequestWorkflow, View, WorkflowStep, ACCESS_DENIED_MESSAGE,
};
use crate::storage::{LocalStorage, SessionStorage};
use crate::webhook::{self, WebhookClient, WebhookSubmitter};
use anyhow::Result;
use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Rows one history entry takes: id line, four fields, blank separator
pub const HISTORY_RECORD_LINES: usize = 6;

/// Furthest scroll offset that still shows the last history entry
fn history_max_scroll(records: usize) -> usize {
    records.saturating_sub(1) * HISTORY_RECORD_LINES
}

/// Main application struct
pub struct App {
    /// Current view state
    pub state: AppState,
    /// Session-scoped flags (authenticated)
    pub session: SessionStorage,
    /// Persistent request/order history
    pub storage: LocalStorage,
    config: StoreConfig,
    webhook: Arc<dyn WebhookSubmitter>,
    opener: Box<dyn LinkOpener>,
    /// Whether the app should quit
    quit: bool,
    /// Status bar feedback message
    pub status_message: Option<String>,
    /// Webhook submissions that may still be in flight
    submissions: Vec<JoinHandle<bool>>,
    /// Result of the startup liveness probe
    liveness: Option<oneshot::Receiver<bool>>,
}

impl App {
    /// Create a new App instance from configuration
    pub fn new(config: StoreConfig) -> Result<Self> {
        Self::with_storage_path(config, LocalStorage::default_path())
    }

    /// Create an App keeping its history at `storage_path` (`None` keeps it in memory)
    pub fn with_storage_path(config: StoreConfig, storage_path: Option<PathBuf>) -> Result<Self> {
        let products = config.load_catalog()?;

        let (storage, storage_warning) = match storage_path {
            Some(path) => LocalStorage::open_or_recover(path),
            None => {
                tracing::warn!("No data directory available, history will not be saved");
                (LocalStorage::in_memory(), None)
            }
        };

        let webhook = Arc::new(WebhookClient::new(config.webhook_url())?);
        tracing::info!("Submitting records to {}", webhook.url());

        let mut app = Self::with_parts(config, products, storage, webhook, Box::new(SystemOpener));
        if let Some(message) = storage_warning {
            app.push_error(message);
        }
        app.start_liveness_check();
        Ok(app)
    }

    /// Assemble an App from already constructed collaborators
    pub fn with_parts(
        config: StoreConfig,
        products: Vec<Product>,
        storage: LocalStorage,
        webhook: Arc<dyn WebhookSubmitter>,
        opener: Box<dyn LinkOpener>,
    ) -> Self {
        let session = SessionStorage::default();
        let mut state = AppState::new(config.access_password(), products);
        state.reload(session.is_authenticated());

        Self {
            state,
            session,
            storage,
            config,
            webhook,
            opener,
            quit: false,
            status_message: None,
            submissions: Vec::new(),
            liveness: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn messaging_link(&self) -> &str {
        self.config.messaging_link()
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Probe the webhook in the background so startup never waits on the network
    fn start_liveness_check(&mut self) {
        let (tx, rx) = oneshot::channel();
        let webhook = Arc::clone(&self.webhook);
        tokio::spawn(async move {
            let _ = tx.send(webhook.check_liveness().await);
        });
        self.liveness = Some(rx);
    }

    /// Pick up results of background work
    pub fn poll_background(&mut self) {
        if let Some(rx) = self.liveness.as_mut() {
            match rx.try_recv() {
                Ok(reachable) => {
                    self.state.webhook_reachable = Some(reachable);
                    self.liveness = None;
                }
                Err(oneshot::error::TryRecvError::Empty) => {}
                Err(oneshot::error::TryRecvError::Closed) => self.liveness = None,
            }
        }
        self.submissions.retain(|handle| !handle.is_finished());
    }

    /// Keep the submission on screen in local history and give in-flight
    /// webhook sends up to `timeout` in total before exit
    pub async fn shutdown(&mut self, timeout: Duration) {
        if let Some(record) = self.state.pending_confirmation.take() {
            let id = record.id.clone();
            match self.storage.append(record) {
                Ok(()) => tracing::info!("Stored {id} on exit"),
                Err(e) => tracing::error!("Failed to store {id} on exit: {e}"),
            }
        }
        self.drain_submissions(timeout).await;
    }

    /// Wait for in-flight submissions, `timeout` bounding the whole wait
    pub async fn drain_submissions(&mut self, timeout: Duration) {
        let handles: Vec<_> = self.submissions.drain(..).collect();
        let pending = handles.len();
        let wait_all = async move {
            for handle in handles {
                if let Err(e) = handle.await {
                    tracing::warn!("Webhook task failed: {e}");
                }
            }
        };
        if tokio::time::timeout(timeout, wait_all).await.is_err() {
            tracing::warn!("Abandoning webhook submissions still in flight ({pending} at exit)");
        }
    }

    /// Handle key events
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        if self.state.pending_reset.is_some() {
            self.handle_reset_dialog_key(key);
            return Ok(());
        }

        if self.state.pending_confirmation.is_some() {
            self.handle_confirmation_key(key);
            return Ok(());
        }

        if self.state.workflow.is_some() {
            self.handle_prompt_key(key);
            return Ok(());
        }

        // Clear any status messages on key press
        self.status_message = None;

        match self.state.current_view {
            View::Gate => self.handle_gate_key(key),
            View::Catalog => self.handle_catalog_key(key),
            View::History => self.handle_history_key(key),
        }

        Ok(())
    }

    /// Handle keys on the password screen
    fn handle_gate_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_password(),
            KeyCode::Esc => self.state.gate.input.clear(),
            KeyCode::Backspace => self.state.gate.input.pop_char(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.gate.input.push_char(c)
            }
            _ => {}
        }
    }

    /// Check the typed password
    pub fn submit_password(&mut self) {
        match self.state.gate.attempt() {
            GateOutcome::Granted => {
                if !self.session.is_authenticated() {
                    tracing::info!("Access granted");
                }
                self.session.set_authenticated(true);
                self.state.current_view = View::Catalog;
            }
            GateOutcome::Denied => {
                tracing::warn!("Access denied: incorrect password");
                self.push_error(ACCESS_DENIED_MESSAGE);
            }
        }
    }

    /// Handle keys in the catalog view
    fn handle_catalog_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Shortcuts that work from either focus
        match key.code {
            KeyCode::Char('n') if ctrl => {
                self.start_new_item_request();
                return;
            }
            KeyCode::Char('r') if ctrl => {
                self.state.pending_reset = Some(PendingReset::default());
                return;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.state.catalog_focus.toggle();
                return;
            }
            _ => {}
        }

        match self.state.catalog_focus {
            CatalogFocus::Search => match key.code {
                KeyCode::Char(c) if !ctrl => self.state.push_search_char(c),
                KeyCode::Backspace => self.state.pop_search_char(),
                KeyCode::Esc => self.state.clear_search(),
                KeyCode::Down | KeyCode::Enter => self.state.catalog_focus = CatalogFocus::List,
                _ => {}
            },
            CatalogFocus::List => match key.code {
                KeyCode::Down | KeyCode::Char('j') => {
                    let max = self.state.visible_products.len();
                    self.state.move_selection_down(max);
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    if self.state.selected_index == 0 {
                        self.state.catalog_focus = CatalogFocus::Search;
                    } else {
                        self.state.move_selection_up();
                    }
                }
                KeyCode::Enter | KeyCode::Char('o') => self.start_order(),
                KeyCode::Char('n') => self.start_new_item_request(),
                KeyCode::Char('h') => {
                    self.state.scroll_offset = 0;
                    self.state.current_view = View::History;
                }
                KeyCode::Char('r') => self.state.pending_reset = Some(PendingReset::default()),
                KeyCode::Char('/') | KeyCode::Esc => {
                    self.state.catalog_focus = CatalogFocus::Search
                }
                KeyCode::Char('q') => self.quit = true,
                _ => {}
            },
        }
    }

    /// Handle keys in the history view
    fn handle_history_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                let records = self.storage.requests().len().max(self.storage.orders().len());
                self.state.scroll_down(history_max_scroll(records));
            }
            KeyCode::Up | KeyCode::Char('k') => self.state.scroll_up(),
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => {
                self.state.scroll_offset = 0;
                self.state.current_view = View::Catalog;
            }
            KeyCode::Char('r') => self.state.pending_reset = Some(PendingReset::default()),
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }

    /// Start a request for an item that is not listed
    pub fn start_new_item_request(&mut self) {
        tracing::debug!("Starting new item request");
        self.state.workflow = Some(RequestWorkflow::new_item());
    }

    /// Start an order for the selected product
    pub fn start_order(&mut self) {
        match self.state.selected_product() {
            Some(product) => {
                tracing::debug!("Starting order for {}", product.name);
                self.state.workflow = Some(RequestWorkflow::order(&product.name));
            }
            None => self.status_message = Some("No product selected".to_string()),
        }
    }

    /// Handle keys while a workflow prompt is open
    fn handle_prompt_key(&mut self, key: KeyEvent) {
        let Some(workflow) = self.state.workflow.as_mut() else {
            return;
        };

        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                workflow.input.push_char(c)
            }
            KeyCode::Backspace => workflow.input.pop_char(),
            KeyCode::Enter => {
                if let Some(workflow) = self.state.workflow.take() {
                    self.advance_workflow(workflow.submit());
                }
            }
            KeyCode::Esc => {
                if let Some(workflow) = self.state.workflow.take() {
                    self.advance_workflow(workflow.cancel());
                }
            }
            _ => {}
        }
    }

    fn advance_workflow(&mut self, step: WorkflowStep) {
        match step {
            WorkflowStep::Collecting(workflow) => self.state.workflow = Some(workflow),
            WorkflowStep::Aborted(abort) => {
                tracing::info!("Workflow aborted at {}", abort.field.name());
                if let Some(message) = abort.message() {
                    self.push_error(message);
                }
            }
            WorkflowStep::Completed(draft) => self.complete_workflow(draft),
        }
    }

    /// Build the record, send it off and show the confirmation
    fn complete_workflow(&mut self, draft: RequestDraft) {
        let record = RequestRecord::from_draft(draft, Utc::now());
        tracing::info!("{} {} submitted", record.kind.label(), record.id);

        let handle = webhook::dispatch(Arc::clone(&self.webhook), record.clone());
        self.submissions.retain(|h| !h.is_finished());
        self.submissions.push(handle);

        self.state.pending_confirmation = Some(record);
    }

    /// Handle keys on the submission confirmation
    fn handle_confirmation_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => self.finish_submission(),
            KeyCode::Char('y') if key.modifiers.contains(crate::platform::COPY_MODIFIER) => {
                if let Some(id) = self.state.pending_confirmation.as_ref().map(|r| r.id.clone()) {
                    match self.copy_to_clipboard(&id) {
                        Ok(()) => self.status_message = Some(format!("Copied {id}")),
                        Err(e) => {
                            tracing::warn!("Clipboard unavailable: {e}");
                            self.status_message = Some("Clipboard unavailable".to_string());
                        }
                    }
                }
            }
            _ => {}
        }
    }

    /// Open the messaging link and keep the record in local history
    fn finish_submission(&mut self) {
        let Some(record) = self.state.pending_confirmation.take() else {
            return;
        };

        let link = self.config.messaging_link().to_string();
        match self.opener.open(&link) {
            Ok(()) => self.status_message = Some(format!("Opened {link}")),
            Err(e) => {
                tracing::warn!("{e}");
                self.push_error(format!(
                    "Could not open {link}. Contact us there with ID {}.",
                    record.id
                ));
            }
        }

        let id = record.id.clone();
        if let Err(e) = self.storage.append(record) {
            tracing::error!("Failed to store {id}: {e}");
            self.push_error(format!("Failed to save {id} locally: {e}"));
        }
    }

    /// Handle keys on the "clear all" confirmation
    fn handle_reset_dialog_key(&mut self, key: KeyEvent) {
        let Some(pending) = self.state.pending_reset.as_mut() else {
            return;
        };

        match key.code {
            KeyCode::Up | KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('k') => {
                pending.selected_option = !pending.selected_option;
            }
            KeyCode::Enter => {
                let confirmed = pending.selected_option;
                self.state.pending_reset = None;
                if confirmed {
                    self.reset_all();
                }
            }
            KeyCode::Esc => self.state.pending_reset = None,
            _ => {}
        }
    }

    /// Empty both history lists, sign out and reload
    pub fn reset_all(&mut self) {
        if let Err(e) = self.storage.clear() {
            tracing::error!("Failed to clear local storage: {e}");
            self.push_error(format!("Failed to clear local storage: {e}"));
        }
        self.session.clear();
        self.state.reload(self.session.is_authenticated());
        tracing::info!("Local data cleared");
        self.status_message = Some("Local data cleared".to_string());
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        use arboard::Clipboard;
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }
}
