//! Platform-specific configuration

use crossterm::event::KeyModifiers;
use std::process::{Command, Stdio};
use thiserror::Error;

/// Platform-appropriate modifier for copy shortcuts
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const COPY_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const COPY_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Copy shortcut display for dialog hints
#[cfg(target_os = "macos")]
pub const COPY_SHORTCUT: &str = "Cmd+Y";

#[cfg(not(target_os = "macos"))]
pub const COPY_SHORTCUT: &str = "Ctrl+Y";

/// Failure to hand a link to the system browser
#[derive(Debug, Error)]
#[error("failed to open {url}: {source}")]
pub struct OpenLinkError {
    pub url: String,
    #[source]
    pub source: std::io::Error,
}

/// Opens external links in a new browsing context
#[cfg_attr(test, mockall::automock)]
pub trait LinkOpener: Send + Sync {
    fn open(&self, url: &str) -> Result<(), OpenLinkError>;
}

/// Uses the desktop's default URL handler
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl SystemOpener {
    #[cfg(target_os = "macos")]
    fn command(url: &str) -> Command {
        let mut cmd = Command::new("open");
        cmd.arg(url);
        cmd
    }

    #[cfg(target_os = "windows")]
    fn command(url: &str) -> Command {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", "", url]);
        cmd
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    fn command(url: &str) -> Command {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(url);
        cmd
    }
}

impl LinkOpener for SystemOpener {
    fn open(&self, url: &str) -> Result<(), OpenLinkError> {
        // Keep the handler's output off the TUI
        Self::command(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_| ())
            .map_err(|source| OpenLinkError {
                url: url.to_string(),
                source,
            })
    }
}
