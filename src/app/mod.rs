//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering
//!
//! Side effects (clipboard, storage write-through, export processes) run in
//! `effects.rs` immediately after each state transition, within the same
//! event turn.

mod effects;
mod event_loop;
mod input;
pub(crate) mod model;
mod update;

pub use model::{DEFAULT_MARKDOWN, Model, Pane, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::ui::style::ThemeMode;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    seed_file: Option<PathBuf>,
    theme: ThemeMode,
    reset_session: bool,
    state_dir: Option<PathBuf>,
}

impl App {
    /// Create a new application with the stored session as its document.
    pub const fn new() -> Self {
        Self {
            seed_file: None,
            theme: ThemeMode::Auto,
            reset_session: false,
            state_dir: None,
        }
    }

    /// Seed the session content from a file instead of the stored session.
    pub fn with_seed_file(mut self, path: Option<PathBuf>) -> Self {
        self.seed_file = path;
        self
    }

    /// Override the persisted theme preference for this run.
    pub const fn with_theme(mut self, theme: ThemeMode) -> Self {
        self.theme = theme;
        self
    }

    /// Clear the stored session before starting.
    pub const fn with_reset_session(mut self, reset: bool) -> Self {
        self.reset_session = reset;
        self
    }

    /// Use a custom storage directory.
    pub fn with_state_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.state_dir = dir;
        self
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
