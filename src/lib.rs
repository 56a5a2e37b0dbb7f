// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::EditorBuffer)
    clippy::module_name_repetitions
)]

//! # mdlive
//!
//! A terminal markdown editor with live preview.
//!
//! mdlive shows an editor pane and a rendered preview pane side by side:
//! - Live preview with GFM tables, task lists and highlighted code blocks
//! - Proportional scroll sync between the panes
//! - A mouse-resizable split divider (double-click to reset)
//! - Copy as rich HTML, plain text, or raw markdown
//! - PDF export with a browser print fallback
//! - The session persists across runs without ever asking to save
//!
//! ## Architecture
//!
//! mdlive uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`editor`]: Text buffer for the editor pane
//! - [`preview`]: Markdown rendering (terminal lines and HTML)
//! - [`highlight`]: Syntax highlighting for fenced code blocks
//! - [`storage`]: Key-value session persistence
//! - [`toolbar`]: Derived document metrics
//! - [`export`]: Document export pipeline
//! - [`ui`]: Terminal UI components, scroll sync and the split resizer

pub mod app;
pub mod editor;
pub mod export;
pub mod highlight;
pub mod preview;
pub mod storage;
pub mod toolbar;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::preview::Preview;
    pub use crate::ui::split::SplitPane;
    pub use crate::ui::sync::ScrollSync;
    pub use crate::ui::viewport::Viewport;
}
