//! The editor pane's text buffer.
//!
//! The buffer owns the document text; everything else (preview, metrics,
//! persistence) works from read-only copies handed out per event turn.

mod buffer;

pub use buffer::{Cursor, Direction, EditorBuffer};
