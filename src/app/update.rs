use crate::app::model::{Model, Pane};
use crate::editor::Direction;

/// All possible events and actions in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Insert a character at the cursor
    InsertChar(char),
    /// Split the line at the cursor (Enter)
    InsertNewline,
    /// Delete the character before the cursor (Backspace)
    DeleteBack,
    /// Delete the character at the cursor (Delete)
    DeleteForward,
    /// Move the cursor one step
    MoveCursor(Direction),
    /// Move to beginning of line (Home)
    MoveHome,
    /// Move to end of line (End)
    MoveEnd,
    /// Move one word left (Ctrl+Left)
    MoveWordLeft,
    /// Move one word right (Ctrl+Right)
    MoveWordRight,
    /// Move to start of document (Ctrl+Home)
    MoveToStart,
    /// Move to end of document (Ctrl+End)
    MoveToEnd,
    /// Move the cursor to an absolute position (mouse click)
    MoveTo(usize, usize),

    // Scrolling
    /// Scroll the editor pane by n lines
    ScrollEditor(isize),
    /// Scroll the preview pane by n lines
    ScrollPreview(isize),
    /// Scroll the editor pane by one page
    PageEditor(i8),
    /// Scroll the preview pane by one page
    PagePreview(i8),

    // Split divider
    /// Mouse-down on the divider column
    DividerPress(u64),
    /// Mouse drag to a column while the divider is held
    DividerDrag(u16),
    /// Mouse-up anywhere
    PointerUp,

    // Toolbar / session
    /// Reset the document to the built-in sample (two-step confirm)
    Reset,
    /// Copy the rendered preview (rich HTML + plain text)
    CopyOutput,
    /// Copy the raw markdown source
    CopyMarkdown,
    /// Start a document export
    Export,
    /// Toggle scroll sync
    ToggleSync,
    /// Toggle the dark theme
    ToggleTheme,
    /// Collapse or expand the toolbar header
    ToggleNavbar,

    // Panes and windows
    /// Switch focus between the panes (and the visible narrow-layout tab)
    SwitchPane,
    /// Focus a specific pane (mouse click)
    FocusPane(Pane),
    /// Terminal resized
    Resize(u16, u16),
    /// Toggle the help overlay
    ToggleHelp,
    /// Hide the help overlay
    HideHelp,

    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA: all state transitions happen here. Side
/// effects (clipboard, storage writes, export processes) live in
/// `effects.rs` and run right after the transition in the same event turn.
pub fn update(mut model: Model, msg: Message) -> Model {
    // A pending reset confirmation survives only until the next message.
    if !matches!(msg, Message::Reset) {
        model.reset_armed = false;
    }

    match msg {
        // Editing
        Message::InsertChar(ch) => {
            model.buffer.insert_char(ch);
            model.content_changed();
        }
        Message::InsertNewline => {
            model.buffer.insert_newline();
            model.content_changed();
        }
        Message::DeleteBack => {
            if model.buffer.delete_back() {
                model.content_changed();
            }
        }
        Message::DeleteForward => {
            if model.buffer.delete_forward() {
                model.content_changed();
            }
        }
        Message::MoveCursor(direction) => {
            model.buffer.move_cursor(direction);
            model.follow_cursor();
        }
        Message::MoveHome => {
            model.buffer.move_home();
        }
        Message::MoveEnd => {
            model.buffer.move_end();
        }
        Message::MoveWordLeft => {
            model.buffer.move_word_left();
        }
        Message::MoveWordRight => {
            model.buffer.move_word_right();
        }
        Message::MoveToStart => {
            model.buffer.move_to_start();
            model.follow_cursor();
        }
        Message::MoveToEnd => {
            model.buffer.move_to_end();
            model.follow_cursor();
        }
        Message::MoveTo(line, col) => {
            // Arrives from a mouse click in the editor pane.
            model.focus = Pane::Editor;
            model.buffer.move_to(line, col);
            model.follow_cursor();
        }

        // Scrolling
        Message::ScrollEditor(delta) => {
            model.editor_view.scroll_by(delta);
            model.sync.editor_scrolled(
                model.prefs.sync_scroll,
                &model.editor_view,
                &mut model.preview_view,
            );
        }
        Message::ScrollPreview(delta) => {
            model.preview_view.scroll_by(delta);
            model.sync.preview_scrolled(
                model.prefs.sync_scroll,
                &model.preview_view,
                &mut model.editor_view,
            );
        }
        Message::PageEditor(pages) => {
            if pages < 0 {
                model.editor_view.page_up();
            } else {
                model.editor_view.page_down();
            }
            model.sync.editor_scrolled(
                model.prefs.sync_scroll,
                &model.editor_view,
                &mut model.preview_view,
            );
        }
        Message::PagePreview(pages) => {
            if pages < 0 {
                model.preview_view.page_up();
            } else {
                model.preview_view.page_down();
            }
            model.sync.preview_scrolled(
                model.prefs.sync_scroll,
                &model.preview_view,
                &mut model.editor_view,
            );
        }

        // Split divider
        Message::DividerPress(now_ms) => {
            model.split.press_divider(now_ms);
            model.apply_layout();
        }
        Message::DividerDrag(column) => {
            if let Some(editor) = model.frame_layout().editor {
                model.split.drag_to(column, editor.x, model.terminal_width);
                model.apply_layout();
            }
        }
        Message::PointerUp => {
            model.split.release();
        }

        // Toolbar / session
        Message::Reset => {
            if model.is_modified() && !model.reset_armed {
                // First press arms; effects surface the confirmation toast.
                model.reset_armed = true;
            } else {
                model.reset_to_default();
            }
        }
        // Clipboard, export and preference writes happen in effects.
        Message::CopyOutput
        | Message::CopyMarkdown
        | Message::Export
        | Message::ToggleSync
        | Message::ToggleTheme
        | Message::ToggleNavbar => {}

        // Panes and windows
        Message::SwitchPane => {
            model.focus = match model.focus {
                Pane::Editor => Pane::Preview,
                Pane::Preview => Pane::Editor,
            };
            model.apply_layout();
        }
        Message::FocusPane(pane) => {
            model.focus = pane;
            model.apply_layout();
        }
        Message::Resize(width, height) => {
            model.terminal_width = width;
            model.terminal_height = height;
            model.apply_layout();
            // Snap the stored ratio to the left pane's rendered cell width
            // so the visual split survives the new grid. Ignored mid-drag;
            // the drag stays in control.
            if !model.is_narrow()
                && let Some(editor) = model.frame_layout().editor
            {
                model.split.container_resized(editor.width, width);
            }
        }
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }

        Message::Quit => {
            model.should_quit = true;
        }
    }

    model
}
