use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::editor::EditorBuffer;
use crate::preview::Preview;
use crate::storage::{Preferences, Store};
use crate::toolbar::Metrics;
use crate::ui::split::SplitPane;
use crate::ui::style::Theme;
use crate::ui::sync::ScrollSync;
use crate::ui::viewport::Viewport;
use crate::ui::{self, PREVIEW_LEFT_PADDING};

/// The markdown sample a fresh session starts with.
pub const DEFAULT_MARKDOWN: &str = r#"# Markdown syntax guide

## Headers

# Heading 1
## Heading 2
###### Heading 6

## Emphasis

*Italic* and **bold**
_You **can** combine them_

## Lists

### Unordered

* Item 1
* Item 2
  * Nested

### Ordered

1. First
2. Second
3. Third

## Links & Images

[Link text](https://example.com)

![Markdown](/markdown.svg "Markdown logo")

## Blockquotes

> Markdown is a lightweight markup language with plain-text-formatting syntax.

## Tables

| Left   | Center | Right |
| :----- | :----: | ----: |
| left   | center | right |

## Code

Inline `code` and a block:

```js
const hello = 'world';
console.log(hello);
```
"#;

/// How long the "Copied!" confirmation replaces the copy label.
const COPY_CONFIRM: Duration = Duration::from_millis(1500);

/// How long toasts stay visible before auto-clearing.
const TOAST_DURATION: Duration = Duration::from_millis(2500);

/// The two panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Editor,
    Preview,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here, no global or scattered state. The scroll
/// suppression flag lives inside [`ScrollSync`], the divider state inside
/// [`SplitPane`]; this struct owns both.
pub struct Model {
    /// The document text (the editor pane owns it)
    pub buffer: EditorBuffer,
    /// Rendered markdown for the preview pane
    pub preview: Preview,
    /// Editor pane scroll state
    pub editor_view: Viewport,
    /// Preview pane scroll state
    pub preview_view: Viewport,
    /// Scroll coupling between the panes
    pub sync: ScrollSync,
    /// Split divider state
    pub split: SplitPane,
    /// Persisted preference values (in-memory authoritative)
    pub prefs: Preferences,
    /// Session storage backing the document and preferences
    pub store: Store,
    /// Active style table, derived from the dark preference
    pub theme: Theme,
    /// Focused pane; in the narrow layout, also the visible tab
    pub focus: Pane,
    /// Whether the help overlay is visible
    pub help_visible: bool,
    /// One export may be in flight at a time
    pub exporting: bool,
    /// First Ctrl+R pressed; the next one performs the reset
    pub reset_armed: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Terminal size
    pub terminal_width: u16,
    pub terminal_height: u16,
    copy_confirm_until: Option<Instant>,
    toast: Option<Toast>,
    /// Document changed this turn and needs a write-through
    content_dirty: bool,
    /// Preview wrap width used for the last parse
    last_preview_width: u16,
}

impl Model {
    /// Create a model for the given session content and hydrated prefs.
    pub fn new(
        content: &str,
        prefs: Preferences,
        store: Store,
        dark: bool,
        terminal_size: (u16, u16),
    ) -> Self {
        let mut model = Self {
            buffer: EditorBuffer::from_text(content),
            preview: Preview::empty(),
            editor_view: Viewport::new(0, 0, 0),
            preview_view: Viewport::new(0, 0, 0),
            sync: ScrollSync::new(),
            split: SplitPane::new(),
            prefs,
            store,
            theme: Theme::for_dark(dark),
            focus: Pane::Editor,
            help_visible: false,
            exporting: false,
            reset_armed: false,
            should_quit: false,
            terminal_width: terminal_size.0,
            terminal_height: terminal_size.1,
            copy_confirm_until: None,
            toast: None,
            content_dirty: false,
            last_preview_width: 0,
        };
        model.apply_layout();
        model
    }

    /// Whether the terminal is too narrow for the two-pane split.
    pub const fn is_narrow(&self) -> bool {
        self.terminal_width < ui::NARROW_BREAKPOINT_COLS
    }

    /// The frame layout for the current terminal size and settings.
    pub fn frame_layout(&self) -> ui::FrameLayout {
        let area = Rect::new(0, 0, self.terminal_width, self.terminal_height);
        ui::layout(area, self.prefs.navbar_expanded, &self.split, self.focus)
    }

    /// Size both viewports from the current layout and reflow the preview
    /// when its wrap width changed.
    pub fn apply_layout(&mut self) {
        let fl = self.frame_layout();
        if let Some(body) = fl.editor_body() {
            self.editor_view.resize(body.width, body.height);
        }
        if let Some(body) = fl.preview_body() {
            self.preview_view.resize(body.width, body.height);
        }
        self.editor_view.set_total_lines(self.buffer.line_count());

        let wrap = self.preview_wrap_width();
        if wrap != self.last_preview_width {
            self.reflow_preview();
        }
    }

    /// Wrap width for preview text inside the preview pane body.
    fn preview_wrap_width(&self) -> u16 {
        self.preview_view
            .width()
            .saturating_sub(PREVIEW_LEFT_PADDING + 1)
            .max(10)
    }

    /// Re-render the preview from the current document text.
    pub fn reflow_preview(&mut self) {
        let wrap = self.preview_wrap_width();
        self.preview = Preview::parse(&self.buffer.text(), wrap, self.theme.dark);
        self.preview_view.set_total_lines(self.preview.line_count());
        self.last_preview_width = wrap;
    }

    /// Bookkeeping after any buffer mutation: reflow, mark the content for
    /// the same-turn write-through, and keep the cursor visible (cursor
    /// motion that scrolls the editor drives sync like any other scroll).
    pub fn content_changed(&mut self) {
        self.content_dirty = true;
        self.editor_view.set_total_lines(self.buffer.line_count());
        self.reflow_preview();
        self.follow_cursor();
    }

    /// Scroll the editor just enough to keep the cursor on screen.
    pub fn follow_cursor(&mut self) {
        if self.editor_view.ensure_visible(self.buffer.cursor().line) {
            self.sync.editor_scrolled(
                self.prefs.sync_scroll,
                &self.editor_view,
                &mut self.preview_view,
            );
        }
    }

    /// Whether the document differs from the built-in sample.
    pub fn is_modified(&self) -> bool {
        self.buffer.text() != DEFAULT_MARKDOWN
    }

    /// Replace the document with the built-in sample and scroll both panes
    /// to the top.
    pub fn reset_to_default(&mut self) {
        self.buffer.replace_all(DEFAULT_MARKDOWN);
        self.content_changed();
        self.editor_view.go_to_top();
        self.preview_view.go_to_top();
        self.reset_armed = false;
    }

    /// Current document metrics for the toolbar.
    pub fn metrics(&self) -> Metrics {
        Metrics::of(&self.buffer.text())
    }

    /// Take the needs-write-through flag for this event turn.
    pub const fn take_content_dirty(&mut self) -> bool {
        let dirty = self.content_dirty;
        self.content_dirty = false;
        dirty
    }

    // --- Copy confirmation label ---

    /// Flip the copy button label to its confirmation state.
    pub fn flash_copy_confirmation(&mut self) {
        self.copy_confirm_until = Some(Instant::now() + COPY_CONFIRM);
    }

    /// The current copy label.
    pub fn copy_label(&self, now: Instant) -> &'static str {
        if self.copy_confirm_until.is_some_and(|until| now < until) {
            "Copied!"
        } else {
            "Copy output"
        }
    }

    /// Whether the confirmation label is still waiting to revert.
    pub const fn copy_confirmation_pending(&self) -> bool {
        self.copy_confirm_until.is_some()
    }

    /// Clear an elapsed confirmation. Returns `true` when the label just
    /// reverted and the toolbar needs a repaint.
    pub fn expire_copy_confirmation(&mut self, now: Instant) -> bool {
        if self.copy_confirm_until.is_some_and(|until| until <= now) {
            self.copy_confirm_until = None;
            return true;
        }
        false
    }

    // --- Toasts ---

    pub fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    pub fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("focus", &self.focus)
            .field("prefs", &self.prefs)
            .field("exporting", &self.exporting)
            .field("terminal", &(self.terminal_width, self.terminal_height))
            .finish_non_exhaustive()
    }
}

// Default exists so update() can move the model out with std::mem::take.
impl Default for Model {
    fn default() -> Self {
        Self {
            buffer: EditorBuffer::from_text(""),
            preview: Preview::empty(),
            editor_view: Viewport::new(0, 0, 0),
            preview_view: Viewport::new(0, 0, 0),
            sync: ScrollSync::new(),
            split: SplitPane::new(),
            prefs: Preferences::default(),
            store: Store::disabled(),
            theme: Theme::for_dark(false),
            focus: Pane::Editor,
            help_visible: false,
            exporting: false,
            reset_armed: false,
            should_quit: false,
            terminal_width: 0,
            terminal_height: 0,
            copy_confirm_until: None,
            toast: None,
            content_dirty: false,
            last_preview_width: 0,
        }
    }
}
