//! Proportional scroll coupling between the editor and preview panes.
//!
//! The editor is the drive source. When it scrolls (and sync is enabled),
//! the preview is moved to the same relative position and an
//! echo-suppression flag is armed. Preview scroll events that arrive while
//! the flag is armed are the preview's own movement coming back around and
//! are dropped; genuine user scrolls of the preview (flag clear) drive the
//! editor symmetrically.
//!
//! The flag is cleared once per frame, after drawing: deferred by one
//! rendering tick rather than reset inline, so every event that was already
//! queued in the same tick sees it armed.

use super::viewport::Viewport;

/// Feedback-loop breaker between two coupled viewports.
///
/// The suppression flag is owned here and set/cleared by nothing else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollSync {
    suppress_echo: bool,
}

impl ScrollSync {
    pub const fn new() -> Self {
        Self {
            suppress_echo: false,
        }
    }

    /// The editor scrolled. Moves the preview to the editor's relative
    /// position and arms echo suppression. No-op when sync is disabled.
    pub fn editor_scrolled(&mut self, enabled: bool, editor: &Viewport, preview: &mut Viewport) {
        if !enabled {
            return;
        }
        self.suppress_echo = true;
        preview.scroll_to_ratio(editor.scroll_ratio());
    }

    /// The preview scrolled. Moves the editor to the preview's relative
    /// position unless sync is disabled or this is a suppressed echo.
    ///
    /// Returns `true` when the editor was driven.
    pub fn preview_scrolled(&mut self, enabled: bool, preview: &Viewport, editor: &mut Viewport) -> bool {
        if !enabled || self.suppress_echo {
            return false;
        }
        editor.scroll_to_ratio(preview.scroll_ratio());
        true
    }

    /// Frame boundary: re-enable preview-driven sync.
    ///
    /// Called exactly once per frame by the event loop, after drawing.
    pub const fn end_frame(&mut self) {
        self.suppress_echo = false;
    }

    /// Whether preview events are currently being dropped.
    pub const fn echo_suppressed(&self) -> bool {
        self.suppress_echo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panes() -> (Viewport, Viewport) {
        // Editor 100 lines in a 20-row pane, preview 200 lines in a 20-row
        // pane: equal ratios land on different offsets.
        (Viewport::new(40, 20, 100), Viewport::new(40, 20, 200))
    }

    #[test]
    fn test_editor_scroll_drives_preview_proportionally() {
        let (mut editor, mut preview) = panes();
        let mut sync = ScrollSync::new();

        editor.scroll_by(40); // ratio 0.5 of max 80
        sync.editor_scrolled(true, &editor, &mut preview);
        assert_eq!(preview.offset(), 90); // 0.5 of max 180
    }

    #[test]
    fn test_editor_scroll_ignored_when_sync_disabled() {
        let (mut editor, mut preview) = panes();
        let mut sync = ScrollSync::new();

        editor.scroll_by(40);
        sync.editor_scrolled(false, &editor, &mut preview);
        assert_eq!(preview.offset(), 0);
        assert!(!sync.echo_suppressed());
    }

    #[test]
    fn test_preview_echo_is_suppressed_within_same_tick() {
        let (mut editor, mut preview) = panes();
        let mut sync = ScrollSync::new();

        editor.scroll_by(40);
        sync.editor_scrolled(true, &editor, &mut preview);

        // The preview's own movement reports back before the next frame.
        let editor_before = editor.offset();
        let driven = sync.preview_scrolled(true, &preview, &mut editor);
        assert!(!driven);
        assert_eq!(editor.offset(), editor_before);
    }

    #[test]
    fn test_user_preview_scroll_drives_editor_after_frame() {
        let (mut editor, mut preview) = panes();
        let mut sync = ScrollSync::new();

        editor.scroll_by(40);
        sync.editor_scrolled(true, &editor, &mut preview);
        sync.end_frame();

        preview.go_to_bottom();
        let driven = sync.preview_scrolled(true, &preview, &mut editor);
        assert!(driven);
        assert_eq!(editor.offset(), editor.max_offset());
    }

    #[test]
    fn test_preview_scroll_ignored_when_sync_disabled() {
        let (mut editor, mut preview) = panes();
        let mut sync = ScrollSync::new();

        preview.scroll_by(50);
        assert!(!sync.preview_scrolled(false, &preview, &mut editor));
        assert_eq!(editor.offset(), 0);
    }

    #[test]
    fn test_short_preview_pins_to_top() {
        let mut editor = Viewport::new(40, 20, 100);
        // Preview fits entirely in the pane, max scroll 0.
        let mut preview = Viewport::new(40, 20, 10);
        let mut sync = ScrollSync::new();

        editor.go_to_bottom();
        sync.editor_scrolled(true, &editor, &mut preview);
        assert_eq!(preview.offset(), 0);

        // And the short pane reports ratio 0, so after the frame it would
        // drive the editor to the top rather than divide by zero.
        sync.end_frame();
        sync.preview_scrolled(true, &preview, &mut editor);
        assert_eq!(editor.offset(), 0);
    }

    #[test]
    fn test_last_event_in_tick_wins() {
        let (mut editor, mut preview) = panes();
        let mut sync = ScrollSync::new();

        // Two editor scrolls in one tick: the second one's position sticks.
        editor.scroll_by(20);
        sync.editor_scrolled(true, &editor, &mut preview);
        editor.scroll_by(20);
        sync.editor_scrolled(true, &editor, &mut preview);
        assert_eq!(preview.offset(), 90);
    }
}
