use crate::app::model::{DEFAULT_MARKDOWN, Model, Pane};
use crate::app::update::{Message, update};
use crate::editor::Direction;
use crate::preview::LineKind;
use crate::storage::{Preferences, Store};
use crate::ui::split::DEFAULT_SPLIT_RATIO;

fn create_model(content: &str) -> Model {
    Model::new(
        content,
        Preferences::default(),
        Store::disabled(),
        false,
        (120, 40),
    )
}

fn create_long_model() -> Model {
    // Enough paragraphs that both panes overflow their viewports.
    let mut md = String::from("# Long Document\n\n");
    for i in 1..=80 {
        md.push_str(&format!("Paragraph {i} of filler content.\n\n"));
    }
    create_model(&md)
}

fn type_text(mut model: Model, text: &str) -> Model {
    for ch in text.chars() {
        model = update(model, Message::InsertChar(ch));
    }
    model
}

// --- Initial state ---

#[test]
fn test_default_session_renders_sample_heading() {
    let model = create_model(DEFAULT_MARKDOWN);
    let first = model.preview.line_at(0).unwrap();
    assert_eq!(first.kind(), LineKind::Heading(1));
    assert_eq!(first.content(), "Markdown syntax guide");
}

#[test]
fn test_fresh_model_is_unmodified() {
    let model = create_model(DEFAULT_MARKDOWN);
    assert!(!model.is_modified());
}

// --- Editing and derived metrics ---

#[test]
fn test_typing_hello_world_counts() {
    let model = type_text(create_model(""), "hello world");
    let metrics = model.metrics();
    assert_eq!(metrics.words, 2);
    assert_eq!(metrics.chars, 11);
    assert_eq!(metrics.lines, 1);
}

#[test]
fn test_typing_updates_preview() {
    let model = type_text(create_model(""), "# Fresh");
    assert_eq!(model.preview.line_at(0).unwrap().content(), "Fresh");
}

#[test]
fn test_edit_marks_content_for_write_through() {
    let mut model = update(create_model(""), Message::InsertChar('x'));
    assert!(model.take_content_dirty());
    // The flag is an edge, not a level.
    assert!(!model.take_content_dirty());
}

#[test]
fn test_cursor_movement_does_not_dirty_content() {
    let mut model = create_model("some\ntext");
    model = update(model, Message::MoveCursor(Direction::Down));
    assert!(!model.take_content_dirty());
}

#[test]
fn test_backspace_at_origin_keeps_content_clean() {
    let mut model = update(create_model("text"), Message::DeleteBack);
    assert!(!model.take_content_dirty());
    assert_eq!(model.buffer.text(), "text");
}

// --- Reset (two-step confirmation) ---

#[test]
fn test_reset_on_modified_text_requires_confirmation() {
    let model = type_text(create_model(""), "my notes");
    let model = update(model, Message::Reset);
    assert!(model.reset_armed);
    assert_eq!(model.buffer.text(), "my notes");
}

#[test]
fn test_reset_confirmed_restores_default_and_scrolls_to_top() {
    let mut model = create_long_model();
    model.prefs.sync_scroll = false;
    let mut model = update(model, Message::ScrollEditor(30));
    model.preview_view.scroll_by(30);

    let model = update(model, Message::Reset);
    let model = update(model, Message::Reset);

    assert_eq!(model.buffer.text(), DEFAULT_MARKDOWN);
    assert_eq!(model.editor_view.offset(), 0);
    assert_eq!(model.preview_view.offset(), 0);
    assert!(!model.reset_armed);
}

#[test]
fn test_reset_aborted_by_any_other_action() {
    let model = type_text(create_model(""), "my notes");
    let model = update(model, Message::Reset);
    // Simulated negative confirmation: the user does something else.
    let model = update(model, Message::MoveCursor(Direction::Left));
    assert!(!model.reset_armed);
    let model = update(model, Message::Reset);
    assert!(model.reset_armed);
    assert_eq!(model.buffer.text(), "my notes");
}

#[test]
fn test_reset_on_unmodified_text_needs_no_confirmation() {
    let mut model = create_model(DEFAULT_MARKDOWN);
    model.editor_view.scroll_by(3);
    let model = update(model, Message::Reset);
    assert!(!model.reset_armed);
    assert_eq!(model.editor_view.offset(), 0);
}

// --- Scroll sync through messages ---

#[test]
fn test_editor_scroll_drives_preview_when_sync_on() {
    let mut model = create_long_model();
    model.prefs.sync_scroll = true;
    let model = update(model, Message::ScrollEditor(10));
    assert!(model.preview_view.offset() > 0);
    assert!(model.sync.echo_suppressed());
}

#[test]
fn test_editor_scroll_leaves_preview_alone_when_sync_off() {
    let model = create_long_model();
    let model = update(model, Message::ScrollEditor(10));
    assert_eq!(model.preview_view.offset(), 0);
}

#[test]
fn test_preview_echo_in_same_tick_does_not_move_editor() {
    let mut model = create_long_model();
    model.prefs.sync_scroll = true;
    let model = update(model, Message::ScrollEditor(10));
    let editor_offset = model.editor_view.offset();

    // A preview scroll event lands in the same tick as the programmatic
    // preview movement: it must not echo back into the editor.
    let model = update(model, Message::ScrollPreview(0));
    assert_eq!(model.editor_view.offset(), editor_offset);
}

#[test]
fn test_preview_scroll_drives_editor_after_frame_boundary() {
    let mut model = create_long_model();
    model.prefs.sync_scroll = true;
    let mut model = update(model, Message::ScrollEditor(10));
    model.sync.end_frame();

    let editor_before = model.editor_view.offset();
    let model = update(model, Message::ScrollPreview(40));
    assert_ne!(model.editor_view.offset(), editor_before);
}

#[test]
fn test_typing_that_scrolls_editor_drives_preview() {
    let mut model = create_model("");
    model.prefs.sync_scroll = true;
    // Fill past the editor viewport so the cursor-follow scrolls.
    let model = type_text(model, &"line\n".repeat(60));
    assert!(model.editor_view.offset() > 0);
    assert!(model.preview_view.offset() > 0);
}

// --- Split divider through messages ---

#[test]
fn test_divider_drag_updates_ratio() {
    let model = create_long_model();
    let model = update(model, Message::DividerPress(0));
    assert!(model.split.is_dragging());
    let model = update(model, Message::DividerDrag(30));
    assert!(model.split.ratio() < DEFAULT_SPLIT_RATIO);
    let model = update(model, Message::PointerUp);
    assert!(!model.split.is_dragging());
}

#[test]
fn test_divider_double_press_resets_ratio() {
    let model = create_long_model();
    let model = update(model, Message::DividerPress(100));
    let model = update(model, Message::DividerDrag(30));
    let model = update(model, Message::PointerUp);

    let model = update(model, Message::DividerPress(1000));
    let model = update(model, Message::DividerPress(1200));
    assert!((model.split.ratio() - DEFAULT_SPLIT_RATIO).abs() < f64::EPSILON);
}

#[test]
fn test_resize_keeps_split_and_viewports_consistent() {
    let model = create_long_model();
    let model = update(model, Message::Resize(160, 50));
    assert_eq!(model.terminal_width, 160);
    let fl = model.frame_layout();
    assert!(fl.editor.is_some());
    assert!(fl.preview.is_some());
}

#[test]
fn test_narrow_resize_collapses_to_single_pane() {
    let model = create_long_model();
    let model = update(model, Message::Resize(60, 40));
    assert!(model.is_narrow());
    let fl = model.frame_layout();
    assert!(fl.editor.is_some());
    assert!(fl.divider.is_none());
    assert!(fl.preview.is_none());

    // Tab switches the visible pane.
    let model = update(model, Message::SwitchPane);
    let fl = model.frame_layout();
    assert!(fl.editor.is_none());
    assert!(fl.preview.is_some());
}

// --- Panes and session ---

#[test]
fn test_switch_pane_toggles_focus() {
    let model = create_model("");
    assert_eq!(model.focus, Pane::Editor);
    let model = update(model, Message::SwitchPane);
    assert_eq!(model.focus, Pane::Preview);
    let model = update(model, Message::SwitchPane);
    assert_eq!(model.focus, Pane::Editor);
}

#[test]
fn test_mouse_move_to_focuses_editor() {
    let model = update(create_model("line one\nline two"), Message::SwitchPane);
    let model = update(model, Message::MoveTo(1, 3));
    assert_eq!(model.focus, Pane::Editor);
    assert_eq!(model.buffer.cursor().line, 1);
}

#[test]
fn test_help_overlay_toggles() {
    let model = update(create_model(""), Message::ToggleHelp);
    assert!(model.help_visible);
    let model = update(model, Message::HideHelp);
    assert!(!model.help_visible);
}

#[test]
fn test_quit_sets_flag() {
    let model = update(create_model(""), Message::Quit);
    assert!(model.should_quit);
}
