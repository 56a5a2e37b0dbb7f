use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use crate::app::model::{DEFAULT_MARKDOWN, Model, Pane};
use crate::app::{Message, update};
use crate::storage::{Preferences, Store};
use crate::ui::split::SplitPane;
use crate::ui::{self, DIVIDER_COLS};

fn create_model(width: u16, height: u16) -> Model {
    Model::new(
        DEFAULT_MARKDOWN,
        Preferences::default(),
        Store::disabled(),
        false,
        (width, height),
    )
}

fn draw(model: &Model, width: u16, height: u16) -> Buffer {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| ui::render(model, frame)).unwrap();
    terminal.backend().buffer().clone()
}

fn buffer_text(buffer: &Buffer) -> String {
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

// --- Layout ---

#[test]
fn test_layout_partitions_wide_terminal() {
    let area = Rect::new(0, 0, 120, 40);
    let fl = ui::layout(area, true, &SplitPane::new(), Pane::Editor);

    assert_eq!(fl.header.height, 1);
    assert_eq!(fl.metrics.unwrap().height, 1);
    assert!(fl.tabs.is_none());
    assert_eq!(fl.status.height, 1);

    let editor = fl.editor.unwrap();
    let divider = fl.divider.unwrap();
    let preview = fl.preview.unwrap();
    assert_eq!(editor.width + divider.width + preview.width, 120);
    assert_eq!(divider.width, DIVIDER_COLS);
    assert_eq!(editor.x + editor.width, divider.x);
}

#[test]
fn test_layout_collapsed_navbar_frees_a_row() {
    let area = Rect::new(0, 0, 120, 40);
    let expanded = ui::layout(area, true, &SplitPane::new(), Pane::Editor);
    let collapsed = ui::layout(area, false, &SplitPane::new(), Pane::Editor);
    assert!(collapsed.metrics.is_none());
    assert_eq!(
        collapsed.editor.unwrap().height,
        expanded.editor.unwrap().height + 1
    );
}

#[test]
fn test_layout_narrow_shows_single_pane_and_tabs() {
    let area = Rect::new(0, 0, 60, 30);
    let fl = ui::layout(area, true, &SplitPane::new(), Pane::Preview);
    assert!(fl.tabs.is_some());
    assert!(fl.editor.is_none());
    assert!(fl.divider.is_none());
    assert_eq!(fl.preview.unwrap().width, 60);
}

#[test]
fn test_pane_body_sits_under_title_row() {
    let area = Rect::new(0, 0, 120, 40);
    let fl = ui::layout(area, true, &SplitPane::new(), Pane::Editor);
    let pane = fl.editor.unwrap();
    let body = fl.editor_body().unwrap();
    assert_eq!(body.y, pane.y + 1);
    assert_eq!(body.height, pane.height - 1);
}

// --- Rendering smoke tests ---

#[test]
fn test_render_split_layout_shows_both_panes() {
    let model = create_model(120, 40);
    let text = buffer_text(&draw(&model, 120, 40));
    assert!(text.contains("Editor"));
    assert!(text.contains("Preview"));
    assert!(text.contains("Markdown Live Preview"));
    assert!(text.contains("words"));
    // The sample document's H1 shows up in the preview pane.
    assert!(text.contains("Markdown syntax guide"));
}

#[test]
fn test_render_narrow_layout_shows_tab_bar() {
    let model = create_model(60, 30);
    let text = buffer_text(&draw(&model, 60, 30));
    assert!(text.contains("Tab to switch"));
}

#[test]
fn test_render_editor_gutter_numbers_lines() {
    let model = create_model(120, 40);
    let text = buffer_text(&draw(&model, 120, 40));
    assert!(text.contains("   1 "));
}

#[test]
fn test_render_help_overlay() {
    let model = update(create_model(120, 40), Message::ToggleHelp);
    let text = buffer_text(&draw(&model, 120, 40));
    assert!(text.contains("any key to close"));
    assert!(text.contains("Copy rendered output"));
}

#[test]
fn test_render_collapsed_navbar_hides_metrics() {
    let mut model = create_model(120, 40);
    model.prefs.navbar_expanded = false;
    model.apply_layout();
    let text = buffer_text(&draw(&model, 120, 40));
    assert!(!text.contains("characters"));
    assert!(text.contains("Show toolbar"));
}

#[test]
fn test_render_survives_tiny_terminal() {
    let model = create_model(5, 3);
    let _ = draw(&model, 5, 3);
}

#[test]
fn test_render_dark_theme() {
    let model = Model::new(
        DEFAULT_MARKDOWN,
        Preferences::default(),
        Store::disabled(),
        true,
        (120, 40),
    );
    let text = buffer_text(&draw(&model, 120, 40));
    assert!(text.contains("dark"));
}
