use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use unicode_width::UnicodeWidthChar;

use crate::app::model::{Model, Pane};
use crate::app::update::Message;
use crate::app::App;
use crate::editor::Direction;
use crate::ui::EDITOR_GUTTER_COLS;

impl App {
    pub(super) fn handle_event(event: &Event, model: &Model, now_ms: u64) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model, now_ms),
            Event::Resize(width, height) => Some(Message::Resize(*width, *height)),
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
            return None;
        }
        if model.help_visible {
            return Some(Message::HideHelp);
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Session shortcuts work from either pane.
        if ctrl {
            match key.code {
                KeyCode::Char('q') => return Some(Message::Quit),
                KeyCode::Char('r') => return Some(Message::Reset),
                KeyCode::Char('y') => return Some(Message::CopyOutput),
                KeyCode::Char('k') => return Some(Message::CopyMarkdown),
                KeyCode::Char('e') => return Some(Message::Export),
                KeyCode::Char('s') => return Some(Message::ToggleSync),
                KeyCode::Char('t') => return Some(Message::ToggleTheme),
                KeyCode::Char('n') => return Some(Message::ToggleNavbar),
                _ => {}
            }
        }
        match key.code {
            KeyCode::F(1) => return Some(Message::ToggleHelp),
            KeyCode::Tab => return Some(Message::SwitchPane),
            _ => {}
        }

        match model.focus {
            Pane::Editor => Self::handle_editor_key(key, ctrl),
            Pane::Preview => Self::handle_preview_key(key, model),
        }
    }

    fn handle_editor_key(key: KeyEvent, ctrl: bool) -> Option<Message> {
        match key.code {
            KeyCode::Left if ctrl => Some(Message::MoveWordLeft),
            KeyCode::Right if ctrl => Some(Message::MoveWordRight),
            KeyCode::Home if ctrl => Some(Message::MoveToStart),
            KeyCode::End if ctrl => Some(Message::MoveToEnd),
            KeyCode::Left => Some(Message::MoveCursor(Direction::Left)),
            KeyCode::Right => Some(Message::MoveCursor(Direction::Right)),
            KeyCode::Up => Some(Message::MoveCursor(Direction::Up)),
            KeyCode::Down => Some(Message::MoveCursor(Direction::Down)),
            KeyCode::Home => Some(Message::MoveHome),
            KeyCode::End => Some(Message::MoveEnd),
            KeyCode::PageUp => Some(Message::PageEditor(-1)),
            KeyCode::PageDown => Some(Message::PageEditor(1)),
            KeyCode::Enter => Some(Message::InsertNewline),
            KeyCode::Backspace => Some(Message::DeleteBack),
            KeyCode::Delete => Some(Message::DeleteForward),
            KeyCode::Char(ch)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                Some(Message::InsertChar(ch))
            }
            _ => None,
        }
    }

    #[allow(clippy::cast_possible_wrap)]
    fn handle_preview_key(key: KeyEvent, model: &Model) -> Option<Message> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Message::ScrollPreview(1)),
            KeyCode::Char('k') | KeyCode::Up => Some(Message::ScrollPreview(-1)),
            KeyCode::Char(' ') | KeyCode::PageDown => Some(Message::PagePreview(1)),
            KeyCode::Char('b') | KeyCode::PageUp => Some(Message::PagePreview(-1)),
            KeyCode::Char('g') | KeyCode::Home => {
                Some(Message::ScrollPreview(-(model.preview_view.offset() as isize)))
            }
            KeyCode::Char('G') | KeyCode::End => Some(Message::ScrollPreview(
                model.preview_view.max_offset() as isize,
            )),
            KeyCode::Char('q') => Some(Message::Quit),
            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model, now_ms: u64) -> Option<Message> {
        if model.help_visible {
            if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
                return Some(Message::HideHelp);
            }
            return None;
        }

        let fl = model.frame_layout();
        let (col, row) = (mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if fl.tabs.is_some_and(|tabs| point_in(col, row, tabs)) {
                    return Some(Message::FocusPane(if col < 10 {
                        Pane::Editor
                    } else {
                        Pane::Preview
                    }));
                }
                if fl.divider.is_some_and(|div| point_in(col, row, div)) {
                    return Some(Message::DividerPress(now_ms));
                }
                if let Some(body) = fl.editor_body()
                    && point_in(col, row, body)
                {
                    let line = model.editor_view.offset() + usize::from(row - body.y);
                    let display = usize::from(col.saturating_sub(body.x + EDITOR_GUTTER_COLS));
                    let text = model
                        .buffer
                        .line_at(line.min(model.buffer.line_count().saturating_sub(1)))
                        .unwrap_or_default();
                    return Some(Message::MoveTo(line, char_col_at_display(&text, display)));
                }
                if fl.preview_body().is_some_and(|body| point_in(col, row, body)) {
                    return Some(Message::FocusPane(Pane::Preview));
                }
                None
            }

            MouseEventKind::Drag(MouseButton::Left) if model.split.is_dragging() => {
                Some(Message::DividerDrag(col))
            }

            // Release anywhere ends a divider drag, even far from the
            // divider column.
            MouseEventKind::Up(MouseButton::Left) if model.split.is_dragging() => {
                Some(Message::PointerUp)
            }

            MouseEventKind::ScrollDown => Self::wheel_message(model, &fl, col, row, 3),
            MouseEventKind::ScrollUp => Self::wheel_message(model, &fl, col, row, -3),

            _ => None,
        }
    }

    /// Wheel events scroll the pane under the pointer.
    fn wheel_message(
        model: &Model,
        fl: &crate::ui::FrameLayout,
        col: u16,
        row: u16,
        delta: isize,
    ) -> Option<Message> {
        if fl.editor.is_some_and(|pane| point_in(col, row, pane)) {
            return Some(Message::ScrollEditor(delta));
        }
        if fl.preview.is_some_and(|pane| point_in(col, row, pane)) {
            return Some(Message::ScrollPreview(delta));
        }
        // Narrow layout: anywhere scrolls the visible pane.
        if model.is_narrow() {
            return Some(match model.focus {
                Pane::Editor => Message::ScrollEditor(delta),
                Pane::Preview => Message::ScrollPreview(delta),
            });
        }
        None
    }
}

fn point_in(col: u16, row: u16, rect: Rect) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

/// Character column within `line` for a click at the given display column.
fn char_col_at_display(line: &str, display_col: usize) -> usize {
    let mut width = 0usize;
    for (chars_before, ch) in line.chars().enumerate() {
        if width >= display_col {
            return chars_before;
        }
        width += ch.width().unwrap_or(0);
    }
    line.chars().count()
}

#[cfg(test)]
mod tests {
    use super::char_col_at_display;

    #[test]
    fn test_char_col_for_ascii() {
        assert_eq!(char_col_at_display("hello", 3), 3);
        assert_eq!(char_col_at_display("hello", 99), 5);
    }

    #[test]
    fn test_char_col_for_wide_chars() {
        // Each CJK char is 2 display columns but one character.
        assert_eq!(char_col_at_display("日本語", 2), 1);
        assert_eq!(char_col_at_display("日本語", 4), 2);
    }
}
