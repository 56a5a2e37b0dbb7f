use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span as TSpan};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::app::model::{Model, Pane};
use crate::ui::split::SplitPane;

use super::{DIVIDER_COLS, EDITOR_GUTTER_COLS, NARROW_BREAKPOINT_COLS, PREVIEW_LEFT_PADDING, status};

/// Screen regions for one frame.
///
/// `editor`/`preview` are whole pane rects including their one-row title;
/// in the narrow layout only the active tab's pane exists and there is no
/// divider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayout {
    pub header: Rect,
    pub metrics: Option<Rect>,
    pub tabs: Option<Rect>,
    pub editor: Option<Rect>,
    pub divider: Option<Rect>,
    pub preview: Option<Rect>,
    pub status: Rect,
}

impl FrameLayout {
    /// Editor pane body (under the title row).
    pub fn editor_body(&self) -> Option<Rect> {
        self.editor.map(pane_body)
    }

    /// Preview pane body (under the title row).
    pub fn preview_body(&self) -> Option<Rect> {
        self.preview.map(pane_body)
    }
}

fn pane_body(pane: Rect) -> Rect {
    Rect {
        x: pane.x,
        y: pane.y.saturating_add(1),
        width: pane.width,
        height: pane.height.saturating_sub(1),
    }
}

/// Compute the frame layout for the given terminal area.
pub fn layout(area: Rect, navbar_expanded: bool, split: &SplitPane, active_tab: Pane) -> FrameLayout {
    let narrow = area.width < NARROW_BREAKPOINT_COLS;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(u16::from(navbar_expanded)),
            Constraint::Length(u16::from(narrow)),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);
    let content = rows[3];

    let (editor, divider, preview) = if narrow {
        match active_tab {
            Pane::Editor => (Some(content), None, None),
            Pane::Preview => (None, None, Some(content)),
        }
    } else {
        let widths = split.pane_widths(content.width);
        let editor = Rect {
            width: widths.left,
            ..content
        };
        let divider = Rect {
            x: content.x + widths.left,
            width: DIVIDER_COLS.min(content.width.saturating_sub(widths.left)),
            ..content
        };
        let preview = Rect {
            x: content.x + widths.left + divider.width,
            width: widths.right,
            ..content
        };
        (Some(editor), Some(divider), Some(preview))
    };

    FrameLayout {
        header: rows[0],
        metrics: navbar_expanded.then_some(rows[1]),
        tabs: narrow.then_some(rows[2]),
        editor,
        divider,
        preview,
        status: rows[4],
    }
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let fl = layout(
        frame.area(),
        model.prefs.navbar_expanded,
        &model.split,
        model.focus,
    );

    status::render_header(model, frame, fl.header);
    if let Some(area) = fl.metrics {
        status::render_metrics_bar(model, frame, area);
    }
    if let Some(area) = fl.tabs {
        status::render_tab_bar(model, frame, area);
    }

    if let Some(area) = fl.editor {
        render_editor_pane(model, frame, area);
    }
    if let Some(area) = fl.divider {
        render_divider(model, frame, area);
    }
    if let Some(area) = fl.preview {
        render_preview_pane(model, frame, area);
    }

    if model.active_toast().is_some() {
        status::render_toast_bar(model, frame, fl.status);
    } else {
        status::render_status_bar(model, frame, fl.status);
    }

    if model.help_visible {
        render_help_overlay(model, frame, frame.area());
    }
}

fn render_editor_pane(model: &Model, frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(" Editor").style(model.theme.pane_title);
    frame.render_widget(title, Rect { height: 1, ..area });

    let body = pane_body(area);
    if body.height == 0 {
        return;
    }

    let text_width = usize::from(body.width.saturating_sub(EDITOR_GUTTER_COLS));
    let cursor = model.buffer.cursor();
    let shift = horizontal_shift(
        model.buffer.line_at(cursor.line).as_deref().unwrap_or(""),
        cursor.col,
        text_width,
    );

    let mut rows: Vec<Line> = Vec::new();
    for idx in model.editor_view.visible_range() {
        let text = model.buffer.line_at(idx).unwrap_or_default();
        let gutter = format!("{:>4} ", idx + 1);
        rows.push(Line::from(vec![
            TSpan::styled(gutter, model.theme.gutter),
            TSpan::raw(shifted(&text, shift, text_width)),
        ]));
    }
    frame.render_widget(Paragraph::new(rows), body);

    if model.focus == Pane::Editor && cursor.line >= model.editor_view.offset() {
        let row_in_view = cursor.line - model.editor_view.offset();
        if row_in_view < usize::from(body.height) {
            let col = display_col(
                model.buffer.line_at(cursor.line).as_deref().unwrap_or(""),
                cursor.col,
            )
            .saturating_sub(shift);
            #[allow(clippy::cast_possible_truncation)]
            frame.set_cursor_position((
                body.x + EDITOR_GUTTER_COLS + (col.min(text_width.saturating_sub(1)) as u16),
                body.y + row_in_view as u16,
            ));
        }
    }
}

fn render_preview_pane(model: &Model, frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(" Preview").style(model.theme.pane_title);
    frame.render_widget(title, Rect { height: 1, ..area });

    let body = pane_body(area);
    if body.height == 0 {
        return;
    }

    let padding = " ".repeat(usize::from(PREVIEW_LEFT_PADDING));
    let mut rows: Vec<Line> = Vec::new();
    for line in model
        .preview
        .visible_lines(model.preview_view.offset(), usize::from(body.height))
    {
        let base = model.theme.line_style(line.kind());
        let mut spans = vec![TSpan::raw(padding.clone())];
        if let Some(inline) = line.spans() {
            for span in inline {
                spans.push(TSpan::styled(
                    span.text().to_string(),
                    model.theme.span_style(base, span.style()),
                ));
            }
        } else {
            spans.push(TSpan::styled(line.content().to_string(), base));
        }
        rows.push(Line::from(spans));
    }
    frame.render_widget(Paragraph::new(rows), body);
}

fn render_divider(model: &Model, frame: &mut Frame, area: Rect) {
    let style = if model.split.is_dragging() {
        model.theme.divider_active
    } else {
        model.theme.divider
    };
    frame.render_widget(Block::default().style(style), area);
}

fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    const KEYS: &[(&str, &str)] = &[
        ("Ctrl+Q", "Quit"),
        ("Tab", "Switch pane / tab"),
        ("Ctrl+R", "Reset to the sample document (press twice)"),
        ("Ctrl+Y", "Copy rendered output (HTML + plain text)"),
        ("Ctrl+K", "Copy raw markdown"),
        ("Ctrl+E", "Export (PDF, or print from the browser)"),
        ("Ctrl+S", "Toggle scroll sync"),
        ("Ctrl+T", "Toggle dark theme"),
        ("Ctrl+N", "Collapse or expand the toolbar"),
        ("F1", "This help"),
        ("", ""),
        ("Mouse", "Drag the divider to resize the panes;"),
        ("", "double-click it to reset the split."),
    ];

    #[allow(clippy::cast_possible_truncation)]
    let height = (KEYS.len() as u16 + 2).min(area.height);
    let width = 58.min(area.width);
    let popup = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    let lines: Vec<Line> = KEYS
        .iter()
        .map(|(key, what)| {
            Line::from(vec![
                TSpan::styled(format!(" {key:<8}"), model.theme.accent),
                TSpan::raw(format!(" {what}")),
            ])
        })
        .collect();

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .title(" Keys (any key to close) ")
                .borders(Borders::ALL),
        ),
        popup,
    );
}

/// Display column of a character column within a line.
fn display_col(line: &str, char_col: usize) -> usize {
    line.chars()
        .take(char_col)
        .map(|ch| ch.width().unwrap_or(0))
        .sum()
}

/// Uniform horizontal shift that keeps the cursor column on screen.
fn horizontal_shift(cursor_line: &str, cursor_col: usize, text_width: usize) -> usize {
    if text_width == 0 {
        return 0;
    }
    display_col(cursor_line, cursor_col).saturating_sub(text_width - 1)
}

/// A line with its first `shift` display columns removed, truncated to fit.
fn shifted(line: &str, shift: usize, text_width: usize) -> String {
    let mut skipped = 0usize;
    let mut taken = 0usize;
    let mut out = String::new();
    for ch in line.chars() {
        let w = ch.width().unwrap_or(0);
        if skipped < shift {
            skipped += w;
            continue;
        }
        if taken + w > text_width {
            break;
        }
        taken += w;
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod shift_tests {
    use super::*;

    #[test]
    fn test_no_shift_when_cursor_fits() {
        assert_eq!(horizontal_shift("short", 5, 40), 0);
    }

    #[test]
    fn test_shift_keeps_cursor_in_view() {
        let line = "x".repeat(100);
        let shift = horizontal_shift(&line, 80, 40);
        assert_eq!(shift, 41);
        assert_eq!(shifted(&line, shift, 40).len(), 40);
    }

    #[test]
    fn test_shifted_truncates_to_width() {
        assert_eq!(shifted("abcdefgh", 2, 3), "cde");
    }
}
