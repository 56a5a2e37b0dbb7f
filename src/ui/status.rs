use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::model::{Model, Pane, ToastLevel};

/// Toolbar header: app title plus the action hints.
///
/// Collapsed mode shows a one-line title so more rows go to the panes.
pub fn render_header(model: &Model, frame: &mut Frame, area: Rect) {
    let mut spans = vec![
        Span::styled(" mdlive ", model.theme.accent),
        Span::raw("Markdown Live Preview"),
    ];

    if model.prefs.navbar_expanded {
        let sync = if model.prefs.sync_scroll { "on" } else { "off" };
        let export = if model.exporting {
            "Exporting…"
        } else {
            "Export ^E"
        };
        let actions = format!(
            "  │  Reset ^R  │  {} ^Y  │  {}  │  Sync:{} ^S  │  Theme ^T  │  Hide ^N",
            model.copy_label(Instant::now()),
            export,
            sync,
        );
        spans.push(Span::raw(actions));
    } else {
        spans.push(Span::raw("  │  Show toolbar ^N"));
    }

    let header = Paragraph::new(Line::from(spans)).style(model.theme.header);
    frame.render_widget(header, area);
}

/// Word / character / line counts, recomputed from the document each frame.
pub fn render_metrics_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let m = model.metrics();
    let bar = Paragraph::new(format!(
        " {} words • {} characters • {} lines",
        m.words, m.chars, m.lines
    ))
    .style(model.theme.metrics);
    frame.render_widget(bar, area);
}

/// Editor/Preview tab switcher shown in the narrow layout.
pub fn render_tab_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let (editor_style, preview_style) = match model.focus {
        Pane::Editor => (model.theme.tab_active, model.theme.tab),
        Pane::Preview => (model.theme.tab, model.theme.tab_active),
    };
    let tabs = Line::from(vec![
        Span::raw(" "),
        Span::styled(" Editor ", editor_style),
        Span::raw("  "),
        Span::styled(" Preview ", preview_style),
        Span::styled("   (Tab to switch)", model.theme.tab),
    ]);
    frame.render_widget(Paragraph::new(tabs), area);
}

/// Bottom status bar: focus, scroll positions and mode indicators.
pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let focus = match model.focus {
        Pane::Editor => "editor",
        Pane::Preview => "preview",
    };
    let sync = if model.prefs.sync_scroll {
        "  [sync]"
    } else {
        ""
    };
    let exporting = if model.exporting { "  [exporting]" } else { "" };
    let theme = if model.theme.dark { "dark" } else { "light" };

    let status = format!(
        " {focus}  editor {}% · preview {}%{sync}{exporting}  {theme}  F1:help",
        model.editor_view.scroll_percent(),
        model.preview_view.scroll_percent(),
    );
    frame.render_widget(Paragraph::new(status).style(model.theme.status), area);
}

/// Transient notification bar; replaces the status bar while active.
pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
