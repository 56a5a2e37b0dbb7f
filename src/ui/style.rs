//! Theming and color definitions.
//!
//! One [`Theme`] value holds every style the UI needs; it is rebuilt from
//! the persisted dark-mode preference whenever that flips, so all chrome
//! and markdown styling follows a single switch.

use ratatui::style::{Color, Modifier, Style};

use crate::preview::{LineKind, SpanStyle};

/// Theme selection from the command line.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    /// Use the persisted preference
    Auto,
    Light,
    Dark,
}

/// Styles for markdown content and application chrome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Whether this is the dark variant (drives code highlighting too).
    pub dark: bool,
    pub h1: Style,
    pub h2: Style,
    pub h3: Style,
    pub h4: Style,
    pub code: Style,
    pub inline_code: Style,
    pub quote: Style,
    pub link: Style,
    pub list_marker: Style,
    pub table_border: Style,
    pub image: Style,
    pub hr: Style,
    /// Toolbar header row
    pub header: Style,
    /// Accent for active toggles and the app title
    pub accent: Style,
    /// Metrics row under the header
    pub metrics: Style,
    /// Pane title rows ("Editor" / "Preview")
    pub pane_title: Style,
    /// Line-number gutter in the editor pane
    pub gutter: Style,
    /// Split divider, idle
    pub divider: Style,
    /// Split divider while dragging
    pub divider_active: Style,
    /// Bottom status bar
    pub status: Style,
    /// Inactive tab label in the narrow layout
    pub tab: Style,
    /// Active tab label in the narrow layout
    pub tab_active: Style,
}

impl Theme {
    /// Build the theme for the given dark-mode flag.
    pub fn for_dark(dark: bool) -> Self {
        if dark { Self::dark() } else { Self::light() }
    }

    fn dark() -> Self {
        Self {
            dark: true,
            h1: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            h2: Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            h3: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            h4: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            code: Style::default().fg(Color::Indexed(245)),
            inline_code: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            quote: Style::default().fg(Color::Blue).add_modifier(Modifier::ITALIC),
            link: Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::UNDERLINED),
            list_marker: Style::default().fg(Color::Yellow),
            table_border: Style::default().fg(Color::Indexed(240)),
            image: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::ITALIC),
            hr: Style::default().fg(Color::Indexed(240)),
            header: Style::default().bg(Color::Indexed(234)).fg(Color::Indexed(252)),
            accent: Style::default()
                .fg(Color::Indexed(135))
                .add_modifier(Modifier::BOLD),
            metrics: Style::default().bg(Color::Indexed(236)).fg(Color::Indexed(248)),
            pane_title: Style::default()
                .bg(Color::Indexed(236))
                .fg(Color::Indexed(250))
                .add_modifier(Modifier::BOLD),
            gutter: Style::default().fg(Color::Indexed(241)),
            divider: Style::default().bg(Color::Indexed(238)),
            divider_active: Style::default().bg(Color::Indexed(135)),
            status: Style::default().bg(Color::Indexed(236)).fg(Color::Indexed(252)),
            tab: Style::default().fg(Color::Indexed(245)),
            tab_active: Style::default()
                .fg(Color::Indexed(135))
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        }
    }

    fn light() -> Self {
        Self {
            dark: false,
            h1: Style::default()
                .fg(Color::Indexed(31))
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            h2: Style::default()
                .fg(Color::Indexed(28))
                .add_modifier(Modifier::BOLD),
            h3: Style::default()
                .fg(Color::Indexed(136))
                .add_modifier(Modifier::BOLD),
            h4: Style::default()
                .fg(Color::Indexed(25))
                .add_modifier(Modifier::BOLD),
            code: Style::default().fg(Color::Indexed(240)),
            inline_code: Style::default()
                .fg(Color::Indexed(124))
                .add_modifier(Modifier::BOLD),
            quote: Style::default()
                .fg(Color::Indexed(25))
                .add_modifier(Modifier::ITALIC),
            link: Style::default()
                .fg(Color::Indexed(25))
                .add_modifier(Modifier::UNDERLINED),
            list_marker: Style::default().fg(Color::Indexed(136)),
            table_border: Style::default().fg(Color::Indexed(245)),
            image: Style::default()
                .fg(Color::Indexed(133))
                .add_modifier(Modifier::ITALIC),
            hr: Style::default().fg(Color::Indexed(245)),
            header: Style::default().bg(Color::Indexed(254)).fg(Color::Indexed(235)),
            accent: Style::default()
                .fg(Color::Indexed(91))
                .add_modifier(Modifier::BOLD),
            metrics: Style::default().bg(Color::Indexed(252)).fg(Color::Indexed(240)),
            pane_title: Style::default()
                .bg(Color::Indexed(252))
                .fg(Color::Indexed(237))
                .add_modifier(Modifier::BOLD),
            gutter: Style::default().fg(Color::Indexed(248)),
            divider: Style::default().bg(Color::Indexed(250)),
            divider_active: Style::default().bg(Color::Indexed(91)),
            status: Style::default().bg(Color::Indexed(252)).fg(Color::Indexed(235)),
            tab: Style::default().fg(Color::Indexed(243)),
            tab_active: Style::default()
                .fg(Color::Indexed(91))
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        }
    }

    /// Base style for a rendered markdown line.
    pub fn line_style(&self, kind: LineKind) -> Style {
        match kind {
            LineKind::Heading(1) => self.h1,
            LineKind::Heading(2) => self.h2,
            LineKind::Heading(3) => self.h3,
            LineKind::Heading(_) => self.h4,
            LineKind::CodeBlock => self.code,
            LineKind::BlockQuote => self.quote,
            LineKind::HorizontalRule => self.hr,
            LineKind::Image => self.image,
            LineKind::Table => self.table_border,
            LineKind::ListItem(_) | LineKind::Paragraph | LineKind::Empty => Style::default(),
        }
    }

    /// Merge an inline span style onto a base line style.
    pub fn span_style(&self, base: Style, inline: SpanStyle) -> Style {
        let mut style = base;
        if let Some(fg) = inline.fg {
            style = style.fg(Color::Rgb(fg.r, fg.g, fg.b));
        }
        if inline.emphasis {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if inline.strong {
            style = style.add_modifier(Modifier::BOLD);
        }
        if inline.strikethrough {
            style = style.add_modifier(Modifier::CROSSED_OUT);
        }
        if inline.link {
            style = style.patch(self.link);
        }
        if inline.code && inline.fg.is_none() {
            style = style.patch(self.inline_code);
        }
        style
    }
}
