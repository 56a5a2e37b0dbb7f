//! Syntax highlighting for fenced code blocks.
//!
//! Uses syntect with Sublime Text syntax definitions. The theme follows the
//! application's light/dark preference rather than guessing at the terminal
//! background.

use std::sync::OnceLock;

use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;

use crate::preview::{Span, SpanColor, SpanStyle};

/// Highlight a code block into styled spans, one vector per line.
///
/// Unknown or missing languages fall back to unstyled code spans. Background
/// colors are never emitted; the pane background stays in control.
pub fn highlight_code(language: Option<&str>, code: &str, dark: bool) -> Vec<Vec<Span>> {
    let syntax_set = syntax_set();
    let syntax = language.and_then(|lang| {
        syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| syntax_set.find_syntax_by_name(lang))
    });

    let Some(syntax) = syntax else {
        return code
            .lines()
            .map(|line| {
                let style = SpanStyle {
                    code: true,
                    ..SpanStyle::default()
                };
                vec![Span::new(line.to_string(), style)]
            })
            .collect();
    };

    let mut highlighter = HighlightLines::new(syntax, theme(dark));
    let mut lines = Vec::new();
    for line in code.lines() {
        let ranges = highlighter
            .highlight_line(line, syntax_set)
            .unwrap_or_default();
        let spans = ranges
            .into_iter()
            .map(|(style, text)| {
                let span_style = SpanStyle {
                    code: true,
                    fg: Some(SpanColor {
                        r: style.foreground.r,
                        g: style.foreground.g,
                        b: style.foreground.b,
                    }),
                    ..SpanStyle::default()
                };
                Span::new(text.to_string(), span_style)
            })
            .collect();
        lines.push(spans);
    }
    lines
}

fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme(dark: bool) -> &'static Theme {
    static DARK: OnceLock<Theme> = OnceLock::new();
    static LIGHT: OnceLock<Theme> = OnceLock::new();
    let (cell, preferred): (&OnceLock<Theme>, &[&str]) = if dark {
        (
            &DARK,
            &["Monokai Extended", "Dracula", "Solarized (dark)", "base16-ocean.dark"],
        )
    } else {
        (
            &LIGHT,
            &["InspiredGitHub", "Solarized (light)", "base16-ocean.light"],
        )
    };
    cell.get_or_init(|| {
        let theme_set = ThemeSet::load_defaults();
        for name in preferred {
            if let Some(theme) = theme_set.themes.get(*name) {
                return theme.clone();
            }
        }
        theme_set
            .themes
            .values()
            .next()
            .cloned()
            .unwrap_or_default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_js_produces_colored_spans() {
        let code = "const hello = 'world';\nconsole.log(hello);\n";
        let lines = highlight_code(Some("js"), code, true);

        assert_eq!(lines.len(), 2);
        let has_color = lines.iter().flatten().any(|span| span.style().fg.is_some());
        assert!(has_color, "Expected at least one colored span for JS");
    }

    #[test]
    fn test_unknown_language_falls_back_to_plain_code() {
        let lines = highlight_code(Some("nosuchlang"), "just text", false);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].iter().all(|span| span.style().code));
        assert!(lines[0].iter().all(|span| span.style().fg.is_none()));
    }

    #[test]
    fn test_no_language_sets_code_style() {
        let lines = highlight_code(None, "plain", true);
        assert!(lines[0].iter().all(|span| span.style().code));
    }

    #[test]
    fn test_line_structure_preserved() {
        let lines = highlight_code(Some("rust"), "fn a() {}\n\nfn b() {}", true);
        assert_eq!(lines.len(), 3);
    }
}
