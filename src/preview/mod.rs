//! Markdown rendering for the preview pane.
//!
//! This module is a pure function of the document text. It produces two
//! representations:
//! - styled terminal lines for the preview pane ([`Preview::parse`])
//! - a sanitized HTML document for clipboard and export ([`html_document`])
//!
//! Parsing is delegated to comrak with GFM extensions. Raw HTML passes
//! through and is then sanitized by comrak's tagfilter, so script and
//! friends never reach the clipboard or an exported file.

mod parser;
mod types;

pub use types::{LineKind, RenderedLine, Span, SpanColor, SpanStyle};

use comrak::{Options, markdown_to_html};

/// A rendered markdown document, ready for the preview pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    lines: Vec<RenderedLine>,
}

impl Preview {
    /// Render markdown source into styled terminal lines.
    ///
    /// `width` is the wrap width of the preview pane; `dark` selects the
    /// code-highlighting palette.
    pub fn parse(source: &str, width: u16, dark: bool) -> Self {
        Self {
            lines: parser::render_lines(source, width, dark),
        }
    }

    /// An empty preview.
    pub const fn empty() -> Self {
        Self { lines: Vec::new() }
    }

    /// Total number of rendered lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// A rendered line by index.
    pub fn line_at(&self, index: usize) -> Option<&RenderedLine> {
        self.lines.get(index)
    }

    /// Lines from `offset`, at most `count` of them.
    pub fn visible_lines(&self, offset: usize, count: usize) -> impl Iterator<Item = &RenderedLine> {
        self.lines.iter().skip(offset).take(count)
    }

    /// The rendered text content, one string per line, joined with newlines.
    ///
    /// This is what "copy output" places on the clipboard as the plain-text
    /// representation: the preview's visible text, not the markdown source.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(line.content());
        }
        out
    }
}

/// comrak options shared by the line renderer and the HTML renderer.
pub(crate) fn comrak_options() -> Options {
    let mut options = Options::default();

    // GFM extensions
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;

    // Raw HTML passes through, then the tagfilter strips unsafe tags.
    options.render.unsafe_ = true;
    options.extension.tagfilter = true;

    options
}

/// Render markdown to an HTML fragment (sanitized, GFM).
pub fn html_fragment(source: &str) -> String {
    markdown_to_html(source, &comrak_options())
}

/// Render markdown to a complete standalone HTML document.
///
/// `extra_css` is injected into a `<style>` block; the export pipeline uses
/// it for page-break-avoidance rules.
pub fn html_document(source: &str, extra_css: &str) -> String {
    let body = html_fragment(source);
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><style>{extra_css}</style></head><body>{body}</body></html>"
    )
}
