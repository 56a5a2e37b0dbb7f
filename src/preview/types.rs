//! Rendered preview types.

/// The block-level kind of a rendered line, used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Heading with level 1-6
    Heading(u8),
    /// Regular paragraph text
    Paragraph,
    /// Fenced or indented code block
    CodeBlock,
    /// Block quote
    BlockQuote,
    /// List item at a nesting depth
    ListItem(usize),
    /// Table row
    Table,
    /// Horizontal rule
    HorizontalRule,
    /// Image placeholder
    Image,
    /// Blank separator line
    Empty,
}

/// A 24-bit color attached to a span by the syntax highlighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Inline styling flags for a span of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpanStyle {
    /// Italic
    pub emphasis: bool,
    /// Bold
    pub strong: bool,
    pub strikethrough: bool,
    /// Inline or block code
    pub code: bool,
    /// Link text
    pub link: bool,
    /// Highlighter-assigned foreground
    pub fg: Option<SpanColor>,
}

/// A run of text with uniform inline styling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    text: String,
    style: SpanStyle,
}

impl Span {
    pub const fn new(text: String, style: SpanStyle) -> Self {
        Self { text, style }
    }

    /// Plain text span with default styling.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: SpanStyle::default(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn style(&self) -> SpanStyle {
        self.style
    }
}

/// One terminal row of rendered markdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    content: String,
    kind: LineKind,
    spans: Option<Vec<Span>>,
}

impl RenderedLine {
    /// A line with plain content and no inline spans.
    pub const fn new(content: String, kind: LineKind) -> Self {
        Self {
            content,
            kind,
            spans: None,
        }
    }

    /// A line carrying styled inline spans.
    pub fn with_spans(kind: LineKind, spans: Vec<Span>) -> Self {
        let content = spans.iter().map(Span::text).collect();
        Self {
            content,
            kind,
            spans: Some(spans),
        }
    }

    /// An empty separator line.
    pub const fn blank() -> Self {
        Self {
            content: String::new(),
            kind: LineKind::Empty,
            spans: None,
        }
    }

    /// The full text content of the line.
    pub fn content(&self) -> &str {
        &self.content
    }

    pub const fn kind(&self) -> LineKind {
        self.kind
    }

    /// Inline spans, when the line carries styled runs.
    pub fn spans(&self) -> Option<&[Span]> {
        self.spans.as_deref()
    }
}
