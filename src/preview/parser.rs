//! Markdown to terminal lines, via the comrak AST.

use comrak::nodes::{AstNode, NodeValue, TableAlignment};
use comrak::{Arena, parse_document};
use unicode_width::UnicodeWidthStr;

use super::types::{LineKind, RenderedLine, Span, SpanStyle};

struct Ctx {
    width: usize,
    dark: bool,
}

/// Render markdown source into styled, wrapped terminal lines.
pub(super) fn render_lines(source: &str, width: u16, dark: bool) -> Vec<RenderedLine> {
    let arena = Arena::new();
    let root = parse_document(&arena, source, &super::comrak_options());
    let ctx = Ctx {
        width: usize::from(width.max(1)),
        dark,
    };

    let mut lines = Vec::new();
    for child in root.children() {
        render_block(child, &mut lines, &ctx, 0, None);
    }
    lines
}

fn render_block<'a>(
    node: &'a AstNode<'a>,
    lines: &mut Vec<RenderedLine>,
    ctx: &Ctx,
    depth: usize,
    marker: Option<&str>,
) {
    match &node.data.borrow().value {
        NodeValue::Heading(heading) => {
            ensure_blank(lines);
            let spans = collect_spans(node, SpanStyle::default());
            let text: String = spans.iter().map(Span::text).collect();
            lines.push(RenderedLine::new(text, LineKind::Heading(heading.level)));
            lines.push(RenderedLine::blank());
        }

        NodeValue::Paragraph => {
            if let Some(alt) = sole_image_alt(node) {
                lines.push(RenderedLine::new(
                    format!("[image: {alt}]"),
                    LineKind::Image,
                ));
                lines.push(RenderedLine::blank());
                return;
            }
            let spans = collect_spans(node, SpanStyle::default());
            for row in wrap_spans(&spans, ctx.width, "", "") {
                lines.push(RenderedLine::with_spans(LineKind::Paragraph, row));
            }
            lines.push(RenderedLine::blank());
        }

        NodeValue::CodeBlock(code) => {
            let language = code.info.split_whitespace().next().filter(|s| !s.is_empty());
            for row in crate::highlight::highlight_code(language, &code.literal, ctx.dark) {
                let mut spans = vec![Span::plain("  ")];
                spans.extend(row);
                lines.push(RenderedLine::with_spans(LineKind::CodeBlock, spans));
            }
            lines.push(RenderedLine::blank());
        }

        NodeValue::BlockQuote => {
            let mut inner = Vec::new();
            for child in node.children() {
                render_block(child, &mut inner, ctx, depth, None);
            }
            while inner.last().is_some_and(|l| l.kind() == LineKind::Empty) {
                inner.pop();
            }
            for line in inner {
                let mut spans = vec![Span::plain("▌ ")];
                if let Some(existing) = line.spans() {
                    spans.extend(existing.iter().cloned());
                } else {
                    spans.push(Span::plain(line.content()));
                }
                lines.push(RenderedLine::with_spans(LineKind::BlockQuote, spans));
            }
            lines.push(RenderedLine::blank());
        }

        NodeValue::List(list) => {
            let item_depth = depth + 1;
            for (index, child) in node.children().enumerate() {
                let item_marker = match list.list_type {
                    comrak::nodes::ListType::Bullet => "• ".to_string(),
                    comrak::nodes::ListType::Ordered => format!("{}. ", list.start + index),
                };
                render_block(child, lines, ctx, item_depth, Some(&item_marker));
            }
            if depth == 0 {
                lines.push(RenderedLine::blank());
            }
        }

        NodeValue::Item(_) | NodeValue::TaskItem(_) => {
            let indent = "  ".repeat(depth.saturating_sub(1));
            let marker = task_marker(node).map_or_else(
                || marker.unwrap_or("• ").to_string(),
                |task| format!("{task} "),
            );
            let first = format!("{indent}{marker}");
            let rest = format!("{indent}{}", " ".repeat(marker.chars().count()));

            let mut rendered_text = false;
            for child in node.children() {
                match &child.data.borrow().value {
                    NodeValue::Paragraph => {
                        let spans = collect_spans(child, SpanStyle::default());
                        let prefix = if rendered_text { &rest } else { &first };
                        for row in wrap_spans(&spans, ctx.width, prefix, &rest) {
                            lines.push(RenderedLine::with_spans(LineKind::ListItem(depth), row));
                        }
                        rendered_text = true;
                    }
                    NodeValue::List(_) => {
                        render_block(child, lines, ctx, depth, None);
                    }
                    _ => {}
                }
            }
            if !rendered_text {
                lines.push(RenderedLine::new(first, LineKind::ListItem(depth)));
            }
        }

        NodeValue::ThematicBreak => {
            lines.push(RenderedLine::new(
                "─".repeat(ctx.width.min(40)),
                LineKind::HorizontalRule,
            ));
            lines.push(RenderedLine::blank());
        }

        NodeValue::Table(table) => {
            render_table(node, &table.alignments, lines);
            lines.push(RenderedLine::blank());
        }

        NodeValue::HtmlBlock(html) => {
            for raw in html.literal.lines() {
                lines.push(RenderedLine::new(raw.to_string(), LineKind::Paragraph));
            }
            lines.push(RenderedLine::blank());
        }

        _ => {
            for child in node.children() {
                render_block(child, lines, ctx, depth, marker);
            }
        }
    }
}

/// Keep exactly one blank separator before the next block.
fn ensure_blank(lines: &mut Vec<RenderedLine>) {
    if !lines.is_empty() && lines.last().is_some_and(|l| l.kind() != LineKind::Empty) {
        lines.push(RenderedLine::blank());
    }
}

/// The alt text of a paragraph that contains a single image and nothing else.
fn sole_image_alt<'a>(node: &'a AstNode<'a>) -> Option<String> {
    let mut children = node.children();
    let only = children.next()?;
    if children.next().is_some() {
        return None;
    }
    match &only.data.borrow().value {
        NodeValue::Image(image) => {
            let alt = plain_text(only);
            Some(if alt.is_empty() { image.url.clone() } else { alt })
        }
        _ => None,
    }
}

fn task_marker<'a>(node: &'a AstNode<'a>) -> Option<&'static str> {
    if let NodeValue::TaskItem(symbol) = &node.data.borrow().value {
        return Some(if symbol.is_some() { "✓" } else { "□" });
    }
    for child in node.children() {
        if let NodeValue::TaskItem(symbol) = &child.data.borrow().value {
            return Some(if symbol.is_some() { "✓" } else { "□" });
        }
    }
    None
}

/// Flatten a node's inline content into styled spans.
fn collect_spans<'a>(node: &'a AstNode<'a>, style: SpanStyle) -> Vec<Span> {
    let mut spans = Vec::new();
    collect_spans_into(node, style, &mut spans);
    spans
}

fn collect_spans_into<'a>(node: &'a AstNode<'a>, style: SpanStyle, spans: &mut Vec<Span>) {
    for child in node.children() {
        match &child.data.borrow().value {
            NodeValue::Text(text) => spans.push(Span::new(text.clone(), style)),
            NodeValue::Code(code) => {
                let mut code_style = style;
                code_style.code = true;
                spans.push(Span::new(code.literal.clone(), code_style));
            }
            NodeValue::Emph => {
                let mut next = style;
                next.emphasis = true;
                collect_spans_into(child, next, spans);
            }
            NodeValue::Strong => {
                let mut next = style;
                next.strong = true;
                collect_spans_into(child, next, spans);
            }
            NodeValue::Strikethrough => {
                let mut next = style;
                next.strikethrough = true;
                collect_spans_into(child, next, spans);
            }
            NodeValue::Link(_) => {
                let mut next = style;
                next.link = true;
                collect_spans_into(child, next, spans);
            }
            NodeValue::Image(image) => {
                let alt = plain_text(child);
                let mut next = style;
                next.link = true;
                let label = if alt.is_empty() { &image.url } else { &alt };
                spans.push(Span::new(format!("[image: {label}]"), next));
            }
            NodeValue::HtmlInline(raw) => spans.push(Span::new(raw.clone(), style)),
            NodeValue::SoftBreak | NodeValue::LineBreak => {
                spans.push(Span::new(" ".to_string(), style));
            }
            NodeValue::List(_) | NodeValue::Item(_) => {}
            _ => collect_spans_into(child, style, spans),
        }
    }
}

/// The plain text under a node, inline styling discarded.
fn plain_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut out = String::new();
    plain_text_into(node, &mut out);
    out
}

fn plain_text_into<'a>(node: &'a AstNode<'a>, out: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(text) => out.push_str(text),
        NodeValue::Code(code) => out.push_str(&code.literal),
        NodeValue::SoftBreak | NodeValue::LineBreak => out.push(' '),
        _ => {
            for child in node.children() {
                plain_text_into(child, out);
            }
        }
    }
}

/// Greedy word wrap over styled spans.
///
/// `prefix_first` starts the first row, `prefix_rest` starts continuation
/// rows; leading whitespace is dropped at wrapped row starts.
fn wrap_spans(
    spans: &[Span],
    width: usize,
    prefix_first: &str,
    prefix_rest: &str,
) -> Vec<Vec<Span>> {
    let tokens: Vec<Span> = spans.iter().flat_map(split_tokens).collect();

    let new_row = |prefix: &str| -> (Vec<Span>, usize) {
        if prefix.is_empty() {
            (Vec::new(), 0)
        } else {
            (vec![Span::plain(prefix)], prefix.width())
        }
    };

    let mut rows = Vec::new();
    let (mut row, mut row_width) = new_row(prefix_first);
    let mut has_word = false;

    for token in tokens {
        let token_width = token.text().width();
        let is_ws = token.text().chars().all(char::is_whitespace);

        if has_word && row_width + token_width > width {
            trim_row_end(&mut row);
            rows.push(std::mem::take(&mut row));
            (row, row_width) = new_row(prefix_rest);
            has_word = false;
        }
        if is_ws && !has_word {
            continue;
        }
        row_width += token_width;
        row.push(token);
        if !is_ws {
            has_word = true;
        }
    }

    if row.is_empty() && rows.is_empty() && !prefix_first.is_empty() {
        row.push(Span::plain(prefix_first));
    }
    if !row.is_empty() || rows.is_empty() {
        trim_row_end(&mut row);
        rows.push(row);
    }
    rows
}

/// Drop trailing whitespace tokens from a completed row.
fn trim_row_end(row: &mut Vec<Span>) {
    while row
        .last()
        .is_some_and(|span| span.text().chars().all(char::is_whitespace) && !span.text().is_empty())
    {
        row.pop();
    }
}

/// Split a span into alternating word and whitespace tokens.
fn split_tokens(span: &Span) -> Vec<Span> {
    let mut out = Vec::new();
    let mut buf = String::new();
    let mut in_ws: Option<bool> = None;

    for ch in span.text().chars() {
        let is_ws = ch.is_whitespace();
        if in_ws.is_some_and(|state| state != is_ws) {
            out.push(Span::new(std::mem::take(&mut buf), span.style()));
        }
        buf.push(ch);
        in_ws = Some(is_ws);
    }
    if !buf.is_empty() {
        out.push(Span::new(buf, span.style()));
    }
    out
}

fn render_table<'a>(node: &'a AstNode<'a>, alignments: &[TableAlignment], lines: &mut Vec<RenderedLine>) {
    let mut rows: Vec<(bool, Vec<String>)> = Vec::new();
    for row_node in node.children() {
        let is_header = match &row_node.data.borrow().value {
            NodeValue::TableRow(header) => *header,
            _ => continue,
        };
        let cells: Vec<String> = row_node.children().map(plain_text).collect();
        rows.push((is_header, cells));
    }

    let columns = rows.iter().map(|(_, cells)| cells.len()).max().unwrap_or(0);
    if columns == 0 {
        return;
    }
    let mut widths = vec![0usize; columns];
    for (_, cells) in &rows {
        for (i, cell) in cells.iter().enumerate() {
            widths[i] = widths[i].max(cell.width());
        }
    }

    for (is_header, cells) in rows {
        let rendered: Vec<String> = (0..columns)
            .map(|i| {
                let cell = cells.get(i).map_or("", String::as_str);
                pad_cell(cell, widths[i], alignments.get(i).copied())
            })
            .collect();
        lines.push(RenderedLine::new(
            format!("│ {} │", rendered.join(" │ ")),
            LineKind::Table,
        ));
        if is_header {
            let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
            lines.push(RenderedLine::new(
                format!("├─{}─┤", rule.join("─┼─")),
                LineKind::Table,
            ));
        }
    }
}

fn pad_cell(cell: &str, width: usize, alignment: Option<TableAlignment>) -> String {
    let gap = width.saturating_sub(cell.width());
    match alignment {
        Some(TableAlignment::Right) => format!("{}{cell}", " ".repeat(gap)),
        Some(TableAlignment::Center) => {
            let left = gap / 2;
            format!("{}{cell}{}", " ".repeat(left), " ".repeat(gap - left))
        }
        _ => format!("{cell}{}", " ".repeat(gap)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(lines: &[RenderedLine]) -> Vec<LineKind> {
        lines.iter().map(RenderedLine::kind).collect()
    }

    #[test]
    fn test_paragraph_wraps_at_width() {
        let lines = render_lines("alpha beta gamma delta", 11, false);
        let text_rows: Vec<&str> = lines
            .iter()
            .filter(|l| l.kind() == LineKind::Paragraph)
            .map(RenderedLine::content)
            .collect();
        assert_eq!(text_rows, vec!["alpha beta", "gamma delta"]);
    }

    #[test]
    fn test_emphasis_and_strong_set_span_styles() {
        let lines = render_lines("*it* and **bold**", 80, false);
        let spans = lines[0].spans().unwrap();
        assert!(spans.iter().any(|s| s.style().emphasis && s.text() == "it"));
        assert!(spans.iter().any(|s| s.style().strong && s.text() == "bold"));
    }

    #[test]
    fn test_link_text_is_styled_as_link() {
        let lines = render_lines("[Link text](https://example.com)", 80, false);
        let spans = lines[0].spans().unwrap();
        assert!(spans.iter().any(|s| s.style().link && s.text() == "Link text"));
    }

    #[test]
    fn test_autolink_is_detected() {
        let lines = render_lines("visit https://example.com today", 80, false);
        let spans = lines[0].spans().unwrap();
        assert!(spans.iter().any(|s| s.style().link));
    }

    #[test]
    fn test_unordered_list_uses_bullets() {
        let lines = render_lines("* one\n* two", 80, false);
        let items: Vec<&str> = lines
            .iter()
            .filter(|l| matches!(l.kind(), LineKind::ListItem(_)))
            .map(RenderedLine::content)
            .collect();
        assert_eq!(items, vec!["• one", "• two"]);
    }

    #[test]
    fn test_ordered_list_numbers_from_start() {
        let lines = render_lines("3. three\n4. four", 80, false);
        let items: Vec<&str> = lines
            .iter()
            .filter(|l| matches!(l.kind(), LineKind::ListItem(_)))
            .map(RenderedLine::content)
            .collect();
        assert_eq!(items, vec!["3. three", "4. four"]);
    }

    #[test]
    fn test_nested_list_indents() {
        let lines = render_lines("* outer\n  * inner", 80, false);
        let items: Vec<&str> = lines
            .iter()
            .filter(|l| matches!(l.kind(), LineKind::ListItem(_)))
            .map(RenderedLine::content)
            .collect();
        assert_eq!(items, vec!["• outer", "  • inner"]);
    }

    #[test]
    fn test_task_list_markers() {
        let lines = render_lines("- [x] done\n- [ ] open", 80, false);
        let items: Vec<&str> = lines
            .iter()
            .filter(|l| matches!(l.kind(), LineKind::ListItem(_)))
            .map(RenderedLine::content)
            .collect();
        assert_eq!(items, vec!["✓ done", "□ open"]);
    }

    #[test]
    fn test_blockquote_prefixes_lines() {
        let lines = render_lines("> quoted wisdom", 80, false);
        assert_eq!(lines[0].kind(), LineKind::BlockQuote);
        assert_eq!(lines[0].content(), "▌ quoted wisdom");
    }

    #[test]
    fn test_code_block_lines_are_indented() {
        let lines = render_lines("```\nlet x = 1;\n```", 80, false);
        assert_eq!(lines[0].kind(), LineKind::CodeBlock);
        assert_eq!(lines[0].content(), "  let x = 1;");
    }

    #[test]
    fn test_table_renders_header_rule_and_rows() {
        let lines = render_lines("| Left | Right |\n| :--- | ----: |\n| a | b |", 80, false);
        let table: Vec<&RenderedLine> = lines
            .iter()
            .filter(|l| l.kind() == LineKind::Table)
            .collect();
        assert_eq!(table.len(), 3);
        assert!(table[0].content().contains("Left"));
        assert!(table[1].content().contains('┼'));
        // Right-aligned cell is padded on the left.
        assert!(table[2].content().contains("    b"));
    }

    #[test]
    fn test_image_paragraph_becomes_placeholder() {
        let lines = render_lines("![Markdown](/markdown.svg \"logo\")", 80, false);
        assert_eq!(lines[0].kind(), LineKind::Image);
        assert_eq!(lines[0].content(), "[image: Markdown]");
    }

    #[test]
    fn test_thematic_break_renders_rule() {
        let lines = render_lines("---", 80, false);
        assert_eq!(lines[0].kind(), LineKind::HorizontalRule);
    }

    #[test]
    fn test_heading_has_blank_separator_between_blocks() {
        let lines = render_lines("intro\n\n## Next", 80, false);
        let kinds = kinds(&lines);
        let heading_at = kinds
            .iter()
            .position(|k| *k == LineKind::Heading(2))
            .unwrap();
        assert_eq!(kinds[heading_at - 1], LineKind::Empty);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;
        use unicode_width::UnicodeWidthStr;

        proptest! {
            #[test]
            fn wrapped_rows_respect_width(words in proptest::collection::vec("[a-z]{1,8}", 1..40), width in 10usize..60) {
                let text = words.join(" ");
                let spans = vec![Span::plain(text)];
                for row in wrap_spans(&spans, width, "", "") {
                    let row_text: String = row.iter().map(Span::text).collect();
                    // A single token longer than the width may overflow; our
                    // tokens are capped at 8 chars so rows must fit.
                    prop_assert!(row_text.width() <= width);
                }
            }

            #[test]
            fn wrapping_preserves_words(words in proptest::collection::vec("[a-z]{1,8}", 1..40), width in 10usize..60) {
                let text = words.join(" ");
                let spans = vec![Span::plain(text.clone())];
                let rows = wrap_spans(&spans, width, "", "");
                let rejoined: Vec<String> = rows
                    .iter()
                    .map(|row| row.iter().map(Span::text).collect::<String>())
                    .collect();
                let flattened = rejoined.join(" ");
                let original: Vec<&str> = text.split_whitespace().collect();
                let restored: Vec<&str> = flattened.split_whitespace().collect();
                prop_assert_eq!(original, restored);
            }
        }
    }
}
