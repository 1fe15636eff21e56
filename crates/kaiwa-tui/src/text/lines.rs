//! Layout of render nodes as styled terminal lines.
//!
//! Provides [`render_markdown`] (parse + lay out) and [`render_nodes`].
//! Blocks are separated by a blank line; list items are stacked tightly.

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::theme::Theme;

use super::markdown::parse_markdown;
use super::node::{Inline, RenderNode, TableRow};
use super::styles::MarkdownStyles;
use super::table_cell::CellDisplay;
use super::wrap::{display_width, wrap_line, wrap_text, wrap_verbatim};

/// Width used for rules when no width is known.
const DEFAULT_RULE_WIDTH: usize = 40;

/// Narrowest a table column is squeezed to.
const MIN_COLUMN_WIDTH: usize = 3;

/// Render markdown text to styled ratatui Lines.
///
/// `width` is the available width in columns; `0` disables wrapping.
pub fn render_markdown(input: &str, width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let styles = MarkdownStyles::from_theme(theme);
    render_nodes(&parse_markdown(input), width, &styles)
}

/// Lay out render nodes as lines.
pub fn render_nodes(nodes: &[RenderNode], width: usize, styles: &MarkdownStyles) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        lines.extend(render_node(node, width, styles));
    }
    lines
}

/// Flatten lines to plain text, one line per row.
pub fn lines_to_string(lines: &[Line<'_>]) -> String {
    lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|s| s.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn narrow(width: usize, by: usize) -> usize {
    if width == 0 {
        0
    } else {
        width.saturating_sub(by).max(1)
    }
}

fn render_node(node: &RenderNode, width: usize, styles: &MarkdownStyles) -> Vec<Line<'static>> {
    match node {
        RenderNode::Paragraph(inlines) | RenderNode::InlineText(inlines) => {
            inline_lines(inlines, styles.text, width, styles)
        }
        RenderNode::Heading { level, content } => {
            inline_lines(content, styles.heading(*level), width, styles)
        }
        RenderNode::CodeBlock { language, code } => code_lines(language.as_deref(), code, width, styles),
        RenderNode::List { ordered, items } => list_lines(*ordered, items, width, styles),
        RenderNode::Table { rows } => table_lines(rows, width, styles),
        RenderNode::BlockQuote(children) => {
            let inner = render_nodes(children, narrow(width, 2), styles);
            prefix_lines(
                inner,
                Span::styled("│ ", styles.blockquote),
                Span::styled("│ ", styles.blockquote),
            )
        }
        RenderNode::HorizontalRule => {
            let len = if width == 0 { DEFAULT_RULE_WIDTH } else { width };
            vec![Line::from(Span::styled("─".repeat(len), styles.rule))]
        }
    }
}

/// Convert inline content to lines, splitting at hard breaks.
fn inline_lines(inlines: &[Inline], base: Style, width: usize, styles: &MarkdownStyles) -> Vec<Line<'static>> {
    let mut rows: Vec<Vec<Span<'static>>> = vec![Vec::new()];
    for inline in inlines {
        match inline {
            Inline::Text { text, marks } => {
                if let Some(row) = rows.last_mut() {
                    row.push(Span::styled(text.clone(), styles.marked(base, *marks)));
                }
            }
            Inline::Code(code) => {
                if let Some(row) = rows.last_mut() {
                    row.push(Span::styled(format!("`{code}`"), styles.code));
                }
            }
            Inline::Break => rows.push(Vec::new()),
        }
    }

    rows.into_iter()
        .flat_map(|spans| wrap_line(Line::from(spans), width, 0))
        .collect()
}

fn code_lines(language: Option<&str>, code: &str, width: usize, styles: &MarkdownStyles) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if let Some(language) = language {
        lines.push(Line::from(Span::styled(
            format!("  {language}"),
            styles.code_caption,
        )));
    }
    for row in wrap_verbatim(code, narrow(width, 2)) {
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(row, styles.code_block),
        ]));
    }
    lines
}

fn list_lines(
    ordered: Option<u64>,
    items: &[Vec<RenderNode>],
    width: usize,
    styles: &MarkdownStyles,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, item) in items.iter().enumerate() {
        let marker = match ordered {
            Some(start) => format!("{}. ", start + i as u64),
            None => "• ".to_string(),
        };
        let marker_width = display_width(&marker);

        let mut body: Vec<Line<'static>> = Vec::new();
        for node in item {
            // Loose items keep a gap between their paragraphs.
            if !body.is_empty() && matches!(node, RenderNode::Paragraph(_)) {
                body.push(Line::from(""));
            }
            body.extend(render_node(node, narrow(width, marker_width), styles));
        }
        if body.is_empty() {
            body.push(Line::from(""));
        }

        lines.extend(prefix_lines(
            body,
            Span::styled(marker, styles.list_marker),
            Span::raw(" ".repeat(marker_width)),
        ));
    }
    lines
}

/// Prefix the first line with `first` and the rest with `rest`.
fn prefix_lines(lines: Vec<Line<'static>>, first: Span<'static>, rest: Span<'static>) -> Vec<Line<'static>> {
    lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            let prefix = if i == 0 { first.clone() } else { rest.clone() };
            let mut spans = vec![prefix];
            spans.extend(line.spans);
            Line::from(spans)
        })
        .collect()
}

/// Text rows of one cell at a given column width.
fn cell_rows(cell: &CellDisplay, width: usize) -> Vec<String> {
    match cell {
        CellDisplay::Plain(text) => text
            .split('\n')
            .flat_map(|line| wrap_text(line, width))
            .collect(),
        CellDisplay::List(items) => items
            .iter()
            .flat_map(|item| {
                wrap_text(item, width.saturating_sub(2).max(1))
                    .into_iter()
                    .enumerate()
                    .map(|(i, row)| if i == 0 { format!("• {row}") } else { format!("  {row}") })
                    .collect::<Vec<_>>()
            })
            .collect(),
    }
}

fn cell_natural_width(cell: &CellDisplay) -> usize {
    match cell {
        CellDisplay::Plain(text) => text.split('\n').map(display_width).max().unwrap_or(0),
        CellDisplay::List(items) => items.iter().map(|i| display_width(i) + 2).max().unwrap_or(0),
    }
}

/// Column widths that fit within `width` (grid characters included).
fn column_widths(rows: &[TableRow], width: usize) -> Vec<usize> {
    let columns = rows.iter().map(|r| r.cells.len()).max().unwrap_or(0);
    let mut widths = vec![1; columns];
    for row in rows {
        for (i, cell) in row.cells.iter().enumerate() {
            widths[i] = widths[i].max(cell_natural_width(cell));
        }
    }
    if width == 0 || columns == 0 {
        return widths;
    }

    // Each column costs its width plus a separator and two padding spaces.
    let chrome = columns * 3 + 1;
    let budget = width.saturating_sub(chrome).max(columns * MIN_COLUMN_WIDTH);
    while widths.iter().sum::<usize>() > budget {
        let Some((widest, _)) = widths.iter().enumerate().max_by_key(|(_, w)| **w) else {
            break;
        };
        if widths[widest] <= MIN_COLUMN_WIDTH {
            break;
        }
        widths[widest] -= 1;
    }
    widths
}

fn border_line(widths: &[usize], left: &str, mid: &str, right: &str, style: Style) -> Line<'static> {
    let inner: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    Line::from(Span::styled(format!("{left}{}{right}", inner.join(mid)), style))
}

fn table_lines(rows: &[TableRow], width: usize, styles: &MarkdownStyles) -> Vec<Line<'static>> {
    let widths = column_widths(rows, width);
    if widths.is_empty() {
        return Vec::new();
    }

    let mut lines = vec![border_line(&widths, "┌", "┬", "┐", styles.table_border)];
    for (r, row) in rows.iter().enumerate() {
        if r > 0 {
            lines.push(border_line(&widths, "├", "┼", "┤", styles.table_border));
        }
        let text_style = if row.header { styles.table_header } else { styles.text };
        let cells: Vec<Vec<String>> = widths
            .iter()
            .enumerate()
            .map(|(i, w)| row.cells.get(i).map(|c| cell_rows(c, *w)).unwrap_or_default())
            .collect();
        let height = cells.iter().map(Vec::len).max().unwrap_or(0).max(1);

        for k in 0..height {
            let mut spans = vec![Span::styled("│", styles.table_border)];
            for (i, w) in widths.iter().enumerate() {
                let text = cells[i].get(k).map(String::as_str).unwrap_or("");
                let pad = w.saturating_sub(display_width(text));
                spans.push(Span::styled(format!(" {text}{} ", " ".repeat(pad)), text_style));
                spans.push(Span::styled("│", styles.table_border));
            }
            lines.push(Line::from(spans));
        }
    }
    lines.push(border_line(&widths, "└", "┴", "┘", styles.table_border));
    lines
}
