//! Structured render nodes produced from markdown.

use super::table_cell::CellDisplay;

/// Inline formatting marks applied to a run of text.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Marks {
    pub strong: bool,
    pub emphasis: bool,
    pub strikethrough: bool,
    pub link: bool,
}

/// A piece of inline content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    /// Text with formatting marks.
    Text { text: String, marks: Marks },
    /// Inline code span.
    Code(String),
    /// Hard line break.
    Break,
}

impl Inline {
    /// Unmarked text.
    pub fn plain(text: impl Into<String>) -> Self {
        Inline::Text {
            text: text.into(),
            marks: Marks::default(),
        }
    }
}

/// One row of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// Whether this is the header row.
    pub header: bool,
    /// Formatted cells, left to right.
    pub cells: Vec<CellDisplay>,
}

/// A block-level element ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderNode {
    Paragraph(Vec<Inline>),
    Heading {
        level: u8,
        content: Vec<Inline>,
    },
    CodeBlock {
        language: Option<String>,
        code: String,
    },
    /// `ordered` holds the start number for numbered lists.
    List {
        ordered: Option<u64>,
        items: Vec<Vec<RenderNode>>,
    },
    Table {
        rows: Vec<TableRow>,
    },
    BlockQuote(Vec<RenderNode>),
    HorizontalRule,
    /// Inline content outside any paragraph (tight list items, stray text).
    InlineText(Vec<Inline>),
}

/// Concatenate the visible text of inline content.
pub fn plain_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    for inline in inlines {
        match inline {
            Inline::Text { text, .. } | Inline::Code(text) => out.push_str(text),
            Inline::Break => out.push('\n'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_flattens_inlines() {
        let inlines = vec![
            Inline::plain("a "),
            Inline::Code("b".into()),
            Inline::Break,
            Inline::Text {
                text: "c".into(),
                marks: Marks {
                    strong: true,
                    ..Marks::default()
                },
            },
        ];
        assert_eq!(plain_text(&inlines), "a b\nc");
    }
}
