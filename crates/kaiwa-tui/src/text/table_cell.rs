//! Table cell formatting.
//!
//! Cells whose text contains bullet-marked lines are shown as a bulleted
//! list inside the cell; everything else is shown as written.

/// A table cell before formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCell {
    /// Whether the cell belongs to the header row.
    pub is_header: bool,
    /// Cell text as written in the source.
    pub raw_text: String,
}

/// How a cell is displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellDisplay {
    /// Text shown unchanged.
    Plain(String),
    /// Bulleted items, in source order.
    List(Vec<String>),
}

impl TableCell {
    /// Create a cell.
    pub fn new(raw_text: impl Into<String>, is_header: bool) -> Self {
        Self {
            is_header,
            raw_text: raw_text.into(),
        }
    }

    /// Resolve the display form of this cell.
    pub fn format(&self) -> CellDisplay {
        format_cell(&self.raw_text)
    }
}

fn is_marker_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('-') || trimmed.starts_with('*')
}

/// Format raw cell text.
///
/// Lines whose trimmed form starts with `-` or `*` become list items with the
/// leading run of whitespace and markers removed. Without such lines the text
/// is returned unchanged.
pub fn format_cell(raw: &str) -> CellDisplay {
    if raw.lines().any(is_marker_line) {
        let items: Vec<String> = raw
            .split('\n')
            .filter(|line| is_marker_line(line))
            .map(|line| {
                line.trim_start_matches(|c: char| c.is_whitespace() || c == '-' || c == '*')
                    .trim()
                    .to_string()
            })
            .collect();

        if !items.is_empty() {
            return CellDisplay::List(items);
        }
    }

    CellDisplay::Plain(raw.to_string())
}
