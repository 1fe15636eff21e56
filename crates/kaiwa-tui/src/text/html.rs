//! Raw HTML passthrough.
//!
//! Assistant replies sometimes embed HTML (`<h2>`, `<hr>`, `<table>`). Known
//! structural tags become render nodes, formatting tags become marks, and
//! every other tag is dropped while its text is kept. Table cells go through
//! [`TableCell`] like markdown cells do.

use std::sync::OnceLock;

use regex::Regex;

use super::node::{Inline, RenderNode, TableRow};
use super::table_cell::{CellDisplay, TableCell};

/// Inline formatting mark a tag maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkTag {
    Strong,
    Emphasis,
    Strikethrough,
    Code,
}

/// Meaning of a single inline HTML tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineTag {
    Break,
    Open(MarkTag),
    Close(MarkTag),
    /// Anything else; rendered as nothing.
    Ignored,
}

fn tag_regex() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| {
        Regex::new(r"(?s)<(/?)([A-Za-z][A-Za-z0-9]*)\b[^>]*>|<!--.*?-->")
            .expect("Invalid regex pattern")
    })
}

fn mark_for(name: &str) -> Option<MarkTag> {
    match name {
        "b" | "strong" => Some(MarkTag::Strong),
        "i" | "em" => Some(MarkTag::Emphasis),
        "s" | "del" | "strike" => Some(MarkTag::Strikethrough),
        "code" | "kbd" => Some(MarkTag::Code),
        _ => None,
    }
}

/// Classify one inline HTML fragment such as `<br>` or `</em>`.
pub fn classify_inline(fragment: &str) -> InlineTag {
    let Some(caps) = tag_regex().captures(fragment.trim()) else {
        return InlineTag::Ignored;
    };
    let Some(name) = caps.get(2).map(|m| m.as_str().to_ascii_lowercase()) else {
        return InlineTag::Ignored;
    };
    let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());

    if name == "br" {
        return InlineTag::Break;
    }
    match (mark_for(&name), closing) {
        (Some(mark), false) => InlineTag::Open(mark),
        (Some(mark), true) => InlineTag::Close(mark),
        (None, _) => InlineTag::Ignored,
    }
}

/// Replace the common character entities.
pub fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// An open `<ul>` or `<ol>`.
struct OpenList {
    ordered: Option<u64>,
    items: Vec<Vec<RenderNode>>,
}

/// An open `<table>`.
#[derive(Default)]
struct OpenTable {
    rows: Vec<TableRow>,
    cells: Vec<CellDisplay>,
    /// `<th>` cells in the open row.
    header_cells: usize,
    in_head: bool,
}

impl OpenTable {
    fn end_row(&mut self) {
        if self.cells.is_empty() {
            return;
        }
        let header = self.in_head || self.header_cells == self.cells.len();
        self.rows.push(TableRow {
            header,
            cells: std::mem::take(&mut self.cells),
        });
        self.header_cells = 0;
    }
}

/// Raw text of an open `<th>` or `<td>`.
struct OpenCell {
    text: String,
    is_header: bool,
}

impl OpenCell {
    fn push_text(&mut self, raw: &str) {
        let decoded = decode_entities(raw);
        if decoded.starts_with(char::is_whitespace) {
            self.text.push(' ');
        }
        self.text
            .push_str(&decoded.split_whitespace().collect::<Vec<_>>().join(" "));
        if decoded.ends_with(char::is_whitespace) {
            self.text.push(' ');
        }
    }

    /// Cell text with each line trimmed and blank lines dropped.
    fn raw_text(&self) -> String {
        self.text
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn ordered_start(tag: &str) -> u64 {
    static START: OnceLock<Regex> = OnceLock::new();
    let re = START.get_or_init(|| {
        Regex::new(r#"(?i)\bstart\s*=\s*["']?(\d+)"#).expect("Invalid regex pattern")
    });
    re.captures(tag)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(1)
}

/// Builds nodes while walking an HTML block.
struct BlockBuilder {
    nodes: Vec<RenderNode>,
    inlines: Vec<Inline>,
    text: String,
    heading: Option<u8>,
    in_paragraph: bool,
    lists: Vec<OpenList>,
    table: Option<OpenTable>,
    cell: Option<OpenCell>,
}

impl BlockBuilder {
    fn new() -> Self {
        Self {
            nodes: Vec::new(),
            inlines: Vec::new(),
            text: String::new(),
            heading: None,
            in_paragraph: false,
            lists: Vec::new(),
            table: None,
            cell: None,
        }
    }

    fn push_text(&mut self, raw: &str) {
        if let Some(cell) = self.cell.as_mut() {
            cell.push_text(raw);
            return;
        }
        let decoded = decode_entities(raw);
        if decoded.starts_with(char::is_whitespace) {
            self.space();
        }
        let mut words = decoded.split_whitespace().peekable();
        while let Some(word) = words.next() {
            self.text.push_str(word);
            if words.peek().is_some() {
                self.text.push(' ');
            }
        }
        if decoded.ends_with(char::is_whitespace) {
            self.space();
        }
    }

    /// Collapse whitespace around tags into a single separating space.
    fn space(&mut self) {
        if !self.text.is_empty() && !self.text.ends_with(' ') {
            self.text.push(' ');
        }
    }

    fn take_text(&mut self) {
        let text = std::mem::take(&mut self.text);
        let trimmed = text.trim_end();
        if !trimmed.is_empty() {
            self.inlines.push(Inline::plain(trimmed));
        }
    }

    fn line_break(&mut self) {
        self.take_text();
        if !self.inlines.is_empty() {
            self.inlines.push(Inline::Break);
        }
    }

    fn flush(&mut self) {
        self.take_text();
        while matches!(self.inlines.last(), Some(Inline::Break)) {
            self.inlines.pop();
        }
        if self.inlines.is_empty() {
            return;
        }
        let content = std::mem::take(&mut self.inlines);
        let node = match self.heading {
            Some(level) => RenderNode::Heading { level, content },
            None if self.in_paragraph => RenderNode::Paragraph(content),
            None => RenderNode::InlineText(content),
        };
        self.emit(node);
    }

    /// Attach a node to the open list item, or to the output.
    fn emit(&mut self, node: RenderNode) {
        match self.lists.last_mut().and_then(|list| list.items.last_mut()) {
            Some(item) => item.push(node),
            None => self.nodes.push(node),
        }
    }

    fn end_cell(&mut self) {
        let Some(cell) = self.cell.take() else { return };
        let table = self.table.get_or_insert_with(OpenTable::default);
        let is_header = cell.is_header || table.in_head;
        if cell.is_header {
            table.header_cells += 1;
        }
        table
            .cells
            .push(TableCell::new(cell.raw_text(), is_header).format());
    }

    fn end_table(&mut self) {
        self.end_cell();
        let Some(mut table) = self.table.take() else { return };
        table.end_row();
        if !table.rows.is_empty() {
            self.emit(RenderNode::Table { rows: table.rows });
        }
    }

    fn end_list(&mut self) {
        self.flush();
        if let Some(list) = self.lists.pop() {
            if !list.items.is_empty() {
                self.emit(RenderNode::List {
                    ordered: list.ordered,
                    items: list.items,
                });
            }
        }
    }

    /// Tags met inside a cell. Returns false when the tag also ends the cell.
    fn cell_tag(&mut self, name: &str, closing: bool) -> bool {
        let Some(cell) = self.cell.as_mut() else {
            return false;
        };
        match name {
            "br" => cell.text.push('\n'),
            "li" if !closing => cell.text.push_str("\n- "),
            "p" | "div" | "li" | "ul" | "ol" => cell.text.push('\n'),
            "th" | "td" | "tr" | "thead" | "tbody" | "tfoot" | "table" => return false,
            _ => {}
        }
        true
    }

    fn tag(&mut self, name: &str, closing: bool, whole: &str) {
        if self.cell_tag(name, closing) {
            return;
        }
        match name {
            "br" => self.line_break(),
            "hr" => {
                self.flush();
                self.emit(RenderNode::HorizontalRule);
            }
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                self.flush();
                self.heading = if closing {
                    None
                } else {
                    name[1..].parse().ok()
                };
            }
            "table" => {
                self.flush();
                self.end_table();
                if !closing {
                    self.table = Some(OpenTable::default());
                }
            }
            "thead" => {
                self.end_cell();
                if let Some(table) = self.table.as_mut() {
                    table.end_row();
                    table.in_head = !closing;
                }
            }
            "tr" | "tbody" | "tfoot" => {
                self.flush();
                self.end_cell();
                if let Some(table) = self.table.as_mut() {
                    table.end_row();
                }
            }
            "th" | "td" => {
                self.flush();
                self.end_cell();
                if !closing {
                    self.cell = Some(OpenCell {
                        text: String::new(),
                        is_header: name == "th",
                    });
                }
            }
            "ul" | "ol" => {
                if closing {
                    self.end_list();
                } else {
                    self.flush();
                    let ordered = (name == "ol").then(|| ordered_start(whole));
                    self.lists.push(OpenList {
                        ordered,
                        items: Vec::new(),
                    });
                }
            }
            "li" => {
                self.flush();
                self.in_paragraph = false;
                if !closing {
                    if let Some(list) = self.lists.last_mut() {
                        list.items.push(Vec::new());
                    }
                }
            }
            "p" | "div" | "section" | "article" => {
                self.flush();
                self.in_paragraph = !closing && name == "p";
            }
            _ => {}
        }
    }

    /// Close whatever the block left open.
    fn finish(mut self) -> Vec<RenderNode> {
        self.flush();
        self.end_table();
        while !self.lists.is_empty() {
            self.end_list();
        }
        self.nodes
    }
}

/// Convert an HTML block into render nodes.
pub fn block_nodes(html: &str) -> Vec<RenderNode> {
    let mut builder = BlockBuilder::new();
    let mut last = 0;

    for caps in tag_regex().captures_iter(html) {
        let Some(whole) = caps.get(0) else { continue };
        builder.push_text(&html[last..whole.start()]);
        last = whole.end();

        // Comments have no name group.
        if let Some(name) = caps.get(2) {
            let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
            builder.tag(&name.as_str().to_ascii_lowercase(), closing, whole.as_str());
        }
    }
    builder.push_text(&html[last..]);
    builder.finish()
}
