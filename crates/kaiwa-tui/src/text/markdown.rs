//! Markdown parsing using pulldown-cmark.
//!
//! Provides [`parse_markdown`] to convert markdown text into [`RenderNode`]s.
//! GitHub tables, strikethrough and task lists are enabled; raw HTML is
//! interpreted by [`super::html`] instead of being shown escaped.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use super::html::{self, InlineTag, MarkTag};
use super::node::{Inline, Marks, RenderNode, TableRow};
use super::table_cell::{CellDisplay, TableCell};

/// Parse markdown text into render nodes.
///
/// Pure: the same input always yields the same nodes. Never fails; input
/// that is not valid markdown comes back as literal text.
pub fn parse_markdown(input: &str) -> Vec<RenderNode> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(input, options);
    let mut builder = NodeBuilder::new();
    for event in parser {
        builder.handle_event(event);
    }
    builder.finish()
}

/// Language tag of a fenced block: the leading word characters of its info
/// string, so `rust,ignore` and `python {.numberLines}` still resolve.
fn fence_language(info: &str) -> Option<String> {
    let word: String = info
        .trim()
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    if word.is_empty() {
        None
    } else {
        Some(word)
    }
}

fn heading_number(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Open block containers.
enum Container {
    BlockQuote(Vec<RenderNode>),
    List {
        ordered: Option<u64>,
        items: Vec<Vec<RenderNode>>,
    },
    Item(Vec<RenderNode>),
    Table {
        rows: Vec<TableRow>,
        cells: Vec<CellDisplay>,
        in_head: bool,
    },
}

impl Container {
    fn nodes_mut(&mut self) -> Option<&mut Vec<RenderNode>> {
        match self {
            Container::BlockQuote(nodes) | Container::Item(nodes) => Some(nodes),
            Container::List { .. } | Container::Table { .. } => None,
        }
    }
}

/// Kind of block the pending inline content belongs to.
#[derive(Clone, Copy)]
enum InlineBlock {
    Paragraph,
    Heading(u8),
}

/// Nesting depth of each inline mark.
#[derive(Default)]
struct MarkDepth {
    strong: usize,
    emphasis: usize,
    strikethrough: usize,
    link: usize,
    code: usize,
}

impl MarkDepth {
    fn marks(&self) -> Marks {
        Marks {
            strong: self.strong > 0,
            emphasis: self.emphasis > 0,
            strikethrough: self.strikethrough > 0,
            link: self.link > 0,
        }
    }

    fn counter(&mut self, tag: MarkTag) -> &mut usize {
        match tag {
            MarkTag::Strong => &mut self.strong,
            MarkTag::Emphasis => &mut self.emphasis,
            MarkTag::Strikethrough => &mut self.strikethrough,
            MarkTag::Code => &mut self.code,
        }
    }
}

/// Internal builder that processes pulldown-cmark events.
struct NodeBuilder {
    /// Top-level output.
    root: Vec<RenderNode>,
    /// Open containers, innermost last.
    stack: Vec<Container>,
    /// Inline content not yet attached to a block.
    inlines: Vec<Inline>,
    /// Block the pending inlines belong to.
    block: Option<InlineBlock>,
    marks: MarkDepth,
    /// Open code block: language and collected text.
    code: Option<(Option<String>, String)>,
    /// Raw text of the open table cell.
    cell: Option<String>,
    /// Collected text of the open HTML block.
    html: Option<String>,
}

impl NodeBuilder {
    fn new() -> Self {
        Self {
            root: Vec::new(),
            stack: Vec::new(),
            inlines: Vec::new(),
            block: None,
            marks: MarkDepth::default(),
            code: None,
            cell: None,
            html: None,
        }
    }

    fn finish(mut self) -> Vec<RenderNode> {
        self.flush_inlines();
        if let Some((language, code)) = self.code.take() {
            self.emit(RenderNode::CodeBlock { language, code });
        }
        while let Some(container) = self.stack.pop() {
            self.close(container);
        }
        self.root
    }

    fn handle_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),

            Event::Text(text) => self.text(&text),
            Event::Code(code) => {
                if let Some(cell) = self.cell.as_mut() {
                    cell.push_str(&code);
                } else {
                    self.inlines.push(Inline::Code(code.to_string()));
                }
            }
            Event::SoftBreak => self.text(" "),
            Event::HardBreak => {
                if let Some(cell) = self.cell.as_mut() {
                    cell.push('\n');
                } else {
                    self.inlines.push(Inline::Break);
                }
            }

            Event::Html(raw) => match self.html.as_mut() {
                Some(html) => html.push_str(&raw),
                None => {
                    for node in html::block_nodes(&raw) {
                        self.emit(node);
                    }
                }
            },
            Event::InlineHtml(raw) => self.inline_html(&raw),

            Event::Rule => {
                self.flush_inlines();
                self.emit(RenderNode::HorizontalRule);
            }
            Event::TaskListMarker(checked) => {
                let checkbox = if checked { "[x] " } else { "[ ] " };
                self.inlines.push(Inline::plain(checkbox));
            }
            Event::FootnoteReference(label) => {
                self.inlines.push(Inline::plain(format!("[{label}]")));
            }
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                self.flush_inlines();
                self.block = Some(InlineBlock::Paragraph);
            }
            Tag::Heading { level, .. } => {
                self.flush_inlines();
                self.block = Some(InlineBlock::Heading(heading_number(level)));
            }
            Tag::BlockQuote => {
                self.flush_inlines();
                self.stack.push(Container::BlockQuote(Vec::new()));
            }
            Tag::CodeBlock(kind) => {
                self.flush_inlines();
                let language = match kind {
                    CodeBlockKind::Fenced(info) => fence_language(&info),
                    CodeBlockKind::Indented => None,
                };
                self.code = Some((language, String::new()));
            }
            Tag::HtmlBlock => {
                self.flush_inlines();
                self.html = Some(String::new());
            }
            Tag::List(start) => {
                self.flush_inlines();
                self.stack.push(Container::List {
                    ordered: start,
                    items: Vec::new(),
                });
            }
            Tag::Item => {
                self.flush_inlines();
                self.stack.push(Container::Item(Vec::new()));
            }
            Tag::Table(_) => {
                self.flush_inlines();
                self.stack.push(Container::Table {
                    rows: Vec::new(),
                    cells: Vec::new(),
                    in_head: false,
                });
            }
            Tag::TableHead => self.begin_row(true),
            Tag::TableRow => self.begin_row(false),
            Tag::TableCell => self.cell = Some(String::new()),

            Tag::Emphasis => self.marks.emphasis += 1,
            Tag::Strong => self.marks.strong += 1,
            Tag::Strikethrough => self.marks.strikethrough += 1,
            Tag::Link { .. } => self.marks.link += 1,

            // Image alt text arrives as plain text events.
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph | TagEnd::Heading(_) => {
                self.flush_inlines();
                self.block = None;
                // Unclosed inline HTML marks end with their block.
                self.marks = MarkDepth::default();
            }
            TagEnd::CodeBlock => {
                if let Some((language, mut code)) = self.code.take() {
                    if code.ends_with('\n') {
                        code.pop();
                    }
                    self.emit(RenderNode::CodeBlock { language, code });
                }
            }
            TagEnd::HtmlBlock => {
                if let Some(raw) = self.html.take() {
                    for node in html::block_nodes(&raw) {
                        self.emit(node);
                    }
                }
            }
            TagEnd::BlockQuote | TagEnd::List(_) | TagEnd::Item | TagEnd::Table => {
                self.flush_inlines();
                self.marks = MarkDepth::default();
                if let Some(container) = self.stack.pop() {
                    self.close(container);
                }
            }
            TagEnd::TableHead | TagEnd::TableRow => self.end_row(),
            TagEnd::TableCell => self.end_cell(),

            TagEnd::Emphasis => self.marks.emphasis = self.marks.emphasis.saturating_sub(1),
            TagEnd::Strong => self.marks.strong = self.marks.strong.saturating_sub(1),
            TagEnd::Strikethrough => {
                self.marks.strikethrough = self.marks.strikethrough.saturating_sub(1);
            }
            TagEnd::Link => self.marks.link = self.marks.link.saturating_sub(1),

            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if let Some((_, code)) = self.code.as_mut() {
            code.push_str(text);
        } else if let Some(cell) = self.cell.as_mut() {
            cell.push_str(text);
        } else if self.marks.code > 0 {
            self.inlines.push(Inline::Code(text.to_string()));
        } else {
            let marks = self.marks.marks();
            // The parser splits text at special characters; rejoin runs.
            if let Some(Inline::Text { text: last, marks: last_marks }) = self.inlines.last_mut() {
                if *last_marks == marks {
                    last.push_str(text);
                    return;
                }
            }
            self.inlines.push(Inline::Text {
                text: text.to_string(),
                marks,
            });
        }
    }

    fn inline_html(&mut self, raw: &str) {
        match html::classify_inline(raw) {
            InlineTag::Break => {
                if let Some(cell) = self.cell.as_mut() {
                    cell.push('\n');
                } else {
                    self.inlines.push(Inline::Break);
                }
            }
            InlineTag::Open(mark) => *self.marks.counter(mark) += 1,
            InlineTag::Close(mark) => {
                let depth = self.marks.counter(mark);
                *depth = depth.saturating_sub(1);
            }
            InlineTag::Ignored => {}
        }
    }

    fn begin_row(&mut self, head: bool) {
        if let Some(Container::Table { cells, in_head, .. }) = self.stack.last_mut() {
            cells.clear();
            *in_head = head;
        }
    }

    fn end_row(&mut self) {
        if let Some(Container::Table {
            rows,
            cells,
            in_head,
        }) = self.stack.last_mut()
        {
            rows.push(TableRow {
                header: *in_head,
                cells: std::mem::take(cells),
            });
            *in_head = false;
        }
    }

    fn end_cell(&mut self) {
        let raw = self.cell.take().unwrap_or_default();
        if let Some(Container::Table { cells, in_head, .. }) = self.stack.last_mut() {
            cells.push(TableCell::new(raw, *in_head).format());
        }
    }

    /// Turn pending inline content into a node for the current block.
    fn flush_inlines(&mut self) {
        while matches!(self.inlines.last(), Some(Inline::Break)) {
            self.inlines.pop();
        }
        if self.inlines.is_empty() {
            return;
        }
        let content = std::mem::take(&mut self.inlines);
        let node = match self.block {
            Some(InlineBlock::Paragraph) => RenderNode::Paragraph(content),
            Some(InlineBlock::Heading(level)) => RenderNode::Heading { level, content },
            None => RenderNode::InlineText(content),
        };
        self.emit(node);
    }

    /// Attach a node to the innermost container that holds blocks.
    fn emit(&mut self, node: RenderNode) {
        match self.stack.iter_mut().rev().find_map(Container::nodes_mut) {
            Some(nodes) => nodes.push(node),
            None => self.root.push(node),
        }
    }

    fn close(&mut self, container: Container) {
        match container {
            Container::BlockQuote(nodes) => self.emit(RenderNode::BlockQuote(nodes)),
            Container::List { ordered, items } => self.emit(RenderNode::List { ordered, items }),
            Container::Item(nodes) => {
                if let Some(Container::List { items, .. }) = self.stack.last_mut() {
                    items.push(nodes);
                } else {
                    for node in nodes {
                        self.emit(node);
                    }
                }
            }
            Container::Table { rows, .. } => self.emit(RenderNode::Table { rows }),
        }
    }
}
