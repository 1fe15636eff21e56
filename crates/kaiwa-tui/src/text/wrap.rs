//! Text wrapping utilities for ratatui Lines.
//!
//! Widths are measured in terminal columns (via `unicode-width`), so wide
//! CJK characters count double.

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Columns used to expand a tab character.
const TAB_WIDTH: usize = 4;

/// Display width of a string in terminal columns.
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(0)
}

/// Wrap plain text at word boundaries.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }
    textwrap::wrap(text, width)
        .into_iter()
        .map(std::borrow::Cow::into_owned)
        .collect()
}

/// Wrap text without touching its whitespace.
///
/// Each source line is kept as-is and only split where it exceeds `width`.
/// Tabs are expanded to spaces so columns line up in the terminal.
pub fn wrap_verbatim(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    for line in text.split('\n') {
        let line = line.replace('\t', &" ".repeat(TAB_WIDTH));
        if width == 0 || display_width(&line) <= width {
            out.push(line);
            continue;
        }
        let mut chunk = String::new();
        let mut used = 0;
        for ch in line.chars() {
            let w = char_width(ch);
            if used + w > width && !chunk.is_empty() {
                out.push(std::mem::take(&mut chunk));
                used = 0;
            }
            chunk.push(ch);
            used += w;
        }
        out.push(chunk);
    }
    out
}

/// Greedy line builder used by [`wrap_line`].
struct LineFiller {
    width: usize,
    hang: usize,
    done: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    used: usize,
    /// Columns occupied before any content on the current line.
    start: usize,
}

impl LineFiller {
    fn new(width: usize, hang: usize) -> Self {
        Self {
            width,
            hang,
            done: Vec::new(),
            spans: Vec::new(),
            used: 0,
            start: 0,
        }
    }

    fn push(&mut self, text: &str, style: Style) {
        self.used += display_width(text);
        if let Some(last) = self.spans.last_mut() {
            if last.style == style {
                last.content.to_mut().push_str(text);
                return;
            }
        }
        self.spans.push(Span::styled(text.to_string(), style));
    }

    fn break_line(&mut self) {
        let spans = std::mem::take(&mut self.spans);
        self.done.push(Line::from(spans));
        self.used = 0;
        if self.hang > 0 {
            self.spans.push(Span::raw(" ".repeat(self.hang)));
            self.used = self.hang;
        }
        self.start = self.used;
    }

    fn at_line_start(&self) -> bool {
        self.used == self.start
    }

    fn space(&mut self, text: &str, style: Style) {
        // Whitespace at a wrap point is dropped.
        if !self.done.is_empty() && self.at_line_start() {
            return;
        }
        if self.used + display_width(text) <= self.width {
            self.push(text, style);
        } else {
            self.break_line();
        }
    }

    fn word(&mut self, text: &str, style: Style) {
        let w = display_width(text);
        if self.used + w <= self.width {
            self.push(text, style);
            return;
        }
        if !self.at_line_start() && self.hang + w <= self.width {
            self.break_line();
            self.push(text, style);
            return;
        }
        // Too long for any line: split by character.
        let mut buf = [0u8; 4];
        for ch in text.chars() {
            if self.used + char_width(ch) > self.width && !self.at_line_start() {
                self.break_line();
            }
            self.push(ch.encode_utf8(&mut buf), style);
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        if !self.spans.is_empty() || self.done.is_empty() {
            let spans = std::mem::take(&mut self.spans);
            self.done.push(Line::from(spans));
        }
        self.done
    }
}

/// Wrap a single styled line at word boundaries.
///
/// Continuation lines start with `hang` spaces, which keeps list items and
/// quotes aligned under their first line. Styling is preserved.
pub fn wrap_line(line: Line<'static>, width: usize, hang: usize) -> Vec<Line<'static>> {
    let total: usize = line.spans.iter().map(|s| display_width(&s.content)).sum();
    if width == 0 || total <= width {
        return vec![line];
    }

    let hang = if hang >= width { 0 } else { hang };
    let mut filler = LineFiller::new(width, hang);

    for span in &line.spans {
        let style = line.style.patch(span.style);
        let mut token = String::new();
        let mut token_is_space = false;

        for ch in span.content.chars() {
            let is_space = ch.is_whitespace();
            if !token.is_empty() && is_space != token_is_space {
                if token_is_space {
                    filler.space(&token, style);
                } else {
                    filler.word(&token, style);
                }
                token.clear();
            }
            token_is_space = is_space;
            token.push(ch);
        }
        if !token.is_empty() {
            if token_is_space {
                filler.space(&token, style);
            } else {
                filler.word(&token, style);
            }
        }
    }

    filler.finish()
}
