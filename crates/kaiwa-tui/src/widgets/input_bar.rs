//! Full-width input bar widget.
//!
//! Always visible at the bottom of the screen for text entry.
//! Supports multi-line input with Ctrl+J for newlines.

use kaiwa_engine::Locale;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::conversation::input_placeholder;
use crate::theme::Theme;

use super::TextInputState;

/// Prompt shown before the first input line.
const PROMPT: &str = "> ";
/// Indent for continuation lines, aligned with the prompt.
const CONTINUATION: &str = "  ";

/// Full-width input bar for text entry.
pub struct InputBar<'a> {
    input: &'a TextInputState,
    theme: &'a Theme,
    locale: Locale,
    focused: bool,
    pending: bool,
}

impl<'a> InputBar<'a> {
    /// Create a new input bar widget.
    pub fn new(input: &'a TextInputState, theme: &'a Theme) -> Self {
        Self {
            input,
            theme,
            locale: Locale::default(),
            focused: false,
            pending: false,
        }
    }

    /// Set whether the input bar is focused.
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Set the interface language.
    #[must_use]
    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Disable the bar while a reply is outstanding.
    #[must_use]
    pub fn pending(mut self, pending: bool) -> Self {
        self.pending = pending;
        self
    }

    fn placeholder_line(&self) -> Line<'static> {
        let mut spans = vec![Span::raw(PROMPT)];
        if self.focused && !self.pending {
            spans.push(Span::raw("█"));
        }
        spans.push(Span::styled(
            input_placeholder(self.locale, self.pending),
            Style::default()
                .fg(self.theme.muted)
                .add_modifier(Modifier::ITALIC),
        ));
        Line::from(spans)
    }

    /// Build Lines for multi-line input display.
    /// Returns the lines to display and which line index contains the cursor.
    fn build_input_lines(&self) -> (Vec<Line<'static>>, usize) {
        let content = self.input.content();
        let cursor_pos = self.input.cursor();
        let text_lines: Vec<&str> = content.split('\n').collect();

        // Locate the cursor as (line, column) in characters.
        let mut cursor_line = 0;
        let mut cursor_col = 0;
        let mut consumed = 0;
        for (line_idx, line) in text_lines.iter().enumerate() {
            let line_len = line.chars().count();
            cursor_line = line_idx;
            if cursor_pos <= consumed + line_len {
                cursor_col = cursor_pos - consumed;
                break;
            }
            consumed += line_len + 1;
        }

        let lines = text_lines
            .iter()
            .enumerate()
            .map(|(line_idx, line_text)| {
                let prefix = if line_idx == 0 { PROMPT } else { CONTINUATION };
                if !(self.focused && line_idx == cursor_line) {
                    return Line::from(format!("{prefix}{line_text}"));
                }
                let before: String = line_text.chars().take(cursor_col).collect();
                let after: String = line_text.chars().skip(cursor_col).collect();
                Line::from(vec![
                    Span::raw(prefix),
                    Span::raw(before),
                    Span::raw("█"),
                    Span::raw(after),
                ])
            })
            .collect();

        (lines, cursor_line)
    }
}

#[allow(clippy::cast_possible_truncation)]
impl Widget for InputBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused && !self.pending {
            Style::default().fg(self.theme.border_focused)
        } else {
            Style::default().fg(self.theme.border)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner_height = area.height.saturating_sub(2) as usize;

        // While pending the draft stays in the buffer but is not shown.
        let paragraph = if self.pending || self.input.is_empty() {
            Paragraph::new(self.placeholder_line())
                .block(block)
                .style(Style::default().fg(self.theme.text))
        } else {
            let (lines, cursor_line) = self.build_input_lines();

            // Keep the cursor line visible.
            let scroll_offset = if lines.len() <= inner_height {
                0
            } else {
                cursor_line.saturating_sub(inner_height.saturating_sub(1))
            };

            Paragraph::new(lines)
                .block(block)
                .style(Style::default().fg(self.theme.text))
                .scroll((scroll_offset as u16, 0))
        };

        paragraph.render(area, buf);
    }
}
