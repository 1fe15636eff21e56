//! Conversation pane widget.
//!
//! Shows every turn in order, a "thinking" indicator while a reply is
//! outstanding, and an invitation when there is nothing to show yet.

use kaiwa_engine::{Conversation, Locale};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::theme::Theme;

use super::message::MessageView;
use super::placeholder::{empty_invitation, pending_indicator};

/// Spinner frames for the pending indicator.
const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Conversation pane widget.
///
/// ```text
/// ┌─────────────────────────────────────┐
/// │You                                  │
/// │  Hello                              │
/// │                                     │
/// │AI                                   │
/// │  Hi there                           │
/// │                                     │
/// │  ⠋ Thinking...                      │
/// └─────────────────────────────────────┘
/// ```
pub struct ConversationView<'a> {
    conversation: &'a Conversation,
    theme: &'a Theme,
    locale: Locale,
    pending: bool,
    tick: usize,
    scroll: usize,
}

impl<'a> ConversationView<'a> {
    /// Create a new conversation view.
    pub fn new(conversation: &'a Conversation, theme: &'a Theme) -> Self {
        Self {
            conversation,
            theme,
            locale: Locale::default(),
            pending: false,
            tick: 0,
            scroll: 0,
        }
    }

    /// Set the interface language.
    #[must_use]
    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Set whether a reply is outstanding.
    #[must_use]
    pub fn pending(mut self, pending: bool) -> Self {
        self.pending = pending;
        self
    }

    /// Set the animation tick.
    #[must_use]
    pub fn tick(mut self, tick: usize) -> Self {
        self.tick = tick;
        self
    }

    /// Set how many lines the view is scrolled up from the bottom.
    #[must_use]
    pub fn scroll(mut self, lines_from_bottom: usize) -> Self {
        self.scroll = lines_from_bottom;
        self
    }

    /// Whether the view shows the invitation instead of turns.
    pub fn is_placeholder(&self) -> bool {
        self.conversation.is_empty() && !self.pending
    }

    fn indicator(&self) -> Line<'static> {
        let frame = SPINNER[self.tick % SPINNER.len()];
        Line::from(Span::styled(
            format!("  {frame} {}", pending_indicator(self.locale)),
            Style::default()
                .fg(self.theme.subtext)
                .add_modifier(Modifier::ITALIC),
        ))
    }

    /// All content lines for `width` columns, top to bottom.
    pub fn content_lines(&self, width: usize) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for (i, turn) in self.conversation.iter().enumerate() {
            if i > 0 {
                lines.push(Line::from(""));
            }
            lines.extend(MessageView::new(turn, self.theme).lines(width));
        }
        if self.pending {
            if !lines.is_empty() {
                lines.push(Line::from(""));
            }
            lines.push(self.indicator());
        }
        lines
    }

    fn render_invitation(&self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let middle = Rect::new(area.x, area.y + area.height / 2, area.width, 1);
        Paragraph::new(Line::from(Span::styled(
            empty_invitation(self.locale),
            Style::default().fg(self.theme.muted),
        )))
        .alignment(Alignment::Center)
        .render(middle, buf);
    }
}

impl Widget for ConversationView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .style(Style::default().bg(self.theme.base));

        let inner = block.inner(area);
        block.render(area, buf);

        if self.is_placeholder() {
            self.render_invitation(inner, buf);
            return;
        }

        let lines = self.content_lines(inner.width as usize);
        let height = inner.height as usize;
        let bottom_start = lines.len().saturating_sub(height);
        let start = bottom_start.saturating_sub(self.scroll);
        let visible: Vec<Line<'static>> = lines.into_iter().skip(start).take(height).collect();

        Paragraph::new(visible).render(inner, buf);
    }
}

/// Largest useful scroll offset for a conversation laid out at `width`
/// and shown `height` lines at a time.
pub fn max_scroll(view: &ConversationView<'_>, width: usize, height: usize) -> usize {
    view.content_lines(width).len().saturating_sub(height)
}
