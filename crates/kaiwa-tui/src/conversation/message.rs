//! Rendering of a single conversation turn.

use kaiwa_engine::{Role, Turn};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::text::{render_markdown, wrap_verbatim};
use crate::theme::Theme;

/// Columns the turn body is indented under its role label.
const BODY_INDENT: usize = 2;

/// Renders one turn: a role label followed by its content.
///
/// ```text
/// You
///   What is 2 + 2?
/// AI
///   **4**, rendered as markdown
/// ```
pub struct MessageView<'a> {
    turn: &'a Turn,
    theme: &'a Theme,
}

impl<'a> MessageView<'a> {
    /// Create a view of `turn`.
    pub fn new(turn: &'a Turn, theme: &'a Theme) -> Self {
        Self { turn, theme }
    }

    fn label(&self) -> Line<'static> {
        let color = match self.turn.role() {
            Role::User => self.theme.user,
            Role::Assistant => self.theme.assistant,
        };
        Line::from(Span::styled(
            self.turn.role().label(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
    }

    /// Lay out the turn for `width` columns (`0` disables wrapping).
    pub fn lines(&self, width: usize) -> Vec<Line<'static>> {
        let body_width = if width == 0 {
            0
        } else {
            width.saturating_sub(BODY_INDENT).max(1)
        };

        let body: Vec<Line<'static>> = match self.turn.role() {
            // User text is shown exactly as typed.
            Role::User => wrap_verbatim(self.turn.content(), body_width)
                .into_iter()
                .map(|row| Line::from(Span::styled(row, Style::default().fg(self.theme.text))))
                .collect(),
            Role::Assistant => render_markdown(self.turn.content(), body_width, self.theme),
        };

        let indent = " ".repeat(BODY_INDENT);
        let mut lines = Vec::with_capacity(body.len() + 1);
        lines.push(self.label());
        for line in body {
            let mut spans = vec![Span::raw(indent.clone())];
            spans.extend(line.spans);
            lines.push(Line::from(spans));
        }
        lines
    }
}
