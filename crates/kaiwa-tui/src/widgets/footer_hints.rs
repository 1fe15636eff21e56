//! Footer keybinding hints.
//!
//! Format: `[Enter] send │ [Ctrl+J] newline │ [↑/↓] scroll │ [Esc] quit`

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::Theme;

/// A single keybinding hint.
#[derive(Debug, Clone)]
pub struct KeyHint {
    /// The key or key combination (e.g., "Enter", "Ctrl+J").
    pub key: String,
    /// The action description (e.g., "send", "quit").
    pub action: String,
}

impl KeyHint {
    /// Create a new key hint.
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

/// Footer hints widget.
pub struct FooterHints<'a> {
    hints: &'a [KeyHint],
    theme: &'a Theme,
}

impl<'a> FooterHints<'a> {
    /// Create a new footer hints widget.
    pub fn new(hints: &'a [KeyHint], theme: &'a Theme) -> Self {
        Self { hints, theme }
    }
}

/// Hints for the chat screen.
///
/// While a reply is outstanding sending is unavailable, so its hint is
/// left out.
pub fn chat_hints(pending: bool) -> Vec<KeyHint> {
    let mut hints = Vec::new();
    if !pending {
        hints.push(KeyHint::new("Enter", "send"));
        hints.push(KeyHint::new("Ctrl+J", "newline"));
    }
    hints.push(KeyHint::new("↑/↓", "scroll"));
    hints.push(KeyHint::new("Esc", "quit"));
    hints
}

impl Widget for FooterHints<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();

        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" │ ", Style::default().fg(self.theme.muted)));
            }
            spans.push(Span::styled("[", Style::default().fg(self.theme.muted)));
            spans.push(Span::styled(&hint.key, Style::default().fg(self.theme.primary)));
            spans.push(Span::styled("] ", Style::default().fg(self.theme.muted)));
            spans.push(Span::styled(&hint.action, Style::default().fg(self.theme.subtext)));
        }

        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(self.theme.surface))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;

    #[test]
    fn test_key_hint_creation() {
        let hint = KeyHint::new("Enter", "send");
        assert_eq!(hint.key, "Enter");
        assert_eq!(hint.action, "send");
    }

    #[test]
    fn test_chat_hints_idle() {
        let hints = chat_hints(false);
        assert!(hints.iter().any(|h| h.key == "Enter" && h.action == "send"));
        assert!(hints.iter().any(|h| h.key == "Esc" && h.action == "quit"));
    }

    #[test]
    fn test_chat_hints_pending_hides_send() {
        let hints = chat_hints(true);
        assert!(!hints.iter().any(|h| h.action == "send"));
        assert!(hints.iter().any(|h| h.action == "scroll"));
    }

    #[test]
    fn test_render() {
        let hints = vec![KeyHint::new("Enter", "send"), KeyHint::new("Esc", "quit")];
        let theme = Theme::default();
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        FooterHints::new(&hints, &theme).render(area, &mut buf);
        assert_eq!(buffer_to_string(&buf), "[Enter] send │ [Esc] quit");
    }
}
