//! Title bar widget for the top of the TUI.
//!
//! Format: `● AI Chat │ localhost:8005 │ Waiting`

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::Theme;

/// Title bar content.
#[derive(Debug, Clone, Default)]
pub struct StatusBarContent {
    /// Screen title.
    pub title: String,
    /// Host the chat endpoint lives on.
    pub endpoint: Option<String>,
    /// Short session state label.
    pub state: Option<String>,
}

impl StatusBarContent {
    /// Create a "terminal too small" warning.
    pub fn too_small() -> Self {
        Self {
            title: "Terminal too small".into(),
            endpoint: None,
            state: Some(format!("Resize to at least {MIN_WIDTH}x{MIN_HEIGHT}")),
        }
    }
}

/// Smallest terminal width the chat screen lays out in.
pub const MIN_WIDTH: u16 = 30;
/// Smallest terminal height the chat screen lays out in.
pub const MIN_HEIGHT: u16 = 8;

/// Title bar widget.
pub struct StatusBar<'a> {
    content: &'a StatusBarContent,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    /// Create a new status bar widget.
    pub fn new(content: &'a StatusBarContent, theme: &'a Theme) -> Self {
        Self { content, theme }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let separator = Span::styled(" │ ", Style::default().fg(self.theme.muted));
        let mut spans = vec![
            Span::styled("● ", Style::default().fg(self.theme.primary)),
            Span::styled(
                self.content.title.as_str(),
                Style::default()
                    .fg(self.theme.text)
                    .add_modifier(Modifier::BOLD),
            ),
        ];

        if let Some(ref endpoint) = self.content.endpoint {
            spans.push(separator.clone());
            spans.push(Span::styled(endpoint, Style::default().fg(self.theme.subtext)));
        }

        if let Some(ref state) = self.content.state {
            spans.push(separator);
            spans.push(Span::styled(state, Style::default().fg(self.theme.info)));
        }

        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(self.theme.surface))
            .render(area, buf);
    }
}
