//! Markdown styling configuration.
//!
//! Provides [`MarkdownStyles`] which maps render nodes to ratatui styles.

use ratatui::style::{Modifier, Style};

use crate::theme::Theme;

use super::node::Marks;

/// Styles for rendering markdown elements.
#[derive(Debug, Clone)]
pub struct MarkdownStyles {
    /// H1 header style.
    pub h1: Style,
    /// H2 header style.
    pub h2: Style,
    /// H3+ header style.
    pub h3: Style,
    /// Inline code style.
    pub code: Style,
    /// Code block line style.
    pub code_block: Style,
    /// Language caption above a code block.
    pub code_caption: Style,
    /// Emphasis (italic) style.
    pub emphasis: Style,
    /// Strong (bold) style.
    pub strong: Style,
    /// List marker (bullet/number) style.
    pub list_marker: Style,
    /// Link text style.
    pub link: Style,
    /// Blockquote style.
    pub blockquote: Style,
    /// Normal text style.
    pub text: Style,
    /// Strikethrough style.
    pub strikethrough: Style,
    /// Table grid lines.
    pub table_border: Style,
    /// Header cell text.
    pub table_header: Style,
    /// Horizontal rule.
    pub rule: Style,
}

impl MarkdownStyles {
    /// Create styles from a theme.
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            h1: Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            h2: Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
            h3: Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD),
            code: Style::default()
                .fg(theme.secondary)
                .bg(theme.surface),
            code_block: Style::default()
                .fg(theme.text)
                .bg(theme.overlay),
            code_caption: Style::default()
                .fg(theme.muted)
                .add_modifier(Modifier::ITALIC),
            emphasis: Style::default()
                .add_modifier(Modifier::ITALIC),
            strong: Style::default()
                .add_modifier(Modifier::BOLD),
            list_marker: Style::default()
                .fg(theme.muted),
            link: Style::default()
                .fg(theme.info)
                .add_modifier(Modifier::UNDERLINED),
            blockquote: Style::default()
                .fg(theme.subtext)
                .add_modifier(Modifier::ITALIC),
            text: Style::default()
                .fg(theme.text),
            strikethrough: Style::default()
                .add_modifier(Modifier::CROSSED_OUT),
            table_border: Style::default()
                .fg(theme.border),
            table_header: Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD),
            rule: Style::default()
                .fg(theme.border),
        }
    }

    /// Heading style by level; levels past 3 share the H3 style.
    pub fn heading(&self, level: u8) -> Style {
        match level {
            1 => self.h1,
            2 => self.h2,
            _ => self.h3,
        }
    }

    /// Combine `base` with the styles for a set of marks.
    pub fn marked(&self, base: Style, marks: Marks) -> Style {
        let mut style = base;
        if marks.strong {
            style = style.patch(self.strong);
        }
        if marks.emphasis {
            style = style.patch(self.emphasis);
        }
        if marks.strikethrough {
            style = style.patch(self.strikethrough);
        }
        if marks.link {
            style = style.patch(self.link);
        }
        style
    }
}

impl Default for MarkdownStyles {
    fn default() -> Self {
        Self::from_theme(&Theme::default())
    }
}
