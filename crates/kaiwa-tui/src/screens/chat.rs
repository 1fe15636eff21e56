//! The chat screen.
//!
//! ```text
//! ● AI Chat │ localhost:8005 │ Ready
//! ┌──────────────────────────────────┐
//! │ conversation                     │
//! └──────────────────────────────────┘
//! ┌──────────────────────────────────┐
//! │> input                           │
//! └──────────────────────────────────┘
//! [Enter] send │ [Ctrl+J] newline │ ...
//! ```

use kaiwa_engine::SessionState;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    widgets::Widget,
};

use super::Screen;
use crate::app::App;
use crate::conversation::{max_scroll, screen_title, ConversationView};
use crate::widgets::{
    chat_hints, FooterHints, InputBar, StatusBar, StatusBarContent, MIN_HEIGHT, MIN_WIDTH,
};

/// Most input lines shown before the bar scrolls.
const MAX_INPUT_LINES: usize = 4;

/// Chat screen: title, conversation, input and hints.
pub struct ChatScreen;

#[allow(clippy::cast_possible_truncation)]
fn input_height(app: &App) -> u16 {
    let lines = if app.session.is_pending() {
        1
    } else {
        app.input.content().split('\n').count()
    };
    lines.clamp(1, MAX_INPUT_LINES) as u16 + 2
}

/// Split `area` into title, conversation, input and footer rows.
fn layout(app: &App, area: Rect) -> [Rect; 4] {
    Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(input_height(app)),
        Constraint::Length(1),
    ])
    .areas(area)
}

fn conversation_view(app: &App) -> ConversationView<'_> {
    ConversationView::new(app.session.conversation(), &app.theme)
        .locale(app.locale)
        .pending(app.session.is_pending())
        .tick(app.tick_count)
        .scroll(app.scroll)
}

fn state_label(state: SessionState) -> &'static str {
    match state {
        SessionState::Idle => "Ready",
        SessionState::AwaitingResponse => "Waiting",
    }
}

impl ChatScreen {
    /// Largest scroll offset that still shows content in `area`.
    pub fn max_scroll(app: &App, area: Rect) -> usize {
        let [_, conversation, _, _] = layout(app, area);
        // Inside the pane border.
        let width = conversation.width.saturating_sub(2) as usize;
        let height = conversation.height.saturating_sub(2) as usize;
        max_scroll(&conversation_view(app), width, height)
    }
}

impl Screen for ChatScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
            let content = StatusBarContent::too_small();
            StatusBar::new(&content, &app.theme).render(area, buf);
            return;
        }

        let [title, conversation, input, footer] = layout(app, area);

        let status = StatusBarContent {
            title: screen_title(app.locale).to_string(),
            endpoint: Some(app.endpoint_label.clone()),
            state: Some(state_label(app.session.state()).to_string()),
        };
        StatusBar::new(&status, &app.theme).render(title, buf);

        conversation_view(app).render(conversation, buf);

        InputBar::new(&app.input, &app.theme)
            .focused(true)
            .locale(app.locale)
            .pending(app.session.is_pending())
            .render(input, buf);

        let hints = chat_hints(app.session.is_pending());
        FooterHints::new(&hints, &app.theme).render(footer, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Action;
    use crate::test_utils::{render_screen_to_string, render_screen_to_string_sized};
    use crate::theme::Theme;
    use kaiwa_engine::Locale;

    fn app(locale: Locale) -> App {
        App::new(Theme::default(), locale, "localhost:8005")
    }

    fn send(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_action(Action::Insert(ch));
        }
        app.handle_action(Action::Submit);
    }

    #[test]
    fn test_empty_screen_japanese() {
        let screen = render_screen_to_string(&ChatScreen, &app(Locale::Ja));
        assert!(screen.contains("AI Chat"));
        assert!(screen.contains("こんにちは、お手伝いできることはありますか？"));
        assert!(screen.contains("メッセージを入力..."));
        assert!(screen.contains("Ready"));
    }

    #[test]
    fn test_pending_screen() {
        let mut app = app(Locale::En);
        send(&mut app, "What is Rust?");
        let screen = render_screen_to_string(&ChatScreen, &app);
        assert!(screen.contains("What is Rust?"));
        assert!(screen.contains("Thinking..."));
        assert!(screen.contains("Sending..."));
        assert!(screen.contains("Waiting"));
        assert!(!screen.contains("[Enter] send"));
    }

    #[test]
    fn test_reply_rendered_as_markdown() {
        let mut app = app(Locale::En);
        send(&mut app, "list please");
        app.complete(Ok("**Items**\n\n- one\n- two".into()));
        let screen = render_screen_to_string(&ChatScreen, &app);
        assert!(screen.contains("• one"));
        assert!(screen.contains("Items"));
        assert!(!screen.contains("**Items**"));
        assert!(!screen.contains("Thinking..."));
    }

    #[test]
    fn test_too_small() {
        let screen = render_screen_to_string_sized(&ChatScreen, &app(Locale::En), 20, 5);
        assert!(screen.contains("too small"));
    }

    #[test]
    fn test_max_scroll_grows_with_content() {
        let mut app = app(Locale::En);
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(ChatScreen::max_scroll(&app, area), 0);

        for i in 0..20 {
            send(&mut app, &format!("message {i}"));
            app.complete(Ok("ok".into()));
        }
        assert!(ChatScreen::max_scroll(&app, area) > 0);
    }

    #[test]
    fn test_multiline_input_grows_bar() {
        let mut app = app(Locale::En);
        app.handle_action(Action::Insert('a'));
        let one = input_height(&app);
        app.handle_action(Action::Newline);
        app.handle_action(Action::Insert('b'));
        assert_eq!(input_height(&app), one + 1);
    }
}
