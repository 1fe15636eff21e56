//! Application state for the kaiwa TUI.

use kaiwa_engine::{ChatError, ChatRequest, ChatSession, Locale};
use tracing::{debug, info};

use crate::event::Action;
use crate::theme::Theme;
use crate::widgets::TextInputState;

/// Lines moved by PageUp/PageDown.
pub const PAGE_LINES: usize = 10;

/// Main application state.
pub struct App {
    /// Conversation and request state.
    pub session: ChatSession,
    /// Message being typed.
    pub input: TextInputState,
    /// Color theme.
    pub theme: Theme,
    /// Interface language.
    pub locale: Locale,
    /// `host:port` of the chat endpoint, for the title bar.
    pub endpoint_label: String,
    /// Lines the conversation is scrolled up from the bottom.
    pub scroll: usize,
    /// Tick counter for the spinner.
    pub tick_count: usize,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl App {
    /// Create the app with an empty conversation.
    pub fn new(theme: Theme, locale: Locale, endpoint_label: impl Into<String>) -> Self {
        Self {
            session: ChatSession::new(),
            input: TextInputState::new(),
            theme,
            locale,
            endpoint_label: endpoint_label.into(),
            scroll: 0,
            tick_count: 0,
            should_quit: false,
        }
    }

    /// Advance the animation tick.
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
    }

    /// Apply an action.
    ///
    /// Returns the request to issue when the action submitted a message.
    pub fn handle_action(&mut self, action: Action) -> Option<ChatRequest> {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollUp => self.scroll = self.scroll.saturating_add(1),
            Action::ScrollDown => self.scroll = self.scroll.saturating_sub(1),
            Action::PageUp => self.scroll = self.scroll.saturating_add(PAGE_LINES),
            Action::PageDown => self.scroll = self.scroll.saturating_sub(PAGE_LINES),
            Action::None => {}
            // The input is disabled while a reply is outstanding.
            _ if self.session.is_pending() => {}
            Action::Submit => return self.submit(),
            Action::Newline => self.input.insert('\n'),
            Action::Insert(ch) => self.input.insert(ch),
            Action::Backspace => self.input.backspace(),
            Action::Delete => self.input.delete(),
            Action::Left => self.input.move_left(),
            Action::Right => self.input.move_right(),
            Action::Home => self.input.move_home(),
            Action::End => self.input.move_end(),
            Action::HistoryPrev => self.input.history_prev(),
            Action::HistoryNext => self.input.history_next(),
        }
        None
    }

    /// Insert pasted text into the input.
    pub fn paste(&mut self, text: &str) {
        if !self.session.is_pending() {
            // Terminals send CR for line breaks in pastes
            self.input.insert_str(&text.replace("\r\n", "\n").replace('\r', "\n"));
        }
    }

    fn submit(&mut self) -> Option<ChatRequest> {
        let request = self.session.submit(self.input.content())?;
        // Only clear the input once the session took the message.
        self.input.submit();
        self.scroll = 0;
        info!(history = request.history.len(), "message submitted");
        Some(request)
    }

    /// Apply the outcome of the outstanding request.
    pub fn complete(&mut self, outcome: Result<String, ChatError>) {
        debug!(ok = outcome.is_ok(), "chat request finished");
        self.session.complete(outcome);
        self.scroll = 0;
    }

    /// Clamp the scroll offset to `max`.
    pub fn clamp_scroll(&mut self, max: usize) {
        self.scroll = self.scroll.min(max);
    }
}
