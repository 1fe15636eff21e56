//! kaiwa-tui: Terminal chat client
//!
//! This crate provides the terminal layer for kaiwa, including:
//! - Markdown rendering to styled lines (tables, lists, code blocks)
//! - Conversation and input widgets
//! - The chat screen and its event loop

mod app;
pub mod conversation;
mod event;
mod screens;
#[cfg(test)]
pub mod test_utils;
pub mod text;
pub mod theme;
pub mod widgets;

use screens::Screen as _;

pub use app::App;
pub use event::{Action, Event, EventHandler};
pub use kaiwa_engine;

use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use kaiwa_engine::{ChatBackend, ChatError, Config, HttpChatClient};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::screens::chat::ChatScreen;
use crate::theme::Theme;

/// Event loop tick rate (4 Hz).
const TICK_RATE_MS: u64 = 250;

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen, ShowCursor);
    }
}

/// `host:port` label for an endpoint URL.
fn endpoint_label(client: &HttpChatClient) -> String {
    let url = client.endpoint();
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_string(),
        _ => url.to_string(),
    }
}

/// Run the chat TUI.
///
/// Sets up the terminal, runs the event loop, and restores the terminal on
/// exit.
pub async fn run_tui(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let client = HttpChatClient::new(config.endpoint_url()?, config.request_timeout())?;
    info!(endpoint = %client.endpoint(), "starting chat TUI");

    // Setup terminal with RAII guard for cleanup
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(
        Theme::named(config.theme),
        config.locale,
        endpoint_label(&client),
    );
    let mut events = EventHandler::new(TICK_RATE_MS);

    let result = run_loop(&mut terminal, &mut app, &mut events, &client).await;

    // Restore cursor before guard drops
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
    client: &HttpChatClient,
) -> Result<(), Box<dyn std::error::Error>> {
    // At most one request is in flight; the session enforces it.
    let mut chat_handle: Option<JoinHandle<Result<String, ChatError>>> = None;

    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            let max = ChatScreen::max_scroll(app, area);
            app.clamp_scroll(max);
            ChatScreen.render(app, area, frame.buffer_mut());
        })?;

        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => {
                    let action = event::key_to_action(key);
                    if let Some(request) = app.handle_action(action) {
                        let client = client.clone();
                        chat_handle = Some(tokio::spawn(async move { client.send(&request).await }));
                    }
                }
                Event::Paste(text) => app.paste(&text),
                Event::Tick => app.tick(),
                Event::Resize(_, _) => {
                    // Redrawn on the next pass
                }
            }
        }

        // Check for a completed chat request
        if chat_handle.as_ref().is_some_and(JoinHandle::is_finished) {
            if let Some(handle) = chat_handle.take() {
                let outcome = match handle.await {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        warn!(error = %e, "chat task did not complete");
                        Err(ChatError::Aborted)
                    }
                };
                app.complete(outcome);
            }
        }

        if app.should_quit {
            if let Some(handle) = chat_handle.take() {
                handle.abort();
            }
            break;
        }
    }

    Ok(())
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tui_version() {
        let version = tui_version();
        assert!(!version.is_empty());
        assert!(version.starts_with("0."));
    }

    #[test]
    fn test_endpoint_label() {
        let config = Config::default();
        let client =
            HttpChatClient::new(config.endpoint_url().unwrap(), config.request_timeout()).unwrap();
        assert_eq!(endpoint_label(&client), "localhost:8005");
    }
}
