//! UI widgets for the TUI.
//!
//! This module provides:
//! - [`StatusBar`] - Top title bar with endpoint and session state
//! - [`InputBar`] - Message entry with placeholder and pending state
//! - [`FooterHints`] - Bottom keybinding hints
//! - [`TextInputState`] - Editable buffer behind the input bar

mod footer_hints;
mod input_bar;
mod status_bar;
mod text_input;

pub use footer_hints::{chat_hints, FooterHints, KeyHint};
pub use input_bar::InputBar;
pub use status_bar::{StatusBar, StatusBarContent, MIN_HEIGHT, MIN_WIDTH};
pub use text_input::TextInputState;
