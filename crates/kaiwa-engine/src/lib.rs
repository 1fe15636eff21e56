//! kaiwa-engine: Headless core for the kaiwa chat client
//!
//! This crate provides everything that does not touch the terminal:
//! - Conversation model (turns, roles, wire shapes)
//! - The chat session state machine
//! - The HTTP transport to the chat endpoint
//! - Configuration loading

pub mod chat;
pub mod client;
pub mod config;
pub mod session;

// Re-export commonly used types
pub use chat::{ChatReply, ChatRequest, Conversation, Role, Turn};
pub use client::{ChatBackend, ChatError, HealthStatus, HttpChatClient};
pub use config::{Config, ConfigError, Locale, ThemeName, ENDPOINT_ENV};
pub use session::{ChatSession, SessionState, FALLBACK_REPLY};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_version() {
        let version = engine_version();
        assert!(!version.is_empty());
        assert!(version.starts_with("0."));
    }
}
