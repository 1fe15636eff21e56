//! Chat session state machine.
//!
//! A [`ChatSession`] owns the [`Conversation`] and allows at most one
//! outstanding request. The caller issues the request returned by
//! [`ChatSession::submit`] and hands the outcome back through
//! [`ChatSession::complete`].

use tracing::{debug, warn};

use crate::chat::{ChatRequest, Conversation, Turn};
use crate::client::{ChatBackend, ChatError};

/// Assistant text appended when a request fails for any reason.
pub const FALLBACK_REPLY: &str = "Error: Could not get response from agent.";

/// Session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No request outstanding; input is accepted.
    #[default]
    Idle,
    /// One request is outstanding; input is rejected.
    AwaitingResponse,
}

/// Owns the conversation and guards the single in-flight request.
#[derive(Debug, Default)]
pub struct ChatSession {
    conversation: Conversation,
    state: SessionState,
}

impl ChatSession {
    /// Create an idle session with an empty conversation.
    pub fn new() -> Self {
        Self::default()
    }

    /// The conversation so far.
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether a request is outstanding.
    pub fn is_pending(&self) -> bool {
        self.state == SessionState::AwaitingResponse
    }

    /// Whether `text` would be accepted by [`submit`](Self::submit) right now.
    pub fn accepts(&self, text: &str) -> bool {
        self.state == SessionState::Idle && !text.trim().is_empty()
    }

    /// Record a user message and return the request to issue.
    ///
    /// Returns `None` (and changes nothing) while awaiting a response or when
    /// `text` is blank. The request's history is the conversation as it was
    /// before this message.
    pub fn submit(&mut self, text: &str) -> Option<ChatRequest> {
        if !self.accepts(text) {
            debug!(state = ?self.state, "submission rejected");
            return None;
        }

        let request = ChatRequest {
            message: text.to_string(),
            history: self.conversation.turns().to_vec(),
        };
        self.conversation.push(Turn::user(text));
        self.state = SessionState::AwaitingResponse;
        debug!(turns = self.conversation.len(), "awaiting response");

        Some(request)
    }

    /// Apply the outcome of the outstanding request.
    ///
    /// Failures of any kind become [`FALLBACK_REPLY`]. An outcome arriving
    /// while idle is dropped.
    pub fn complete(&mut self, outcome: Result<String, ChatError>) {
        if self.state != SessionState::AwaitingResponse {
            warn!("chat completion received with no request outstanding");
            return;
        }

        let content = match outcome {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "chat request failed");
                FALLBACK_REPLY.to_string()
            }
        };
        self.conversation.push(Turn::assistant(content));
        self.state = SessionState::Idle;
        debug!(turns = self.conversation.len(), "idle");
    }

    /// Submit `text`, wait for `backend`, and apply the outcome.
    ///
    /// Returns the new assistant turn, or `None` if the submission was rejected.
    pub async fn exchange<B: ChatBackend>(&mut self, backend: &B, text: &str) -> Option<&Turn> {
        let request = self.submit(text)?;
        let outcome = backend.send(&request).await;
        self.complete(outcome);
        self.conversation.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::Role;
    use reqwest::StatusCode;
    use std::future::Future;
    use std::sync::Mutex;

    /// Backend returning canned outcomes and recording requests.
    struct ScriptedBackend {
        reply: Option<String>,
        seen: Mutex<Vec<ChatRequest>>,
    }

    impl ScriptedBackend {
        fn replying(text: &str) -> Self {
            Self {
                reply: Some(text.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: None,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl ChatBackend for ScriptedBackend {
        fn send(
            &self,
            request: &ChatRequest,
        ) -> impl Future<Output = Result<String, ChatError>> + Send {
            self.seen.lock().unwrap().push(request.clone());
            let outcome = self
                .reply
                .clone()
                .ok_or(ChatError::Status(StatusCode::BAD_GATEWAY));
            async move { outcome }
        }
    }

    #[test]
    fn test_initial_state() {
        let session = ChatSession::new();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.conversation().is_empty());
        assert!(!session.is_pending());
    }

    #[test]
    fn test_submit_from_empty_conversation() {
        let mut session = ChatSession::new();
        let request = session.submit("Hello").expect("request issued");

        assert_eq!(request.message, "Hello");
        assert!(request.history.is_empty());
        assert_eq!(session.conversation().turns(), &[Turn::user("Hello")]);
        assert_eq!(session.state(), SessionState::AwaitingResponse);
    }

    #[test]
    fn test_success_appends_assistant_turn() {
        let mut session = ChatSession::new();
        session.submit("Hello");
        session.complete(Ok("Hi there".into()));

        assert_eq!(
            session.conversation().turns(),
            &[Turn::user("Hello"), Turn::assistant("Hi there")]
        );
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn test_failure_appends_fallback() {
        let mut session = ChatSession::new();
        session.submit("Hello");
        session.complete(Err(ChatError::InvalidUrl("nope".into())));

        assert_eq!(
            session.conversation().turns(),
            &[
                Turn::user("Hello"),
                Turn::assistant("Error: Could not get response from agent.")
            ]
        );
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn test_submit_while_awaiting_is_noop() {
        let mut session = ChatSession::new();
        session.submit("first");

        assert!(session.submit("second").is_none());
        assert_eq!(session.conversation().len(), 1);
        assert_eq!(session.state(), SessionState::AwaitingResponse);
    }

    #[test]
    fn test_blank_submission_is_noop() {
        let mut session = ChatSession::new();
        for text in ["", "   ", "\n\t  \n"] {
            assert!(session.submit(text).is_none());
        }
        assert!(session.conversation().is_empty());
        assert_eq!(session.state(), SessionState::Idle);

        session.submit("real");
        assert!(session.submit("  ").is_none());
        assert_eq!(session.conversation().len(), 1);
        assert_eq!(session.state(), SessionState::AwaitingResponse);
    }

    #[test]
    fn test_user_text_kept_verbatim() {
        let mut session = ChatSession::new();
        let request = session.submit("  padded\n").unwrap();
        assert_eq!(request.message, "  padded\n");
        assert_eq!(session.conversation().turns()[0].content(), "  padded\n");
    }

    #[test]
    fn test_history_is_conversation_before_append() {
        let mut session = ChatSession::new();
        session.submit("Hello");
        session.complete(Ok("Hi there".into()));

        let request = session.submit("How are you?").unwrap();
        assert_eq!(
            request.history,
            vec![Turn::user("Hello"), Turn::assistant("Hi there")]
        );
        assert_eq!(session.conversation().len(), 3);
    }

    #[test]
    fn test_completion_while_idle_is_ignored() {
        let mut session = ChatSession::new();
        session.complete(Ok("stray".into()));
        assert!(session.conversation().is_empty());
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn test_exchange_success() {
        let backend = ScriptedBackend::replying("Hi there");
        let mut session = ChatSession::new();

        let turn = session.exchange(&backend, "Hello").await.cloned().unwrap();
        assert_eq!(turn, Turn::assistant("Hi there"));
        assert_eq!(session.state(), SessionState::Idle);

        let seen = backend.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].history.is_empty());
    }

    #[tokio::test]
    async fn test_exchange_failure_uses_fallback() {
        let backend = ScriptedBackend::failing();
        let mut session = ChatSession::new();

        let turn = session.exchange(&backend, "Hello").await.cloned().unwrap();
        assert_eq!(turn.role(), Role::Assistant);
        assert_eq!(turn.content(), FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_exchange_rejects_blank() {
        let backend = ScriptedBackend::replying("unused");
        let mut session = ChatSession::new();

        assert!(session.exchange(&backend, " ").await.is_none());
        assert!(backend.seen.lock().unwrap().is_empty());
    }
}
