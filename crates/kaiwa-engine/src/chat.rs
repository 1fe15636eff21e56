//! Conversation model for chat sessions.
//!
//! This module provides the [`Turn`] and [`Conversation`] types along with the
//! wire shapes exchanged with the chat endpoint.

use serde::{Deserialize, Serialize};

/// Role in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message typed by the user.
    User,
    /// Reply produced by the chat backend.
    Assistant,
}

impl Role {
    /// Short label shown above a turn.
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Assistant => "AI",
        }
    }
}

/// A single message in a conversation.
///
/// Turns are immutable once created; fields are only readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    role: Role,
    content: String,
}

impl Turn {
    /// Create a new user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create a new assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Role of the author.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Message content.
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Ordered, append-only history of turns.
///
/// Only the session appends; everything else reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    /// Create an empty conversation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn at the end.
    pub(crate) fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// All turns in display order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Number of turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether no turn has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The most recent turn, if any.
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Iterate turns in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.turns.iter()
    }
}

impl<'a> IntoIterator for &'a Conversation {
    type Item = &'a Turn;
    type IntoIter = std::slice::Iter<'a, Turn>;

    fn into_iter(self) -> Self::IntoIter {
        self.turns.iter()
    }
}

/// Body posted to the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The new user message.
    pub message: String,
    /// Conversation before the new message was appended.
    pub history: Vec<Turn>,
}

/// Successful reply from the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    /// Assistant text, usually markdown.
    pub response: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_labels() {
        assert_eq!(Role::User.label(), "You");
        assert_eq!(Role::Assistant.label(), "AI");
    }

    #[test]
    fn test_turn_serializes_role_lowercase() {
        let json = serde_json::to_value(Turn::assistant("Hi")).unwrap();
        assert_eq!(json, serde_json::json!({"role": "assistant", "content": "Hi"}));
    }

    #[test]
    fn test_conversation_keeps_insertion_order() {
        let mut conversation = Conversation::new();
        assert!(conversation.is_empty());

        conversation.push(Turn::user("one"));
        conversation.push(Turn::assistant("two"));
        conversation.push(Turn::user("three"));

        let contents: Vec<&str> = conversation.iter().map(Turn::content).collect();
        assert_eq!(contents, vec!["one", "two", "three"]);
        assert_eq!(conversation.len(), 3);
        assert_eq!(conversation.last().map(Turn::role), Some(Role::User));
    }

    #[test]
    fn test_request_wire_shape() {
        let request = ChatRequest {
            message: "Hello".into(),
            history: vec![Turn::user("a"), Turn::assistant("b")],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "message": "Hello",
                "history": [
                    {"role": "user", "content": "a"},
                    {"role": "assistant", "content": "b"}
                ]
            })
        );
    }

    #[test]
    fn test_reply_ignores_extra_fields() {
        let reply: ChatReply =
            serde_json::from_str(r#"{"response": "Hi there", "model": "x"}"#).unwrap();
        assert_eq!(reply.response, "Hi there");
    }
}
