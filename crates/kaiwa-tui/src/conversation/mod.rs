//! Conversation display.
//!
//! [`MessageView`] renders one turn; [`ConversationView`] stacks them with the
//! pending indicator and the empty-state invitation.

mod message;
mod placeholder;
mod view;

pub use message::MessageView;
pub use placeholder::{empty_invitation, input_placeholder, pending_indicator, screen_title};
pub use view::{max_scroll, ConversationView};
