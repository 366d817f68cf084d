//! Ordered, append-only message history for one logical session.
//!
//! ```rust
//! use swchat::{ACKNOWLEDGMENT, ConversationState};
//! use swprovider::Role;
//!
//! let mut state = ConversationState::new("Answer in one word.");
//! state.commit_turn("Capital of France?", "Paris");
//!
//! let history = state.history();
//! assert_eq!(history.len(), 4);
//! assert_eq!(history[0].role, Role::System);
//! assert_eq!(history[1].content, ACKNOWLEDGMENT);
//! assert_eq!(state.turns(), 1);
//! ```

use swprovider::{Message, Role};

use crate::ChatError;

/// Synthetic assistant reply seeded after the system instructions.
pub const ACKNOWLEDGMENT: &str =
    "OK. I will follow the system instructions to the best of my ability.";

const SEED_LEN: usize = 2;

/// Bounds how many completed turns are sent with each request.
///
/// The stored history is never trimmed; the window only applies when a
/// request is composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryWindow {
    pub max_turns: usize,
}

impl HistoryWindow {
    pub fn new(max_turns: usize) -> Self {
        Self { max_turns }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationState {
    messages: Vec<Message>,
}

impl ConversationState {
    pub fn new(instructions: impl Into<String>) -> Self {
        Self {
            messages: vec![
                Message::new(Role::System, instructions),
                Message::new(Role::Assistant, ACKNOWLEDGMENT),
            ],
        }
    }

    pub fn instructions(&self) -> &str {
        &self.messages[0].content
    }

    pub fn history(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Completed user/assistant pairs after the seed.
    pub fn turns(&self) -> usize {
        (self.messages.len() - SEED_LEN) / 2
    }

    /// True when a user message is waiting for its assistant reply.
    pub fn has_pending_user(&self) -> bool {
        self.messages.last().map(|message| message.role) == Some(Role::User)
    }

    pub fn append_user(&mut self, content: impl Into<String>) -> Result<(), ChatError> {
        if self.has_pending_user() {
            return Err(ChatError::invalid_request(
                "a user message is already awaiting an assistant reply",
            ));
        }

        self.messages.push(Message::new(Role::User, content));
        Ok(())
    }

    pub fn append_assistant(&mut self, content: impl Into<String>) -> Result<(), ChatError> {
        if !self.has_pending_user() {
            return Err(ChatError::invalid_request(
                "an assistant message must follow a user message",
            ));
        }

        self.messages.push(Message::new(Role::Assistant, content));
        Ok(())
    }

    /// Appends a completed turn as one step.
    ///
    /// A dangling user message left by [`append_user`](Self::append_user) is
    /// replaced rather than duplicated.
    pub fn commit_turn(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        if self.has_pending_user() {
            self.messages.pop();
        }

        self.messages.push(Message::new(Role::User, user));
        self.messages.push(Message::new(Role::Assistant, assistant));
    }

    /// Seed plus the most recent completed turns allowed by `window`.
    pub fn windowed(&self, window: Option<HistoryWindow>) -> Vec<Message> {
        let Some(window) = window else {
            return self.messages.clone();
        };

        let tail_len = (self.messages.len() - SEED_LEN)
            .min(window.max_turns.saturating_mul(2));
        let tail_start = self.messages.len() - tail_len;

        self.messages[..SEED_LEN]
            .iter()
            .chain(&self.messages[tail_start..])
            .cloned()
            .collect()
    }
}
