use chrono::{DateTime, Utc};
use paddock_core::types::Sender;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One chat bubble. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Time-ordered (UUIDv7) identifier.
    pub id: Uuid,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            text: text.into(),
            sender,
            timestamp: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text)
    }
}

/// Everything a chat widget renders for one session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationState {
    /// Insertion-ordered history.
    pub messages: Vec<Message>,
    /// True while a reply is being prepared.
    pub pending: bool,
    pub draft_input: String,
}
