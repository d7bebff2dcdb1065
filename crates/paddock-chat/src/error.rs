//! Error types for the chat widget engine.

use paddock_core::error::PaddockError;

/// Errors from the chat engine.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("knowledge base is empty")]
    EmptyKnowledgeBase,
    #[error("matcher failed: {0}")]
    MatcherFailed(String),
    #[error("quick question index {0} out of range")]
    QuickQuestionOutOfRange(usize),
}

impl From<ChatError> for PaddockError {
    fn from(err: ChatError) -> Self {
        PaddockError::Chat(err.to_string())
    }
}
