//! Chat widget engine for the portfolio site.
//!
//! Scores free-text questions against a fixed knowledge base and manages a
//! single conversation with turn-taking and a simulated "thinking" delay.

pub mod error;
pub mod knowledge;
pub mod matcher;
pub mod session;
pub mod types;

pub use error::ChatError;
pub use knowledge::{KnowledgeEntry, APOLOGY_ANSWER, FALLBACK_ANSWER, KNOWLEDGE_BASE, QUICK_QUESTIONS};
pub use matcher::{QueryMatcher, ScoredEntry, MATCH_THRESHOLD};
pub use session::{ConversationSession, PendingReply, Responder};
pub use types::{ConversationState, Message};
