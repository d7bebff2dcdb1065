//! A single chat conversation.
//!
//! Owns the message history and enforces turn-taking: while a reply is
//! pending, further submissions are ignored. Replies are produced on a
//! spawned task after the configured "thinking" delay, so the caller is never
//! blocked and other UI events keep flowing.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use paddock_core::config::ChatConfig;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::ChatError;
use crate::knowledge::{APOLOGY_ANSWER, QUICK_QUESTIONS};
use crate::matcher::QueryMatcher;
use crate::types::{ConversationState, Message};

/// Produces the bot's answer for a user message.
pub trait Responder: Send + Sync {
    fn respond(&self, query: &str) -> Result<String, ChatError>;
}

impl Responder for QueryMatcher<'static> {
    fn respond(&self, query: &str) -> Result<String, ChatError> {
        Ok(self.find_answer(query).to_string())
    }
}

/// State shared between the session handle and its reply tasks.
struct Shared {
    state: Mutex<ConversationState>,
    /// Bumped on every mutation so a renderer can scroll to the newest message.
    revision: watch::Sender<u64>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, ConversationState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn touch(&self) {
        self.revision.send_modify(|r| *r += 1);
    }

    fn finish_reply(&self, text: impl Into<String>) {
        {
            let mut state = self.lock();
            state.messages.push(Message::bot(text));
            state.pending = false;
        }
        self.touch();
    }
}

/// Handle to a reply being prepared in the background.
///
/// Dropping it does not cancel the reply.
#[derive(Debug)]
pub struct PendingReply {
    handle: JoinHandle<()>,
}

impl PendingReply {
    /// Wait until the reply has been appended to the history.
    pub async fn wait(self) {
        if let Err(e) = self.handle.await {
            warn!(error = %e, "Reply task ended abnormally");
        }
    }
}

/// One chat session with its history, draft input and pending flag.
pub struct ConversationSession {
    id: Uuid,
    shared: Arc<Shared>,
    responder: Arc<dyn Responder>,
    response_delay: Duration,
}

impl ConversationSession {
    /// Create a session answering from the shipped knowledge base.
    pub fn new(config: &ChatConfig) -> Self {
        Self::with_responder(config, Arc::new(QueryMatcher::default()))
    }

    /// Create a session with a custom responder.
    pub fn with_responder(config: &ChatConfig, responder: Arc<dyn Responder>) -> Self {
        let mut state = ConversationState::default();
        if !config.greeting.trim().is_empty() {
            state.messages.push(Message::bot(config.greeting.clone()));
        }
        let (revision, _) = watch::channel(0);
        let id = Uuid::new_v4();
        debug!(session_id = %id, "Conversation session created");

        Self {
            id,
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                revision,
            }),
            responder,
            response_delay: Duration::from_millis(config.response_delay_ms),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Messages in insertion order.
    pub fn messages(&self) -> Vec<Message> {
        self.shared.lock().messages.clone()
    }

    pub fn snapshot(&self) -> ConversationState {
        self.shared.lock().clone()
    }

    pub fn is_pending(&self) -> bool {
        self.shared.lock().pending
    }

    pub fn draft(&self) -> String {
        self.shared.lock().draft_input.clone()
    }

    pub fn set_draft(&self, text: impl Into<String>) {
        self.shared.lock().draft_input = text.into();
        self.shared.touch();
    }

    /// Receiver that changes whenever the session state changes.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.shared.revision.subscribe()
    }

    /// Submit a user message.
    ///
    /// Returns `None` without touching the history if the text is blank or a
    /// reply is still pending. Outside a Tokio runtime no reply can be
    /// scheduled, so the message is rejected the same way.
    pub fn submit(&self, text: &str) -> Option<PendingReply> {
        if text.trim().is_empty() {
            debug!(session_id = %self.id, "Ignoring blank message");
            return None;
        }
        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                warn!(session_id = %self.id, error = %e, "No runtime for reply, message ignored");
                return None;
            }
        };

        {
            let mut state = self.shared.lock();
            if state.pending {
                debug!(session_id = %self.id, "Reply pending, message ignored");
                return None;
            }
            state.messages.push(Message::user(text));
            state.draft_input.clear();
            state.pending = true;
        }
        self.shared.touch();
        info!(session_id = %self.id, "User message appended");

        let shared = Arc::clone(&self.shared);
        let responder = Arc::clone(&self.responder);
        let delay = self.response_delay;
        let session_id = self.id;
        let query = text.to_string();

        let handle = runtime.spawn(async move {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| responder.respond(&query)))
                .unwrap_or_else(|_| Err(ChatError::MatcherFailed("responder panicked".to_string())));

            match outcome {
                Ok(answer) => {
                    tokio::time::sleep(delay).await;
                    shared.finish_reply(answer);
                    info!(session_id = %session_id, "Bot reply appended");
                }
                Err(e) => {
                    warn!(session_id = %session_id, error = %e, "Reply failed, sending apology");
                    shared.finish_reply(APOLOGY_ANSWER);
                }
            }
        });

        Some(PendingReply { handle })
    }

    /// Submit the current draft input.
    pub fn submit_draft(&self) -> Option<PendingReply> {
        let draft = self.draft();
        self.submit(&draft)
    }

    /// Submit one of the canned [`QUICK_QUESTIONS`].
    pub fn submit_quick(&self, index: usize) -> Result<Option<PendingReply>, ChatError> {
        let question = QUICK_QUESTIONS
            .get(index)
            .ok_or(ChatError::QuickQuestionOutOfRange(index))?;
        Ok(self.submit(question))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::{FALLBACK_ANSWER, KNOWLEDGE_BASE};
    use paddock_core::types::Sender;

    fn fast_config() -> ChatConfig {
        ChatConfig {
            response_delay_ms: 20,
            greeting: String::new(),
        }
    }

    fn user_count(session: &ConversationSession) -> usize {
        session
            .messages()
            .iter()
            .filter(|m| m.sender == Sender::User)
            .count()
    }

    struct FailingResponder;

    impl Responder for FailingResponder {
        fn respond(&self, _query: &str) -> Result<String, ChatError> {
            Err(ChatError::MatcherFailed("index unavailable".to_string()))
        }
    }

    struct PanickingResponder;

    impl Responder for PanickingResponder {
        fn respond(&self, _query: &str) -> Result<String, ChatError> {
            panic!("scoring blew up");
        }
    }

    async fn settle(reply: PendingReply) {
        tokio::time::timeout(Duration::from_secs(2), reply.wait())
            .await
            .expect("reply should resolve within timeout");
    }

    #[tokio::test]
    async fn test_greeting_is_first_message() {
        let session = ConversationSession::new(&ChatConfig::default());
        let messages = session.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, Sender::Bot);
        assert!(messages[0].text.starts_with("Hello!"));
    }

    #[tokio::test]
    async fn test_empty_greeting_disables_it() {
        let session = ConversationSession::new(&fast_config());
        assert!(session.messages().is_empty());
    }

    #[tokio::test]
    async fn test_submit_appends_user_then_bot() {
        let session = ConversationSession::new(&fast_config());
        let reply = session.submit("tell me your rates").unwrap();

        assert!(session.is_pending());
        assert_eq!(session.messages().len(), 1);

        settle(reply).await;

        let messages = session.messages();
        assert!(!session.is_pending());
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender, Sender::User);
        assert_eq!(messages[0].text, "tell me your rates");
        assert_eq!(messages[1].sender, Sender::Bot);
        assert_eq!(messages[1].text, KNOWLEDGE_BASE[7].answer);
    }

    #[tokio::test]
    async fn test_blank_submission_is_ignored() {
        let session = ConversationSession::new(&fast_config());
        assert!(session.submit("").is_none());
        assert!(session.submit("   \n\t").is_none());
        assert!(session.messages().is_empty());
        assert!(!session.is_pending());
    }

    #[test]
    fn test_submit_outside_runtime_never_sticks_pending() {
        let session = ConversationSession::new(&fast_config());
        assert!(session.submit("skills").is_none());
        assert!(!session.is_pending());
        assert!(session.messages().is_empty());

        session.set_draft("contact");
        assert!(session.submit_draft().is_none());
        assert_eq!(session.draft(), "contact");
        assert!(!session.is_pending());
    }

    #[tokio::test]
    async fn test_second_submit_while_pending_is_ignored() {
        let session = ConversationSession::new(&fast_config());
        let first = session.submit("skills").unwrap();
        assert!(session.submit("contact").is_none());
        assert_eq!(user_count(&session), 1);

        settle(first).await;
        assert_eq!(session.messages().len(), 2);

        let second = session.submit("contact").unwrap();
        settle(second).await;
        assert_eq!(user_count(&session), 2);
        assert_eq!(session.messages().len(), 4);
    }

    #[tokio::test]
    async fn test_failing_responder_appends_apology() {
        let config = ChatConfig {
            response_delay_ms: 10_000,
            greeting: String::new(),
        };
        let session = ConversationSession::with_responder(&config, Arc::new(FailingResponder));
        let reply = session.submit("anything").unwrap();
        settle(reply).await;

        let messages = session.messages();
        assert!(!session.is_pending());
        assert_eq!(messages.last().unwrap().text, APOLOGY_ANSWER);
    }

    #[tokio::test]
    async fn test_panicking_responder_never_leaves_session_pending() {
        let session =
            ConversationSession::with_responder(&fast_config(), Arc::new(PanickingResponder));
        let reply = session.submit("anything").unwrap();
        settle(reply).await;

        assert!(!session.is_pending());
        assert_eq!(session.messages().last().unwrap().text, APOLOGY_ANSWER);
        assert!(session.submit("again").is_some());
    }

    #[tokio::test]
    async fn test_unknown_question_gets_fallback() {
        let session = ConversationSession::new(&fast_config());
        settle(session.submit("asdkjasdkj").unwrap()).await;
        assert_eq!(session.messages()[1].text, FALLBACK_ANSWER);
    }

    #[tokio::test]
    async fn test_submit_clears_draft() {
        let session = ConversationSession::new(&fast_config());
        session.set_draft("How can I contact you?");
        assert_eq!(session.draft(), "How can I contact you?");

        let reply = session.submit_draft().unwrap();
        assert!(session.draft().is_empty());
        settle(reply).await;
        assert_eq!(session.messages()[0].text, "How can I contact you?");
    }

    #[tokio::test]
    async fn test_blank_draft_is_not_submitted() {
        let session = ConversationSession::new(&fast_config());
        session.set_draft("  ");
        assert!(session.submit_draft().is_none());
        assert_eq!(session.draft(), "  ");
    }

    #[tokio::test]
    async fn test_quick_question_submission() {
        let session = ConversationSession::new(&fast_config());
        let reply = session.submit_quick(1).unwrap().unwrap();
        settle(reply).await;

        let messages = session.messages();
        assert_eq!(messages[0].text, "Technical skills?");
        assert_eq!(messages[1].text, KNOWLEDGE_BASE[1].answer);
    }

    #[tokio::test]
    async fn test_quick_question_out_of_range() {
        let session = ConversationSession::new(&fast_config());
        let result = session.submit_quick(QUICK_QUESTIONS.len());
        assert!(matches!(result, Err(ChatError::QuickQuestionOutOfRange(6))));
    }

    #[tokio::test]
    async fn test_subscribers_see_every_mutation() {
        let session = ConversationSession::new(&fast_config());
        let mut rx = session.subscribe();
        assert_eq!(*rx.borrow_and_update(), 0);

        let reply = session.submit("skills").unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), 1);

        settle(reply).await;
        assert_eq!(*rx.borrow_and_update(), 2);
    }

    #[tokio::test]
    async fn test_history_keeps_insertion_order() {
        let session = ConversationSession::new(&ChatConfig {
            response_delay_ms: 1,
            ..ChatConfig::default()
        });
        for question in ["skills", "contact", "rates"] {
            settle(session.submit(question).unwrap()).await;
        }

        let senders: Vec<Sender> = session.messages().iter().map(|m| m.sender).collect();
        assert_eq!(
            senders,
            vec![
                Sender::Bot,
                Sender::User,
                Sender::Bot,
                Sender::User,
                Sender::Bot,
                Sender::User,
                Sender::Bot,
            ]
        );
        let snapshot = session.snapshot();
        assert_eq!(snapshot.messages.len(), 7);
        assert!(!snapshot.pending);
    }
}
