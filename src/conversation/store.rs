//! Conversation store: message thread, loading flag and input history
//!
//! All mutations go through [`ChatState::apply`]. The state sits behind a
//! lock so that a send in flight and a `/clear` can share one store by
//! reference; no lock is held across the responder await.

use super::history::{HistoryDirection, InputHistory};
use super::message::Message;
use super::responder::{ResponseProvider, FALLBACK_RESPONSE};
use crate::config::ChatConfig;
use crate::error::Result;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Snapshot of the conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatState {
    /// Messages in insertion order
    pub messages: Vec<Message>,
    /// True while a reply is pending
    pub is_loading: bool,
    /// Previously sent inputs
    pub history: InputHistory,
    /// Bumped on every clear; replies started in an older generation are stale
    pub generation: u64,
}

impl ChatState {
    /// Empty conversation with the given history capacity
    pub fn with_capacity(history_capacity: usize) -> Self {
        Self {
            messages: Vec::new(),
            is_loading: false,
            history: InputHistory::with_capacity(history_capacity),
            generation: 0,
        }
    }

    /// Apply one action
    pub fn apply(&mut self, action: ChatAction) {
        match action {
            ChatAction::AddMessage(message) => self.messages.push(message),
            ChatAction::SetLoading(loading) => self.is_loading = loading,
            ChatAction::AddToHistory(text) => self.history.add(&text),
            ChatAction::SetHistoryCursor(cursor) => self.history.set_cursor(cursor),
            ChatAction::ClearChat => {
                self.messages.clear();
                self.generation += 1;
            }
        }
    }
}

impl Default for ChatState {
    fn default() -> Self {
        Self::with_capacity(super::history::DEFAULT_HISTORY_CAPACITY)
    }
}

/// State transitions of the conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatAction {
    AddMessage(Message),
    SetLoading(bool),
    AddToHistory(String),
    SetHistoryCursor(Option<usize>),
    /// Drop all messages and start a new generation; history and loading
    /// flag are kept
    ClearChat,
}

/// Result of [`ConversationStore::send_message`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input; nothing happened
    Rejected,
    /// The agent reply (or fallback) was appended
    Delivered(Message),
    /// The chat was cleared while the reply was pending, so it was dropped
    Discarded,
}

/// Owns the conversation and talks to the response provider
///
/// Cloning yields another handle to the same conversation.
#[derive(Clone)]
pub struct ConversationStore {
    state: Arc<RwLock<ChatState>>,
    responder: Arc<dyn ResponseProvider>,
    fallback_response: String,
    discard_stale: bool,
}

impl ConversationStore {
    /// Create an empty conversation backed by `responder`
    pub fn new(responder: Arc<dyn ResponseProvider>, config: &ChatConfig) -> Self {
        Self {
            state: Arc::new(RwLock::new(ChatState::with_capacity(
                config.history_capacity,
            ))),
            responder,
            fallback_response: FALLBACK_RESPONSE.to_string(),
            discard_stale: config.discard_stale_responses,
        }
    }

    /// Replace the reply used when the responder fails
    pub fn with_fallback_response(mut self, fallback: impl Into<String>) -> Self {
        self.fallback_response = fallback.into();
        self
    }

    fn read(&self) -> RwLockReadGuard<'_, ChatState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ChatState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn dispatch(&self, action: ChatAction) {
        self.write().apply(action);
    }

    /// Send a user message and wait for the agent reply
    ///
    /// The user message is visible immediately and the loading flag stays set
    /// until the responder returns. A responder failure is logged and turned
    /// into the fallback reply, so the only error path left is reserved for
    /// future providers.
    ///
    /// # Errors
    ///
    /// Currently never fails
    pub async fn send_message(&self, content: &str) -> Result<SendOutcome> {
        if content.trim().is_empty() {
            return Ok(SendOutcome::Rejected);
        }

        let started_in = {
            let mut state = self.write();
            state.apply(ChatAction::AddMessage(Message::user(content)));
            state.apply(ChatAction::SetLoading(true));
            state.generation
        };

        let produced = self.responder.produce(content).await;
        self.dispatch(ChatAction::SetLoading(false));

        let reply = match produced {
            Ok(text) => Message::agent(text),
            Err(e) => {
                tracing::warn!(responder = self.responder.name(), "Responder failed: {}", e);
                Message::agent(self.fallback_response.clone())
            }
        };

        let mut state = self.write();
        if self.discard_stale && state.generation != started_in {
            tracing::debug!("Discarding reply to a cleared conversation");
            return Ok(SendOutcome::Discarded);
        }

        state.apply(ChatAction::AddMessage(reply.clone()));
        Ok(SendOutcome::Delivered(reply))
    }

    /// Remove every message
    ///
    /// Replies still pending from before the clear are dropped when stale
    /// discarding is enabled.
    pub fn clear_chat(&self) {
        self.dispatch(ChatAction::ClearChat);
        tracing::debug!("Conversation cleared");
    }

    /// Remember an input for later recall
    pub fn add_to_history(&self, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        self.dispatch(ChatAction::AddToHistory(text.to_string()));
    }

    /// Step through the input history, returning the recalled text
    pub fn navigate_history(&self, direction: HistoryDirection) -> String {
        let mut state = self.write();
        let cursor = state.history.step(direction);
        state.apply(ChatAction::SetHistoryCursor(cursor));
        state.history.current().to_string()
    }

    /// Whether any input has been remembered
    pub fn has_history(&self) -> bool {
        !self.read().history.is_empty()
    }

    pub fn snapshot(&self) -> ChatState {
        self.read().clone()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.read().messages.clone()
    }

    pub fn message_count(&self) -> usize {
        self.read().messages.len()
    }

    pub fn is_loading(&self) -> bool {
        self.read().is_loading
    }

    pub fn history_entries(&self) -> Vec<String> {
        self.read().history.entries().to_vec()
    }

    pub fn history_cursor(&self) -> Option<usize> {
        self.read().history.cursor()
    }

    pub fn history_capacity(&self) -> usize {
        self.read().history.capacity()
    }

    /// Name of the backing responder
    pub fn responder_name(&self) -> &str {
        self.responder.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::message::Sender;
    use crate::conversation::responder::{default_responses, MockResponder};
    use crate::error::ChatterboxError;
    use async_trait::async_trait;
    use std::time::Duration;

    struct FailingResponder;

    #[async_trait]
    impl ResponseProvider for FailingResponder {
        async fn produce(&self, _content: &str) -> Result<String> {
            Err(ChatterboxError::Responder("backend down".to_string()).into())
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn slow_responder() -> Arc<MockResponder> {
        Arc::new(MockResponder::new(
            default_responses(),
            Duration::from_millis(1000),
            Duration::from_millis(3000),
        ))
    }

    fn store_with(responder: Arc<dyn ResponseProvider>) -> ConversationStore {
        ConversationStore::new(responder, &ChatConfig::default())
    }

    #[tokio::test]
    async fn test_send_appends_user_then_agent() {
        let store = store_with(Arc::new(MockResponder::instant()));

        let outcome = store.send_message("hello").await.unwrap();

        let messages = store.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender, Sender::User);
        assert_eq!(messages[0].content, "hello");
        assert_eq!(messages[1].sender, Sender::Agent);
        assert!(default_responses().contains(&messages[1].content));
        assert_eq!(outcome, SendOutcome::Delivered(messages[1].clone()));
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_blank_message_is_rejected() {
        let store = store_with(Arc::new(MockResponder::instant()));
        assert_eq!(store.send_message("   ").await.unwrap(), SendOutcome::Rejected);
        assert_eq!(store.send_message("").await.unwrap(), SendOutcome::Rejected);
        assert_eq!(store.message_count(), 0);
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_send_does_not_touch_history() {
        let store = store_with(Arc::new(MockResponder::instant()));
        store.send_message("hello").await.unwrap();
        assert!(store.history_entries().is_empty());
    }

    #[tokio::test]
    async fn test_failure_uses_fallback_reply() {
        let store = store_with(Arc::new(FailingResponder));

        let outcome = store.send_message("hi").await.unwrap();

        let messages = store.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].content, FALLBACK_RESPONSE);
        assert_eq!(messages[1].sender, Sender::Agent);
        assert!(matches!(outcome, SendOutcome::Delivered(_)));
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_custom_fallback_reply() {
        let store = store_with(Arc::new(FailingResponder)).with_fallback_response("oops");
        store.send_message("hi").await.unwrap();
        assert_eq!(store.messages()[1].content, "oops");
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_flag_spans_the_pending_reply() {
        let store = store_with(slow_responder());

        let (outcome, during) = tokio::join!(store.send_message("hi"), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            (store.is_loading(), store.message_count())
        });

        assert_eq!(during, (true, 1));
        assert!(matches!(outcome.unwrap(), SendOutcome::Delivered(_)));
        assert!(!store.is_loading());
        assert_eq!(store.message_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_during_send_discards_stale_reply() {
        let store = store_with(slow_responder());

        let (outcome, _) = tokio::join!(store.send_message("hi"), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            store.clear_chat();
        });

        assert_eq!(outcome.unwrap(), SendOutcome::Discarded);
        assert_eq!(store.message_count(), 0);
        assert!(!store.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_during_send_keeps_reply_when_discard_disabled() {
        let config = ChatConfig {
            discard_stale_responses: false,
            ..ChatConfig::default()
        };
        let store = ConversationStore::new(slow_responder(), &config);

        let (outcome, _) = tokio::join!(store.send_message("hi"), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            store.clear_chat();
        });

        assert!(matches!(outcome.unwrap(), SendOutcome::Delivered(_)));
        let messages = store.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, Sender::Agent);
    }

    #[tokio::test]
    async fn test_clear_keeps_history_and_cursor() {
        let store = store_with(Arc::new(MockResponder::instant()));
        store.add_to_history("a");
        store.add_to_history("b");
        store.navigate_history(HistoryDirection::Up);
        store.send_message("b").await.unwrap();

        store.clear_chat();

        assert_eq!(store.message_count(), 0);
        assert_eq!(store.history_entries(), ["b", "a"]);
        assert_eq!(store.history_cursor(), Some(0));
    }

    #[tokio::test]
    async fn test_messages_after_clear_are_delivered() {
        let store = store_with(Arc::new(MockResponder::instant()));
        store.send_message("one").await.unwrap();
        store.clear_chat();
        let outcome = store.send_message("two").await.unwrap();
        assert!(matches!(outcome, SendOutcome::Delivered(_)));
        assert_eq!(store.message_count(), 2);
    }

    #[test]
    fn test_history_navigation_through_store() {
        let store = store_with(Arc::new(MockResponder::instant()));
        for text in ["a", "b", "c"] {
            store.add_to_history(text);
        }

        assert_eq!(store.navigate_history(HistoryDirection::Up), "c");
        assert_eq!(store.navigate_history(HistoryDirection::Up), "b");
        assert_eq!(store.navigate_history(HistoryDirection::Down), "c");
        assert_eq!(store.navigate_history(HistoryDirection::Down), "");
        assert_eq!(store.history_cursor(), None);
    }

    #[test]
    fn test_history_capacity_follows_config() {
        let config = ChatConfig {
            history_capacity: 3,
            ..ChatConfig::default()
        };
        let store = ConversationStore::new(Arc::new(MockResponder::instant()), &config);
        for i in 0..10 {
            store.add_to_history(&format!("m{}", i));
        }
        assert_eq!(store.history_entries(), ["m9", "m8", "m7"]);
        assert_eq!(store.history_capacity(), 3);
    }

    #[test]
    fn test_reducer_actions() {
        let mut state = ChatState::default();
        state.apply(ChatAction::AddMessage(Message::user("x")));
        state.apply(ChatAction::SetLoading(true));
        state.apply(ChatAction::AddToHistory("x".to_string()));
        state.apply(ChatAction::SetHistoryCursor(Some(0)));
        assert_eq!(state.messages.len(), 1);
        assert!(state.is_loading);
        assert_eq!(state.history.cursor(), Some(0));

        state.apply(ChatAction::ClearChat);
        assert_eq!(state.generation, 1);
        assert!(state.messages.is_empty());
        assert!(state.is_loading);
        assert_eq!(state.history.entries(), ["x"]);
    }

    #[test]
    fn test_clones_share_the_conversation() {
        let store = store_with(Arc::new(MockResponder::instant()));
        let other = store.clone();
        other.add_to_history("shared");
        assert_eq!(store.history_entries(), ["shared"]);
        assert_eq!(store.snapshot(), other.snapshot());
    }
}
