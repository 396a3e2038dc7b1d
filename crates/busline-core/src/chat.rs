//! Conversation with the travel assistant.

use std::sync::Arc;

use log::{debug, warn};

use crate::{
    display::Notice,
    error::{BookingError, Result},
    gateway::BookingGateway,
    models::{ChatHistory, ChatMessage, ChatReply, ChatRequest, ChatRole},
    store::{Persisted, StateStore, CHAT_KEY},
};

const CHAT_FAILED: &str = "Failed to reach the assistant";

/// Longest message the assistant accepts, in characters.
pub const MAX_MESSAGE_CHARS: usize = 500;

/// A persisted chat conversation.
///
/// Messages and the service's conversation id are written through to the
/// state store after every change, so a conversation resumes where it left
/// off after a restart.
pub struct ChatSession {
    history: ChatHistory,
    persisted: Persisted<ChatHistory>,
    notice: Option<Notice>,
}

impl ChatSession {
    /// Resume the stored conversation, or start an empty one.
    pub async fn open(store: Arc<dyn StateStore>) -> Self {
        let persisted = Persisted::new(store, CHAT_KEY);
        let history: ChatHistory = persisted.load_or_default().await;
        debug!("Resumed chat with {} message(s)", history.messages.len());

        Self {
            history,
            persisted,
            notice: None,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.history.messages
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.history.conversation_id.as_deref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Send one user turn and record the reply.
    ///
    /// Blank text is ignored and returns `Ok(None)`. The user's message is
    /// kept even when the assistant cannot be reached.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::InvalidInput` for messages longer than
    /// [`MAX_MESSAGE_CHARS`]; nothing is recorded or sent.
    pub async fn send(
        &mut self,
        gateway: &dyn BookingGateway,
        text: &str,
    ) -> Result<Option<ChatReply>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        if text.chars().count() > MAX_MESSAGE_CHARS {
            let error = BookingError::invalid_input("message").with_reason(format!(
                "Message too long. Maximum {MAX_MESSAGE_CHARS} characters."
            ));
            self.notice = Some(error.notice(CHAT_FAILED));
            return Err(error);
        }

        self.history
            .messages
            .push(ChatMessage::now(ChatRole::User, text));
        self.persist().await;

        let request = ChatRequest {
            message: text.to_string(),
            conversation_id: self.history.conversation_id.clone(),
        };

        let reply = match gateway.chat(&request).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Chat request failed: {e}");
                self.notice = Some(e.notice(CHAT_FAILED));
                return Err(e);
            }
        };

        self.notice = None;
        self.history
            .messages
            .push(ChatMessage::now(ChatRole::Assistant, reply.response.clone()));
        self.history.conversation_id = Some(reply.conversation_id.clone());
        self.persist().await;

        Ok(Some(reply))
    }

    /// Forget the conversation, locally and in storage.
    pub async fn clear(&mut self) {
        self.history = ChatHistory::default();
        self.notice = None;
        self.persist().await;
    }

    async fn persist(&self) {
        self.persisted.save_detached(&self.history).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        gateway::{Fault, InMemoryGateway},
        store::MemoryStateStore,
    };

    #[tokio::test]
    async fn test_blank_message_is_ignored() {
        let store: Arc<dyn StateStore> = Arc::new(MemoryStateStore::new());
        let gateway = InMemoryGateway::new();
        let mut session = ChatSession::open(store).await;

        assert!(session.send(&gateway, "   ").await.unwrap().is_none());
        assert!(session.messages().is_empty());
        assert_eq!(gateway.chat_calls(), 0);
    }

    #[tokio::test]
    async fn test_long_message_is_refused() {
        let store: Arc<dyn StateStore> = Arc::new(MemoryStateStore::new());
        let gateway = InMemoryGateway::new();
        let mut session = ChatSession::open(store).await;

        let err = session
            .send(&gateway, &"a".repeat(MAX_MESSAGE_CHARS + 1))
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::InvalidInput { ref field, .. } if field == "message"));
        assert!(session.messages().is_empty());
        assert_eq!(gateway.chat_calls(), 0);
        assert!(session
            .notice()
            .is_some_and(|n| n.message.contains("Maximum 500 characters")));

        let reply = session
            .send(&gateway, &"ক".repeat(MAX_MESSAGE_CHARS))
            .await
            .unwrap();
        assert!(reply.is_some());
        assert_eq!(session.messages().len(), 2);
        assert_eq!(gateway.chat_calls(), 1);
    }

    #[tokio::test]
    async fn test_conversation_resumes_after_reopen() {
        let store: Arc<dyn StateStore> = Arc::new(MemoryStateStore::new());
        let gateway = InMemoryGateway::new();

        let mut session = ChatSession::open(Arc::clone(&store)).await;
        let reply = session
            .send(&gateway, "Buses from Dhaka to Sylhet?")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.conversation_id(), Some(reply.conversation_id.as_str()));

        let resumed = ChatSession::open(store).await;
        assert_eq!(resumed.messages(), session.messages());
        assert_eq!(resumed.conversation_id(), session.conversation_id());
    }

    #[tokio::test]
    async fn test_failed_turn_keeps_user_message() {
        let store: Arc<dyn StateStore> = Arc::new(MemoryStateStore::new());
        let gateway = InMemoryGateway::new();
        gateway.fail_next(Fault::Outage).await;

        let mut session = ChatSession::open(store).await;
        assert!(session.send(&gateway, "Hello").await.is_err());

        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].role, ChatRole::User);
        assert!(session.notice().is_some_and(Notice::is_error));
        assert_eq!(session.conversation_id(), None);
    }

    #[tokio::test]
    async fn test_clear_forgets_conversation() {
        let store: Arc<dyn StateStore> = Arc::new(MemoryStateStore::new());
        let gateway = InMemoryGateway::new();
        let mut session = ChatSession::open(Arc::clone(&store)).await;
        session.send(&gateway, "Hello").await.unwrap();

        session.clear().await;
        assert!(session.messages().is_empty());
        assert_eq!(session.conversation_id(), None);
        assert!(ChatSession::open(store).await.messages().is_empty());
    }
}
