//! GetMessagesHandler - a conversation's persisted transcript, oldest first.
//!
//! Ownership is enforced. Once ownership is established, a failure to read
//! the messages is logged and yields an empty transcript.

use std::sync::Arc;
use tracing::warn;

use super::access::{load_owned, ConversationAccessError};
use crate::domain::conversation::Message;
use crate::domain::foundation::{ConversationId, UserId};
use crate::ports::ConversationStore;

/// Query for a conversation's messages.
#[derive(Debug, Clone)]
pub struct GetMessagesQuery {
    pub user_id: UserId,
    pub conversation_id: ConversationId,
}

/// Handler for reading a transcript.
#[derive(Clone)]
pub struct GetMessagesHandler {
    store: Arc<dyn ConversationStore>,
}

impl GetMessagesHandler {
    pub fn new(store: Arc<dyn ConversationStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        query: GetMessagesQuery,
    ) -> Result<Vec<Message>, ConversationAccessError> {
        let conversation =
            load_owned(self.store.as_ref(), &query.conversation_id, &query.user_id).await?;

        match self.store.list_messages(conversation.id()).await {
            Ok(messages) => Ok(messages),
            Err(e) => {
                warn!(
                    conversation_id = %conversation.id(),
                    error = %e,
                    "Failed to load messages"
                );
                Ok(Vec::new())
            }
        }
    }
}
