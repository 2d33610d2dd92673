//! ListConversationsHandler - the user's conversations, newest first.
//!
//! Listing fails soft: a store error is logged and yields an empty list.

use std::sync::Arc;
use tracing::warn;

use crate::domain::conversation::Conversation;
use crate::domain::foundation::UserId;
use crate::ports::ConversationStore;

/// Query for a user's conversations.
#[derive(Debug, Clone)]
pub struct ListConversationsQuery {
    pub user_id: UserId,
}

/// Handler for listing conversations.
#[derive(Clone)]
pub struct ListConversationsHandler {
    store: Arc<dyn ConversationStore>,
}

impl ListConversationsHandler {
    pub fn new(store: Arc<dyn ConversationStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: ListConversationsQuery) -> Vec<Conversation> {
        match self.store.list_by_user(&query.user_id).await {
            Ok(list) => list,
            Err(e) => {
                warn!(user_id = %query.user_id, error = %e, "Failed to list conversations");
                Vec::new()
            }
        }
    }
}
