//! DeleteConversationHandler - removes a conversation and its document.
//!
//! The vendor copy is deleted best-effort; a failure there is logged and
//! does not stop the store delete. A store failure surfaces.

use std::sync::Arc;
use tracing::{info, warn};

use super::access::{load_owned, ConversationAccessError};
use crate::domain::conversation::Conversation;
use crate::domain::foundation::{ConversationId, ErrorCode, UserId};
use crate::ports::{ConversationStore, DocumentSource};

/// Command to delete a conversation.
#[derive(Debug, Clone)]
pub struct DeleteConversationCommand {
    pub user_id: UserId,
    pub conversation_id: ConversationId,
}

/// Result of a delete.
#[derive(Debug, Clone)]
pub struct DeleteConversationResult {
    pub conversation: Conversation,
    /// Whether the vendor copy was removed too.
    pub source_deleted: bool,
}

/// Handler for deleting conversations.
#[derive(Clone)]
pub struct DeleteConversationHandler {
    source: Arc<dyn DocumentSource>,
    store: Arc<dyn ConversationStore>,
}

impl DeleteConversationHandler {
    pub fn new(source: Arc<dyn DocumentSource>, store: Arc<dyn ConversationStore>) -> Self {
        Self { source, store }
    }

    pub async fn handle(
        &self,
        cmd: DeleteConversationCommand,
    ) -> Result<DeleteConversationResult, ConversationAccessError> {
        let conversation =
            load_owned(self.store.as_ref(), &cmd.conversation_id, &cmd.user_id).await?;

        let source_deleted = match self.source.delete_source(conversation.source_id()).await {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    source_id = %conversation.source_id(),
                    error = %e,
                    "Failed to delete document from document source"
                );
                false
            }
        };

        self.store
            .delete_conversation(conversation.id())
            .await
            .map_err(|e| match e.code() {
                ErrorCode::ConversationNotFound => {
                    ConversationAccessError::NotFound(*conversation.id())
                }
                _ => ConversationAccessError::Storage(e),
            })?;

        info!(conversation_id = %conversation.id(), source_deleted, "Conversation deleted");

        Ok(DeleteConversationResult {
            conversation,
            source_deleted,
        })
    }
}
