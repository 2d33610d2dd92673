//! ExportConversationHandler - the persisted transcript as a file.
//!
//! Unlike the transcript view, export fails loudly: a storage error is
//! returned rather than an empty file.

use std::sync::Arc;

use super::access::{load_owned, ConversationAccessError};
use crate::domain::conversation::{render_transcript, ExportFormat, Transcript};
use crate::domain::foundation::{ConversationId, UserId};
use crate::ports::ConversationStore;

/// Query to export a conversation.
#[derive(Debug, Clone)]
pub struct ExportConversationQuery {
    pub user_id: UserId,
    pub conversation_id: ConversationId,
    pub format: ExportFormat,
}

/// Handler for transcript export.
#[derive(Clone)]
pub struct ExportConversationHandler {
    store: Arc<dyn ConversationStore>,
}

impl ExportConversationHandler {
    pub fn new(store: Arc<dyn ConversationStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        query: ExportConversationQuery,
    ) -> Result<Transcript, ConversationAccessError> {
        let conversation =
            load_owned(self.store.as_ref(), &query.conversation_id, &query.user_id).await?;

        let messages = self
            .store
            .list_messages(conversation.id())
            .await
            .map_err(ConversationAccessError::Storage)?;

        Ok(render_transcript(conversation.title(), &messages, query.format))
    }
}
