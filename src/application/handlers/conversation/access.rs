//! Owner-checked conversation lookup shared by the conversation handlers.

use thiserror::Error;

use crate::domain::conversation::Conversation;
use crate::domain::foundation::{ConversationId, DomainError, OwnedByUser, UserId};
use crate::ports::ConversationStore;

/// Errors reaching a conversation on behalf of a user.
#[derive(Debug, Clone, Error)]
pub enum ConversationAccessError {
    #[error("Conversation not found: {0}")]
    NotFound(ConversationId),

    #[error("Forbidden: user does not own this conversation")]
    Forbidden,

    #[error("Storage error: {0}")]
    Storage(DomainError),
}

/// Loads a conversation and checks that `user_id` owns it.
pub(crate) async fn load_owned(
    store: &dyn ConversationStore,
    conversation_id: &ConversationId,
    user_id: &UserId,
) -> Result<Conversation, ConversationAccessError> {
    let conversation = store
        .find_by_id(conversation_id)
        .await
        .map_err(ConversationAccessError::Storage)?
        .ok_or(ConversationAccessError::NotFound(*conversation_id))?;

    if !conversation.is_owner(user_id) {
        tracing::warn!(
            conversation_id = %conversation_id,
            user_id = %user_id,
            "Rejected access to a conversation owned by another user"
        );
        return Err(ConversationAccessError::Forbidden);
    }

    Ok(conversation)
}
