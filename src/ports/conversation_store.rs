//! Conversation store port.
//!
//! Persistence contract for conversations and their messages. Each operation
//! is a single round-trip; implementations do no caching.
//!
//! # Failure policy
//!
//! The port reports every failure. Callers decide how loud to be:
//! listing degrades to empty, upload and delete surface the error, and the
//! message write path flags the exchange as not persisted.

use async_trait::async_trait;

use crate::domain::conversation::{Conversation, Message};
use crate::domain::foundation::{ConversationId, DomainError, UserId};

/// Repository port for conversations and messages.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Lists the user's conversations, newest first.
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Conversation>, DomainError>;

    /// Finds a conversation by id regardless of owner.
    ///
    /// Returns `None` if not found. Ownership is checked by the caller.
    async fn find_by_id(&self, id: &ConversationId) -> Result<Option<Conversation>, DomainError>;

    /// Inserts a newly uploaded conversation.
    async fn insert_conversation(&self, conversation: &Conversation) -> Result<(), DomainError>;

    /// Deletes a conversation and, by cascade, its messages.
    ///
    /// # Errors
    ///
    /// - `ConversationNotFound` if no row was deleted
    /// - `DatabaseError` on persistence failure
    async fn delete_conversation(&self, id: &ConversationId) -> Result<(), DomainError>;

    /// Lists a conversation's messages, oldest first.
    async fn list_messages(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Vec<Message>, DomainError>;

    /// Inserts a batch of messages atomically, in the given order.
    async fn insert_messages(&self, messages: &[Message]) -> Result<(), DomainError>;
}
