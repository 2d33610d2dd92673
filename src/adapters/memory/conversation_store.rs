//! In-memory ConversationStore for tests and local development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::conversation::{sort_newest_first, sort_oldest_first, Conversation, Message};
use crate::domain::foundation::{ConversationId, DomainError, ErrorCode, UserId};
use crate::ports::ConversationStore;

#[derive(Debug, Default)]
struct Tables {
    conversations: HashMap<ConversationId, Conversation>,
    messages: Vec<Message>,
}

/// Thread-safe in-memory store.
///
/// Mirrors the relational schema: deleting a conversation drops its messages,
/// and inserting a message for an unknown conversation fails. Failures can be
/// injected per operation kind.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConversationStore {
    tables: Arc<RwLock<Tables>>,
    fail_reads: Arc<RwLock<bool>>,
    fail_writes: Arc<RwLock<bool>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every read fail until reset.
    pub fn set_fail_reads(&self, fail: bool) {
        *self.fail_reads.write().unwrap_or_else(PoisonError::into_inner) = fail;
    }

    /// Makes every write fail until reset.
    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.write().unwrap_or_else(PoisonError::into_inner) = fail;
    }

    pub fn conversation_count(&self) -> usize {
        self.read_tables().conversations.len()
    }

    pub fn message_count(&self) -> usize {
        self.read_tables().messages.len()
    }

    fn read_tables(&self) -> std::sync::RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_tables(&self) -> std::sync::RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_read(&self) -> Result<(), DomainError> {
        if *self.fail_reads.read().unwrap_or_else(PoisonError::into_inner) {
            return Err(DomainError::database("Simulated read failure"));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<(), DomainError> {
        if *self.fail_writes.read().unwrap_or_else(PoisonError::into_inner) {
            return Err(DomainError::database("Simulated write failure"));
        }
        Ok(())
    }
}

fn not_found(id: &ConversationId) -> DomainError {
    DomainError::new(
        ErrorCode::ConversationNotFound,
        format!("Conversation {} not found", id),
    )
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Conversation>, DomainError> {
        self.check_read()?;
        let mut list: Vec<Conversation> = self
            .read_tables()
            .conversations
            .values()
            .filter(|c| c.user_id() == user_id)
            .cloned()
            .collect();
        sort_newest_first(&mut list);
        Ok(list)
    }

    async fn find_by_id(&self, id: &ConversationId) -> Result<Option<Conversation>, DomainError> {
        self.check_read()?;
        Ok(self.read_tables().conversations.get(id).cloned())
    }

    async fn insert_conversation(&self, conversation: &Conversation) -> Result<(), DomainError> {
        self.check_write()?;
        self.write_tables()
            .conversations
            .insert(*conversation.id(), conversation.clone());
        Ok(())
    }

    async fn delete_conversation(&self, id: &ConversationId) -> Result<(), DomainError> {
        self.check_write()?;
        let mut tables = self.write_tables();
        if tables.conversations.remove(id).is_none() {
            return Err(not_found(id));
        }
        tables.messages.retain(|m| m.conversation_id() != id);
        Ok(())
    }

    async fn list_messages(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Vec<Message>, DomainError> {
        self.check_read()?;
        let mut list: Vec<Message> = self
            .read_tables()
            .messages
            .iter()
            .filter(|m| m.conversation_id() == conversation_id)
            .cloned()
            .collect();
        sort_oldest_first(&mut list);
        Ok(list)
    }

    async fn insert_messages(&self, messages: &[Message]) -> Result<(), DomainError> {
        self.check_write()?;
        let mut tables = self.write_tables();
        // All or nothing, like the transaction in the SQL store.
        if let Some(orphan) = messages
            .iter()
            .find(|m| !tables.conversations.contains_key(m.conversation_id()))
        {
            return Err(not_found(orphan.conversation_id()));
        }
        tables.messages.extend_from_slice(messages);
        Ok(())
    }
}
