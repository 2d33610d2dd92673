//! PostgreSQL implementation of ConversationStore.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::conversation::{Conversation, Message, Role, SourceId};
use crate::domain::foundation::{
    ConversationId, DomainError, ErrorCode, MessageId, Timestamp, UserId,
};
use crate::ports::ConversationStore;

/// PostgreSQL implementation of ConversationStore.
#[derive(Clone)]
pub struct PostgresConversationStore {
    pool: PgPool,
}

impl PostgresConversationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConversationStore for PostgresConversationStore {
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Conversation>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, pdf_name, pdf_source_id, user_id, created_at
            FROM conversations
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list conversations: {}", e)))?;

        rows.iter().map(row_to_conversation).collect()
    }

    async fn find_by_id(&self, id: &ConversationId) -> Result<Option<Conversation>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, pdf_name, pdf_source_id, user_id, created_at
            FROM conversations
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch conversation: {}", e)))?;

        row.as_ref().map(row_to_conversation).transpose()
    }

    async fn insert_conversation(&self, conversation: &Conversation) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO conversations (id, title, pdf_name, pdf_source_id, user_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(conversation.id().as_uuid())
        .bind(conversation.title())
        .bind(conversation.pdf_name())
        .bind(conversation.source_id().as_str())
        .bind(conversation.user_id().as_str())
        .bind(conversation.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to insert conversation: {}", e)))?;

        Ok(())
    }

    async fn delete_conversation(&self, id: &ConversationId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM conversations WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to delete conversation: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ConversationNotFound,
                format!("Conversation {} not found", id),
            ));
        }

        Ok(())
    }

    async fn list_messages(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Vec<Message>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, conversation_id, role, content, created_at
            FROM messages
            WHERE conversation_id = $1
            ORDER BY created_at ASC, (role = 'assistant') ASC
            "#,
        )
        .bind(conversation_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list messages: {}", e)))?;

        rows.iter().map(row_to_message).collect()
    }

    async fn insert_messages(&self, messages: &[Message]) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::database(format!("Failed to start transaction: {}", e))
        })?;

        for message in messages {
            sqlx::query(
                r#"
                INSERT INTO messages (id, conversation_id, role, content, created_at)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(message.id().as_uuid())
            .bind(message.conversation_id().as_uuid())
            .bind(message.role().as_str())
            .bind(message.content())
            .bind(message.created_at().as_datetime())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database(format!("Failed to insert message: {}", e)))?;
        }

        tx.commit().await.map_err(|e| {
            DomainError::database(format!("Failed to commit transaction: {}", e))
        })?;

        Ok(())
    }
}

fn db_error(e: sqlx::Error) -> DomainError {
    DomainError::database(format!("Failed to read row: {}", e))
}

fn row_to_conversation(row: &PgRow) -> Result<Conversation, DomainError> {
    let id: Uuid = row.try_get("id").map_err(db_error)?;
    let title: String = row.try_get("title").map_err(db_error)?;
    let pdf_name: String = row.try_get("pdf_name").map_err(db_error)?;
    let source_id: String = row.try_get("pdf_source_id").map_err(db_error)?;
    let user_id: String = row.try_get("user_id").map_err(db_error)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(db_error)?;

    Ok(Conversation::reconstitute(
        ConversationId::from_uuid(id),
        title,
        pdf_name,
        SourceId::new(source_id)?,
        UserId::new(user_id)?,
        Timestamp::from_datetime(created_at),
    ))
}

fn row_to_message(row: &PgRow) -> Result<Message, DomainError> {
    let id: Uuid = row.try_get("id").map_err(db_error)?;
    let conversation_id: Uuid = row.try_get("conversation_id").map_err(db_error)?;
    let role: String = row.try_get("role").map_err(db_error)?;
    let content: String = row.try_get("content").map_err(db_error)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(db_error)?;

    Ok(Message::reconstitute(
        MessageId::from_uuid(id),
        ConversationId::from_uuid(conversation_id),
        role.parse::<Role>()?,
        content,
        Timestamp::from_datetime(created_at),
    ))
}
