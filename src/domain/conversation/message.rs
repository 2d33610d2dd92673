//! Message entity for conversations.
//!
//! Messages are immutable records of user/assistant exchanges within a
//! conversation. Persisted messages always come in pairs (question, answer).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{
    ConversationId, DomainError, MessageId, Timestamp, ValidationError,
};

/// Role of a message sender in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// User question.
    User,
    /// Document assistant reply (or the local apology on failure).
    Assistant,
}

impl Role {
    /// Storage and wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

/// An immutable message within a conversation.
///
/// # Invariants
///
/// - `id` is globally unique
/// - `content` is non-blank (validated at construction)
/// - `created_at` is set at construction and never changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    conversation_id: ConversationId,
    role: Role,
    content: String,
    created_at: Timestamp,
}

impl Message {
    /// Creates a new message stamped with the given creation time.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if content is blank
    pub fn new(
        conversation_id: ConversationId,
        role: Role,
        content: impl Into<String>,
        created_at: Timestamp,
    ) -> Result<Self, DomainError> {
        let content = content.into();
        Self::validate_content(&content)?;

        Ok(Self {
            id: MessageId::new(),
            conversation_id,
            role,
            content,
            created_at,
        })
    }

    /// Creates a user message stamped now.
    pub fn user(
        conversation_id: ConversationId,
        content: impl Into<String>,
    ) -> Result<Self, DomainError> {
        Self::new(conversation_id, Role::User, content, Timestamp::now())
    }

    /// Creates an assistant message that sorts after `previous`.
    pub fn assistant_after(
        previous: &Message,
        content: impl Into<String>,
    ) -> Result<Self, DomainError> {
        Self::new(
            previous.conversation_id,
            Role::Assistant,
            content,
            previous.created_at.later_than(),
        )
    }

    /// Creates the assistant message answering `question`.
    ///
    /// Only called with content already known to be non-blank (a validated
    /// vendor reply or the fixed apology).
    pub(crate) fn answering(question: &Message, content: String) -> Self {
        Self {
            id: MessageId::new(),
            conversation_id: question.conversation_id,
            role: Role::Assistant,
            content,
            created_at: question.created_at.later_than(),
        }
    }

    /// Reconstitutes a message from persistence (no validation).
    pub fn reconstitute(
        id: MessageId,
        conversation_id: ConversationId,
        role: Role,
        content: String,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            conversation_id,
            role,
            content,
            created_at,
        }
    }

    pub fn id(&self) -> &MessageId {
        &self.id
    }

    pub fn conversation_id(&self) -> &ConversationId {
        &self.conversation_id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    pub fn is_assistant(&self) -> bool {
        self.role == Role::Assistant
    }

    fn validate_content(content: &str) -> Result<(), DomainError> {
        if content.trim().is_empty() {
            return Err(DomainError::validation(
                "content",
                "Message content cannot be empty",
            ));
        }
        Ok(())
    }
}

/// Orders messages oldest first, the order transcripts are shown and exported in.
pub fn sort_oldest_first(messages: &mut [Message]) {
    messages.sort_by(|a, b| a.created_at.cmp(&b.created_at));
}
