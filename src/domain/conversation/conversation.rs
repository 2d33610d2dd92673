//! Conversation entity.
//!
//! A conversation pairs one uploaded document (identified on the vendor side
//! by its `SourceId`) with the chat history about it. It is created after a
//! successful upload and deleted only by its owner.

use serde::{Deserialize, Serialize};

use super::SourceId;
use crate::domain::foundation::{
    ConversationId, OwnedByUser, Timestamp, UserId, ValidationError,
};

/// A user's chat about one uploaded PDF.
///
/// # Invariants
///
/// - `title` and `pdf_name` are non-blank
/// - `source_id` is the vendor handle returned by the upload
/// - `created_at` never changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    id: ConversationId,
    title: String,
    pdf_name: String,
    source_id: SourceId,
    user_id: UserId,
    created_at: Timestamp,
}

impl Conversation {
    /// Creates a conversation for a freshly uploaded document.
    ///
    /// The title defaults to the file name.
    pub fn new(
        user_id: UserId,
        pdf_name: impl Into<String>,
        source_id: SourceId,
    ) -> Result<Self, ValidationError> {
        let pdf_name = pdf_name.into();
        if pdf_name.trim().is_empty() {
            return Err(ValidationError::empty_field("pdf_name"));
        }

        Ok(Self {
            id: ConversationId::new(),
            title: pdf_name.clone(),
            pdf_name,
            source_id,
            user_id,
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitutes a conversation from persistence (no validation).
    pub fn reconstitute(
        id: ConversationId,
        title: String,
        pdf_name: String,
        source_id: SourceId,
        user_id: UserId,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            title,
            pdf_name,
            source_id,
            user_id,
            created_at,
        }
    }

    pub fn id(&self) -> &ConversationId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn pdf_name(&self) -> &str {
        &self.pdf_name
    }

    /// Vendor handle used for every chat call on this conversation.
    pub fn source_id(&self) -> &SourceId {
        &self.source_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}

impl OwnedByUser for Conversation {
    fn owner_id(&self) -> &UserId {
        &self.user_id
    }
}

/// Orders conversations newest first, the order every listing uses.
pub fn sort_newest_first(conversations: &mut [Conversation]) {
    conversations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
