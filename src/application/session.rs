//! ChatSession - the per-user conversation synchronization controller.
//!
//! Holds the state a chat front-end renders: the conversation list, the
//! active conversation, the transcript with each entry's delivery status,
//! the suggested questions, and the current preview handle. All mutation
//! goes through `&mut self`, so one session never interleaves two
//! operations.
//!
//! ```text
//! upload ──► prepend + activate + seed suggestions + publish preview
//! send   ──► Pending question ──► Persisted pair | LocalOnly pair
//! select ──► replace transcript with persisted messages (oldest first)
//! delete ──► vendor delete (best-effort) + store delete ──► start_new if active
//! ```

use std::sync::Arc;
use tracing::warn;

use super::handlers::conversation::{
    ConversationAccessError, DeleteConversationCommand, DeleteConversationHandler,
    DeleteConversationResult, ExchangeOutcome, GetMessagesHandler, GetMessagesQuery,
    ListConversationsHandler, ListConversationsQuery, SendMessageHandler,
    UploadDocumentCommand, UploadDocumentError, UploadDocumentHandler,
};
use super::preview::PreviewRegistry;
use crate::domain::conversation::{
    welcome_for, Conversation, Message, QuickAction, SourceCitation, Welcome,
};
use crate::domain::foundation::{ConversationId, PreviewId, UserId};
use crate::ports::{ConversationStore, DocumentSource};

/// Where a transcript entry stands relative to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    /// Sent, awaiting the document source.
    Pending,
    /// Stored; will reappear when the conversation is reselected.
    Persisted,
    /// Shown only in this session (vendor failure or storage failure).
    LocalOnly,
}

/// A message as shown in the transcript.
#[derive(Debug, Clone)]
pub struct TranscriptEntry {
    pub message: Message,
    pub status: DeliveryStatus,
    pub citations: Vec<SourceCitation>,
}

impl TranscriptEntry {
    fn new(message: Message, status: DeliveryStatus) -> Self {
        Self {
            message,
            status,
            citations: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct PreviewHandle {
    id: PreviewId,
    conversation_id: ConversationId,
}

/// Client-state controller for one signed-in user.
pub struct ChatSession {
    user_id: UserId,
    upload: UploadDocumentHandler,
    send: SendMessageHandler,
    list: ListConversationsHandler,
    messages: GetMessagesHandler,
    delete: DeleteConversationHandler,
    previews: Arc<PreviewRegistry>,

    conversations: Vec<Conversation>,
    active: Option<Conversation>,
    transcript: Vec<TranscriptEntry>,
    suggestions: Vec<String>,
    preview: Option<PreviewHandle>,
}

impl ChatSession {
    pub fn new(
        user_id: UserId,
        source: Arc<dyn DocumentSource>,
        store: Arc<dyn ConversationStore>,
        previews: Arc<PreviewRegistry>,
    ) -> Self {
        Self {
            user_id,
            upload: UploadDocumentHandler::new(source.clone(), store.clone()),
            send: SendMessageHandler::new(source.clone(), store.clone()),
            list: ListConversationsHandler::new(store.clone()),
            messages: GetMessagesHandler::new(store.clone()),
            delete: DeleteConversationHandler::new(source, store),
            previews,
            conversations: Vec::new(),
            active: None,
            transcript: Vec::new(),
            suggestions: Vec::new(),
            preview: None,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Conversations, newest first.
    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn active(&self) -> Option<&Conversation> {
        self.active.as_ref()
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn suggested_questions(&self) -> &[String] {
        &self.suggestions
    }

    /// Greeting for the active conversation's document.
    pub fn welcome(&self) -> Option<Welcome> {
        self.active.as_ref().map(|c| welcome_for(c.pdf_name()))
    }

    pub fn preview_id(&self) -> Option<PreviewId> {
        self.preview.map(|p| p.id)
    }

    /// Reloads the conversation list. Failures leave it empty.
    pub async fn refresh(&mut self) {
        self.conversations = self
            .list
            .handle(ListConversationsQuery {
                user_id: self.user_id.clone(),
            })
            .await;
    }

    /// Uploads a file and makes its conversation active.
    ///
    /// On failure the session state is unchanged.
    pub async fn upload(
        &mut self,
        file_name: Option<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<&Conversation, UploadDocumentError> {
        let result = self
            .upload
            .handle(UploadDocumentCommand {
                user_id: self.user_id.clone(),
                file_name,
                content_type: content_type.into(),
                bytes,
            })
            .await?;

        let conversation = result.conversation;
        let preview_id = self
            .previews
            .publish(&self.user_id, *conversation.id(), &result.file);
        self.preview = Some(PreviewHandle {
            id: preview_id,
            conversation_id: *conversation.id(),
        });

        self.conversations.insert(0, conversation.clone());
        self.transcript.clear();
        self.suggestions = result.suggested_questions;
        let active = self.active.insert(conversation);
        Ok(&*active)
    }

    /// Sends a question on the active conversation.
    ///
    /// Blank text or no active conversation is a no-op.
    pub async fn send(&mut self, text: &str) -> ExchangeOutcome {
        let Some(conversation) = self.active.clone() else {
            return ExchangeOutcome::Skipped;
        };
        if text.trim().is_empty() {
            return ExchangeOutcome::Skipped;
        }

        self.suggestions.clear();

        // Shown optimistically while the document source answers.
        let pending_index = self.transcript.len();
        if let Ok(question) = Message::user(*conversation.id(), text.trim()) {
            self.transcript
                .push(TranscriptEntry::new(question, DeliveryStatus::Pending));
        }

        let outcome = self.send.exchange(&conversation, text).await;
        self.transcript.truncate(pending_index);

        match &outcome {
            ExchangeOutcome::Skipped => {}
            ExchangeOutcome::Answered {
                question,
                answer,
                citations,
                persisted,
            } => {
                let status = if *persisted {
                    DeliveryStatus::Persisted
                } else {
                    DeliveryStatus::LocalOnly
                };
                self.transcript
                    .push(TranscriptEntry::new(question.clone(), status));
                self.transcript.push(TranscriptEntry {
                    message: answer.clone(),
                    status,
                    citations: citations.clone(),
                });
            }
            ExchangeOutcome::Failed {
                question, apology, ..
            } => {
                self.transcript
                    .push(TranscriptEntry::new(question.clone(), DeliveryStatus::LocalOnly));
                self.transcript
                    .push(TranscriptEntry::new(apology.clone(), DeliveryStatus::LocalOnly));
            }
        }

        outcome
    }

    /// Sends the suggested question at `index`. Out of range is a no-op.
    pub async fn ask_suggested(&mut self, index: usize) -> ExchangeOutcome {
        match self.suggestions.get(index).cloned() {
            Some(question) => self.send(&question).await,
            None => ExchangeOutcome::Skipped,
        }
    }

    /// Sends a quick action's prompt on the active conversation.
    pub async fn quick_action(&mut self, action: QuickAction) -> ExchangeOutcome {
        self.send(action.prompt()).await
    }

    /// Makes a listed conversation active and loads its persisted messages.
    ///
    /// A preview belonging to another conversation is revoked.
    pub async fn select(&mut self, id: &ConversationId) -> Result<(), ConversationAccessError> {
        let conversation = self
            .conversations
            .iter()
            .find(|c| c.id() == id)
            .cloned()
            .ok_or(ConversationAccessError::NotFound(*id))?;

        let messages = match self
            .messages
            .handle(GetMessagesQuery {
                user_id: self.user_id.clone(),
                conversation_id: *id,
            })
            .await
        {
            Ok(messages) => messages,
            Err(e) => {
                warn!(conversation_id = %id, error = %e, "Failed to load transcript");
                Vec::new()
            }
        };

        if self.preview.is_some_and(|p| p.conversation_id != *id) {
            self.revoke_preview();
        }

        self.suggestions.clear();
        self.transcript = messages
            .into_iter()
            .map(|m| TranscriptEntry::new(m, DeliveryStatus::Persisted))
            .collect();
        self.active = Some(conversation);
        Ok(())
    }

    /// Clears the active conversation, transcript, suggestions and preview.
    pub fn start_new(&mut self) {
        self.active = None;
        self.transcript.clear();
        self.suggestions.clear();
        self.revoke_preview();
    }

    /// Deletes a conversation. The list changes only if the store delete succeeds.
    pub async fn delete(
        &mut self,
        id: &ConversationId,
    ) -> Result<DeleteConversationResult, ConversationAccessError> {
        let result = self
            .delete
            .handle(DeleteConversationCommand {
                user_id: self.user_id.clone(),
                conversation_id: *id,
            })
            .await?;

        self.conversations.retain(|c| c.id() != id);
        if self.active.as_ref().is_some_and(|c| c.id() == id) {
            self.start_new();
        } else if self.preview.is_some_and(|p| p.conversation_id == *id) {
            self.revoke_preview();
        }

        Ok(result)
    }

    fn revoke_preview(&mut self) {
        if self.preview.take().is_some() {
            self.previews.revoke(&self.user_id);
        }
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        self.revoke_preview();
    }
}
