//! UploadDocumentHandler - turns a submitted file into a conversation.
//!
//! Steps: validate, upload to the document source, insert the conversation.
//! Validation failures never reach the network. If the insert fails after a
//! successful upload, the orphaned vendor document is deleted best-effort.

use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::conversation::{suggested_questions, welcome_for, Conversation, Welcome};
use crate::domain::document::{PdfUpload, UploadError};
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{ConversationStore, DocumentSource, DocumentSourceError};

/// Command to upload a document and open a conversation on it.
#[derive(Debug, Clone)]
pub struct UploadDocumentCommand {
    pub user_id: UserId,
    pub file_name: Option<String>,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Result of a successful upload.
#[derive(Debug, Clone)]
pub struct UploadDocumentResult {
    pub conversation: Conversation,
    pub suggested_questions: Vec<String>,
    pub welcome: Welcome,
    /// The validated file, kept for previewing.
    pub file: PdfUpload,
}

/// Errors that can occur when uploading a document.
#[derive(Debug, Clone, Error)]
pub enum UploadDocumentError {
    /// The file was refused before any network call.
    #[error(transparent)]
    Rejected(#[from] UploadError),

    /// The document source failed; nothing was persisted.
    #[error("Document upload failed: {0}")]
    DocumentSource(DocumentSourceError),

    /// The conversation could not be stored.
    #[error("Failed to store conversation: {0}")]
    Storage(DomainError),
}

/// Handler for document uploads.
#[derive(Clone)]
pub struct UploadDocumentHandler {
    source: Arc<dyn DocumentSource>,
    store: Arc<dyn ConversationStore>,
}

impl UploadDocumentHandler {
    pub fn new(source: Arc<dyn DocumentSource>, store: Arc<dyn ConversationStore>) -> Self {
        Self { source, store }
    }

    pub async fn handle(
        &self,
        cmd: UploadDocumentCommand,
    ) -> Result<UploadDocumentResult, UploadDocumentError> {
        // 1. Validate before touching the network
        let file = PdfUpload::new(cmd.file_name.as_deref(), &cmd.content_type, cmd.bytes)?;

        // 2. Remote upload
        let source_id = self.source.upload(&file).await.map_err(|e| {
            error!(file_name = file.file_name(), error = %e, "Document upload failed");
            UploadDocumentError::DocumentSource(e)
        })?;

        // 3. Persist the conversation
        let conversation = Conversation::new(cmd.user_id, file.file_name(), source_id)
            .map_err(|e| UploadDocumentError::Storage(e.into()))?;

        if let Err(e) = self.store.insert_conversation(&conversation).await {
            error!(
                source_id = %conversation.source_id(),
                error = %e,
                "Failed to store conversation, removing uploaded document"
            );
            if let Err(cleanup) = self.source.delete_source(conversation.source_id()).await {
                warn!(
                    source_id = %conversation.source_id(),
                    error = %cleanup,
                    "Orphaned document could not be deleted"
                );
            }
            return Err(UploadDocumentError::Storage(e));
        }

        info!(
            conversation_id = %conversation.id(),
            source_id = %conversation.source_id(),
            bytes = file.len(),
            "Document uploaded"
        );

        Ok(UploadDocumentResult {
            welcome: welcome_for(conversation.pdf_name()),
            conversation,
            suggested_questions: suggested_questions(),
            file,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::chatpdf::{MockCall, MockDocumentSource};
    use crate::adapters::memory::InMemoryConversationStore;

    fn command(content_type: &str, bytes: Vec<u8>) -> UploadDocumentCommand {
        UploadDocumentCommand {
            user_id: UserId::new("alice").unwrap(),
            file_name: Some("report.pdf".to_string()),
            content_type: content_type.to_string(),
            bytes,
        }
    }

    fn handler(
        source: &MockDocumentSource,
        store: &InMemoryConversationStore,
    ) -> UploadDocumentHandler {
        UploadDocumentHandler::new(Arc::new(source.clone()), Arc::new(store.clone()))
    }

    #[tokio::test]
    async fn valid_upload_creates_one_conversation() {
        let source = MockDocumentSource::new().with_source_id("src_123");
        let store = InMemoryConversationStore::new();

        let result = handler(&source, &store)
            .handle(command("application/pdf", b"%PDF".to_vec()))
            .await
            .unwrap();

        assert_eq!(result.conversation.title(), "report.pdf");
        assert_eq!(result.conversation.source_id().as_str(), "src_123");
        assert_eq!(result.suggested_questions.len(), 4);
        assert_eq!(result.welcome.title, "Análise do Documento");
        assert_eq!(store.conversation_count(), 1);
    }

    #[tokio::test]
    async fn non_pdf_is_rejected_without_network_call() {
        let source = MockDocumentSource::new();
        let store = InMemoryConversationStore::new();

        let err = handler(&source, &store)
            .handle(command("text/plain", b"hello".to_vec()))
            .await
            .unwrap_err();

        assert!(matches!(err, UploadDocumentError::Rejected(UploadError::NotPdf { .. })));
        assert_eq!(source.call_count(), 0);
        assert_eq!(store.conversation_count(), 0);
    }

    #[tokio::test]
    async fn empty_file_is_rejected_without_network_call() {
        let source = MockDocumentSource::new();
        let store = InMemoryConversationStore::new();

        let err = handler(&source, &store)
            .handle(command("application/pdf", vec![]))
            .await
            .unwrap_err();

        assert!(matches!(err, UploadDocumentError::Rejected(UploadError::EmptyFile)));
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn vendor_failure_persists_nothing() {
        let source =
            MockDocumentSource::new().with_upload_error(DocumentSourceError::status(500, "down"));
        let store = InMemoryConversationStore::new();

        let err = handler(&source, &store)
            .handle(command("application/pdf", b"%PDF".to_vec()))
            .await
            .unwrap_err();

        assert!(matches!(err, UploadDocumentError::DocumentSource(_)));
        assert_eq!(store.conversation_count(), 0);
    }

    #[tokio::test]
    async fn storage_failure_deletes_orphaned_document() {
        let source = MockDocumentSource::new().with_source_id("src_orphan");
        let store = InMemoryConversationStore::new();
        store.set_fail_writes(true);

        let err = handler(&source, &store)
            .handle(command("application/pdf", b"%PDF".to_vec()))
            .await
            .unwrap_err();

        assert!(matches!(err, UploadDocumentError::Storage(_)));
        assert_eq!(
            source.calls().last(),
            Some(&MockCall::Delete {
                source_id: "src_orphan".to_string()
            })
        );
    }
}
