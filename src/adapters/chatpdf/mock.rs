//! Mock document source for testing.
//!
//! Scripted replies, error injection, and a call log, so handlers can be
//! exercised without the vendor.
//!
//! ```ignore
//! let source = MockDocumentSource::new()
//!     .with_source_id("src_123")
//!     .with_reply("It is a report.");
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::conversation::{AssistantReply, SourceCitation, SourceId};
use crate::domain::document::PdfUpload;
use crate::ports::{DocumentSource, DocumentSourceError};

/// A recorded call against the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Upload { file_name: String },
    Chat { source_id: String, question: String },
    Delete { source_id: String },
}

#[derive(Debug, Default)]
struct MockState {
    uploads: VecDeque<Result<String, DocumentSourceError>>,
    replies: VecDeque<Result<(String, Vec<SourceCitation>), DocumentSourceError>>,
    delete_error: Option<DocumentSourceError>,
    calls: Vec<MockCall>,
    next_source: u32,
}

/// In-process `DocumentSource` with scripted behavior.
///
/// Unscripted uploads return `src_1`, `src_2`, ... and unscripted chats
/// return a fixed reply.
#[derive(Debug, Clone, Default)]
pub struct MockDocumentSource {
    state: Arc<Mutex<MockState>>,
}

pub const DEFAULT_MOCK_REPLY: &str = "Mock reply";

impl MockDocumentSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the source id returned by the next upload.
    pub fn with_source_id(self, id: impl Into<String>) -> Self {
        self.lock().uploads.push_back(Ok(id.into()));
        self
    }

    /// Queues a failure for the next upload.
    pub fn with_upload_error(self, err: DocumentSourceError) -> Self {
        self.lock().uploads.push_back(Err(err));
        self
    }

    /// Queues the reply for the next chat.
    pub fn with_reply(self, content: impl Into<String>) -> Self {
        self.with_reply_citing(content, Vec::new())
    }

    /// Queues a reply with citations for the next chat.
    pub fn with_reply_citing(
        self,
        content: impl Into<String>,
        citations: Vec<SourceCitation>,
    ) -> Self {
        self.lock().replies.push_back(Ok((content.into(), citations)));
        self
    }

    /// Queues a failure for the next chat.
    pub fn with_chat_error(self, err: DocumentSourceError) -> Self {
        self.lock().replies.push_back(Err(err));
        self
    }

    /// Makes every delete fail.
    pub fn with_delete_error(self, err: DocumentSourceError) -> Self {
        self.lock().delete_error = Some(err);
        self
    }

    /// All calls made so far, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    /// Source ids passed to `delete_source`, in order.
    pub fn deleted_sources(&self) -> Vec<String> {
        self.lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                MockCall::Delete { source_id } => Some(source_id.clone()),
                _ => None,
            })
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl DocumentSource for MockDocumentSource {
    async fn upload(&self, file: &PdfUpload) -> Result<SourceId, DocumentSourceError> {
        let mut state = self.lock();
        state.calls.push(MockCall::Upload {
            file_name: file.file_name().to_string(),
        });

        let id = match state.uploads.pop_front() {
            Some(scripted) => scripted?,
            None => {
                state.next_source += 1;
                format!("src_{}", state.next_source)
            }
        };
        SourceId::new(id).map_err(|e| DocumentSourceError::Parse(e.to_string()))
    }

    async fn chat(
        &self,
        source_id: &SourceId,
        question: &str,
    ) -> Result<AssistantReply, DocumentSourceError> {
        let mut state = self.lock();
        state.calls.push(MockCall::Chat {
            source_id: source_id.to_string(),
            question: question.to_string(),
        });

        let (content, citations) = state
            .replies
            .pop_front()
            .unwrap_or_else(|| Ok((DEFAULT_MOCK_REPLY.to_string(), Vec::new())))?;
        AssistantReply::new(content, citations).map_err(|e| DocumentSourceError::Parse(e.to_string()))
    }

    async fn delete_source(&self, source_id: &SourceId) -> Result<(), DocumentSourceError> {
        let mut state = self.lock();
        state.calls.push(MockCall::Delete {
            source_id: source_id.to_string(),
        });

        match &state.delete_error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}
