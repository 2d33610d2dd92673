//! Document source port - the remote conversational-PDF service.
//!
//! The vendor owns parsing, retrieval and inference. This port only moves
//! files in, questions through, and handles out. Every chat call names its
//! source explicitly; there is no implicit "current document".

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::conversation::{AssistantReply, SourceId};
use crate::domain::document::PdfUpload;

/// Port for the remote document service.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Uploads a PDF and returns the vendor's handle for it.
    async fn upload(&self, file: &PdfUpload) -> Result<SourceId, DocumentSourceError>;

    /// Asks a question about the document identified by `source_id`.
    async fn chat(
        &self,
        source_id: &SourceId,
        question: &str,
    ) -> Result<AssistantReply, DocumentSourceError>;

    /// Deletes the vendor copy of a document.
    ///
    /// Callers treat this as best-effort.
    async fn delete_source(&self, source_id: &SourceId) -> Result<(), DocumentSourceError>;
}

/// Errors from the document service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentSourceError {
    /// The vendor answered with a non-success status.
    #[error("document service returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body text.
        body: String,
    },

    /// The request never completed.
    #[error("network error: {0}")]
    Network(String),

    /// The request exceeded the configured timeout.
    #[error("request timed out after {secs}s")]
    Timeout { secs: u64 },

    /// The response could not be understood.
    #[error("parse error: {0}")]
    Parse(String),

    /// The client could not be built or configured.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl DocumentSourceError {
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// Returns the vendor status code, if the vendor answered.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
