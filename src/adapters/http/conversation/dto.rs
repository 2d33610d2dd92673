//! HTTP DTOs for conversation endpoints.

use serde::{Deserialize, Serialize};

use crate::application::ExchangeOutcome;
use crate::domain::conversation::{Conversation, Message, Role, SourceCitation, Welcome};
use crate::domain::foundation::PreviewId;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/conversations/:id/messages`.
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

/// Query of `GET /api/conversations/:id/export`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportParams {
    /// `txt` (default) or `csv`.
    pub format: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// A conversation as seen by API clients. The vendor source id stays server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationView {
    pub id: String,
    pub title: String,
    pub pdf_name: String,
    pub created_at: String,
}

impl From<&Conversation> for ConversationView {
    fn from(c: &Conversation) -> Self {
        Self {
            id: c.id().to_string(),
            title: c.title().to_string(),
            pdf_name: c.pdf_name().to_string(),
            created_at: c.created_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub created_at: String,
}

impl From<&Message> for MessageView {
    fn from(m: &Message) -> Self {
        Self {
            id: m.id().to_string(),
            role: m.role(),
            content: m.content().to_string(),
            created_at: m.created_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationListResponse {
    pub conversations: Vec<ConversationView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageListResponse {
    pub messages: Vec<MessageView>,
}

/// Response to a successful upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub conversation: ConversationView,
    pub suggested_questions: Vec<String>,
    /// Greeting chosen from the document name.
    pub welcome: WelcomeView,
    /// Owner-only URL serving the uploaded PDF.
    pub preview_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeView {
    pub title: String,
    pub description: String,
    pub topics: Vec<String>,
    pub question: String,
}

impl From<Welcome> for WelcomeView {
    fn from(w: Welcome) -> Self {
        Self {
            title: w.title.to_string(),
            description: w.description.to_string(),
            topics: w.topics.iter().map(|t| t.to_string()).collect(),
            question: w.question.to_string(),
        }
    }
}

/// Path under which a preview is served.
pub fn preview_url(id: &PreviewId) -> String {
    format!("/api/previews/{}", id)
}

/// How an exchange ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeStatus {
    /// The document service replied.
    Answered,
    /// The document service failed; `answer` is a local apology.
    Failed,
}

/// Response to a send or a quick action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeResponse {
    pub status: ExchangeStatus,
    pub question: MessageView,
    pub answer: MessageView,
    pub citations: Vec<SourceCitation>,
    /// Whether both messages were stored.
    pub persisted: bool,
}

impl ExchangeResponse {
    /// `None` for a skipped exchange.
    pub fn from_outcome(outcome: &ExchangeOutcome) -> Option<Self> {
        match outcome {
            ExchangeOutcome::Skipped => None,
            ExchangeOutcome::Answered {
                question,
                answer,
                citations,
                persisted,
            } => Some(Self {
                status: ExchangeStatus::Answered,
                question: question.into(),
                answer: answer.into(),
                citations: citations.clone(),
                persisted: *persisted,
            }),
            ExchangeOutcome::Failed {
                question, apology, ..
            } => Some(Self {
                status: ExchangeStatus::Failed,
                question: question.into(),
                answer: apology.into(),
                citations: Vec::new(),
                persisted: false,
            }),
        }
    }
}
