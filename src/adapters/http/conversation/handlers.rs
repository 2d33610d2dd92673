//! HTTP handlers for conversation and preview endpoints.
//!
//! These handlers connect axum routes to the conversation command and query
//! handlers. Every route requires `RequireAuth`.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Json, Multipart, Path, Query, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::conversation::{
    ConversationAccessError, DeleteConversationCommand, DeleteConversationHandler,
    ExportConversationHandler, ExportConversationQuery, GetMessagesHandler, GetMessagesQuery,
    ListConversationsHandler, ListConversationsQuery, QuickActionCommand, QuickActionHandler,
    SendMessageCommand, SendMessageHandler, UploadDocumentCommand, UploadDocumentError,
    UploadDocumentHandler,
};
use crate::application::{ExchangeOutcome, PreviewRegistry};
use crate::domain::conversation::{ExportFormat, QuickAction};
use crate::domain::document::UploadError;
use crate::domain::foundation::{ConversationId, PreviewId, ValidationError};
use crate::ports::{ConversationStore, DocumentSource};

use super::dto::{
    preview_url, ConversationListResponse, ConversationView, ExchangeResponse, ExportParams,
    MessageListResponse, MessageView, SendMessageRequest, UploadResponse,
};

/// Multipart field carrying the PDF.
const FILE_FIELD: &str = "file";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Dependencies of the conversation endpoints.
#[derive(Clone)]
pub struct ConversationAppState {
    pub store: Arc<dyn ConversationStore>,
    pub source: Arc<dyn DocumentSource>,
    pub previews: Arc<PreviewRegistry>,
}

impl ConversationAppState {
    pub fn new(
        store: Arc<dyn ConversationStore>,
        source: Arc<dyn DocumentSource>,
        previews: Arc<PreviewRegistry>,
    ) -> Self {
        Self {
            store,
            source,
            previews,
        }
    }

    pub fn upload_handler(&self) -> UploadDocumentHandler {
        UploadDocumentHandler::new(self.source.clone(), self.store.clone())
    }

    pub fn send_handler(&self) -> SendMessageHandler {
        SendMessageHandler::new(self.source.clone(), self.store.clone())
    }

    pub fn quick_action_handler(&self) -> QuickActionHandler {
        QuickActionHandler::new(self.send_handler())
    }

    pub fn list_handler(&self) -> ListConversationsHandler {
        ListConversationsHandler::new(self.store.clone())
    }

    pub fn messages_handler(&self) -> GetMessagesHandler {
        GetMessagesHandler::new(self.store.clone())
    }

    pub fn delete_handler(&self) -> DeleteConversationHandler {
        DeleteConversationHandler::new(self.source.clone(), self.store.clone())
    }

    pub fn export_handler(&self) -> ExportConversationHandler {
        ExportConversationHandler::new(self.store.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/conversations - the caller's conversations, newest first
pub async fn list_conversations(
    State(state): State<ConversationAppState>,
    RequireAuth(user): RequireAuth,
) -> Json<ConversationListResponse> {
    let conversations = state
        .list_handler()
        .handle(ListConversationsQuery { user_id: user.id })
        .await;

    Json(ConversationListResponse {
        conversations: conversations.iter().map(ConversationView::from).collect(),
    })
}

/// POST /api/conversations - upload a PDF and open a conversation on it
pub async fn upload_document(
    State(state): State<ConversationAppState>,
    RequireAuth(user): RequireAuth,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ConversationApiError> {
    let mut command = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ConversationApiError::bad_request("INVALID_MULTIPART", e.to_string()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ConversationApiError::bad_request("INVALID_MULTIPART", e.to_string()))?;

        command = Some(UploadDocumentCommand {
            user_id: user.id.clone(),
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
        break;
    }

    let command = command.ok_or_else(|| {
        ConversationApiError::bad_request("MISSING_FILE", "Multipart field 'file' is required")
    })?;

    let result = state.upload_handler().handle(command).await?;
    let preview_id = state
        .previews
        .publish(&user.id, *result.conversation.id(), &result.file);

    let body = UploadResponse {
        conversation: ConversationView::from(&result.conversation),
        suggested_questions: result.suggested_questions,
        welcome: result.welcome.into(),
        preview_url: preview_url(&preview_id),
    };
    Ok((StatusCode::CREATED, Json(body)))
}

/// DELETE /api/conversations/:id
pub async fn delete_conversation(
    State(state): State<ConversationAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<StatusCode, ConversationApiError> {
    let conversation_id = parse_conversation_id(&id)?;

    state
        .delete_handler()
        .handle(DeleteConversationCommand {
            user_id: user.id.clone(),
            conversation_id,
        })
        .await?;
    state
        .previews
        .revoke_for_conversation(&user.id, &conversation_id);

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/conversations/:id/messages - persisted messages, oldest first
pub async fn get_messages(
    State(state): State<ConversationAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Json<MessageListResponse>, ConversationApiError> {
    let conversation_id = parse_conversation_id(&id)?;

    let messages = state
        .messages_handler()
        .handle(GetMessagesQuery {
            user_id: user.id,
            conversation_id,
        })
        .await?;

    Ok(Json(MessageListResponse {
        messages: messages.iter().map(MessageView::from).collect(),
    }))
}

/// POST /api/conversations/:id/messages - ask a question
///
/// A blank question is a no-op answered with 204.
pub async fn send_message(
    State(state): State<ConversationAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Response, ConversationApiError> {
    let conversation_id = parse_conversation_id(&id)?;

    let outcome = state
        .send_handler()
        .handle(SendMessageCommand {
            user_id: user.id,
            conversation_id,
            content: request.content,
        })
        .await?;

    Ok(exchange_response(&outcome))
}

/// POST /api/conversations/:id/quick-actions/:action
pub async fn run_quick_action(
    State(state): State<ConversationAppState>,
    RequireAuth(user): RequireAuth,
    Path((id, action)): Path<(String, String)>,
) -> Result<Response, ConversationApiError> {
    let conversation_id = parse_conversation_id(&id)?;
    let action: QuickAction = action
        .parse()
        .map_err(|e: ValidationError| {
            ConversationApiError::bad_request("UNKNOWN_ACTION", e.to_string())
        })?;

    let outcome = state
        .quick_action_handler()
        .handle(QuickActionCommand {
            user_id: user.id,
            conversation_id,
            action,
        })
        .await?;

    Ok(exchange_response(&outcome))
}

/// GET /api/conversations/:id/export?format=txt|csv|html|table
pub async fn export_conversation(
    State(state): State<ConversationAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    Query(params): Query<ExportParams>,
) -> Result<Response, ConversationApiError> {
    let conversation_id = parse_conversation_id(&id)?;
    let format = match params.format.as_deref() {
        None | Some("") => ExportFormat::default(),
        Some(raw) => raw
            .parse()
            .map_err(|e: ValidationError| {
                ConversationApiError::bad_request("UNSUPPORTED_FORMAT", e.to_string())
            })?,
    };

    let transcript = state
        .export_handler()
        .handle(ExportConversationQuery {
            user_id: user.id,
            conversation_id,
            format,
        })
        .await?;

    let disposition = content_disposition("attachment", &transcript.file_name)?;
    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(transcript.content_type)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        transcript.body,
    )
        .into_response())
}

/// GET /api/previews/:id - the caller's current PDF preview
pub async fn get_preview(
    State(state): State<ConversationAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Response, ConversationApiError> {
    let preview = id
        .parse::<PreviewId>()
        .ok()
        .and_then(|preview_id| state.previews.get(&user.id, &preview_id))
        .ok_or(ConversationApiError::PreviewNotFound)?;

    let disposition = content_disposition("inline", &preview.file_name)?;
    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Body::from(preview.bytes.as_ref().clone()),
    )
        .into_response())
}

/// DELETE /api/previews/:id - release the caller's preview
pub async fn revoke_preview(
    State(state): State<ConversationAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<StatusCode, ConversationApiError> {
    let revoked = id
        .parse::<PreviewId>()
        .map(|preview_id| state.previews.revoke_handle(&user.id, &preview_id))
        .unwrap_or(false);

    if revoked {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ConversationApiError::PreviewNotFound)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════════

/// A malformed id cannot name an existing conversation.
fn parse_conversation_id(raw: &str) -> Result<ConversationId, ConversationApiError> {
    raw.parse::<ConversationId>()
        .map_err(|_| ConversationApiError::ConversationNotFound)
}

fn exchange_response(outcome: &ExchangeOutcome) -> Response {
    match ExchangeResponse::from_outcome(outcome) {
        Some(body) => (StatusCode::OK, Json(body)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// `Content-Disposition` with an ASCII fallback name and an RFC 5987 UTF-8 name.
fn content_disposition(kind: &str, file_name: &str) -> Result<HeaderValue, ConversationApiError> {
    let fallback: String = file_name
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let value = format!(
        "{}; filename=\"{}\"; filename*=UTF-8''{}",
        kind,
        fallback,
        percent_encode(file_name)
    );
    HeaderValue::from_str(&value).map_err(|e| ConversationApiError::Internal(e.to_string()))
}

fn percent_encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// Errors surfaced by the conversation endpoints.
#[derive(Debug)]
pub enum ConversationApiError {
    Upload(UploadDocumentError),
    Access(ConversationAccessError),
    ConversationNotFound,
    PreviewNotFound,
    BadRequest { code: &'static str, message: String },
    Internal(String),
}

impl ConversationApiError {
    fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }
}

impl From<UploadDocumentError> for ConversationApiError {
    fn from(err: UploadDocumentError) -> Self {
        Self::Upload(err)
    }
}

impl From<ConversationAccessError> for ConversationApiError {
    fn from(err: ConversationAccessError) -> Self {
        Self::Access(err)
    }
}

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl IntoResponse for ConversationApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ConversationApiError::Upload(UploadDocumentError::Rejected(e)) => {
                let code = match &e {
                    UploadError::NotPdf { .. } => "NOT_PDF",
                    UploadError::EmptyFile => "EMPTY_FILE",
                };
                (StatusCode::BAD_REQUEST, ErrorResponse::new(code, e.to_string()))
            }
            ConversationApiError::Upload(UploadDocumentError::DocumentSource(e)) => {
                error!(error = %e, "Document upload failed");
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse::new(
                        "DOCUMENT_SOURCE_ERROR",
                        "The document service could not process the file",
                    ),
                )
            }
            ConversationApiError::Upload(UploadDocumentError::Storage(e)) => {
                error!(error = %e, "Failed to store uploaded conversation");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("INTERNAL_ERROR", INTERNAL_MESSAGE),
                )
            }
            ConversationApiError::Access(ConversationAccessError::NotFound(_))
            | ConversationApiError::ConversationNotFound => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new("CONVERSATION_NOT_FOUND", "Conversation not found"),
            ),
            ConversationApiError::Access(ConversationAccessError::Forbidden) => (
                StatusCode::FORBIDDEN,
                ErrorResponse::new("FORBIDDEN", "You do not have access to this conversation"),
            ),
            ConversationApiError::Access(ConversationAccessError::Storage(e)) => {
                error!(error = %e, "Conversation storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("INTERNAL_ERROR", INTERNAL_MESSAGE),
                )
            }
            ConversationApiError::PreviewNotFound => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new("PREVIEW_NOT_FOUND", "Preview not found"),
            ),
            ConversationApiError::BadRequest { code, message } => {
                (StatusCode::BAD_REQUEST, ErrorResponse::new(code, message))
            }
            ConversationApiError::Internal(message) => {
                error!(error = %message, "Conversation endpoint failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("INTERNAL_ERROR", INTERNAL_MESSAGE),
                )
            }
        };

        body.with_status(status)
    }
}
