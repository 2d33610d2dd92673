//! Axum routes for conversation and preview endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{
    delete_conversation, export_conversation, get_messages, get_preview, list_conversations,
    revoke_preview, run_quick_action, send_message, upload_document, ConversationAppState,
};

/// Conversation routes, mounted at `/api/conversations`.
///
/// - `GET /` - list, newest first
/// - `POST /` - multipart upload
/// - `DELETE /:id`
/// - `GET /:id/messages`, `POST /:id/messages`
/// - `POST /:id/quick-actions/:action`
/// - `GET /:id/export`
pub fn conversation_routes() -> Router<ConversationAppState> {
    Router::new()
        .route("/", get(list_conversations).post(upload_document))
        .route("/:id", delete(delete_conversation))
        .route("/:id/messages", get(get_messages).post(send_message))
        .route("/:id/quick-actions/:action", post(run_quick_action))
        .route("/:id/export", get(export_conversation))
}

/// Preview routes, mounted at `/api/previews`.
///
/// `DELETE /:id` releases the bytes once the client stops showing the file.
pub fn preview_routes() -> Router<ConversationAppState> {
    Router::new().route("/:id", get(get_preview).delete(revoke_preview))
}

/// Both routers nested under `/api`.
pub fn conversation_router() -> Router<ConversationAppState> {
    Router::new()
        .nest("/api/conversations", conversation_routes())
        .nest("/api/previews", preview_routes())
}
