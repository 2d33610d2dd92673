//! HTTP adapter for conversation endpoints.
//!
//! - `GET /api/conversations` - list the caller's conversations
//! - `POST /api/conversations` - upload a PDF (multipart field `file`)
//! - `DELETE /api/conversations/:id` - delete a conversation and its document
//! - `GET|POST /api/conversations/:id/messages` - read history or ask a question
//! - `POST /api/conversations/:id/quick-actions/:action` - canned prompts
//! - `GET /api/conversations/:id/export?format=txt|csv|html|table` - download the transcript
//! - `GET|DELETE /api/previews/:id` - read or release the caller's last uploaded PDF

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{ConversationApiError, ConversationAppState};
pub use routes::{conversation_router, conversation_routes, preview_routes};
