//! HTTP adapters - the REST API.
//!
//! - `conversation` - upload, chat, history, export and preview endpoints
//! - `auth` - sign-in and sign-up
//! - `middleware` - Bearer token validation
//! - `router` - composition and the tower-http stack

pub mod auth;
pub mod conversation;
pub mod error;
pub mod middleware;
pub mod router;

pub use auth::{auth_routes, AuthAppState};
pub use conversation::{conversation_router, ConversationAppState};
pub use error::ErrorResponse;
pub use router::{app_router, AppState, HttpSettings};
