//! HTTP adapter for authentication endpoints.
//!
//! - `POST /api/auth/sign-in` - exchange email/password for a session
//! - `POST /api/auth/sign-up` - register an account

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{AuthApiError, AuthAppState};
pub use routes::auth_routes;
