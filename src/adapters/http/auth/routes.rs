//! Axum routes for auth endpoints.

use axum::{routing::post, Router};

use super::handlers::{sign_in, sign_up, AuthAppState};

/// Auth routes, mounted at `/api/auth`.
pub fn auth_routes() -> Router<AuthAppState> {
    Router::new()
        .route("/sign-in", post(sign_in))
        .route("/sign-up", post(sign_up))
}
