//! HTTP handlers for sign-in and sign-up.
//!
//! Credentials are forwarded to the identity service. These routes do not
//! require a token.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{info, warn};

use crate::adapters::http::error::ErrorResponse;
use crate::domain::foundation::AuthError;
use crate::ports::AuthProvider;

use super::dto::{CredentialsRequest, SessionResponse, SignUpResponse};

/// Dependencies of the auth endpoints.
#[derive(Clone)]
pub struct AuthAppState {
    pub provider: Arc<dyn AuthProvider>,
}

impl AuthAppState {
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        Self { provider }
    }
}

/// POST /api/auth/sign-in
pub async fn sign_in(
    State(state): State<AuthAppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<Json<SessionResponse>, AuthApiError> {
    let credentials = request.into_credentials();
    let session = state.provider.sign_in(&credentials).await?;
    info!(user_id = %session.user.id, "User signed in");
    Ok(Json(session.into()))
}

/// POST /api/auth/sign-up
pub async fn sign_up(
    State(state): State<AuthAppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, AuthApiError> {
    let credentials = request.into_credentials();
    let outcome = state.provider.sign_up(&credentials).await?;
    info!(user_id = %outcome.user.id, "User signed up");
    Ok((StatusCode::CREATED, Json(SignUpResponse::from(outcome))))
}

/// Errors from the identity service, mapped to HTTP.
#[derive(Debug)]
pub struct AuthApiError(AuthError);

impl From<AuthError> for AuthApiError {
    fn from(err: AuthError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self.0 {
            AuthError::InvalidCredentials | AuthError::InvalidToken | AuthError::TokenExpired => {
                (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS")
            }
            AuthError::AccountExists => (StatusCode::CONFLICT, "ACCOUNT_EXISTS"),
            AuthError::Rejected(_) => (StatusCode::BAD_REQUEST, "AUTH_REJECTED"),
            AuthError::ServiceUnavailable(msg) => {
                warn!(error = %msg, "Identity service unavailable");
                return ErrorResponse::new(
                    "AUTH_UNAVAILABLE",
                    "Authentication service unavailable",
                )
                .with_status(StatusCode::BAD_GATEWAY);
            }
        };
        ErrorResponse::new(code, self.0.to_string()).with_status(status)
    }
}
