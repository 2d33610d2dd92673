//! Authentication types for the domain layer.
//!
//! These types represent an authenticated user extracted from a validated
//! access token, plus the sign-in/sign-up failures surfaced to clients. They
//! have no dependency on a particular auth provider: the `SessionValidator`
//! and `AuthProvider` ports populate them.

use super::UserId;
use thiserror::Error;

/// Provider message returned when signing up with an email that already exists.
const ACCOUNT_EXISTS_MARKER: &str = "User already registered";

/// Provider message returned for a wrong email/password pair.
const INVALID_CREDENTIALS_MARKER: &str = "Invalid login credentials";

/// Authenticated user extracted from a validated JWT.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The unique user identifier from the auth provider.
    pub id: UserId,

    /// User's email address from the token claims, when present.
    pub email: Option<String>,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId, email: Option<String>) -> Self {
        Self { id, email }
    }
}

/// Authentication errors.
///
/// Token errors come from the `SessionValidator`; credential errors come from
/// the `AuthProvider` during sign-in and sign-up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// Sign-up with an email that is already registered.
    #[error("An account with this email already exists")]
    AccountExists,

    /// Sign-in with a wrong email/password pair.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The provider rejected the request for another reason.
    #[error("Authentication rejected: {0}")]
    Rejected(String),

    /// The authentication service is unavailable (network, config, etc.).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Classifies a raw provider error message.
    ///
    /// The provider reports credential failures only as free text, so the
    /// two cases clients act on are recognised by substring.
    pub fn from_provider_message(message: &str) -> Self {
        if message.contains(ACCOUNT_EXISTS_MARKER) {
            AuthError::AccountExists
        } else if message.contains(INVALID_CREDENTIALS_MARKER) {
            AuthError::InvalidCredentials
        } else {
            AuthError::Rejected(message.to_string())
        }
    }
}
