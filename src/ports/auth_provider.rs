//! Auth provider port for email/password sign-in and sign-up.
//!
//! The hosted identity service issues the JWTs that `SessionValidator`
//! later checks. This service only proxies credentials to it.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// A session issued by the identity service.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Seconds until `access_token` expires.
    pub expires_in: Option<u64>,
    pub user: AuthenticatedUser,
}

/// Result of a sign-up.
///
/// `session` is `None` when the provider requires email confirmation first.
#[derive(Debug, Clone)]
pub struct SignUpOutcome {
    pub user: AuthenticatedUser,
    pub session: Option<AuthSession>,
}

/// Email/password credentials.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Port for the identity service.
///
/// # Contract
///
/// - `AuthError::InvalidCredentials` for a wrong email/password pair
/// - `AuthError::AccountExists` when signing up an existing email
/// - `AuthError::ServiceUnavailable` for network or server errors
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthSession, AuthError>;

    async fn sign_up(&self, credentials: &Credentials) -> Result<SignUpOutcome, AuthError>;
}
