//! HTTP DTOs for sign-in and sign-up.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::AuthenticatedUser;
use crate::ports::{AuthSession, Credentials, SignUpOutcome};

/// Body of both auth endpoints.
#[derive(Clone, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

impl CredentialsRequest {
    /// Trims the email; the password is passed through untouched.
    pub fn into_credentials(self) -> Credentials {
        Credentials {
            email: self.email.trim().to_string(),
            password: self.password,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserView {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl From<&AuthenticatedUser> for UserView {
    fn from(user: &AuthenticatedUser) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
    pub user: UserView,
}

impl From<AuthSession> for SessionResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            user: UserView::from(&session.user),
            access_token: session.access_token,
            refresh_token: session.refresh_token,
            expires_in: session.expires_in,
        }
    }
}

/// Sign-up result. `session` is absent while the email awaits confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpResponse {
    pub user: UserView,
    pub session: Option<SessionResponse>,
    pub confirmation_required: bool,
}

impl From<SignUpOutcome> for SignUpResponse {
    fn from(outcome: SignUpOutcome) -> Self {
        Self {
            user: UserView::from(&outcome.user),
            confirmation_required: outcome.session.is_none(),
            session: outcome.session.map(SessionResponse::from),
        }
    }
}
