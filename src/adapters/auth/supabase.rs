//! Supabase-compatible (GoTrue) client for email/password auth.
//!
//! Credential failures come back as free-text messages; they are classified
//! with `AuthError::from_provider_message`.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::{AuthProvider, AuthSession, Credentials, SignUpOutcome};

/// HTTP client for the identity service.
pub struct SupabaseAuthClient {
    base_url: String,
    anon_key: Secret<String>,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct UserBody {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SessionBody {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
    user: UserBody,
}

/// Sign-up answers with a session, or with the bare user when email
/// confirmation is pending.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpBody {
    Session(SessionBody),
    User(UserBody),
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ErrorBody {
    fn text(self) -> Option<String> {
        self.error_description.or(self.msg).or(self.message)
    }
}

impl SupabaseAuthClient {
    pub fn new(
        base_url: impl Into<String>,
        anon_key: impl Into<String>,
    ) -> Result<Self, AuthError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AuthError::service_unavailable(format!("Failed to build client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: Secret::new(anon_key.into()),
            client,
        })
    }

    async fn post(&self, path: &str, credentials: &Credentials) -> Result<Response, AuthError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .header("apikey", self.anon_key.expose_secret())
            .json(credentials)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Identity service unreachable: {}", e);
                AuthError::service_unavailable(e.to_string())
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let raw = response.text().await.unwrap_or_default();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "Identity service error");
            return Err(AuthError::service_unavailable(format!("status {}", status)));
        }

        let message = serde_json::from_str::<ErrorBody>(&raw)
            .ok()
            .and_then(ErrorBody::text)
            .unwrap_or(raw);
        Err(AuthError::from_provider_message(&message))
    }
}

fn to_user(body: UserBody) -> Result<AuthenticatedUser, AuthError> {
    let id = UserId::new(body.id)
        .map_err(|_| AuthError::service_unavailable("Identity service returned a blank user id"))?;
    Ok(AuthenticatedUser::new(id, body.email))
}

fn to_session(body: SessionBody) -> Result<AuthSession, AuthError> {
    Ok(AuthSession {
        access_token: body.access_token,
        refresh_token: body.refresh_token,
        expires_in: body.expires_in,
        user: to_user(body.user)?,
    })
}

fn parse_error(e: reqwest::Error) -> AuthError {
    AuthError::service_unavailable(format!("Unexpected identity service response: {}", e))
}

#[async_trait]
impl AuthProvider for SupabaseAuthClient {
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthSession, AuthError> {
        let response = self
            .post("/auth/v1/token?grant_type=password", credentials)
            .await?;
        let body: SessionBody = response.json().await.map_err(parse_error)?;
        to_session(body)
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<SignUpOutcome, AuthError> {
        let response = self.post("/auth/v1/signup", credentials).await?;
        let body: SignUpBody = response.json().await.map_err(parse_error)?;

        match body {
            SignUpBody::Session(session) => {
                let session = to_session(session)?;
                Ok(SignUpOutcome {
                    user: session.user.clone(),
                    session: Some(session),
                })
            }
            SignUpBody::User(user) => Ok(SignUpOutcome {
                user: to_user(user)?,
                session: None,
            }),
        }
    }
}

impl std::fmt::Debug for SupabaseAuthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseAuthClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
