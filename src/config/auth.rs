//! Authentication configuration
//!
//! Access tokens are verified locally with the identity provider's shared
//! HS256 secret. Sign-in and sign-up are forwarded to the provider itself.

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;
use crate::adapters::auth::{JwtSessionValidator, SupabaseAuthClient, DEFAULT_AUDIENCE};
use crate::domain::foundation::AuthError;

const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    /// Shared secret used to sign access tokens
    pub jwt_secret: Secret<String>,

    /// Expected `aud` claim
    #[serde(default = "default_audience")]
    pub jwt_audience: String,

    /// Identity provider base URL
    pub provider_url: String,

    /// Public (anon) key sent to the identity provider
    pub provider_anon_key: Secret<String>,
}

impl AuthConfig {
    pub fn session_validator(&self) -> JwtSessionValidator {
        JwtSessionValidator::new(self.jwt_secret.expose_secret(), &self.jwt_audience)
    }

    pub fn provider_client(&self) -> Result<SupabaseAuthClient, AuthError> {
        SupabaseAuthClient::new(
            self.provider_url.clone(),
            self.provider_anon_key.expose_secret().clone(),
        )
    }

    /// In production the provider must be reached over HTTPS.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.jwt_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("DOCCHAT__AUTH__JWT_SECRET"));
        }
        if self.jwt_secret.expose_secret().len() < MIN_SECRET_LEN {
            return Err(ValidationError::JwtSecretTooShort);
        }
        if self.provider_url.is_empty() {
            return Err(ValidationError::MissingRequired("DOCCHAT__AUTH__PROVIDER_URL"));
        }
        if self.provider_anon_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("DOCCHAT__AUTH__PROVIDER_ANON_KEY"));
        }
        if *environment == Environment::Production && !self.provider_url.starts_with("https://") {
            return Err(ValidationError::MustBeHttps("Auth provider URL"));
        }
        Ok(())
    }
}

fn default_audience() -> String {
    DEFAULT_AUDIENCE.to_string()
}
