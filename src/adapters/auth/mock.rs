//! Mock authentication adapters for testing.
//!
//! ```ignore
//! let validator = MockSessionValidator::new().with_test_user("token-a", "alice");
//! let user = validator.validate("token-a").await?;
//! ```

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::{AuthProvider, AuthSession, Credentials, SessionValidator, SignUpOutcome};

/// Mock session validator: a fixed map of tokens to users.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.tokens
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(token.into(), user);
        self
    }

    /// Adds a token for a user with the given id and a derived email.
    ///
    /// A blank id is ignored.
    pub fn with_test_user(self, token: impl Into<String>, user_id: &str) -> Self {
        match UserId::new(user_id) {
            Ok(id) => {
                let email = format!("{}@test.example.com", user_id);
                self.with_user(token, AuthenticatedUser::new(id, Some(email)))
            }
            Err(_) => self,
        }
    }

    /// Forces all validations to return `error`.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap_or_else(PoisonError::into_inner) = Some(error);
        self
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = self
            .force_error
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
        {
            return Err(error);
        }

        self.tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

/// Mock identity service backed by an in-memory account map.
///
/// Sign-in issues `token-<email>` as the access token.
#[derive(Debug, Default)]
pub struct MockAuthProvider {
    accounts: RwLock<HashMap<String, String>>,
}

impl MockAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.accounts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(email.into(), password.into());
        self
    }

    fn user_for(email: &str) -> Result<AuthenticatedUser, AuthError> {
        let id = UserId::new(format!("user-{}", email))
            .map_err(|e| AuthError::Rejected(e.to_string()))?;
        Ok(AuthenticatedUser::new(id, Some(email.to_string())))
    }
}

#[async_trait]
impl AuthProvider for MockAuthProvider {
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthSession, AuthError> {
        let accounts = self.accounts.read().unwrap_or_else(PoisonError::into_inner);
        match accounts.get(&credentials.email) {
            Some(password) if *password == credentials.password => Ok(AuthSession {
                access_token: format!("token-{}", credentials.email),
                refresh_token: None,
                expires_in: Some(3600),
                user: Self::user_for(&credentials.email)?,
            }),
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<SignUpOutcome, AuthError> {
        let mut accounts = self.accounts.write().unwrap_or_else(PoisonError::into_inner);
        if accounts.contains_key(&credentials.email) {
            return Err(AuthError::AccountExists);
        }
        accounts.insert(credentials.email.clone(), credentials.password.clone());
        Ok(SignUpOutcome {
            user: Self::user_for(&credentials.email)?,
            session: None,
        })
    }
}
