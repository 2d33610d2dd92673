//! Document vendor configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;
use crate::adapters::chatpdf::{ChatPdfConfig, DEFAULT_BASE_URL};

/// Settings for the PDF chat vendor.
#[derive(Debug, Deserialize)]
pub struct VendorConfig {
    /// API key sent on every vendor request
    pub api_key: Secret<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds. No retries are attempted.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl VendorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Client configuration for the vendor adapter.
    pub fn client_config(&self) -> ChatPdfConfig {
        ChatPdfConfig::new(self.api_key.expose_secret().clone())
            .with_base_url(self.base_url.clone())
            .with_timeout(self.timeout())
    }

    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.api_key.expose_secret().trim().is_empty() {
            return Err(ValidationError::MissingRequired("DOCCHAT__VENDOR__API_KEY"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 600 {
            return Err(ValidationError::InvalidVendorTimeout);
        }
        if *environment == Environment::Production && !self.base_url.starts_with("https://") {
            return Err(ValidationError::MustBeHttps("Vendor base URL"));
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    120
}
