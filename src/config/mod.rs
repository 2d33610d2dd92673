//! Application configuration
//!
//! Configuration is read from environment variables (and a `.env` file when
//! present) with the `DOCCHAT` prefix. Nested values use a double underscore.
//!
//! ```no_run
//! use docchat::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Listening on {}", config.server.socket_addr());
//! ```

mod auth;
mod database;
mod error;
mod server;
mod vendor;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use vendor::VendorConfig;

use serde::Deserialize;

/// Root application configuration.
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    pub database: DatabaseConfig,

    /// PDF chat vendor
    pub vendor: VendorConfig,

    pub auth: AuthConfig,
}

impl AppConfig {
    /// Loads configuration from the environment.
    ///
    /// - `DOCCHAT__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `DOCCHAT__VENDOR__API_KEY=...` -> `vendor.api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::LoadError` when a required variable is missing or
    /// a value cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("DOCCHAT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Semantic validation of every section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.vendor.validate(&self.server.environment)?;
        self.auth.validate(&self.server.environment)?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
