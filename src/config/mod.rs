//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `AQAARGATE` prefix and nested values use double underscores as separators.
//! Every section has defaults, so a bare environment starts a development server.
//!
//! # Example
//!
//! ```no_run
//! use aqaargate_web::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod api;
mod auth;
mod csrf;
mod error;
mod i18n;
mod server;
mod site;

pub use api::ApiConfig;
pub use auth::AuthConfig;
pub use csrf::{CsrfConfig, MIN_SECRET_LEN};
pub use error::{ConfigError, ValidationError};
pub use i18n::I18nConfig;
pub use server::{Environment, ServerConfig};
pub use site::SiteConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Public site identity (origin, name, share image)
    #[serde(default)]
    pub site: SiteConfig,

    /// Message bundles and the locale preference cookie
    #[serde(default)]
    pub i18n: I18nConfig,

    /// Backend REST API
    #[serde(default)]
    pub api: ApiConfig,

    /// Session token cookie
    #[serde(default)]
    pub auth: AuthConfig,

    /// CSRF guard
    #[serde(default)]
    pub csrf: CsrfConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `AQAARGATE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `AQAARGATE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `AQAARGATE__API__BASE_URL=...` -> `api.base_url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("AQAARGATE")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let environment = &self.server.environment;
        self.server.validate()?;
        self.site.validate(environment)?;
        self.i18n.validate()?;
        self.api.validate()?;
        self.auth.validate()?;
        self.csrf.validate(environment)?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
