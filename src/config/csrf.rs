//! CSRF protection configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::{split_list, Environment};
use super::site::is_http_url;

/// Minimum HMAC key length.
pub const MIN_SECRET_LEN: usize = 32;

/// Settings for the origin check and signed double-submit token.
#[derive(Debug, Clone, Deserialize)]
pub struct CsrfConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// HMAC key for tokens; a random per-process key is used when unset
    /// outside production
    pub secret: Option<SecretString>,

    /// Extra origins allowed to post (comma-separated)
    pub trusted_origins: Option<String>,
}

impl CsrfConfig {
    pub fn trusted_origins_list(&self) -> Vec<String> {
        split_list(self.trusted_origins.as_deref())
            .into_iter()
            .map(|origin| origin.trim_end_matches('/').to_string())
            .collect()
    }

    /// Validate CSRF configuration
    ///
    /// Production needs an explicit secret: a per-process key would make
    /// tokens fail across replicas and restarts.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if !self.enabled {
            return Ok(());
        }
        match &self.secret {
            Some(secret) if secret.expose_secret().len() < MIN_SECRET_LEN => {
                return Err(ValidationError::CsrfSecretTooShort(MIN_SECRET_LEN));
            }
            None if *environment == Environment::Production => {
                return Err(ValidationError::MissingRequired("CSRF__SECRET"));
            }
            _ => {}
        }
        for origin in self.trusted_origins_list() {
            if !is_http_url(&origin) {
                return Err(ValidationError::InvalidUrl {
                    field: "csrf.trusted_origins",
                    value: origin,
                });
            }
        }
        Ok(())
    }
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            secret: None,
            trusted_origins: None,
        }
    }
}

fn default_enabled() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(len: usize) -> Option<SecretString> {
        Some(SecretString::new("k".repeat(len)))
    }

    #[test]
    fn test_csrf_defaults() {
        let config = CsrfConfig::default();
        assert!(config.enabled);
        assert!(config.validate(&Environment::Development).is_ok());
    }

    #[test]
    fn test_production_requires_secret() {
        let config = CsrfConfig::default();
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::MissingRequired("CSRF__SECRET"))
        );

        let config = CsrfConfig {
            secret: secret(MIN_SECRET_LEN),
            ..Default::default()
        };
        assert!(config.validate(&Environment::Production).is_ok());
    }

    #[test]
    fn test_short_secret_rejected() {
        let config = CsrfConfig {
            secret: secret(8),
            ..Default::default()
        };
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::CsrfSecretTooShort(MIN_SECRET_LEN))
        );
    }

    #[test]
    fn test_disabled_skips_checks() {
        let config = CsrfConfig {
            enabled: false,
            ..Default::default()
        };
        assert!(config.validate(&Environment::Production).is_ok());
    }

    #[test]
    fn test_trusted_origins_parsing() {
        let config = CsrfConfig {
            trusted_origins: Some("https://admin.aqaargate.com/, http://localhost:3000".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.trusted_origins_list(),
            vec!["https://admin.aqaargate.com", "http://localhost:3000"]
        );
        assert!(config.validate(&Environment::Development).is_ok());
    }
}
