//! Authentication configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::i18n::validate_cookie_name;

/// Where the backend-issued session token is read from.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Cookie holding the session token (when no Bearer header is sent)
    #[serde(default = "default_session_cookie")]
    pub session_cookie: String,
}

impl AuthConfig {
    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_cookie_name(&self.session_cookie)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie: default_session_cookie(),
        }
    }
}

fn default_session_cookie() -> String {
    "token".to_string()
}
