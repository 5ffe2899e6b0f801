//! Translation configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where message bundles come from and where the locale preference is kept.
#[derive(Debug, Clone, Deserialize)]
pub struct I18nConfig {
    /// Directory with `{locale}.json` bundles; the bundles compiled into the
    /// binary are used when unset
    pub messages_dir: Option<PathBuf>,

    /// Cookie that stores the visitor's locale preference
    #[serde(default = "default_preference_cookie")]
    pub preference_cookie: String,
}

impl I18nConfig {
    /// Validate translation configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_cookie_name(&self.preference_cookie)?;
        if let Some(dir) = &self.messages_dir {
            if dir.as_os_str().is_empty() {
                return Err(ValidationError::MissingRequired("I18N__MESSAGES_DIR"));
            }
        }
        Ok(())
    }
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            messages_dir: None,
            preference_cookie: default_preference_cookie(),
        }
    }
}

/// Cookie names are RFC 6265 tokens.
pub(super) fn validate_cookie_name(name: &str) -> Result<(), ValidationError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(c));
    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidCookieName(name.to_string()))
    }
}

fn default_preference_cookie() -> String {
    "NEXT_LOCALE".to_string()
}
