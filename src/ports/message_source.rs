//! Message bundle loading port.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::i18n::{Locale, MessageBundle};

/// Errors raised while loading a locale's messages.
#[derive(Debug, Error)]
pub enum I18nError {
    #[error("no message bundle for locale '{0}'")]
    BundleMissing(String),

    #[error("failed to read messages for '{locale}': {message}")]
    Io { locale: String, message: String },

    #[error("malformed messages for '{locale}': {source}")]
    Malformed {
        locale: String,
        #[source]
        source: serde_json::Error,
    },
}

impl I18nError {
    pub fn io(locale: Locale, message: impl Into<String>) -> Self {
        Self::Io {
            locale: locale.tag().to_string(),
            message: message.into(),
        }
    }

    pub fn malformed(locale: Locale, source: serde_json::Error) -> Self {
        Self::Malformed {
            locale: locale.tag().to_string(),
            source,
        }
    }
}

/// Loads the full message bundle of a locale.
///
/// Called at most once per locale by the translator; implementations need not
/// cache.
#[async_trait]
pub trait MessageSource: Send + Sync {
    async fn load(&self, locale: Locale) -> Result<MessageBundle, I18nError>;
}
