//! Message bundles compiled into the binary.

use async_trait::async_trait;

use crate::domain::i18n::{Locale, MessageBundle};
use crate::ports::{I18nError, MessageSource};

const EN: &str = include_str!("../../../messages/en.json");
const AR: &str = include_str!("../../../messages/ar.json");

/// Serves the bundles shipped in `messages/`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedMessageSource;

impl EmbeddedMessageSource {
    pub fn new() -> Self {
        Self
    }

    fn raw(locale: Locale) -> &'static str {
        match locale {
            Locale::En => EN,
            Locale::Ar => AR,
        }
    }
}

#[async_trait]
impl MessageSource for EmbeddedMessageSource {
    async fn load(&self, locale: Locale) -> Result<MessageBundle, I18nError> {
        MessageBundle::from_json(locale, Self::raw(locale))
            .map_err(|e| I18nError::malformed(locale, e))
    }
}
