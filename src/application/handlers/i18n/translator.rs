//! Translator - hands out translation accessors per locale.
//!
//! The default locale's bundle is loaded once at startup and is required:
//! without it the fallback chain has nothing to fall back to. Other bundles
//! are loaded on first use. A failed load is not remembered, so the next
//! request tries again; in the meantime pages render with default-locale
//! strings.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::domain::i18n::{Locale, MessageBundle, Messages};
use crate::ports::{I18nError, MessageSource};

pub struct Translator {
    source: Arc<dyn MessageSource>,
    default: Arc<MessageBundle>,
    bundles: HashMap<Locale, OnceCell<Arc<MessageBundle>>>,
}

impl Translator {
    /// Loads the default bundle and prepares lazy slots for the others.
    pub async fn load(source: Arc<dyn MessageSource>) -> Result<Self, I18nError> {
        let default = Arc::new(source.load(Locale::DEFAULT).await?);
        tracing::info!(
            locale = %Locale::DEFAULT,
            namespaces = default.len(),
            "Loaded default message bundle"
        );

        let bundles = Locale::ALL
            .iter()
            .filter(|locale| !locale.is_default())
            .map(|locale| (*locale, OnceCell::new()))
            .collect();

        Ok(Self {
            source,
            default,
            bundles,
        })
    }

    /// Accessor for `locale`, degrading to default-locale strings when the
    /// locale's bundle cannot be loaded.
    pub async fn messages(&self, locale: Locale) -> Messages {
        let Some(cell) = self.bundles.get(&locale) else {
            return Messages::default_only(self.default.clone());
        };

        let loaded = cell
            .get_or_try_init(|| async {
                let bundle = self.source.load(locale).await?;
                tracing::info!(locale = %locale, namespaces = bundle.len(), "Loaded message bundle");
                Ok::<_, I18nError>(Arc::new(bundle))
            })
            .await;

        match loaded {
            Ok(bundle) => Messages::new(locale, Some(bundle.clone()), self.default.clone()),
            Err(e) => {
                tracing::warn!(locale = %locale, error = %e, "Message bundle unavailable, using default locale");
                Messages::new(locale, None, self.default.clone())
            }
        }
    }

    /// Accessor for the default locale; never waits on I/O.
    pub fn default_messages(&self) -> Messages {
        Messages::default_only(self.default.clone())
    }
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("default", &self.default.locale())
            .field("locales", &self.bundles.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
