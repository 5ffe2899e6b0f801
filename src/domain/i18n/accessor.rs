//! Translation lookup with the requested → default → humanized fallback chain.

use std::sync::Arc;

use super::{humanize_key, Locale, MessageBundle};

/// Which tier of the fallback chain produced a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Found in the requested locale's bundle.
    Requested,
    /// Missing there, found in the default locale's bundle.
    DefaultLocale,
    /// Missing everywhere; the key was humanized.
    Humanized,
}

/// Translation accessor for one render pass.
///
/// Holds the bundles the fallback chain consults. `requested` is `None` when
/// the locale's bundle failed to load; lookups then behave exactly as if
/// every key were missing from it.
#[derive(Debug, Clone)]
pub struct Messages {
    locale: Locale,
    requested: Option<Arc<MessageBundle>>,
    default: Arc<MessageBundle>,
}

impl Messages {
    /// Creates an accessor for `locale`.
    ///
    /// For the default locale pass `requested = None`; the default bundle is
    /// consulted either way.
    pub fn new(
        locale: Locale,
        requested: Option<Arc<MessageBundle>>,
        default: Arc<MessageBundle>,
    ) -> Self {
        Self {
            locale,
            requested,
            default,
        }
    }

    /// Accessor that only knows the default bundle.
    pub fn default_only(default: Arc<MessageBundle>) -> Self {
        Self::new(default.locale(), None, default)
    }

    /// The locale this accessor was built for.
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Returns true if the requested locale's own bundle is unavailable.
    pub fn is_degraded(&self) -> bool {
        self.locale != self.default.locale() && self.requested.is_none()
    }

    /// Translates `namespace` + dotted `key`, never failing.
    pub fn t(&self, namespace: &str, key: &str) -> String {
        self.resolve(namespace, key).0
    }

    /// Translates and substitutes `{name}` placeholders.
    pub fn t_fmt(&self, namespace: &str, key: &str, args: &[(&str, &str)]) -> String {
        let mut text = self.t(namespace, key);
        for (name, value) in args {
            text = text.replace(&format!("{{{}}}", name), value);
        }
        text
    }

    /// Translates and reports which fallback tier answered.
    pub fn resolve(&self, namespace: &str, key: &str) -> (String, Resolution) {
        if let Some(text) = self
            .requested
            .as_ref()
            .and_then(|bundle| bundle.lookup(namespace, key))
        {
            return (text.to_string(), Resolution::Requested);
        }

        if let Some(text) = self.default.lookup(namespace, key) {
            let resolution = if self.locale == self.default.locale() {
                Resolution::Requested
            } else {
                Resolution::DefaultLocale
            };
            return (text.to_string(), resolution);
        }

        tracing::trace!(
            locale = %self.locale,
            namespace,
            key,
            "translation missing in every bundle"
        );
        (humanize_key(key), Resolution::Humanized)
    }
}
