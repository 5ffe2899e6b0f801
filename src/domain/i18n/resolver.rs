//! Locale resolution logic.

use super::locale::{looks_like_locale_tag, Locale};

/// Where the resolved locale came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleSource {
    /// The first path segment named a supported locale.
    Path,
    /// The stored preference (cookie) named a supported locale.
    Preference,
    /// Nothing usable; the default locale was chosen.
    Default,
}

/// Result of resolving a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocale {
    /// The active locale for this request.
    pub locale: Locale,

    /// Which input decided the locale.
    pub source: LocaleSource,

    /// The page path with any locale-shaped prefix removed, without leading
    /// or trailing slashes (`""` for the home page).
    pub page_path: String,

    /// True when the request path already starts with the resolved locale's
    /// prefix. Other requests are redirected to the canonical URL.
    pub prefixed: bool,
}

impl ResolvedLocale {
    /// Returns true if the stored preference should be rewritten.
    pub fn should_persist(&self, stored: Option<&str>) -> bool {
        stored.and_then(Locale::from_tag) != Some(self.locale)
    }

    /// Canonical URL path for the page under the resolved locale.
    pub fn canonical_path(&self) -> String {
        localized_path(self.locale, &self.page_path)
    }
}

/// Builds `/{locale}/{page_path}` (or `/{locale}` for the home page).
pub fn localized_path(locale: Locale, page_path: &str) -> String {
    let page_path = page_path.trim_matches('/');
    if page_path.is_empty() {
        format!("/{}", locale.tag())
    } else {
        format!("/{}/{}", locale.tag(), page_path)
    }
}

/// Resolve the active locale for a request.
///
/// Resolution order (highest to lowest priority):
/// 1. First path segment, if it is a supported locale tag
/// 2. Stored preference, if it is a supported locale tag
/// 3. [`Locale::DEFAULT`]
///
/// # Example
///
/// ```
/// use aqaargate_web::domain::i18n::{resolve_locale, Locale};
///
/// assert_eq!(resolve_locale("/ar/properties", None).locale, Locale::Ar);
/// assert_eq!(resolve_locale("/properties", Some("ar")).locale, Locale::Ar);
/// assert_eq!(resolve_locale("/fr/contact", None).locale, Locale::En);
/// ```
pub fn resolve_locale(path: &str, stored_preference: Option<&str>) -> ResolvedLocale {
    let trimmed = path.trim_matches('/');
    let (first, rest) = match trimmed.split_once('/') {
        Some((first, rest)) => (first, rest),
        None => (trimmed, ""),
    };

    if let Some(locale) = Locale::from_tag(first) {
        return ResolvedLocale {
            locale,
            source: LocaleSource::Path,
            page_path: rest.trim_matches('/').to_string(),
            prefixed: true,
        };
    }

    let page_path = if looks_like_locale_tag(first) {
        rest.trim_matches('/').to_string()
    } else {
        trimmed.to_string()
    };

    match stored_preference.and_then(Locale::from_tag) {
        Some(locale) => ResolvedLocale {
            locale,
            source: LocaleSource::Preference,
            page_path,
            prefixed: false,
        },
        None => ResolvedLocale {
            locale: Locale::DEFAULT,
            source: LocaleSource::Default,
            page_path,
            prefixed: false,
        },
    }
}
