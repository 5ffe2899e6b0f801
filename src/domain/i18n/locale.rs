//! Supported locales and their text direction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Text direction for a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Left-to-right (English)
    Ltr,
    /// Right-to-left (Arabic)
    Rtl,
}

impl Direction {
    /// Returns the HTML `dir` attribute value.
    pub fn as_html_dir(&self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

/// A supported UI language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ar,
}

impl Locale {
    /// The locale every lookup falls back to.
    pub const DEFAULT: Locale = Locale::En;

    /// All supported locales, default first.
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Ar];

    /// Returns the tag used in URL prefixes and bundle file names.
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ar => "ar",
        }
    }

    /// Returns the language's name in that language.
    pub fn native_name(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Ar => "العربية",
        }
    }

    /// Returns the text direction.
    pub fn direction(&self) -> Direction {
        match self {
            Locale::En => Direction::Ltr,
            Locale::Ar => Direction::Rtl,
        }
    }

    /// Returns true for the fallback locale.
    pub fn is_default(&self) -> bool {
        *self == Self::DEFAULT
    }

    /// Matches a tag against the supported set, ignoring ASCII case.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|locale| locale.tag().eq_ignore_ascii_case(tag.trim()))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Locale {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| {
            ValidationError::invalid_format("locale", format!("unsupported locale '{}'", s))
        })
    }
}

/// Returns true for segments shaped like a language tag (`fr`, `pt-BR`),
/// whether or not we support the language.
pub fn looks_like_locale_tag(segment: &str) -> bool {
    let mut parts = segment.splitn(2, '-');
    let language = parts.next().unwrap_or_default();
    let language_ok = language.len() == 2 && language.chars().all(|c| c.is_ascii_alphabetic());
    match parts.next() {
        None => language_ok,
        Some(region) => {
            language_ok && region.len() == 2 && region.chars().all(|c| c.is_ascii_alphabetic())
        }
    }
}
