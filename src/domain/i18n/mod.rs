//! Internationalization: locales, message bundles, locale resolution and the
//! translation fallback chain.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use aqaargate_web::domain::i18n::{resolve_locale, Locale, MessageBundle, Messages};
//!
//! let resolved = resolve_locale("/ar/contact", None);
//! assert_eq!(resolved.locale, Locale::Ar);
//!
//! let en = Arc::new(MessageBundle::from_json(Locale::En, r#"{"cta":{"title":"Hi"}}"#).unwrap());
//! let messages = Messages::new(resolved.locale, None, en);
//! assert_eq!(messages.t("cta", "title"), "Hi");
//! assert_eq!(messages.t("cta", "futureBuyer"), "Future Buyer");
//! ```

mod accessor;
mod humanize;
mod locale;
mod messages;
mod resolver;

pub use accessor::{Messages, Resolution};
pub use humanize::humanize_key;
pub use locale::{looks_like_locale_tag, Direction, Locale};
pub use messages::{MessageBundle, MessageNode};
pub use resolver::{localized_path, resolve_locale, LocaleSource, ResolvedLocale};
