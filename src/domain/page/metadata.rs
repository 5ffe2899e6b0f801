//! SEO metadata attached to every rendered page.

use serde::Serialize;

use crate::domain::i18n::Locale;

/// Maximum meta description length search engines display.
pub const DESCRIPTION_LIMIT: usize = 160;

/// Open Graph object type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OgType {
    Website,
    Article,
    Profile,
}

/// `hreflang` alternate of the same page in another locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlternateLink {
    pub locale: Locale,
    pub href: String,
}

/// Resolved metadata for one page render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub canonical_url: String,
    pub image: String,
    pub og_type: OgType,
    pub alternates: Vec<AlternateLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_time: Option<String>,
    /// Gated and utility pages ask crawlers not to index them.
    pub noindex: bool,
}

/// Collapses whitespace and cuts `text` to at most `limit` characters,
/// appending an ellipsis when something was cut.
pub fn truncate_description(text: &str, limit: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= limit {
        return collapsed;
    }

    let cut: String = collapsed.chars().take(limit.saturating_sub(1)).collect();
    let cut = match cut.rfind(' ') {
        Some(space) if space > 0 => cut[..space].to_string(),
        _ => cut,
    };
    format!("{}…", cut.trim_end())
}

/// Joins a page title with the site name: `"Contact | AqaarGate"`.
pub fn titled(page_title: &str, site_name: &str) -> String {
    if page_title.is_empty() || page_title == site_name {
        site_name.to_string()
    } else {
        format!("{} | {}", page_title, site_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_unchanged_but_collapsed() {
        assert_eq!(truncate_description("  Sea   view\nflat ", 160), "Sea view flat");
    }

    #[test]
    fn long_text_is_cut_on_word_boundary() {
        let text = "word ".repeat(50);
        let cut = truncate_description(&text, 20);
        assert!(cut.chars().count() <= 20);
        assert!(cut.ends_with('…'));
        assert!(!cut.contains("wor…"));
    }

    #[test]
    fn arabic_text_is_cut_on_char_boundary() {
        let text = "شقة مطلة على البحر في اللاذقية ".repeat(10);
        let cut = truncate_description(&text, DESCRIPTION_LIMIT);
        assert!(cut.chars().count() <= DESCRIPTION_LIMIT);
    }

    #[test]
    fn titled_appends_site_name() {
        assert_eq!(titled("Contact", "AqaarGate"), "Contact | AqaarGate");
        assert_eq!(titled("AqaarGate", "AqaarGate"), "AqaarGate");
        assert_eq!(titled("", "AqaarGate"), "AqaarGate");
    }

    #[test]
    fn og_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&OgType::Article).unwrap(), "\"article\"");
    }
}
