//! robots.txt directives.
//!
//! The directives are data: every locale prefix is crawlable, every gated
//! page (and the JSON API) is not. Both lists come from the page table, so a
//! new dashboard page is hidden from crawlers without touching this file.

use std::collections::BTreeSet;

use super::routes::ROUTES;
use crate::domain::i18n::Locale;

/// Allow/disallow path lists for `User-agent: *`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotsDirectives {
    pub allow: Vec<String>,
    pub disallow: Vec<String>,
    pub sitemap: Option<String>,
}

impl RobotsDirectives {
    /// Builds the directives for all locales; `site_url` has no trailing slash.
    pub fn for_site(site_url: &str) -> Self {
        let allow = Locale::ALL
            .iter()
            .map(|locale| format!("/{}/", locale.tag()))
            .collect();

        let gated_prefixes: BTreeSet<String> = ROUTES
            .iter()
            .filter(|route| !route.is_public())
            .map(|route| route.static_prefix())
            .collect();

        let mut disallow = vec!["/api/".to_string()];
        for locale in Locale::ALL {
            for prefix in &gated_prefixes {
                disallow.push(format!("/{}/{}", locale.tag(), prefix));
            }
        }

        Self {
            allow,
            disallow,
            sitemap: Some(format!("{}/sitemap.xml", site_url.trim_end_matches('/'))),
        }
    }

    /// Renders the robots.txt body.
    pub fn render(&self) -> String {
        let allow = self.allow.iter().map(|path| format!("Allow: {}\n", path));
        let disallow = self.disallow.iter().map(|path| format!("Disallow: {}\n", path));
        let sitemap = self
            .sitemap
            .iter()
            .map(|sitemap| format!("\nSitemap: {}\n", sitemap));

        std::iter::once("User-agent: *\n".to_string())
            .chain(allow)
            .chain(disallow)
            .chain(sitemap)
            .collect()
    }
}
