//! Page composition: header, breadcrumb, body, call-to-action and footer
//! around a page body, plus the error screen shown by the render boundary.

use serde::Serialize;
use std::collections::BTreeMap;

use super::metadata::PageMetadata;
use super::routes::{page_path, PageId, RouteDef};
use crate::domain::foundation::IncidentId;
use crate::domain::i18n::{localized_path, Direction, Locale, Messages};

/// Which header a page gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderVariant {
    Public,
    Dashboard,
}

/// The static parts of a page, taken from its route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTemplate {
    pub page: PageId,
    pub dashboard: bool,
    pub component: &'static str,
    pub cta: bool,
}

impl From<&RouteDef> for PageTemplate {
    fn from(route: &RouteDef) -> Self {
        Self {
            page: route.page,
            dashboard: route.dashboard,
            component: route.component,
            cta: route.cta,
        }
    }
}

/// Per-request body input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageContent {
    pub params: BTreeMap<&'static str, String>,
    pub data: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Crumb {
    pub label: String,
    /// `None` for the current page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    pub variant: HeaderVariant,
    pub site_name: String,
    pub nav: Vec<Link>,
    pub languages: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Body {
    pub component: &'static str,
    pub params: BTreeMap<&'static str, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallToAction {
    pub title: String,
    pub text: String,
    pub button: Link,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Footer {
    pub tagline: String,
    pub rights: String,
    pub links: Vec<Link>,
}

/// A fully composed page, ready to serialize.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageDocument {
    pub locale: Locale,
    pub dir: Direction,
    pub page: PageId,
    pub metadata: PageMetadata,
    pub header: Header,
    pub breadcrumb: Vec<Crumb>,
    pub body: Body,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta: Option<CallToAction>,
    pub footer: Footer,
}

const PUBLIC_NAV: [PageId; 6] = [
    PageId::Home,
    PageId::Properties,
    PageId::Agents,
    PageId::Blog,
    PageId::About,
    PageId::Contact,
];

const DASHBOARD_NAV: [PageId; 5] = [
    PageId::Dashboard,
    PageId::Favorites,
    PageId::MyProperty,
    PageId::Profile,
    PageId::Home,
];

const FOOTER_LINKS: [PageId; 5] = [
    PageId::About,
    PageId::Vision,
    PageId::Faq,
    PageId::PrivacyPolicy,
    PageId::Terms,
];

fn link(messages: &Messages, namespace: &str, page: PageId) -> Link {
    Link {
        label: messages.t(namespace, page.key()),
        href: localized_path(messages.locale(), &page_path(page, &[])),
    }
}

/// Assembles a page from its template, metadata and body content.
///
/// `site_name` is the already-resolved name shown in the header.
pub fn compose(
    template: &PageTemplate,
    metadata: PageMetadata,
    content: PageContent,
    messages: &Messages,
    site_name: &str,
) -> PageDocument {
    let locale = messages.locale();

    let (variant, nav_pages): (HeaderVariant, &[PageId]) = if template.dashboard {
        (HeaderVariant::Dashboard, &DASHBOARD_NAV)
    } else {
        (HeaderVariant::Public, &PUBLIC_NAV)
    };

    let header = Header {
        variant,
        site_name: site_name.to_string(),
        nav: nav_pages.iter().map(|page| link(messages, "nav", *page)).collect(),
        languages: metadata
            .alternates
            .iter()
            .map(|alternate| Link {
                label: alternate.locale.native_name().to_string(),
                href: alternate.href.clone(),
            })
            .collect(),
    };

    let breadcrumb = breadcrumb(template.page, messages);

    let cta = template.cta.then(|| CallToAction {
        title: messages.t("cta", "title"),
        text: messages.t("cta", "description"),
        button: Link {
            label: messages.t("cta", "button"),
            href: localized_path(locale, &page_path(PageId::Register, &[])),
        },
    });

    let footer = Footer {
        tagline: messages.t("footer", "tagline"),
        rights: messages.t("footer", "rights"),
        links: FOOTER_LINKS
            .iter()
            .map(|page| link(messages, "footer", *page))
            .collect(),
    };

    PageDocument {
        locale,
        dir: locale.direction(),
        page: template.page,
        metadata,
        header,
        breadcrumb,
        body: Body {
            component: template.component,
            params: content.params,
            data: content.data,
        },
        cta,
        footer,
    }
}

/// Home first, then ancestors, then the current page (unlinked).
fn breadcrumb(page: PageId, messages: &Messages) -> Vec<Crumb> {
    let mut ancestors = Vec::new();
    let mut cursor = page.parent();
    while let Some(parent) = cursor {
        ancestors.push(parent);
        cursor = parent.parent();
    }
    ancestors.reverse();

    let mut trail = Vec::with_capacity(ancestors.len() + 2);
    if page != PageId::Home {
        let home = link(messages, "breadcrumb", PageId::Home);
        trail.push(Crumb {
            label: home.label,
            href: Some(home.href),
        });
    }
    for ancestor in ancestors {
        let ancestor = link(messages, "breadcrumb", ancestor);
        trail.push(Crumb {
            label: ancestor.label,
            href: Some(ancestor.href),
        });
    }
    trail.push(Crumb {
        label: messages.t("breadcrumb", page.key()),
        href: None,
    });
    trail
}

/// Generic error screen shown when rendering a page fails unexpectedly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorScreen {
    pub locale: Locale,
    pub dir: Direction,
    pub title: String,
    pub message: String,
    /// Reloads the page that failed.
    pub retry: Link,
    pub home: Link,
    pub incident: IncidentId,
}

/// Composes the error screen for `retry_href` in the accessor's locale.
pub fn compose_error(messages: &Messages, retry_href: &str, incident: IncidentId) -> ErrorScreen {
    let locale = messages.locale();
    ErrorScreen {
        locale,
        dir: locale.direction(),
        title: messages.t("errors", "title"),
        message: messages.t("errors", "message"),
        retry: Link {
            label: messages.t("errors", "retry"),
            href: retry_href.to_string(),
        },
        home: Link {
            label: messages.t("errors", "home"),
            href: localized_path(locale, ""),
        },
        incident,
    }
}
