//! ResolveMetadataHandler - SEO metadata for a matched page.
//!
//! Static pages read their title and description from the `metadata`
//! namespace. Detail pages fetch their record from the catalog and describe
//! it; when the backend is unreachable they fall back to the static text for
//! the page, and when the record does not exist the page is reported missing.

use std::sync::Arc;

use serde::Serialize;

use super::render_page::PageError;
use crate::domain::catalog::CatalogRecord;
use crate::domain::foundation::{RecordId, Timestamp};
use crate::domain::i18n::{localized_path, Locale, Messages, Resolution};
use crate::domain::page::{
    titled, truncate_description, AlternateLink, OgType, PageId, PageMetadata, RecordKind,
    RouteDef, DESCRIPTION_LIMIT,
};
use crate::ports::{CatalogError, CatalogReader};

/// Site-wide values metadata is built from.
#[derive(Debug, Clone)]
pub struct SiteInfo {
    /// Public origin, without trailing slash (e.g., "https://aqaargate.com").
    pub base_url: String,
    /// Used when the bundle has no `common.siteName`.
    pub name: String,
    /// Absolute URL of the image shared when a page has none of its own.
    pub default_share_image: String,
}

impl SiteInfo {
    fn absolute(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Query for one page's metadata.
#[derive(Debug, Clone)]
pub struct ResolveMetadataQuery<'a> {
    pub route: &'static RouteDef,
    /// Path below the locale prefix, as requested.
    pub page_path: &'a str,
    /// The `:id` segment of detail pages.
    pub record_id: Option<&'a str>,
}

/// Result of a metadata resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedMetadata {
    Page {
        metadata: PageMetadata,
        /// The record a detail page displays, when it could be fetched.
        record: Option<serde_json::Value>,
    },
    /// The detail page's record does not exist.
    RecordMissing,
}

struct Described {
    title: String,
    summary: Option<String>,
    image: Option<String>,
    published_at: Option<Timestamp>,
    data: serde_json::Value,
}

fn describe<R: CatalogRecord + Serialize>(record: R) -> Result<Described, PageError> {
    let data = serde_json::to_value(&record)
        .map_err(|e| PageError::Render(format!("catalog record not serializable: {}", e)))?;
    Ok(Described {
        title: record.title().to_string(),
        summary: record.summary().map(str::to_string),
        image: record.share_image().map(str::to_string),
        published_at: record.published_at().copied(),
        data,
    })
}

pub struct ResolveMetadataHandler {
    catalog: Arc<dyn CatalogReader>,
    site: SiteInfo,
}

impl ResolveMetadataHandler {
    pub fn new(catalog: Arc<dyn CatalogReader>, site: SiteInfo) -> Self {
        Self { catalog, site }
    }

    pub fn site(&self) -> &SiteInfo {
        &self.site
    }

    /// The localized site name, or the configured one if untranslated.
    pub fn site_name(&self, messages: &Messages) -> String {
        match messages.resolve("common", "siteName") {
            (_, Resolution::Humanized) => self.site.name.clone(),
            (name, _) => name,
        }
    }

    pub async fn handle(
        &self,
        query: ResolveMetadataQuery<'_>,
        messages: &Messages,
    ) -> Result<ResolvedMetadata, PageError> {
        let route = query.route;
        let Some(kind) = route.record else {
            return Ok(ResolvedMetadata::Page {
                metadata: self.static_metadata(route.page, query.page_path, !route.is_public(), messages),
                record: None,
            });
        };

        let Some(id) = query.record_id.and_then(|raw| RecordId::new(raw).ok()) else {
            tracing::debug!(path = query.page_path, "Detail page requested with an invalid record id");
            return Ok(ResolvedMetadata::RecordMissing);
        };

        let fetched = match self.fetch(kind, &id).await {
            Ok(Some(described)) => described?,
            Ok(None) => return Ok(ResolvedMetadata::RecordMissing),
            Err(e) => {
                tracing::warn!(record = %id, error = %e, "Catalog unavailable, using generic metadata");
                return Ok(ResolvedMetadata::Page {
                    metadata: self.static_metadata(route.page, query.page_path, false, messages),
                    record: None,
                });
            }
        };

        let site_name = self.site_name(messages);
        let description = fetched
            .summary
            .as_deref()
            .map(|summary| truncate_description(summary, DESCRIPTION_LIMIT))
            .filter(|summary| !summary.is_empty())
            .unwrap_or_else(|| messages.t("metadata", &format!("{}.description", route.page.key())));

        let og_type = match kind {
            RecordKind::Listing => OgType::Website,
            RecordKind::BlogPost => OgType::Article,
            RecordKind::Agent => OgType::Profile,
        };

        let metadata = PageMetadata {
            title: titled(&fetched.title, &site_name),
            description,
            canonical_url: self.site.absolute(&localized_path(messages.locale(), query.page_path)),
            image: fetched
                .image
                .unwrap_or_else(|| self.site.default_share_image.clone()),
            og_type,
            alternates: self.alternates(query.page_path),
            published_time: fetched.published_at.map(|at| at.to_rfc3339()),
            noindex: false,
        };

        Ok(ResolvedMetadata::Page {
            metadata,
            record: Some(fetched.data),
        })
    }

    /// Metadata read from `metadata.{page}.*`.
    pub fn static_metadata(
        &self,
        page: PageId,
        page_path: &str,
        noindex: bool,
        messages: &Messages,
    ) -> PageMetadata {
        let site_name = self.site_name(messages);
        let key = page.key();
        let title = messages.t("metadata", &format!("{}.title", key));
        let description = messages.t("metadata", &format!("{}.description", key));

        PageMetadata {
            title: titled(&title, &site_name),
            description: truncate_description(&description, DESCRIPTION_LIMIT),
            canonical_url: self.site.absolute(&localized_path(messages.locale(), page_path)),
            image: self.site.default_share_image.clone(),
            og_type: OgType::Website,
            alternates: self.alternates(page_path),
            published_time: None,
            noindex: noindex || matches!(page, PageId::NotFound | PageId::Forbidden),
        }
    }

    fn alternates(&self, page_path: &str) -> Vec<AlternateLink> {
        Locale::ALL
            .iter()
            .map(|locale| AlternateLink {
                locale: *locale,
                href: self.site.absolute(&localized_path(*locale, page_path)),
            })
            .collect()
    }

    async fn fetch(
        &self,
        kind: RecordKind,
        id: &RecordId,
    ) -> Result<Option<Result<Described, PageError>>, CatalogError> {
        let described = match kind {
            RecordKind::Listing => self.catalog.listing(id).await?.map(describe),
            RecordKind::BlogPost => self.catalog.blog_post(id).await?.map(describe),
            RecordKind::Agent => self.catalog.agent(id).await?.map(describe),
        };
        Ok(described)
    }
}
