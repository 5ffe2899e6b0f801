//! RenderPageHandler - turns a resolved request into a page or a redirect.
//!
//! Order of work for one request:
//! 1. match the page path against the route table (no match: not-found page)
//! 2. run the access gate for the caller's role (deny: redirect)
//! 3. fetch the translation accessor and the page metadata
//! 4. compose the page

use std::sync::Arc;

use thiserror::Error;
use url::form_urlencoded;

use super::resolve_metadata::{
    ResolveMetadataHandler, ResolveMetadataQuery, ResolvedMetadata, SiteInfo,
};
use crate::application::handlers::i18n::Translator;
use crate::domain::access::{AccessDecision, SessionContext};
use crate::domain::i18n::{localized_path, Locale, Messages};
use crate::domain::page::{
    compose, match_route, page_path, PageContent, PageDocument, PageId, PageTemplate,
    NOT_FOUND_ROUTE,
};

/// Errors raised while rendering a page.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("page rendering failed: {0}")]
    Render(String),
}

/// Query to render one page for the caller described by `context`.
#[derive(Debug, Clone, Copy)]
pub struct RenderPageQuery<'a> {
    /// Path below the locale prefix (e.g., "properties/42").
    pub page_path: &'a str,
    /// Raw query string of the request, carried into the login return target.
    pub query_string: Option<&'a str>,
    pub context: &'a SessionContext,
}

/// Result of a render.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderPageResult {
    Page(Box<PageDocument>),
    /// The path matched nothing or the record does not exist.
    NotFound(Box<PageDocument>),
    /// The gate denied access; the value is the target path.
    Redirect(String),
}

pub struct RenderPageHandler {
    translator: Arc<Translator>,
    metadata: ResolveMetadataHandler,
}

impl RenderPageHandler {
    pub fn new(translator: Arc<Translator>, metadata: ResolveMetadataHandler) -> Self {
        Self {
            translator,
            metadata,
        }
    }

    pub fn translator(&self) -> &Arc<Translator> {
        &self.translator
    }

    pub fn site(&self) -> &SiteInfo {
        self.metadata.site()
    }

    pub async fn handle(&self, query: RenderPageQuery<'_>) -> Result<RenderPageResult, PageError> {
        let context = query.context;
        let locale = context.locale();
        let page_path = query.page_path.trim_matches('/');

        let Some(matched) = match_route(page_path) else {
            let messages = self.translator.messages(locale).await;
            return Ok(RenderPageResult::NotFound(Box::new(
                self.not_found(page_path, &messages),
            )));
        };
        let route = matched.route;

        match context.evaluate(route.requirement) {
            AccessDecision::Allow => {}
            AccessDecision::RedirectToLogin => {
                tracing::debug!(page = ?route.page, role = %context.role(), "Redirecting to login");
                return Ok(RenderPageResult::Redirect(login_redirect(
                    locale,
                    page_path,
                    query.query_string,
                )));
            }
            AccessDecision::RedirectToForbidden => {
                tracing::debug!(page = ?route.page, role = %context.role(), "Redirecting to forbidden");
                return Ok(RenderPageResult::Redirect(localized_path(
                    locale,
                    &page_path_of(PageId::Forbidden),
                )));
            }
        }

        let messages = self.translator.messages(locale).await;
        let resolved = self
            .metadata
            .handle(
                ResolveMetadataQuery {
                    route,
                    page_path,
                    record_id: matched.param("id"),
                },
                &messages,
            )
            .await?;

        let (metadata, record) = match resolved {
            ResolvedMetadata::Page { metadata, record } => (metadata, record),
            ResolvedMetadata::RecordMissing => {
                return Ok(RenderPageResult::NotFound(Box::new(
                    self.not_found(page_path, &messages),
                )));
            }
        };

        let content = PageContent {
            params: matched.params,
            data: record,
        };
        let document = compose(
            &PageTemplate::from(route),
            metadata,
            content,
            &messages,
            &self.metadata.site_name(&messages),
        );
        Ok(RenderPageResult::Page(Box::new(document)))
    }

    fn not_found(&self, page_path: &str, messages: &Messages) -> PageDocument {
        let metadata = self
            .metadata
            .static_metadata(PageId::NotFound, page_path, true, messages);
        compose(
            &PageTemplate::from(&NOT_FOUND_ROUTE),
            metadata,
            PageContent::default(),
            messages,
            &self.metadata.site_name(messages),
        )
    }
}

fn page_path_of(page: PageId) -> String {
    page_path(page, &[])
}

/// Login URL whose `next` parameter is the encoded path and query to return to.
fn login_redirect(locale: Locale, page_path: &str, query_string: Option<&str>) -> String {
    let login = localized_path(locale, &page_path_of(PageId::Login));
    let mut target = localized_path(locale, page_path);
    if let Some(qs) = query_string.filter(|qs| !qs.is_empty()) {
        target.push('?');
        target.push_str(qs);
    }
    let next = form_urlencoded::Serializer::new(String::new())
        .append_pair("next", &target)
        .finish();
    format!("{}?{}", login, next)
}
