//! HTTP handlers for localized pages.
//!
//! Every path that no other route claims lands in [`render_page`]. The
//! handler resolves the locale first, sends the caller to the canonical
//! `/{locale}/{page}` URL when the request is not already there, and only
//! then asks the application layer for the page.

use std::any::Any;
use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;

use crate::adapters::http::api::ErrorResponse;
use crate::adapters::http::app::AppState;
use crate::adapters::http::middleware::CurrentSession;
use crate::application::handlers::i18n::Translator;
use crate::application::handlers::page::{PageError, RenderPageQuery, RenderPageResult};
use crate::domain::access::SessionContext;
use crate::domain::foundation::{ErrorCode, IncidentId, Timestamp};
use crate::domain::i18n::{resolve_locale, Messages};
use crate::domain::page::compose_error;

/// GET /{locale}/{page...} and every unprefixed path.
pub async fn render_page(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    jar: CookieJar,
    method: Method,
    uri: Uri,
) -> Response {
    if method != Method::GET && method != Method::HEAD {
        let error = ErrorResponse::new(ErrorCode::MethodNotAllowed, "Pages only accept GET");
        return (StatusCode::METHOD_NOT_ALLOWED, Json(error)).into_response();
    }

    let path = uri.path();
    if is_api_path(path) {
        let error = ErrorResponse::new(ErrorCode::PageNotFound, format!("No endpoint at {}", path));
        return (StatusCode::NOT_FOUND, Json(error)).into_response();
    }

    let stored = jar
        .get(&state.cookies.preference_cookie)
        .map(|cookie| cookie.value().to_string());
    let resolved = resolve_locale(path, stored.as_deref());

    let jar = if resolved.should_persist(stored.as_deref()) {
        jar.add(state.cookies.preference(resolved.locale))
    } else {
        jar
    };

    let canonical = resolved.canonical_path();
    if path != canonical {
        let target = with_query(&canonical, &uri);
        tracing::debug!(from = %path, to = %target, source = ?resolved.source, "Redirecting to canonical locale path");
        return (jar, Redirect::temporary(&target)).into_response();
    }

    let role = session.effective_role(&Timestamp::now());
    let context = SessionContext::new(role, resolved.locale);
    let query = RenderPageQuery {
        page_path: &resolved.page_path,
        query_string: uri.query(),
        context: &context,
    };

    match state.pages.handle(query).await {
        Ok(RenderPageResult::Page(document)) => (jar, Json(document)).into_response(),
        Ok(RenderPageResult::NotFound(document)) => {
            (StatusCode::NOT_FOUND, jar, Json(document)).into_response()
        }
        Ok(RenderPageResult::Redirect(target)) => {
            (jar, Redirect::temporary(&target)).into_response()
        }
        Err(e) => {
            let messages = state.pages.translator().messages(resolved.locale).await;
            (jar, render_failure(&messages, &with_query(path, &uri), &e)).into_response()
        }
    }
}

/// GET /robots.txt
pub async fn robots_txt(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        state.robots.to_string(),
    )
}

/// Renders a failed page render as the error screen; retry reloads the same URL.
fn render_failure(messages: &Messages, retry_href: &str, error: &PageError) -> Response {
    let incident = IncidentId::new();
    tracing::error!(incident = %incident, retry = %retry_href, error = %error, "Page render failed");
    let screen = compose_error(messages, retry_href, incident);
    (StatusCode::INTERNAL_SERVER_ERROR, Json(screen)).into_response()
}

/// Renders a caught panic as the generic error screen in the default locale.
///
/// The failing URL is not available here, so retry points at the site root.
pub fn panic_response(translator: &Translator, panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    let incident = IncidentId::new();
    tracing::error!(incident = %incident, panic = %detail, "Request handler panicked");

    let messages = translator.default_messages();
    let screen = compose_error(&messages, "/", incident);
    (StatusCode::INTERNAL_SERVER_ERROR, Json(screen)).into_response()
}

/// Builds the panic handler closure for `CatchPanicLayer::custom`.
pub fn panic_handler(
    translator: Arc<Translator>,
) -> impl Fn(Box<dyn Any + Send + 'static>) -> Response + Clone + Send + Sync + 'static {
    move |panic| panic_response(&translator, panic)
}

fn is_api_path(path: &str) -> bool {
    path == "/api" || path.starts_with("/api/")
}

fn with_query(path: &str, uri: &Uri) -> String {
    match uri.query() {
        Some(query) if !query.is_empty() => format!("{}?{}", path, query),
        _ => path.to_string(),
    }
}
