//! Integration tests for the site's HTTP surface.
//!
//! The router is assembled exactly as the binary does it, with in-memory
//! adapters for the backend API and session tokens, and driven with
//! `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use aqaargate_web::adapters::http::middleware::{AuthState, CSRF_COOKIE, CSRF_HEADER};
use aqaargate_web::adapters::http::{build_router, csrf_guard, AppState, CookieSettings};
use aqaargate_web::adapters::{EmbeddedMessageSource, InMemoryCatalog, MockSessionValidator};
use aqaargate_web::application::handlers::page::{
    RenderPageHandler, ResolveMetadataHandler, SiteInfo,
};
use aqaargate_web::application::handlers::Translator;
use aqaargate_web::config::AppConfig;
use aqaargate_web::domain::catalog::Listing;
use aqaargate_web::domain::foundation::Role;

// =============================================================================
// Test Infrastructure
// =============================================================================

const ORIGIN: &str = "http://localhost:8080";

async fn app_with(catalog: InMemoryCatalog) -> Router {
    let config = AppConfig::default();
    let translator = Arc::new(
        Translator::load(Arc::new(EmbeddedMessageSource::new()))
            .await
            .unwrap(),
    );
    let site = SiteInfo {
        base_url: config.site.origin().to_string(),
        name: config.site.name.clone(),
        default_share_image: config.site.share_image(),
    };
    let pages = Arc::new(RenderPageHandler::new(
        translator,
        ResolveMetadataHandler::new(Arc::new(catalog), site),
    ));
    let state = AppState::new(
        pages,
        Arc::new(csrf_guard(&config).unwrap()),
        CookieSettings::from_config(&config),
    );

    let validator = MockSessionValidator::new()
        .with_role("user-token", "u-1", Role::User)
        .with_role("agent-token", "a-1", Role::Agent)
        .with_role("admin-token", "x-1", Role::Admin);
    let auth = AuthState::new(Arc::new(validator), config.auth.session_cookie.clone());

    build_router(state, auth, &config)
}

async fn app() -> Router {
    app_with(InMemoryCatalog::new()).await
}

fn get(path: &str) -> Request<Body> {
    Request::get(path).body(Body::empty()).unwrap()
}

fn get_as(path: &str, token: &str) -> Request<Body> {
    Request::get(path)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default()
}

fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .map(str::to_string)
        .collect()
}

async fn json_body(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Fetches a CSRF token and returns it.
async fn csrf_token(app: &Router) -> String {
    let response = app.clone().oneshot(get("/api/csrf")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookies(&response)
        .iter()
        .any(|c| c.starts_with(&format!("{}=", CSRF_COOKIE))));
    json_body(response).await["token"].as_str().unwrap().to_string()
}

fn post_json(path: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::post(path)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ORIGIN, ORIGIN);
    if let Some(token) = token {
        builder = builder
            .header(CSRF_HEADER, token)
            .header(header::COOKIE, format!("{}={}", CSRF_COOKIE, token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

// =============================================================================
// Locale Resolution
// =============================================================================

#[tokio::test]
async fn root_redirects_to_default_locale_and_stores_preference() {
    let response = app().await.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/en");
    assert!(set_cookies(&response)
        .iter()
        .any(|c| c.starts_with("NEXT_LOCALE=en")));
}

#[tokio::test]
async fn unprefixed_path_uses_stored_preference() {
    let request = Request::get("/properties?page=2")
        .header(header::COOKIE, "NEXT_LOCALE=ar")
        .body(Body::empty())
        .unwrap();
    let response = app().await.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/ar/properties?page=2");
    assert!(set_cookies(&response).is_empty());
}

#[tokio::test]
async fn unsupported_locale_prefix_falls_back_to_default_and_page_is_public() {
    let app = app().await;

    let response = app.clone().oneshot(get("/fr/contact")).await.unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/en/contact");

    let response = app.oneshot(get("/en/contact")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let page = json_body(response).await;
    assert_eq!(page["locale"], "en");
    assert_eq!(page["page"], "contact");
}

#[tokio::test]
async fn trailing_slash_is_canonicalized() {
    let response = app().await.oneshot(get("/en/contact/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/en/contact");
}

// =============================================================================
// Pages
// =============================================================================

#[tokio::test]
async fn arabic_page_is_right_to_left_and_translated() {
    let response = app().await.oneshot(get("/ar/about")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let page = json_body(response).await;
    assert_eq!(page["locale"], "ar");
    assert_eq!(page["dir"], "rtl");
    assert_eq!(page["header"]["site_name"], "عقار غيت");
    assert_eq!(page["metadata"]["canonical_url"], "http://localhost:8080/ar/about");
}

#[tokio::test]
async fn unknown_page_is_localized_not_found() {
    let response = app().await.oneshot(get("/ar/no-such-page")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let page = json_body(response).await;
    assert_eq!(page["page"], "notFound");
    assert_eq!(page["metadata"]["noindex"], true);
}

#[tokio::test]
async fn listing_detail_uses_record_metadata() {
    let listing: Listing =
        serde_json::from_value(json!({ "title": "Sea view flat", "description": "Two bedrooms" }))
            .unwrap();
    let app = app_with(InMemoryCatalog::new().with_listing("42", listing)).await;

    let response = app.clone().oneshot(get("/en/properties/42")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let page = json_body(response).await;
    assert_eq!(page["metadata"]["title"], "Sea view flat | AqaarGate");

    let response = app.oneshot(get("/en/properties/43")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn pages_reject_non_get_methods() {
    let request = Request::put("/en/contact")
        .header(header::ORIGIN, ORIGIN)
        .body(Body::empty())
        .unwrap();
    let response = app().await.oneshot(request).await.unwrap();
    // State-changing methods meet the CSRF guard before the page handler.
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// =============================================================================
// Access Gate
// =============================================================================

#[tokio::test]
async fn anonymous_caller_is_sent_to_login_with_return_path() {
    let response = app().await.oneshot(get("/en/dashboard")).await.unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/en/login?next=%2Fen%2Fdashboard");
}

#[tokio::test]
async fn login_return_target_keeps_query_string() {
    let response = app()
        .await
        .oneshot(get("/en/favorites?sort=price&page=2"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        location(&response),
        "/en/login?next=%2Fen%2Ffavorites%3Fsort%3Dprice%26page%3D2"
    );
}

#[tokio::test]
async fn user_is_forbidden_from_agent_pages() {
    let response = app()
        .await
        .oneshot(get_as("/ar/my-property", "user-token"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/ar/forbidden");
}

#[tokio::test]
async fn agent_sees_agent_pages_and_session_cookie_works() {
    let app = app().await;

    let response = app
        .clone()
        .oneshot(get_as("/en/my-property", "agent-token"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let page = json_body(response).await;
    assert_eq!(page["header"]["variant"], "dashboard");

    let request = Request::get("/en/admin")
        .header(header::COOKIE, "token=admin-token")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_token_is_treated_as_anonymous() {
    let response = app()
        .await
        .oneshot(get_as("/en/favorites", "garbage"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/en/login?next=%2Fen%2Ffavorites");
}

// =============================================================================
// API
// =============================================================================

#[tokio::test]
async fn health_reports_ok() {
    let response = app().await.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(json_body(response).await["status"], "ok");
}

#[tokio::test]
async fn unknown_api_path_is_json_not_found() {
    let response = app().await.oneshot(get("/api/nothing")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["code"], "PAGE_NOT_FOUND");
}

#[tokio::test]
async fn locale_preference_requires_csrf_token() {
    let response = app()
        .await
        .oneshot(post_json("/api/preferences/locale", json!({ "locale": "ar" }), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(json_body(response).await["code"], "CSRF_REJECTED");
}

#[tokio::test]
async fn locale_preference_is_stored_with_valid_token() {
    let app = app().await;
    let token = csrf_token(&app).await;

    let response = app
        .oneshot(post_json(
            "/api/preferences/locale",
            json!({ "locale": "ar" }),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookies(&response)
        .iter()
        .any(|c| c.starts_with("NEXT_LOCALE=ar")));
    assert_eq!(json_body(response).await["dir"], "rtl");
}

#[tokio::test]
async fn unsupported_locale_preference_is_rejected() {
    let app = app().await;
    let token = csrf_token(&app).await;

    let response = app
        .oneshot(post_json(
            "/api/preferences/locale",
            json!({ "locale": "fr" }),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["code"], "UNSUPPORTED_LOCALE");
}

#[tokio::test]
async fn foreign_origin_is_rejected_even_with_token() {
    let app = app().await;
    let token = csrf_token(&app).await;

    let mut request = post_json("/api/session/logout", json!({}), Some(&token));
    request
        .headers_mut()
        .insert(header::ORIGIN, "https://evil.example".parse().unwrap());
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn logout_clears_session_cookie() {
    let app = app().await;
    let token = csrf_token(&app).await;

    let response = app
        .oneshot(post_json("/api/session/logout", json!({}), Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(set_cookies(&response).iter().any(|c| c.starts_with("token=")));
}

#[tokio::test]
async fn robots_txt_hides_gated_pages() {
    let response = app().await.oneshot(get("/robots.txt")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("Allow: /ar/"));
    assert!(text.contains("Disallow: /en/dashboard"));
    assert!(text.contains("Sitemap: http://localhost:8080/sitemap.xml"));
}
