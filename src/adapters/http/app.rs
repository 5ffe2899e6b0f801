//! Router assembly and shared request state.
//!
//! ```text
//! request id → trace → propagate id → compression → catch panic → timeout → cors
//!     → auth_middleware → csrf_middleware → routes
//! ```

use std::sync::Arc;

use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::{middleware, Router};
use axum_extra::extract::cookie::{Cookie, SameSite};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::api::{api_routes, health_routes};
use super::middleware::{
    auth_middleware, csrf_middleware, AuthState, CsrfError, CsrfGuard, CSRF_COOKIE, CSRF_HEADER,
};
use super::pages::{page_routes, panic_handler};
use crate::application::handlers::page::RenderPageHandler;
use crate::config::AppConfig;
use crate::domain::i18n::Locale;
use crate::domain::page::RobotsDirectives;

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state, cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub pages: Arc<RenderPageHandler>,
    pub csrf: Arc<CsrfGuard>,
    pub cookies: CookieSettings,
    /// Rendered robots.txt body.
    pub robots: Arc<str>,
}

impl AppState {
    pub fn new(pages: Arc<RenderPageHandler>, csrf: Arc<CsrfGuard>, cookies: CookieSettings) -> Self {
        let robots = RobotsDirectives::for_site(&pages.site().base_url).render();
        Self {
            pages,
            csrf,
            cookies,
            robots: Arc::from(robots),
        }
    }
}

/// Names and flags for the cookies the site writes.
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub preference_cookie: String,
    pub session_cookie: String,
    /// Adds `Secure`; on in production.
    pub secure: bool,
}

impl CookieSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            preference_cookie: config.i18n.preference_cookie.clone(),
            session_cookie: config.auth.session_cookie.clone(),
            secure: config.is_production(),
        }
    }

    /// Long-lived locale preference.
    pub fn preference(&self, locale: Locale) -> Cookie<'static> {
        let mut cookie = Cookie::build((self.preference_cookie.clone(), locale.tag()))
            .path("/")
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .build();
        cookie.make_permanent();
        cookie
    }

    /// CSRF token cookie; readable by scripts so they can echo it.
    pub fn csrf(&self, token: String) -> Cookie<'static> {
        Cookie::build((CSRF_COOKIE, token))
            .path("/")
            .same_site(SameSite::Strict)
            .secure(self.secure)
            .http_only(false)
            .build()
    }

    /// Removal cookie for the session token.
    pub fn session_removal(&self) -> Cookie<'static> {
        Cookie::build((self.session_cookie.clone(), ""))
            .path("/")
            .build()
    }
}

/// Builds the CSRF guard from configuration.
///
/// Without a configured secret a per-process key is generated, so tokens do
/// not survive restarts. Production configuration requires a secret.
pub fn csrf_guard(config: &AppConfig) -> Result<CsrfGuard, CsrfError> {
    let secret = match &config.csrf.secret {
        Some(secret) => secret.clone(),
        None => {
            tracing::warn!("No CSRF secret configured, using an ephemeral key");
            CsrfGuard::ephemeral_secret()
        }
    };
    CsrfGuard::new(
        &secret,
        config.site.origin(),
        config.csrf.trusted_origins_list(),
        config.csrf.enabled,
    )
}

// ════════════════════════════════════════════════════════════════════════════════
// Router
// ════════════════════════════════════════════════════════════════════════════════

/// Assembles the full site router.
pub fn build_router(state: AppState, auth: AuthState, config: &AppConfig) -> Router {
    let translator = state.pages.translator().clone();
    let csrf = state.csrf.clone();

    let routes = Router::new()
        .merge(health_routes())
        .nest("/api", api_routes())
        .merge(page_routes())
        .layer(middleware::from_fn_with_state(csrf, csrf_middleware))
        .layer(middleware::from_fn_with_state(auth, auth_middleware))
        .with_state(state);

    routes.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(CompressionLayer::new())
            .layer(CatchPanicLayer::custom(panic_handler(translator)))
            .layer(TimeoutLayer::new(config.server.request_timeout()))
            .layer(cors_layer(&config.server.cors_origins_list())),
    )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static(CSRF_HEADER),
        ])
        .allow_credentials(true)
}
