//! HTTP handlers for the JSON API.
//!
//! State-changing endpoints sit behind the CSRF middleware; the handlers
//! themselves only translate between JSON and cookies.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;

use crate::adapters::http::app::AppState;
use crate::adapters::http::middleware::{CurrentSession, CSRF_HEADER};
use crate::domain::foundation::ErrorCode;
use crate::domain::i18n::Locale;

use super::dto::{CsrfTokenResponse, ErrorResponse, HealthResponse, LocaleResponse, SetLocaleRequest};

/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse::ok())
}

/// GET /api/csrf - Issue a fresh CSRF token as cookie and body.
pub async fn issue_csrf_token(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let token = state.csrf.issue();
    let jar = jar.add(state.cookies.csrf(token.clone()));
    (
        jar,
        Json(CsrfTokenResponse {
            token,
            header: CSRF_HEADER,
        }),
    )
}

/// POST /api/preferences/locale - Store the caller's locale preference.
pub async fn set_locale_preference(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<SetLocaleRequest>,
) -> Response {
    let Some(locale) = Locale::from_tag(&request.locale) else {
        let error = ErrorResponse::with_details(
            ErrorCode::UnsupportedLocale,
            format!("Locale '{}' is not supported", request.locale),
            serde_json::json!({
                "supported": Locale::ALL.iter().map(Locale::tag).collect::<Vec<_>>(),
            }),
        );
        return (StatusCode::BAD_REQUEST, Json(error)).into_response();
    };

    tracing::debug!(locale = %locale, "Locale preference stored");
    let jar = jar.add(state.cookies.preference(locale));
    (
        jar,
        Json(LocaleResponse {
            locale: locale.tag().to_string(),
            dir: locale.direction().as_html_dir(),
        }),
    )
        .into_response()
}

/// POST /api/session/logout - Clear the session cookie.
///
/// The backend owns sessions; the site only forgets its copy of the token.
pub async fn logout(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    jar: CookieJar,
) -> impl IntoResponse {
    if let Some(user_id) = &session.user_id {
        tracing::info!(user_id = %user_id, "Session cookie cleared");
    }
    (jar.remove(state.cookies.session_removal()), StatusCode::NO_CONTENT)
}
