//! HTTP routes for the JSON API.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{health, issue_csrf_token, logout, set_locale_preference};
use crate::adapters::http::app::AppState;

/// Creates the API router, mounted under `/api`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/csrf", get(issue_csrf_token))
        .route("/preferences/locale", post(set_locale_preference))
        .route("/session/logout", post(logout))
}

/// Routes served outside the `/api` prefix.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
