//! HTTP routes for pages.

use axum::{routing::get, Router};

use super::handlers::{render_page, robots_txt};
use crate::adapters::http::app::AppState;

/// Creates the page router: robots.txt plus the catch-all page fallback.
///
/// Pages use a fallback instead of a `/:locale/*path` route so unprefixed
/// paths reach the same handler and get redirected.
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/robots.txt", get(robots_txt))
        .fallback(render_page)
}
