//! HTTP adapters - the site's axum surface.
//!
//! - `api` - JSON endpoints (health, CSRF token, locale preference, logout)
//! - `pages` - localized pages, robots.txt and the panic screen
//! - `middleware` - session reading and CSRF protection
//! - `app` - shared state and router assembly

pub mod api;
pub mod app;
pub mod middleware;
pub mod pages;

pub use app::{build_router, csrf_guard, AppState, CookieSettings};
