//! HTTP adapter for the JSON API endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CsrfTokenResponse, ErrorResponse, HealthResponse, LocaleResponse, SetLocaleRequest,
};
pub use routes::{api_routes, health_routes};
