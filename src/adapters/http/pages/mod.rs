//! HTTP adapter for localized pages and crawler directives.

mod handlers;
mod routes;

pub use handlers::{panic_handler, panic_response};
pub use routes::page_routes;
