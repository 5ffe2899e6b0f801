//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Session token reading (JWT claims, mock)
//! - `catalog` - Backend API records (HTTP, in-memory)
//! - `i18n` - Message bundle sources (embedded, filesystem)
//! - `http` - The axum HTTP surface

pub mod auth;
pub mod catalog;
pub mod http;
pub mod i18n;

pub use auth::{JwtClaimsValidator, MockSessionValidator};
pub use catalog::{HttpCatalogConfig, HttpCatalogReader, InMemoryCatalog};
pub use i18n::{EmbeddedMessageSource, FileMessageSource};
