//! Catalog readers.
//!
//! - `http` - Reads records from the backend REST API
//! - `in_memory` - Fixed records for tests and offline development

mod http;
mod in_memory;

pub use http::{HttpCatalogConfig, HttpCatalogReader, API_KEY_HEADER};
pub use in_memory::InMemoryCatalog;
