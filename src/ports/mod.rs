//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SessionValidator` - Turns the backend-issued session token into a role
//! - `MessageSource` - Loads a locale's message bundle
//! - `CatalogReader` - Fetches listings, blog posts and agents for detail pages

mod catalog_reader;
mod message_source;
mod session_validator;

pub use catalog_reader::{CatalogError, CatalogReader};
pub use message_source::{I18nError, MessageSource};
pub use session_validator::SessionValidator;
