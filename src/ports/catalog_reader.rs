//! Backend catalog port: the records detail pages display.
//!
//! Any answer from the backend that does not carry the record (non-2xx status,
//! malformed body) is `Ok(None)`: the page is shown as not found. Errors are
//! reserved for the backend being unreachable, so the page layer can fall back
//! to generic metadata instead of claiming the record does not exist.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::catalog::{Agent, BlogPost, Listing};
use crate::domain::foundation::RecordId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog backend unreachable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait CatalogReader: Send + Sync {
    async fn listing(&self, id: &RecordId) -> Result<Option<Listing>, CatalogError>;

    async fn blog_post(&self, id: &RecordId) -> Result<Option<BlogPost>, CatalogError>;

    async fn agent(&self, id: &RecordId) -> Result<Option<Agent>, CatalogError>;
}
