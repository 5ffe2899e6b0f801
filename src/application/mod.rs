//! Application layer - Query handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Every request the site serves is a read, so there are only query handlers.

pub mod handlers;

pub use handlers::{
    PageError, RenderPageHandler, RenderPageQuery, RenderPageResult, ResolveMetadataHandler,
    ResolveMetadataQuery, ResolvedMetadata, SiteInfo, Translator,
};
