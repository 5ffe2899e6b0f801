//! Command and query handlers.
//!
//! - `i18n` - Per-locale translation accessors with lazy bundle loading
//! - `page` - Metadata resolution and page rendering

pub mod i18n;
pub mod page;

pub use i18n::Translator;
pub use page::{
    PageError, RenderPageHandler, RenderPageQuery, RenderPageResult, ResolveMetadataHandler,
    ResolveMetadataQuery, ResolvedMetadata, SiteInfo,
};
