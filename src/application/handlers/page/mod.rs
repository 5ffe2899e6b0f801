//! Page handlers: metadata resolution and page rendering.

mod render_page;
mod resolve_metadata;

pub use render_page::{PageError, RenderPageHandler, RenderPageQuery, RenderPageResult};
pub use resolve_metadata::{ResolveMetadataHandler, ResolveMetadataQuery, ResolvedMetadata, SiteInfo};
