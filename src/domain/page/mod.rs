//! Pages: the route table, SEO metadata, composition and crawler directives.

mod composer;
mod metadata;
mod robots;
mod routes;

pub use composer::{
    compose, compose_error, Body, CallToAction, Crumb, ErrorScreen, Footer, Header,
    HeaderVariant, Link, PageContent, PageDocument, PageTemplate,
};
pub use metadata::{truncate_description, titled, AlternateLink, OgType, PageMetadata, DESCRIPTION_LIMIT};
pub use robots::RobotsDirectives;
pub use routes::{match_route, page_path, route_for, PageId, RecordKind, RouteDef, RouteMatch, NOT_FOUND_ROUTE, ROUTES};
