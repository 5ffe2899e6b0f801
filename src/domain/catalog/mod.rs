//! Catalog records fetched from the backend API for detail pages.

mod records;

pub use records::{Agent, BlogPost, CatalogRecord, Listing, RecordError};
