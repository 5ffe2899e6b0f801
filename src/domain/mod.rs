//! Domain layer containing the site's pure types and rules.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, roles, sessions, errors, timestamps)
//! - `i18n` - Locales, message bundles, locale resolution and translation fallback
//! - `access` - The page gate and the session context that re-runs it
//! - `catalog` - Listing, blog post and agent records shown on detail pages
//! - `page` - Route table, metadata and page composition

pub mod access;
pub mod catalog;
pub mod foundation;
pub mod i18n;
pub mod page;
