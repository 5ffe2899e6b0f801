//! AqaarGate Web - localized real-estate listing site.
//!
//! This crate resolves the request locale, looks up translations with a
//! fallback chain, gates pages by the caller's role and composes each page as
//! a serializable document with SEO metadata.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
