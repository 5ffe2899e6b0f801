//! HTTP middleware for axum.
//!
//! This module contains middleware layers for cross-cutting concerns:
//!
//! - `auth` - Session token reading and the `CurrentSession` extractor
//! - `csrf` - Origin check and signed double-submit token for state changes

pub mod auth;
pub mod csrf;

pub use auth::{auth_middleware, session_token, AuthState, CurrentSession};
pub use csrf::{csrf_middleware, CsrfError, CsrfGuard, CSRF_COOKIE, CSRF_HEADER};
