//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, roles, session types and error types
//! that form the vocabulary of the site.

mod auth;
mod errors;
mod ids;
mod role;
mod timestamp;

pub use auth::{AuthError, Session};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{IncidentId, RecordId, UserId};
pub use role::Role;
pub use timestamp::Timestamp;
