//! Authentication adapters.
//!
//! Implementations of the `SessionValidator` port:
//!
//! - `claims` - Reads the role from the backend-issued JWT
//! - `mock` - Test implementation that doesn't require real tokens

mod claims;
mod mock;

pub use claims::JwtClaimsValidator;
pub use mock::MockSessionValidator;
