//! Mock session validator for testing.
//!
//! # Example
//!
//! ```ignore
//! use aqaargate_web::adapters::auth::MockSessionValidator;
//! use aqaargate_web::domain::foundation::Role;
//!
//! let validator = MockSessionValidator::new().with_role("agent-token", "7", Role::Agent);
//! let session = validator.validate("agent-token").await?;
//! assert_eq!(session.role, Role::Agent);
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, Role, Session, UserId};
use crate::ports::SessionValidator;

/// Stores a map of tokens to sessions. Unknown tokens return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, Session>>,
    /// Returned for every validation when set.
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `token` as a session of `user_id` with `role`.
    pub fn with_role(self, token: impl Into<String>, user_id: &str, role: Role) -> Self {
        let token = token.into();
        let session = Session::authenticated(
            UserId::new(user_id).unwrap_or_else(|_| UserId::new("test-user").unwrap()),
            role,
            token.clone(),
        );
        self.with_session(token, session)
    }

    pub fn with_session(self, token: impl Into<String>, session: Session) -> Self {
        self.tokens.write().unwrap().insert(token.into(), session);
        self
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }

    pub fn clear_error(&self) {
        *self.force_error.write().unwrap() = None;
    }

    pub fn remove_token(&self, token: &str) {
        self.tokens.write().unwrap().remove(token);
    }

    pub fn token_count(&self) -> usize {
        self.tokens.read().unwrap().len()
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<Session, AuthError> {
        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }

        self.tokens
            .read()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn registered_token_yields_its_role() {
        let validator = MockSessionValidator::new()
            .with_role("admin-token", "1", Role::Admin)
            .with_role("user-token", "2", Role::User);

        let session = validator.validate("admin-token").await.unwrap();
        assert_eq!(session.role, Role::Admin);
        assert_eq!(session.user_id.unwrap().as_str(), "1");
        assert_eq!(session.token.as_deref(), Some("admin-token"));
        assert_eq!(validator.token_count(), 2);
    }

    #[tokio::test]
    async fn unknown_token_is_invalid() {
        let validator = MockSessionValidator::new();
        assert!(matches!(validator.validate("nope").await, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn forced_error_wins_until_cleared() {
        let validator = MockSessionValidator::new()
            .with_role("t", "1", Role::User)
            .with_error(AuthError::service_unavailable("down"));

        assert!(validator.validate("t").await.unwrap_err().is_transient());
        validator.clear_error();
        assert!(validator.validate("t").await.is_ok());
    }

    #[tokio::test]
    async fn removed_token_stops_validating() {
        let validator = MockSessionValidator::new().with_role("t", "1", Role::User);
        validator.remove_token("t");
        assert!(validator.validate("t").await.is_err());
    }
}
