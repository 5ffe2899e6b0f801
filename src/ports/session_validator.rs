//! Session validation port.
//!
//! The site does not own accounts: the backend API issues the session token
//! and this port only turns it into a [`Session`] carrying the caller's role.
//!
//! # Contract
//!
//! Implementations must:
//! - Return `AuthError::InvalidToken` for malformed tokens
//! - Return `AuthError::TokenExpired` for expired tokens
//! - Return `AuthError::MissingSubject` when the token names no user
//! - Return `AuthError::ServiceUnavailable` for transient errors

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, Session};

/// Turns a raw session token into a session.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validates `token` (without any "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<Session, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Role, UserId};
    use std::collections::HashMap;
    use std::sync::RwLock;

    struct TestSessionValidator {
        tokens: RwLock<HashMap<String, Session>>,
    }

    #[async_trait]
    impl SessionValidator for TestSessionValidator {
        async fn validate(&self, token: &str) -> Result<Session, AuthError> {
            self.tokens
                .read()
                .unwrap()
                .get(token)
                .cloned()
                .ok_or(AuthError::InvalidToken)
        }
    }

    #[tokio::test]
    async fn returns_session_for_known_token() {
        let session = Session::authenticated(UserId::new("u-1").unwrap(), Role::Agent, "tok");
        let validator = TestSessionValidator {
            tokens: RwLock::new(HashMap::from([("tok".to_string(), session.clone())])),
        };

        assert_eq!(validator.validate("tok").await.unwrap(), session);
        assert!(matches!(validator.validate("nope").await, Err(AuthError::InvalidToken)));
    }

    #[test]
    fn session_validator_trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn SessionValidator>();
    }
}
