//! Session types for the domain layer.
//!
//! A `Session` is what this service knows about the caller: the role claim
//! and the opaque token it came from. Tokens are issued and signed by the
//! backend's auth flow; nothing here creates or verifies them.
//!
//! # Example
//!
//! ```ignore
//! // In HTTP middleware, after reading the token claims:
//! let session = Session::authenticated(UserId::new("42")?, Role::Agent, token);
//! request.extensions_mut().insert(session);
//! ```

use super::{Role, Timestamp, UserId};
use thiserror::Error;

/// The caller's session.
///
/// `Session::anonymous()` stands in for "no session" so handlers never have to
/// juggle an `Option<Session>`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    /// User identifier from the `sub` claim, absent for anonymous callers.
    pub user_id: Option<UserId>,

    /// Role claim mapped onto the gate's roles.
    pub role: Role,

    /// The raw credential, kept so it can be forwarded to the backend API.
    pub token: Option<String>,

    /// Expiry from the `exp` claim, if the token carried one.
    pub expires_at: Option<Timestamp>,
}

impl Session {
    /// Session of a caller without (valid) credentials.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Session created from a successfully read token.
    pub fn authenticated(user_id: UserId, role: Role, token: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id),
            role,
            token: Some(token.into()),
            expires_at: None,
        }
    }

    /// Attaches an expiry instant.
    pub fn with_expiry(mut self, expires_at: Timestamp) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Returns true once the expiry instant has passed.
    pub fn is_expired_at(&self, now: &Timestamp) -> bool {
        self.expires_at
            .map(|expires_at| !now.is_before(&expires_at))
            .unwrap_or(false)
    }

    /// The role to gate with at `now`: an expired session counts as destroyed.
    pub fn effective_role(&self, now: &Timestamp) -> Role {
        if self.is_expired_at(now) {
            Role::Anonymous
        } else {
            self.role
        }
    }
}

/// Errors that can occur while reading a session token.
///
/// All of them end in an anonymous session; they exist so the middleware can
/// log the reason at an appropriate level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is malformed or its claims cannot be read.
    #[error("Invalid token")]
    InvalidToken,

    /// The token's `exp` claim is in the past.
    #[error("Token expired")]
    TokenExpired,

    /// The token has no usable subject.
    #[error("Token has no subject")]
    MissingSubject,

    /// The session source is unavailable (network, config, etc.).
    #[error("Session service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn agent_session() -> Session {
        Session::authenticated(UserId::new("user-123").unwrap(), Role::Agent, "tok")
    }

    #[test]
    fn anonymous_session_has_no_identity() {
        let session = Session::anonymous();
        assert_eq!(session.role, Role::Anonymous);
        assert!(session.user_id.is_none());
        assert!(session.token.is_none());
    }

    #[test]
    fn authenticated_session_keeps_claims() {
        let session = agent_session();
        assert_eq!(session.role, Role::Agent);
        assert_eq!(session.user_id.as_ref().unwrap().as_str(), "user-123");
        assert_eq!(session.token.as_deref(), Some("tok"));
    }

    #[test]
    fn session_without_expiry_never_expires() {
        let session = agent_session();
        assert!(!session.is_expired_at(&Timestamp::now()));
        assert_eq!(session.effective_role(&Timestamp::now()), Role::Agent);
    }

    #[test]
    fn expired_session_gates_as_anonymous() {
        let now = Timestamp::now();
        let past = Timestamp::from_datetime(*now.as_datetime() - Duration::minutes(1));
        let session = agent_session().with_expiry(past);

        assert!(session.is_expired_at(&now));
        assert_eq!(session.effective_role(&now), Role::Anonymous);
    }

    #[test]
    fn live_session_keeps_role() {
        let now = Timestamp::now();
        let future = Timestamp::from_datetime(*now.as_datetime() + Duration::minutes(5));
        let session = agent_session().with_expiry(future);

        assert_eq!(session.effective_role(&now), Role::Agent);
    }

    #[test]
    fn auth_error_display() {
        assert_eq!(AuthError::TokenExpired.to_string(), "Token expired");
        assert_eq!(
            AuthError::service_unavailable("timeout").to_string(),
            "Session service unavailable: timeout"
        );
    }

    #[test]
    fn only_service_errors_are_transient() {
        assert!(AuthError::service_unavailable("down").is_transient());
        assert!(!AuthError::InvalidToken.is_transient());
        assert!(!AuthError::TokenExpired.is_transient());
    }
}
