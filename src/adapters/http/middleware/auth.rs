//! Session middleware and extractor for axum.
//!
//! This module provides:
//! - `auth_middleware` - Layer that reads the session token and injects a [`Session`]
//! - `CurrentSession` - Extractor that yields the caller's session
//!
//! # Architecture
//!
//! The middleware uses the `SessionValidator` port. Pages are never refused
//! here: a missing, unreadable or expired token simply makes the caller
//! anonymous and the page gate decides what happens next.
//!
//! ```text
//! Request → auth_middleware → injects Session into extensions
//!                                      ↓
//!                              Handler → CurrentSession extractor reads from extensions
//! ```

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::domain::foundation::{AuthError, Session, Timestamp};
use crate::ports::SessionValidator;

/// Auth middleware state.
#[derive(Clone)]
pub struct AuthState {
    pub validator: Arc<dyn SessionValidator>,
    /// Cookie consulted when no Bearer header is present.
    pub session_cookie: String,
}

impl AuthState {
    pub fn new(validator: Arc<dyn SessionValidator>, session_cookie: impl Into<String>) -> Self {
        Self {
            validator,
            session_cookie: session_cookie.into(),
        }
    }
}

/// Returns the session token from `Authorization: Bearer` or the session cookie.
pub fn session_token(headers: &HeaderMap, session_cookie: &str) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    CookieJar::from_headers(headers)
        .get(session_cookie)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}

/// Session middleware.
///
/// This middleware:
/// 1. Extracts the token from the Authorization header or the session cookie
/// 2. Validates it using the `SessionValidator` port
/// 3. Injects the resulting `Session` (anonymous on any failure)
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let session = match session_token(request.headers(), &state.session_cookie) {
        Some(token) => match state.validator.validate(&token).await {
            Ok(session) if session.is_expired_at(&Timestamp::now()) => {
                tracing::debug!("Session expired, continuing anonymously");
                Session::anonymous()
            }
            Ok(session) => session,
            Err(AuthError::TokenExpired) => {
                tracing::debug!("Session token expired, continuing anonymously");
                Session::anonymous()
            }
            Err(e) if e.is_transient() => {
                tracing::error!(error = %e, "Session validation unavailable");
                Session::anonymous()
            }
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring unusable session token");
                Session::anonymous()
            }
        },
        None => Session::anonymous(),
    };

    request.extensions_mut().insert(session);
    next.run(request).await
}

/// Extractor for the caller's session; anonymous when the middleware did not run.
///
/// # Example
///
/// ```ignore
/// async fn my_handler(CurrentSession(session): CurrentSession) -> impl IntoResponse {
///     format!("role: {}", session.role)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .unwrap_or_default();
        Ok(CurrentSession(session))
    }
}
