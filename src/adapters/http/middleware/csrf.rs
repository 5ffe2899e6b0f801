//! CSRF guard for state-changing requests.
//!
//! Two checks run on `POST`, `PUT`, `PATCH` and `DELETE`:
//!
//! 1. The `Origin` header (or, without it, the `Referer`) must name the site
//!    or a trusted origin.
//! 2. Signed double submit: the `csrf_token` cookie must equal the
//!    `x-csrf-token` header, and the token must carry a valid HMAC-SHA256 of
//!    its nonce. Tokens look like `{nonce}.{hex(mac)}`.
//!
//! Safe methods pass through untouched.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::CookieJar;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;
use url::Url;
use uuid::Uuid;

use crate::adapters::http::api::ErrorResponse;
use crate::domain::foundation::ErrorCode;

type HmacSha256 = Hmac<Sha256>;

/// Cookie carrying the token.
pub const CSRF_COOKIE: &str = "csrf_token";

/// Header the client echoes the token in.
pub const CSRF_HEADER: &str = "x-csrf-token";

/// Reasons a request is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CsrfError {
    #[error("request has neither Origin nor Referer")]
    MissingOrigin,

    #[error("origin '{0}' is not allowed")]
    ForeignOrigin(String),

    #[error("CSRF token cookie or header missing")]
    MissingToken,

    #[error("CSRF token cookie and header differ")]
    TokenMismatch,

    #[error("CSRF token signature invalid")]
    BadSignature,

    #[error("CSRF key unusable")]
    InvalidKey,
}

impl IntoResponse for CsrfError {
    fn into_response(self) -> Response {
        let body = ErrorResponse::new(ErrorCode::CsrfRejected, "Request rejected by CSRF protection");
        (StatusCode::FORBIDDEN, Json(body)).into_response()
    }
}

/// Issues and checks CSRF tokens.
#[derive(Clone)]
pub struct CsrfGuard {
    mac: HmacSha256,
    allowed_origins: Vec<String>,
    enabled: bool,
}

impl CsrfGuard {
    /// Creates a guard accepting `site_origin` plus `trusted_origins`.
    pub fn new(
        secret: &SecretString,
        site_origin: &str,
        trusted_origins: Vec<String>,
        enabled: bool,
    ) -> Result<Self, CsrfError> {
        let mac = HmacSha256::new_from_slice(secret.expose_secret().as_bytes())
            .map_err(|_| CsrfError::InvalidKey)?;

        let allowed_origins = std::iter::once(site_origin.to_string())
            .chain(trusted_origins)
            .filter_map(|configured| {
                let origin = origin_of(&configured);
                if origin.is_none() {
                    tracing::warn!(origin = %configured, "Ignoring unparseable CSRF origin");
                }
                origin
            })
            .collect();

        Ok(Self {
            mac,
            allowed_origins,
            enabled,
        })
    }

    /// A fresh key for processes without a configured secret.
    pub fn ephemeral_secret() -> SecretString {
        SecretString::new(format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple()))
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Creates a new signed token.
    pub fn issue(&self) -> String {
        let nonce = Uuid::new_v4().simple().to_string();
        let mut mac = self.mac.clone();
        mac.update(nonce.as_bytes());
        format!("{}.{}", nonce, hex::encode(mac.finalize().into_bytes()))
    }

    /// Checks a token's signature.
    pub fn verify(&self, token: &str) -> Result<(), CsrfError> {
        let (nonce, signature) = token.split_once('.').ok_or(CsrfError::BadSignature)?;
        let signature = hex::decode(signature).map_err(|_| CsrfError::BadSignature)?;

        let mut mac = self.mac.clone();
        mac.update(nonce.as_bytes());
        mac.verify_slice(&signature).map_err(|_| CsrfError::BadSignature)
    }

    /// Runs both checks against a request's headers.
    pub fn check(&self, headers: &HeaderMap) -> Result<(), CsrfError> {
        self.check_origin(headers)?;

        let cookie = CookieJar::from_headers(headers)
            .get(CSRF_COOKIE)
            .map(|cookie| cookie.value().to_string());
        let submitted = headers.get(CSRF_HEADER).and_then(|h| h.to_str().ok());

        let (Some(cookie), Some(submitted)) = (cookie, submitted) else {
            return Err(CsrfError::MissingToken);
        };
        if !bool::from(cookie.as_bytes().ct_eq(submitted.as_bytes())) {
            return Err(CsrfError::TokenMismatch);
        }
        self.verify(submitted)
    }

    fn check_origin(&self, headers: &HeaderMap) -> Result<(), CsrfError> {
        let claimed = headers
            .get(header::ORIGIN)
            .or_else(|| headers.get(header::REFERER))
            .and_then(|h| h.to_str().ok())
            .ok_or(CsrfError::MissingOrigin)?;

        // Opaque origins ("null") and garbage never match.
        let origin = origin_of(claimed).ok_or_else(|| CsrfError::ForeignOrigin(claimed.to_string()))?;

        if self.allowed_origins.contains(&origin) {
            Ok(())
        } else {
            Err(CsrfError::ForeignOrigin(origin))
        }
    }
}

impl std::fmt::Debug for CsrfGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsrfGuard")
            .field("allowed_origins", &self.allowed_origins)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

/// Serialized origin of a URL: scheme, lowercased host and non-default port.
fn origin_of(url: &str) -> Option<String> {
    let origin = Url::parse(url).ok()?.origin();
    origin.is_tuple().then(|| origin.ascii_serialization())
}

fn is_state_changing(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH | Method::DELETE)
}

/// CSRF middleware.
pub async fn csrf_middleware(
    State(guard): State<Arc<CsrfGuard>>,
    request: Request,
    next: Next,
) -> Response {
    if guard.is_enabled() && is_state_changing(request.method()) {
        if let Err(e) = guard.check(request.headers()) {
            tracing::warn!(
                method = %request.method(),
                path = %request.uri().path(),
                reason = %e,
                "CSRF check failed"
            );
            return e.into_response();
        }
    }
    next.run(request).await
}
