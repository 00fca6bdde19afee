//! Bearer-token authentication extractors.
//!
//! # Usage
//!
//! ```rust,ignore
//! async fn handler(Authenticated(identity): Authenticated) -> impl IntoResponse {
//!     // identity.user_id, identity.role
//! }
//!
//! async fn admin_handler(AdminOnly(identity): AdminOnly) -> impl IntoResponse {
//!     // only reached for admin tokens
//! }
//! ```

use super::error::ApiError;
use super::state::AppState;
use crate::model::{Role, UserId};
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use secrecy::{ExposeSecret, SecretString};

pub const WEBHOOK_SECRET_HEADER: &str = "x-webhook-secret";

/// Who is calling, as asserted by a verified token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub role: Role,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Extractor that requires a valid `Authorization: Bearer <token>` header.
#[derive(Debug, Clone, Copy)]
pub struct Authenticated(pub Identity);

impl FromRequestParts<AppState> for Authenticated {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or_else(|| {
            ApiError::Unauthorized("Missing or invalid authorization header".into())
        })?;
        let claims = state.tokens.verify(token)?;
        let identity = Identity {
            user_id: claims.user_id()?,
            role: claims.role,
        };
        tracing::debug!(user_id = %identity.user_id, role = identity.role.as_str(), "Authenticated");
        Ok(Self(identity))
    }
}

/// Extractor that additionally requires the admin role.
#[derive(Debug, Clone, Copy)]
pub struct AdminOnly(pub Identity);

impl FromRequestParts<AppState> for AdminOnly {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Authenticated(identity) = Authenticated::from_request_parts(parts, state).await?;
        require_admin(Some(&identity))?;
        Ok(Self(identity))
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
}

/// Fails with `FORBIDDEN` unless an admin identity is present.
pub fn require_admin(identity: Option<&Identity>) -> Result<&Identity, ApiError> {
    match identity {
        Some(identity) if identity.is_admin() => Ok(identity),
        _ => Err(ApiError::Forbidden("Admin access required".into())),
    }
}

/// Checks the shared webhook secret. With no secret configured every caller
/// is accepted.
pub fn check_webhook_secret(
    headers: &HeaderMap,
    expected: Option<&SecretString>,
) -> Result<(), ApiError> {
    let Some(expected) = expected.filter(|s| !s.expose_secret().is_empty()) else {
        return Ok(());
    };
    let provided = headers
        .get(WEBHOOK_SECRET_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    if constant_time_eq(provided.as_bytes(), expected.expose_secret().as_bytes()) {
        Ok(())
    } else {
        Err(ApiError::Unauthorized("Invalid webhook secret".into()))
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn identity(role: Role) -> Identity {
        Identity {
            user_id: UserId(1),
            role,
        }
    }

    #[test]
    fn admin_gate() {
        assert!(require_admin(None).is_err());
        assert!(require_admin(Some(&identity(Role::User))).is_err());
        assert!(require_admin(Some(&identity(Role::Admin))).is_ok());
    }

    #[test]
    fn bearer_prefix_is_required() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Token abc"));
        assert_eq!(bearer_token(&headers), None);
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(bearer_token(&headers), Some("abc"));
    }

    #[test]
    fn webhook_secret_check() {
        let secret = SecretString::from("hook");
        let mut headers = HeaderMap::new();

        assert!(check_webhook_secret(&headers, None).is_ok());
        assert!(check_webhook_secret(&headers, Some(&secret)).is_err());

        headers.insert(WEBHOOK_SECRET_HEADER, HeaderValue::from_static("nope"));
        assert!(check_webhook_secret(&headers, Some(&secret)).is_err());

        headers.insert(WEBHOOK_SECRET_HEADER, HeaderValue::from_static("hook"));
        assert!(check_webhook_secret(&headers, Some(&secret)).is_ok());
    }
}
