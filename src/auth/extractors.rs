//! Axum extractors for the soft and hard authentication checks.
//!
//! Both checks share one resolution path: read the session cookie, verify
//! the token, map the subject claim to an identity. They differ only in
//! what happens on failure.

use axum::{extract::FromRequestParts, http::request::Parts};

use super::cookie::{SESSION_COOKIE_NAME, get_cookie};
use super::errors::LoginRedirect;
use super::state::HasSessionAuth;
use super::types::{AuthenticatedUser, RequestIdentity};

/// Resolve the request identity from the session cookie.
/// Absent, malformed, tampered, and expired tokens all resolve to
/// `Anonymous`; this never fails the request.
fn resolve_identity<S: HasSessionAuth>(parts: &Parts, state: &S) -> RequestIdentity {
    let Some(token) = get_cookie(&parts.headers, SESSION_COOKIE_NAME) else {
        return RequestIdentity::Anonymous;
    };

    match state.jwt().validate_session_token(token) {
        Ok(claims) => RequestIdentity::Authenticated {
            user_uuid: claims.sub,
        },
        Err(_) => RequestIdentity::Anonymous,
    }
}

/// Soft check: annotates every request with its identity, never blocks.
/// Used by routes that render differently for visitors and members.
pub struct SessionState(pub RequestIdentity);

impl<S> FromRequestParts<S> for SessionState
where
    S: HasSessionAuth + Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(SessionState(resolve_identity(parts, state)))
    }
}

/// Hard check: requires a verified session or redirects to the login page.
/// Failure stops the request before the handler runs.
pub struct RequireAuth(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAuth
where
    S: HasSessionAuth + Send + Sync,
{
    type Rejection = LoginRedirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match resolve_identity(parts, state) {
            RequestIdentity::Authenticated { user_uuid } => {
                Ok(RequireAuth(AuthenticatedUser { user_uuid }))
            }
            RequestIdentity::Anonymous => Err(LoginRedirect),
        }
    }
}
