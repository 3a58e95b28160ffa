//! Bearer-token extractors.
//!
//! Handlers take [`AuthSession`] to require any live session, or [`AdminSession`] to
//! require an administrator. Both reject before the request body is read.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use chrono::Utc;
use tracing::debug;

use crate::session::Session;

use super::response::ApiErrorResponse;
use super::state::AppState;

/// The session of an authenticated request.
#[derive(Debug, Clone)]
pub struct AuthSession(pub Session);

/// The session of an authenticated administrator.
#[derive(Debug, Clone)]
pub struct AdminSession(pub Session);

fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
    (!token.is_empty()).then_some(token)
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthSession {
    type Rejection = ApiErrorResponse;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = state
            .sessions()
            .authenticate(bearer_token(parts), Utc::now())
            .map_err(|err| {
                debug!(uri = %parts.uri, error = %err, "Authentication rejected");
                ApiErrorResponse::from(err)
            })?;
        Ok(AuthSession(session))
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ApiErrorResponse;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthSession(session) = AuthSession::from_request_parts(parts, state).await?;
        session.require_admin()?;
        Ok(AdminSession(session))
    }
}
