//! Authentication middleware
//!
//! Verifies the bearer token, then touches the login session it names so
//! idle and absolute timeouts are enforced on every authenticated request.
//! The refreshed [`SessionRecord`] is left in the request extensions.

use axum::{
    body::Body,
    extract::{FromRequestParts, OriginalUri, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    middleware::guard::login_redirect,
    models::Role,
    services::{session_service::SessionRecord, AuthService, SessionService},
    state::AppState,
};

/// Authenticated user resolved from the access token and its session
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
    pub session_id: Uuid,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Optional authenticated user wrapper (never fails)
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuth(parts.extensions.get::<AuthenticatedUser>().cloned()))
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Resolve the caller from the request headers
async fn authenticate(
    state: &AppState,
    headers: &HeaderMap,
) -> AppResult<(AuthenticatedUser, SessionRecord)> {
    let token = bearer_token(headers).ok_or(AppError::Unauthorized)?;
    let claims = AuthService::verify_token(token, &state.config().jwt.secret)?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::InvalidToken)?;
    let session_id = Uuid::parse_str(&claims.sid).map_err(|_| AppError::InvalidToken)?;
    if Role::from_str(&claims.role).is_none() {
        return Err(AppError::InvalidToken);
    }

    let session = SessionService::touch(state.redis(), state.session_policy(), &session_id).await?;
    if session.user_id != user_id {
        return Err(AppError::InvalidToken);
    }

    // The session is the source of truth for the role: role changes revoke sessions
    let role = Role::from_str(&session.role).ok_or(AppError::InvalidToken)?;

    let user = AuthenticatedUser {
        id: user_id,
        username: claims.username,
        role,
        session_id,
    };
    Ok((user, session))
}

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let path = request
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.path().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    match authenticate(&state, request.headers()).await {
        Ok((user, session)) => {
            debug!(path = %path, user_id = %user.id, role = %user.role, "User authenticated");
            request.extensions_mut().insert(user);
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        Err(e) => {
            debug!(path = %path, error = %e, "Authentication failed");
            e.with_redirect(login_redirect(&path)).into_response()
        }
    }
}

/// Optional authentication middleware (doesn't fail if no token)
pub async fn optional_auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    if bearer_token(request.headers()).is_some() {
        match authenticate(&state, request.headers()).await {
            Ok((user, session)) => {
                request.extensions_mut().insert(user);
                request.extensions_mut().insert(session);
            }
            Err(e) => debug!(error = %e, "Ignoring invalid credentials on public route"),
        }
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers), Some("abc.def"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic Zm9vOmJhcg=="));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }
}
