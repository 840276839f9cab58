//! Authentication handler implementations

use axum::{extract::State, http::StatusCode, Extension, Json};
use validator::Validate;

use crate::{
    constants::{actions, entity_types},
    error::{AppError, AppResult},
    middleware::{auth::AuthenticatedUser, client_ip::ClientIp},
    models::{NewActivity, Role},
    services::{session_service::SessionRecord, ActivityService, AuthService, UserService},
    state::AppState,
    utils::validate_username,
};

use super::{
    request::{LoginRequest, LogoutRequest, RefreshTokenRequest, RegisterRequest},
    response::{
        AuthResponse, CurrentUserResponse, LogoutResponse, RefreshResponse, RegisterResponse,
        SessionResponse,
    },
};

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    payload.validate()?;
    validate_username(&payload.username).map_err(|e| AppError::Validation(e.to_string()))?;

    let user = AuthService::register(
        state.db(),
        &payload.username,
        &payload.email,
        &payload.password,
        payload.display_name.as_deref(),
    )
    .await?;

    ActivityService::record(
        state.db(),
        NewActivity::new(Some(user.id), actions::USER_REGISTER)
            .entity(entity_types::USER, user.id)
            .ip(ip),
    )
    .await;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user: user.into(),
        }),
    ))
}

/// Login with username/email and password
pub async fn login(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    payload.validate()?;

    let (user, tokens) = AuthService::login(
        state.db(),
        state.redis(),
        state.config(),
        state.session_policy(),
        &payload.identifier,
        &payload.password,
    )
    .await?;

    ActivityService::record(
        state.db(),
        NewActivity::new(Some(user.id), actions::USER_LOGIN)
            .metadata(serde_json::json!({ "session_id": tokens.session_id }))
            .ip(ip),
    )
    .await;

    let redirect = user
        .role()
        .map(|r| r.home_path())
        .unwrap_or(Role::Participant.home_path())
        .to_string();

    Ok(Json(AuthResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        token_type: "Bearer".to_string(),
        expires_in: tokens.expires_in,
        user: user.into(),
        redirect,
    }))
}

/// Refresh access token
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(payload): Json<RefreshTokenRequest>,
) -> AppResult<Json<RefreshResponse>> {
    payload.validate()?;

    let tokens = AuthService::refresh(
        state.db(),
        state.redis(),
        state.config(),
        state.session_policy(),
        &payload.refresh_token,
    )
    .await?;

    Ok(Json(RefreshResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        token_type: "Bearer".to_string(),
        expires_in: tokens.expires_in,
    }))
}

/// Logout (end this session, or all of them)
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    payload: Option<Json<LogoutRequest>>,
) -> AppResult<Json<LogoutResponse>> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();
    let all_sessions = payload.all_sessions.unwrap_or(false);

    let sessions_closed = AuthService::logout(
        state.redis(),
        &auth_user.id,
        &auth_user.session_id,
        all_sessions,
        payload.refresh_token.as_deref(),
    )
    .await?;

    ActivityService::record(
        state.db(),
        NewActivity::new(Some(auth_user.id), actions::USER_LOGOUT)
            .metadata(serde_json::json!({ "all_sessions": all_sessions })),
    )
    .await;

    Ok(Json(LogoutResponse {
        message: "Logged out successfully".to_string(),
        sessions_closed,
    }))
}

/// Get current authenticated user and session
pub async fn get_current_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Extension(session): Extension<SessionRecord>,
) -> AppResult<Json<CurrentUserResponse>> {
    let user = UserService::get_user(state.db(), &auth_user.id).await?;

    Ok(Json(CurrentUserResponse {
        user: user.into(),
        session: SessionResponse::new(&session, state.session_policy()),
        home_path: auth_user.role.home_path().to_string(),
    }))
}
