//! User handler implementations

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    middleware::auth::AuthenticatedUser,
    services::UserService,
    state::AppState,
};

use super::{
    request::UpdateProfileRequest,
    response::{ProfileResponse, PublicProfileResponse},
};

/// Get the caller's own profile
pub async fn get_own_profile(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<ProfileResponse>> {
    let user = UserService::get_user(state.db(), &auth_user.id).await?;
    Ok(Json(user.into()))
}

/// Update the caller's own profile
pub async fn update_own_profile(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<Json<ProfileResponse>> {
    payload.validate()?;

    let user = UserService::update_profile(state.db(), &auth_user.id, payload).await?;
    Ok(Json(user.into()))
}

/// Get a public profile by username
pub async fn get_public_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<PublicProfileResponse>> {
    let profile = UserService::get_public_profile(state.db(), &username).await?;
    Ok(Json(profile))
}
