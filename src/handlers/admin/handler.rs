//! Admin handler implementations

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::AuthenticatedUser,
    models::Role,
    services::{ActivityService, AdminService},
    state::AppState,
    utils::Page,
};

use super::{
    request::{ActivityQuery, ListUsersQuery, UpdateUserRoleRequest},
    response::{
        AccountStatusResponse, ActivityLogsListResponse, AdminUsersListResponse,
        SystemStatsResponse,
    },
};

/// List all users with admin details
pub async fn list_all_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> AppResult<Json<AdminUsersListResponse>> {
    let role = match query.role.as_deref() {
        Some(raw) => Some(
            Role::from_str(raw)
                .ok_or_else(|| AppError::Validation(format!("Unknown role '{}'", raw)))?,
        ),
        None => None,
    };

    let users = AdminService::list_users(
        state.db(),
        Page::new(query.page, query.per_page),
        query.search.as_deref(),
        role,
    )
    .await?;

    Ok(Json(users))
}

/// Change a user's role
pub async fn update_user_role(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRoleRequest>,
) -> AppResult<Json<AccountStatusResponse>> {
    payload.validate()?;

    let role = Role::from_str(&payload.role)
        .ok_or_else(|| AppError::Validation(format!("Unknown role '{}'", payload.role)))?;

    let response =
        AdminService::update_user_role(state.db(), state.redis(), &auth_user, &id, role).await?;

    Ok(Json(response))
}

/// Deactivate an account and end its sessions
pub async fn deactivate_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<AccountStatusResponse>> {
    let response =
        AdminService::set_account_active(state.db(), state.redis(), &auth_user, &id, false).await?;
    Ok(Json(response))
}

/// Reactivate a deactivated account
pub async fn reactivate_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<AccountStatusResponse>> {
    let response =
        AdminService::set_account_active(state.db(), state.redis(), &auth_user, &id, true).await?;
    Ok(Json(response))
}

/// Browse the activity log
pub async fn list_activity(
    State(state): State<AppState>,
    Query(query): Query<ActivityQuery>,
) -> AppResult<Json<ActivityLogsListResponse>> {
    let logs = ActivityService::list(
        state.db(),
        Page::new(query.page, query.per_page),
        query.user_id.as_ref(),
        query.action.as_deref(),
        query.entity_type.as_deref(),
    )
    .await?;

    Ok(Json(logs))
}

/// Get system statistics
pub async fn get_system_stats(
    State(state): State<AppState>,
) -> AppResult<Json<SystemStatsResponse>> {
    let stats = AdminService::get_system_stats(state.db(), state.uptime_seconds()).await?;
    Ok(Json(stats))
}

