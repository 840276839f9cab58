//! Analytics handler implementations

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    middleware::auth::AuthenticatedUser,
    services::AnalyticsService,
    state::AppState,
};

use super::{
    request::AnalyticsQuery,
    response::{ContestAnalyticsResponse, PlatformAnalyticsResponse},
};

/// Contest dashboard metrics
pub async fn get_contest_analytics(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(contest_id): Path<Uuid>,
    Query(query): Query<AnalyticsQuery>,
) -> AppResult<Json<ContestAnalyticsResponse>> {
    let days = query
        .days
        .unwrap_or(state.config().analytics.default_window_days);

    let metrics = AnalyticsService::contest(state.db(), &contest_id, &user, days).await?;
    Ok(Json(metrics))
}

/// Platform dashboard metrics
pub async fn get_platform_analytics(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> AppResult<Json<PlatformAnalyticsResponse>> {
    let days = query
        .days
        .unwrap_or(state.config().analytics.default_window_days);

    let metrics = AnalyticsService::platform(state.db(), days).await?;
    Ok(Json(metrics))
}
