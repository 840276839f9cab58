//! Contest handler implementations

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::{AuthenticatedUser, OptionalAuth},
    models::ContestPhase,
    services::ContestService,
    state::AppState,
    utils::{Page, PageQuery},
};

use super::{
    request::{CreateContestRequest, ListContestsQuery, UpdateContestRequest},
    response::{
        ContestResponse, ContestsListResponse, GalleryResponse, HostedContestsResponse,
        ResultsResponse,
    },
};

/// List published contests
pub async fn list_contests(
    State(state): State<AppState>,
    Query(query): Query<ListContestsQuery>,
) -> AppResult<Json<ContestsListResponse>> {
    let phase = match query.phase.as_deref() {
        Some(raw) => Some(
            ContestPhase::from_str(raw)
                .ok_or_else(|| AppError::Validation(format!("Unknown phase '{}'", raw)))?,
        ),
        None => None,
    };
    let search = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty());

    let contests = ContestService::list_public(
        state.db(),
        Page::new(query.page, query.per_page),
        phase,
        search,
    )
    .await?;

    Ok(Json(contests))
}

/// Contest landing page
pub async fn get_contest(
    State(state): State<AppState>,
    OptionalAuth(viewer): OptionalAuth,
    Path(slug): Path<String>,
) -> AppResult<Json<ContestResponse>> {
    let contest = ContestService::get_landing(state.db(), &slug, viewer.as_ref()).await?;
    Ok(Json(contest))
}

/// Public gallery of approved entries
pub async fn list_gallery(
    State(state): State<AppState>,
    OptionalAuth(viewer): OptionalAuth,
    Path(slug): Path<String>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<GalleryResponse>> {
    let gallery =
        ContestService::list_gallery(state.db(), &slug, viewer.as_ref(), query.page()).await?;
    Ok(Json(gallery))
}

/// Final results of a completed contest
pub async fn get_results(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<ResultsResponse>> {
    let results = ContestService::get_results(state.db(), &slug).await?;
    Ok(Json(results))
}

/// Contests hosted by the caller
pub async fn list_hosted_contests(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<HostedContestsResponse>> {
    let contests = ContestService::list_hosted(state.db(), &auth_user).await?;
    Ok(Json(contests))
}

/// Create a new contest (as a draft)
pub async fn create_contest(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<CreateContestRequest>,
) -> AppResult<(StatusCode, Json<ContestResponse>)> {
    payload.validate()?;

    let contest = ContestService::create_contest(state.db(), &auth_user, payload).await?;

    Ok((StatusCode::CREATED, Json(contest)))
}

/// Get a managed contest, drafts included
pub async fn get_managed_contest(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ContestResponse>> {
    let contest = ContestService::get_managed(state.db(), &id, &auth_user).await?;
    Ok(Json(contest))
}

/// Update a contest
pub async fn update_contest(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateContestRequest>,
) -> AppResult<Json<ContestResponse>> {
    payload.validate()?;

    let contest = ContestService::update_contest(state.db(), &id, &auth_user, payload).await?;
    Ok(Json(contest))
}

/// Publish a draft contest
pub async fn publish_contest(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ContestResponse>> {
    let contest = ContestService::publish_contest(state.db(), &id, &auth_user).await?;
    Ok(Json(contest))
}

/// Archive a contest
pub async fn archive_contest(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ContestResponse>> {
    let contest = ContestService::archive_contest(state.db(), &id, &auth_user).await?;
    Ok(Json(contest))
}

/// Delete a draft contest
pub async fn delete_contest(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    ContestService::delete_contest(state.db(), &id, &auth_user).await?;
    Ok(StatusCode::NO_CONTENT)
}
