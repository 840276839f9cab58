//! Submission handler implementations

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::AuthenticatedUser,
    models::SubmissionStatus,
    services::SubmissionService,
    state::AppState,
    utils::{Page, PageQuery},
};

use super::{
    request::{ContestSubmissionsQuery, CreateSubmissionRequest, ReviewSubmissionRequest},
    response::{ModerationListResponse, SubmissionResponse, SubmissionsListResponse},
};

/// Submit an entry
pub async fn create_submission(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateSubmissionRequest>,
) -> AppResult<(StatusCode, Json<SubmissionResponse>)> {
    payload.validate()?;

    let submission = SubmissionService::create_submission(state.db(), &user, payload).await?;
    Ok((StatusCode::CREATED, Json(submission)))
}

/// List the caller's submissions
pub async fn list_my_submissions(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<SubmissionsListResponse>> {
    let submissions = SubmissionService::list_own(state.db(), &user, query.page()).await?;
    Ok(Json(submissions))
}

/// Get one of the caller's submissions
pub async fn get_submission(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SubmissionResponse>> {
    let submission = SubmissionService::get_own(state.db(), &id, &user).await?;
    Ok(Json(submission))
}

/// Withdraw one of the caller's submissions
pub async fn withdraw_submission(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SubmissionResponse>> {
    let submission = SubmissionService::withdraw(state.db(), &id, &user).await?;
    Ok(Json(submission))
}

/// Moderation queue of a hosted contest
pub async fn list_contest_submissions(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(contest_id): Path<Uuid>,
    Query(query): Query<ContestSubmissionsQuery>,
) -> AppResult<Json<ModerationListResponse>> {
    let status = match query.status.as_deref() {
        Some(raw) => Some(
            SubmissionStatus::from_str(raw)
                .ok_or_else(|| AppError::Validation(format!("Unknown status '{}'", raw)))?,
        ),
        None => None,
    };

    let submissions = SubmissionService::list_for_contest(
        state.db(),
        &contest_id,
        &user,
        status,
        Page::new(query.page, query.per_page),
    )
    .await?;

    Ok(Json(submissions))
}

/// Approve or reject a submission
pub async fn review_submission(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReviewSubmissionRequest>,
) -> AppResult<Json<SubmissionResponse>> {
    payload.validate()?;

    let submission = SubmissionService::review(state.db(), &id, &user, payload).await?;
    Ok(Json(submission))
}
