//! Judging handler implementations

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    middleware::auth::AuthenticatedUser,
    services::JudgingService,
    state::AppState,
};

use super::{
    request::{AssignJudgeRequest, ScoreRequest},
    response::{AssignedContestsResponse, JudgeQueueResponse, PanelResponse, ScoreResponse},
};

/// List a contest's judges
pub async fn list_panel(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(contest_id): Path<Uuid>,
) -> AppResult<Json<PanelResponse>> {
    let panel = JudgingService::list_panel(state.db(), &contest_id, &user).await?;
    Ok(Json(panel))
}

/// Assign a judge
pub async fn assign_judge(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(contest_id): Path<Uuid>,
    Json(payload): Json<AssignJudgeRequest>,
) -> AppResult<(StatusCode, Json<PanelResponse>)> {
    payload.validate()?;

    let panel = JudgingService::assign_judge(state.db(), &contest_id, &user, &payload.username).await?;
    Ok((StatusCode::CREATED, Json(panel)))
}

/// Remove a judge
pub async fn unassign_judge(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path((contest_id, judge_id)): Path<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    JudgingService::unassign_judge(state.db(), &contest_id, &judge_id, &user).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Contests the caller judges
pub async fn list_assigned_contests(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<Json<AssignedContestsResponse>> {
    let contests = JudgingService::list_assigned(state.db(), &user).await?;
    Ok(Json(contests))
}

/// The caller's scoring queue for a contest
pub async fn get_judge_queue(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(contest_id): Path<Uuid>,
) -> AppResult<Json<JudgeQueueResponse>> {
    let queue = JudgingService::get_queue(state.db(), &contest_id, &user).await?;
    Ok(Json(queue))
}

/// Score an entry
pub async fn upsert_score(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(submission_id): Path<Uuid>,
    Json(payload): Json<ScoreRequest>,
) -> AppResult<Json<ScoreResponse>> {
    payload.validate()?;

    let score = JudgingService::upsert_score(state.db(), &submission_id, &user, payload).await?;
    Ok(Json(score))
}
