//! Submission service

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::{
    constants::{actions, entity_types},
    db::repositories::{ContestRepository, JudgingRepository, NewSubmission, SubmissionRepository},
    error::{AppError, AppResult},
    handlers::submissions::{
        request::{CreateSubmissionRequest, ReviewSubmissionRequest},
        response::{
            ModerationItem, ModerationListResponse, SubmissionResponse, SubmissionsListResponse,
        },
    },
    middleware::auth::AuthenticatedUser,
    models::{Contest, ContestPhase, NewActivity, Submission, SubmissionStatus},
    services::{ActivityService, ContestService},
    utils::{normalize_ai_tools, sanitize_string, validate_media_url, Page},
};

/// Submission service for business logic
pub struct SubmissionService;

impl SubmissionService {
    /// Submit an entry to an open contest
    pub async fn create_submission(
        pool: &PgPool,
        user: &AuthenticatedUser,
        payload: CreateSubmissionRequest,
    ) -> AppResult<SubmissionResponse> {
        validate_media_url(&payload.video_url).map_err(|e| AppError::Validation(e.to_string()))?;
        if let Some(url) = payload.thumbnail_url.as_deref() {
            validate_media_url(url).map_err(|e| AppError::Validation(e.to_string()))?;
        }
        let ai_tools =
            normalize_ai_tools(&payload.ai_tools).map_err(|e| AppError::Validation(e.to_string()))?;

        let title = sanitize_string(&payload.title);
        if title.is_empty() {
            return Err(AppError::Validation("Title is required".to_string()));
        }
        let description = payload
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty());

        // Unpublished contests look the same as missing ones to participants
        let contest = ContestRepository::find_by_id(pool, &payload.contest_id)
            .await?
            .filter(|c| c.is_public())
            .ok_or_else(|| AppError::NotFound("Contest not found".to_string()))?;

        let on_panel = JudgingRepository::is_assigned(pool, &contest.id, &user.id).await?;
        let active = SubmissionRepository::count_active_for_user(pool, &contest.id, &user.id).await?;
        ensure_can_enter(&contest, &user.id, on_panel, active, Utc::now())?;

        let submission = SubmissionRepository::create(
            pool,
            NewSubmission {
                contest_id: &contest.id,
                user_id: &user.id,
                title: &title,
                description,
                video_url: payload.video_url.trim(),
                thumbnail_url: payload.thumbnail_url.as_deref().map(str::trim),
                ai_tools: &ai_tools,
            },
        )
        .await?;

        info!(
            submission_id = %submission.id,
            contest_id = %contest.id,
            user_id = %user.id,
            "Submission created"
        );
        ActivityService::record(
            pool,
            NewActivity::new(Some(user.id), actions::SUBMISSION_CREATE)
                .entity(entity_types::SUBMISSION, submission.id)
                .metadata(serde_json::json!({ "contest_id": contest.id })),
        )
        .await;

        Ok(submission.into())
    }

    /// The caller's own submissions, newest first
    pub async fn list_own(
        pool: &PgPool,
        user: &AuthenticatedUser,
        page: Page,
    ) -> AppResult<SubmissionsListResponse> {
        let (submissions, total) =
            SubmissionRepository::list_by_user(pool, &user.id, page.offset(), page.limit()).await?;

        Ok(SubmissionsListResponse {
            submissions: submissions.into_iter().map(SubmissionResponse::from).collect(),
            total,
            page: page.page,
            per_page: page.per_page,
        })
    }

    /// Get a submission owned by the caller (admins may read any)
    pub async fn get_own(
        pool: &PgPool,
        id: &Uuid,
        user: &AuthenticatedUser,
    ) -> AppResult<SubmissionResponse> {
        let submission = Self::load_owned(pool, id, user).await?;
        Ok(submission.into())
    }

    /// Withdraw a pending or approved entry while submissions are open
    pub async fn withdraw(
        pool: &PgPool,
        id: &Uuid,
        user: &AuthenticatedUser,
    ) -> AppResult<SubmissionResponse> {
        let submission = Self::load_owned(pool, id, user).await?;
        if submission.user_id != user.id {
            return Err(AppError::Forbidden(
                "Only the author can withdraw a submission".to_string(),
            ));
        }

        if !submission.status().can_withdraw() {
            return Err(AppError::Conflict(format!(
                "A {} submission cannot be withdrawn",
                submission.status
            )));
        }

        let contest = ContestRepository::find_by_id(pool, &submission.contest_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Contest not found".to_string()))?;
        if !contest.phase().accepts_entries() {
            return Err(AppError::Conflict(
                "Submissions can only be withdrawn while the contest is open".to_string(),
            ));
        }

        let withdrawn = SubmissionRepository::withdraw(pool, id).await?;

        info!(submission_id = %id, user_id = %user.id, "Submission withdrawn");
        ActivityService::record(
            pool,
            NewActivity::new(Some(user.id), actions::SUBMISSION_WITHDRAW)
                .entity(entity_types::SUBMISSION, *id),
        )
        .await;

        Ok(withdrawn.into())
    }

    /// A contest's submissions for moderation
    pub async fn list_for_contest(
        pool: &PgPool,
        contest_id: &Uuid,
        user: &AuthenticatedUser,
        status: Option<SubmissionStatus>,
        page: Page,
    ) -> AppResult<ModerationListResponse> {
        let contest = ContestService::load_managed(pool, contest_id, user).await?;

        let (rows, total) = SubmissionRepository::list_by_contest(
            pool,
            &contest.id,
            status.as_ref().map(SubmissionStatus::as_str),
            page.offset(),
            page.limit(),
        )
        .await?;

        Ok(ModerationListResponse {
            submissions: rows.into_iter().map(ModerationItem::from).collect(),
            total,
            page: page.page,
            per_page: page.per_page,
        })
    }

    /// Approve or reject a submission.
    ///
    /// Decisions are accepted until judging ends; withdrawn entries are final.
    pub async fn review(
        pool: &PgPool,
        id: &Uuid,
        reviewer: &AuthenticatedUser,
        payload: ReviewSubmissionRequest,
    ) -> AppResult<SubmissionResponse> {
        let target = match SubmissionStatus::from_str(payload.status.trim()) {
            Some(s @ (SubmissionStatus::Approved | SubmissionStatus::Rejected)) => s,
            _ => {
                return Err(AppError::Validation(
                    "Review status must be approved or rejected".to_string(),
                ))
            }
        };

        let submission = SubmissionRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Submission not found".to_string()))?;
        let contest = ContestService::load_managed(pool, &submission.contest_id, reviewer).await?;

        if !matches!(contest.phase(), ContestPhase::Open | ContestPhase::Judging) {
            return Err(AppError::Conflict(
                "Submissions can only be reviewed while the contest is running".to_string(),
            ));
        }

        let current = submission.status();
        if !current.can_review_to(target) {
            return Err(AppError::Conflict(format!(
                "Cannot move a {} submission to {}",
                current, target
            )));
        }

        let note = payload
            .note
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty());
        let reviewed = SubmissionRepository::review(pool, id, target.as_str(), note, &reviewer.id).await?;

        info!(
            submission_id = %id,
            reviewer_id = %reviewer.id,
            from = %current,
            to = %target,
            "Submission reviewed"
        );
        ActivityService::record(
            pool,
            NewActivity::new(Some(reviewer.id), actions::SUBMISSION_REVIEW)
                .entity(entity_types::SUBMISSION, *id)
                .metadata(serde_json::json!({ "from": current, "to": target })),
        )
        .await;

        Ok(reviewed.into())
    }

    /// Load a submission the caller authored; other users' entries read as missing
    async fn load_owned(pool: &PgPool, id: &Uuid, user: &AuthenticatedUser) -> AppResult<Submission> {
        SubmissionRepository::find_by_id(pool, id)
            .await?
            .filter(|s| s.user_id == user.id || user.is_admin())
            .ok_or_else(|| AppError::NotFound("Submission not found".to_string()))
    }
}

/// Entry rules for a participant with `active` non-withdrawn entries at `now`
fn ensure_can_enter(
    contest: &Contest,
    user_id: &Uuid,
    on_panel: bool,
    active: i64,
    now: DateTime<Utc>,
) -> AppResult<()> {
    if !contest.phase_at(now).accepts_entries() {
        return Err(AppError::Conflict(
            "Contest is not accepting submissions".to_string(),
        ));
    }
    if contest.is_hosted_by(user_id) {
        return Err(AppError::Forbidden(
            "Hosts cannot enter their own contest".to_string(),
        ));
    }
    if on_panel {
        return Err(AppError::Forbidden(
            "Judges cannot enter a contest they judge".to_string(),
        ));
    }
    if active >= i64::from(contest.max_submissions_per_user) {
        return Err(AppError::Conflict(format!(
            "Submission limit of {} reached for this contest",
            contest.max_submissions_per_user
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn open_contest() -> Contest {
        let start = Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).unwrap();
        Contest {
            id: Uuid::new_v4(),
            slug: "synthetic-seasons".to_string(),
            title: "Synthetic Seasons".to_string(),
            tagline: None,
            description: None,
            rules: None,
            prize_description: None,
            cover_image_url: None,
            host_id: Uuid::new_v4(),
            status: "published".to_string(),
            submission_start: start,
            submission_end: start + Duration::days(10),
            judging_end: start + Duration::days(17),
            max_submissions_per_user: 2,
            created_at: start,
            updated_at: start,
        }
    }

    fn during_submissions(contest: &Contest) -> DateTime<Utc> {
        contest.submission_start + Duration::days(1)
    }

    #[test]
    fn test_entry_allowed_below_cap() {
        let contest = open_contest();
        let now = during_submissions(&contest);

        assert!(ensure_can_enter(&contest, &Uuid::new_v4(), false, 0, now).is_ok());
        assert!(ensure_can_enter(&contest, &Uuid::new_v4(), false, 1, now).is_ok());
    }

    #[test]
    fn test_entry_cap_enforced() {
        let contest = open_contest();
        let now = during_submissions(&contest);

        let err = ensure_can_enter(&contest, &Uuid::new_v4(), false, 2, now);
        assert!(matches!(err, Err(AppError::Conflict(msg)) if msg.contains("limit of 2")));
    }

    #[test]
    fn test_entry_only_while_open() {
        let contest = open_contest();
        let user = Uuid::new_v4();

        let before = contest.submission_start - Duration::seconds(1);
        let judging = contest.submission_end;
        assert!(matches!(
            ensure_can_enter(&contest, &user, false, 0, before),
            Err(AppError::Conflict(_))
        ));
        assert!(matches!(
            ensure_can_enter(&contest, &user, false, 0, judging),
            Err(AppError::Conflict(_))
        ));

        let mut draft = open_contest();
        draft.status = "draft".to_string();
        assert!(matches!(
            ensure_can_enter(&draft, &user, false, 0, during_submissions(&draft)),
            Err(AppError::Conflict(_))
        ));
    }

    #[test]
    fn test_host_and_panel_cannot_enter() {
        let contest = open_contest();
        let now = during_submissions(&contest);

        assert!(matches!(
            ensure_can_enter(&contest, &contest.host_id, false, 0, now),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            ensure_can_enter(&contest, &Uuid::new_v4(), true, 0, now),
            Err(AppError::Forbidden(_))
        ));
    }
}
