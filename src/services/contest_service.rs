//! Contest service

use chrono::Utc;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::{
    analytics::{contest_metrics, AnalyticsWindow},
    constants::{actions, entity_types, submission_statuses, DEFAULT_MAX_SUBMISSIONS_PER_USER},
    db::repositories::{
        ContestChanges, ContestRepository, JudgingRepository, NewContest, SubmissionRepository,
        UserRepository,
    },
    error::{AppError, AppResult},
    handlers::contests::{
        request::{CreateContestRequest, UpdateContestRequest},
        response::{
            ContestResponse, ContestSummary, ContestsListResponse, GalleryItem, GalleryResponse,
            HostSummary, HostedContestsResponse, ResultsResponse,
        },
    },
    middleware::auth::AuthenticatedUser,
    models::{
        validate_schedule, Contest, ContestPhase, ContestStatus, NewActivity, SubmissionStatus,
    },
    services::ActivityService,
    utils::{validate_media_url, validate_slug, Page},
};

/// Contest service for business logic
pub struct ContestService;

impl ContestService {
    /// List published contests
    pub async fn list_public(
        pool: &PgPool,
        page: Page,
        phase: Option<ContestPhase>,
        search: Option<&str>,
    ) -> AppResult<ContestsListResponse> {
        if matches!(phase, Some(ContestPhase::Draft | ContestPhase::Archived)) {
            return Err(AppError::Validation(
                "Phase filter must be one of upcoming, open, judging, completed".to_string(),
            ));
        }

        let (contests, total) = ContestRepository::list_published(
            pool,
            page.offset(),
            page.limit(),
            phase.as_ref().map(ContestPhase::as_str),
            search,
        )
        .await?;

        Ok(ContestsListResponse {
            contests: contests.iter().map(ContestSummary::from).collect(),
            total,
            page: page.page,
            per_page: page.per_page,
        })
    }

    /// Landing page data for a contest
    pub async fn get_landing(
        pool: &PgPool,
        slug: &str,
        viewer: Option<&AuthenticatedUser>,
    ) -> AppResult<ContestResponse> {
        let contest = Self::load_visible(pool, slug, viewer).await?;
        Self::to_contest_response(pool, contest).await
    }

    /// Approved entries of a contest, oldest first
    pub async fn list_gallery(
        pool: &PgPool,
        slug: &str,
        viewer: Option<&AuthenticatedUser>,
        page: Page,
    ) -> AppResult<GalleryResponse> {
        let contest = Self::load_visible(pool, slug, viewer).await?;

        let (rows, total) = SubmissionRepository::list_by_contest(
            pool,
            &contest.id,
            Some(submission_statuses::APPROVED),
            page.offset(),
            page.limit(),
        )
        .await?;

        Ok(GalleryResponse {
            contest: ContestSummary::from(&contest),
            submissions: rows.into_iter().map(GalleryItem::from).collect(),
            total,
            page: page.page,
            per_page: page.per_page,
        })
    }

    /// Final leaderboard, available once judging has ended
    pub async fn get_results(pool: &PgPool, slug: &str) -> AppResult<ResultsResponse> {
        let contest = ContestRepository::find_by_slug(pool, slug)
            .await?
            .filter(|c| c.status() != ContestStatus::Draft)
            .ok_or_else(|| AppError::NotFound("Contest not found".to_string()))?;

        let now = Utc::now();
        let finished = matches!(contest.phase_at(now), ContestPhase::Completed)
            || (contest.status() == ContestStatus::Archived && now >= contest.judging_end);
        if !finished {
            return Err(AppError::Conflict(
                "Results are published once judging has ended".to_string(),
            ));
        }

        let submissions = SubmissionRepository::analytics_rows(pool, &contest.id).await?;
        let scores = JudgingRepository::score_rows(pool, &contest.id).await?;
        let panel = JudgingRepository::panel_ids(pool, &contest.id).await?;

        let metrics = contest_metrics(
            &submissions,
            &scores,
            &panel,
            AnalyticsWindow::last_days(1, now),
        );
        let approved = metrics
            .status_breakdown
            .iter()
            .find(|s| s.status == SubmissionStatus::Approved)
            .map(|s| s.count)
            .unwrap_or(0);

        Ok(ResultsResponse {
            contest: ContestSummary::from(&contest),
            approved_submissions: approved,
            average_score: metrics.average_score,
            leaderboard: metrics.leaderboard,
        })
    }

    /// Contests hosted by the caller
    pub async fn list_hosted(pool: &PgPool, host: &AuthenticatedUser) -> AppResult<HostedContestsResponse> {
        let contests = ContestRepository::list_by_host(pool, &host.id).await?;
        Ok(HostedContestsResponse {
            contests: contests.iter().map(ContestSummary::from).collect(),
        })
    }

    /// Contest detail for its host (drafts included)
    pub async fn get_managed(
        pool: &PgPool,
        id: &Uuid,
        user: &AuthenticatedUser,
    ) -> AppResult<ContestResponse> {
        let contest = Self::load_managed(pool, id, user).await?;
        Self::to_contest_response(pool, contest).await
    }

    /// Create a new contest as a draft
    pub async fn create_contest(
        pool: &PgPool,
        host: &AuthenticatedUser,
        payload: CreateContestRequest,
    ) -> AppResult<ContestResponse> {
        validate_slug(&payload.slug).map_err(|e| AppError::Validation(e.to_string()))?;
        validate_schedule(payload.submission_start, payload.submission_end, payload.judging_end)
            .map_err(|e| AppError::Validation(e.to_string()))?;
        if let Some(url) = payload.cover_image_url.as_deref() {
            validate_media_url(url).map_err(|e| AppError::Validation(e.to_string()))?;
        }

        if ContestRepository::find_by_slug(pool, &payload.slug).await?.is_some() {
            return Err(AppError::AlreadyExists("Slug already in use".to_string()));
        }

        let contest = ContestRepository::create(
            pool,
            NewContest {
                slug: &payload.slug,
                title: payload.title.trim(),
                tagline: payload.tagline.as_deref(),
                description: payload.description.as_deref(),
                rules: payload.rules.as_deref(),
                prize_description: payload.prize_description.as_deref(),
                cover_image_url: payload.cover_image_url.as_deref(),
                host_id: &host.id,
                submission_start: payload.submission_start,
                submission_end: payload.submission_end,
                judging_end: payload.judging_end,
                max_submissions_per_user: payload
                    .max_submissions_per_user
                    .unwrap_or(DEFAULT_MAX_SUBMISSIONS_PER_USER),
            },
        )
        .await?;

        info!(contest_id = %contest.id, host_id = %host.id, slug = %contest.slug, "Contest created");
        ActivityService::record(
            pool,
            NewActivity::new(Some(host.id), actions::CONTEST_CREATE)
                .entity(entity_types::CONTEST, contest.id)
                .metadata(serde_json::json!({ "slug": contest.slug })),
        )
        .await;

        Self::to_contest_response(pool, contest).await
    }

    /// Update contest details.
    ///
    /// Archived contests are frozen; the schedule can change only until
    /// submissions open.
    pub async fn update_contest(
        pool: &PgPool,
        id: &Uuid,
        user: &AuthenticatedUser,
        payload: UpdateContestRequest,
    ) -> AppResult<ContestResponse> {
        let contest = Self::load_managed(pool, id, user).await?;
        let phase = contest.phase();

        if phase == ContestPhase::Archived {
            return Err(AppError::Conflict("Archived contests cannot be edited".to_string()));
        }
        if payload.changes_schedule() && !matches!(phase, ContestPhase::Draft | ContestPhase::Upcoming) {
            return Err(AppError::Conflict(
                "Schedule cannot change after submissions have opened".to_string(),
            ));
        }

        validate_schedule(
            payload.submission_start.unwrap_or(contest.submission_start),
            payload.submission_end.unwrap_or(contest.submission_end),
            payload.judging_end.unwrap_or(contest.judging_end),
        )
        .map_err(|e| AppError::Validation(e.to_string()))?;

        if let Some(url) = payload.cover_image_url.as_deref() {
            validate_media_url(url).map_err(|e| AppError::Validation(e.to_string()))?;
        }

        let updated = ContestRepository::update(
            pool,
            id,
            ContestChanges {
                title: payload.title.as_deref().map(str::trim),
                tagline: payload.tagline.as_deref(),
                description: payload.description.as_deref(),
                rules: payload.rules.as_deref(),
                prize_description: payload.prize_description.as_deref(),
                cover_image_url: payload.cover_image_url.as_deref(),
                submission_start: payload.submission_start,
                submission_end: payload.submission_end,
                judging_end: payload.judging_end,
                max_submissions_per_user: payload.max_submissions_per_user,
            },
        )
        .await?;

        ActivityService::record(
            pool,
            NewActivity::new(Some(user.id), actions::CONTEST_UPDATE)
                .entity(entity_types::CONTEST, updated.id),
        )
        .await;

        Self::to_contest_response(pool, updated).await
    }

    /// Publish a draft
    pub async fn publish_contest(
        pool: &PgPool,
        id: &Uuid,
        user: &AuthenticatedUser,
    ) -> AppResult<ContestResponse> {
        let contest = Self::load_managed(pool, id, user).await?;

        if contest.status() != ContestStatus::Draft {
            return Err(AppError::Conflict("Only draft contests can be published".to_string()));
        }
        if contest.judging_end <= Utc::now() {
            return Err(AppError::Conflict(
                "Contest schedule has already ended".to_string(),
            ));
        }

        let published = ContestRepository::set_status(pool, id, ContestStatus::Published.as_str()).await?;

        info!(contest_id = %id, "Contest published");
        ActivityService::record(
            pool,
            NewActivity::new(Some(user.id), actions::CONTEST_PUBLISH)
                .entity(entity_types::CONTEST, *id),
        )
        .await;

        Self::to_contest_response(pool, published).await
    }

    /// Archive a contest, hiding it from listings
    pub async fn archive_contest(
        pool: &PgPool,
        id: &Uuid,
        user: &AuthenticatedUser,
    ) -> AppResult<ContestResponse> {
        let contest = Self::load_managed(pool, id, user).await?;

        if contest.status() == ContestStatus::Archived {
            return Err(AppError::Conflict("Contest is already archived".to_string()));
        }

        let archived = ContestRepository::set_status(pool, id, ContestStatus::Archived.as_str()).await?;

        info!(contest_id = %id, "Contest archived");
        ActivityService::record(
            pool,
            NewActivity::new(Some(user.id), actions::CONTEST_ARCHIVE)
                .entity(entity_types::CONTEST, *id),
        )
        .await;

        Self::to_contest_response(pool, archived).await
    }

    /// Delete a draft contest
    pub async fn delete_contest(pool: &PgPool, id: &Uuid, user: &AuthenticatedUser) -> AppResult<()> {
        let contest = Self::load_managed(pool, id, user).await?;

        if contest.status() != ContestStatus::Draft {
            return Err(AppError::Conflict(
                "Only draft contests can be deleted; archive it instead".to_string(),
            ));
        }

        ContestRepository::delete(pool, id).await?;

        info!(contest_id = %id, "Contest deleted");
        ActivityService::record(
            pool,
            NewActivity::new(Some(user.id), actions::CONTEST_DELETE)
                .entity(entity_types::CONTEST, *id)
                .metadata(serde_json::json!({ "slug": contest.slug })),
        )
        .await;

        Ok(())
    }

    /// Load a contest the caller may manage: its host, or any admin
    pub async fn load_managed(pool: &PgPool, id: &Uuid, user: &AuthenticatedUser) -> AppResult<Contest> {
        let contest = ContestRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Contest not found".to_string()))?;

        if !contest.is_hosted_by(&user.id) && !user.is_admin() {
            return Err(AppError::Forbidden(
                "Cannot manage other hosts' contests".to_string(),
            ));
        }

        Ok(contest)
    }

    /// Load a contest by slug; drafts are visible only to their host and admins
    async fn load_visible(
        pool: &PgPool,
        slug: &str,
        viewer: Option<&AuthenticatedUser>,
    ) -> AppResult<Contest> {
        let contest = ContestRepository::find_by_slug(pool, slug)
            .await?
            .ok_or_else(|| AppError::NotFound("Contest not found".to_string()))?;

        if contest.status() == ContestStatus::Draft {
            let allowed = viewer
                .map(|v| v.is_admin() || contest.is_hosted_by(&v.id))
                .unwrap_or(false);
            if !allowed {
                return Err(AppError::NotFound("Contest not found".to_string()));
            }
        }

        Ok(contest)
    }

    async fn to_contest_response(pool: &PgPool, contest: Contest) -> AppResult<ContestResponse> {
        let host = UserRepository::find_by_id(pool, &contest.host_id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Contest host missing")))?;
        let approved_submissions = ContestRepository::approved_submission_count(pool, &contest.id).await?;
        let judge_count = ContestRepository::judge_count(pool, &contest.id).await?;
        let phase = contest.phase();

        Ok(ContestResponse {
            id: contest.id,
            slug: contest.slug,
            title: contest.title,
            tagline: contest.tagline,
            description: contest.description,
            rules: contest.rules,
            prize_description: contest.prize_description,
            cover_image_url: contest.cover_image_url,
            host: HostSummary::from(&host),
            status: contest.status,
            phase,
            submission_start: contest.submission_start,
            submission_end: contest.submission_end,
            judging_end: contest.judging_end,
            max_submissions_per_user: contest.max_submissions_per_user,
            approved_submissions,
            judge_count,
            created_at: contest.created_at,
            updated_at: contest.updated_at,
        })
    }
}
