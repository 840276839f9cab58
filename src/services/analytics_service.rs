//! Analytics service
//!
//! Loads the raw rows for a dashboard and hands them to the pure
//! aggregation routines in [`crate::analytics`].

use chrono::Utc;
use sqlx::PgPool;
use tracing::{debug, error};
use uuid::Uuid;

use crate::{
    analytics::{contest_metrics, platform_metrics, AnalyticsWindow},
    db::repositories::{ActivityRepository, AnalyticsRepository, JudgingRepository, SubmissionRepository},
    error::AppResult,
    handlers::{
        analytics::response::{ContestAnalyticsResponse, PlatformAnalyticsResponse},
        contests::response::ContestSummary,
    },
    middleware::auth::AuthenticatedUser,
    services::ContestService,
};

/// Analytics service for dashboard metrics
pub struct AnalyticsService;

impl AnalyticsService {
    /// Metrics for one contest over the trailing `days`; host or admin only
    pub async fn contest(
        pool: &PgPool,
        contest_id: &Uuid,
        user: &AuthenticatedUser,
        days: i64,
    ) -> AppResult<ContestAnalyticsResponse> {
        let contest = ContestService::load_managed(pool, contest_id, user).await?;
        let window = AnalyticsWindow::last_days(days, Utc::now());

        let (submissions, scores, panel) = futures::try_join!(
            SubmissionRepository::analytics_rows(pool, &contest.id),
            JudgingRepository::score_rows(pool, &contest.id),
            JudgingRepository::panel_ids(pool, &contest.id),
        )
        .inspect_err(|e| error!(contest_id = %contest.id, error = %e, "Failed to load contest analytics rows"))?;

        debug!(
            contest_id = %contest.id,
            submissions = submissions.len(),
            scores = scores.len(),
            judges = panel.len(),
            "Aggregating contest metrics"
        );

        Ok(ContestAnalyticsResponse {
            contest: ContestSummary::from(&contest),
            window: window.into(),
            metrics: contest_metrics(&submissions, &scores, &panel, window),
        })
    }

    /// Platform-wide metrics over the trailing `days`
    pub async fn platform(pool: &PgPool, days: i64) -> AppResult<PlatformAnalyticsResponse> {
        let window = AnalyticsWindow::last_days(days, Utc::now());

        let (users, contests, submission_times, activity) = futures::try_join!(
            AnalyticsRepository::user_rows(pool),
            AnalyticsRepository::contest_rows(pool),
            AnalyticsRepository::submission_times_since(pool, window.start),
            ActivityRepository::rows_since(pool, window.start),
        )
        .inspect_err(|e| error!(error = %e, "Failed to load platform analytics rows"))?;

        debug!(
            users = users.len(),
            contests = contests.len(),
            activity = activity.len(),
            "Aggregating platform metrics"
        );

        Ok(PlatformAnalyticsResponse {
            window: window.into(),
            metrics: platform_metrics(&users, &contests, &submission_times, &activity, window),
        })
    }
}
