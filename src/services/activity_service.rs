//! Activity logging service
//!
//! Activity entries are an audit trail, not part of the request's outcome:
//! a failed write is logged and swallowed.

use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::{
    db::repositories::ActivityRepository,
    error::AppResult,
    handlers::admin::response::{ActivityLogResponse, ActivityLogsListResponse},
    models::NewActivity,
    utils::Page,
};

/// Activity service
pub struct ActivityService;

impl ActivityService {
    /// Persist an activity entry; errors are logged, never returned
    pub async fn record(pool: &PgPool, entry: NewActivity) {
        if let Err(e) = ActivityRepository::insert(pool, &entry).await {
            warn!(
                action = entry.action,
                user_id = ?entry.user_id,
                error = %e,
                "Failed to record activity"
            );
        }
    }

    /// List activity logs for the admin console
    pub async fn list(
        pool: &PgPool,
        page: Page,
        user_id: Option<&Uuid>,
        action: Option<&str>,
        entity_type: Option<&str>,
    ) -> AppResult<ActivityLogsListResponse> {
        let (logs, total) = ActivityRepository::list(
            pool,
            page.offset(),
            page.limit(),
            user_id,
            action,
            entity_type,
        )
        .await?;

        Ok(ActivityLogsListResponse {
            logs: logs.into_iter().map(ActivityLogResponse::from).collect(),
            total,
            page: page.page,
            per_page: page.per_page,
        })
    }
}
