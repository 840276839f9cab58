//! Row loaders for platform analytics

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::{
    analytics::platform::{ContestRow, UserRow},
    error::AppResult,
};

/// Repository for platform-wide analytics reads
pub struct AnalyticsRepository;

impl AnalyticsRepository {
    pub async fn user_rows(pool: &PgPool) -> AppResult<Vec<UserRow>> {
        let rows = sqlx::query_as::<_, UserRow>(r#"SELECT role, created_at FROM users"#)
            .fetch_all(pool)
            .await?;

        Ok(rows)
    }

    pub async fn contest_rows(pool: &PgPool) -> AppResult<Vec<ContestRow>> {
        let rows = sqlx::query_as::<_, ContestRow>(
            r#"SELECT status, submission_start, submission_end, judging_end FROM contests"#,
        )
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    pub async fn submission_times_since(
        pool: &PgPool,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<DateTime<Utc>>> {
        let times: Vec<DateTime<Utc>> = sqlx::query_scalar(
            r#"SELECT submitted_at FROM submissions WHERE submitted_at >= $1 AND status <> 'withdrawn'"#,
        )
        .bind(since)
        .fetch_all(pool)
        .await?;

        Ok(times)
    }
}
