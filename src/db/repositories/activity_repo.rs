//! Activity log repository

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    analytics::platform::ActivityRow,
    error::AppResult,
    models::{ActivityLog, NewActivity},
};

/// Repository for activity log operations
pub struct ActivityRepository;

impl ActivityRepository {
    /// Append an entry
    pub async fn insert(pool: &PgPool, entry: &NewActivity) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO activity_logs (user_id, action, entity_type, entity_id, metadata, ip_address)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(entry.user_id)
        .bind(entry.action)
        .bind(entry.entity_type)
        .bind(entry.entity_id)
        .bind(&entry.metadata)
        .bind(&entry.ip_address)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// List entries newest first, with optional filters
    pub async fn list(
        pool: &PgPool,
        offset: i64,
        limit: i64,
        user_id: Option<&Uuid>,
        action: Option<&str>,
        entity_type: Option<&str>,
    ) -> AppResult<(Vec<ActivityLog>, i64)> {
        let logs = sqlx::query_as::<_, ActivityLog>(
            r#"
            SELECT * FROM activity_logs
            WHERE
                ($1::uuid IS NULL OR user_id = $1)
                AND ($2::text IS NULL OR action = $2)
                AND ($3::text IS NULL OR entity_type = $3)
            ORDER BY created_at DESC
            OFFSET $4 LIMIT $5
            "#,
        )
        .bind(user_id)
        .bind(action)
        .bind(entity_type)
        .bind(offset)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM activity_logs
            WHERE
                ($1::uuid IS NULL OR user_id = $1)
                AND ($2::text IS NULL OR action = $2)
                AND ($3::text IS NULL OR entity_type = $3)
            "#,
        )
        .bind(user_id)
        .bind(action)
        .bind(entity_type)
        .fetch_one(pool)
        .await?;

        Ok((logs, count))
    }

    /// Entries created at or after `since`, for analytics
    pub async fn rows_since(pool: &PgPool, since: DateTime<Utc>) -> AppResult<Vec<ActivityRow>> {
        let rows = sqlx::query_as::<_, ActivityRow>(
            r#"SELECT user_id, action, created_at FROM activity_logs WHERE created_at >= $1"#,
        )
        .bind(since)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }
}
