//! Submission repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    analytics::contest::SubmissionRow,
    error::AppResult,
    models::Submission,
};

/// Fields for a new submission
#[derive(Debug)]
pub struct NewSubmission<'a> {
    pub contest_id: &'a Uuid,
    pub user_id: &'a Uuid,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub video_url: &'a str,
    pub thumbnail_url: Option<&'a str>,
    pub ai_tools: &'a [String],
}

/// Submission joined with its author, for galleries and review queues
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SubmissionWithAuthor {
    #[sqlx(flatten)]
    pub submission: Submission,
    pub username: String,
    pub display_name: Option<String>,
}

/// Repository for submission database operations
pub struct SubmissionRepository;

impl SubmissionRepository {
    /// Create a new submission in `pending` state
    pub async fn create(pool: &PgPool, new: NewSubmission<'_>) -> AppResult<Submission> {
        let submission = sqlx::query_as::<_, Submission>(
            r#"
            INSERT INTO submissions (
                contest_id, user_id, title, description, video_url, thumbnail_url, ai_tools, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'pending')
            RETURNING *
            "#,
        )
        .bind(new.contest_id)
        .bind(new.user_id)
        .bind(new.title)
        .bind(new.description)
        .bind(new.video_url)
        .bind(new.thumbnail_url)
        .bind(new.ai_tools)
        .fetch_one(pool)
        .await?;

        Ok(submission)
    }

    /// Find submission by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Submission>> {
        let submission =
            sqlx::query_as::<_, Submission>(r#"SELECT * FROM submissions WHERE id = $1"#)
                .bind(id)
                .fetch_optional(pool)
                .await?;

        Ok(submission)
    }

    /// Count a user's entries in a contest that count toward the cap
    pub async fn count_active_for_user(
        pool: &PgPool,
        contest_id: &Uuid,
        user_id: &Uuid,
    ) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM submissions
            WHERE contest_id = $1 AND user_id = $2 AND status <> 'withdrawn'
            "#,
        )
        .bind(contest_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// Count a user's approved entries across all contests
    pub async fn count_approved_for_user(pool: &PgPool, user_id: &Uuid) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM submissions WHERE user_id = $1 AND status = 'approved'"#,
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// List submissions of a user, newest first
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: &Uuid,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Submission>, i64)> {
        let submissions = sqlx::query_as::<_, Submission>(
            r#"
            SELECT * FROM submissions
            WHERE user_id = $1
            ORDER BY submitted_at DESC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(offset)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        let count: i64 =
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM submissions WHERE user_id = $1"#)
                .bind(user_id)
                .fetch_one(pool)
                .await?;

        Ok((submissions, count))
    }

    /// List submissions of a contest with their authors, optionally by status
    pub async fn list_by_contest(
        pool: &PgPool,
        contest_id: &Uuid,
        status: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<SubmissionWithAuthor>, i64)> {
        let submissions = sqlx::query_as::<_, SubmissionWithAuthor>(
            r#"
            SELECT s.*, u.username, u.display_name
            FROM submissions s
            JOIN users u ON u.id = s.user_id
            WHERE s.contest_id = $1 AND ($2::text IS NULL OR s.status = $2)
            ORDER BY s.submitted_at ASC
            OFFSET $3 LIMIT $4
            "#,
        )
        .bind(contest_id)
        .bind(status)
        .bind(offset)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM submissions
            WHERE contest_id = $1 AND ($2::text IS NULL OR status = $2)
            "#,
        )
        .bind(contest_id)
        .bind(status)
        .fetch_one(pool)
        .await?;

        Ok((submissions, count))
    }

    /// Record a moderation decision
    pub async fn review(
        pool: &PgPool,
        id: &Uuid,
        status: &str,
        review_note: Option<&str>,
        reviewed_by: &Uuid,
    ) -> AppResult<Submission> {
        let submission = sqlx::query_as::<_, Submission>(
            r#"
            UPDATE submissions
            SET status = $2, review_note = $3, reviewed_by = $4, reviewed_at = NOW(), updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(review_note)
        .bind(reviewed_by)
        .fetch_one(pool)
        .await?;

        Ok(submission)
    }

    /// Mark a submission as withdrawn by its author
    pub async fn withdraw(pool: &PgPool, id: &Uuid) -> AppResult<Submission> {
        let submission = sqlx::query_as::<_, Submission>(
            r#"
            UPDATE submissions
            SET status = 'withdrawn', updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_one(pool)
        .await?;

        Ok(submission)
    }

    /// Rows feeding contest analytics
    pub async fn analytics_rows(pool: &PgPool, contest_id: &Uuid) -> AppResult<Vec<SubmissionRow>> {
        let rows = sqlx::query_as::<_, SubmissionRow>(
            r#"
            SELECT s.id, s.user_id, u.username, s.title, s.status, s.submitted_at
            FROM submissions s
            JOIN users u ON u.id = s.user_id
            WHERE s.contest_id = $1
            "#,
        )
        .bind(contest_id)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Count total submissions
    pub async fn count(pool: &PgPool) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM submissions"#)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
