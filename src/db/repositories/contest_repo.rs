//! Contest repository

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{error::AppResult, models::Contest};

/// Fields for a new contest
#[derive(Debug)]
pub struct NewContest<'a> {
    pub slug: &'a str,
    pub title: &'a str,
    pub tagline: Option<&'a str>,
    pub description: Option<&'a str>,
    pub rules: Option<&'a str>,
    pub prize_description: Option<&'a str>,
    pub cover_image_url: Option<&'a str>,
    pub host_id: &'a Uuid,
    pub submission_start: DateTime<Utc>,
    pub submission_end: DateTime<Utc>,
    pub judging_end: DateTime<Utc>,
    pub max_submissions_per_user: i32,
}

/// Partial contest update; `None` keeps the stored value
#[derive(Debug, Default)]
pub struct ContestChanges<'a> {
    pub title: Option<&'a str>,
    pub tagline: Option<&'a str>,
    pub description: Option<&'a str>,
    pub rules: Option<&'a str>,
    pub prize_description: Option<&'a str>,
    pub cover_image_url: Option<&'a str>,
    pub submission_start: Option<DateTime<Utc>>,
    pub submission_end: Option<DateTime<Utc>>,
    pub judging_end: Option<DateTime<Utc>>,
    pub max_submissions_per_user: Option<i32>,
}

/// Repository for contest database operations
pub struct ContestRepository;

impl ContestRepository {
    /// Create a new contest (always as a draft)
    pub async fn create(pool: &PgPool, new: NewContest<'_>) -> AppResult<Contest> {
        let contest = sqlx::query_as::<_, Contest>(
            r#"
            INSERT INTO contests (
                slug, title, tagline, description, rules, prize_description,
                cover_image_url, host_id, status, submission_start, submission_end,
                judging_end, max_submissions_per_user
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'draft', $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(new.slug)
        .bind(new.title)
        .bind(new.tagline)
        .bind(new.description)
        .bind(new.rules)
        .bind(new.prize_description)
        .bind(new.cover_image_url)
        .bind(new.host_id)
        .bind(new.submission_start)
        .bind(new.submission_end)
        .bind(new.judging_end)
        .bind(new.max_submissions_per_user)
        .fetch_one(pool)
        .await?;

        Ok(contest)
    }

    /// Find contest by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Contest>> {
        let contest = sqlx::query_as::<_, Contest>(r#"SELECT * FROM contests WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(contest)
    }

    /// Find contest by slug
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> AppResult<Option<Contest>> {
        let contest = sqlx::query_as::<_, Contest>(r#"SELECT * FROM contests WHERE slug = $1"#)
            .bind(slug)
            .fetch_optional(pool)
            .await?;

        Ok(contest)
    }

    /// Update contest
    pub async fn update(pool: &PgPool, id: &Uuid, changes: ContestChanges<'_>) -> AppResult<Contest> {
        let contest = sqlx::query_as::<_, Contest>(
            r#"
            UPDATE contests
            SET
                title = COALESCE($2, title),
                tagline = COALESCE($3, tagline),
                description = COALESCE($4, description),
                rules = COALESCE($5, rules),
                prize_description = COALESCE($6, prize_description),
                cover_image_url = COALESCE($7, cover_image_url),
                submission_start = COALESCE($8, submission_start),
                submission_end = COALESCE($9, submission_end),
                judging_end = COALESCE($10, judging_end),
                max_submissions_per_user = COALESCE($11, max_submissions_per_user),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.title)
        .bind(changes.tagline)
        .bind(changes.description)
        .bind(changes.rules)
        .bind(changes.prize_description)
        .bind(changes.cover_image_url)
        .bind(changes.submission_start)
        .bind(changes.submission_end)
        .bind(changes.judging_end)
        .bind(changes.max_submissions_per_user)
        .fetch_one(pool)
        .await?;

        Ok(contest)
    }

    /// Set publication status
    pub async fn set_status(pool: &PgPool, id: &Uuid, status: &str) -> AppResult<Contest> {
        let contest = sqlx::query_as::<_, Contest>(
            r#"
            UPDATE contests
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_one(pool)
        .await?;

        Ok(contest)
    }

    /// Delete contest
    pub async fn delete(pool: &PgPool, id: &Uuid) -> AppResult<()> {
        sqlx::query(r#"DELETE FROM contests WHERE id = $1"#)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// List published contests, optionally filtered by phase and title
    pub async fn list_published(
        pool: &PgPool,
        offset: i64,
        limit: i64,
        phase: Option<&str>,
        search: Option<&str>,
    ) -> AppResult<(Vec<Contest>, i64)> {
        let search_pattern = search.map(|s| format!("%{}%", s));
        let now = Utc::now();

        let filter = r#"
            status = 'published'
            AND ($1::text IS NULL OR title ILIKE $1)
            AND (
                $2::text IS NULL
                OR ($2 = 'upcoming' AND submission_start > $3)
                OR ($2 = 'open' AND submission_start <= $3 AND submission_end > $3)
                OR ($2 = 'judging' AND submission_end <= $3 AND judging_end > $3)
                OR ($2 = 'completed' AND judging_end <= $3)
            )
        "#;

        let contests = sqlx::query_as::<_, Contest>(&format!(
            "SELECT * FROM contests WHERE {} ORDER BY submission_start DESC OFFSET $4 LIMIT $5",
            filter
        ))
        .bind(&search_pattern)
        .bind(phase)
        .bind(now)
        .bind(offset)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        let count: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM contests WHERE {}",
            filter
        ))
        .bind(&search_pattern)
        .bind(phase)
        .bind(now)
        .fetch_one(pool)
        .await?;

        Ok((contests, count))
    }

    /// List every contest a host owns, drafts included
    pub async fn list_by_host(pool: &PgPool, host_id: &Uuid) -> AppResult<Vec<Contest>> {
        let contests = sqlx::query_as::<_, Contest>(
            r#"SELECT * FROM contests WHERE host_id = $1 ORDER BY created_at DESC"#,
        )
        .bind(host_id)
        .fetch_all(pool)
        .await?;

        Ok(contests)
    }

    /// Count approved submissions of a contest
    pub async fn approved_submission_count(pool: &PgPool, contest_id: &Uuid) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM submissions WHERE contest_id = $1 AND status = 'approved'"#,
        )
        .bind(contest_id)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// Count judges on the contest panel
    pub async fn judge_count(pool: &PgPool, contest_id: &Uuid) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM contest_judges WHERE contest_id = $1"#,
        )
        .bind(contest_id)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// Count total contests
    pub async fn count(pool: &PgPool) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM contests"#)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
