//! Judge assignment and score repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    analytics::contest::ScoreRow,
    error::AppResult,
    models::{Contest, ContestJudge, ScoreCard, Score, Submission},
};

/// Panel member joined with the user's public fields
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PanelMember {
    #[sqlx(flatten)]
    pub assignment: ContestJudge,
    pub username: String,
    pub display_name: Option<String>,
}

/// Approved submission paired with the requesting judge's score, if any
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct JudgeQueueItem {
    #[sqlx(flatten)]
    pub submission: Submission,
    pub creativity: Option<i16>,
    pub technique: Option<i16>,
    pub theme_fit: Option<i16>,
    pub comment: Option<String>,
}

/// Repository for judging database operations
pub struct JudgingRepository;

impl JudgingRepository {
    /// Assign a judge to a contest
    pub async fn assign(
        pool: &PgPool,
        contest_id: &Uuid,
        judge_id: &Uuid,
        assigned_by: &Uuid,
    ) -> AppResult<ContestJudge> {
        let assignment = sqlx::query_as::<_, ContestJudge>(
            r#"
            INSERT INTO contest_judges (contest_id, judge_id, assigned_by)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(contest_id)
        .bind(judge_id)
        .bind(assigned_by)
        .fetch_one(pool)
        .await?;

        Ok(assignment)
    }

    /// Remove a judge from a contest; returns whether an assignment existed
    pub async fn unassign(pool: &PgPool, contest_id: &Uuid, judge_id: &Uuid) -> AppResult<bool> {
        let result =
            sqlx::query(r#"DELETE FROM contest_judges WHERE contest_id = $1 AND judge_id = $2"#)
                .bind(contest_id)
                .bind(judge_id)
                .execute(pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Check if a judge sits on a contest's panel
    pub async fn is_assigned(pool: &PgPool, contest_id: &Uuid, judge_id: &Uuid) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"SELECT EXISTS(SELECT 1 FROM contest_judges WHERE contest_id = $1 AND judge_id = $2)"#,
        )
        .bind(contest_id)
        .bind(judge_id)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    /// List a contest's panel
    pub async fn list_panel(pool: &PgPool, contest_id: &Uuid) -> AppResult<Vec<PanelMember>> {
        let members = sqlx::query_as::<_, PanelMember>(
            r#"
            SELECT cj.*, u.username, u.display_name
            FROM contest_judges cj
            JOIN users u ON u.id = cj.judge_id
            WHERE cj.contest_id = $1
            ORDER BY cj.assigned_at ASC
            "#,
        )
        .bind(contest_id)
        .fetch_all(pool)
        .await?;

        Ok(members)
    }

    /// IDs of the current panel
    pub async fn panel_ids(pool: &PgPool, contest_id: &Uuid) -> AppResult<Vec<Uuid>> {
        let ids: Vec<Uuid> =
            sqlx::query_scalar(r#"SELECT judge_id FROM contest_judges WHERE contest_id = $1"#)
                .bind(contest_id)
                .fetch_all(pool)
                .await?;

        Ok(ids)
    }

    /// Contests a judge is assigned to
    pub async fn contests_for_judge(pool: &PgPool, judge_id: &Uuid) -> AppResult<Vec<Contest>> {
        let contests = sqlx::query_as::<_, Contest>(
            r#"
            SELECT c.*
            FROM contests c
            JOIN contest_judges cj ON cj.contest_id = c.id
            WHERE cj.judge_id = $1 AND c.status <> 'draft'
            ORDER BY c.judging_end DESC
            "#,
        )
        .bind(judge_id)
        .fetch_all(pool)
        .await?;

        Ok(contests)
    }

    /// Approved submissions of a contest with the judge's own score
    pub async fn judge_queue(
        pool: &PgPool,
        contest_id: &Uuid,
        judge_id: &Uuid,
    ) -> AppResult<Vec<JudgeQueueItem>> {
        let items = sqlx::query_as::<_, JudgeQueueItem>(
            r#"
            SELECT s.*, sc.creativity, sc.technique, sc.theme_fit, sc.comment
            FROM submissions s
            LEFT JOIN scores sc ON sc.submission_id = s.id AND sc.judge_id = $2
            WHERE s.contest_id = $1 AND s.status = 'approved'
            ORDER BY s.submitted_at ASC
            "#,
        )
        .bind(contest_id)
        .bind(judge_id)
        .fetch_all(pool)
        .await?;

        Ok(items)
    }

    /// Insert or replace a judge's score for a submission
    pub async fn upsert_score(
        pool: &PgPool,
        submission_id: &Uuid,
        judge_id: &Uuid,
        card: ScoreCard,
        comment: Option<&str>,
    ) -> AppResult<Score> {
        let score = sqlx::query_as::<_, Score>(
            r#"
            INSERT INTO scores (submission_id, judge_id, creativity, technique, theme_fit, comment)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (submission_id, judge_id) DO UPDATE
            SET
                creativity = EXCLUDED.creativity,
                technique = EXCLUDED.technique,
                theme_fit = EXCLUDED.theme_fit,
                comment = EXCLUDED.comment,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(submission_id)
        .bind(judge_id)
        .bind(card.creativity)
        .bind(card.technique)
        .bind(card.theme_fit)
        .bind(comment)
        .fetch_one(pool)
        .await?;

        Ok(score)
    }

    /// Score totals for every submission in a contest
    pub async fn score_rows(pool: &PgPool, contest_id: &Uuid) -> AppResult<Vec<ScoreRow>> {
        let rows = sqlx::query_as::<_, ScoreRow>(
            r#"
            SELECT sc.submission_id, sc.judge_id,
                   (sc.creativity + sc.technique + sc.theme_fit) AS total
            FROM scores sc
            JOIN submissions s ON s.id = sc.submission_id
            WHERE s.contest_id = $1
            "#,
        )
        .bind(contest_id)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }
}
