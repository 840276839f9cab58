//! Inquiry repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{error::AppResult, models::Inquiry};

/// Repository for contact-form inquiries
pub struct InquiryRepository;

impl InquiryRepository {
    /// Store a new open inquiry
    pub async fn create(
        pool: &PgPool,
        name: &str,
        email: &str,
        subject: &str,
        message: &str,
    ) -> AppResult<Inquiry> {
        let inquiry = sqlx::query_as::<_, Inquiry>(
            r#"
            INSERT INTO inquiries (name, email, subject, message, status)
            VALUES ($1, $2, $3, $4, 'open')
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(subject)
        .bind(message)
        .fetch_one(pool)
        .await?;

        Ok(inquiry)
    }

    /// Find inquiry by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Inquiry>> {
        let inquiry = sqlx::query_as::<_, Inquiry>(r#"SELECT * FROM inquiries WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(inquiry)
    }

    /// List inquiries, optionally by status
    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Inquiry>, i64)> {
        let inquiries = sqlx::query_as::<_, Inquiry>(
            r#"
            SELECT * FROM inquiries
            WHERE ($1::text IS NULL OR status = $1)
            ORDER BY created_at DESC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(status)
        .bind(offset)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        let count: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM inquiries WHERE ($1::text IS NULL OR status = $1)"#,
        )
        .bind(status)
        .fetch_one(pool)
        .await?;

        Ok((inquiries, count))
    }

    /// Mark an inquiry as resolved
    pub async fn resolve(pool: &PgPool, id: &Uuid, resolved_by: &Uuid) -> AppResult<Inquiry> {
        let inquiry = sqlx::query_as::<_, Inquiry>(
            r#"
            UPDATE inquiries
            SET status = 'resolved', resolved_by = $2, resolved_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(resolved_by)
        .fetch_one(pool)
        .await?;

        Ok(inquiry)
    }
}
