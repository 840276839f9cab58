//! Submission response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    db::repositories::SubmissionWithAuthor,
    handlers::contests::response::AuthorSummary,
    models::Submission,
};

/// Submission response
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub id: Uuid,
    pub contest_id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    pub ai_tools: Vec<String>,
    pub status: String,
    pub review_note: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Submission> for SubmissionResponse {
    fn from(s: Submission) -> Self {
        Self {
            id: s.id,
            contest_id: s.contest_id,
            user_id: s.user_id,
            title: s.title,
            description: s.description,
            video_url: s.video_url,
            thumbnail_url: s.thumbnail_url,
            ai_tools: s.ai_tools,
            status: s.status,
            review_note: s.review_note,
            reviewed_at: s.reviewed_at,
            submitted_at: s.submitted_at,
            updated_at: s.updated_at,
        }
    }
}

/// Submission list response
#[derive(Debug, Serialize)]
pub struct SubmissionsListResponse {
    pub submissions: Vec<SubmissionResponse>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

/// Submission with its author, for the host's moderation queue
#[derive(Debug, Serialize)]
pub struct ModerationItem {
    #[serde(flatten)]
    pub submission: SubmissionResponse,
    pub author: AuthorSummary,
}

impl From<SubmissionWithAuthor> for ModerationItem {
    fn from(row: SubmissionWithAuthor) -> Self {
        let display_name = row.display_name.unwrap_or_else(|| row.username.clone());
        Self {
            author: AuthorSummary {
                user_id: row.submission.user_id,
                username: row.username,
                display_name,
            },
            submission: row.submission.into(),
        }
    }
}

/// Moderation queue response
#[derive(Debug, Serialize)]
pub struct ModerationListResponse {
    pub submissions: Vec<ModerationItem>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}
