//! Contest response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    analytics::contest::LeaderboardEntry,
    db::repositories::SubmissionWithAuthor,
    models::{Contest, ContestPhase, User},
};

/// Public summary of a contest's host
#[derive(Debug, Serialize)]
pub struct HostSummary {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
}

impl From<&User> for HostSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            display_name: user.public_name().to_string(),
        }
    }
}

/// Contest landing page response
#[derive(Debug, Serialize)]
pub struct ContestResponse {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub rules: Option<String>,
    pub prize_description: Option<String>,
    pub cover_image_url: Option<String>,
    pub host: HostSummary,
    pub status: String,
    pub phase: ContestPhase,
    pub submission_start: DateTime<Utc>,
    pub submission_end: DateTime<Utc>,
    pub judging_end: DateTime<Utc>,
    pub max_submissions_per_user: i32,
    pub approved_submissions: i64,
    pub judge_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Contest summary for list views
#[derive(Debug, Serialize)]
pub struct ContestSummary {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub tagline: Option<String>,
    pub cover_image_url: Option<String>,
    pub status: String,
    pub phase: ContestPhase,
    pub submission_start: DateTime<Utc>,
    pub submission_end: DateTime<Utc>,
    pub judging_end: DateTime<Utc>,
}

impl From<&Contest> for ContestSummary {
    fn from(contest: &Contest) -> Self {
        Self {
            id: contest.id,
            slug: contest.slug.clone(),
            title: contest.title.clone(),
            tagline: contest.tagline.clone(),
            cover_image_url: contest.cover_image_url.clone(),
            status: contest.status.clone(),
            phase: contest.phase(),
            submission_start: contest.submission_start,
            submission_end: contest.submission_end,
            judging_end: contest.judging_end,
        }
    }
}

/// Contest list response
#[derive(Debug, Serialize)]
pub struct ContestsListResponse {
    pub contests: Vec<ContestSummary>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

/// Hosted contests response
#[derive(Debug, Serialize)]
pub struct HostedContestsResponse {
    pub contests: Vec<ContestSummary>,
}

/// Author shown next to a public entry
#[derive(Debug, Serialize)]
pub struct AuthorSummary {
    pub user_id: Uuid,
    pub username: String,
    pub display_name: String,
}

/// Approved entry in the public gallery
#[derive(Debug, Serialize)]
pub struct GalleryItem {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    pub ai_tools: Vec<String>,
    pub author: AuthorSummary,
    pub submitted_at: DateTime<Utc>,
}

impl From<SubmissionWithAuthor> for GalleryItem {
    fn from(row: SubmissionWithAuthor) -> Self {
        let display_name = row.display_name.unwrap_or_else(|| row.username.clone());
        let s = row.submission;
        Self {
            id: s.id,
            title: s.title,
            description: s.description,
            video_url: s.video_url,
            thumbnail_url: s.thumbnail_url,
            ai_tools: s.ai_tools,
            author: AuthorSummary {
                user_id: s.user_id,
                username: row.username,
                display_name,
            },
            submitted_at: s.submitted_at,
        }
    }
}

/// Public gallery response
#[derive(Debug, Serialize)]
pub struct GalleryResponse {
    pub contest: ContestSummary,
    pub submissions: Vec<GalleryItem>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

/// Published results of a completed contest
#[derive(Debug, Serialize)]
pub struct ResultsResponse {
    pub contest: ContestSummary,
    pub approved_submissions: u64,
    pub average_score: Option<f64>,
    pub leaderboard: Vec<LeaderboardEntry>,
}
