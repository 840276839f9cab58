//! Contest request DTOs

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::constants::{
    MAX_CONTEST_SLUG_LENGTH, MAX_CONTEST_TITLE_LENGTH, MAX_LONG_TEXT_LENGTH,
    MAX_SUBMISSIONS_PER_USER_LIMIT, MAX_URL_LENGTH,
};

/// Create contest request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateContestRequest {
    /// URL slug for the landing page, e.g. `neon-dreams-2026`
    #[validate(length(min = 1, max = MAX_CONTEST_SLUG_LENGTH))]
    pub slug: String,

    #[validate(length(min = 1, max = MAX_CONTEST_TITLE_LENGTH))]
    pub title: String,

    #[validate(length(max = 300))]
    pub tagline: Option<String>,

    #[validate(length(max = MAX_LONG_TEXT_LENGTH))]
    pub description: Option<String>,

    #[validate(length(max = MAX_LONG_TEXT_LENGTH))]
    pub rules: Option<String>,

    #[validate(length(max = MAX_LONG_TEXT_LENGTH))]
    pub prize_description: Option<String>,

    #[validate(length(max = MAX_URL_LENGTH))]
    pub cover_image_url: Option<String>,

    pub submission_start: DateTime<Utc>,
    pub submission_end: DateTime<Utc>,
    pub judging_end: DateTime<Utc>,

    #[validate(range(min = 1, max = MAX_SUBMISSIONS_PER_USER_LIMIT))]
    pub max_submissions_per_user: Option<i32>,
}

/// Update contest request
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateContestRequest {
    #[validate(length(min = 1, max = MAX_CONTEST_TITLE_LENGTH))]
    pub title: Option<String>,

    #[validate(length(max = 300))]
    pub tagline: Option<String>,

    #[validate(length(max = MAX_LONG_TEXT_LENGTH))]
    pub description: Option<String>,

    #[validate(length(max = MAX_LONG_TEXT_LENGTH))]
    pub rules: Option<String>,

    #[validate(length(max = MAX_LONG_TEXT_LENGTH))]
    pub prize_description: Option<String>,

    #[validate(length(max = MAX_URL_LENGTH))]
    pub cover_image_url: Option<String>,

    pub submission_start: Option<DateTime<Utc>>,
    pub submission_end: Option<DateTime<Utc>>,
    pub judging_end: Option<DateTime<Utc>>,

    #[validate(range(min = 1, max = MAX_SUBMISSIONS_PER_USER_LIMIT))]
    pub max_submissions_per_user: Option<i32>,
}

impl UpdateContestRequest {
    pub fn changes_schedule(&self) -> bool {
        self.submission_start.is_some() || self.submission_end.is_some() || self.judging_end.is_some()
    }
}

/// List contests query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ListContestsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    /// upcoming, open, judging, completed
    pub phase: Option<String>,
    pub search: Option<String>,
}
