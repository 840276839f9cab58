//! Submission request DTOs

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::constants::{MAX_LONG_TEXT_LENGTH, MAX_SUBMISSION_TITLE_LENGTH, MAX_URL_LENGTH};

/// Create submission request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSubmissionRequest {
    pub contest_id: Uuid,

    #[validate(length(min = 1, max = MAX_SUBMISSION_TITLE_LENGTH))]
    pub title: String,

    #[validate(length(max = MAX_LONG_TEXT_LENGTH))]
    pub description: Option<String>,

    /// Link to the video on an external host
    #[validate(length(min = 1, max = MAX_URL_LENGTH))]
    pub video_url: String,

    #[validate(length(max = MAX_URL_LENGTH))]
    pub thumbnail_url: Option<String>,

    /// AI tools used to make the video
    #[serde(default)]
    pub ai_tools: Vec<String>,
}

/// Moderation decision
#[derive(Debug, Deserialize, Validate)]
pub struct ReviewSubmissionRequest {
    /// `approved` or `rejected`
    #[validate(length(min = 1))]
    pub status: String,

    #[validate(length(max = 2000))]
    pub note: Option<String>,
}

/// Contest submissions query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ContestSubmissionsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub status: Option<String>,
}
