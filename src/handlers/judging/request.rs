//! Judging request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::constants::{MAX_CRITERION_SCORE, MIN_CRITERION_SCORE};

/// Assign a judge to a contest panel
#[derive(Debug, Deserialize, Validate)]
pub struct AssignJudgeRequest {
    #[validate(length(min = 1))]
    pub username: String,
}

/// Score a submission on each criterion
#[derive(Debug, Deserialize, Validate)]
pub struct ScoreRequest {
    #[validate(range(min = MIN_CRITERION_SCORE, max = MAX_CRITERION_SCORE))]
    pub creativity: i16,

    #[validate(range(min = MIN_CRITERION_SCORE, max = MAX_CRITERION_SCORE))]
    pub technique: i16,

    #[validate(range(min = MIN_CRITERION_SCORE, max = MAX_CRITERION_SCORE))]
    pub theme_fit: i16,

    #[validate(length(max = 2000))]
    pub comment: Option<String>,
}
