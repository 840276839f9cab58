//! Judge assignment and score models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::constants::{MAX_CRITERION_SCORE, MIN_CRITERION_SCORE};

/// A judge assigned to a contest panel
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ContestJudge {
    pub id: Uuid,
    pub contest_id: Uuid,
    pub judge_id: Uuid,
    pub assigned_by: Uuid,
    pub assigned_at: DateTime<Utc>,
}

/// A judge's score for one submission
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Score {
    pub id: Uuid,
    pub submission_id: Uuid,
    pub judge_id: Uuid,
    pub creativity: i16,
    pub technique: i16,
    pub theme_fit: i16,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Score {
    /// Sum of all criteria
    pub fn total(&self) -> i16 {
        self.creativity + self.technique + self.theme_fit
    }
}

/// Validated set of criterion values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreCard {
    pub creativity: i16,
    pub technique: i16,
    pub theme_fit: i16,
}

impl ScoreCard {
    pub fn new(creativity: i16, technique: i16, theme_fit: i16) -> Result<Self, String> {
        for (name, value) in [
            ("creativity", creativity),
            ("technique", technique),
            ("theme_fit", theme_fit),
        ] {
            if !(MIN_CRITERION_SCORE..=MAX_CRITERION_SCORE).contains(&value) {
                return Err(format!(
                    "{} must be between {} and {}",
                    name, MIN_CRITERION_SCORE, MAX_CRITERION_SCORE
                ));
            }
        }

        Ok(Self {
            creativity,
            technique,
            theme_fit,
        })
    }

    pub fn total(&self) -> i16 {
        self.creativity + self.technique + self.theme_fit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_SCORE_TOTAL;

    #[test]
    fn test_score_card_bounds() {
        assert_eq!(ScoreCard::new(0, 0, 0).map(|c| c.total()), Ok(0));
        assert_eq!(
            ScoreCard::new(10, 10, 10).map(|c| c.total()),
            Ok(MAX_SCORE_TOTAL)
        );

        let err = ScoreCard::new(5, 11, 5).unwrap_err();
        assert!(err.starts_with("technique"));
        assert!(ScoreCard::new(-1, 5, 5).is_err());
    }
}
