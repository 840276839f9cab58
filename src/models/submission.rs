//! Submission model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::constants::submission_statuses;

/// Submission database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    pub contest_id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    /// Link to the video on the external host
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    /// AI tools the participant declared using
    pub ai_tools: Vec<String>,
    pub status: String,
    pub review_note: Option<String>,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Submission {
    /// Parsed status (unknown values read as pending)
    pub fn status(&self) -> SubmissionStatus {
        SubmissionStatus::from_str(&self.status).unwrap_or(SubmissionStatus::Pending)
    }
}

/// Submission moderation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Pending,
    Approved,
    Rejected,
    Withdrawn,
}

impl SubmissionStatus {
    /// Get status as string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => submission_statuses::PENDING,
            Self::Approved => submission_statuses::APPROVED,
            Self::Rejected => submission_statuses::REJECTED,
            Self::Withdrawn => submission_statuses::WITHDRAWN,
        }
    }

    /// Parse status from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            submission_statuses::PENDING => Some(Self::Pending),
            submission_statuses::APPROVED => Some(Self::Approved),
            submission_statuses::REJECTED => Some(Self::Rejected),
            submission_statuses::WITHDRAWN => Some(Self::Withdrawn),
            _ => None,
        }
    }

    /// All statuses, in display order
    pub fn all() -> [SubmissionStatus; 4] {
        [Self::Pending, Self::Approved, Self::Rejected, Self::Withdrawn]
    }

    /// Whether the entry counts against the participant's submission cap
    pub fn counts_toward_limit(&self) -> bool {
        !matches!(self, Self::Withdrawn)
    }

    /// Whether the participant may still pull the entry
    pub fn can_withdraw(&self) -> bool {
        matches!(self, Self::Pending | Self::Approved)
    }

    /// Whether a reviewer may move the entry to `target`
    pub fn can_review_to(&self, target: SubmissionStatus) -> bool {
        match (self, target) {
            (Self::Withdrawn, _) => false,
            (_, Self::Approved | Self::Rejected) => *self != target,
            _ => false,
        }
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_transitions() {
        use SubmissionStatus::*;

        assert!(Pending.can_review_to(Approved));
        assert!(Pending.can_review_to(Rejected));
        assert!(Approved.can_review_to(Rejected));
        assert!(Rejected.can_review_to(Approved));

        assert!(!Approved.can_review_to(Approved));
        assert!(!Pending.can_review_to(Pending));
        assert!(!Pending.can_review_to(Withdrawn));
        assert!(!Withdrawn.can_review_to(Approved));
    }

    #[test]
    fn test_withdraw_and_limit_rules() {
        assert!(SubmissionStatus::Pending.can_withdraw());
        assert!(SubmissionStatus::Approved.can_withdraw());
        assert!(!SubmissionStatus::Rejected.can_withdraw());
        assert!(!SubmissionStatus::Withdrawn.can_withdraw());

        assert!(SubmissionStatus::Rejected.counts_toward_limit());
        assert!(!SubmissionStatus::Withdrawn.counts_toward_limit());
    }
}
