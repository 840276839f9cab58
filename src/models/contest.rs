//! Contest model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::constants::contest_statuses;

/// Contest database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Contest {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub rules: Option<String>,
    pub prize_description: Option<String>,
    pub cover_image_url: Option<String>,
    pub host_id: Uuid,
    pub status: String,
    pub submission_start: DateTime<Utc>,
    pub submission_end: DateTime<Utc>,
    pub judging_end: DateTime<Utc>,
    pub max_submissions_per_user: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contest {
    /// Parsed publication status (unknown values read as draft)
    pub fn status(&self) -> ContestStatus {
        ContestStatus::from_str(&self.status).unwrap_or(ContestStatus::Draft)
    }

    /// Lifecycle phase at the given instant
    pub fn phase_at(&self, now: DateTime<Utc>) -> ContestPhase {
        compute_phase(
            self.status(),
            self.submission_start,
            self.submission_end,
            self.judging_end,
            now,
        )
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> ContestPhase {
        self.phase_at(Utc::now())
    }

    /// Check if the user hosts this contest
    pub fn is_hosted_by(&self, user_id: &Uuid) -> bool {
        self.host_id == *user_id
    }

    /// Drafts and archived contests are hidden from public listings
    pub fn is_public(&self) -> bool {
        self.status() == ContestStatus::Published
    }
}

/// Phase of a contest with the given status and schedule at `now`
pub fn compute_phase(
    status: ContestStatus,
    submission_start: DateTime<Utc>,
    submission_end: DateTime<Utc>,
    judging_end: DateTime<Utc>,
    now: DateTime<Utc>,
) -> ContestPhase {
    match status {
        ContestStatus::Draft => ContestPhase::Draft,
        ContestStatus::Archived => ContestPhase::Archived,
        ContestStatus::Published => {
            if now < submission_start {
                ContestPhase::Upcoming
            } else if now < submission_end {
                ContestPhase::Open
            } else if now < judging_end {
                ContestPhase::Judging
            } else {
                ContestPhase::Completed
            }
        }
    }
}

/// Validate that a schedule is ordered
pub fn validate_schedule(
    submission_start: DateTime<Utc>,
    submission_end: DateTime<Utc>,
    judging_end: DateTime<Utc>,
) -> Result<(), &'static str> {
    if submission_end <= submission_start {
        return Err("Submission end must be after submission start");
    }
    if judging_end < submission_end {
        return Err("Judging end must not be before submission end");
    }
    Ok(())
}

/// Contest publication status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContestStatus {
    Draft,
    Published,
    Archived,
}

impl ContestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => contest_statuses::DRAFT,
            Self::Published => contest_statuses::PUBLISHED,
            Self::Archived => contest_statuses::ARCHIVED,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            contest_statuses::DRAFT => Some(Self::Draft),
            contest_statuses::PUBLISHED => Some(Self::Published),
            contest_statuses::ARCHIVED => Some(Self::Archived),
            _ => None,
        }
    }
}

/// Contest lifecycle phase derived from status and schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContestPhase {
    Draft,
    Upcoming,
    Open,
    Judging,
    Completed,
    Archived,
}

impl ContestPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Upcoming => "upcoming",
            Self::Open => "open",
            Self::Judging => "judging",
            Self::Completed => "completed",
            Self::Archived => "archived",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "upcoming" => Some(Self::Upcoming),
            "open" => Some(Self::Open),
            "judging" => Some(Self::Judging),
            "completed" => Some(Self::Completed),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }

    /// Whether participants may submit or withdraw entries
    pub fn accepts_entries(&self) -> bool {
        *self == Self::Open
    }

    /// Judging has ended; the panel and its scores are final
    pub fn panel_locked(&self) -> bool {
        matches!(self, Self::Completed | Self::Archived)
    }

    /// All phases, in lifecycle order
    pub fn all() -> [ContestPhase; 6] {
        [
            Self::Draft,
            Self::Upcoming,
            Self::Open,
            Self::Judging,
            Self::Completed,
            Self::Archived,
        ]
    }
}

impl std::fmt::Display for ContestPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn contest(status: &str) -> Contest {
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        Contest {
            id: Uuid::new_v4(),
            slug: "neon-dreams".to_string(),
            title: "Neon Dreams".to_string(),
            tagline: None,
            description: None,
            rules: None,
            prize_description: None,
            cover_image_url: None,
            host_id: Uuid::new_v4(),
            status: status.to_string(),
            submission_start: start,
            submission_end: start + Duration::days(14),
            judging_end: start + Duration::days(21),
            max_submissions_per_user: 3,
            created_at: start,
            updated_at: start,
        }
    }

    #[test]
    fn test_phase_follows_schedule() {
        let c = contest("published");
        let start = c.submission_start;

        assert_eq!(c.phase_at(start - Duration::seconds(1)), ContestPhase::Upcoming);
        assert_eq!(c.phase_at(start), ContestPhase::Open);
        assert_eq!(c.phase_at(c.submission_end), ContestPhase::Judging);
        assert_eq!(c.phase_at(c.judging_end - Duration::seconds(1)), ContestPhase::Judging);
        assert_eq!(c.phase_at(c.judging_end), ContestPhase::Completed);
    }

    #[test]
    fn test_unpublished_phases_ignore_schedule() {
        let now = contest("draft").submission_start + Duration::days(1);
        assert_eq!(contest("draft").phase_at(now), ContestPhase::Draft);
        assert_eq!(contest("archived").phase_at(now), ContestPhase::Archived);
        assert!(!contest("draft").is_public());
    }

    #[test]
    fn test_validate_schedule() {
        let c = contest("draft");
        assert!(validate_schedule(c.submission_start, c.submission_end, c.judging_end).is_ok());
        assert!(validate_schedule(c.submission_end, c.submission_start, c.judging_end).is_err());
        assert!(validate_schedule(c.submission_start, c.judging_end, c.submission_end).is_err());
        // Judging may close together with submissions
        assert!(validate_schedule(c.submission_start, c.submission_end, c.submission_end).is_ok());
    }

    #[test]
    fn test_phase_gates() {
        assert!(ContestPhase::Open.accepts_entries());
        assert!(!ContestPhase::Upcoming.accepts_entries());
        assert!(!ContestPhase::Judging.accepts_entries());

        assert!(ContestPhase::Completed.panel_locked());
        assert!(ContestPhase::Archived.panel_locked());
        assert!(!ContestPhase::Judging.panel_locked());
        assert!(!ContestPhase::Draft.panel_locked());
    }
}
