//! Judging response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    db::repositories::{JudgeQueueItem, PanelMember},
    handlers::contests::response::ContestSummary,
    models::Score,
};

/// Judge on a contest panel
#[derive(Debug, Serialize)]
pub struct PanelMemberResponse {
    pub judge_id: Uuid,
    pub username: String,
    pub display_name: String,
    pub assigned_by: Uuid,
    pub assigned_at: DateTime<Utc>,
}

impl From<PanelMember> for PanelMemberResponse {
    fn from(member: PanelMember) -> Self {
        let display_name = member.display_name.unwrap_or_else(|| member.username.clone());
        Self {
            judge_id: member.assignment.judge_id,
            username: member.username,
            display_name,
            assigned_by: member.assignment.assigned_by,
            assigned_at: member.assignment.assigned_at,
        }
    }
}

/// Contest panel response
#[derive(Debug, Serialize)]
pub struct PanelResponse {
    pub contest_id: Uuid,
    pub judges: Vec<PanelMemberResponse>,
}

/// Contests assigned to the calling judge
#[derive(Debug, Serialize)]
pub struct AssignedContestsResponse {
    pub contests: Vec<ContestSummary>,
}

/// A judge's criterion values for one entry
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OwnScore {
    pub creativity: i16,
    pub technique: i16,
    pub theme_fit: i16,
    pub total: i16,
}

/// Entry in a judge's queue
#[derive(Debug, Serialize)]
pub struct QueueEntry {
    pub submission_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    pub ai_tools: Vec<String>,
    pub submitted_at: DateTime<Utc>,
    /// `None` until the judge has scored the entry
    pub my_score: Option<OwnScore>,
    pub my_comment: Option<String>,
}

impl From<JudgeQueueItem> for QueueEntry {
    fn from(item: JudgeQueueItem) -> Self {
        let my_score = match (item.creativity, item.technique, item.theme_fit) {
            (Some(creativity), Some(technique), Some(theme_fit)) => Some(OwnScore {
                creativity,
                technique,
                theme_fit,
                total: creativity + technique + theme_fit,
            }),
            _ => None,
        };
        let s = item.submission;

        Self {
            submission_id: s.id,
            title: s.title,
            description: s.description,
            video_url: s.video_url,
            thumbnail_url: s.thumbnail_url,
            ai_tools: s.ai_tools,
            submitted_at: s.submitted_at,
            my_score,
            my_comment: item.comment,
        }
    }
}

/// Judge queue response
#[derive(Debug, Serialize)]
pub struct JudgeQueueResponse {
    pub contest: ContestSummary,
    pub submissions: Vec<QueueEntry>,
    pub scored: usize,
    pub remaining: usize,
}

/// Stored score
#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub id: Uuid,
    pub submission_id: Uuid,
    pub judge_id: Uuid,
    pub creativity: i16,
    pub technique: i16,
    pub theme_fit: i16,
    pub total: i16,
    pub comment: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<Score> for ScoreResponse {
    fn from(score: Score) -> Self {
        Self {
            total: score.total(),
            id: score.id,
            submission_id: score.submission_id,
            judge_id: score.judge_id,
            creativity: score.creativity,
            technique: score.technique,
            theme_fit: score.theme_fit,
            comment: score.comment,
            updated_at: score.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Submission;

    fn item(scores: (Option<i16>, Option<i16>, Option<i16>)) -> JudgeQueueItem {
        let now = Utc::now();
        JudgeQueueItem {
            submission: Submission {
                id: Uuid::new_v4(),
                contest_id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
                title: "Glass City".to_string(),
                description: None,
                video_url: "https://videos.example/glass-city".to_string(),
                thumbnail_url: None,
                ai_tools: vec!["Sora".to_string()],
                status: "approved".to_string(),
                review_note: None,
                reviewed_by: None,
                reviewed_at: None,
                submitted_at: now,
                updated_at: now,
            },
            creativity: scores.0,
            technique: scores.1,
            theme_fit: scores.2,
            comment: None,
        }
    }

    #[test]
    fn test_queue_entry_with_score() {
        let entry = QueueEntry::from(item((Some(7), Some(8), Some(6))));
        let score = entry.my_score.unwrap();
        assert_eq!(score.total, 21);
    }

    #[test]
    fn test_queue_entry_unscored() {
        let entry = QueueEntry::from(item((None, None, None)));
        assert!(entry.my_score.is_none());
    }
}
