//! Platform-wide admin metrics

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    constants::TOP_ACTIONS_SIZE,
    models::{compute_phase, ContestPhase, ContestStatus, Role},
};

use super::{daily_series, AnalyticsWindow, DailyCount};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ContestRow {
    pub status: String,
    pub submission_start: DateTime<Utc>,
    pub submission_end: DateTime<Utc>,
    pub judging_end: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ActivityRow {
    pub user_id: Option<Uuid>,
    pub action: String,
    pub created_at: DateTime<Utc>,
}

/// Aggregated metrics across the whole platform
#[derive(Debug, Clone, Serialize)]
pub struct PlatformMetrics {
    pub total_users: u64,
    pub users_by_role: Vec<RoleCount>,
    pub new_users_per_day: Vec<DailyCount>,
    /// Distinct users with any logged activity in the window
    pub active_users: u64,
    pub contests_by_phase: Vec<PhaseCount>,
    pub submissions_per_day: Vec<DailyCount>,
    pub top_actions: Vec<ActionCount>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RoleCount {
    pub role: Role,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PhaseCount {
    pub phase: ContestPhase,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ActionCount {
    pub action: String,
    pub count: u64,
}

/// Reduce platform rows into admin dashboard metrics.
///
/// Contest phases are evaluated at the end of the window.
pub fn platform_metrics(
    users: &[UserRow],
    contests: &[ContestRow],
    submission_times: &[DateTime<Utc>],
    activity: &[ActivityRow],
    window: AnalyticsWindow,
) -> PlatformMetrics {
    let mut role_counts: HashMap<Role, u64> = HashMap::new();
    for user in users {
        if let Some(role) = Role::from_str(&user.role) {
            *role_counts.entry(role).or_default() += 1;
        }
    }

    let mut phase_counts: HashMap<ContestPhase, u64> = HashMap::new();
    for contest in contests {
        let status = ContestStatus::from_str(&contest.status).unwrap_or(ContestStatus::Draft);
        let phase = compute_phase(
            status,
            contest.submission_start,
            contest.submission_end,
            contest.judging_end,
            window.end,
        );
        *phase_counts.entry(phase).or_default() += 1;
    }

    let mut active: HashSet<Uuid> = HashSet::new();
    let mut action_counts: HashMap<&str, u64> = HashMap::new();
    for entry in activity.iter().filter(|a| window.contains(a.created_at)) {
        if let Some(user_id) = entry.user_id {
            active.insert(user_id);
        }
        *action_counts.entry(entry.action.as_str()).or_default() += 1;
    }

    let mut top_actions: Vec<ActionCount> = action_counts
        .into_iter()
        .map(|(action, count)| ActionCount {
            action: action.to_string(),
            count,
        })
        .collect();
    top_actions.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.action.cmp(&b.action)));
    top_actions.truncate(TOP_ACTIONS_SIZE);

    PlatformMetrics {
        total_users: users.len() as u64,
        users_by_role: Role::all()
            .into_iter()
            .map(|role| RoleCount {
                role,
                count: role_counts.get(&role).copied().unwrap_or(0),
            })
            .collect(),
        new_users_per_day: daily_series(
            users.iter().map(|u| u.created_at),
            window.first_day(),
            window.last_day(),
        ),
        active_users: active.len() as u64,
        contests_by_phase: ContestPhase::all()
            .into_iter()
            .map(|phase| PhaseCount {
                phase,
                count: phase_counts.get(&phase).copied().unwrap_or(0),
            })
            .collect(),
        submissions_per_day: daily_series(
            submission_times.iter().copied(),
            window.first_day(),
            window.last_day(),
        ),
        top_actions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 30, 12, 0, 0).unwrap()
    }

    fn user(role: &str, days_ago: i64) -> UserRow {
        UserRow {
            role: role.to_string(),
            created_at: now() - Duration::days(days_ago),
        }
    }

    fn contest(status: &str, start_offset_days: i64) -> ContestRow {
        let start = now() + Duration::days(start_offset_days);
        ContestRow {
            status: status.to_string(),
            submission_start: start,
            submission_end: start + Duration::days(7),
            judging_end: start + Duration::days(10),
        }
    }

    fn act(user_id: Option<Uuid>, action: &str, days_ago: i64) -> ActivityRow {
        ActivityRow {
            user_id,
            action: action.to_string(),
            created_at: now() - Duration::days(days_ago),
        }
    }

    #[test]
    fn test_users_and_contests() {
        let users = vec![
            user("participant", 0),
            user("participant", 1),
            user("judge", 40),
            user("admin", 100),
            user("legacy", 2),
        ];
        let contests = vec![
            contest("published", 1),   // upcoming
            contest("published", -3),  // open
            contest("published", -8),  // judging
            contest("published", -30), // completed
            contest("draft", -3),
            contest("archived", -30),
        ];

        let window = AnalyticsWindow::last_days(7, now());
        let metrics = platform_metrics(&users, &contests, &[], &[], window);

        assert_eq!(metrics.total_users, 5);
        let participants = metrics
            .users_by_role
            .iter()
            .find(|r| r.role == Role::Participant)
            .unwrap();
        assert_eq!(participants.count, 2);
        assert_eq!(
            metrics.users_by_role.iter().map(|r| r.count).sum::<u64>(),
            4
        );

        let new_users: u64 = metrics.new_users_per_day.iter().map(|d| d.count).sum();
        assert_eq!(new_users, 3);

        assert!(metrics.contests_by_phase.iter().all(|p| p.count == 1));
        assert_eq!(metrics.contests_by_phase.len(), 6);
    }

    #[test]
    fn test_activity_window_and_top_actions() {
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let activity = vec![
            act(Some(alice), "user.login", 0),
            act(Some(alice), "user.login", 1),
            act(Some(bob), "submission.create", 2),
            act(None, "inquiry.create", 3),
            act(Some(Uuid::new_v4()), "user.login", 60), // outside window
        ];

        let window = AnalyticsWindow::last_days(7, now());
        let submissions = vec![now(), now() - Duration::days(1), now() - Duration::days(50)];
        let metrics = platform_metrics(&[], &[], &submissions, &activity, window);

        assert_eq!(metrics.active_users, 2);
        assert_eq!(
            metrics.top_actions,
            vec![
                ActionCount { action: "user.login".to_string(), count: 2 },
                ActionCount { action: "inquiry.create".to_string(), count: 1 },
                ActionCount { action: "submission.create".to_string(), count: 1 },
            ]
        );
        let total_submissions: u64 = metrics.submissions_per_day.iter().map(|d| d.count).sum();
        assert_eq!(total_submissions, 2);
    }
}
