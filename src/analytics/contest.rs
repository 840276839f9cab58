//! Per-contest dashboard metrics

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    constants::{LEADERBOARD_SIZE, MAX_SCORE_TOTAL, SCORE_BUCKET_WIDTH},
    models::SubmissionStatus,
};

use super::{daily_series, round_to, AnalyticsWindow, DailyCount};

/// Submission row as fetched for analytics
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SubmissionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub title: String,
    pub status: String,
    pub submitted_at: DateTime<Utc>,
}

/// Score row as fetched for analytics
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ScoreRow {
    pub submission_id: Uuid,
    pub judge_id: Uuid,
    pub total: i16,
}

/// Aggregated metrics for one contest
#[derive(Debug, Clone, Serialize)]
pub struct ContestMetrics {
    /// Entries excluding withdrawn ones
    pub total_submissions: u64,
    pub status_breakdown: Vec<StatusCount>,
    pub unique_participants: u64,
    pub submissions_per_day: Vec<DailyCount>,
    /// Mean of per-submission average totals, `None` until something is scored
    pub average_score: Option<f64>,
    pub score_distribution: Vec<ScoreBucket>,
    pub judging_progress: JudgingProgress,
    pub leaderboard: Vec<LeaderboardEntry>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StatusCount {
    pub status: SubmissionStatus,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScoreBucket {
    pub label: String,
    pub min: i16,
    pub max: i16,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct JudgingProgress {
    pub expected: u64,
    pub completed: u64,
    pub percent: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub submission_id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub title: String,
    pub average_total: f64,
    pub score_count: u32,
    pub submitted_at: DateTime<Utc>,
}

/// Reduce a contest's submissions and scores into dashboard metrics.
///
/// `judges` is the contest's current panel; only their scores count toward
/// judging progress, while averages use every score on approved entries.
/// Rows with an unrecognised status are skipped.
pub fn contest_metrics(
    submissions: &[SubmissionRow],
    scores: &[ScoreRow],
    judges: &[Uuid],
    window: AnalyticsWindow,
) -> ContestMetrics {
    let mut status_counts: HashMap<SubmissionStatus, u64> = HashMap::new();
    let mut participants: HashSet<Uuid> = HashSet::new();
    let mut active_times = Vec::with_capacity(submissions.len());
    let mut approved: HashMap<Uuid, &SubmissionRow> = HashMap::new();

    for row in submissions {
        let Some(status) = SubmissionStatus::from_str(&row.status) else {
            continue;
        };
        *status_counts.entry(status).or_default() += 1;

        if status.counts_toward_limit() {
            participants.insert(row.user_id);
            active_times.push(row.submitted_at);
        }
        if status == SubmissionStatus::Approved {
            approved.insert(row.id, row);
        }
    }

    let status_breakdown = SubmissionStatus::all()
        .into_iter()
        .map(|status| StatusCount {
            status,
            count: status_counts.get(&status).copied().unwrap_or(0),
        })
        .collect();

    let panel: HashSet<&Uuid> = judges.iter().collect();
    let mut totals: HashMap<Uuid, (i64, u32)> = HashMap::new();
    let mut completed = 0u64;

    for score in scores {
        if !approved.contains_key(&score.submission_id) {
            continue;
        }
        let entry = totals.entry(score.submission_id).or_default();
        entry.0 += i64::from(score.total);
        entry.1 += 1;

        if panel.contains(&score.judge_id) {
            completed += 1;
        }
    }

    let averages: Vec<(Uuid, f64, u32)> = totals
        .into_iter()
        .map(|(id, (sum, n))| (id, sum as f64 / f64::from(n), n))
        .collect();

    let average_score = if averages.is_empty() {
        None
    } else {
        let mean = averages.iter().map(|(_, avg, _)| avg).sum::<f64>() / averages.len() as f64;
        Some(round_to(mean, 2))
    };

    let expected = approved.len() as u64 * panel.len() as u64;
    let percent = if expected == 0 {
        0.0
    } else {
        round_to((completed as f64 / expected as f64 * 100.0).min(100.0), 1)
    };

    ContestMetrics {
        total_submissions: active_times.len() as u64,
        status_breakdown,
        unique_participants: participants.len() as u64,
        submissions_per_day: daily_series(active_times, window.first_day(), window.last_day()),
        average_score,
        score_distribution: score_distribution(averages.iter().map(|(_, avg, _)| *avg)),
        judging_progress: JudgingProgress {
            expected,
            completed,
            percent,
        },
        leaderboard: leaderboard(&approved, averages),
    }
}

/// Histogram of average totals in fixed-width buckets, the last one closed
fn score_distribution<I: IntoIterator<Item = f64>>(averages: I) -> Vec<ScoreBucket> {
    let bucket_count = (MAX_SCORE_TOTAL / SCORE_BUCKET_WIDTH) as usize;
    let mut buckets: Vec<ScoreBucket> = (0..bucket_count)
        .map(|i| {
            let min = i as i16 * SCORE_BUCKET_WIDTH;
            let max = if i + 1 == bucket_count {
                MAX_SCORE_TOTAL
            } else {
                min + SCORE_BUCKET_WIDTH - 1
            };
            ScoreBucket {
                label: format!("{}-{}", min, max),
                min,
                max,
                count: 0,
            }
        })
        .collect();

    for avg in averages {
        let idx = ((avg.max(0.0) / f64::from(SCORE_BUCKET_WIDTH)).floor() as usize)
            .min(bucket_count - 1);
        buckets[idx].count += 1;
    }

    buckets
}

fn leaderboard(
    approved: &HashMap<Uuid, &SubmissionRow>,
    averages: Vec<(Uuid, f64, u32)>,
) -> Vec<LeaderboardEntry> {
    let mut ranked: Vec<(&SubmissionRow, f64, u32)> = averages
        .into_iter()
        .filter_map(|(id, avg, n)| approved.get(&id).map(|row| (*row, avg, n)))
        .collect();

    ranked.sort_by(|a, b| {
        b.1.total_cmp(&a.1)
            .then_with(|| a.0.submitted_at.cmp(&b.0.submitted_at))
            .then_with(|| a.0.id.cmp(&b.0.id))
    });

    ranked
        .into_iter()
        .take(LEADERBOARD_SIZE)
        .enumerate()
        .map(|(i, (row, avg, n))| LeaderboardEntry {
            rank: i as u32 + 1,
            submission_id: row.id,
            user_id: row.user_id,
            username: row.username.clone(),
            title: row.title.clone(),
            average_total: round_to(avg, 2),
            score_count: n,
            submitted_at: row.submitted_at,
        })
        .collect()
}
