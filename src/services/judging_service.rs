//! Judging service: panels, judge queues and scores

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::{
    constants::{actions, entity_types},
    db::repositories::{ContestRepository, JudgingRepository, SubmissionRepository, UserRepository},
    error::{AppError, AppResult},
    handlers::{
        contests::response::ContestSummary,
        judging::{
            request::ScoreRequest,
            response::{
                AssignedContestsResponse, JudgeQueueResponse, PanelMemberResponse, PanelResponse,
                QueueEntry, ScoreResponse,
            },
        },
    },
    middleware::auth::AuthenticatedUser,
    models::{ContestPhase, NewActivity, Role, ScoreCard, SubmissionStatus},
    services::{ActivityService, ContestService},
    utils::sanitize_string,
};

/// Judging service for business logic
pub struct JudgingService;

impl JudgingService {
    /// List the panel of a managed contest
    pub async fn list_panel(
        pool: &PgPool,
        contest_id: &Uuid,
        user: &AuthenticatedUser,
    ) -> AppResult<PanelResponse> {
        let contest = ContestService::load_managed(pool, contest_id, user).await?;
        let members = JudgingRepository::list_panel(pool, &contest.id).await?;

        Ok(PanelResponse {
            contest_id: contest.id,
            judges: members.into_iter().map(PanelMemberResponse::from).collect(),
        })
    }

    /// Add a judge to a contest panel
    pub async fn assign_judge(
        pool: &PgPool,
        contest_id: &Uuid,
        user: &AuthenticatedUser,
        username: &str,
    ) -> AppResult<PanelResponse> {
        let contest = ContestService::load_managed(pool, contest_id, user).await?;
        ensure_panel_open(contest.phase())?;

        let judge = UserRepository::find_by_username(pool, username.trim())
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        if judge.role() != Some(Role::Judge) {
            return Err(AppError::Validation(format!(
                "User '{}' does not have the judge role",
                judge.username
            )));
        }
        if !judge.is_active {
            return Err(AppError::Validation(format!(
                "User '{}' is deactivated",
                judge.username
            )));
        }
        if JudgingRepository::is_assigned(pool, &contest.id, &judge.id).await? {
            return Err(AppError::AlreadyExists(
                "Judge is already on this panel".to_string(),
            ));
        }

        JudgingRepository::assign(pool, &contest.id, &judge.id, &user.id).await?;

        info!(contest_id = %contest.id, judge_id = %judge.id, "Judge assigned");
        ActivityService::record(
            pool,
            NewActivity::new(Some(user.id), actions::JUDGE_ASSIGN)
                .entity(entity_types::CONTEST, contest.id)
                .metadata(serde_json::json!({ "judge_id": judge.id })),
        )
        .await;

        Self::list_panel(pool, &contest.id, user).await
    }

    /// Remove a judge from a contest panel; their scores are kept
    pub async fn unassign_judge(
        pool: &PgPool,
        contest_id: &Uuid,
        judge_id: &Uuid,
        user: &AuthenticatedUser,
    ) -> AppResult<()> {
        let contest = ContestService::load_managed(pool, contest_id, user).await?;
        ensure_panel_open(contest.phase())?;

        if !JudgingRepository::unassign(pool, &contest.id, judge_id).await? {
            return Err(AppError::NotFound("Judge is not on this panel".to_string()));
        }

        info!(contest_id = %contest.id, judge_id = %judge_id, "Judge unassigned");
        ActivityService::record(
            pool,
            NewActivity::new(Some(user.id), actions::JUDGE_UNASSIGN)
                .entity(entity_types::CONTEST, contest.id)
                .metadata(serde_json::json!({ "judge_id": judge_id })),
        )
        .await;

        Ok(())
    }

    /// Contests the caller judges
    pub async fn list_assigned(
        pool: &PgPool,
        judge: &AuthenticatedUser,
    ) -> AppResult<AssignedContestsResponse> {
        let contests = JudgingRepository::contests_for_judge(pool, &judge.id).await?;
        Ok(AssignedContestsResponse {
            contests: contests.iter().map(ContestSummary::from).collect(),
        })
    }

    /// Approved entries of a contest with the caller's own scores
    pub async fn get_queue(
        pool: &PgPool,
        contest_id: &Uuid,
        judge: &AuthenticatedUser,
    ) -> AppResult<JudgeQueueResponse> {
        let contest = ContestRepository::find_by_id(pool, contest_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Contest not found".to_string()))?;

        if !judge.is_admin() && !JudgingRepository::is_assigned(pool, &contest.id, &judge.id).await? {
            return Err(AppError::Forbidden(
                "Not assigned to judge this contest".to_string(),
            ));
        }

        let submissions: Vec<QueueEntry> = JudgingRepository::judge_queue(pool, &contest.id, &judge.id)
            .await?
            .into_iter()
            .map(QueueEntry::from)
            .collect();
        let scored = submissions.iter().filter(|s| s.my_score.is_some()).count();

        Ok(JudgeQueueResponse {
            contest: ContestSummary::from(&contest),
            remaining: submissions.len() - scored,
            scored,
            submissions,
        })
    }

    /// Create or replace the caller's score for an approved entry.
    ///
    /// Only assigned judges may score, and only during the judging phase.
    pub async fn upsert_score(
        pool: &PgPool,
        submission_id: &Uuid,
        judge: &AuthenticatedUser,
        payload: ScoreRequest,
    ) -> AppResult<ScoreResponse> {
        let card = ScoreCard::new(payload.creativity, payload.technique, payload.theme_fit)
            .map_err(AppError::Validation)?;

        let submission = SubmissionRepository::find_by_id(pool, submission_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Submission not found".to_string()))?;

        let assigned = JudgingRepository::is_assigned(pool, &submission.contest_id, &judge.id).await?;
        let contest = ContestRepository::find_by_id(pool, &submission.contest_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Contest not found".to_string()))?;
        ensure_can_score(assigned, submission.status(), contest.phase())?;

        let comment = payload
            .comment
            .as_deref()
            .map(sanitize_string)
            .filter(|c| !c.is_empty());
        let score =
            JudgingRepository::upsert_score(pool, submission_id, &judge.id, card, comment.as_deref())
                .await?;

        info!(
            submission_id = %submission_id,
            judge_id = %judge.id,
            total = card.total(),
            "Score recorded"
        );
        ActivityService::record(
            pool,
            NewActivity::new(Some(judge.id), actions::SCORE_UPSERT)
                .entity(entity_types::SCORE, score.id)
                .metadata(serde_json::json!({
                    "submission_id": submission_id,
                    "total": card.total(),
                })),
        )
        .await;

        Ok(score.into())
    }
}

/// Panel changes are refused once judging has ended
fn ensure_panel_open(phase: ContestPhase) -> AppResult<()> {
    if phase.panel_locked() {
        return Err(AppError::Conflict(
            "Panel cannot change after judging has ended".to_string(),
        ));
    }
    Ok(())
}

/// A judge scores only approved entries of a contest they sit on, during judging
fn ensure_can_score(
    assigned: bool,
    status: SubmissionStatus,
    phase: ContestPhase,
) -> AppResult<()> {
    if !assigned {
        return Err(AppError::Forbidden(
            "Not assigned to judge this contest".to_string(),
        ));
    }
    if status != SubmissionStatus::Approved {
        return Err(AppError::Conflict(
            "Only approved submissions can be scored".to_string(),
        ));
    }
    if phase != ContestPhase::Judging {
        return Err(AppError::Conflict(format!(
            "Scores are accepted only during judging (contest is {})",
            phase
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_frozen_after_judging() {
        assert!(ensure_panel_open(ContestPhase::Open).is_ok());
        assert!(ensure_panel_open(ContestPhase::Judging).is_ok());
        assert!(matches!(
            ensure_panel_open(ContestPhase::Completed),
            Err(AppError::Conflict(_))
        ));
        assert!(matches!(
            ensure_panel_open(ContestPhase::Archived),
            Err(AppError::Conflict(_))
        ));
    }

    #[test]
    fn test_scoring_requires_assignment_first() {
        let err = ensure_can_score(false, SubmissionStatus::Approved, ContestPhase::Judging);
        assert!(matches!(err, Err(AppError::Forbidden(_))));
    }

    #[test]
    fn test_scoring_only_approved_entries() {
        for status in [
            SubmissionStatus::Pending,
            SubmissionStatus::Rejected,
            SubmissionStatus::Withdrawn,
        ] {
            assert!(matches!(
                ensure_can_score(true, status, ContestPhase::Judging),
                Err(AppError::Conflict(_))
            ));
        }
    }

    #[test]
    fn test_scoring_only_while_judging() {
        assert!(ensure_can_score(true, SubmissionStatus::Approved, ContestPhase::Judging).is_ok());
        for phase in [ContestPhase::Open, ContestPhase::Completed, ContestPhase::Archived] {
            assert!(matches!(
                ensure_can_score(true, SubmissionStatus::Approved, phase),
                Err(AppError::Conflict(_))
            ));
        }
    }
}
