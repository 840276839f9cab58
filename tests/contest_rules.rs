//! Entry, scoring and panel rules against a real database

mod common;

use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use vidarena::{
    db::repositories::{
        ContestRepository, JudgingRepository, NewContest, NewSubmission, SubmissionRepository,
        UserRepository,
    },
    error::AppError,
    handlers::{judging::request::ScoreRequest, submissions::request::CreateSubmissionRequest},
    models::{Contest, Role, User},
    services::{AuthService, JudgingService, SubmissionService},
};

/// Contest published with the given schedule
async fn published_contest(
    pool: &PgPool,
    host: &User,
    slug: &str,
    submission_start: DateTime<Utc>,
    submission_end: DateTime<Utc>,
    judging_end: DateTime<Utc>,
) -> Contest {
    let contest = ContestRepository::create(
        pool,
        NewContest {
            slug,
            title: "Dream Machines",
            tagline: None,
            description: None,
            rules: None,
            prize_description: None,
            cover_image_url: None,
            host_id: &host.id,
            submission_start,
            submission_end,
            judging_end,
            max_submissions_per_user: 2,
        },
    )
    .await
    .unwrap();
    ContestRepository::set_status(pool, &contest.id, "published")
        .await
        .unwrap()
}

async fn open_contest(pool: &PgPool, host: &User, slug: &str) -> Contest {
    let now = Utc::now();
    published_contest(
        pool,
        host,
        slug,
        now - Duration::days(1),
        now + Duration::days(5),
        now + Duration::days(10),
    )
    .await
}

async fn judging_contest(pool: &PgPool, host: &User, slug: &str) -> Contest {
    let now = Utc::now();
    published_contest(
        pool,
        host,
        slug,
        now - Duration::days(10),
        now - Duration::days(1),
        now + Duration::days(5),
    )
    .await
}

fn entry(contest: &Contest, title: &str) -> CreateSubmissionRequest {
    CreateSubmissionRequest {
        contest_id: contest.id,
        title: title.to_string(),
        description: None,
        video_url: "https://videos.example.com/watch/abc123".to_string(),
        thumbnail_url: None,
        ai_tools: vec!["Sora".to_string()],
    }
}

/// Approved entry inserted directly, as if it was accepted during the open phase
async fn approved_entry(pool: &PgPool, contest: &Contest, author: &User, host: &User) -> Uuid {
    let tools: Vec<String> = vec![];
    let submission = SubmissionRepository::create(
        pool,
        NewSubmission {
            contest_id: &contest.id,
            user_id: &author.id,
            title: "Glass Ocean",
            description: None,
            video_url: "https://videos.example.com/watch/glass",
            thumbnail_url: None,
            ai_tools: &tools,
        },
    )
    .await
    .unwrap();
    SubmissionRepository::review(pool, &submission.id, "approved", None, &host.id)
        .await
        .unwrap();
    submission.id
}

fn score(creativity: i16) -> ScoreRequest {
    ScoreRequest {
        creativity,
        technique: 7,
        theme_fit: 9,
        comment: Some("Strong pacing".to_string()),
    }
}

#[tokio::test]
#[ignore = "needs Docker"]
async fn test_submission_cap_counts_only_active_entries() {
    let db = common::start_postgres().await;
    let host = common::create_user(&db.pool, "cap_host", Role::Host).await;
    let artist = common::create_user(&db.pool, "cap_artist", Role::Participant).await;
    let contest = open_contest(&db.pool, &host, "cap-contest").await;
    let caller = common::as_caller(&artist);

    let first = SubmissionService::create_submission(&db.pool, &caller, entry(&contest, "One"))
        .await
        .unwrap();
    SubmissionService::create_submission(&db.pool, &caller, entry(&contest, "Two"))
        .await
        .unwrap();

    let third = SubmissionService::create_submission(&db.pool, &caller, entry(&contest, "Three")).await;
    assert!(matches!(third, Err(AppError::Conflict(_))));

    // Withdrawing frees a slot
    SubmissionService::withdraw(&db.pool, &first.id, &caller).await.unwrap();
    SubmissionService::create_submission(&db.pool, &caller, entry(&contest, "Three"))
        .await
        .unwrap();
}

#[tokio::test]
#[ignore = "needs Docker"]
async fn test_entries_only_accepted_while_open() {
    let db = common::start_postgres().await;
    let host = common::create_user(&db.pool, "gate_host", Role::Host).await;
    let artist = common::create_user(&db.pool, "gate_artist", Role::Participant).await;
    let caller = common::as_caller(&artist);

    let now = Utc::now();
    let upcoming = published_contest(
        &db.pool,
        &host,
        "upcoming-contest",
        now + Duration::days(1),
        now + Duration::days(5),
        now + Duration::days(10),
    )
    .await;
    let result = SubmissionService::create_submission(&db.pool, &caller, entry(&upcoming, "Early")).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    let judging = judging_contest(&db.pool, &host, "late-contest").await;
    let result = SubmissionService::create_submission(&db.pool, &caller, entry(&judging, "Late")).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    // Drafts are invisible to participants
    let draft = ContestRepository::set_status(&db.pool, &judging.id, "draft").await.unwrap();
    let result = SubmissionService::create_submission(&db.pool, &caller, entry(&draft, "Hidden")).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
#[ignore = "needs Docker"]
async fn test_panel_judges_cannot_enter() {
    let db = common::start_postgres().await;
    let host = common::create_user(&db.pool, "panel_host", Role::Host).await;
    let judge = common::create_user(&db.pool, "panel_judge", Role::Judge).await;
    let contest = open_contest(&db.pool, &host, "panel-contest").await;
    JudgingRepository::assign(&db.pool, &contest.id, &judge.id, &host.id)
        .await
        .unwrap();

    let result =
        SubmissionService::create_submission(&db.pool, &common::as_caller(&judge), entry(&contest, "Mine")).await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));

    let result =
        SubmissionService::create_submission(&db.pool, &common::as_caller(&host), entry(&contest, "Also mine")).await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
#[ignore = "needs Docker"]
async fn test_judge_scores_only_assigned_approved_entries() {
    let db = common::start_postgres().await;
    let host = common::create_user(&db.pool, "score_host", Role::Host).await;
    let artist = common::create_user(&db.pool, "score_artist", Role::Participant).await;
    let judge = common::create_user(&db.pool, "score_judge", Role::Judge).await;
    let outsider = common::create_user(&db.pool, "score_outsider", Role::Judge).await;
    let contest = judging_contest(&db.pool, &host, "score-contest").await;
    JudgingRepository::assign(&db.pool, &contest.id, &judge.id, &host.id)
        .await
        .unwrap();

    let approved = approved_entry(&db.pool, &contest, &artist, &host).await;

    let result =
        JudgingService::upsert_score(&db.pool, &approved, &common::as_caller(&outsider), score(8)).await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));

    SubmissionRepository::review(&db.pool, &approved, "rejected", None, &host.id)
        .await
        .unwrap();
    let result = JudgingService::upsert_score(&db.pool, &approved, &common::as_caller(&judge), score(8)).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    SubmissionRepository::review(&db.pool, &approved, "approved", None, &host.id)
        .await
        .unwrap();
    let first = JudgingService::upsert_score(&db.pool, &approved, &common::as_caller(&judge), score(8))
        .await
        .unwrap();
    assert_eq!(first.total, 24);

    // A second score replaces the first
    let second = JudgingService::upsert_score(&db.pool, &approved, &common::as_caller(&judge), score(4))
        .await
        .unwrap();
    assert_eq!(second.id, first.id);
    assert_eq!(second.total, 20);
}

#[tokio::test]
#[ignore = "needs Docker"]
async fn test_panel_frozen_once_completed() {
    let db = common::start_postgres().await;
    let host = common::create_user(&db.pool, "frozen_host", Role::Host).await;
    let judge = common::create_user(&db.pool, "frozen_judge", Role::Judge).await;
    let late_judge = common::create_user(&db.pool, "frozen_late", Role::Judge).await;

    let now = Utc::now();
    let contest = published_contest(
        &db.pool,
        &host,
        "frozen-contest",
        now - Duration::days(20),
        now - Duration::days(10),
        now - Duration::days(1),
    )
    .await;
    JudgingRepository::assign(&db.pool, &contest.id, &judge.id, &host.id)
        .await
        .unwrap();
    let caller = common::as_caller(&host);

    let result = JudgingService::unassign_judge(&db.pool, &contest.id, &judge.id, &caller).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert!(JudgingRepository::is_assigned(&db.pool, &contest.id, &judge.id)
        .await
        .unwrap());

    let result = JudgingService::assign_judge(&db.pool, &contest.id, &caller, &late_judge.username).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
#[ignore = "needs Docker"]
async fn test_refresh_rotates_tokens() {
    let db = common::start_postgres().await;
    let store = common::start_redis().await;
    let config = common::config();

    let hash = AuthService::hash_password("correct horse battery").unwrap();
    UserRepository::create(&db.pool, "rotating", "rotating@example.com", &hash, None, "participant")
        .await
        .unwrap();

    let (_, issued) = AuthService::login(
        &db.pool,
        store.conn.clone(),
        &config,
        common::policy(),
        "rotating",
        "correct horse battery",
    )
    .await
    .unwrap();

    let rotated = AuthService::refresh(
        &db.pool,
        store.conn.clone(),
        &config,
        common::policy(),
        &issued.refresh_token,
    )
    .await
    .unwrap();
    assert_ne!(rotated.refresh_token, issued.refresh_token);
    assert_eq!(rotated.session_id, issued.session_id);

    // The old token is single-use
    let reused = AuthService::refresh(
        &db.pool,
        store.conn.clone(),
        &config,
        common::policy(),
        &issued.refresh_token,
    )
    .await;
    assert!(matches!(reused, Err(AppError::InvalidToken)));
}
