//! Session lifecycle against a real Redis

mod common;

use chrono::{Duration, Utc};
use redis::AsyncCommands;
use sqlx::PgPool;
use uuid::Uuid;

use vidarena::{
    constants::redis_keys,
    error::AppError,
    services::{
        auth_service::AuthService,
        session_service::{SessionRecord, SessionService},
    },
    utils::hash_string,
};

fn session_key(session_id: &Uuid) -> String {
    format!("{}:{}", redis_keys::SESSION, session_id)
}

fn index_key(user_id: &Uuid) -> String {
    format!("{}:{}", redis_keys::USER_SESSIONS, user_id)
}

/// Store a record as `open` would, bypassing the clock
async fn plant_session(redis: &mut redis::aio::ConnectionManager, record: &SessionRecord) {
    let payload = serde_json::to_string(record).unwrap();
    redis
        .set_ex::<_, _, ()>(session_key(&record.session_id), payload, 3600)
        .await
        .unwrap();
    redis
        .sadd::<_, _, ()>(index_key(&record.user_id), record.session_id.to_string())
        .await
        .unwrap();
}

#[tokio::test]
#[ignore = "needs Docker"]
async fn test_touch_slides_idle_deadline() {
    let store = common::start_redis().await;
    let user_id = Uuid::new_v4();

    let opened = SessionService::open(store.conn.clone(), common::policy(), &user_id, "judge")
        .await
        .unwrap();
    let touched = SessionService::touch(store.conn.clone(), common::policy(), &opened.session_id)
        .await
        .unwrap();

    assert_eq!(touched.created_at, opened.created_at);
    assert!(touched.last_seen_at >= opened.last_seen_at);
    assert_eq!(touched.role, "judge");

    let mut conn = store.conn.clone();
    let ttl: i64 = conn.ttl(session_key(&opened.session_id)).await.unwrap();
    assert!(ttl > 0 && ttl <= 30 * 60);
}

#[tokio::test]
#[ignore = "needs Docker"]
async fn test_idle_expired_session_is_deleted() {
    let store = common::start_redis().await;
    let mut conn = store.conn.clone();

    let mut record = SessionRecord::new(Uuid::new_v4(), "participant", Utc::now() - Duration::hours(1));
    record.last_seen_at = Utc::now() - Duration::minutes(31);
    plant_session(&mut conn, &record).await;

    let result = SessionService::touch(store.conn.clone(), common::policy(), &record.session_id).await;
    assert!(matches!(result, Err(AppError::SessionExpired)));

    let exists: bool = conn.exists(session_key(&record.session_id)).await.unwrap();
    assert!(!exists);
    let still_indexed: bool = conn
        .sismember(index_key(&record.user_id), record.session_id.to_string())
        .await
        .unwrap();
    assert!(!still_indexed);
}

#[tokio::test]
#[ignore = "needs Docker"]
async fn test_absolute_expired_session_is_deleted_despite_activity() {
    let store = common::start_redis().await;
    let mut conn = store.conn.clone();

    let mut record = SessionRecord::new(Uuid::new_v4(), "host", Utc::now() - Duration::hours(9));
    record.last_seen_at = Utc::now() - Duration::minutes(1);
    plant_session(&mut conn, &record).await;

    let result = SessionService::touch(store.conn.clone(), common::policy(), &record.session_id).await;
    assert!(matches!(result, Err(AppError::SessionExpired)));

    let exists: bool = conn.exists(session_key(&record.session_id)).await.unwrap();
    assert!(!exists);
}

#[tokio::test]
#[ignore = "needs Docker"]
async fn test_unknown_session_is_expired() {
    let store = common::start_redis().await;

    let result = SessionService::touch(store.conn.clone(), common::policy(), &Uuid::new_v4()).await;
    assert!(matches!(result, Err(AppError::SessionExpired)));
}

#[tokio::test]
#[ignore = "needs Docker"]
async fn test_revoke_all_clears_sessions_and_index() {
    let store = common::start_redis().await;
    let mut conn = store.conn.clone();
    let user_id = Uuid::new_v4();

    let first = SessionService::open(store.conn.clone(), common::policy(), &user_id, "participant")
        .await
        .unwrap();
    let second = SessionService::open(store.conn.clone(), common::policy(), &user_id, "participant")
        .await
        .unwrap();

    let removed = SessionService::revoke_all(store.conn.clone(), &user_id).await.unwrap();
    assert_eq!(removed, 2);

    for session_id in [first.session_id, second.session_id] {
        let exists: bool = conn.exists(session_key(&session_id)).await.unwrap();
        assert!(!exists);
    }
    let index_exists: bool = conn.exists(index_key(&user_id)).await.unwrap();
    assert!(!index_exists);
}

#[tokio::test]
#[ignore = "needs Docker"]
async fn test_open_prunes_lapsed_session_ids() {
    let store = common::start_redis().await;
    let mut conn = store.conn.clone();
    let user_id = Uuid::new_v4();

    // Ids whose session keys already lapsed through TTL
    for _ in 0..3 {
        conn.sadd::<_, _, ()>(index_key(&user_id), Uuid::new_v4().to_string())
            .await
            .unwrap();
    }

    let opened = SessionService::open(store.conn.clone(), common::policy(), &user_id, "participant")
        .await
        .unwrap();

    let members: Vec<String> = conn.smembers(index_key(&user_id)).await.unwrap();
    assert_eq!(members, vec![opened.session_id.to_string()]);
}

#[tokio::test]
#[ignore = "needs Docker"]
async fn test_refresh_on_expired_session_fails_and_burns_token() {
    let store = common::start_redis().await;
    let mut conn = store.conn.clone();

    let mut record = SessionRecord::new(Uuid::new_v4(), "participant", Utc::now() - Duration::hours(2));
    record.last_seen_at = Utc::now() - Duration::hours(1);
    plant_session(&mut conn, &record).await;

    let token = "stale-refresh-token";
    let refresh_key = format!("{}:{}", redis_keys::REFRESH_TOKEN, hash_string(token));
    conn.set_ex::<_, _, ()>(
        &refresh_key,
        format!("{}:{}", record.user_id, record.session_id),
        3600,
    )
    .await
    .unwrap();

    // The session check fails before the database is consulted
    let pool = PgPool::connect_lazy("postgres://unused@localhost/unused").unwrap();
    let result = AuthService::refresh(
        &pool,
        store.conn.clone(),
        &common::config(),
        common::policy(),
        token,
    )
    .await;
    assert!(matches!(result, Err(AppError::SessionExpired)));

    let token_left: bool = conn.exists(&refresh_key).await.unwrap();
    assert!(!token_left);
    let session_left: bool = conn.exists(session_key(&record.session_id)).await.unwrap();
    assert!(!session_left);
}
