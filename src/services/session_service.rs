//! Session service
//!
//! Login sessions live in Redis as JSON records keyed by session id. Every
//! authenticated request touches its session: the record is checked against
//! the idle and absolute timeouts, then either refreshed or dropped.

use chrono::{DateTime, Duration, Utc};
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::{
    config::SessionConfig,
    constants::redis_keys,
    error::{AppError, AppResult},
};

/// Idle and absolute limits on a login session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    pub idle_timeout: Duration,
    pub absolute_timeout: Duration,
}

/// Outcome of checking a session against the policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    IdleExpired,
    AbsoluteExpired,
}

/// Session record stored in Redis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_id: Uuid,
    pub user_id: Uuid,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn new(user_id: Uuid, role: &str, now: DateTime<Utc>) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            user_id,
            role: role.to_string(),
            created_at: now,
            last_seen_at: now,
        }
    }
}

impl SessionPolicy {
    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            idle_timeout: config.idle_timeout(),
            absolute_timeout: config.absolute_timeout(),
        }
    }

    /// Check a record at `now`. The absolute limit wins over the idle one.
    pub fn evaluate(&self, record: &SessionRecord, now: DateTime<Utc>) -> SessionState {
        if now - record.created_at >= self.absolute_timeout {
            SessionState::AbsoluteExpired
        } else if now - record.last_seen_at >= self.idle_timeout {
            SessionState::IdleExpired
        } else {
            SessionState::Active
        }
    }

    /// Time until the record expires if left untouched, never below one second
    pub fn remaining(&self, record: &SessionRecord, now: DateTime<Utc>) -> Duration {
        let idle_left = record.last_seen_at + self.idle_timeout - now;
        let absolute_left = record.created_at + self.absolute_timeout - now;
        idle_left.min(absolute_left).max(Duration::seconds(1))
    }
}

fn session_key(session_id: &Uuid) -> String {
    format!("{}:{}", redis_keys::SESSION, session_id)
}

fn user_sessions_key(user_id: &Uuid) -> String {
    format!("{}:{}", redis_keys::USER_SESSIONS, user_id)
}

/// Session service for login session lifecycle
pub struct SessionService;

impl SessionService {
    /// Open a new session for a user
    pub async fn open(
        mut redis: ConnectionManager,
        policy: SessionPolicy,
        user_id: &Uuid,
        role: &str,
    ) -> AppResult<SessionRecord> {
        let record = SessionRecord::new(*user_id, role, Utc::now());
        Self::store(&mut redis, policy, &record).await?;

        let index = user_sessions_key(user_id);
        let pruned = Self::prune_index(&mut redis, &index).await?;
        redis
            .sadd::<_, _, ()>(&index, record.session_id.to_string())
            .await?;
        redis
            .expire::<_, ()>(&index, policy.absolute_timeout.num_seconds())
            .await?;

        debug!(user_id = %user_id, session_id = %record.session_id, pruned, "Session opened");
        Ok(record)
    }

    /// Validate a session and slide its idle deadline forward
    pub async fn touch(
        mut redis: ConnectionManager,
        policy: SessionPolicy,
        session_id: &Uuid,
    ) -> AppResult<SessionRecord> {
        let key = session_key(session_id);
        let raw: Option<String> = redis.get(&key).await?;

        let Some(raw) = raw else {
            debug!(session_id = %session_id, "Session not found");
            return Err(AppError::SessionExpired);
        };

        let mut record: SessionRecord = serde_json::from_str(&raw)?;
        let now = Utc::now();

        match policy.evaluate(&record, now) {
            SessionState::Active => {
                record.last_seen_at = now;
                Self::store(&mut redis, policy, &record).await?;
                Ok(record)
            }
            state => {
                debug!(session_id = %session_id, state = ?state, "Session expired");
                Self::revoke(redis, &record.user_id, session_id).await?;
                Err(AppError::SessionExpired)
            }
        }
    }

    /// End a single session
    pub async fn revoke(
        mut redis: ConnectionManager,
        user_id: &Uuid,
        session_id: &Uuid,
    ) -> AppResult<()> {
        redis.del::<_, ()>(session_key(session_id)).await?;
        redis
            .srem::<_, _, ()>(user_sessions_key(user_id), session_id.to_string())
            .await?;
        Ok(())
    }

    /// End every session of a user, returning how many live sessions were removed
    pub async fn revoke_all(mut redis: ConnectionManager, user_id: &Uuid) -> AppResult<usize> {
        let index = user_sessions_key(user_id);
        let session_ids: Vec<String> = redis.smembers(&index).await?;

        let mut removed = 0;
        for session_id in &session_ids {
            removed += redis
                .del::<_, usize>(format!("{}:{}", redis_keys::SESSION, session_id))
                .await?;
        }
        redis.del::<_, ()>(&index).await?;

        debug!(user_id = %user_id, count = removed, "Revoked all sessions");
        Ok(removed)
    }

    /// Drop ids whose session keys have lapsed from a user's index
    async fn prune_index(redis: &mut ConnectionManager, index: &str) -> AppResult<usize> {
        let session_ids: Vec<String> = redis.smembers(index).await?;

        let mut pruned = 0;
        for session_id in &session_ids {
            let alive: bool = redis
                .exists(format!("{}:{}", redis_keys::SESSION, session_id))
                .await?;
            if !alive {
                redis.srem::<_, _, ()>(index, session_id).await?;
                pruned += 1;
            }
        }
        Ok(pruned)
    }

    async fn store(
        redis: &mut ConnectionManager,
        policy: SessionPolicy,
        record: &SessionRecord,
    ) -> AppResult<()> {
        let ttl = policy.remaining(record, Utc::now()).num_seconds() as u64;
        let payload = serde_json::to_string(record)?;
        redis
            .set_ex::<_, _, ()>(session_key(&record.session_id), payload, ttl)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn policy() -> SessionPolicy {
        SessionPolicy {
            idle_timeout: Duration::minutes(30),
            absolute_timeout: Duration::hours(8),
        }
    }

    fn record_at(created: DateTime<Utc>) -> SessionRecord {
        SessionRecord::new(Uuid::new_v4(), "participant", created)
    }

    #[test]
    fn test_active_within_limits() {
        let t0 = Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).unwrap();
        let record = record_at(t0);

        assert_eq!(policy().evaluate(&record, t0), SessionState::Active);
        assert_eq!(
            policy().evaluate(&record, t0 + Duration::minutes(29)),
            SessionState::Active
        );
    }

    #[test]
    fn test_idle_expiry_is_inclusive() {
        let t0 = Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).unwrap();
        let record = record_at(t0);

        assert_eq!(
            policy().evaluate(&record, t0 + Duration::minutes(30)),
            SessionState::IdleExpired
        );
    }

    #[test]
    fn test_absolute_expiry_despite_activity() {
        let t0 = Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).unwrap();
        let mut record = record_at(t0);
        record.last_seen_at = t0 + Duration::hours(8) - Duration::minutes(1);

        assert_eq!(
            policy().evaluate(&record, t0 + Duration::hours(8)),
            SessionState::AbsoluteExpired
        );
        assert_eq!(
            policy().evaluate(&record, t0 + Duration::hours(8) - Duration::seconds(1)),
            SessionState::Active
        );
    }

    #[test]
    fn test_remaining_takes_nearest_deadline() {
        let t0 = Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).unwrap();
        let mut record = record_at(t0);

        assert_eq!(policy().remaining(&record, t0), Duration::minutes(30));

        record.last_seen_at = t0 + Duration::hours(7) + Duration::minutes(50);
        let now = record.last_seen_at;
        assert_eq!(policy().remaining(&record, now), Duration::minutes(10));

        // Past both deadlines the floor applies
        assert_eq!(
            policy().remaining(&record, t0 + Duration::days(2)),
            Duration::seconds(1)
        );
    }
}
