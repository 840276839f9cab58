//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;
use std::time::Instant;

use redis::aio::ConnectionManager;
use sqlx::PgPool;

use crate::{config::Config, services::session_service::SessionPolicy};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Database connection pool
    pub db: PgPool,

    /// Redis connection manager (sessions, refresh tokens, rate limits)
    pub redis: ConnectionManager,

    /// Application configuration
    pub config: Config,

    /// Session timeout policy derived from configuration
    pub session_policy: SessionPolicy,

    /// Process start, used for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    /// Create a new application state
    pub fn new(db: PgPool, redis: ConnectionManager, config: Config) -> Self {
        let session_policy = SessionPolicy::from_config(&config.session);

        Self {
            inner: Arc::new(AppStateInner {
                db,
                redis,
                config,
                session_policy,
                started_at: Instant::now(),
            }),
        }
    }

    /// Get a reference to the database pool
    pub fn db(&self) -> &PgPool {
        &self.inner.db
    }

    /// Get a clone of the Redis connection manager
    pub fn redis(&self) -> ConnectionManager {
        self.inner.redis.clone()
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the session timeout policy
    pub fn session_policy(&self) -> SessionPolicy {
        self.inner.session_policy
    }

    /// Seconds since the state was created
    pub fn uptime_seconds(&self) -> u64 {
        self.inner.started_at.elapsed().as_secs()
    }
}
