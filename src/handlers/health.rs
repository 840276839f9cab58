//! Health check handlers

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use tracing::warn;

use crate::{constants::API_VERSION, db, state::AppState, utils::format_duration};

/// Liveness response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub api_version: &'static str,
    pub uptime: String,
}

/// Readiness response
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub database: bool,
    pub redis: bool,
}

/// Liveness probe
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        api_version: API_VERSION,
        uptime: format_duration(chrono::Duration::seconds(
            i64::try_from(state.uptime_seconds()).unwrap_or(i64::MAX),
        )),
    })
}

/// Readiness probe: Postgres and Redis both answer
async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let database = db::ping(state.db())
        .await
        .inspect_err(|e| warn!(error = %e, "Database readiness check failed"))
        .is_ok();

    let mut redis = state.redis();
    let redis = redis::cmd("PING")
        .query_async::<String>(&mut redis)
        .await
        .inspect_err(|e| warn!(error = %e, "Redis readiness check failed"))
        .is_ok();

    let ready = database && redis;
    let status = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };

    (
        status,
        Json(ReadinessResponse {
            status: if ready { "ready" } else { "degraded" },
            database,
            redis,
        }),
    )
}

/// Health routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
}
