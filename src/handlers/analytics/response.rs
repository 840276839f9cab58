//! Analytics response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    analytics::{AnalyticsWindow, ContestMetrics, PlatformMetrics},
    handlers::contests::response::ContestSummary,
};

/// Window an analytics response covers
#[derive(Debug, Serialize)]
pub struct WindowResponse {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub days: i64,
}

impl From<AnalyticsWindow> for WindowResponse {
    fn from(window: AnalyticsWindow) -> Self {
        Self {
            start: window.start,
            end: window.end,
            days: window.day_count(),
        }
    }
}

/// Host dashboard for a single contest
#[derive(Debug, Serialize)]
pub struct ContestAnalyticsResponse {
    pub contest: ContestSummary,
    pub window: WindowResponse,
    #[serde(flatten)]
    pub metrics: ContestMetrics,
}

/// Admin dashboard for the whole platform
#[derive(Debug, Serialize)]
pub struct PlatformAnalyticsResponse {
    pub window: WindowResponse,
    #[serde(flatten)]
    pub metrics: PlatformMetrics,
}
