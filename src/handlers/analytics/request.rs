//! Analytics request DTOs

use serde::Deserialize;

/// Analytics window selection
#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsQuery {
    /// Trailing window in days; clamped to the supported range
    pub days: Option<i64>,
}
