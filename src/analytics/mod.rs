//! Dashboard analytics
//!
//! Pure aggregation routines that reduce raw rows into the metrics shown on
//! host and admin dashboards. Nothing in here performs I/O; the services
//! fetch the rows and hand them over.

pub mod contest;
pub mod platform;
pub mod series;

pub use contest::{contest_metrics, ContestMetrics, ScoreRow, SubmissionRow};
pub use platform::{platform_metrics, ActivityRow, ContestRow, PlatformMetrics, UserRow};
pub use series::{daily_series, AnalyticsWindow, DailyCount};

/// Round to the given number of decimal places
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
