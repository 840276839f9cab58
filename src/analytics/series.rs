//! Time windows and zero-filled daily series

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::constants::MAX_ANALYTICS_WINDOW_DAYS;

/// Closed time window an aggregation covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyticsWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl AnalyticsWindow {
    /// The last `days` calendar days (UTC) up to and including `now`.
    ///
    /// `days` is clamped to `1..=MAX_ANALYTICS_WINDOW_DAYS`.
    pub fn last_days(days: i64, now: DateTime<Utc>) -> Self {
        let days = days.clamp(1, MAX_ANALYTICS_WINDOW_DAYS);
        let first_day = now.date_naive() - Duration::days(days - 1);
        let start = first_day
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc())
            .unwrap_or(now);

        Self { start, end: now }
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.start && ts <= self.end
    }

    pub fn first_day(&self) -> NaiveDate {
        self.start.date_naive()
    }

    pub fn last_day(&self) -> NaiveDate {
        self.end.date_naive()
    }

    /// Number of calendar days covered
    pub fn day_count(&self) -> i64 {
        (self.last_day() - self.first_day()).num_days() + 1
    }
}

/// Number of events on one UTC day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u64,
}

/// Count timestamps per UTC day over `[from, to]`, filling empty days with zero.
///
/// Timestamps outside the range are ignored. An inverted range yields an
/// empty series.
pub fn daily_series<I>(timestamps: I, from: NaiveDate, to: NaiveDate) -> Vec<DailyCount>
where
    I: IntoIterator<Item = DateTime<Utc>>,
{
    if from > to {
        return Vec::new();
    }

    let days = (to - from).num_days() as usize + 1;
    let mut counts = vec![0u64; days];

    for ts in timestamps {
        let day = ts.date_naive();
        if day < from || day > to {
            continue;
        }
        counts[(day - from).num_days() as usize] += 1;
    }

    from.iter_days()
        .zip(counts)
        .map(|(date, count)| DailyCount { date, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_daily_series_zero_fills_and_ignores_outside() {
        let series = daily_series(
            vec![
                at(2026, 5, 1, 9),
                at(2026, 5, 1, 23),
                at(2026, 5, 3, 0),
                at(2026, 4, 30, 23), // before the range
                at(2026, 5, 4, 0),   // after the range
            ],
            day(2026, 5, 1),
            day(2026, 5, 3),
        );

        let counts: Vec<u64> = series.iter().map(|d| d.count).collect();
        assert_eq!(counts, vec![2, 0, 1]);
        assert_eq!(series[0].date, day(2026, 5, 1));
        assert_eq!(series[2].date, day(2026, 5, 3));
    }

    #[test]
    fn test_daily_series_inverted_range_is_empty() {
        assert!(daily_series(vec![at(2026, 5, 1, 0)], day(2026, 5, 2), day(2026, 5, 1)).is_empty());
    }

    #[test]
    fn test_daily_series_single_day() {
        let series = daily_series(Vec::new(), day(2026, 1, 1), day(2026, 1, 1));
        assert_eq!(series, vec![DailyCount { date: day(2026, 1, 1), count: 0 }]);
    }

    #[test]
    fn test_window_last_days() {
        let now = at(2026, 5, 10, 15);
        let window = AnalyticsWindow::last_days(7, now);

        assert_eq!(window.first_day(), day(2026, 5, 4));
        assert_eq!(window.last_day(), day(2026, 5, 10));
        assert_eq!(window.day_count(), 7);
        assert!(window.contains(at(2026, 5, 4, 0)));
        assert!(!window.contains(at(2026, 5, 3, 23)));
        assert!(!window.contains(at(2026, 5, 10, 16)));
    }

    #[test]
    fn test_window_clamps_length() {
        let now = at(2026, 5, 10, 15);
        assert_eq!(AnalyticsWindow::last_days(0, now).day_count(), 1);
        assert_eq!(
            AnalyticsWindow::last_days(10_000, now).day_count(),
            MAX_ANALYTICS_WINDOW_DAYS
        );
    }
}
