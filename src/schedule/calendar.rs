use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{PollingSettings, ScheduleSettings};
use crate::models::{CompError, Result};

/// Half-open time interval: `from <= t < to`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl DateRange {
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.from <= t && t < self.to
    }

    pub fn is_over(&self, t: DateTime<Utc>) -> bool {
        t >= self.to
    }
}

/// Precomputed blitz schedule for the whole event: contiguous 24h day
/// boundaries subdivided into contiguous 10-minute blitz windows.
///
/// Built once from settings; every lookup after that is arithmetic on
/// the fixed grid.
#[derive(Debug, Clone)]
pub struct CompetitionCalendar {
    span: DateRange,
    days: Vec<DateRange>,
    windows: Vec<DateRange>,
    window_len: Duration,
    reload_skew: Duration,
}

impl CompetitionCalendar {
    pub fn new(schedule: &ScheduleSettings, polling: &PollingSettings) -> Result<Self> {
        let epoch = schedule.event_start_utc()?;
        let day_len = Duration::hours(24);
        let window_len = Duration::minutes(schedule.window_minutes as i64);
        let windows_per_day = (day_len.num_minutes() / window_len.num_minutes()) as usize;

        let days: Vec<DateRange> = (0..schedule.days)
            .map(|i| DateRange {
                from: epoch + day_len * i as i32,
                to: epoch + day_len * (i + 1) as i32,
            })
            .collect();

        let window_count = windows_per_day * schedule.days as usize;
        let windows: Vec<DateRange> = (0..window_count)
            .map(|i| DateRange {
                from: epoch + window_len * i as i32,
                to: epoch + window_len * (i + 1) as i32,
            })
            .collect();

        let last = days
            .last()
            .ok_or_else(|| CompError::ConfigError("schedule has no days".to_string()))?;

        Ok(Self {
            span: DateRange {
                from: epoch,
                to: last.to,
            },
            days,
            windows,
            window_len,
            reload_skew: Duration::seconds(polling.reload_skew_seconds as i64),
        })
    }

    /// Whole-event range.
    pub fn span(&self) -> DateRange {
        self.span
    }

    pub fn days(&self) -> &[DateRange] {
        &self.days
    }

    pub fn windows(&self) -> &[DateRange] {
        &self.windows
    }

    pub fn day(&self, index: usize) -> Option<DateRange> {
        self.days.get(index).copied()
    }

    pub fn windows_per_day(&self) -> usize {
        self.windows.len() / self.days.len()
    }

    /// Index of the blitz window containing `now`, or `None` when `now`
    /// precedes the first or follows the last window.
    pub fn window_index_at(&self, now: DateTime<Utc>) -> Option<usize> {
        if now < self.span.from || now >= self.span.to {
            return None;
        }
        let elapsed = now - self.span.from;
        let index = (elapsed.num_seconds() / self.window_len.num_seconds()) as usize;
        Some(index.min(self.windows.len() - 1))
    }

    /// Day containing `now`, clamped: before the event → day 0 (the
    /// initial UI selection), after the event → the last day.
    pub fn day_index_at(&self, now: DateTime<Utc>) -> usize {
        if now < self.span.from {
            return 0;
        }
        let elapsed = now - self.span.from;
        let index = (elapsed.num_hours() / 24) as usize;
        index.min(self.days.len() - 1)
    }

    /// Slot indices whose window starts inside the given day.
    pub fn window_indices_for_day(&self, day: usize) -> std::ops::Range<usize> {
        let per_day = self.windows_per_day();
        let start = day * per_day;
        start..(start + per_day).min(self.windows.len())
    }

    pub fn windows_for_day(&self, day: usize) -> &[DateRange] {
        &self.windows[self.window_indices_for_day(day)]
    }

    /// Delay until the next reload mark. Marks sit one skew past every
    /// window boundary (the next `:X1` minute for 10-minute windows),
    /// giving the backend time to publish before we re-poll. Always
    /// strictly positive.
    pub fn reload_delay(&self, now: DateTime<Utc>) -> std::time::Duration {
        let window = self.window_len.num_seconds();
        let since_epoch = (now - self.span.from).num_seconds();
        let k = (since_epoch - self.reload_skew.num_seconds()).div_euclid(window) + 1;
        let mark = k.max(0) * window + self.reload_skew.num_seconds();
        let delay = mark - since_epoch;
        std::time::Duration::from_secs(delay.max(1) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    fn calendar() -> CompetitionCalendar {
        let settings = Settings::default();
        CompetitionCalendar::new(&settings.schedule, &settings.polling).unwrap()
    }

    #[test]
    fn test_grid_shape() {
        let cal = calendar();
        assert_eq!(cal.days().len(), 7);
        assert_eq!(cal.windows_per_day(), 144);
        assert_eq!(cal.windows().len(), 7 * 144);
    }

    #[test]
    fn test_ranges_are_contiguous_and_ordered() {
        let cal = calendar();
        for w in cal.windows() {
            assert!(w.from < w.to);
        }
        for pair in cal.windows().windows(2) {
            assert_eq!(pair[0].to, pair[1].from);
        }
        assert_eq!(cal.windows()[0].from, cal.span().from);
        assert_eq!(cal.windows().last().unwrap().to, cal.span().to);
    }

    #[test]
    fn test_window_index_within_event() {
        let cal = calendar();
        let now = cal.span().from + Duration::minutes(25);
        let i = cal.window_index_at(now).unwrap();
        assert_eq!(i, 2);
        assert!(cal.windows()[i].contains(now));
    }

    #[test]
    fn test_window_index_sentinel_outside_event() {
        let cal = calendar();
        assert_eq!(cal.window_index_at(cal.span().from - Duration::seconds(1)), None);
        assert_eq!(cal.window_index_at(cal.span().to), None);
        // First instant is inside, last instant of the event is the last window.
        assert_eq!(cal.window_index_at(cal.span().from), Some(0));
        assert_eq!(
            cal.window_index_at(cal.span().to - Duration::seconds(1)),
            Some(cal.windows().len() - 1)
        );
    }

    #[test]
    fn test_day_index_clamps() {
        let cal = calendar();
        assert_eq!(cal.day_index_at(cal.span().from - Duration::days(3)), 0);
        assert_eq!(cal.day_index_at(cal.span().from + Duration::hours(30)), 1);
        assert_eq!(cal.day_index_at(cal.span().to + Duration::days(10)), 6);
    }

    #[test]
    fn test_window_indices_for_day() {
        let cal = calendar();
        assert_eq!(cal.window_indices_for_day(0), 0..144);
        assert_eq!(cal.window_indices_for_day(2), 288..432);
        assert_eq!(cal.windows_for_day(1).len(), 144);
    }

    #[test]
    fn test_reload_delay_three_minutes_past_boundary() {
        let cal = calendar();
        // 3 minutes past a window boundary: next mark is the :X1 after
        // the next boundary, 8 minutes away.
        let now = cal.span().from + Duration::minutes(23);
        assert_eq!(cal.reload_delay(now), std::time::Duration::from_secs(8 * 60));
    }

    #[test]
    fn test_reload_delay_before_the_mark() {
        let cal = calendar();
        // 30 seconds past a boundary is still before that boundary's
        // own mark at +60s.
        let now = cal.span().from + Duration::minutes(20) + Duration::seconds(30);
        assert_eq!(cal.reload_delay(now), std::time::Duration::from_secs(30));
    }

    #[test]
    fn test_reload_delay_is_positive_everywhere() {
        let cal = calendar();
        let probes = [
            cal.span().from - Duration::minutes(5),
            cal.span().from,
            cal.span().from + Duration::seconds(60),
            cal.span().from + Duration::seconds(61),
            cal.span().to,
        ];
        for now in probes {
            assert!(cal.reload_delay(now) >= std::time::Duration::from_secs(1));
        }
    }
}
