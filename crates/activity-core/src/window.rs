use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Recency filter expressed in whole days before "now"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeWindow(u32);

impl TimeWindow {
    pub const fn days(days: u32) -> Self {
        TimeWindow(days)
    }

    pub fn as_days(&self) -> u32 {
        self.0
    }

    /// Earliest timestamp still inside the window
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(i64::from(self.0))
    }

    /// True when `timestamp` is at or after `now - days`
    pub fn includes(&self, timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        timestamp >= self.cutoff(now)
    }
}

/// Keep only the records whose timestamp falls inside `window`.
///
/// With no window every record is kept; order is preserved.
pub fn retain_within<T, F>(
    records: Vec<T>,
    window: Option<TimeWindow>,
    now: DateTime<Utc>,
    timestamp: F,
) -> Vec<T>
where
    F: Fn(&T) -> DateTime<Utc>,
{
    match window {
        None => records,
        Some(window) => records
            .into_iter()
            .filter(|record| window.includes(timestamp(record), now))
            .collect(),
    }
}
