//! Temporal sampler.
//!
//! All samples share one anchored `now`, captured when the clock is built,
//! so every timestamp in a run falls inside the same window.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::Rng;
use seed_core::Timestamp;

#[derive(Debug, Clone, Copy)]
pub struct Clock {
    now: Timestamp,
}

impl Clock {
    /// Anchor the clock at `now`, truncated to whole seconds.
    pub fn new(now: Timestamp) -> Self {
        Self {
            now: DateTime::from_timestamp(now.timestamp(), 0).unwrap_or(now),
        }
    }

    /// Anchor the clock at the current wall-clock time.
    pub fn system() -> Self {
        Self::new(Utc::now())
    }

    pub fn now(&self) -> Timestamp {
        self.now
    }

    /// Uniform timestamp in `[now - window_days, now]`.
    pub fn recent<R: Rng>(&self, rng: &mut R, window_days: u32) -> Timestamp {
        let end_ts = self.now.timestamp();
        let start_ts = end_ts - i64::from(window_days) * 86_400;
        let random_ts = rng.gen_range(start_ts..=end_ts);
        DateTime::from_timestamp(random_ts, 0).unwrap_or(self.now)
    }

    /// A `recent` sample clamped so it never precedes `floor`.
    pub fn after<R: Rng>(&self, rng: &mut R, floor: Timestamp, window_days: u32) -> Timestamp {
        self.recent(rng, window_days).max(floor)
    }
}

/// Calendar date `days` away from `anchor`.
pub fn offset_date(anchor: Timestamp, days: i64) -> NaiveDate {
    (anchor + Duration::days(days)).date_naive()
}
