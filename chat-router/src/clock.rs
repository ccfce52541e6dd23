//! Wall-clock source for the date/time path and search annotation.

use chrono::{DateTime, FixedOffset, Local};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Local time of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// Human-readable pieces of an instant: `17 October 2026`, `Saturday`, `09:05 AM`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeInfo {
    pub date: String,
    pub day: String,
    pub time: String,
}

impl DateTimeInfo {
    pub fn from_datetime(now: &DateTime<FixedOffset>) -> Self {
        Self {
            date: now.format("%d %B %Y").to_string(),
            day: now.format("%A").to_string(),
            time: now.format("%I:%M %p").to_string(),
        }
    }

    /// Answer for the date/time path.
    pub fn answer(&self) -> String {
        format!(
            "Today is {}, {}. The time is {}.",
            self.day, self.date, self.time
        )
    }
}
