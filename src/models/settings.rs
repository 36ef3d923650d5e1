//! Grid settings.
//!
//! The placement algorithms only read `court_count`. The time fields map
//! rows to wall-clock labels and bound the displayable rows; rows past the
//! end of the day remain valid placement targets (overflow).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

const MINUTES_PER_DAY: u32 = 24 * 60;

/// A time of day with minute resolution, written as `HH:MM`.
///
/// `24:00` is accepted as an end-of-day marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    minutes: u32,
}

impl TimeOfDay {
    /// Creates a time of day. Returns `None` past 24:00.
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        if minute >= 60 {
            return None;
        }
        let minutes = hour.checked_mul(60)?.checked_add(minute)?;
        (minutes <= MINUTES_PER_DAY).then_some(Self { minutes })
    }

    /// Minutes since midnight.
    #[inline]
    pub fn minutes(&self) -> u32 {
        self.minutes
    }
}

impl FromStr for TimeOfDay {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidTimeOfDay(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        let hour: u32 = h.parse().map_err(|_| invalid())?;
        let minute: u32 = m.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).ok_or_else(invalid)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(t: TimeOfDay) -> Self {
        t.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes / 60, self.minutes % 60)
    }
}

/// Grid dimensions and slot timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Number of courts (grid columns).
    pub court_count: usize,
    /// Length of one time slot (grid row) in minutes.
    pub slot_minutes: u32,
    /// Time of day of row 0.
    pub start_time: TimeOfDay,
    /// End of the displayable day.
    pub end_time: TimeOfDay,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            court_count: 8,
            slot_minutes: 30,
            start_time: TimeOfDay { minutes: 9 * 60 },
            end_time: TimeOfDay { minutes: 21 * 60 },
        }
    }
}

impl Settings {
    /// Sets the number of courts.
    pub fn with_court_count(mut self, court_count: usize) -> Self {
        self.court_count = court_count;
        self
    }

    /// Sets the slot length in minutes.
    pub fn with_slot_minutes(mut self, slot_minutes: u32) -> Self {
        self.slot_minutes = slot_minutes;
        self
    }

    /// Sets the start and end of the day.
    pub fn with_day(mut self, start_time: TimeOfDay, end_time: TimeOfDay) -> Self {
        self.start_time = start_time;
        self.end_time = end_time;
        self
    }

    /// Parses settings from JSON and validates them. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks that the grid has at least one court, slots have a length and
    /// the day ends after it starts.
    pub fn validate(&self) -> Result<()> {
        if self.court_count == 0 {
            return Err(Error::InvalidSettings("court count must be at least 1".into()));
        }
        if self.slot_minutes == 0 {
            return Err(Error::InvalidSettings("slot length must be at least 1 minute".into()));
        }
        if self.end_time <= self.start_time {
            return Err(Error::InvalidSettings(format!(
                "end time {} is not after start time {}",
                self.end_time, self.start_time
            )));
        }
        Ok(())
    }

    /// Number of rows that fit in the day. A trailing partial slot counts.
    pub fn row_count(&self) -> usize {
        if self.slot_minutes == 0 || self.end_time <= self.start_time {
            return 0;
        }
        let span = self.end_time.minutes() - self.start_time.minutes();
        span.div_ceil(self.slot_minutes) as usize
    }

    /// Minutes since midnight at which `row` starts. May exceed one day.
    pub fn row_start_minutes(&self, row: usize) -> u64 {
        self.start_time.minutes() as u64 + row as u64 * self.slot_minutes as u64
    }

    /// `HH:MM` label of a row, wrapping past midnight.
    pub fn row_label(&self, row: usize) -> String {
        let m = self.row_start_minutes(row) % MINUTES_PER_DAY as u64;
        format!("{:02}:{:02}", m / 60, m % 60)
    }

    /// Whether a row lies inside the displayable day.
    #[inline]
    pub fn is_displayable(&self, row: usize) -> bool {
        row < self.row_count()
    }
}
