//! Availability rules -- working-hours configuration and the per-day work window.
//!
//! A rule stores wall-clock times as strings ("09:00" or "09:00:00"), the way
//! they arrive from rule stores and config files. Parsing happens at the point
//! of use and unparseable values surface as [`SlotError::InvalidHour`] rather
//! than being guessed at.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// Working-hours rule for one bookable resource.
///
/// `end_hour` may be numerically earlier in the clock than `start_hour`; that
/// signals a window rolling over midnight (e.g. 22:00-02:00). Buffers default
/// to zero when absent from serialized input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRule {
    /// Wall-clock start of the working window, "HH:MM" or "HH:MM:SS".
    pub start_hour: String,
    /// Wall-clock end of the working window, same format.
    pub end_hour: String,
    /// Visible length of each slot, in minutes. Must be positive.
    pub slot_duration: u32,
    /// Minutes that must be free before a slot starts.
    #[serde(default)]
    pub buffer_before: u32,
    /// Minutes of spacing after a slot ends, before the next may start.
    #[serde(default)]
    pub buffer_after: u32,
}

/// Parse a wall-clock time string, accepting "HH:MM" and "HH:MM:SS".
pub fn parse_wall_clock(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(|_| SlotError::InvalidHour(s.to_string()))
}

impl AvailabilityRule {
    /// Check the structural invariants that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.slot_duration == 0 {
            return Err(SlotError::InvalidDuration(self.slot_duration));
        }
        parse_wall_clock(&self.start_hour)?;
        parse_wall_clock(&self.end_hour)?;
        Ok(())
    }

    /// Anchor the rule's wall-clock hours on `date`, yielding the absolute
    /// work window for that day.
    ///
    /// When the end timestamp lands strictly before the start timestamp, the
    /// window rolls over midnight and the end advances by exactly one
    /// calendar day. Equal start and end produce a zero-length window, which
    /// downstream yields an empty slot list.
    pub fn work_window(&self, date: NaiveDate) -> Result<(NaiveDateTime, NaiveDateTime)> {
        let start = date.and_time(parse_wall_clock(&self.start_hour)?);
        let mut end = date.and_time(parse_wall_clock(&self.end_hour)?);
        if end < start {
            end += Duration::days(1);
        }
        Ok((start, end))
    }

    /// The spacing between consecutive slot starts: the visible duration plus
    /// the trailing buffer.
    pub(crate) fn step(&self) -> Duration {
        Duration::minutes((self.slot_duration + self.buffer_after) as i64)
    }

    pub(crate) fn slot_len(&self) -> Duration {
        Duration::minutes(self.slot_duration as i64)
    }
}
