//! Booking-time re-validation of a chosen slot.
//!
//! Between rendering the slot list and persisting a booking there is a race
//! window; the submission flow re-fetches busy intervals and asks this module
//! whether the chosen start is still bookable. The checks mirror the
//! generator exactly, so a slot is `Available` here iff [`generate_slots_at`]
//! would have emitted it as available against the same inputs.
//!
//! [`generate_slots_at`]: crate::generate::generate_slots_at

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::generate::{BusyInterval, MIN_LEAD_MINUTES};
use crate::rule::{parse_wall_clock, AvailabilityRule};

/// Outcome of re-validating one chosen slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    Available,
    /// The effective window overlaps a busy interval.
    Busy,
    /// The slot starts inside the minimum lead window.
    TooSoon,
    /// The start is not one of the rule's candidate slots for that day.
    OutsideHours,
}

/// Map a rendered "HH:MM" label back to the absolute start it denotes on
/// `date`.
///
/// For overnight rules, labels numerically earlier in the clock than the
/// rule's `start_hour` belong to the next calendar day (a "01:00" slot of a
/// 22:00-02:00 window starts the morning after `date`).
pub fn resolve_slot_start(
    date: NaiveDate,
    rule: &AvailabilityRule,
    label: &str,
) -> Result<NaiveDateTime> {
    let time = parse_wall_clock(label)?;
    let start_time = parse_wall_clock(&rule.start_hour)?;
    let end_time = parse_wall_clock(&rule.end_hour)?;

    let mut start = date.and_time(time);
    if end_time < start_time && time < start_time {
        start += Duration::days(1);
    }
    Ok(start)
}

/// Re-validate a chosen slot start against a fresh busy snapshot.
///
/// Returns `OutsideHours` when `start` does not land on the rule's step grid
/// within the day's work window; otherwise `Busy` on an effective-window
/// collision, then `TooSoon` under the lead cutoff, else `Available`.
/// Precedence is exactly that order.
pub fn verify_slot(
    date: NaiveDate,
    rule: &AvailabilityRule,
    busy: &[BusyInterval],
    start: NaiveDateTime,
    now: NaiveDateTime,
) -> Result<SlotStatus> {
    rule.validate()?;
    let (work_start, work_end) = rule.work_window(date)?;

    let slot_len = rule.slot_len();
    let step = rule.step();

    let offset = start - work_start;
    let on_grid = offset >= Duration::zero()
        && offset.num_seconds() % step.num_seconds() == 0
        && start + slot_len <= work_end;
    if !on_grid {
        return Ok(SlotStatus::OutsideHours);
    }

    let effective_start = start - Duration::minutes(rule.buffer_before as i64);
    let effective_end = start + slot_len;
    if busy
        .iter()
        .any(|b| effective_start < b.end_time && effective_end > b.start_time)
    {
        return Ok(SlotStatus::Busy);
    }

    if start < now + Duration::minutes(MIN_LEAD_MINUTES) {
        return Ok(SlotStatus::TooSoon);
    }

    Ok(SlotStatus::Available)
}
