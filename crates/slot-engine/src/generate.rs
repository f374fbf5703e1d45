//! Slot generation -- rule + busy intervals → ordered list of candidate slots.
//!
//! Walks the day's work window in fixed steps, marking each candidate slot
//! unavailable when it collides with a busy interval or starts inside the
//! minimum lead window. Collision checks use open-interval semantics: touching
//! endpoints never collide.

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::rule::AvailabilityRule;

/// Minimum lead time, in minutes, between "now" and a bookable slot start.
///
/// A slot starting earlier than `now + MIN_LEAD_MINUTES` is reported
/// unavailable regardless of the busy intervals. Policy constant, not
/// per-rule configuration.
pub const MIN_LEAD_MINUTES: i64 = 30;

/// An interval already occupied on the calendar, local wall clock.
///
/// Intervals are an unordered set and may overlap each other; the generator
/// checks each candidate against every interval independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

/// One candidate appointment slot in the generated list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Rendered wall-clock start label, e.g. "09:00". For overnight windows
    /// the labels past midnight belong to the next calendar day.
    pub time: String,
    pub available: bool,
}

/// Generate the slot list for `date`, snapshotting the local clock once.
///
/// Convenience wrapper over [`generate_slots_at`]; production callers that
/// need reproducible output (or tests) should pass an explicit `now`.
pub fn generate_slots(
    date: NaiveDate,
    rule: &AvailabilityRule,
    busy: &[BusyInterval],
) -> Result<Vec<TimeSlot>> {
    generate_slots_at(date, rule, busy, Local::now().naive_local())
}

/// Generate the slot list for `date` against an explicit `now` snapshot.
///
/// Candidate slots start at the rule's `start_hour` and advance by
/// `slot_duration + buffer_after` minutes while a full slot still fits before
/// `end_hour` (rolled past midnight when the rule is overnight). Each slot is
/// flagged:
///
/// - **busy** when its effective window `[start - buffer_before,
///   start + slot_duration)` truly overlaps any busy interval
///   (`effective_start < busy.end_time && effective_end > busy.start_time`);
/// - **too soon** when the slot starts before `now + MIN_LEAD_MINUTES`.
///
/// `available` is the conjunction of neither. A work window shorter than one
/// slot yields an empty list, not an error.
///
/// # Errors
/// Returns [`crate::SlotError::InvalidHour`] for unparseable rule hours and
/// [`crate::SlotError::InvalidDuration`] for a zero slot duration.
pub fn generate_slots_at(
    date: NaiveDate,
    rule: &AvailabilityRule,
    busy: &[BusyInterval],
    now: NaiveDateTime,
) -> Result<Vec<TimeSlot>> {
    rule.validate()?;
    let (work_start, work_end) = rule.work_window(date)?;

    let slot_len = rule.slot_len();
    let step = rule.step();
    let buffer_before = Duration::minutes(rule.buffer_before as i64);
    let lead_cutoff = now + Duration::minutes(MIN_LEAD_MINUTES);

    let mut slots = Vec::new();
    let mut cursor = work_start;

    while cursor + slot_len <= work_end {
        // buffer_after is already spent by the step size, so the effective
        // window only extends backwards by buffer_before.
        let effective_start = cursor - buffer_before;
        let effective_end = cursor + slot_len;

        let is_busy = busy
            .iter()
            .any(|b| effective_start < b.end_time && effective_end > b.start_time);
        let too_soon = cursor < lead_cutoff;

        slots.push(TimeSlot {
            time: cursor.format("%H:%M").to_string(),
            available: !is_busy && !too_soon,
        });

        cursor += step;
    }

    Ok(slots)
}
