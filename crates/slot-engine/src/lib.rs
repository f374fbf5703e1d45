//! # slot-engine
//!
//! Deterministic booking-slot generation for scheduling frontends.
//!
//! Given a calendar day, a working-hours rule (start/end wall-clock time,
//! slot duration, pre/post buffers), and a set of already-booked intervals,
//! the engine produces an ordered list of candidate appointment slots, each
//! flagged available or unavailable. The computation is pure: no I/O, no
//! shared state, safe to run once per incoming request.
//!
//! ## Modules
//!
//! - [`rule`] — availability rules and the per-day work window
//! - [`generate`] — rule + busy intervals → ordered slot list
//! - [`verify`] — booking-time re-validation of a chosen slot
//! - [`error`] — error types

pub mod error;
pub mod generate;
pub mod rule;
pub mod verify;

pub use error::SlotError;
pub use generate::{generate_slots, generate_slots_at, BusyInterval, TimeSlot, MIN_LEAD_MINUTES};
pub use rule::AvailabilityRule;
pub use verify::{resolve_slot_start, verify_slot, SlotStatus};
