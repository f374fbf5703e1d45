//! Tests for rule parsing and the per-day work window.

use chrono::{NaiveDate, NaiveTime};
use slot_engine::rule::parse_wall_clock;
use slot_engine::{AvailabilityRule, SlotError};

fn day(year: i32, month: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, d).unwrap()
}

fn rule(start: &str, end: &str) -> AvailabilityRule {
    AvailabilityRule {
        start_hour: start.to_string(),
        end_hour: end.to_string(),
        slot_duration: 30,
        buffer_before: 0,
        buffer_after: 0,
    }
}

#[test]
fn wall_clock_accepts_both_formats() {
    assert_eq!(
        parse_wall_clock("09:00").unwrap(),
        NaiveTime::from_hms_opt(9, 0, 0).unwrap()
    );
    assert_eq!(
        parse_wall_clock("09:00:30").unwrap(),
        NaiveTime::from_hms_opt(9, 0, 30).unwrap()
    );
}

#[test]
fn wall_clock_rejects_garbage() {
    for bad in ["", "9am", "25:00", "09:61", "half past nine"] {
        let err = parse_wall_clock(bad).unwrap_err();
        assert!(
            matches!(err, SlotError::InvalidHour(_)),
            "{bad:?} should be InvalidHour"
        );
    }
}

#[test]
fn work_window_anchors_on_the_given_day() {
    let (start, end) = rule("09:00", "17:00").work_window(day(2030, 6, 15)).unwrap();

    assert_eq!(start, day(2030, 6, 15).and_hms_opt(9, 0, 0).unwrap());
    assert_eq!(end, day(2030, 6, 15).and_hms_opt(17, 0, 0).unwrap());
}

#[test]
fn work_window_rolls_over_midnight() {
    // End earlier in the clock than start: the window spans into the next day.
    let (start, end) = rule("22:00", "02:00").work_window(day(2030, 6, 15)).unwrap();

    assert_eq!(start, day(2030, 6, 15).and_hms_opt(22, 0, 0).unwrap());
    assert_eq!(end, day(2030, 6, 16).and_hms_opt(2, 0, 0).unwrap());
}

#[test]
fn equal_hours_give_zero_length_window() {
    // Equal start and end is an empty day, not a 24-hour rollover.
    let (start, end) = rule("09:00", "09:00").work_window(day(2030, 6, 15)).unwrap();

    assert_eq!(start, end);
}

#[test]
fn validate_rejects_zero_duration() {
    let mut r = rule("09:00", "17:00");
    r.slot_duration = 0;

    assert!(matches!(
        r.validate().unwrap_err(),
        SlotError::InvalidDuration(0)
    ));
}

#[test]
fn missing_buffers_deserialize_to_zero() {
    // Rule stores routinely omit buffer fields.
    let r: AvailabilityRule = serde_json::from_str(
        r#"{"start_hour":"09:00:00","end_hour":"17:00:00","slot_duration":30}"#,
    )
    .unwrap();

    assert_eq!(r.buffer_before, 0);
    assert_eq!(r.buffer_after, 0);
    r.validate().unwrap();
}
