//! Benchmark: slot generation over a dense day.
//!
//! A 24-hour window of 5-minute slots (288 candidates) checked against 50
//! busy intervals approximates the worst realistic booking-page request.

use std::hint::black_box;

use chrono::{Duration, NaiveDate};
use criterion::{criterion_group, criterion_main, Criterion};
use slot_engine::{generate_slots_at, AvailabilityRule, BusyInterval};

fn dense_day(c: &mut Criterion) {
    let date = NaiveDate::from_ymd_opt(2030, 6, 15).unwrap();
    let rule = AvailabilityRule {
        start_hour: "00:00".to_string(),
        end_hour: "23:59".to_string(),
        slot_duration: 5,
        buffer_before: 5,
        buffer_after: 0,
    };

    let midnight = date.and_hms_opt(0, 0, 0).unwrap();
    let busy: Vec<BusyInterval> = (0..50)
        .map(|i| BusyInterval {
            start_time: midnight + Duration::minutes(i * 25),
            end_time: midnight + Duration::minutes(i * 25 + 10),
        })
        .collect();
    let now = midnight - Duration::days(1);

    c.bench_function("generate_slots dense day", |b| {
        b.iter(|| {
            generate_slots_at(
                black_box(date),
                black_box(&rule),
                black_box(&busy),
                black_box(now),
            )
            .unwrap()
        })
    });
}

criterion_group!(benches, dense_day);
criterion_main!(benches);
