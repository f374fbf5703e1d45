//! WASM bindings for slot-engine.
//!
//! Exposes slot generation and booking-time re-validation to JavaScript via
//! `wasm-bindgen`, for the public booking page. All complex types are passed
//! as JSON strings across the boundary. The clock stays explicit: JavaScript
//! supplies `now` (typically `new Date().toISOString()`), so a render and its
//! re-validation can share one snapshot.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/slot-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! # Rename .js -> .cjs for ESM compatibility
//! mv packages/slot-engine-js/wasm/slot_engine_wasm.js \
//!    packages/slot-engine-js/wasm/slot_engine_wasm.cjs
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use slot_engine::{
    generate_slots_at, resolve_slot_start, verify_slot, AvailabilityRule, BusyInterval,
};
use wasm_bindgen::prelude::*;

/// Busy interval as it arrives from JavaScript, timestamps still unparsed.
#[derive(Deserialize)]
struct BusyInput {
    start_time: String,
    end_time: String,
}

/// Parse a datetime string into the engine's local wall-clock model.
///
/// Accepts RFC 3339 ("2030-06-15T10:00:00Z") and naive local time
/// ("2030-06-15T10:00:00"). RFC 3339 values are taken at face wall-clock
/// value via their naive component; no offset conversion is attempted --
/// the JavaScript caller is responsible for supplying times in the
/// organization's zone.
fn parse_datetime(s: &str) -> Result<NaiveDateTime, JsValue> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map_err(|e| JsValue::from_str(&format!("Invalid datetime '{}': {}", s, e)))
}

fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| JsValue::from_str(&format!("Invalid date '{}': {}", s, e)))
}

fn parse_rule_json(json: &str) -> Result<AvailabilityRule, JsValue> {
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&format!("Invalid rule JSON: {}", e)))
}

/// Convert a JSON array of `{start_time, end_time}` objects into busy intervals.
fn parse_busy_json(json: &str) -> Result<Vec<BusyInterval>, JsValue> {
    let inputs: Vec<BusyInput> = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid busy intervals JSON: {}", e)))?;

    inputs
        .into_iter()
        .map(|input| {
            Ok(BusyInterval {
                start_time: parse_datetime(&input.start_time)?,
                end_time: parse_datetime(&input.end_time)?,
            })
        })
        .collect()
}

/// Generate the slot list for one day.
///
/// Returns a JSON string containing an array of `{time, available}` objects,
/// ordered chronologically.
///
/// # Arguments
/// - `rule_json` -- availability rule as JSON
///   (`{"start_hour", "end_hour", "slot_duration", "buffer_before", "buffer_after"}`)
/// - `date` -- day to compute, "YYYY-MM-DD"
/// - `busy_json` -- JSON array of `{start_time, end_time}` occupied intervals
/// - `now` -- the caller's clock snapshot, ISO 8601 datetime string
#[wasm_bindgen(js_name = "generateSlots")]
pub fn generate_slots(
    rule_json: &str,
    date: &str,
    busy_json: &str,
    now: &str,
) -> Result<String, JsValue> {
    let rule = parse_rule_json(rule_json)?;
    let date = parse_date(date)?;
    let busy = parse_busy_json(busy_json)?;
    let now = parse_datetime(now)?;

    let slots =
        generate_slots_at(date, &rule, &busy, now).map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_json::to_string(&slots)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Re-validate one chosen slot against a fresh busy snapshot.
///
/// `time_label` is an "HH:MM" label as rendered by [`generate_slots`]; for
/// overnight rules, labels earlier in the clock than the rule's start belong
/// to the next calendar day. Returns the status as a JSON string:
/// `"available"`, `"busy"`, `"too_soon"`, or `"outside_hours"`.
#[wasm_bindgen(js_name = "checkSlot")]
pub fn check_slot(
    rule_json: &str,
    date: &str,
    time_label: &str,
    busy_json: &str,
    now: &str,
) -> Result<String, JsValue> {
    let rule = parse_rule_json(rule_json)?;
    let date = parse_date(date)?;
    let busy = parse_busy_json(busy_json)?;
    let now = parse_datetime(now)?;

    let start = resolve_slot_start(date, &rule, time_label)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let status =
        verify_slot(date, &rule, &busy, start, now).map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_json::to_string(&status)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}
