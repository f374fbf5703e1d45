//! `slots` CLI — generate and re-validate booking slots from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Slot list for a day, rule from flags, busy intervals on stdin
//! echo '[]' | slots generate --start 09:00 --end 17:00 --duration 30 \
//!     --date 2030-06-15
//!
//! # Rule and busy intervals from files, rendered as text
//! slots generate --rule rule.json -i busy.json --format text
//!
//! # Resolve "now" and RFC 3339 timestamps in the organization's timezone
//! slots generate --rule rule.json -i busy.json --timezone Europe/Madrid
//!
//! # Re-validate one chosen slot before persisting a booking
//! slots check --rule rule.json -i busy.json --date 2030-06-15 --time 10:00
//! ```
//!
//! `check` exits 0 when the slot is still available, 2 when it is not, and 1
//! on input errors.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::io::{self, Read};
use std::process;

use slot_engine::{
    generate_slots_at, resolve_slot_start, verify_slot, AvailabilityRule, BusyInterval, SlotStatus,
};

#[derive(Parser)]
#[command(name = "slots", version, about = "Booking slot engine CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the slot list for a day
    Generate {
        #[command(flatten)]
        rule: RuleArgs,
        #[command(flatten)]
        clock: ClockArgs,
        /// Busy intervals JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Re-validate one chosen slot against a fresh busy snapshot
    Check {
        #[command(flatten)]
        rule: RuleArgs,
        #[command(flatten)]
        clock: ClockArgs,
        /// Chosen slot label (HH:MM), as rendered by `generate`
        #[arg(long)]
        time: String,
        /// Busy intervals JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
}

#[derive(Args)]
struct RuleArgs {
    /// Rule JSON file ({"start_hour", "end_hour", "slot_duration", ...})
    #[arg(long, conflicts_with_all = ["start", "end", "duration"])]
    rule: Option<String>,
    /// Wall-clock start of the working window (HH:MM or HH:MM:SS)
    #[arg(long, requires = "end", requires = "duration")]
    start: Option<String>,
    /// Wall-clock end of the working window; earlier than --start means the
    /// window rolls over midnight
    #[arg(long)]
    end: Option<String>,
    /// Slot duration in minutes
    #[arg(long)]
    duration: Option<u32>,
    /// Minutes that must be free before each slot
    #[arg(long, default_value_t = 0)]
    buffer_before: u32,
    /// Minutes of spacing after each slot
    #[arg(long, default_value_t = 0)]
    buffer_after: u32,
}

#[derive(Args)]
struct ClockArgs {
    /// Day to compute (YYYY-MM-DD; defaults to today in --timezone)
    #[arg(long)]
    date: Option<String>,
    /// IANA timezone fixing "now", the default date, and the wall clock that
    /// RFC 3339 busy timestamps are converted into
    #[arg(long, default_value = "UTC")]
    timezone: String,
    /// Clock override for reproducible output (YYYY-MM-DDTHH:MM:SS, wall
    /// clock in --timezone; defaults to the current time)
    #[arg(long)]
    now: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

/// Busy interval as it appears in JSON input, timestamps still unparsed.
#[derive(Deserialize)]
struct BusyIntervalInput {
    start_time: String,
    end_time: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            rule,
            clock,
            input,
            output,
            format,
        } => {
            let tz = parse_timezone(&clock.timezone)?;
            let now = resolve_now(clock.now.as_deref(), tz)?;
            let date = resolve_date(clock.date.as_deref(), now)?;
            let rule = build_rule(&rule)?;
            let busy = read_busy(input.as_deref(), tz)?;

            let slots = generate_slots_at(date, &rule, &busy, now)
                .context("Failed to generate slots")?;

            let rendered = match format {
                OutputFormat::Json => serde_json::to_string_pretty(&slots)?,
                OutputFormat::Text => slots
                    .iter()
                    .map(|s| {
                        format!(
                            "{}  {}",
                            s.time,
                            if s.available { "available" } else { "unavailable" }
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n"),
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Check {
            rule,
            clock,
            time,
            input,
            format,
        } => {
            let tz = parse_timezone(&clock.timezone)?;
            let now = resolve_now(clock.now.as_deref(), tz)?;
            let date = resolve_date(clock.date.as_deref(), now)?;
            let rule = build_rule(&rule)?;
            let busy = read_busy(input.as_deref(), tz)?;

            let start = resolve_slot_start(date, &rule, &time)
                .with_context(|| format!("Invalid slot time: {}", time))?;
            let status = verify_slot(date, &rule, &busy, start, now)
                .context("Failed to verify slot")?;

            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::json!({ "status": status }));
                }
                OutputFormat::Text => println!("{}", status_label(status)),
            }

            if status != SlotStatus::Available {
                process::exit(2);
            }
        }
    }

    Ok(())
}

fn status_label(status: SlotStatus) -> &'static str {
    match status {
        SlotStatus::Available => "available",
        SlotStatus::Busy => "busy",
        SlotStatus::TooSoon => "too_soon",
        SlotStatus::OutsideHours => "outside_hours",
    }
}

fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| anyhow::anyhow!("Unknown timezone: {}", name))
}

/// The "now" snapshot for this invocation: an explicit --now override, or the
/// current instant rendered as wall clock in the requested timezone.
fn resolve_now(now: Option<&str>, tz: Tz) -> Result<NaiveDateTime> {
    match now {
        Some(raw) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
            .with_context(|| format!("Invalid --now value: {}", raw)),
        None => Ok(Utc::now().with_timezone(&tz).naive_local()),
    }
}

fn resolve_date(date: Option<&str>, now: NaiveDateTime) -> Result<NaiveDate> {
    match date {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .with_context(|| format!("Invalid --date value: {}", raw)),
        None => Ok(now.date()),
    }
}

/// Build the rule from --rule or from the inline flags.
fn build_rule(args: &RuleArgs) -> Result<AvailabilityRule> {
    if let Some(path) = &args.rule {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rule file: {}", path))?;
        let rule: AvailabilityRule = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse rule file: {}", path))?;
        return Ok(rule);
    }

    match (&args.start, &args.end, args.duration) {
        (Some(start), Some(end), Some(duration)) => Ok(AvailabilityRule {
            start_hour: start.clone(),
            end_hour: end.clone(),
            slot_duration: duration,
            buffer_before: args.buffer_before,
            buffer_after: args.buffer_after,
        }),
        _ => bail!("Provide either --rule <file> or --start, --end, and --duration"),
    }
}

/// Read busy intervals from a file or stdin. Empty input means an empty
/// calendar, not an error.
fn read_busy(path: Option<&str>, tz: Tz) -> Result<Vec<BusyInterval>> {
    let raw = read_input(path)?;
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let inputs: Vec<BusyIntervalInput> =
        serde_json::from_str(&raw).context("Failed to parse busy intervals JSON")?;

    inputs
        .into_iter()
        .map(|b| {
            Ok(BusyInterval {
                start_time: parse_datetime_in(&b.start_time, tz)?,
                end_time: parse_datetime_in(&b.end_time, tz)?,
            })
        })
        .collect()
}

/// Parse a busy timestamp. RFC 3339 values are converted to `tz` and read as
/// wall clock; naive values pass through untouched.
fn parse_datetime_in(s: &str, tz: Tz) -> Result<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&tz).naive_local());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .with_context(|| format!("Invalid timestamp: {}", s))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
