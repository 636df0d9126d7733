// --- File: crates/clinic_common/src/timezone.rs ---
//! Civil time helpers.
//!
//! Every conversion between the clinic's wall clock and UTC goes through
//! [`local_to_utc`]: the wall-clock value is interpreted in the configured
//! IANA zone, an ambiguous value (clocks turned back) resolves to the earlier
//! instant, and a value skipped by a forward shift is rejected. Slot
//! generation, the availability query and the booking interval all use it.

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use crate::error::{config_error, validation_error, ClinicError};

/// Parses an IANA zone name such as `Asia/Kolkata`.
pub fn parse_time_zone(name: &str) -> Result<Tz, ClinicError> {
    name.parse::<Tz>()
        .map_err(|e| config_error(format!("unknown time zone '{}': {}", name, e)))
}

/// Parses a `YYYY-MM-DD` calendar day.
pub fn parse_calendar_date(input: &str) -> Result<NaiveDate, ClinicError> {
    let input = input.trim();
    if input.len() != 10 {
        return Err(validation_error(format!(
            "invalid date '{}', expected YYYY-MM-DD",
            input
        )));
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| {
        validation_error(format!("invalid date '{}', expected YYYY-MM-DD", input))
    })
}

/// Parses an `HH:MM` time of day.
pub fn parse_time_of_day(input: &str) -> Result<NaiveTime, ClinicError> {
    let input = input.trim();
    NaiveTime::parse_from_str(input, "%H:%M")
        .map_err(|_| validation_error(format!("invalid time '{}', expected HH:MM", input)))
}

/// Converts a wall-clock date and time in `tz` to UTC.
pub fn local_to_utc(tz: Tz, date: NaiveDate, time: NaiveTime) -> Result<DateTime<Utc>, ClinicError> {
    let naive = date.and_time(time);
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            validation_error(format!(
                "{} does not exist in {} (clock change)",
                naive.format("%Y-%m-%d %H:%M"),
                tz.name()
            ))
        })
}

/// `[local midnight, next local midnight)` of `date` in UTC.
pub fn local_day_bounds(tz: Tz, date: NaiveDate) -> Result<(DateTime<Utc>, DateTime<Utc>), ClinicError> {
    let next = date
        .succ_opt()
        .ok_or_else(|| validation_error(format!("date {} is out of range", date)))?;
    let start = local_to_utc(tz, date, NaiveTime::MIN)?;
    let end = local_to_utc(tz, next, NaiveTime::MIN)?;
    Ok((start, end))
}

/// The clinic's current calendar day.
pub fn today_in(tz: Tz, now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

/// `15:00` -> `3:00 PM`, `00:30` -> `12:30 AM`.
pub fn format_12h(time: NaiveTime) -> String {
    let hour = time.hour();
    let display_hour = match hour {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    let period = if hour < 12 { "AM" } else { "PM" };
    format!("{}:{:02} {}", display_hour, time.minute(), period)
}

/// `10:00 AM - 10:30 AM`
pub fn format_slot_label(start: NaiveTime, end: NaiveTime) -> String {
    format!("{} - {}", format_12h(start), format_12h(end))
}

/// `20/10/2026`, the short form used in notifications.
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%-d/%-m/%Y").to_string()
}

/// `Tuesday, 20 October 2026`
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %-d %B %Y").to_string()
}

/// UTC instant in the wire format, e.g. `2026-10-20T04:30:00.000Z`.
pub fn to_wire_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}
