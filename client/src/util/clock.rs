//! Wall-clock access and backend timestamp parsing.
//!
//! The backend emits naive local timestamps (`2024-01-15T10:30:00`,
//! sometimes with fractional seconds, sometimes without seconds) and
//! occasionally RFC 3339 with an offset. Naive values are interpreted in the
//! browser's local zone, which is what the original operators see.

#[cfg(test)]
#[path = "clock_test.rs"]
mod clock_test;

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// Milliseconds since the Unix epoch.
pub fn now_ms() -> i64 {
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_possible_truncation)]
        {
            js_sys::Date::now() as i64
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .ok()
            .and_then(|d| i64::try_from(d.as_millis()).ok())
            .unwrap_or(0)
    }
}

/// Minutes the local zone is behind UTC (JS `getTimezoneOffset` sign).
pub fn local_offset_minutes() -> i64 {
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_possible_truncation)]
        {
            js_sys::Date::new_0().get_timezone_offset() as i64
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        0
    }
}

fn parse_naive(s: &str) -> Option<PrimitiveDateTime> {
    let s = s.trim();
    PrimitiveDateTime::parse(
        s,
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"),
    )
    .or_else(|_| {
        PrimitiveDateTime::parse(
            s,
            format_description!("[year]-[month]-[day] [hour]:[minute]:[second][optional [.[subsecond]]]"),
        )
    })
    .or_else(|_| PrimitiveDateTime::parse(s, format_description!("[year]-[month]-[day]T[hour]:[minute]")))
    .ok()
}

fn local_offset(offset_minutes: i64) -> UtcOffset {
    i32::try_from(-offset_minutes * 60)
        .ok()
        .and_then(|secs| UtcOffset::from_whole_seconds(secs).ok())
        .unwrap_or(UtcOffset::UTC)
}

/// Parse a backend timestamp into the local wall-clock date-time.
pub fn parse_local(s: &str, offset_minutes: i64) -> Option<PrimitiveDateTime> {
    if let Ok(with_offset) = OffsetDateTime::parse(s.trim(), &Rfc3339) {
        let local = with_offset.to_offset(local_offset(offset_minutes));
        return Some(PrimitiveDateTime::new(local.date(), local.time()));
    }
    parse_naive(s)
}

/// Parse a backend timestamp into Unix milliseconds.
pub fn parse_timestamp_ms(s: &str, offset_minutes: i64) -> Option<i64> {
    let local = parse_local(s, offset_minutes)?;
    let utc = local.assume_offset(local_offset(offset_minutes));
    i64::try_from(utc.unix_timestamp_nanos() / 1_000_000).ok()
}

/// Parse a `YYYY-MM-DD` date input value.
pub fn parse_date(s: &str) -> Option<Date> {
    Date::parse(s.trim(), format_description!("[year]-[month]-[day]")).ok()
}

/// `HH:MM` for a backend timestamp, or the raw value when unparseable.
pub fn time_of_day(s: &str, offset_minutes: i64) -> String {
    parse_local(s, offset_minutes)
        .and_then(|dt| dt.format(format_description!("[hour]:[minute]")).ok())
        .unwrap_or_else(|| s.to_owned())
}

/// `DD/MM/YYYY HH:MM` for tables.
pub fn date_time(s: &str, offset_minutes: i64) -> String {
    parse_local(s, offset_minutes)
        .and_then(|dt| dt.format(format_description!("[day]/[month]/[year] [hour]:[minute]")).ok())
        .unwrap_or_else(|| s.to_owned())
}

/// Current local time as a `datetime-local` input value (`YYYY-MM-DDTHH:MM`).
pub fn now_input_value(now_ms: i64, offset_minutes: i64) -> String {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(now_ms) * 1_000_000)
        .ok()
        .map(|utc| utc.to_offset(local_offset(offset_minutes)))
        .and_then(|local| {
            local
                .format(format_description!("[year]-[month]-[day]T[hour]:[minute]"))
                .ok()
        })
        .unwrap_or_default()
}

/// Whole minutes between a backend timestamp and `now_ms`, clamped at zero.
pub fn minutes_since(s: &str, now_ms: i64, offset_minutes: i64) -> Option<i64> {
    let start = parse_timestamp_ms(s, offset_minutes)?;
    Some((now_ms - start).max(0) / 60_000)
}

/// RFC 3339 UTC timestamp, as sent in `hora_salida`.
pub fn iso_utc(now_ms: i64) -> String {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(now_ms) * 1_000_000)
        .ok()
        .and_then(|utc| utc.format(&Rfc3339).ok())
        .unwrap_or_default()
}
