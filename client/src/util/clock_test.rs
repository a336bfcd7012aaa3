use super::*;

// 2024-01-15T10:30:00Z
const JAN_15_1030_UTC_MS: i64 = 1_705_314_600_000;

#[test]
fn naive_timestamp_is_local_time() {
    assert_eq!(parse_timestamp_ms("2024-01-15T10:30:00", 0), Some(JAN_15_1030_UTC_MS));
    // UTC-5: local 10:30 is 15:30 UTC.
    assert_eq!(
        parse_timestamp_ms("2024-01-15T10:30:00", 300),
        Some(JAN_15_1030_UTC_MS + 5 * 3_600_000)
    );
}

#[test]
fn fractional_seconds_and_space_separator_parse() {
    assert_eq!(parse_timestamp_ms("2024-01-15T10:30:00.123456", 0), Some(JAN_15_1030_UTC_MS + 123));
    assert_eq!(parse_timestamp_ms("2024-01-15 10:30:00", 0), Some(JAN_15_1030_UTC_MS));
}

#[test]
fn minute_precision_input_parses() {
    assert_eq!(parse_timestamp_ms("2024-01-15T10:30", 0), Some(JAN_15_1030_UTC_MS));
}

#[test]
fn rfc3339_keeps_its_offset() {
    assert_eq!(parse_timestamp_ms("2024-01-15T10:30:00Z", 300), Some(JAN_15_1030_UTC_MS));
    assert_eq!(
        parse_timestamp_ms("2024-01-15T05:30:00-05:00", 0),
        Some(JAN_15_1030_UTC_MS)
    );
}

#[test]
fn garbage_does_not_parse() {
    assert_eq!(parse_timestamp_ms("yesterday", 0), None);
    assert_eq!(parse_date("15/01/2024"), None);
}

#[test]
fn minutes_since_rounds_down_and_clamps() {
    let now = JAN_15_1030_UTC_MS + 90 * 60_000 + 59_000;
    assert_eq!(minutes_since("2024-01-15T10:30:00", now, 0), Some(90));
    assert_eq!(minutes_since("2024-01-15T10:30:00", JAN_15_1030_UTC_MS - 1, 0), Some(0));
}

#[test]
fn formatting_helpers() {
    assert_eq!(time_of_day("2024-01-15T08:05:00", 0), "08:05");
    assert_eq!(date_time("2024-01-15T08:05:00", 0), "15/01/2024 08:05");
    assert_eq!(time_of_day("n/a", 0), "n/a");
}

#[test]
fn now_input_value_uses_local_zone() {
    assert_eq!(now_input_value(JAN_15_1030_UTC_MS, 0), "2024-01-15T10:30");
    assert_eq!(now_input_value(JAN_15_1030_UTC_MS, 300), "2024-01-15T05:30");
}

#[test]
fn now_is_after_2020_natively() {
    assert!(now_ms() > 1_577_836_800_000);
}

#[test]
fn iso_utc_formats_rfc3339() {
    assert_eq!(iso_utc(JAN_15_1030_UTC_MS), "2024-01-15T10:30:00Z");
    assert_eq!(
        parse_timestamp_ms(&iso_utc(JAN_15_1030_UTC_MS), 300),
        Some(JAN_15_1030_UTC_MS)
    );
}
