use super::*;

// 2024-01-15T10:30:00Z
const NOW_MS: i64 = 1_705_314_600_000;

#[test]
fn placeholder_entry_times_are_two_hours_and_45_minutes_back() {
    let (older, newer) = placeholder_entry_times(NOW_MS, 0);
    assert_eq!(older, "2024-01-15T08:30");
    assert_eq!(newer, "2024-01-15T09:45");
}

#[test]
fn placeholder_entry_times_follow_local_offset() {
    // UTC-5 reports +300 from getTimezoneOffset.
    let (older, _) = placeholder_entry_times(NOW_MS, 300);
    assert_eq!(older, "2024-01-15T03:30");
}
