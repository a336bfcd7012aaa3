use super::*;

#[test]
fn money_groups_thousands() {
    assert_eq!(money(0.0), "$0");
    assert_eq!(money(3000.0), "$3,000");
    assert_eq!(money(1_234_567.4), "$1,234,567");
    assert_eq!(money(999.5), "$1,000");
    assert_eq!(money(-6000.0), "-$6,000");
}

#[test]
fn elapsed_label_switches_at_one_hour() {
    assert_eq!(elapsed_label(0), "0 min");
    assert_eq!(elapsed_label(45), "45 min");
    assert_eq!(elapsed_label(60), "1h 0m");
    assert_eq!(elapsed_label(125), "2h 5m");
}

#[test]
fn hours_minutes_clamps_negative() {
    assert_eq!(hours_minutes(-5), "0h 0m");
}

#[test]
fn hours_drops_trailing_zero() {
    assert_eq!(hours(2.0), "2h");
    assert_eq!(hours(2.5), "2.5h");
}

#[test]
fn bytes_picks_unit() {
    assert_eq!(bytes(812), "812 B");
    assert_eq!(bytes(12_697), "12.4 KB");
    assert_eq!(bytes(1_258_291), "1.2 MB");
}
