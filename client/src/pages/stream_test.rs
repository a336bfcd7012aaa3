use super::*;

// =============================================================
// console_policy
// =============================================================

#[test]
fn console_policy_uses_interval_for_both_delays() {
    let policy = console_policy(true, 7);
    assert!(policy.enabled);
    assert_eq!(policy.delay, Duration::from_secs(7));
    assert_eq!(policy.failure_delay, Duration::from_secs(7));
}

#[test]
fn console_policy_clamps_interval_to_one_second() {
    let policy = console_policy(true, 0);
    assert_eq!(policy.delay, Duration::from_secs(1));
}

#[test]
fn console_policy_can_disable_reconnect() {
    assert!(!console_policy(false, 3).enabled);
}

// =============================================================
// parse_interval
// =============================================================

#[test]
fn parse_interval_accepts_whole_seconds() {
    assert_eq!(parse_interval(" 10 ", 3), 10);
}

#[test]
fn parse_interval_keeps_current_on_garbage() {
    assert_eq!(parse_interval("soon", 3), 3);
    assert_eq!(parse_interval("-2", 4), 4);
}

#[test]
fn parse_interval_clamps_zero() {
    assert_eq!(parse_interval("0", 3), MIN_RECONNECT_SECS);
}

// =============================================================
// console_source
// =============================================================

#[test]
fn console_source_remote_requires_url() {
    assert!(console_source(CameraKind::Remote, "  ", "Gate").is_err());
}

#[test]
fn console_source_remote_keeps_url_and_name() {
    let source = console_source(CameraKind::Remote, " http://cam/video ", "Gate").expect("source");
    assert_eq!(source, CameraSource::remote("http://cam/video", "Gate"));
}

#[test]
fn console_source_local_ignores_url() {
    let source = console_source(CameraKind::Local, "http://ignored", "Desk").expect("source");
    assert_eq!(source, CameraSource::local("Desk"));
}

#[test]
fn console_source_defaults_blank_name() {
    let source = console_source(CameraKind::Local, "", "   ").expect("source");
    assert_eq!(source.name, "Console");
}
