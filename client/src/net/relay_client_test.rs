use super::*;
use relay::{CameraSource, ReconnectPolicy};

fn session() -> RelaySession {
    RelaySession::new(
        CameraSource::remote("http://192.168.1.100:8080/video", "Entrada Principal"),
        ReconnectPolicy::default(),
    )
}

// =============================================================================
// RelaySnapshot::of
// =============================================================================

#[test]
fn default_snapshot_is_idle_without_frame() {
    let snapshot = RelaySnapshot::default();
    assert_eq!(snapshot.state, SessionState::Idle);
    assert_eq!(snapshot.status, "Idle");
    assert!(!snapshot.has_frame);
    assert!(!snapshot.is_open());
}

#[test]
fn snapshot_copies_session_status_and_stats() {
    let mut session = session();
    assert!(session.begin_connect());
    assert!(session.on_open().is_some());
    let _ = session.on_binary(vec![0xFF, 0xD8, 0xFF], 10);

    let snapshot = RelaySnapshot::of(&session, true);
    assert!(snapshot.is_open());
    assert_eq!(snapshot.status, "Connected");
    assert_eq!(snapshot.stats.frames_received, 1);
    assert_eq!(snapshot.stats.last_frame_bytes, Some(3));
}

// =============================================================================
// overlay
// =============================================================================

#[test]
fn overlay_shows_connecting_before_open() {
    let mut session = session();
    assert_eq!(RelaySnapshot::of(&session, false).overlay(), Overlay::Connecting);
    session.begin_connect();
    assert_eq!(RelaySnapshot::of(&session, false).overlay(), Overlay::Connecting);
}

#[test]
fn overlay_waits_for_first_frame_then_clears() {
    let mut session = session();
    session.begin_connect();
    session.on_open();
    assert_eq!(RelaySnapshot::of(&session, false).overlay(), Overlay::Waiting);
    assert_eq!(RelaySnapshot::of(&session, true).overlay(), Overlay::None);
}

#[test]
fn overlay_reports_close_error_text() {
    let mut session = session();
    session.begin_connect();
    session.on_open();
    session.on_error("connection closed (1006)");
    session.on_close();
    assert_eq!(
        RelaySnapshot::of(&session, true).overlay(),
        Overlay::Error("connection closed (1006)".to_owned())
    );
}

#[test]
fn overlay_reports_failed_open() {
    let mut session = session();
    session.begin_connect();
    session.connect_failed("invalid url");
    assert_eq!(
        RelaySnapshot::of(&session, false).overlay(),
        Overlay::Error("invalid url".to_owned())
    );
}

#[test]
fn overlay_after_operator_disconnect_says_disconnected() {
    let mut session = session();
    session.begin_connect();
    session.on_open();
    session.disconnect();
    assert_eq!(
        RelaySnapshot::of(&session, true).overlay(),
        Overlay::Error("Disconnected".to_owned())
    );
}

#[test]
fn overlay_is_empty_after_dispose() {
    let mut session = session();
    session.dispose();
    assert_eq!(RelaySnapshot::of(&session, false).overlay(), Overlay::None);
}

// =============================================================================
// badge_class
// =============================================================================

#[test]
fn badge_class_tracks_state() {
    let mut session = session();
    assert!(RelaySnapshot::of(&session, false).badge_class().ends_with("--connecting"));
    session.begin_connect();
    session.on_open();
    assert!(RelaySnapshot::of(&session, false).badge_class().ends_with("--live"));
    session.on_close();
    assert!(RelaySnapshot::of(&session, false).badge_class().ends_with("--offline"));
}

// =============================================================================
// handshake_result
// =============================================================================

#[test]
fn handshake_counts_only_open_ready_state() {
    assert_eq!(handshake_result(1), Ok(()));
    assert!(handshake_result(0).is_err());
    assert!(handshake_result(2).is_err());
    assert!(handshake_result(3).is_err());
}

#[test]
fn refused_socket_fails_the_open_instead_of_connecting() {
    let mut session = session();
    assert!(session.begin_connect());

    // Socket woke the handshake wait but is already CLOSED.
    let error = handshake_result(3).expect_err("refused");
    let ticket = session.connect_failed(error).expect("ticket");

    assert_eq!(ticket.delay, relay::session::FAILED_OPEN_DELAY);
    assert!(matches!(session.state(), SessionState::Closed { error: Some(_) }));
    assert_eq!(session.status(), "connection refused");
    assert!(session.on_open().is_none());

    let snapshot = RelaySnapshot::of(&session, false);
    assert!(!snapshot.is_open());
    assert_eq!(snapshot.overlay(), Overlay::Error("connection refused".to_owned()));
}
