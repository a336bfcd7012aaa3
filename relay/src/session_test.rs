use futures::executor::block_on;

use super::*;
use crate::camera::CameraSource;
use crate::protocol::ConfigType;
use crate::surface::present_frame;
use crate::surface::surface_test::CountingRegistry;

const JPEG: [u8; 4] = [0xFF, 0xD8, 0xFF, 0xD9];

fn remote_session() -> RelaySession {
    RelaySession::new(
        CameraSource::remote("http://192.168.1.100:8080/video", "Entrada"),
        ReconnectPolicy::default(),
    )
}

fn open_session() -> RelaySession {
    let mut session = remote_session();
    assert!(session.begin_connect());
    assert!(session.on_open().is_some());
    session
}

#[test]
fn new_session_is_idle() {
    let session = remote_session();
    assert_eq!(session.state(), &SessionState::Idle);
    assert_eq!(session.status(), "Idle");
    assert!(!session.reconnect_pending());
}

#[test]
fn begin_connect_moves_to_connecting_once() {
    let mut session = remote_session();
    assert!(session.begin_connect());
    assert_eq!(session.state(), &SessionState::Connecting);
    assert!(!session.begin_connect());
    assert_eq!(session.stats().connect_attempts, 1);
}

#[test]
fn open_returns_config_for_remote_source() {
    let mut session = remote_session();
    session.begin_connect();
    let config = session.on_open().expect("config");
    assert_eq!(config.kind, ConfigType::CameraUrl);
    assert_eq!(config.url, "http://192.168.1.100:8080/video");
    assert_eq!(session.status(), "Connected");
}

#[test]
fn open_returns_config_for_local_source() {
    let mut session = RelaySession::new(CameraSource::local("Desk"), ReconnectPolicy::default());
    session.begin_connect();
    let config = session.on_open().expect("config");
    assert_eq!(config.kind, ConfigType::CameraLocal);
}

#[test]
fn open_outside_connecting_is_ignored() {
    let mut session = remote_session();
    assert!(session.on_open().is_none());
    let mut open = open_session();
    assert!(open.on_open().is_none());
}

#[test]
fn open_clears_previous_error() {
    let mut session = open_session();
    session.on_error("Connection error");
    session.on_close();
    session.begin_connect();
    session.on_open();
    assert_eq!(session.last_error(), None);
}

// =============================================================
// Inbound
// =============================================================

#[test]
fn binary_while_open_is_delivered_and_counted() {
    let mut session = open_session();
    assert_eq!(session.on_binary(JPEG.to_vec(), 100), Delivery::Frame(JPEG.to_vec()));
    assert_eq!(session.stats().frames_received, 1);
    assert_eq!(session.stats().last_frame_bytes, Some(4));
    assert_eq!(session.stats().last_received_ms, Some(100));
}

#[test]
fn binary_while_not_open_is_ignored() {
    let mut session = remote_session();
    assert_eq!(session.on_binary(JPEG.to_vec(), 0), Delivery::Ignored);
    assert_eq!(session.stats().frames_received, 0);
}

#[test]
fn server_error_text_sets_status_without_closing() {
    let mut session = open_session();
    let delivery = session.on_text(r#"{"error":"Camera offline"}"#, 0);
    assert_eq!(delivery, Delivery::ServerError("Camera offline".to_owned()));
    assert!(session.is_open());
    assert_eq!(session.status(), "Camera offline");
}

#[test]
fn decode_error_keeps_session_open() {
    let mut session = open_session();
    session.on_decode_error("bad jpeg");
    assert!(session.is_open());
    assert_eq!(session.on_binary(JPEG.to_vec(), 1), Delivery::Frame(JPEG.to_vec()));
}

// =============================================================
// Reconnect
// =============================================================

#[test]
fn close_schedules_exactly_one_reconnect() {
    let mut session = open_session();
    let ticket = session.on_close().expect("ticket");
    assert_eq!(ticket.delay, RECONNECT_DELAY);
    assert!(session.on_close().is_none());
    assert!(session.reconnect_due(ticket));
    assert!(!session.reconnect_due(ticket));
}

#[test]
fn error_then_close_reports_error_in_closed_state() {
    let mut session = open_session();
    session.on_error("Connection error");
    assert!(session.is_open());
    session.on_close();
    assert_eq!(
        session.state(),
        &SessionState::Closed {
            error: Some("Connection error".to_owned())
        }
    );
    assert_eq!(session.status(), "Connection error");
}

#[test]
fn stale_ticket_is_not_honored() {
    let mut session = open_session();
    let first = session.on_close().expect("first");
    session.begin_connect();
    session.on_open();
    let second = session.on_close().expect("second");
    assert!(!session.reconnect_due(first));
    assert!(session.reconnect_due(second));
}

#[test]
fn dispose_cancels_pending_reconnect() {
    let mut session = open_session();
    let ticket = session.on_close().expect("ticket");
    session.dispose();
    assert!(!session.reconnect_due(ticket));
    assert!(!session.begin_connect());
    assert_eq!(session.state(), &SessionState::Disposed);
}

#[test]
fn close_after_dispose_schedules_nothing() {
    let mut session = open_session();
    session.dispose();
    assert!(session.on_close().is_none());
}

#[test]
fn disabled_policy_never_schedules() {
    let mut session = open_session();
    session.set_policy(ReconnectPolicy {
        enabled: false,
        ..ReconnectPolicy::default()
    });
    assert!(session.on_close().is_none());
    assert!(!session.reconnect_pending());
    assert!(session.begin_connect());
}

#[test]
fn reconnects_continue_indefinitely_at_fixed_delay() {
    let mut session = remote_session();
    for _ in 0..50 {
        assert!(session.begin_connect());
        session.on_open();
        let ticket = session.on_close().expect("ticket");
        assert_eq!(ticket.delay, RECONNECT_DELAY);
        assert!(session.reconnect_due(ticket));
    }
    assert_eq!(session.stats().connect_attempts, 50);
}

#[test]
fn explicit_reconnect_cancels_pending_ticket() {
    let mut session = open_session();
    let ticket = session.on_close().expect("ticket");
    assert!(session.request_reconnect());
    assert!(!session.reconnect_due(ticket));
    assert_eq!(session.state(), &SessionState::Idle);
    assert!(session.begin_connect());
}

#[test]
fn explicit_reconnect_after_dispose_is_refused() {
    let mut session = open_session();
    session.dispose();
    assert!(!session.request_reconnect());
}

#[test]
fn custom_fixed_policy_applies_to_both_paths() {
    let delay = std::time::Duration::from_secs(7);
    let mut session = RelaySession::new(CameraSource::local("x"), ReconnectPolicy::fixed(delay));
    session.begin_connect();
    assert_eq!(session.connect_failed("refused").expect("ticket").delay, delay);
    session.begin_connect();
    session.on_open();
    assert_eq!(session.on_close().expect("ticket").delay, delay);
}

#[test]
fn disconnect_closes_without_scheduling() {
    let mut session = open_session();
    assert!(session.disconnect());
    assert_eq!(session.state(), &SessionState::Closed { error: None });
    assert!(!session.reconnect_pending());
    assert!(session.on_close().is_none());
    assert!(session.begin_connect());
}

#[test]
fn disconnect_cancels_pending_ticket() {
    let mut session = open_session();
    let ticket = session.on_close().expect("ticket");
    session.disconnect();
    assert!(!session.reconnect_due(ticket));
}

#[test]
fn presented_frame_clears_decode_error() {
    let mut session = open_session();
    session.on_decode_error("bad jpeg");
    assert_eq!(session.status(), "bad jpeg");
    session.on_frame_presented();
    assert_eq!(session.status(), "Connected");
}

// =============================================================
// Outbound
// =============================================================

#[test]
fn outbound_while_not_open_is_dropped() {
    let mut session = remote_session();
    assert_eq!(session.offer_outbound(1024, 0), Outbound::Drop);
    session.begin_connect();
    assert_eq!(session.offer_outbound(1024, 0), Outbound::Drop);
    assert_eq!(session.stats().frames_dropped, 2);
    assert_eq!(session.stats().frames_sent, 0);
}

#[test]
fn outbound_while_open_is_sent() {
    let mut session = open_session();
    assert_eq!(session.offer_outbound(2048, 55), Outbound::Send);
    assert_eq!(session.stats().frames_sent, 1);
    assert_eq!(session.stats().last_sent_ms, Some(55));
}

#[test]
fn outbound_after_close_is_dropped() {
    let mut session = open_session();
    session.on_close();
    assert_eq!(session.offer_outbound(10, 0), Outbound::Drop);
}

// =============================================================
// Latency probe
// =============================================================

#[test]
fn probe_resolves_on_next_frame() {
    let mut session = open_session();
    assert!(session.start_probe(1_000));
    assert!(session.stats().probe_pending());
    session.on_binary(JPEG.to_vec(), 1_120);
    assert_eq!(session.stats().last_latency_ms, Some(120));
    assert!(!session.stats().probe_pending());
}

#[test]
fn probe_expires_after_timeout() {
    let mut session = open_session();
    session.start_probe(0);
    assert!(!session.expire_probe(PROBE_TIMEOUT_MS - 1));
    assert!(session.expire_probe(PROBE_TIMEOUT_MS));
    assert_eq!(session.last_error(), Some("No response to test within 5s"));
    assert!(!session.expire_probe(PROBE_TIMEOUT_MS * 2));
}

#[test]
fn probe_requires_open_session() {
    let mut session = remote_session();
    assert!(!session.start_probe(0));
}

// =============================================================
// Scenarios
// =============================================================

#[test]
fn three_frames_then_close_then_reconnect() {
    let registry = CountingRegistry::default();
    let mut session = open_session();
    let mut drawn = Vec::new();

    for (index, now) in [10_u64, 20, 30].into_iter().enumerate() {
        let mut frame = JPEG.to_vec();
        frame.push(u8::try_from(index).expect("index"));
        let Delivery::Frame(bytes) = session.on_binary(frame, now) else {
            panic!("frame should be delivered");
        };
        let marker = bytes[4];
        block_on(present_frame(&registry, &bytes, |handle| {
            drawn.push((handle, marker));
            async { Ok(()) }
        }))
        .expect("present");
    }

    assert_eq!(drawn, vec![(1, 0), (2, 1), (3, 2)]);
    assert_eq!(registry.created.get(), 3);
    assert_eq!(*registry.released.borrow(), vec![1, 2, 3]);

    let ticket = session.on_close().expect("reconnect scheduled");
    assert_eq!(ticket.delay, RECONNECT_DELAY);
    assert!(session.reconnect_due(ticket));
    assert!(session.begin_connect());
    assert_eq!(session.stats().connect_attempts, 2);
}

#[test]
fn failed_open_reports_error_and_reconnects_after_failure_delay() {
    let mut session = remote_session();
    session.begin_connect();
    let ticket = session.connect_failed("Could not connect").expect("ticket");
    assert_eq!(session.status(), "Could not connect");
    assert_eq!(ticket.delay, FAILED_OPEN_DELAY);
    assert!(session.reconnect_due(ticket));
    assert!(session.begin_connect());
    assert_eq!(session.state(), &SessionState::Connecting);
}

#[test]
fn undecodable_frame_releases_its_reference() {
    let registry = CountingRegistry::default();
    let mut session = open_session();
    let Delivery::Frame(bytes) = session.on_binary(b"not a jpeg".to_vec(), 0) else {
        panic!("frame should be delivered");
    };
    let result = block_on(present_frame(&registry, &bytes, |_| async { Err("decode".to_owned()) }));
    if let Err(err) = result {
        session.on_decode_error(err.to_string());
    }
    assert_eq!(registry.created.get(), 1);
    assert_eq!(registry.released.borrow().len(), 1);
    assert!(session.is_open());
}

#[test]
fn error_then_close_while_connecting_never_opens() {
    let mut session = remote_session();
    assert!(session.begin_connect());

    session.on_error("connection refused");
    assert_eq!(session.state(), &SessionState::Connecting);

    let ticket = session.on_close().expect("ticket");
    assert_eq!(ticket.delay, RECONNECT_DELAY);
    assert_eq!(
        session.state(),
        &SessionState::Closed {
            error: Some("connection refused".to_owned())
        }
    );
    assert_eq!(session.status(), "connection refused");
    assert!(session.on_open().is_none());
    assert_eq!(session.stats().frames_received, 0);
}
