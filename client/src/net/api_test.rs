use super::*;

#[test]
fn camera_endpoint_formats_expected_path() {
    assert_eq!(camera_endpoint(42), "/camaras/42");
}

#[test]
fn record_endpoint_formats_expected_path() {
    assert_eq!(record_endpoint(7), "/registros/7");
}

#[test]
fn close_invoice_endpoint_uses_record_id() {
    assert_eq!(close_invoice_endpoint(15), "/facturas/15/cerrar");
}

#[test]
fn records_endpoint_appends_filters() {
    assert_eq!(records_endpoint(&RecordQuery::default()), "/registros");
    assert_eq!(records_endpoint(&RecordQuery::active()), "/registros?estado=activo");
    assert_eq!(records_endpoint(&RecordQuery::recent(10)), "/registros?limit=10");
}

#[test]
fn request_failed_message_formats_status() {
    assert_eq!(request_failed_message("camera list", 502), "camera list failed: 502");
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn server_stubs_report_unavailable() {
    let config = ClientConfig::default();
    let result = block_on_ready(list_cameras(&config));
    assert_eq!(result, Err("not available on server".to_owned()));
}

/// Minimal executor for the ready-immediately server stubs.
#[cfg(not(feature = "hydrate"))]
fn block_on_ready<F: std::future::Future>(fut: F) -> F::Output {
    use std::pin::pin;
    use std::task::{Context, Poll, Waker};

    let mut fut = pin!(fut);
    let mut cx = Context::from_waker(Waker::noop());
    loop {
        if let Poll::Ready(output) = fut.as_mut().poll(&mut cx) {
            return output;
        }
    }
}
