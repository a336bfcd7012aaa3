//! Canvas surface bound to one live frame relay.
//!
//! SYSTEM CONTEXT
//! ==============
//! Camera cards, the camera viewer, and the stream console all render this
//! view. It spawns the relay driver on mount, runs the local capture loop
//! for `local` sources, and tears both down on unmount so no reconnect or
//! capture tick fires into a disposed view.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use relay::{CameraSource, CaptureSettings, ReconnectPolicy};

use crate::net::relay_client::{Overlay, RelayControls, RelaySnapshot};

/// Live canvas with status overlay.
#[component]
pub fn RelayView(
    source: CameraSource,
    ws_url: String,
    snapshot: RwSignal<RelaySnapshot>,
    #[prop(optional)] controls: Option<RelayControls>,
    #[prop(optional)] policy: Option<ReconnectPolicy>,
    #[prop(optional)] settings: Option<RwSignal<CaptureSettings>>,
    #[prop(default = 640)] width: u32,
    #[prop(default = 480)] height: u32,
) -> impl IntoView {
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
    let controls = controls.unwrap_or_default();
    let settings = settings.unwrap_or_else(|| RwSignal::new(CaptureSettings::default()));
    let capture_error = RwSignal::new(None::<String>);
    let is_local = source.kind.is_local();

    #[cfg(feature = "hydrate")]
    let flags = crate::util::capture::CaptureFlags::new();
    #[cfg(feature = "hydrate")]
    {
        let handle = crate::net::relay_client::spawn_relay(
            ws_url,
            source,
            policy.unwrap_or_default(),
            canvas_ref,
            snapshot,
        );
        controls.attach(handle);

        if is_local && flags.begin() {
            spawn_capture_loop(controls, settings, capture_error, flags.clone());
        }
        let flags = flags.clone();
        on_cleanup(move || {
            flags.stop();
            controls.shutdown();
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (ws_url, source, policy, settings);
    }

    // Retry also restarts a capture loop that gave up on a start failure.
    let on_retry = move |_| {
        capture_error.set(None);
        #[cfg(feature = "hydrate")]
        {
            if is_local && flags.begin() {
                spawn_capture_loop(controls, settings, capture_error, flags.clone());
            }
        }
        controls.reconnect();
    };

    let overlay = move || {
        if let Some(error) = capture_error.get() {
            return Overlay::Error(error);
        }
        snapshot.get().overlay()
    };

    view! {
        <div class="relay-view">
            <canvas
                node_ref=canvas_ref
                class="relay-view__canvas"
                width=width.to_string()
                height=height.to_string()
            ></canvas>
            {move || match overlay() {
                Overlay::None => ().into_any(),
                Overlay::Connecting => view! {
                    <div class="relay-view__overlay">
                        <span class="spinner"></span>
                        <span>"Connecting..."</span>
                    </div>
                }
                .into_any(),
                Overlay::Waiting => view! {
                    <div class="relay-view__overlay">
                        <span>{if is_local { "Starting camera..." } else { "Waiting for video..." }}</span>
                    </div>
                }
                .into_any(),
                Overlay::Error(message) => view! {
                    <div class="relay-view__overlay relay-view__overlay--error">
                        <span>{message}</span>
                        <button class="btn btn--small" on:click=on_retry.clone()>"Retry"</button>
                    </div>
                }
                .into_any(),
            }}
        </div>
    }
}

/// Sample the local camera at the configured rate and offer each JPEG to
/// the relay. Frames taken while the socket is not open are dropped by the
/// session.
#[cfg(feature = "hydrate")]
fn spawn_capture_loop(
    controls: RelayControls,
    settings: RwSignal<CaptureSettings>,
    capture_error: RwSignal<Option<String>>,
    flags: crate::util::capture::CaptureFlags,
) {
    use relay::CapturePacer;

    use crate::util::capture::{LocalCapture, TICK_MS};

    leptos::task::spawn_local(async move {
        let capture = match LocalCapture::start().await {
            Ok(capture) => capture,
            Err(error) => {
                leptos::logging::warn!("local capture failed: {error}");
                flags.finish();
                let _ = capture_error.try_set(Some(error));
                return;
            }
        };
        leptos::logging::log!("local capture started");

        let mut pacer = CapturePacer::new(settings.get_untracked().fps);
        while flags.is_alive() {
            gloo_timers::future::TimeoutFuture::new(TICK_MS).await;
            if !flags.is_alive() {
                break;
            }
            let Some(current) = settings.try_get_untracked() else {
                break;
            };
            pacer.set_fps(current.fps);
            if !pacer.should_capture(js_sys::Date::now()) {
                continue;
            }
            match capture.grab_jpeg(&current).await {
                Ok(bytes) => {
                    let _ = controls.send_frame(bytes);
                }
                Err(error) => leptos::logging::warn!("capture frame skipped: {error}"),
            }
        }
        capture.stop();
        flags.finish();
        leptos::logging::log!("local capture stopped");
    });
}
