//! Stream console: a single relay with every knob exposed.
//!
//! SYSTEM CONTEXT
//! ==============
//! Operators use this route to check a relay endpoint by hand. It connects
//! one `RelayView` with a chosen endpoint, source, capture settings and
//! reconnect schedule, and can push a test card to see whether the server
//! answers.
//!
//! DESIGN
//! ======
//! Every Connect builds a fresh `Connection` with a new generation number,
//! which remounts the relay view. The old view's cleanup shuts its driver
//! down, so settings that only apply at open time take effect cleanly.

#[cfg(test)]
#[path = "stream_test.rs"]
mod stream_test;

use std::time::Duration;

use leptos::prelude::*;
use relay::capture::FPS_CHOICES;
use relay::session::RECONNECT_DELAY;
use relay::{CameraKind, CameraSource, CaptureSettings, ReconnectPolicy, Resolution};

use crate::components::relay_view::RelayView;
use crate::config::ClientConfig;
use crate::net::relay_client::{RelayControls, RelaySnapshot};
use crate::state::ui::{ToastKind, UiState, notify};
use crate::util::format::bytes;

/// Shortest reconnect interval the console accepts.
const MIN_RECONNECT_SECS: u64 = 1;

/// One console connection. `generation` changes on every Connect.
#[derive(Clone, Debug, PartialEq)]
struct Connection {
    generation: u64,
    ws_url: String,
    source: CameraSource,
    policy: ReconnectPolicy,
}

/// Reconnect policy for the console's toggle and interval field.
fn console_policy(auto_reconnect: bool, interval_secs: u64) -> ReconnectPolicy {
    ReconnectPolicy {
        enabled: auto_reconnect,
        ..ReconnectPolicy::fixed(Duration::from_secs(interval_secs.max(MIN_RECONNECT_SECS)))
    }
}

/// Parse the interval field. Unparseable input keeps `current`.
fn parse_interval(input: &str, current: u64) -> u64 {
    input
        .trim()
        .parse::<u64>()
        .map_or(current, |secs| secs.max(MIN_RECONNECT_SECS))
}

/// Source for the console form, or a message naming the missing field.
fn console_source(kind: CameraKind, url: &str, name: &str) -> Result<CameraSource, String> {
    let name = if name.trim().is_empty() { "Console" } else { name.trim() };
    if kind.is_local() {
        return Ok(CameraSource::local(name));
    }
    let url = url.trim();
    if url.is_empty() {
        return Err("Camera URL is required for remote mode".to_owned());
    }
    Ok(CameraSource::remote(url, name))
}

#[component]
pub fn StreamPage() -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let ui = expect_context::<RwSignal<UiState>>();

    let endpoint = RwSignal::new(config.ws_url.clone());
    let kind = RwSignal::new(CameraKind::Remote);
    let camera_url = RwSignal::new(String::new());
    let camera_name = RwSignal::new("Console".to_owned());
    let settings = RwSignal::new(CaptureSettings::default());
    let auto_reconnect = RwSignal::new(true);
    let interval_secs = RwSignal::new(RECONNECT_DELAY.as_secs());

    let connection = RwSignal::new(None::<Connection>);
    let generation = RwSignal::new(0_u64);
    let snapshot = RwSignal::new(RelaySnapshot::default());
    let controls = RelayControls::new();

    let policy = move || console_policy(auto_reconnect.get(), interval_secs.get());

    // Live policy edits go straight to the running driver.
    Effect::new(move || {
        let policy = policy();
        if connection.with_untracked(Option::is_some) {
            controls.set_policy(policy);
        }
    });

    let on_connect = move |_| {
        match console_source(kind.get_untracked(), &camera_url.get_untracked(), &camera_name.get_untracked()) {
            Ok(source) => {
                generation.update(|g| *g += 1);
                snapshot.set(RelaySnapshot::default());
                connection.set(Some(Connection {
                    generation: generation.get_untracked(),
                    ws_url: endpoint.get_untracked().trim().to_owned(),
                    source,
                    policy: console_policy(auto_reconnect.get_untracked(), interval_secs.get_untracked()),
                }));
            }
            Err(error) => notify(ui, ToastKind::Error, error),
        }
    };
    let on_disconnect = move |_| {
        controls.disconnect();
        connection.set(None);
        snapshot.set(RelaySnapshot::default());
    };
    let on_test = move |_| {
        if !snapshot.with_untracked(RelaySnapshot::is_open) {
            notify(ui, ToastKind::Error, "Connect before testing");
            return;
        }
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::util::capture::test_pattern_jpeg().await {
                Ok(frame) => {
                    if controls.probe(frame) {
                        notify(ui, ToastKind::Info, "Test frame sent");
                    } else {
                        notify(ui, ToastKind::Error, "Test frame not sent");
                    }
                }
                Err(error) => notify(ui, ToastKind::Error, error),
            }
        });
    };

    let connected = move || connection.with(Option::is_some);
    let stats = move || snapshot.with(|s| s.stats.clone());

    view! {
        <div class="stream-page">
            <section class="panel stream-page__controls">
                <h2>"Stream console"</h2>

                <label class="dialog__field">
                    <span>"Relay endpoint"</span>
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || endpoint.get()
                        on:input=move |ev| endpoint.set(event_target_value(&ev))
                        disabled=connected
                    />
                </label>

                <label class="dialog__field">
                    <span>"Mode"</span>
                    <select
                        class="dialog__input"
                        disabled=connected
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            kind.set(if value == "local" { CameraKind::Local } else { CameraKind::Remote });
                        }
                    >
                        <option value="ip" selected=move || !kind.get().is_local()>"Remote camera URL"</option>
                        <option value="local" selected=move || kind.get().is_local()>"This device's camera"</option>
                    </select>
                </label>

                <Show when=move || !kind.get().is_local()>
                    <label class="dialog__field">
                        <span>"Camera URL"</span>
                        <input
                            class="dialog__input"
                            type="url"
                            placeholder="rtsp://192.168.1.100:554/stream"
                            prop:value=move || camera_url.get()
                            on:input=move |ev| camera_url.set(event_target_value(&ev))
                            disabled=connected
                        />
                    </label>
                </Show>

                <label class="dialog__field">
                    <span>"Camera name"</span>
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || camera_name.get()
                        on:input=move |ev| camera_name.set(event_target_value(&ev))
                        disabled=connected
                    />
                </label>

                <Show when=move || kind.get().is_local()>
                    <div class="stream-page__capture">
                        <label class="dialog__field">
                            <span>"Frame rate"</span>
                            <select
                                class="dialog__input"
                                on:change=move |ev| {
                                    if let Ok(fps) = event_target_value(&ev).parse::<u32>() {
                                        settings.update(|s| s.fps = fps);
                                    }
                                }
                            >
                                {FPS_CHOICES
                                    .iter()
                                    .map(|fps| {
                                        let fps = *fps;
                                        view! {
                                            <option value=fps.to_string() selected=move || settings.get().fps == fps>
                                                {format!("{fps} FPS")}
                                            </option>
                                        }
                                    })
                                    .collect_view()}
                            </select>
                        </label>
                        <label class="dialog__field">
                            <span>"Resolution"</span>
                            <select
                                class="dialog__input"
                                on:change=move |ev| {
                                    if let Ok(resolution) = event_target_value(&ev).parse::<Resolution>() {
                                        settings.update(|s| s.resolution = resolution);
                                    }
                                }
                            >
                                {Resolution::PRESETS
                                    .iter()
                                    .map(|preset| {
                                        let preset = *preset;
                                        view! {
                                            <option
                                                value=preset.to_string()
                                                selected=move || settings.get().resolution == preset
                                            >
                                                {preset.to_string()}
                                            </option>
                                        }
                                    })
                                    .collect_view()}
                            </select>
                        </label>
                        <label class="dialog__check">
                            <input
                                type="checkbox"
                                prop:checked=move || settings.get().auto_reduce
                                on:change=move |ev| settings.update(|s| s.auto_reduce = event_target_checked(&ev))
                            />
                            <span>"Reduce resolution on slow networks"</span>
                        </label>
                    </div>
                </Show>

                <label class="dialog__check">
                    <input
                        type="checkbox"
                        prop:checked=move || auto_reconnect.get()
                        on:change=move |ev| auto_reconnect.set(event_target_checked(&ev))
                    />
                    <span>"Reconnect automatically"</span>
                </label>
                <label class="dialog__field">
                    <span>"Reconnect interval (s)"</span>
                    <input
                        class="dialog__input"
                        type="number"
                        min=MIN_RECONNECT_SECS.to_string()
                        prop:value=move || interval_secs.get().to_string()
                        on:change=move |ev| {
                            let current = interval_secs.get_untracked();
                            interval_secs.set(parse_interval(&event_target_value(&ev), current));
                        }
                    />
                </label>

                <div class="dialog__actions">
                    <Show
                        when=connected
                        fallback=move || view! {
                            <button class="btn btn--primary" on:click=on_connect>"Connect"</button>
                        }
                    >
                        <button class="btn" on:click=on_disconnect>"Disconnect"</button>
                    </Show>
                    <button class="btn" on:click=on_test disabled=move || !connected()>"Test WS"</button>
                </div>
            </section>

            <section class="panel stream-page__view">
                <div class="section-header">
                    <span class=move || snapshot.with(RelaySnapshot::badge_class)></span>
                    <span>{move || snapshot.with(|s| s.status.clone())}</span>
                </div>
                {move || {
                    connection
                        .get()
                        .map(|conn| {
                            leptos::logging::log!("stream console connect #{}", conn.generation);
                            view! {
                                <RelayView
                                    source=conn.source
                                    ws_url=conn.ws_url
                                    snapshot=snapshot
                                    controls=controls
                                    policy=conn.policy
                                    settings=settings
                                    width=1280
                                    height=720
                                />
                            }
                        })
                }}
                <dl class="stream-page__stats">
                    <dt>"Frames received"</dt>
                    <dd>{move || stats().frames_received}</dd>
                    <dt>"Frames sent"</dt>
                    <dd>{move || stats().frames_sent}</dd>
                    <dt>"Frames dropped"</dt>
                    <dd>{move || stats().frames_dropped}</dd>
                    <dt>"Connect attempts"</dt>
                    <dd>{move || stats().connect_attempts}</dd>
                    <dt>"Last frame"</dt>
                    <dd>{move || stats().last_frame_bytes.map_or_else(|| "—".to_owned(), bytes)}</dd>
                    <dt>"Latency"</dt>
                    <dd>{move || stats().last_latency_ms.map_or_else(|| "—".to_owned(), |ms| format!("{ms} ms"))}</dd>
                </dl>
            </section>
        </div>
    }
}
