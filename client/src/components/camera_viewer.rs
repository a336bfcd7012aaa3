//! Full-size modal viewer for one camera, with snapshot download.

use leptos::prelude::*;
use relay::Camera;

use crate::components::relay_view::RelayView;
use crate::config::ClientConfig;
use crate::net::relay_client::{RelayControls, RelaySnapshot};
use crate::state::ui::{ToastKind, UiState, notify};

#[component]
pub fn CameraViewer(camera: Camera, on_close: Callback<()>) -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let ui = expect_context::<RwSignal<UiState>>();
    let snapshot = RwSignal::new(RelaySnapshot::default());
    let controls = RelayControls::new();

    let name = camera.name.clone();
    let title = camera.name.clone();
    let url = camera.source_url.clone();
    let kind_label = camera.kind.label();

    let on_capture = move |_| match controls.save_snapshot(&name) {
        Ok(()) => notify(ui, ToastKind::Success, "Snapshot saved"),
        Err(error) => notify(ui, ToastKind::Error, error),
    };
    let on_backdrop = move |_| on_close.run(());
    let on_close_click = move |_| on_close.run(());
    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            on_close.run(());
        }
    };

    view! {
        <div class="dialog-backdrop" on:click=on_backdrop>
            <div
                class="dialog dialog--viewer"
                on:click=move |ev| ev.stop_propagation()
                on:keydown=on_keydown
                tabindex="0"
            >
                <div class="dialog__header">
                    <h2>{title}</h2>
                    <span class="dialog__subtitle">{kind_label}" · "{url}</span>
                </div>
                <RelayView
                    source=camera.source()
                    ws_url=config.ws_url.clone()
                    snapshot=snapshot
                    controls=controls
                    width=1280
                    height=720
                />
                <div class="dialog__actions">
                    <span class="dialog__status">{move || snapshot.get().status}</span>
                    <button
                        class="btn"
                        on:click=on_capture
                        disabled=move || !snapshot.get().has_frame
                    >
                        "Capture"
                    </button>
                    <button class="btn btn--primary" on:click=on_close_click>"Close"</button>
                </div>
            </div>
        </div>
    }
}
