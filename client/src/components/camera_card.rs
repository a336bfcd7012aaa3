//! Dashboard card for one camera: live relay view plus footer controls.

use leptos::prelude::*;
use relay::Camera;

use crate::components::relay_view::RelayView;
use crate::config::ClientConfig;
use crate::net::relay_client::RelaySnapshot;

/// One tile in the camera grid.
#[component]
pub fn CameraCard(camera: Camera, on_view: Callback<Camera>, on_delete: Callback<i64>) -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let snapshot = RwSignal::new(RelaySnapshot::default());

    let id = camera.id;
    let name = camera.name.clone();
    let kind_label = camera.kind.label();
    let kind_class = if camera.kind.is_local() {
        "camera-card__kind camera-card__kind--local"
    } else {
        "camera-card__kind camera-card__kind--remote"
    };
    let viewed = camera.clone();
    let source = camera.source();

    let on_view_click = move |_| on_view.run(viewed.clone());
    let on_delete_click = move |ev: leptos::ev::MouseEvent| {
        ev.stop_propagation();
        on_delete.run(id);
    };

    let live_label = move || if snapshot.get().is_open() { "Live" } else { "Disconnected" };
    let dot_class = move || snapshot.get().badge_class();

    view! {
        <div class="camera-card">
            <div class="camera-card__header">
                <span class="camera-card__name">{name}</span>
                <button class="btn btn--icon" on:click=on_view_click title="Open viewer">"⤢"</button>
            </div>
            <RelayView source=source ws_url=config.ws_url.clone() snapshot=snapshot width=480 height=270/>
            <div class="camera-card__footer">
                <span class=dot_class></span>
                <span class="camera-card__id">{format!("#{id}")}</span>
                <span class=kind_class>{kind_label}</span>
                <span class="camera-card__live">{live_label}</span>
                <span class="camera-card__status">{move || snapshot.get().status}</span>
                <button class="btn btn--icon btn--danger" on:click=on_delete_click title="Delete camera">"✕"</button>
            </div>
        </div>
    }
}
