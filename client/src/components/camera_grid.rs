//! Grid of camera cards backed by the shared camera store.

use leptos::prelude::*;
use relay::Camera;

use crate::components::camera_card::CameraCard;
use crate::state::cameras::CameraStore;

#[component]
pub fn CameraGrid(on_view: Callback<Camera>, on_delete: Callback<i64>) -> impl IntoView {
    let cameras = expect_context::<RwSignal<CameraStore>>();

    let loading = move || cameras.with(|s| s.loading);
    let empty = move || cameras.with(|s| !s.loading && s.is_empty());
    let list = move || cameras.with(|s| s.cameras().to_vec());

    view! {
        <section class="camera-grid">
            <div class="section-header">
                <h2>"Live cameras"</h2>
                <span class="section-header__count">{move || cameras.with(CameraStore::len)}</span>
            </div>
            <Show when=loading>
                <div class="camera-grid__empty"><span class="spinner"></span>" Loading cameras..."</div>
            </Show>
            <Show when=empty>
                <div class="camera-grid__empty">"No cameras configured. Add one from the toolbar."</div>
            </Show>
            <div class="camera-grid__tiles">
                <For
                    each=list
                    key=|camera| camera.id
                    children=move |camera| view! { <CameraCard camera=camera on_view=on_view on_delete=on_delete/> }
                />
            </div>
        </section>
    }
}
