//! Top navigation: route links, camera count, plate search, add-camera
//! dialog, and theme toggle.

use leptos::prelude::*;
use leptos_router::components::A;
use relay::NewCamera;

use crate::components::add_camera::AddCameraDialog;
use crate::state::cameras::CameraStore;
use crate::state::ui::UiState;
use crate::util::theme;

#[component]
pub fn Navbar(on_add_camera: Callback<NewCamera>) -> impl IntoView {
    let cameras = expect_context::<RwSignal<CameraStore>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let show_add = RwSignal::new(false);

    let camera_count = move || cameras.with(CameraStore::len);
    let store_error = move || cameras.with(|s| s.error.clone());

    let on_toggle_theme = move |_| {
        let next = theme::toggle(ui.get_untracked().theme);
        ui.update(|u| u.theme = next);
    };

    view! {
        <header class="navbar">
            <div class="navbar__brand">
                <span class="navbar__logo">"P"</span>
                <div>
                    <h1 class="navbar__title">"SmartParking"</h1>
                    <span class="navbar__subtitle">{move || format!("{} cameras", camera_count())}</span>
                </div>
                {move || store_error().map(|e| view! {
                    <span class="navbar__badge navbar__badge--error" title=e>"Connection error"</span>
                })}
            </div>

            <nav class="navbar__links">
                <A href="/">"Dashboard"</A>
                <A href="/stream">"Stream"</A>
                <A href="/records">"Records"</A>
                <A href="/stats">"Stats"</A>
                <A href="/detect">"Detect"</A>
            </nav>

            <div class="navbar__actions">
                <input
                    class="navbar__search"
                    type="search"
                    placeholder="Search by plate..."
                    prop:value=move || ui.get().search
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        ui.update(|u| u.search = value);
                    }
                />
                <button class="btn btn--primary" on:click=move |_| show_add.set(true)>"+ Camera"</button>
                <button class="btn btn--icon" on:click=on_toggle_theme title="Toggle dark mode">
                    {move || ui.get().theme.toggle_icon()}
                </button>
            </div>

            <Show when=move || show_add.get()>
                <AddCameraDialog
                    on_close=Callback::new(move |()| show_add.set(false))
                    on_add=on_add_camera
                />
            </Show>
        </header>
    }
}
