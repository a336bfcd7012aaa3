//! Dialog for registering a remote (IP) or local camera.

use leptos::prelude::*;
use relay::{CameraKind, NewCamera};

#[component]
pub fn AddCameraDialog(on_close: Callback<()>, on_add: Callback<NewCamera>) -> impl IntoView {
    let name = RwSignal::new(String::new());
    let url = RwSignal::new(String::new());
    let kind = RwSignal::new(CameraKind::Remote);
    let error = RwSignal::new(None::<String>);

    let submit = move || match NewCamera::validate(&name.get_untracked(), kind.get_untracked(), &url.get_untracked()) {
        Ok(camera) => {
            on_add.run(camera);
            on_close.run(());
        }
        Err(e) => error.set(Some(e.to_string())),
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        submit();
    };
    let on_backdrop = move |_| on_close.run(());
    let on_cancel = move |_| on_close.run(());
    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            on_close.run(());
        }
    };
    let on_kind = move |ev| {
        let value = event_target_value(&ev);
        kind.set(if value == "local" { CameraKind::Local } else { CameraKind::Remote });
        error.set(None);
    };

    view! {
        <div class="dialog-backdrop" on:click=on_backdrop>
            <form
                class="dialog dialog--add-camera"
                on:click=move |ev| ev.stop_propagation()
                on:keydown=on_keydown
                on:submit=on_submit
            >
                <h2>"Add camera"</h2>

                <label class="dialog__field">
                    <span>"Name"</span>
                    <input
                        class="dialog__input"
                        type="text"
                        placeholder="e.g. Entrada Principal"
                        prop:value=move || name.get()
                        on:input=move |ev| {
                            name.set(event_target_value(&ev));
                            error.set(None);
                        }
                        autofocus=true
                    />
                </label>

                <label class="dialog__field">
                    <span>"Type"</span>
                    <select class="dialog__input" on:change=on_kind>
                        <option value="ip" selected=move || !kind.get().is_local()>"IP camera"</option>
                        <option value="local" selected=move || kind.get().is_local()>"This device's camera"</option>
                    </select>
                </label>

                <Show
                    when=move || !kind.get().is_local()
                    fallback=|| view! {
                        <p class="dialog__hint">"The browser will ask for camera permission when the card opens."</p>
                    }
                >
                    <label class="dialog__field">
                        <span>"Stream URL"</span>
                        <input
                            class="dialog__input"
                            type="url"
                            placeholder="http://192.168.1.100:8080/video"
                            prop:value=move || url.get()
                            on:input=move |ev| {
                                url.set(event_target_value(&ev));
                                error.set(None);
                            }
                        />
                    </label>
                </Show>

                {move || error.get().map(|e| view! { <p class="dialog__error">{e}</p> })}

                <div class="dialog__actions">
                    <button class="btn" type="button" on:click=on_cancel>"Cancel"</button>
                    <button class="btn btn--primary" type="submit">"Add"</button>
                </div>
            </form>
        </div>
    }
}
