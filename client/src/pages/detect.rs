//! Detect page: upload one image and show what the backend recognized.

#[cfg(test)]
#[path = "detect_test.rs"]
mod detect_test;

use leptos::prelude::*;

use crate::net::types::DetectionResult;
use crate::util::vehicle::{type_icon, type_label};

/// Headline for a detection response.
fn result_headline(result: &DetectionResult) -> String {
    match (&result.placa_detectada, result.success) {
        (Some(plate), true) if !plate.trim().is_empty() => format!("Plate {}", plate.trim()),
        (_, true) => "Vehicle detected, no plate read".to_owned(),
        (_, false) => result
            .message
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| "Nothing detected".to_owned()),
    }
}

#[component]
pub fn DetectPage() -> impl IntoView {
    let file_name = RwSignal::new(None::<String>);
    let running = RwSignal::new(false);
    let result = RwSignal::new(None::<DetectionResult>);
    let error = RwSignal::new(None::<String>);

    #[cfg(feature = "hydrate")]
    let selected = StoredValue::new_local(None::<web_sys::File>);
    #[cfg(feature = "hydrate")]
    let config = expect_context::<crate::config::ClientConfig>();

    let on_file = move |ev: leptos::ev::Event| {
        result.set(None);
        error.set(None);
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast;
            let file = ev
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
                .and_then(|input| input.files())
                .and_then(|files| files.get(0));
            file_name.set(file.as_ref().map(web_sys::File::name));
            selected.set_value(file);
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = ev;
    };

    let on_detect = move |_| {
        if running.get_untracked() {
            return;
        }
        #[cfg(feature = "hydrate")]
        {
            let Some(file) = selected.with_value(Clone::clone) else {
                error.set(Some("Choose an image first".to_owned()));
                return;
            };
            let config = config.clone();
            running.set(true);
            leptos::task::spawn_local(async move {
                match crate::net::api::detect_vehicle(&config, &file).await {
                    Ok(found) => {
                        let _ = result.try_set(Some(found));
                    }
                    Err(e) => {
                        leptos::logging::warn!("detection failed: {e}");
                        let _ = error.try_set(Some(e));
                    }
                }
                let _ = running.try_set(false);
            });
        }
    };

    view! {
        <div class="detect-page">
            <section class="panel">
                <h2>"Detect vehicle"</h2>
                <p class="dialog__hint">"Upload a photo of a vehicle to read its plate and type."</p>
                <label class="file-picker">
                    <input type="file" accept="image/*" on:change=on_file/>
                    <span>{move || file_name.get().unwrap_or_else(|| "Choose image...".to_owned())}</span>
                </label>
                <div class="dialog__actions">
                    <button
                        class="btn btn--primary"
                        on:click=on_detect
                        disabled=move || running.get() || file_name.with(Option::is_none)
                    >
                        {move || if running.get() { "Detecting..." } else { "Detect" }}
                    </button>
                </div>
                {move || error.get().map(|e| view! { <div class="banner banner--error">{e}</div> })}
                {move || result.get().map(|found| {
                    let kind = found.tipo_vehiculo.clone().unwrap_or_default();
                    let headline = result_headline(&found);
                    let class = if found.success { "detect-result detect-result--ok" } else { "detect-result detect-result--miss" };
                    view! {
                        <div class=class>
                            <span class="detect-result__icon">{type_icon(&kind)}</span>
                            <div>
                                <div class="detect-result__headline">{headline}</div>
                                <div class="detect-result__meta">
                                    {(!kind.is_empty()).then(|| type_label(&kind).to_owned())}
                                    {found.registro_id.map(|id| format!(" · record #{id}"))}
                                </div>
                            </div>
                        </div>
                    }
                })}
            </section>
        </div>
    }
}
