//! Create/edit dialog for a parking record.

use leptos::prelude::*;

use crate::net::types::RecordDraft;
use crate::util::clock::{local_offset_minutes, now_input_value, now_ms};
use crate::util::vehicle::{VEHICLE_TYPES, type_label};

/// Length of a `datetime-local` value (`YYYY-MM-DDTHH:MM`).
const INPUT_DATETIME_LEN: usize = 16;

/// Blank draft for a new entry: a car entering now.
pub fn blank_draft() -> RecordDraft {
    RecordDraft {
        placa_final: String::new(),
        tipo_vehiculo: "car".to_owned(),
        direccion: "entrada".to_owned(),
        hora_entrada: now_input_value(now_ms(), local_offset_minutes()),
    }
}

/// Dialog editing `initial`. `editing` only changes the title and button.
#[component]
pub fn RecordForm(
    initial: RecordDraft,
    #[prop(optional)] editing: bool,
    on_close: Callback<()>,
    on_submit: Callback<RecordDraft>,
) -> impl IntoView {
    let plate = RwSignal::new(initial.placa_final);
    let kind = RwSignal::new(initial.tipo_vehiculo);
    let direction = RwSignal::new(initial.direccion);
    let entered = RwSignal::new(initial.hora_entrada.chars().take(INPUT_DATETIME_LEN).collect::<String>());
    let error = RwSignal::new(None::<String>);

    let on_form_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let placa_final = plate.get_untracked().trim().to_uppercase();
        if placa_final.is_empty() {
            error.set(Some("Plate is required".to_owned()));
            return;
        }
        on_submit.run(RecordDraft {
            placa_final,
            tipo_vehiculo: kind.get_untracked(),
            direccion: direction.get_untracked(),
            hora_entrada: entered.get_untracked(),
        });
        on_close.run(());
    };
    let on_backdrop = move |_| on_close.run(());
    let on_cancel = move |_| on_close.run(());
    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            on_close.run(());
        }
    };

    view! {
        <div class="dialog-backdrop" on:click=on_backdrop>
            <form
                class="dialog dialog--record"
                on:click=move |ev| ev.stop_propagation()
                on:keydown=on_keydown
                on:submit=on_form_submit
            >
                <h2>{if editing { "Edit record" } else { "New record" }}</h2>

                <label class="dialog__field">
                    <span>"Plate"</span>
                    <input
                        class="dialog__input table__mono"
                        type="text"
                        placeholder="ABC123"
                        prop:value=move || plate.get()
                        on:input=move |ev| {
                            plate.set(event_target_value(&ev));
                            error.set(None);
                        }
                        autofocus=true
                    />
                </label>

                <label class="dialog__field">
                    <span>"Vehicle type"</span>
                    <select class="dialog__input" on:change=move |ev| kind.set(event_target_value(&ev))>
                        {VEHICLE_TYPES
                            .iter()
                            .map(|code| {
                                let code = *code;
                                view! {
                                    <option value=code selected=move || kind.get() == code>
                                        {type_label(code).to_owned()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </label>

                <label class="dialog__field">
                    <span>"Direction"</span>
                    <select class="dialog__input" on:change=move |ev| direction.set(event_target_value(&ev))>
                        <option value="entrada" selected=move || direction.get() == "entrada">"Entrada"</option>
                        <option value="salida" selected=move || direction.get() == "salida">"Salida"</option>
                    </select>
                </label>

                <label class="dialog__field">
                    <span>"Entry time"</span>
                    <input
                        class="dialog__input"
                        type="datetime-local"
                        prop:value=move || entered.get()
                        on:input=move |ev| entered.set(event_target_value(&ev))
                    />
                </label>

                {move || error.get().map(|e| view! { <p class="dialog__error">{e}</p> })}

                <div class="dialog__actions">
                    <button class="btn" type="button" on:click=on_cancel>"Cancel"</button>
                    <button class="btn btn--primary" type="submit">
                        {if editing { "Save" } else { "Create" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
