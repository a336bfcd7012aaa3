//! Records page: filterable table with create, edit and delete.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend returns the full record list; plate, type and date filters
//! run locally over it (see `state::records::RecordFilter`). Every write
//! reloads the list so the table always reflects the server.

use leptos::prelude::*;

use crate::components::record_form::{RecordForm, blank_draft};
use crate::config::ClientConfig;
use crate::net::types::{Record, RecordDraft};
use crate::state::records::{RecordFilter, RecordsState};
use crate::state::ui::{ToastKind, UiState, notify};
use crate::util::clock::{date_time, local_offset_minutes};
use crate::util::format::money;
use crate::util::vehicle::{VEHICLE_TYPES, direction_label, status_class, type_label};

/// Form target: `None` creates, `Some(id)` updates.
#[derive(Clone, Debug, PartialEq)]
struct Editing {
    id: Option<i64>,
    draft: RecordDraft,
}

#[component]
pub fn RecordsPage() -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let ui = expect_context::<RwSignal<UiState>>();
    let state = RwSignal::new(RecordsState {
        loading: true,
        ..RecordsState::default()
    });
    let editing = RwSignal::new(None::<Editing>);
    let confirm_delete = RwSignal::new(None::<Record>);
    let reload = RwSignal::new(0_u64);

    let config_load = config.clone();
    Effect::new(move || {
        let _ = reload.get();
        state.update(|s| s.loading = true);
        let config = config_load.clone();
        leptos::task::spawn_local(async move {
            let result = crate::net::api::list_records(&config, &crate::net::types::RecordQuery::default()).await;
            state.try_update(|s| {
                match result {
                    Ok(items) => {
                        s.items = items;
                        s.error = None;
                    }
                    Err(error) => {
                        leptos::logging::warn!("records unavailable: {error}");
                        s.items = crate::state::records::placeholder_history();
                        s.error = Some("Could not load records; showing sample data".to_owned());
                    }
                }
                s.loading = false;
            });
        });
    });

    let offset = local_offset_minutes();
    let visible = move || state.with(|s| s.visible(offset));
    let set_filter = move |apply: fn(&mut RecordFilter, String), value: String| {
        state.update(|s| apply(&mut s.filter, value));
    };

    let on_new = move |_| {
        editing.set(Some(Editing {
            id: None,
            draft: blank_draft(),
        }));
    };

    let config_edit = config.clone();
    let on_edit = Callback::new(move |record: Record| {
        let config = config_edit.clone();
        leptos::task::spawn_local(async move {
            let fresh = match crate::net::api::get_record(&config, record.id).await {
                Ok(fresh) => fresh,
                Err(error) => {
                    leptos::logging::warn!("record {} reload failed: {error}", record.id);
                    record
                }
            };
            let _ = editing.try_set(Some(Editing {
                id: Some(fresh.id),
                draft: RecordDraft::from_record(&fresh),
            }));
        });
    });

    let config_submit = config.clone();
    let on_submit = Callback::new(move |draft: RecordDraft| {
        let target = editing.get_untracked().and_then(|e| e.id);
        let config = config_submit.clone();
        leptos::task::spawn_local(async move {
            let result = match target {
                Some(id) => crate::net::api::update_record(&config, id, &draft).await,
                None => crate::net::api::create_record(&config, &draft).await,
            };
            match result {
                Ok(()) => {
                    let verb = if target.is_some() { "updated" } else { "created" };
                    notify(ui, ToastKind::Success, format!("Record {} {verb}", draft.placa_final));
                    reload.try_update(|n| *n += 1);
                }
                Err(error) => notify(ui, ToastKind::Error, error),
            }
        });
    });
    let on_close_form = Callback::new(move |()| editing.set(None));

    let config_delete = config.clone();
    let on_confirm_delete = move |_| {
        let Some(record) = confirm_delete.get_untracked() else {
            return;
        };
        confirm_delete.set(None);
        let config = config_delete.clone();
        leptos::task::spawn_local(async move {
            match crate::net::api::delete_record(&config, record.id).await {
                Ok(()) => {
                    notify(ui, ToastKind::Success, "Record deleted");
                    reload.try_update(|n| *n += 1);
                }
                Err(error) => notify(ui, ToastKind::Error, error),
            }
        });
    };

    view! {
        <div class="records-page">
            <section class="panel">
                <div class="section-header">
                    <h2>"Records"</h2>
                    <button class="btn btn--primary" on:click=on_new>"+ New record"</button>
                </div>

                <div class="filters">
                    <input
                        class="dialog__input"
                        type="text"
                        placeholder="Plate"
                        prop:value=move || state.with(|s| s.filter.plate.clone())
                        on:input=move |ev| set_filter(|f, v| f.plate = v, event_target_value(&ev))
                    />
                    <select
                        class="dialog__input"
                        on:change=move |ev| set_filter(|f, v| f.vehicle_type = v, event_target_value(&ev))
                    >
                        <option value="">"All types"</option>
                        {VEHICLE_TYPES
                            .iter()
                            .map(|code| view! { <option value=*code>{type_label(code).to_owned()}</option> })
                            .collect_view()}
                    </select>
                    <input
                        class="dialog__input"
                        type="date"
                        prop:value=move || state.with(|s| s.filter.from.clone())
                        on:input=move |ev| set_filter(|f, v| f.from = v, event_target_value(&ev))
                    />
                    <input
                        class="dialog__input"
                        type="date"
                        prop:value=move || state.with(|s| s.filter.to.clone())
                        on:input=move |ev| set_filter(|f, v| f.to = v, event_target_value(&ev))
                    />
                    <button
                        class="btn"
                        disabled=move || state.with(|s| s.filter.is_empty())
                        on:click=move |_| state.update(|s| s.filter = RecordFilter::default())
                    >
                        "Clear"
                    </button>
                </div>

                {move || state.with(|s| s.error.clone()).map(|e| view! { <div class="banner banner--warning">{e}</div> })}
                <Show when=move || state.with(|s| s.loading)>
                    <div class="panel__empty"><span class="spinner"></span></div>
                </Show>

                <table class="table">
                    <thead>
                        <tr>
                            <th>"ID"</th>
                            <th>"Plate"</th>
                            <th>"Type"</th>
                            <th>"Direction"</th>
                            <th>"Entry"</th>
                            <th>"Exit"</th>
                            <th>"Paid"</th>
                            <th>"Status"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=visible
                            key=|record| record.id
                            children=move |record| {
                                let kind = record.tipo_vehiculo.clone().unwrap_or_default();
                                let direction = record.direccion.clone().unwrap_or_default();
                                let estado = record.estado.clone().unwrap_or_default();
                                let fmt = move |value: Option<&str>| value.map_or_else(|| "—".to_owned(), |s| date_time(s, offset));
                                let edit_target = record.clone();
                                let delete_target = record.clone();
                                view! {
                                    <tr>
                                        <td>{record.id}</td>
                                        <td class="table__mono">{record.placa_final.clone().unwrap_or_else(|| "—".to_owned())}</td>
                                        <td>{type_label(&kind).to_owned()}</td>
                                        <td>{direction_label(&direction).to_owned()}</td>
                                        <td>{fmt(record.hora_entrada.as_deref())}</td>
                                        <td>{fmt(record.hora_salida.as_deref())}</td>
                                        <td>{record.valor_pagado.map_or_else(|| "—".to_owned(), money)}</td>
                                        <td><span class=format!("badge {}", status_class(&estado))>{estado.clone()}</span></td>
                                        <td class="table__actions">
                                            <button class="btn btn--small" on:click=move |_| on_edit.run(edit_target.clone())>"Edit"</button>
                                            <button
                                                class="btn btn--small btn--danger"
                                                on:click=move |_| confirm_delete.set(Some(delete_target.clone()))
                                            >
                                                "Delete"
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
                <Show when=move || !state.with(|s| s.loading) && visible().is_empty()>
                    <div class="panel__empty">"No records match the filters"</div>
                </Show>
            </section>

            {move || editing.get().map(|target| view! {
                <RecordForm
                    initial=target.draft
                    editing=target.id.is_some()
                    on_close=on_close_form
                    on_submit=on_submit
                />
            })}

            {move || confirm_delete.get().map(|record| view! {
                <div class="dialog-backdrop" on:click=move |_| confirm_delete.set(None)>
                    <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                        <h2>"Delete record"</h2>
                        <p>{format!("Delete record #{} ({})?", record.id, record.plate().unwrap_or("—"))}</p>
                        <div class="dialog__actions">
                            <button class="btn" on:click=move |_| confirm_delete.set(None)>"Cancel"</button>
                            <button class="btn btn--danger" on:click=on_confirm_delete.clone()>"Delete"</button>
                        </div>
                    </div>
                </div>
            })}
        </div>
    }
}
