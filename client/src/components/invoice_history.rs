//! Table of past and open invoices.

use leptos::prelude::*;

use crate::config::ClientConfig;
use crate::net::types::Record;
use crate::util::clock::{date_time, local_offset_minutes};
use crate::util::format::money;
use crate::util::vehicle::status_class;

/// Invoice history. Reloads whenever `refresh` changes.
#[component]
pub fn InvoiceHistory(refresh: RwSignal<u64>) -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let rows = RwSignal::new(Vec::<Record>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);

    Effect::new(move || {
        let _ = refresh.get();
        loading.set(true);
        let config = config.clone();
        leptos::task::spawn_local(async move {
            match crate::net::api::list_records(&config, &crate::net::types::RecordQuery::default()).await {
                Ok(records) => {
                    let _ = rows.try_set(records);
                    let _ = error.try_set(None);
                }
                Err(e) => {
                    leptos::logging::warn!("invoice history unavailable: {e}");
                    let _ = rows.try_set(crate::state::records::placeholder_history());
                    let _ = error.try_set(Some("Could not load invoice history".to_owned()));
                }
            }
            let _ = loading.try_set(false);
        });
    });

    let offset = local_offset_minutes();
    let fmt_time = move |value: Option<String>| value.map_or_else(|| "—".to_owned(), |s| date_time(&s, offset));

    view! {
        <section class="panel invoice-history">
            <div class="section-header">
                <h2>"Invoice history"</h2>
                <button class="btn btn--small" on:click=move |_| refresh.update(|n| *n += 1)>"Refresh"</button>
            </div>
            {move || error.get().map(|e| view! { <div class="banner banner--warning">{e}</div> })}
            <Show when=move || loading.get()>
                <div class="panel__empty"><span class="spinner"></span></div>
            </Show>
            <table class="table">
                <thead>
                    <tr>
                        <th>"Plate"</th>
                        <th>"Entry"</th>
                        <th>"Exit"</th>
                        <th>"Time"</th>
                        <th>"Paid"</th>
                        <th>"Status"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || rows.get()
                        key=|record| record.id
                        children=move |record| {
                            let estado = record.estado.clone().unwrap_or_default();
                            view! {
                                <tr>
                                    <td class="table__mono">{record.plate().unwrap_or("—").to_owned()}</td>
                                    <td>{fmt_time(record.hora_entrada.clone())}</td>
                                    <td>{fmt_time(record.hora_salida.clone())}</td>
                                    <td>{record.tiempo_total.clone().unwrap_or_else(|| "—".to_owned())}</td>
                                    <td>{record.valor_pagado.map_or_else(|| "—".to_owned(), money)}</td>
                                    <td><span class=format!("badge {}", status_class(&estado))>{estado.clone()}</span></td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </section>
    }
}
